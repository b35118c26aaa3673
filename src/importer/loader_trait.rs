// ==========================================
// 季度奖金面板 - 数据加载 Trait
// ==========================================
// 职责: 定义数据加载接口（不包含实现）
// 管道: 文件解析 → 字段映射 → 员工记录
// ==========================================

use crate::domain::employee::EmployeeRecord;
use crate::domain::indicator::MissedIndicatorTable;
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// DatasetLoader Trait
// ==========================================
// 用途: 加载面板所需的两份只读数据
// 实现者: BonusDataLoader
#[async_trait]
pub trait DatasetLoader: Send + Sync {
    /// 加载员工奖金数据集
    ///
    /// # 参数
    /// - path: 数据文件路径（.json / .csv / .xlsx / .xls）
    ///
    /// # 返回
    /// - Ok(Vec<EmployeeRecord>): 记录列表（保持文件中的顺序）
    /// - Err: 文件读取错误、格式错误、字段缺失
    async fn load_employees(&self, path: &Path) -> ImportResult<Vec<EmployeeRecord>>;

    /// 加载漏报指标表（JSON 嵌套映射）
    async fn load_missed_indicators(&self, path: &Path) -> ImportResult<MissedIndicatorTable>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 表格文件解析为原始行记录
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录（HashMap<列名, 值>）
    ///
    /// 完全空白的行会被跳过
    fn parse_to_raw_records(
        &self,
        file_path: &Path,
    ) -> ImportResult<Vec<HashMap<String, String>>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 原始行记录 → EmployeeRecord
// 实现者: EmployeeFieldMapper
pub trait FieldMapper: Send + Sync {
    /// # 参数
    /// - row: 原始行记录
    /// - row_number: 数据行号（从 1 开始，用于错误定位）
    fn map_to_employee(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<EmployeeRecord>;
}
