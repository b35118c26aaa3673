// ==========================================
// 季度奖金面板 - 数据加载器实现
// ==========================================
// 员工数据集: JSON（记录数组）/ CSV / Excel
// 漏报指标表: JSON（公司 → 月份 → 指标列表）
// ==========================================

use crate::domain::employee::EmployeeRecord;
use crate::domain::indicator::MissedIndicatorTable;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::EmployeeFieldMapper;
use crate::importer::file_parser::{SourceFormat, UniversalFileParser};
use crate::importer::loader_trait::{DatasetLoader, FieldMapper};
use async_trait::async_trait;
use std::path::Path;
use tracing::{info, instrument, warn};

// ==========================================
// BonusDataLoader - 数据加载器
// ==========================================
pub struct BonusDataLoader {
    field_mapper: Box<dyn FieldMapper>,
    /// 漏报指标表中出现未登记指标时是否告警
    warn_unknown_indicators: bool,
}

impl BonusDataLoader {
    pub fn new(warn_unknown_indicators: bool) -> Self {
        Self {
            field_mapper: Box::new(EmployeeFieldMapper),
            warn_unknown_indicators,
        }
    }

    async fn read_text(path: &Path) -> ImportResult<String> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        Ok(tokio::fs::read_to_string(path).await?)
    }

    /// 表格文件解析在阻塞线程池中执行
    async fn load_tabular(&self, path: &Path) -> ImportResult<Vec<EmployeeRecord>> {
        let owned = path.to_path_buf();
        let rows = tokio::task::spawn_blocking(move || UniversalFileParser.parse(owned))
            .await
            .map_err(|e| ImportError::InternalError(format!("解析任务失败: {}", e)))??;

        rows.iter()
            .enumerate()
            .map(|(idx, row)| self.field_mapper.map_to_employee(row, idx + 1))
            .collect()
    }
}

impl Default for BonusDataLoader {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl DatasetLoader for BonusDataLoader {
    #[instrument(skip(self, path), fields(path = %path.display()))]
    async fn load_employees(&self, path: &Path) -> ImportResult<Vec<EmployeeRecord>> {
        let records = match SourceFormat::from_path(path)? {
            SourceFormat::Json => {
                let text = Self::read_text(path).await?;
                serde_json::from_str::<Vec<EmployeeRecord>>(&text)?
            }
            SourceFormat::Csv | SourceFormat::Excel => self.load_tabular(path).await?,
        };

        info!(count = records.len(), "员工数据加载完成");
        Ok(records)
    }

    #[instrument(skip(self, path), fields(path = %path.display()))]
    async fn load_missed_indicators(&self, path: &Path) -> ImportResult<MissedIndicatorTable> {
        if SourceFormat::from_path(path)? != SourceFormat::Json {
            return Err(ImportError::UnsupportedFormat(format!(
                "{}（漏报指标表仅支持 .json）",
                path.display()
            )));
        }

        let text = Self::read_text(path).await?;
        let table: MissedIndicatorTable = serde_json::from_str(&text)?;

        // 未登记指标在计算中按 0 扣减；此处仅提示数据质量问题
        if self.warn_unknown_indicators {
            for (company, month, name) in table.unknown_indicators() {
                warn!(%company, %month, indicator = %name, "未登记的指标，扣减按 0 计算");
            }
        }

        info!(companies = table.company_count(), "漏报指标表加载完成");
        Ok(table)
    }
}
