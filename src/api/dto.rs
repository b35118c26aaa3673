// ==========================================
// 季度奖金面板 - API 数据传输对象
// ==========================================
// 请求: 筛选条件 + 查看周期
// 响应: 筛选结果、总览、漏报指标提示、员工卡片
// ==========================================

use crate::domain::types::{Highlight, Period};
use crate::engine::adjustment::AdjustedFigures;
use crate::engine::filter::FilterCriteria;
use crate::engine::summary::{MissedIndicatorWarning, PanelSummary};
use serde::{Deserialize, Serialize};

/// 卡片列数
pub const CARD_COLUMNS: usize = 3;

// ==========================================
// 请求
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelRequest {
    #[serde(default)]
    pub criteria: FilterCriteria,
    #[serde(default)]
    pub period: Period,
}

impl PanelRequest {
    pub fn new(criteria: FilterCriteria, period: Period) -> Self {
        Self { criteria, period }
    }
}

// ==========================================
// 员工卡片
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeCard {
    /// 卡片序号（筛选结果中的位置）
    pub index: usize,
    /// 所在列（index % 3）
    pub column: usize,
    /// 展示名（首字母大写）
    pub display_name: String,
    pub role: String,
    pub city: String,
    pub company: String,
    pub tenure: String,
    pub highlight: Highlight,
    /// true = 月度目标；false = 季度目标
    pub monthly_target: bool,
    pub figures: AdjustedFigures,
    /// 进度条宽度（完成率截断到 [0, 100]）
    pub progress_pct: f64,
}

// ==========================================
// 面板响应
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelView {
    pub period: Period,
    pub criteria: FilterCriteria,
    pub summary: PanelSummary,
    pub warning: Option<MissedIndicatorWarning>,
    pub cards: Vec<EmployeeCard>,
}

// ==========================================
// 筛选选项
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// "Todas" + 公司（排序去重）
    pub companies: Vec<String>,
    /// "Todas" + 职位
    pub roles: Vec<String>,
    /// "Todas" + 城市
    pub cities: Vec<String>,
    /// 司龄分组（无哨兵值）
    pub tenures: Vec<String>,
    /// 周期选项
    pub periods: Vec<String>,
}
