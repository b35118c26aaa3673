// ==========================================
// 季度奖金面板 - 引擎层
// ==========================================
// 职责: 筛选、指标扣减计算、汇总
// 红线: 纯函数,无副作用,不做数据加载
// ==========================================

pub mod adjustment;
pub mod filter;
pub mod summary;

// 重导出核心引擎
pub use adjustment::{fulfillment_pct, AdjustedFigures, AdjustmentCalculator};
pub use filter::{selection, FilterCriteria, FilterEngine};
pub use summary::{MissedIndicatorWarning, PanelSummary, SummaryEngine};
