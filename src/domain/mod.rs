// ==========================================
// 季度奖金面板 - 领域模型层
// ==========================================
// 职责: 定义员工记录、查看周期、绩效指标与扣减表
// 红线: 不含数据加载逻辑,不含计算逻辑
// ==========================================

pub mod employee;
pub mod indicator;
pub mod types;

// 重导出核心类型
pub use employee::{columns, title_case, EmployeeRecord, QuarterFigures};
pub use indicator::{penalty_for, Indicator, MissedIndicatorTable, PENALTY_TABLE};
pub use types::{Highlight, Month, Period, ALL_SENTINEL, QUARTER_LABEL};
