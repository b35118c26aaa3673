// ==========================================
// 季度奖金面板 - API 层
// ==========================================
// 职责: 面向外围应用（命令行/界面）的请求-响应接口
// 模型: 每次交互完整重算一次（筛选 → 扣减计算 → 汇总）
// ==========================================

pub mod dto;
pub mod error;
pub mod panel_api;

// 重导出核心类型
pub use dto::{EmployeeCard, FilterOptions, PanelRequest, PanelView, CARD_COLUMNS};
pub use error::{ApiError, ApiResult};
pub use panel_api::{parse_period, PanelApi};
