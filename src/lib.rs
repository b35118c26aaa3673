// ==========================================
// 季度奖金面板 - 核心库
// ==========================================
// 职责: 员工季度奖金的筛选、按月指标扣减计算与汇总
// 数据: 员工奖金数据集 + 漏报指标表（外部只读）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "pt-BR");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 筛选与扣减计算
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 请求/响应接口
pub mod api;

// 报表输出
pub mod report;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    EmployeeRecord, Highlight, Indicator, MissedIndicatorTable, Month, Period, QuarterFigures,
    PENALTY_TABLE,
};

pub use engine::{
    AdjustedFigures, AdjustmentCalculator, FilterCriteria, FilterEngine, MissedIndicatorWarning,
    PanelSummary, SummaryEngine,
};

pub use api::{ApiError, ApiResult, PanelApi, PanelRequest, PanelView};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Painel de Bônus Trimestral";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
