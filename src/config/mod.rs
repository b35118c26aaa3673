// ==========================================
// 季度奖金面板 - 配置层
// ==========================================
// 职责: 配置加载与查询,支持多级覆写
// 优先级: 环境变量 > 配置文件 > 默认值
// ==========================================

pub mod config_manager;
pub mod error;

// 重导出核心配置管理器
pub use config_manager::{config_keys, default_config_path, ConfigManager};
pub use error::{ConfigError, ConfigResult};
