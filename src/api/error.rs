// ==========================================
// 季度奖金面板 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换导入/配置错误为用户可读的错误消息
// 说明: 筛选与扣减计算本身不会失败，错误只来自边界（输入解析、数据加载、配置）
// ==========================================

use crate::config::ConfigError;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("数据加载失败: {0}")]
    ImportError(#[from] ImportError),

    #[error("配置错误: {0}")]
    ConfigError(#[from] ConfigError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
