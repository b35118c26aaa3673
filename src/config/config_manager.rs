// ==========================================
// 季度奖金面板 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: key-value（JSON 配置文件 + 环境变量）
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "BONUS_PANEL_";

/// 配置目录名（位于系统配置目录下）
const CONFIG_DIR_NAME: &str = "quarterly-bonus-panel";

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    /// 员工数据集路径
    pub const DATASET_PATH: &str = "dataset.path";
    /// 漏报指标表路径
    pub const INDICATORS_PATH: &str = "indicators.path";
    /// 报表语言（pt-BR / en）
    pub const REPORT_LOCALE: &str = "report.locale";
    /// 漏报指标表含未登记指标时是否告警
    pub const WARN_UNKNOWN_INDICATORS: &str = "indicators.warn_unknown";

    /// 全部配置键及默认值
    pub const DEFAULTS: [(&str, &str); 4] = [
        (DATASET_PATH, "data/colaboradores_bonus.json"),
        (INDICATORS_PATH, "data/indicadores_nao_entregues.json"),
        (REPORT_LOCALE, "pt-BR"),
        (WARN_UNKNOWN_INDICATORS, "true"),
    ];
}

/// 默认配置文件路径: <系统配置目录>/quarterly-bonus-panel/config.json
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join("config.json"))
}

/// 配置键 → 环境变量名（dataset.path → BONUS_PANEL_DATASET_PATH）
pub fn env_var_name(key: &str) -> String {
    format!("{}{}", ENV_PREFIX, key.replace('.', "_").to_uppercase())
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

fn is_false(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "n" | "off"
    )
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
}

impl ConfigManager {
    /// 仅使用默认值
    pub fn new() -> Self {
        Self::default()
    }

    /// 从键值对创建（测试与嵌入场景）
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// 加载配置
    ///
    /// # 参数
    /// - explicit_path: 显式指定的配置文件（必须存在）；
    ///   为 None 时尝试默认路径（不存在则跳过）
    ///
    /// # 优先级
    /// 环境变量 > 配置文件 > 默认值
    pub fn load(explicit_path: Option<&Path>) -> ConfigResult<Self> {
        let mut manager = Self::new();

        match explicit_path {
            Some(path) => manager.merge_file(path)?,
            None => {
                if let Some(path) = default_config_path().filter(|p| p.exists()) {
                    manager.merge_file(&path)?;
                }
            }
        }

        manager.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(manager)
    }

    /// 合并 JSON 配置文件（顶层对象: {"dataset.path": "...", ...}）
    pub fn merge_file(&mut self, path: &Path) -> ConfigResult<()> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ConfigReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let parsed: HashMap<String, Value> =
            serde_json::from_str(&text).map_err(|e| ConfigError::ConfigParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        for (key, value) in parsed {
            let raw = match value {
                Value::String(s) => s,
                Value::Null => continue,
                other => other.to_string(),
            };
            self.values.insert(key, raw);
        }

        info!(path = %path.display(), "配置文件已加载");
        Ok(())
    }

    /// 用环境变量覆写已知配置键
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for (key, _) in config_keys::DEFAULTS {
            if let Some(value) = lookup(&env_var_name(key)) {
                debug!(config_key = key, "环境变量覆写配置");
                self.values.insert(key.to_string(), value);
            }
        }
    }

    /// 覆写单个配置（命令行参数）
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    fn get_config_value(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> String {
        self.get_config_value(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// 读取配置值（已应用默认值）；未知键返回 None
    pub fn get_global_config_value(&self, key: &str) -> Option<String> {
        self.get_config_value(key).or_else(|| {
            config_keys::DEFAULTS
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        })
    }

    // ===== 数据源配置 =====

    pub fn dataset_path(&self) -> PathBuf {
        PathBuf::from(self.get_config_or_default(
            config_keys::DATASET_PATH,
            "data/colaboradores_bonus.json",
        ))
    }

    pub fn indicators_path(&self) -> PathBuf {
        PathBuf::from(self.get_config_or_default(
            config_keys::INDICATORS_PATH,
            "data/indicadores_nao_entregues.json",
        ))
    }

    pub fn warn_unknown_indicators(&self) -> ConfigResult<bool> {
        let value = self.get_config_or_default(config_keys::WARN_UNKNOWN_INDICATORS, "true");
        if is_true(&value) {
            Ok(true)
        } else if is_false(&value) {
            Ok(false)
        } else {
            Err(ConfigError::ConfigValueError {
                key: config_keys::WARN_UNKNOWN_INDICATORS.to_string(),
                value,
                message: "期望布尔值".to_string(),
            })
        }
    }

    // ===== 报表配置 =====

    pub fn report_locale(&self) -> ConfigResult<String> {
        let value = self.get_config_or_default(config_keys::REPORT_LOCALE, "pt-BR");
        match value.trim() {
            "pt-BR" | "pt" => Ok("pt-BR".to_string()),
            "en" | "en-US" => Ok("en".to_string()),
            other => Err(ConfigError::ConfigValueError {
                key: config_keys::REPORT_LOCALE.to_string(),
                value: other.to_string(),
                message: "仅支持 pt-BR / en".to_string(),
            }),
        }
    }

    /// 获取生效配置快照（JSON，键有序）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let mut effective: BTreeMap<String, String> = config_keys::DEFAULTS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        for (k, v) in &self.values {
            effective.insert(k.clone(), v.clone());
        }
        Ok(serde_json::to_string(&effective)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConfigManager::new();
        assert_eq!(
            config.dataset_path(),
            PathBuf::from("data/colaboradores_bonus.json")
        );
        assert_eq!(config.report_locale().unwrap(), "pt-BR");
        assert!(config.warn_unknown_indicators().unwrap());
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(env_var_name("dataset.path"), "BONUS_PANEL_DATASET_PATH");
        assert_eq!(
            env_var_name("indicators.warn_unknown"),
            "BONUS_PANEL_INDICATORS_WARN_UNKNOWN"
        );
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ConfigManager::new();
        config.apply_env_overrides(|name| match name {
            "BONUS_PANEL_REPORT_LOCALE" => Some("en".to_string()),
            _ => None,
        });
        assert_eq!(config.report_locale().unwrap(), "en");
        assert_eq!(
            config.indicators_path(),
            PathBuf::from("data/indicadores_nao_entregues.json")
        );
    }

    #[test]
    fn test_invalid_values() {
        let mut config = ConfigManager::new();
        config.set(config_keys::REPORT_LOCALE, "fr");
        config.set(config_keys::WARN_UNKNOWN_INDICATORS, "talvez");

        assert!(matches!(
            config.report_locale(),
            Err(ConfigError::ConfigValueError { .. })
        ));
        assert!(config.warn_unknown_indicators().is_err());
    }

    #[test]
    fn test_snapshot_contains_defaults_and_overrides() {
        let mut config = ConfigManager::new();
        config.set(config_keys::DATASET_PATH, "/tmp/dados.csv");

        let snapshot: BTreeMap<String, String> =
            serde_json::from_str(&config.get_config_snapshot().unwrap()).unwrap();
        assert_eq!(snapshot.get("dataset.path").unwrap(), "/tmp/dados.csv");
        assert_eq!(snapshot.get("report.locale").unwrap(), "pt-BR");
    }
}
