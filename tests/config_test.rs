// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 配置文件加载、优先级、错误分类、快照
// ==========================================

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use quarterly_bonus_panel::config::{config_keys, ConfigError, ConfigManager};
use tempfile::{Builder, NamedTempFile};

fn temp_config(content: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_explicit_file() {
    let file = temp_config(
        r#"{"dataset.path": "/srv/bonus/dados.csv", "indicators.warn_unknown": false}"#,
    );

    let config = ConfigManager::load(Some(file.path())).unwrap();

    assert_eq!(config.dataset_path(), PathBuf::from("/srv/bonus/dados.csv"));
    // 非字符串值按 JSON 文本保存
    assert!(!config.warn_unknown_indicators().unwrap());
    // 未出现在文件中的键回落到默认值
    assert_eq!(
        config.indicators_path(),
        PathBuf::from("data/indicadores_nao_entregues.json")
    );
}

#[test]
fn test_explicit_missing_file_is_error() {
    let result = ConfigManager::load(Some(Path::new("/nao/existe/config.json")));
    assert!(matches!(result, Err(ConfigError::ConfigReadError { .. })));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let file = temp_config("{\"dataset.path\": ");
    let mut config = ConfigManager::new();

    let err = config.merge_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ConfigParseError { .. }));
}

#[test]
fn test_env_overrides_file() {
    let file = temp_config(r#"{"report.locale": "pt-BR", "dataset.path": "a.json"}"#);
    let mut config = ConfigManager::new();
    config.merge_file(file.path()).unwrap();

    config.apply_env_overrides(|name| match name {
        "BONUS_PANEL_REPORT_LOCALE" => Some("en".to_string()),
        _ => None,
    });

    assert_eq!(config.report_locale().unwrap(), "en");
    assert_eq!(config.dataset_path(), PathBuf::from("a.json"));
}

#[test]
fn test_null_value_keeps_default() {
    let file = temp_config(r#"{"report.locale": null}"#);
    let mut config = ConfigManager::new();
    config.merge_file(file.path()).unwrap();

    assert_eq!(config.report_locale().unwrap(), "pt-BR");
}

#[test]
fn test_unknown_key_lookup() {
    let config = ConfigManager::new();
    assert_eq!(
        config.get_global_config_value(config_keys::REPORT_LOCALE),
        Some("pt-BR".to_string())
    );
    assert_eq!(config.get_global_config_value("nao.existe"), None);
}

#[test]
fn test_snapshot_lists_every_known_key() {
    let config = ConfigManager::new();
    let snapshot: BTreeMap<String, String> =
        serde_json::from_str(&config.get_config_snapshot().unwrap()).unwrap();

    for (key, default) in config_keys::DEFAULTS {
        assert_eq!(snapshot.get(key).map(String::as_str), Some(default));
    }
}
