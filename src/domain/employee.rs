// ==========================================
// 季度奖金面板 - 员工记录
// ==========================================
// 数据来源: 外部奖金数据集（只读）
// 约定: VALOR TOTAL = VALOR REAL + VALOR PERDIDO（上游保证，本系统不校验）
// ==========================================

use crate::domain::types::{deserialize_highlight, Highlight};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

// ==========================================
// 数据源列名
// ==========================================
pub mod columns {
    pub const NAME: &str = "NOME";
    pub const ROLE: &str = "FUNÇÃO";
    pub const CITY: &str = "CIDADE";
    pub const COMPANY: &str = "EMPRESA";
    pub const TENURE: &str = "TEMPO DE CASA";
    pub const TOTAL_TARGET: &str = "VALOR TOTAL";
    pub const ACTUAL_EARNED: &str = "VALOR REAL";
    pub const AMOUNT_LOST: &str = "VALOR PERDIDO";
    pub const PCT_FULFILLED: &str = "% CUMPRIDO";
    pub const HIGHLIGHT: &str = "DESTAQUE";
}

// ==========================================
// QuarterFigures - 季度汇总金额
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QuarterFigures {
    /// 季度目标总额
    pub total_target: Decimal,
    /// 实际获得金额
    pub actual_earned: Decimal,
    /// 损失金额
    pub amount_lost: Decimal,
    /// 完成百分比 (0-100)
    pub pct_fulfilled: f64,
}

// ==========================================
// EmployeeRecord - 员工奖金记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(rename = "NOME", deserialize_with = "text_or_number")]
    pub name: String,

    #[serde(rename = "FUNÇÃO", deserialize_with = "text_or_number")]
    pub role: String,

    #[serde(rename = "CIDADE", deserialize_with = "text_or_number")]
    pub city: String,

    #[serde(rename = "EMPRESA", deserialize_with = "text_or_number")]
    pub company: String,

    /// 司龄分组（分类标签）
    #[serde(rename = "TEMPO DE CASA", deserialize_with = "text_or_number")]
    pub tenure: String,

    #[serde(rename = "VALOR TOTAL")]
    pub total_target: Decimal,

    #[serde(rename = "VALOR REAL")]
    pub actual_earned: Decimal,

    #[serde(rename = "VALOR PERDIDO")]
    pub amount_lost: Decimal,

    #[serde(rename = "% CUMPRIDO")]
    pub pct_fulfilled: f64,

    #[serde(
        rename = "DESTAQUE",
        default,
        deserialize_with = "deserialize_highlight"
    )]
    pub highlight: Highlight,
}

impl EmployeeRecord {
    /// 季度汇总金额（原样）
    pub fn quarter_figures(&self) -> QuarterFigures {
        QuarterFigures {
            total_target: self.total_target,
            actual_earned: self.actual_earned,
            amount_lost: self.amount_lost,
            pct_fulfilled: self.pct_fulfilled,
        }
    }

    /// 卡片展示名（首字母大写）
    pub fn display_name(&self) -> String {
        title_case(&self.name)
    }
}

/// 按单词首字母大写，其余小写
///
/// 单词边界: 任意非字母字符之后
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// 文本列可能被导出为数字（例如司龄 "1"），统一转为字符串
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s.trim().to_string()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "期望文本，实际为 {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_source_row() {
        let json = r#"{
            "NOME": "MARIA DA SILVA",
            "FUNÇÃO": "Vendedora",
            "CIDADE": "Recife",
            "EMPRESA": "Acme",
            "TEMPO DE CASA": "1-2 anos",
            "VALOR TOTAL": 9000.0,
            "VALOR REAL": 7500.5,
            "VALOR PERDIDO": 1499.5,
            "% CUMPRIDO": 83.3,
            "DESTAQUE": "melhor"
        }"#;

        let record: EmployeeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "MARIA DA SILVA");
        assert_eq!(record.role, "Vendedora");
        assert_eq!(record.total_target, dec!(9000));
        assert_eq!(record.actual_earned, dec!(7500.5));
        assert_eq!(record.highlight, Highlight::Best);
    }

    #[test]
    fn test_deserialize_missing_or_null_highlight() {
        let base = r#""NOME": "A", "FUNÇÃO": "B", "CIDADE": "C", "EMPRESA": "D",
            "TEMPO DE CASA": 3, "VALOR TOTAL": 1, "VALOR REAL": 1,
            "VALOR PERDIDO": 0, "% CUMPRIDO": 100"#;

        let missing: EmployeeRecord = serde_json::from_str(&format!("{{{}}}", base)).unwrap();
        assert_eq!(missing.highlight, Highlight::None);
        assert_eq!(missing.tenure, "3");

        let null: EmployeeRecord =
            serde_json::from_str(&format!("{{{}, \"DESTAQUE\": null}}", base)).unwrap();
        assert_eq!(null.highlight, Highlight::None);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("MARIA DA SILVA"), "Maria Da Silva");
        assert_eq!(title_case("joão d'ávila"), "João D'Ávila");
        assert_eq!(title_case(""), "");
    }
}
