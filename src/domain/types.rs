// ==========================================
// 季度奖金面板 - 领域类型定义
// ==========================================
// 周期: 季度 / 单月（一月、二月、三月）
// 标记: 最佳 / 最差 / 无
// ==========================================

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// 全选哨兵值（公司/职位/城市下拉框）
pub const ALL_SENTINEL: &str = "Todas";

/// 季度哨兵值
pub const QUARTER_LABEL: &str = "Trimestre";

// ==========================================
// 月份 (Month)
// ==========================================
// 季度内三个月；标签与漏报指标表的键一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    #[serde(rename = "Janeiro")]
    January,
    #[serde(rename = "Fevereiro")]
    February,
    #[serde(rename = "Março", alias = "Marco")]
    March,
}

impl Month {
    pub const ALL: [Month; 3] = [Month::January, Month::February, Month::March];

    /// 数据源中的月份标签
    pub fn label(&self) -> &'static str {
        match self {
            Month::January => "Janeiro",
            Month::February => "Fevereiro",
            Month::March => "Março",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "janeiro" | "january" | "jan" => Ok(Month::January),
            "fevereiro" | "february" | "fev" | "feb" => Ok(Month::February),
            "março" | "marco" | "march" | "mar" => Ok(Month::March),
            other => Err(format!("未知月份: {}", other)),
        }
    }
}

// ==========================================
// 查看周期 (Period)
// ==========================================
// Quarter: 直接使用季度汇总数据
// Month: 按季度目标三等分后重新计算扣减
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Period {
    #[default]
    Quarter,
    Month(Month),
}

impl Period {
    /// 面板中的周期选项（顺序固定）
    pub const OPTIONS: [Period; 4] = [
        Period::Quarter,
        Period::Month(Month::January),
        Period::Month(Month::February),
        Period::Month(Month::March),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Period::Quarter => QUARTER_LABEL,
            Period::Month(m) => m.label(),
        }
    }

    pub fn month(&self) -> Option<Month> {
        match self {
            Period::Quarter => None,
            Period::Month(m) => Some(*m),
        }
    }

    pub fn is_quarter(&self) -> bool {
        matches!(self, Period::Quarter)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trimestre" | "quarter" => Ok(Period::Quarter),
            other => other
                .parse::<Month>()
                .map(Period::Month)
                .map_err(|_| format!("未知周期: {}", s.trim())),
        }
    }
}

impl Serialize for Period {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ==========================================
// 展示标记 (Highlight)
// ==========================================
// 上游预先计算，仅用于卡片展示，不参与计算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    #[serde(rename = "melhor", alias = "best")]
    Best,
    #[serde(rename = "pior", alias = "worst")]
    Worst,
    #[default]
    #[serde(other)]
    None,
}

impl Highlight {
    /// 宽松解析：未知值/空值一律视为 None
    pub fn from_source(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "melhor" | "best" => Highlight::Best,
            "pior" | "worst" => Highlight::Worst,
            _ => Highlight::None,
        }
    }
}

impl fmt::Display for Highlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Highlight::Best => write!(f, "BEST"),
            Highlight::Worst => write!(f, "WORST"),
            Highlight::None => write!(f, "NONE"),
        }
    }
}

/// DESTAQUE 字段反序列化：缺失 / null / 未知值 → Highlight::None
pub fn deserialize_highlight<'de, D>(deserializer: D) -> Result<Highlight, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => Highlight::from_source(&s),
        _ => Highlight::None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parse() {
        assert_eq!("Trimestre".parse::<Period>().unwrap(), Period::Quarter);
        assert_eq!("quarter".parse::<Period>().unwrap(), Period::Quarter);
        assert_eq!(
            "Janeiro".parse::<Period>().unwrap(),
            Period::Month(Month::January)
        );
        assert_eq!(
            "Marco".parse::<Period>().unwrap(),
            Period::Month(Month::March)
        );
        assert!("Abril".parse::<Period>().is_err());
    }

    #[test]
    fn test_period_labels() {
        let labels: Vec<&str> = Period::OPTIONS.iter().map(|p| p.label()).collect();
        assert_eq!(labels, vec!["Trimestre", "Janeiro", "Fevereiro", "Março"]);
    }

    #[test]
    fn test_highlight_from_source() {
        assert_eq!(Highlight::from_source("melhor"), Highlight::Best);
        assert_eq!(Highlight::from_source(" PIOR "), Highlight::Worst);
        assert_eq!(Highlight::from_source(""), Highlight::None);
        assert_eq!(Highlight::from_source("nenhum"), Highlight::None);
    }
}
