// ==========================================
// 季度奖金面板 - 绩效指标与扣减比例
// ==========================================
// 指标扣减表: 常量表（新增指标 = 表中加一行）
// 漏报指标表: 公司 → 月份 → 未完成指标列表（外部数据，只读）
// ==========================================

use crate::domain::types::Month;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ==========================================
// 绩效指标 (Indicator)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Indicator {
    #[serde(rename = "Satisfação do Cliente")]
    CustomerSatisfaction,
    #[serde(rename = "Produção")]
    Production,
    #[serde(rename = "Ticket Médio")]
    AverageTicket,
}

/// 指标扣减表: (指标, 数据源名称, 占月度目标的扣减比例)
pub const PENALTY_TABLE: [(Indicator, &str, Decimal); 3] = [
    (Indicator::CustomerSatisfaction, "Satisfação do Cliente", dec!(0.275)),
    (Indicator::Production, "Produção", dec!(0.15)),
    (Indicator::AverageTicket, "Ticket Médio", dec!(0.15)),
];

impl Indicator {
    /// 按数据源名称查找（精确匹配）
    pub fn from_source_name(name: &str) -> Option<Indicator> {
        PENALTY_TABLE
            .iter()
            .find(|(_, source_name, _)| *source_name == name)
            .map(|(indicator, _, _)| *indicator)
    }

    pub fn source_name(&self) -> &'static str {
        PENALTY_TABLE
            .iter()
            .find(|(indicator, _, _)| indicator == self)
            .map(|(_, name, _)| *name)
            .unwrap_or_default()
    }

    /// 扣减比例（占月度目标）
    pub fn penalty_fraction(&self) -> Decimal {
        PENALTY_TABLE
            .iter()
            .find(|(indicator, _, _)| indicator == self)
            .map(|(_, _, fraction)| *fraction)
            .unwrap_or(Decimal::ZERO)
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source_name())
    }
}

/// 按数据源名称查扣减比例；未登记的指标返回 None
pub fn penalty_for(name: &str) -> Option<Decimal> {
    Indicator::from_source_name(name).map(|i| i.penalty_fraction())
}

// ==========================================
// MissedIndicatorTable - 漏报指标表
// ==========================================
// JSON 结构: {"公司": {"Janeiro": ["Produção", ...], ...}, ...}
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissedIndicatorTable {
    entries: HashMap<String, HashMap<String, Vec<String>>>,
}

impl MissedIndicatorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记某公司某月的未完成指标（测试与数据构建用）
    pub fn insert<I, S>(&mut self, company: &str, month: Month, indicators: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .entry(company.to_string())
            .or_default()
            .insert(
                month.label().to_string(),
                indicators.into_iter().map(Into::into).collect(),
            );
    }

    /// 查询未完成指标；公司或月份不存在 → 空列表
    pub fn missed(&self, company: &str, month: Month) -> &[String] {
        self.entries
            .get(company)
            .and_then(|months| months.get(month.label()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 扣减表中未登记的指标名称: (公司, 月份键, 指标名)
    pub fn unknown_indicators(&self) -> Vec<(String, String, String)> {
        let mut unknown = Vec::new();
        for (company, months) in &self.entries {
            for (month, names) in months {
                for name in names {
                    if Indicator::from_source_name(name).is_none() {
                        unknown.push((company.clone(), month.clone(), name.clone()));
                    }
                }
            }
        }
        unknown.sort();
        unknown
    }

    pub fn company_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
