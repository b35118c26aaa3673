// ==========================================
// 季度奖金面板 - 筛选引擎
// ==========================================
// 规则: 所有生效条件取交集（AND）；未设置的条件 = 不限制
// 特例: 司龄集合为空 = 不限制（不是"全部排除"）
// 输出: 输入记录的子序列，保持原有顺序；无匹配返回空列表，不报错
// ==========================================

use crate::domain::employee::EmployeeRecord;
use crate::domain::types::ALL_SENTINEL;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::instrument;

// ==========================================
// FilterCriteria - 筛选条件
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// 姓名关键字（不区分大小写的子串匹配）
    #[serde(default)]
    pub name_query: Option<String>,

    /// 公司（精确匹配；None = 全部）
    #[serde(default)]
    pub company: Option<String>,

    /// 职位（精确匹配；None = 全部）
    #[serde(default)]
    pub role: Option<String>,

    /// 城市（精确匹配；None = 全部）
    #[serde(default)]
    pub city: Option<String>,

    /// 司龄分组集合（空集 = 全部）
    #[serde(default)]
    pub tenure_set: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name_query(mut self, query: &str) -> Self {
        self.name_query = Some(query.to_string());
        self
    }

    /// 设置公司；哨兵值 "Todas"/"All" 等价于不限制
    pub fn with_company(mut self, company: &str) -> Self {
        self.company = selection(company);
        self
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.role = selection(role);
        self
    }

    pub fn with_city(mut self, city: &str) -> Self {
        self.city = selection(city);
        self
    }

    pub fn with_tenures<I, S>(mut self, tenures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tenure_set = tenures.into_iter().map(Into::into).collect();
        self
    }

    /// 选中的具体公司（非哨兵）
    pub fn selected_company(&self) -> Option<&str> {
        self.company.as_deref().and_then(selection_ref)
    }

    /// 判断单条记录是否满足全部生效条件
    pub fn matches(&self, record: &EmployeeRecord) -> bool {
        self.matches_name(record)
            && exact_match(self.company.as_deref(), &record.company)
            && exact_match(self.role.as_deref(), &record.role)
            && exact_match(self.city.as_deref(), &record.city)
            && self.matches_tenure(record)
    }

    fn matches_name(&self, record: &EmployeeRecord) -> bool {
        match self.name_query.as_deref() {
            Some(query) if !query.is_empty() => record
                .name
                .to_lowercase()
                .contains(&query.to_lowercase()),
            _ => true,
        }
    }

    fn matches_tenure(&self, record: &EmployeeRecord) -> bool {
        self.tenure_set.is_empty() || self.tenure_set.contains(&record.tenure)
    }
}

/// 下拉框取值 → 条件（哨兵值/空值 → None）
pub fn selection(value: &str) -> Option<String> {
    selection_ref(value).map(str::to_string)
}

fn selection_ref(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() || is_all_sentinel(trimmed) {
        None
    } else {
        Some(trimmed)
    }
}

fn is_all_sentinel(value: &str) -> bool {
    value == ALL_SENTINEL || value.eq_ignore_ascii_case("all")
}

fn exact_match(expected: Option<&str>, actual: &str) -> bool {
    match expected.and_then(selection_ref) {
        Some(expected) => expected == actual,
        None => true,
    }
}

// ==========================================
// FilterEngine - 筛选引擎
// ==========================================
pub struct FilterEngine;

impl FilterEngine {
    pub fn new() -> Self {
        Self
    }

    /// 筛选记录（保持原有相对顺序）
    #[instrument(skip(self, records, criteria), fields(total = records.len()))]
    pub fn filter<'a>(
        &self,
        records: &'a [EmployeeRecord],
        criteria: &FilterCriteria,
    ) -> Vec<&'a EmployeeRecord> {
        let filtered: Vec<&EmployeeRecord> =
            records.iter().filter(|r| criteria.matches(r)).collect();

        tracing::debug!(matched = filtered.len(), "筛选完成");
        filtered
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Highlight;
    use rust_decimal::Decimal;

    fn record(name: &str, company: &str, tenure: &str) -> EmployeeRecord {
        EmployeeRecord {
            name: name.to_string(),
            role: "Vendedor".to_string(),
            city: "Recife".to_string(),
            company: company.to_string(),
            tenure: tenure.to_string(),
            total_target: Decimal::ZERO,
            actual_earned: Decimal::ZERO,
            amount_lost: Decimal::ZERO,
            pct_fulfilled: 0.0,
            highlight: Highlight::None,
        }
    }

    #[test]
    fn test_sentinel_means_no_constraint() {
        let criteria = FilterCriteria::new().with_company("Todas").with_city("All");
        assert_eq!(criteria.company, None);
        assert_eq!(criteria.city, None);
        assert!(criteria.matches(&record("Ana", "Acme", "1 ano")));
    }

    #[test]
    fn test_name_query_case_insensitive() {
        let criteria = FilterCriteria::new().with_name_query("SOUZA");
        assert!(criteria.matches(&record("carlos souza", "Acme", "1 ano")));
        assert!(!criteria.matches(&record("Carlos Lima", "Acme", "1 ano")));
    }

    #[test]
    fn test_empty_name_query_matches_all() {
        let criteria = FilterCriteria::new().with_name_query("");
        assert!(criteria.matches(&record("Qualquer", "Acme", "1 ano")));
    }

    #[test]
    fn test_tenure_set() {
        let r = record("Ana", "Acme", "1 ano");
        assert!(FilterCriteria::new().matches(&r));
        assert!(FilterCriteria::new().with_tenures(["1 ano"]).matches(&r));
        assert!(!FilterCriteria::new().with_tenures(["5 anos"]).matches(&r));
    }

    #[test]
    fn test_selected_company() {
        assert_eq!(
            FilterCriteria::new().with_company("Acme").selected_company(),
            Some("Acme")
        );
        assert_eq!(
            FilterCriteria::new().with_company("Todas").selected_company(),
            None
        );
    }

    #[test]
    fn test_padded_selection_is_trimmed() {
        let criteria = FilterCriteria::new()
            .with_company(" Acme ")
            .with_city("Recife  ");
        assert_eq!(criteria.company.as_deref(), Some("Acme"));
        assert_eq!(criteria.selected_company(), Some("Acme"));
        assert!(criteria.matches(&record("Ana", "Acme", "1 ano")));
        assert_eq!(FilterCriteria::new().with_role("  Todas ").role, None);
    }
}
