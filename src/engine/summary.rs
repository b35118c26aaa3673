// ==========================================
// 季度奖金面板 - 汇总引擎
// ==========================================
// 职责: 汇总筛选后记录的目标/实得/损失；生成漏报指标提示
// 精度: 汇总过程保留完整精度，展示层再四舍五入
// ==========================================

use crate::domain::indicator::MissedIndicatorTable;
use crate::domain::types::Period;
use crate::engine::adjustment::AdjustedFigures;
use crate::engine::filter::FilterCriteria;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// PanelSummary - 总览
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PanelSummary {
    /// 参与汇总的员工数
    pub employee_count: usize,
    /// 可获得总额
    pub total_target: Decimal,
    /// 实得总额
    pub total_earned: Decimal,
    /// 损失总额
    pub total_lost: Decimal,
}

// ==========================================
// MissedIndicatorWarning - 漏报指标提示
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissedIndicatorWarning {
    pub company: String,
    pub month: String,
    /// 未完成指标（保持数据源顺序）
    pub indicators: Vec<String>,
}

pub struct SummaryEngine;

impl SummaryEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, figures: &[AdjustedFigures]) -> PanelSummary {
        figures.iter().fold(
            PanelSummary {
                employee_count: figures.len(),
                ..PanelSummary::default()
            },
            |mut acc, f| {
                acc.total_target += f.target;
                acc.total_earned += f.earned;
                acc.total_lost += f.lost;
                acc
            },
        )
    }

    /// 生成漏报指标提示
    ///
    /// 条件: 选择了具体月份 且 选择了具体公司 且 该公司当月列表非空
    pub fn missed_indicator_warning(
        &self,
        criteria: &FilterCriteria,
        period: Period,
        missed_table: &MissedIndicatorTable,
    ) -> Option<MissedIndicatorWarning> {
        let month = period.month()?;
        let company = criteria.selected_company()?;

        let indicators = missed_table.missed(company, month);
        if indicators.is_empty() {
            return None;
        }

        Some(MissedIndicatorWarning {
            company: company.to_string(),
            month: month.label().to_string(),
            indicators: indicators.to_vec(),
        })
    }
}

impl Default for SummaryEngine {
    fn default() -> Self {
        Self::new()
    }
}
