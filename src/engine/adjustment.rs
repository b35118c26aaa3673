// ==========================================
// 季度奖金面板 - 指标扣减计算引擎
// ==========================================
// 输入: 员工记录 + 查看周期 + 漏报指标表
// 输出: (目标, 实得, 损失, 完成率)
// ==========================================
// 规则:
// 1) 季度: 原样返回季度汇总数据
// 2) 单月: 月度目标 = 季度目标 / 3
//          损失 = Σ 月度目标 × 指标扣减比例（未登记指标扣减为 0）
//          实得 = 月度目标 - 损失
//          完成率 = 实得 / 月度目标 × 100（月度目标为 0 时取 0）
// ==========================================

use crate::domain::employee::EmployeeRecord;
use crate::domain::indicator::{penalty_for, MissedIndicatorTable};
use crate::domain::types::{Month, Period};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 季度包含的月份数
const MONTHS_PER_QUARTER: u32 = 3;

// ==========================================
// AdjustedFigures - 调整后金额
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AdjustedFigures {
    /// 目标金额（季度或月度）
    pub target: Decimal,
    /// 实得金额
    pub earned: Decimal,
    /// 损失金额
    pub lost: Decimal,
    /// 完成百分比
    pub pct_fulfilled: f64,
}

// ==========================================
// AdjustmentCalculator - 扣减计算器
// ==========================================
pub struct AdjustmentCalculator;

impl AdjustmentCalculator {
    pub fn new() -> Self {
        Self
    }

    /// 计算单条记录在指定周期下的调整后金额
    pub fn adjust(
        &self,
        record: &EmployeeRecord,
        period: Period,
        missed_table: &MissedIndicatorTable,
    ) -> AdjustedFigures {
        match period {
            Period::Quarter => AdjustedFigures {
                target: record.total_target,
                earned: record.actual_earned,
                lost: record.amount_lost,
                pct_fulfilled: record.pct_fulfilled,
            },
            Period::Month(month) => self.adjust_month(record, month, missed_table),
        }
    }

    /// 批量计算（顺序与输入一致）
    #[instrument(
        skip(self, records, missed_table),
        fields(count = records.len(), period = %period)
    )]
    pub fn adjust_batch(
        &self,
        records: &[&EmployeeRecord],
        period: Period,
        missed_table: &MissedIndicatorTable,
    ) -> Vec<AdjustedFigures> {
        records
            .iter()
            .map(|record| self.adjust(record, period, missed_table))
            .collect()
    }

    fn adjust_month(
        &self,
        record: &EmployeeRecord,
        month: Month,
        missed_table: &MissedIndicatorTable,
    ) -> AdjustedFigures {
        let monthly_target = record.total_target / Decimal::from(MONTHS_PER_QUARTER);

        let lost: Decimal = missed_table
            .missed(&record.company, month)
            .iter()
            .filter_map(|name| penalty_for(name))
            .map(|fraction| monthly_target * fraction)
            .sum();

        let earned = monthly_target - lost;

        AdjustedFigures {
            target: monthly_target,
            earned,
            lost,
            pct_fulfilled: fulfillment_pct(earned, monthly_target),
        }
    }
}

impl Default for AdjustmentCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// 完成率（目标为 0 时返回 0，不产生 NaN）
pub fn fulfillment_pct(earned: Decimal, target: Decimal) -> f64 {
    if target.is_zero() {
        return 0.0;
    }
    (earned / target * Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Highlight;
    use rust_decimal_macros::dec;

    fn record(company: &str, total_target: Decimal) -> EmployeeRecord {
        EmployeeRecord {
            name: "Ana".to_string(),
            role: "Vendedora".to_string(),
            city: "Recife".to_string(),
            company: company.to_string(),
            tenure: "1 ano".to_string(),
            total_target,
            actual_earned: dec!(6000),
            amount_lost: dec!(3000),
            pct_fulfilled: 66.7,
            highlight: Highlight::None,
        }
    }

    #[test]
    fn test_fulfillment_pct_zero_target() {
        assert_eq!(fulfillment_pct(Decimal::ZERO, Decimal::ZERO), 0.0);
    }

    #[test]
    fn test_single_indicator() {
        let mut table = MissedIndicatorTable::new();
        table.insert("Acme", Month::February, ["Ticket Médio"]);

        let result = AdjustmentCalculator::new().adjust(
            &record("Acme", dec!(6000)),
            Period::Month(Month::February),
            &table,
        );

        assert_eq!(result.target, dec!(2000));
        assert_eq!(result.lost, dec!(300));
        assert_eq!(result.earned, dec!(1700));
        assert!((result.pct_fulfilled - 85.0).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_indicator_counts_each_time() {
        let mut table = MissedIndicatorTable::new();
        table.insert("Acme", Month::March, ["Produção", "Produção"]);

        let result = AdjustmentCalculator::new().adjust(
            &record("Acme", dec!(3000)),
            Period::Month(Month::March),
            &table,
        );

        assert_eq!(result.lost, dec!(300));
        assert_eq!(result.earned, dec!(700));
    }
}
