// ==========================================
// 季度奖金面板 - 报表输出
// ==========================================
// 文本: 总览 → 漏报指标提示 → 员工卡片
// JSON: PanelView 原样序列化
// 金额格式: "R$ 1,234.56"（千分位逗号，两位小数，四舍五入远离零）
// ==========================================

use crate::api::dto::{EmployeeCard, FilterOptions, PanelView};
use crate::domain::types::Highlight;
use crate::i18n::{t_in, t_in_with_args};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write;

/// 进度条字符宽度
const PROGRESS_BAR_WIDTH: usize = 20;

/// 报表输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// 金额格式化: R$ 1,234.56
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.2}", rounded.abs());

    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!(
        "R$ {}{}.{}",
        if negative { "-" } else { "" },
        grouped,
        frac_part
    )
}

/// 百分比格式化（一位小数）
pub fn format_pct(value: f64) -> String {
    format!("{:.1}%", value)
}

fn progress_bar(progress_pct: f64) -> String {
    let filled = ((progress_pct / 100.0) * PROGRESS_BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(PROGRESS_BAR_WIDTH);
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled)
    )
}

/// 渲染文本报表
pub fn render_text(view: &PanelView, locale: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", t_in(locale, "report.title"));
    let _ = writeln!(
        out,
        "{}: {}",
        t_in(locale, "report.period"),
        view.period.label()
    );
    let _ = writeln!(out);

    // 总览
    let _ = writeln!(out, "### {}", t_in(locale, "summary.heading"));
    let _ = writeln!(
        out,
        "{}: {}",
        t_in(locale, "summary.total"),
        format_currency(view.summary.total_target)
    );
    let _ = writeln!(
        out,
        "{}: {}",
        t_in(locale, "summary.earned"),
        format_currency(view.summary.total_earned)
    );
    let _ = writeln!(
        out,
        "{}: {}",
        t_in(locale, "summary.lost"),
        format_currency(view.summary.total_lost)
    );

    // 漏报指标提示
    if let Some(warning) = &view.warning {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "! {}",
            t_in_with_args(
                locale,
                "warning.missed_indicators",
                &[
                    ("month", warning.month.as_str()),
                    ("indicators", warning.indicators.join(", ").as_str()),
                ],
            )
        );
    }

    // 员工卡片
    let _ = writeln!(out);
    let _ = writeln!(out, "### {}", t_in(locale, "cards.heading"));
    if view.cards.is_empty() {
        let _ = writeln!(out, "{}", t_in(locale, "cards.empty"));
    }
    for card in &view.cards {
        let _ = writeln!(out);
        render_card(&mut out, card, locale);
    }

    out
}

fn render_card(out: &mut String, card: &EmployeeCard, locale: &str) {
    let marker = match card.highlight {
        Highlight::Best => format!(" ({})", t_in(locale, "card.best")),
        Highlight::Worst => format!(" ({})", t_in(locale, "card.worst")),
        Highlight::None => String::new(),
    };
    let target_label = if card.monthly_target {
        t_in(locale, "card.target_monthly")
    } else {
        t_in(locale, "card.target_quarterly")
    };

    let _ = writeln!(out, "{}{}", card.display_name, marker);
    let _ = writeln!(out, "  {} - {}", card.role, card.city);
    let _ = writeln!(
        out,
        "  {}: {}",
        target_label,
        format_currency(card.figures.target)
    );
    let _ = writeln!(
        out,
        "  {}: {}",
        t_in(locale, "card.earned"),
        format_currency(card.figures.earned)
    );
    let _ = writeln!(
        out,
        "  {}: {}",
        t_in(locale, "card.lost"),
        format_currency(card.figures.lost)
    );
    let _ = writeln!(
        out,
        "  {}: {} {}",
        t_in(locale, "card.fulfillment"),
        format_pct(card.figures.pct_fulfilled),
        progress_bar(card.progress_pct)
    );
}

/// 渲染 JSON 报表
pub fn render_json(view: &PanelView) -> serde_json::Result<String> {
    serde_json::to_string_pretty(view)
}

/// 渲染筛选选项
pub fn render_options(options: &FilterOptions, locale: &str) -> String {
    let mut out = String::new();
    let sections = [
        ("filter.company", &options.companies),
        ("filter.role", &options.roles),
        ("filter.city", &options.cities),
        ("filter.tenure", &options.tenures),
        ("filter.period", &options.periods),
    ];
    for (key, values) in sections {
        let _ = writeln!(out, "{}: {}", t_in(locale, key), values.join(" | "));
    }
    out
}
