// ==========================================
// 季度奖金面板 - 字段映射器实现
// ==========================================
// 职责: 源列名 → EmployeeRecord 字段 + 类型转换
// 金额: 支持 "9000.50" / "R$ 9.000,50" / "R$ 1,234.56" / "9000,5"
// ==========================================

use crate::domain::employee::{columns, EmployeeRecord};
use crate::domain::types::Highlight;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::loader_trait::FieldMapper;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

pub struct EmployeeFieldMapper;

impl FieldMapper for EmployeeFieldMapper {
    fn map_to_employee(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<EmployeeRecord> {
        Ok(EmployeeRecord {
            // 身份字段
            name: self.require_string(row, columns::NAME, row_number)?,
            role: self.require_string(row, columns::ROLE, row_number)?,
            city: self.require_string(row, columns::CITY, row_number)?,
            company: self.require_string(row, columns::COMPANY, row_number)?,
            tenure: self.require_string(row, columns::TENURE, row_number)?,

            // 季度金额
            total_target: self.parse_decimal(row, columns::TOTAL_TARGET, row_number)?,
            actual_earned: self.parse_decimal(row, columns::ACTUAL_EARNED, row_number)?,
            amount_lost: self.parse_decimal(row, columns::AMOUNT_LOST, row_number)?,
            pct_fulfilled: self.parse_pct(row, columns::PCT_FULFILLED, row_number)?,

            // 展示标记（可选）
            highlight: self
                .get_string(row, columns::HIGHLIGHT)
                .map(|v| Highlight::from_source(&v))
                .unwrap_or_default(),
        })
    }
}

impl EmployeeFieldMapper {
    /// 提取字符串字段，支持列名别名（无重音写法、下划线写法）
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        let aliases: Vec<&str> = match key {
            columns::ROLE => vec![columns::ROLE, "FUNCAO"],
            columns::TENURE => vec![columns::TENURE, "TEMPO_DE_CASA"],
            columns::TOTAL_TARGET => vec![columns::TOTAL_TARGET, "VALOR_TOTAL"],
            columns::ACTUAL_EARNED => vec![columns::ACTUAL_EARNED, "VALOR_REAL"],
            columns::AMOUNT_LOST => vec![columns::AMOUNT_LOST, "VALOR_PERDIDO"],
            columns::PCT_FULFILLED => vec![columns::PCT_FULFILLED, "%_CUMPRIDO", "CUMPRIDO"],
            _ => vec![key],
        };

        for alias in aliases {
            if let Some(v) = row.get(alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    fn require_string(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<String> {
        self.get_string(row, key)
            .ok_or_else(|| ImportError::MissingColumn {
                row: row_number,
                field: key.to_string(),
            })
    }

    /// 解析金额
    fn parse_decimal(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Decimal> {
        let value = self.require_string(row, key, row_number)?;
        let conversion_error = |message: String| ImportError::TypeConversionError {
            row: row_number,
            field: key.to_string(),
            message,
        };

        let normalized = normalize_number(value.trim_start_matches("R$"), NumberKind::Amount)
            .ok_or_else(|| conversion_error(format!("金额分隔符有歧义: {}", value)))?;

        Decimal::from_str(&normalized)
            .or_else(|_| Decimal::from_scientific(&normalized))
            .map_err(|_| conversion_error(format!("无法解析为金额: {}", value)))
    }

    /// 解析百分比（允许带 "%" 后缀）
    fn parse_pct(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<f64> {
        let value = self.require_string(row, key, row_number)?;
        normalize_number(value.trim_end_matches('%'), NumberKind::Percent)
            .and_then(|normalized| normalized.parse::<f64>().ok())
            .ok_or_else(|| ImportError::TypeConversionError {
                row: row_number,
                field: key.to_string(),
                message: format!("无法解析为百分比: {}", value),
            })
    }
}

/// 数字文本的用途（决定单个分隔符后跟三位数字时的解释）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberKind {
    /// 金额: "9.000" / "1,234" 视为千分位
    Amount,
    /// 百分比: 单个分隔符一律视为小数点
    Percent,
}

/// 数字文本标准化为 "1234.56" 形式
///
/// - 同时含 '.' 与 ','：最后出现的为小数点，另一个为千分位
/// - 仅含一种分隔符且出现多次：千分位
/// - 仅出现一次：金额中后跟恰好三位数字视为千分位，否则为小数点
///
/// 千分位分组不合法（非三位一组、混用分隔符）时返回 None
fn normalize_number(raw: &str, kind: NumberKind) -> Option<String> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let (sign, body) = match compact.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", compact.as_str()),
    };

    let (int_part, frac_part) = match decimal_separator(body, kind)? {
        Some(sep) => {
            let idx = body.rfind(sep)?;
            (&body[..idx], Some(&body[idx + 1..]))
        }
        None => (body, None),
    };

    let int_digits = strip_grouping(int_part)?;
    match frac_part {
        Some(frac) if frac.is_empty() => None,
        Some(frac) => Some(format!("{}{}.{}", sign, int_digits, frac)),
        None => Some(format!("{}{}", sign, int_digits)),
    }
}

/// 判断小数点字符；Some(None) = 无小数部分，None = 有歧义
fn decimal_separator(body: &str, kind: NumberKind) -> Option<Option<char>> {
    let dots = body.matches('.').count();
    let commas = body.matches(',').count();

    match (dots, commas) {
        (0, 0) => Some(None),
        (d, c) if d > 0 && c > 0 => {
            let last = if body.rfind('.') > body.rfind(',') { '.' } else { ',' };
            let occurrences = if last == '.' { d } else { c };
            (occurrences == 1).then_some(Some(last))
        }
        (1, 0) => Some(single_separator(body, '.', kind)),
        (0, 1) => Some(single_separator(body, ',', kind)),
        _ => Some(None),
    }
}

fn single_separator(body: &str, sep: char, kind: NumberKind) -> Option<char> {
    let after = body.rsplit(sep).next().unwrap_or("");
    let thousands_group = after.len() == 3 && after.chars().all(|c| c.is_ascii_digit());
    if kind == NumberKind::Amount && thousands_group {
        None
    } else {
        Some(sep)
    }
}

/// 去掉整数部分的千分位分隔符；首组 1-3 位，其余每组恰好 3 位
fn strip_grouping(int_part: &str) -> Option<String> {
    let has_dot = int_part.contains('.');
    let has_comma = int_part.contains(',');
    if !has_dot && !has_comma {
        return Some(int_part.to_string());
    }
    if has_dot && has_comma {
        return None;
    }

    let sep = if has_dot { '.' } else { ',' };
    let mut groups = int_part.split(sep);
    let first = groups.next()?;
    let first_ok = (1..=3).contains(&first.len()) && first.chars().all(|c| c.is_ascii_digit());
    if !first_ok {
        return None;
    }

    let mut digits = first.to_string();
    for group in groups {
        if group.len() != 3 || !group.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_row() -> HashMap<String, String> {
        let mut row = HashMap::new();
        row.insert("NOME".to_string(), "  ANA LIMA ".to_string());
        row.insert("FUNÇÃO".to_string(), "Vendedora".to_string());
        row.insert("CIDADE".to_string(), "Recife".to_string());
        row.insert("EMPRESA".to_string(), "Acme".to_string());
        row.insert("TEMPO DE CASA".to_string(), "1-2 anos".to_string());
        row.insert("VALOR TOTAL".to_string(), "9000".to_string());
        row.insert("VALOR REAL".to_string(), "7500.50".to_string());
        row.insert("VALOR PERDIDO".to_string(), "1499.50".to_string());
        row.insert("% CUMPRIDO".to_string(), "83.34".to_string());
        row
    }

    #[test]
    fn test_field_mapper_basic() {
        let record = EmployeeFieldMapper.map_to_employee(&base_row(), 1).unwrap();

        assert_eq!(record.name, "ANA LIMA");
        assert_eq!(record.total_target, dec!(9000));
        assert_eq!(record.actual_earned, dec!(7500.50));
        assert!((record.pct_fulfilled - 83.34).abs() < 1e-9);
        assert_eq!(record.highlight, Highlight::None);
    }

    #[test]
    fn test_field_mapper_brazilian_currency() {
        let mut row = base_row();
        row.insert("VALOR TOTAL".to_string(), "R$ 9.000,75".to_string());
        row.insert("% CUMPRIDO".to_string(), "83,3%".to_string());
        row.insert("DESTAQUE".to_string(), "pior".to_string());

        let record = EmployeeFieldMapper.map_to_employee(&row, 1).unwrap();
        assert_eq!(record.total_target, dec!(9000.75));
        assert!((record.pct_fulfilled - 83.3).abs() < 1e-9);
        assert_eq!(record.highlight, Highlight::Worst);
    }

    #[test]
    fn test_field_mapper_alias_columns() {
        let mut row = base_row();
        let role = row.remove("FUNÇÃO").unwrap();
        row.insert("FUNCAO".to_string(), role);

        let record = EmployeeFieldMapper.map_to_employee(&row, 1).unwrap();
        assert_eq!(record.role, "Vendedora");
    }

    #[test]
    fn test_field_mapper_missing_column() {
        let mut row = base_row();
        row.remove("EMPRESA");

        let err = EmployeeFieldMapper.map_to_employee(&row, 7).unwrap_err();
        match err {
            ImportError::MissingColumn { row, field } => {
                assert_eq!(row, 7);
                assert_eq!(field, "EMPRESA");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_field_mapper_invalid_number() {
        let mut row = base_row();
        row.insert("VALOR REAL".to_string(), "invalid".to_string());

        let result = EmployeeFieldMapper.map_to_employee(&row, 1);
        assert!(matches!(
            result,
            Err(ImportError::TypeConversionError { .. })
        ));
    }

    #[test]
    fn test_field_mapper_comma_thousands() {
        let mut row = base_row();
        row.insert("VALOR TOTAL".to_string(), "R$ 1,234.56".to_string());
        row.insert("VALOR REAL".to_string(), "1,234".to_string());
        row.insert("VALOR PERDIDO".to_string(), "9.000".to_string());

        let record = EmployeeFieldMapper.map_to_employee(&row, 1).unwrap();
        assert_eq!(record.total_target, dec!(1234.56));
        assert_eq!(record.actual_earned, dec!(1234));
        assert_eq!(record.amount_lost, dec!(9000));
    }

    #[test]
    fn test_field_mapper_ambiguous_grouping() {
        for raw in ["1,23,4", "12,34.5", "1.2.3,4,5", "1.234,567.8"] {
            let mut row = base_row();
            row.insert("VALOR TOTAL".to_string(), raw.to_string());

            let err = EmployeeFieldMapper.map_to_employee(&row, 3).unwrap_err();
            match err {
                ImportError::TypeConversionError { row, field, .. } => {
                    assert_eq!(row, 3);
                    assert_eq!(field, "VALOR TOTAL");
                }
                other => panic!("{}: unexpected error: {:?}", raw, other),
            }
        }
    }

    #[test]
    fn test_normalize_number() {
        let amount = |raw| normalize_number(raw, NumberKind::Amount);
        assert_eq!(amount("1,234,567.89").as_deref(), Some("1234567.89"));
        assert_eq!(amount("1.234.567,89").as_deref(), Some("1234567.89"));
        assert_eq!(amount("-1,500.50").as_deref(), Some("-1500.50"));
        assert_eq!(amount("7500.50").as_deref(), Some("7500.50"));
        assert_eq!(amount("9000,5").as_deref(), Some("9000.5"));
        assert_eq!(amount("1,234").as_deref(), Some("1234"));
        assert_eq!(amount("12.").as_deref(), None);

        // 百分比中的三位小数不是千分位
        assert_eq!(
            normalize_number("83.333", NumberKind::Percent).as_deref(),
            Some("83.333")
        );
    }
}
