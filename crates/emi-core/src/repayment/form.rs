use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::repayment::calculator::LoanInputs;
use crate::{EmiError, EmiResult};

pub const DEFAULT_PRINCIPAL: &str = "100000";
pub const DEFAULT_ANNUAL_RATE: &str = "10";
pub const DEFAULT_TENURE: &str = "12";

/// The three fields as the borrower typed them.
///
/// Each field accepts a JSON string or number; a missing field takes its
/// default. Nothing is parsed until [`LoanForm::parse`] is called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanForm {
    #[serde(deserialize_with = "text_or_number")]
    pub principal: String,
    #[serde(deserialize_with = "text_or_number", alias = "interest")]
    pub annual_rate: String,
    #[serde(deserialize_with = "text_or_number")]
    pub tenure: String,
}

impl Default for LoanForm {
    fn default() -> Self {
        LoanForm {
            principal: DEFAULT_PRINCIPAL.to_string(),
            annual_rate: DEFAULT_ANNUAL_RATE.to_string(),
            tenure: DEFAULT_TENURE.to_string(),
        }
    }
}

impl LoanForm {
    pub fn new(
        principal: impl Into<String>,
        annual_rate: impl Into<String>,
        tenure: impl Into<String>,
    ) -> Self {
        LoanForm {
            principal: principal.into(),
            annual_rate: annual_rate.into(),
            tenure: tenure.into(),
        }
    }

    /// Parse the text fields into typed loan terms.
    ///
    /// Only syntax is checked here. Sign and range checks belong to the
    /// calculator so that typed callers get the same errors.
    pub fn parse(&self) -> EmiResult<LoanInputs> {
        let principal = parse_decimal("principal", &self.principal)?;
        let annual_rate_pct = parse_decimal("annual_rate_pct", &self.annual_rate)?;
        let tenure_months = parse_whole_months(&self.tenure)?;

        Ok(LoanInputs {
            principal,
            annual_rate_pct,
            tenure_months,
        })
    }
}

impl From<&LoanInputs> for LoanForm {
    fn from(inputs: &LoanInputs) -> Self {
        LoanForm {
            principal: inputs.principal.to_string(),
            annual_rate: inputs.annual_rate_pct.to_string(),
            tenure: inputs.tenure_months.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

fn parse_decimal(field: &str, raw: &str) -> EmiResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EmiError::invalid(field, "A value is required."));
    }

    let not_a_number = || EmiError::invalid(field, format!("'{}' is not a number.", trimmed));
    let cleaned = strip_group_separators(trimmed).ok_or_else(not_a_number)?;
    if !is_numeric_literal(&cleaned) {
        return Err(not_a_number());
    }

    let parsed = if cleaned.contains(&['e', 'E'][..]) {
        Decimal::from_scientific(&cleaned)
    } else {
        Decimal::from_str(&cleaned)
    };

    // The text is well formed here, so any failure is magnitude or precision.
    parsed.map_err(|_| {
        EmiError::invalid(
            field,
            format!("'{}' is outside the supported range.", trimmed),
        )
    })
}

/// Remove `,` or `_` digit-group separators from the integer part.
///
/// Groups must be non-empty digits, the last exactly three wide and the
/// inner ones two or three wide (`1,000,000` and `1,00,000` both pass).
/// Separators after the decimal point or exponent, mixed separators and
/// anything else return None.
fn strip_group_separators(text: &str) -> Option<String> {
    let is_sep = |c: char| c == ',' || c == '_';
    if !text.contains(is_sep) {
        return Some(text.to_string());
    }

    let (sign, unsigned) = match text.strip_prefix(&['+', '-'][..]) {
        Some(rest) => (&text[..1], rest),
        None => ("", text),
    };
    let int_end = unsigned
        .find(|c: char| c == '.' || c == 'e' || c == 'E')
        .unwrap_or(unsigned.len());
    let (int_part, tail) = unsigned.split_at(int_end);

    if tail.contains(is_sep) {
        return None;
    }
    if int_part.contains(',') && int_part.contains('_') {
        return None;
    }

    let groups: Vec<&str> = int_part.split(is_sep).collect();
    let last = groups.len() - 1;
    for (i, group) in groups.iter().enumerate() {
        if group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let width_ok = match i {
            0 => group.len() <= 3,
            i if i == last => group.len() == 3,
            _ => group.len() == 2 || group.len() == 3,
        };
        if !width_ok {
            return None;
        }
    }

    Some(format!("{sign}{}{tail}", groups.concat()))
}

/// `[+-]digits[.digits][(e|E)[+-]digits]`.
fn is_numeric_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(&['+', '-'][..]).unwrap_or(text);
    let (mantissa, exponent) = match unsigned.find(&['e', 'E'][..]) {
        Some(i) => (&unsigned[..i], Some(&unsigned[i + 1..])),
        None => (unsigned, None),
    };

    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    let mantissa_ok = match mantissa.split_once('.') {
        Some((whole, frac)) => digits(whole) && digits(frac),
        None => digits(mantissa),
    };
    if !mantissa_ok {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(&['+', '-'][..]).unwrap_or(exp);
            digits(exp)
        }
    }
}

fn parse_whole_months(raw: &str) -> EmiResult<u32> {
    let field = "tenure_months";
    let value = parse_decimal(field, raw)?;

    if !value.fract().is_zero() {
        return Err(EmiError::invalid(
            field,
            format!("{value} is not a whole number of months."),
        ));
    }

    value.to_u32().ok_or_else(|| {
        EmiError::invalid(
            field,
            format!("{value} is outside the supported range of months."),
        )
    })
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a number or numeric string, got {other}"
        ))),
    }
}
