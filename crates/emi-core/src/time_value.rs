use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal::RoundingStrategy;
use rust_decimal_macros::dec;

use crate::error::EmiError;
use crate::types::{Money, Percent, Rate};
use crate::EmiResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const MONTHS_PER_YEAR_U32: u32 = 12;
const PERCENT: Decimal = dec!(100);

/// Rounding applied to every reported currency figure.
pub const UNIT_ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;
pub const UNIT_ROUNDING_NAME: &str = "half_away_from_zero";

/// Convert an annual nominal percentage into a monthly fractional rate.
pub fn monthly_rate(annual_pct: Percent) -> Rate {
    annual_pct / MONTHS_PER_YEAR / PERCENT
}

/// Compound growth factor (1 + r)^n.
///
/// Fails rather than saturating when the factor leaves the 96-bit mantissa.
/// The error names the rate when a single year of compounding already
/// overflows, and the tenure otherwise.
pub fn growth_factor(rate: Rate, periods: u32) -> EmiResult<Decimal> {
    let base = Decimal::ONE + rate;
    base.checked_powu(u64::from(periods)).ok_or_else(|| {
        let one_year = u64::from(periods.min(MONTHS_PER_YEAR_U32));
        let field = if base.checked_powu(one_year).is_none() {
            "annual_rate_pct"
        } else {
            "tenure_months"
        };
        EmiError::invalid(
            field,
            format!("growth factor (1 + {rate})^{periods} is not representable"),
        )
    })
}

/// Level payment that amortises `principal` over `periods` at a periodic
/// `rate`.
///
/// PMT = P * r * (1+r)^n / ((1+r)^n - 1), or P / n when the rate vanishes.
pub fn level_payment(principal: Money, rate: Rate, periods: u32) -> EmiResult<Money> {
    if periods == 0 {
        return Err(EmiError::invalid(
            "tenure_months",
            "Number of periods must be > 0",
        ));
    }

    let n = Decimal::from(periods);
    if rate.is_zero() {
        return Ok(principal / n);
    }

    let compound = growth_factor(rate, periods)?;
    let accrued = compound - Decimal::ONE;

    // Rate too small to move the factor at 28 digits: same limit as r = 0.
    if accrued.is_zero() {
        return Ok(principal / n);
    }

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(compound))
        .and_then(|v| v.checked_div(accrued))
        .ok_or_else(|| EmiError::invalid("principal", "installment is not representable"))
}

/// Round to the nearest whole currency unit, halves away from zero.
pub fn round_to_unit(value: Money) -> Money {
    value.round_dp_with_strategy(0, UNIT_ROUNDING)
}

/// Round to a whole unit and narrow to an integer.
pub fn to_whole_units(field: &str, value: Money) -> EmiResult<i64> {
    round_to_unit(value)
        .to_i64()
        .ok_or_else(|| EmiError::invalid(field, format!("{value} does not fit in whole units")))
}
