use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value::{self, level_payment, monthly_rate, round_to_unit, to_whole_units};
use crate::{types::*, EmiError, EmiResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Typed, already-parsed loan terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInputs {
    /// Amount borrowed, in currency units.
    pub principal: Money,
    /// Nominal annual rate as a percentage (10 = 10% p.a.).
    pub annual_rate_pct: Percent,
    /// Number of monthly installments.
    pub tenure_months: u32,
}

/// The three figures shown to the borrower, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentSummary {
    pub installment: i64,
    pub total_interest: i64,
    pub total_amount: i64,
}

#[derive(Debug, Serialize)]
struct RepaymentAssumptions {
    monthly_rate: Rate,
    exact_installment: Money,
    exact_total_interest: Money,
    rounding: &'static str,
    zero_rate: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the equated monthly installment and its totals.
///
/// The installment is rounded first; the total is that rounded installment
/// times the tenure, and interest is the total less principal.
pub fn calculate_repayment(
    input: &LoanInputs,
) -> EmiResult<ComputationOutput<RepaymentSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let rate = monthly_rate(input.annual_rate_pct);
    let zero_rate = rate.is_zero();
    let exact_installment = level_payment(input.principal, rate, input.tenure_months)?;

    tracing::debug!(
        principal = %input.principal,
        annual_rate_pct = %input.annual_rate_pct,
        tenure_months = input.tenure_months,
        monthly_rate = %rate,
        zero_rate,
        "computing repayment"
    );

    if zero_rate {
        warnings.push(format!(
            "Zero interest rate: installment is principal / {} months.",
            input.tenure_months
        ));
    }

    let installment = round_to_unit(exact_installment);
    let total_amount = installment
        .checked_mul(Decimal::from(input.tenure_months))
        .ok_or_else(|| EmiError::invalid("principal", "total amount is not representable"))?;
    let total_interest = total_amount - input.principal;

    let exact_total_interest = exact_installment
        .checked_mul(Decimal::from(input.tenure_months))
        .ok_or_else(|| EmiError::invalid("principal", "total amount is not representable"))?
        - input.principal;
    let residue = round_to_unit(total_interest) - round_to_unit(exact_total_interest);
    if !residue.is_zero() {
        warnings.push(format!(
            "Rounding residue: total interest differs from the unrounded figure by {residue}."
        ));
    }

    let output = RepaymentSummary {
        installment: to_whole_units("installment", installment)?,
        total_interest: to_whole_units("total_interest", total_interest)?,
        total_amount: to_whole_units("total_amount", total_amount)?,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = RepaymentAssumptions {
        monthly_rate: rate,
        exact_installment,
        exact_total_interest,
        rounding: time_value::UNIT_ROUNDING_NAME,
        zero_rate,
    };

    Ok(with_metadata(
        "Equated Monthly Installment (level-payment amortising loan)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

/// Same computation without the envelope.
pub fn repayment_summary(input: &LoanInputs) -> EmiResult<RepaymentSummary> {
    calculate_repayment(input).map(ComputationOutput::into_result)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_input(input: &LoanInputs) -> EmiResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(EmiError::invalid(
            "principal",
            "Loan amount must be positive.",
        ));
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(EmiError::invalid(
            "annual_rate_pct",
            "Interest rate cannot be negative.",
        ));
    }
    if input.tenure_months == 0 {
        return Err(EmiError::invalid(
            "tenure_months",
            "Tenure must be at least one month.",
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
