use emi_core::repayment::{
    calculate_repayment, repayment_summary, CalculationState, LoanForm, LoanInputs,
    RepaymentSummary,
};
use emi_core::time_value::{level_payment, monthly_rate};
use emi_core::EmiError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn loan(principal: Decimal, annual_rate_pct: Decimal, tenure_months: u32) -> LoanInputs {
    LoanInputs {
        principal,
        annual_rate_pct,
        tenure_months,
    }
}

// ===========================================================================
// Golden scenarios
// ===========================================================================

#[test]
fn test_golden_hundred_thousand_at_ten_percent() {
    let summary = repayment_summary(&loan(dec!(100_000), dec!(10), 12)).unwrap();
    assert_eq!(
        summary,
        RepaymentSummary {
            installment: 8792,
            total_interest: 5504,
            total_amount: 105_504,
        }
    );
}

#[test]
fn test_golden_interest_free_half_million() {
    // 500000 / 24 = 20833.33.. rounds down; the total falls 8 short.
    let summary = repayment_summary(&loan(dec!(500_000), Decimal::ZERO, 24)).unwrap();
    assert_eq!(
        summary,
        RepaymentSummary {
            installment: 20_833,
            total_interest: -8,
            total_amount: 499_992,
        }
    );
}

#[test]
fn test_golden_twenty_year_home_loan() {
    // 50 lakh at 8.5% over 240 months: EMI 43391.16
    let summary = repayment_summary(&loan(dec!(5_000_000), dec!(8.5), 240)).unwrap();
    assert_eq!(summary.installment, 43_391);
    assert_eq!(summary.total_amount, 43_391 * 240);
    assert_eq!(summary.total_interest, 43_391 * 240 - 5_000_000);
}

// ===========================================================================
// Invariants
// ===========================================================================

fn sample_loans() -> Vec<LoanInputs> {
    let mut loans = Vec::new();
    for p in [dec!(1), dec!(999), dec!(100_000), dec!(2_500_000), dec!(123_456.78)] {
        for r in [Decimal::ZERO, dec!(0.01), dec!(7.25), dec!(10), dec!(36)] {
            for n in [1u32, 6, 12, 60, 360] {
                loans.push(loan(p, r, n));
            }
        }
    }
    loans
}

#[test]
fn test_total_is_installment_times_tenure() {
    for input in sample_loans() {
        let s = repayment_summary(&input).unwrap();
        assert_eq!(
            s.total_amount,
            s.installment * i64::from(input.tenure_months),
            "{input:?}"
        );
    }
}

#[test]
fn test_interest_is_total_less_principal() {
    for input in sample_loans() {
        let s = repayment_summary(&input).unwrap();
        let expected = (Decimal::from(s.total_amount) - input.principal)
            .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
        assert_eq!(Decimal::from(s.total_interest), expected, "{input:?}");
    }
}

#[test]
fn test_zero_rate_installment_is_rounded_share() {
    for (p, n) in [(dec!(1200), 12u32), (dec!(1000), 3), (dec!(10), 4), (dec!(7), 2)] {
        let s = repayment_summary(&loan(p, Decimal::ZERO, n)).unwrap();
        let share = (p / Decimal::from(n))
            .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
        assert_eq!(Decimal::from(s.installment), share);
        // Interest is only rounding residue: at most half a unit per month.
        assert!(Decimal::from(s.total_interest.abs()) <= Decimal::from(n) / dec!(2));
    }
}

#[test]
fn test_half_unit_rounds_away_from_zero() {
    // 10 / 4 = 2.5 -> 3, not banker's 2
    let s = repayment_summary(&loan(dec!(10), Decimal::ZERO, 4)).unwrap();
    assert_eq!(s.installment, 3);
    assert_eq!(s.total_amount, 12);
    assert_eq!(s.total_interest, 2);
}

// ===========================================================================
// Monotonicity
// ===========================================================================

#[test]
fn test_installment_increases_with_rate() {
    let principal = dec!(250_000);
    let mut previous = Decimal::ZERO;
    let mut previous_rounded = 0i64;
    for pct in [dec!(0), dec!(0.5), dec!(4), dec!(8), dec!(12), dec!(24)] {
        let pmt = level_payment(principal, monthly_rate(pct), 60).unwrap();
        assert!(pmt > previous, "rate {pct}: {pmt} <= {previous}");
        previous = pmt;

        let rounded = repayment_summary(&loan(principal, pct, 60)).unwrap().installment;
        assert!(rounded > previous_rounded, "rate {pct}: {rounded} <= {previous_rounded}");
        previous_rounded = rounded;
    }
}

#[test]
fn test_longer_tenure_lowers_installment_raises_total() {
    let mut prev: Option<RepaymentSummary> = None;
    for n in [6u32, 12, 24, 60, 120, 240] {
        let s = repayment_summary(&loan(dec!(1_000_000), dec!(9), n)).unwrap();
        if let Some(p) = prev {
            assert!(s.installment < p.installment, "n={n}");
            assert!(s.total_amount > p.total_amount, "n={n}");
        }
        prev = Some(s);
    }
}

// ===========================================================================
// Invalid input
// ===========================================================================

#[test]
fn test_invalid_inputs_fail_predictably() {
    let cases = [
        (loan(dec!(1000), dec!(10), 0), "tenure_months"),
        (loan(Decimal::ZERO, dec!(10), 12), "principal"),
        (loan(dec!(-1000), dec!(10), 12), "principal"),
        (loan(dec!(1000), dec!(-0.01), 12), "annual_rate_pct"),
    ];
    for (input, field) in cases {
        match calculate_repayment(&input) {
            Err(EmiError::InvalidInput { field: f, .. }) => assert_eq!(f, field),
            other => panic!("{input:?} -> {other:?}"),
        }
    }
}

#[test]
fn test_form_round_trip_through_state() {
    let state = CalculationState::from_form(&LoanForm::new("100000", "10", "12"));
    assert_eq!(state.summary().map(|s| s.installment), Some(8792));

    let state = CalculationState::from_form(&LoanForm::new("100000", "10", "twelve"));
    assert!(matches!(state, CalculationState::Failed { .. }));

    // A decimal comma is rejected rather than read as 85%.
    let state = CalculationState::from_form(&LoanForm::new("100000", "8,5", "12"));
    match state {
        CalculationState::Failed { field, .. } => {
            assert_eq!(field.as_deref(), Some("annual_rate_pct"))
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn test_envelope_metadata() {
    let out = calculate_repayment(&loan(dec!(100_000), dec!(10), 12)).unwrap();
    assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    assert!(out.methodology.contains("Equated Monthly Installment"));
    assert_eq!(out.assumptions["rounding"], "half_away_from_zero");
}
