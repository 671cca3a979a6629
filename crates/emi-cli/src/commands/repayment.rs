use clap::Args;
use serde_json::Value;

use emi_core::repayment::{calculate_repayment, LoanForm, RepaymentSession};

use crate::input;

/// Arguments for a single EMI calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CalculateArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long, alias = "amount")]
    pub principal: Option<String>,

    /// Interest rate (% per annum)
    #[arg(long, alias = "interest")]
    pub rate: Option<String>,

    /// Loan tenure (months)
    #[arg(long)]
    pub tenure: Option<String>,

    /// Emit the result-panel state (not_computed / failed / succeeded)
    /// instead of the full envelope; invalid input is reported, not raised
    #[arg(long)]
    pub state: bool,
}

impl CalculateArgs {
    fn has_field_flags(&self) -> bool {
        self.principal.is_some() || self.rate.is_some() || self.tenure.is_some()
    }

    /// Fill the form from flags, falling back to the form defaults.
    fn into_form(self) -> LoanForm {
        let defaults = LoanForm::default();
        LoanForm {
            principal: self.principal.unwrap_or(defaults.principal),
            annual_rate: self.rate.unwrap_or(defaults.annual_rate),
            tenure: self.tenure.unwrap_or(defaults.tenure),
        }
    }
}

pub fn run_calculate(mut args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let as_state = args.state;

    let form: LoanForm = if let Some(path) = args.input.take() {
        input::file::read_structured(&path)?
    } else if args.has_field_flags() {
        args.into_form()
    } else if let Some(form) = input::stdin::read_stdin()? {
        form
    } else {
        args.into_form()
    };

    tracing::debug!(
        principal = %form.principal,
        annual_rate = %form.annual_rate,
        tenure = %form.tenure,
        "loan form received"
    );

    if as_state {
        let mut session = RepaymentSession::with_form(form);
        return Ok(serde_json::to_value(session.calculate())?);
    }

    let inputs = form.parse()?;
    let result = calculate_repayment(&inputs)?;
    Ok(serde_json::to_value(result)?)
}
