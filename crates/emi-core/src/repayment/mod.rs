pub mod calculator;
pub mod form;
pub mod state;

pub use calculator::{calculate_repayment, repayment_summary, LoanInputs, RepaymentSummary};
pub use form::LoanForm;
pub use state::{CalculationState, RepaymentSession};
