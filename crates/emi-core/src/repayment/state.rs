use serde::{Deserialize, Serialize};

use crate::repayment::calculator::{repayment_summary, RepaymentSummary};
use crate::repayment::form::LoanForm;
use crate::EmiError;

/// What the result panel should show.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalculationState {
    /// Nothing requested since the inputs last changed.
    #[default]
    NotComputed,
    Failed {
        #[serde(skip_serializing_if = "Option::is_none")]
        field: Option<String>,
        reason: String,
    },
    Succeeded {
        summary: RepaymentSummary,
    },
}

impl CalculationState {
    /// Run one computation over the form as typed.
    pub fn from_form(form: &LoanForm) -> Self {
        match form.parse().and_then(|inputs| repayment_summary(&inputs)) {
            Ok(summary) => CalculationState::Succeeded { summary },
            Err(e) => CalculationState::from(e),
        }
    }

    pub fn summary(&self) -> Option<&RepaymentSummary> {
        match self {
            CalculationState::Succeeded { summary } => Some(summary),
            _ => None,
        }
    }

    pub fn is_computed(&self) -> bool {
        !matches!(self, CalculationState::NotComputed)
    }
}

impl From<EmiError> for CalculationState {
    fn from(e: EmiError) -> Self {
        CalculationState::Failed {
            field: e.field().map(str::to_string),
            reason: e.to_string(),
        }
    }
}

/// A form plus the last result computed from it.
///
/// Editing a field throws the result away; only [`RepaymentSession::calculate`]
/// produces a new one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepaymentSession {
    form: LoanForm,
    state: CalculationState,
}

impl RepaymentSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(form: LoanForm) -> Self {
        RepaymentSession {
            form,
            state: CalculationState::NotComputed,
        }
    }

    pub fn form(&self) -> &LoanForm {
        &self.form
    }

    pub fn state(&self) -> &CalculationState {
        &self.state
    }

    pub fn set_principal(&mut self, text: impl Into<String>) {
        self.form.principal = text.into();
        self.invalidate();
    }

    pub fn set_annual_rate(&mut self, text: impl Into<String>) {
        self.form.annual_rate = text.into();
        self.invalidate();
    }

    pub fn set_tenure(&mut self, text: impl Into<String>) {
        self.form.tenure = text.into();
        self.invalidate();
    }

    /// Compute from the current form, replacing any previous result.
    pub fn calculate(&mut self) -> &CalculationState {
        self.state = CalculationState::from_form(&self.form);
        match &self.state {
            CalculationState::Failed { reason, .. } => {
                tracing::debug!(%reason, "repayment calculation rejected");
            }
            CalculationState::Succeeded { summary } => {
                tracing::debug!(installment = summary.installment, "repayment calculated");
            }
            CalculationState::NotComputed => {}
        }
        &self.state
    }

    /// Restore the default form and clear the result.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn invalidate(&mut self) {
        self.state = CalculationState::NotComputed;
    }
}
