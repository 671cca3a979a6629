pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "repayment")]
pub mod repayment;

pub use error::EmiError;
pub use types::*;

/// Standard result type for all EMI operations
pub type EmiResult<T> = Result<T, EmiError>;
