pub mod amortization;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "borrower")]
pub mod borrower;

#[cfg(feature = "analysis")]
pub mod analysis;

#[cfg(feature = "session")]
pub mod session;

pub use error::MortgageError;
pub use types::*;

/// Standard result type for all mortgage engine operations
pub type MortgageResult<T> = Result<T, MortgageError>;
