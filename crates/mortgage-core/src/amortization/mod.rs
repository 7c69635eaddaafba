pub mod dates;
pub mod schedule;

pub use dates::DateRoll;
pub use schedule::{
    build_schedule, generate_schedule, AmortizationResult, LoanParameters, PaymentRecord,
};
