pub mod analysis;
pub mod borrower;
pub mod loan;
pub mod session;
