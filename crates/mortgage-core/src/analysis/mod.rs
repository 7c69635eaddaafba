pub mod payoff;
pub mod refinance;
pub mod scenario;
