pub mod affordability;
pub mod dti;
