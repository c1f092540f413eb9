pub mod drug;
pub mod pricing;
