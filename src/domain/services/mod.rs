pub mod pricing;
pub mod signature;
