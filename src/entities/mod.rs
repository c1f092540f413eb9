pub mod prelude;

pub mod drugs;
pub mod pricing_cache;
