mod alternatives;
mod pricing;
mod search;

pub use alternatives::cmd_alternatives;
pub use pricing::cmd_pricing;
pub use search::cmd_search_drug;
