pub use super::drugs::Entity as Drugs;
pub use super::pricing_cache::Entity as PricingCache;
