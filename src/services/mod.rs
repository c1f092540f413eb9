pub mod alternatives;
pub use alternatives::{AlternativesError, AlternativesService};

pub mod pricing;
pub use pricing::{PricingError, PricingService, QuoteSource, SyntheticQuoteSource};

pub mod resolver;
pub use resolver::{DrugResolver, ResolveError};

#[cfg(test)]
pub(crate) mod test_support;
