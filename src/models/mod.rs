pub mod drug;
pub mod pricing;

pub use drug::{Alternative, DrugRecord};
pub use pricing::{PharmacyType, PlanType, PricingQuote};

/// Rounds to two decimal places, the precision used for currency amounts.
#[must_use]
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds to one decimal place.
#[must_use]
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding() {
        assert!((round_cents(123.456) - 123.46).abs() < f64::EPSILON);
        assert!((round_cents(10.0) - 10.0).abs() < f64::EPSILON);
        assert!((round_tenths(42.25) - 42.3).abs() < 1e-9);
        assert!((round_tenths(20.04) - 20.0).abs() < 1e-9);
    }
}
