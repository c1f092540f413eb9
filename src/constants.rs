pub mod cache {

    pub const PRICING_TTL_HOURS: i64 = 24;

    /// One year.
    pub const MAX_PRICING_TTL_HOURS: i64 = 8760;
}

pub mod openfda {

    pub const DEFAULT_BASE_URL: &str = "https://api.fda.gov";

    pub const LABEL_ENDPOINT: &str = "/drug/label.json";

    pub const REQUEST_TIMEOUT_SECONDS: u64 = 10;
}

pub mod pricing {

    pub const BASE_COST_MIN: f64 = 50.0;

    pub const BASE_COST_MAX: f64 = 300.0;

    pub const MULTIPLIER_MIN: f64 = 0.7;

    pub const MULTIPLIER_MAX: f64 = 1.3;

    pub const COPAY_RATE: f64 = 0.2;

    pub const DEDUCTIBLE_RATE: f64 = 0.8;
}

pub mod alternatives {

    pub const SEARCH_LIMIT: u32 = 5;

    pub const MAX_CANDIDATES: usize = 3;

    pub const SAVINGS_MIN: f64 = 20.0;

    pub const SAVINGS_MAX: f64 = 70.0;

    pub const AVAILABILITY: &str = "Available";
}
