use crate::domain::constants::{TOP_VIEW, WORST_VIEW};
use crate::domain::models::{Catalog, FilterReport};

/// Issuance threshold for a slider position: `ceil(max ^ (percent / 100))`.
pub fn minimum_issuance(max_issuance: u64, percent: f64) -> u64 {
    let p = percent.clamp(0.0, 100.0) / 100.0;
    (max_issuance as f64).powf(p).ceil() as u64
}

/// Synthetic views first, then every issuer at or above the threshold in catalog order.
pub fn filter_issuers(catalog: &Catalog, percent: f64) -> FilterReport {
    let minimum = minimum_issuance(catalog.max_issuance, percent);
    let mut issuers = vec![WORST_VIEW.to_string(), TOP_VIEW.to_string()];
    issuers.extend(
        catalog
            .issuers
            .iter()
            .filter(|e| e.total_issuance >= minimum)
            .map(|e| e.issuer.clone()),
    );
    FilterReport {
        percent,
        minimum_issuance: minimum,
        issuers,
    }
}
