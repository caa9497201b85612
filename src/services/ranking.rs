use crate::domain::models::{CatalogEntry, RankingConfig, RankingResult};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Folds repeated catalog entries for the same issuer into one.
///
/// Volumes are summed, trust-store membership is OR-ed and the current score
/// comes from the last entry that carries one.
fn group_by_issuer(entries: &[CatalogEntry]) -> Vec<CatalogEntry> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut grouped: Vec<CatalogEntry> = Vec::new();
    for e in entries {
        match index.get(e.issuer.as_str()) {
            Some(&i) => {
                let g = &mut grouped[i];
                g.total_issuance = g.total_issuance.saturating_add(e.total_issuance);
                g.in_trust_store |= e.in_trust_store;
                if e.current_raw_score.is_some() {
                    g.current_raw_score = e.current_raw_score;
                }
            }
            None => {
                index.insert(&e.issuer, grouped.len());
                grouped.push(e.clone());
            }
        }
    }
    grouped
}

pub fn top_by_volume(entries: &[CatalogEntry], top_n: usize) -> Vec<String> {
    let mut trusted: Vec<CatalogEntry> = group_by_issuer(entries)
        .into_iter()
        .filter(|e| e.in_trust_store)
        .collect();
    trusted.sort_by(|a, b| {
        b.total_issuance
            .cmp(&a.total_issuance)
            .then_with(|| a.issuer.cmp(&b.issuer))
    });
    trusted.into_iter().take(top_n).map(|e| e.issuer).collect()
}

/// Trusted issuers above the volume floor, lowest current raw score first.
pub fn worst_by_score(entries: &[CatalogEntry], top_n: usize, volume_floor: u64) -> Vec<String> {
    let mut candidates: Vec<(f64, String)> = group_by_issuer(entries)
        .into_iter()
        .filter(|e| e.in_trust_store && e.total_issuance > volume_floor && !e.issuer.is_empty())
        .filter_map(|e| {
            e.current_raw_score
                .filter(|s| !s.is_nan())
                .map(|s| (s, e.issuer))
        })
        .collect();
    candidates.sort_by(|a, b| match a.0.total_cmp(&b.0) {
        Ordering::Equal => a.1.cmp(&b.1),
        other => other,
    });
    candidates
        .into_iter()
        .take(top_n)
        .map(|(_, issuer)| issuer)
        .collect()
}

pub fn compute_rankings(entries: &[CatalogEntry], config: &RankingConfig) -> RankingResult {
    RankingResult {
        top_by_volume: top_by_volume(entries, config.top_n),
        worst_by_score: worst_by_score(entries, config.top_n, config.volume_floor),
    }
}
