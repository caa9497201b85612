use crate::domain::columns::Category;
use crate::domain::models::{Example, ExampleRow, ExampleSet};
use crate::services::source::{DataSourceError, MeasurementSource};
use std::collections::BTreeMap;

pub fn select_examples(
    source: &dyn MeasurementSource,
    issuer: &str,
) -> Result<Option<ExampleSet>, DataSourceError> {
    let rows = source.issuer_examples(issuer)?;
    Ok(examples_from_rows(&rows))
}

/// Most recently seen non-empty certificate per category; `None` if no category has one.
pub fn examples_from_rows(rows: &[ExampleRow]) -> Option<ExampleSet> {
    let mut picked: BTreeMap<Category, Example> = BTreeMap::new();
    for cat in Category::ALL {
        let best = rows
            .iter()
            .map(|r| &r.slots[cat.index()])
            .filter(|s| s.pem.as_deref().is_some_and(|p| !p.trim().is_empty()))
            .max_by_key(|s| s.last_seen);
        if let Some(slot) = best {
            picked.insert(
                cat,
                Example {
                    certificate_pem: slot.pem.clone().unwrap_or_default(),
                    last_seen: slot.last_seen,
                },
            );
        }
    }
    ExampleSet::from_map(picked)
}
