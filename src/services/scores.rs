use crate::domain::columns::{Category, Column, ScoreKind};
use crate::domain::constants::{VOLUME_SERIES_NAME, VOLUME_Y_AXIS};
use crate::domain::models::{MeasurementRow, ScoreBundle};
use crate::services::series::series_from_rows;
use crate::services::source::{DataSourceError, MeasurementSource};
use std::collections::BTreeMap;

pub fn build_score_bundle(
    source: &dyn MeasurementSource,
    issuer: &str,
    kind: ScoreKind,
) -> Result<ScoreBundle, DataSourceError> {
    let rows = source.issuer_rows(issuer)?;
    Ok(score_bundle_from_rows(&rows, kind))
}

/// Six category series named `<category><ScoreKind>` plus the issuance volume series.
pub fn score_bundle_from_rows(rows: &[MeasurementRow], kind: ScoreKind) -> ScoreBundle {
    let scores: BTreeMap<Category, _> = Category::ALL
        .into_iter()
        .map(|cat| {
            let column = Column::CategoryScore(cat, kind);
            (cat, series_from_rows(&column.name(), rows, column))
        })
        .collect();

    let mut volume = series_from_rows(VOLUME_SERIES_NAME, rows, Column::RawCount);
    volume.y_axis = Some(VOLUME_Y_AXIS);

    ScoreBundle { scores, volume }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::SeriesValue;
    use crate::services::testing::{row, MemorySource};

    fn rows() -> Vec<MeasurementRow> {
        let mut a = row("Acme CA", 1000, 500);
        a.categories[Category::ExpTooSmall.index()].raw_score = Some(0.25);
        a.categories[Category::ExpTooSmall.index()].normalized_score = Some(0.5561);
        let mut b = row("Acme CA", 2000, 600);
        b.categories[Category::ExpTooSmall.index()].raw_score = Some(0.75);
        vec![a, b]
    }

    #[test]
    fn bundle_names_series_per_category_and_kind() {
        let src = MemorySource::new(rows());
        let bundle = build_score_bundle(&src, "Acme CA", ScoreKind::Raw).expect("bundle");
        assert_eq!(bundle.scores.len(), 6);
        let names: Vec<_> = bundle.scores.values().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "validPeriodTooLongRawScore",
                "deprecatedVersionRawScore",
                "deprecatedSignatureAlgorithmRawScore",
                "missingCNinSANRawScore",
                "keyTooShortRawScore",
                "expTooSmallRawScore",
            ]
        );
        assert_eq!(
            bundle.scores[&Category::ExpTooSmall].data,
            vec![
                (1000, SeriesValue::Score(0.25)),
                (2000, SeriesValue::Score(0.75))
            ]
        );
    }

    #[test]
    fn categories_without_values_are_empty_not_errors() {
        let bundle = score_bundle_from_rows(&rows(), ScoreKind::Raw);
        assert!(bundle.scores[&Category::KeyTooShort].data.is_empty());
    }

    #[test]
    fn normalized_kind_reads_normalized_columns() {
        let bundle = score_bundle_from_rows(&rows(), ScoreKind::Normalized);
        let exp = &bundle.scores[&Category::ExpTooSmall];
        assert_eq!(exp.name, "expTooSmallNormalizedScore");
        assert_eq!(exp.data, vec![(1000, SeriesValue::Score(0.556))]);
    }

    #[test]
    fn volume_series_targets_secondary_axis() {
        let bundle = score_bundle_from_rows(&rows(), ScoreKind::Raw);
        assert_eq!(bundle.volume.name, "Issuance Volume");
        assert_eq!(bundle.volume.y_axis, Some(1));
        assert_eq!(
            bundle.volume.data,
            vec![(1000, SeriesValue::Count(500)), (2000, SeriesValue::Count(600))]
        );
    }
}
