use crate::domain::columns::Column;
use crate::domain::constants::SCORE_DECIMALS;
use crate::domain::models::{MeasurementRow, SeriesValue, TimeSeries};
use crate::services::source::{DataSourceError, MeasurementSource};

pub fn round_score(v: f64) -> f64 {
    let scale = 10f64.powi(SCORE_DECIMALS);
    (v * scale).round() / scale
}

/// Series of `column` for one issuer, named after the issuer.
pub fn build_series(
    source: &dyn MeasurementSource,
    issuer: &str,
    column: Column,
) -> Result<TimeSeries, DataSourceError> {
    let rows = source.issuer_rows(issuer)?;
    Ok(series_from_rows(issuer, &rows, column))
}

/// Builds a series from rows already read for one issuer.
///
/// Points come out strictly ascending by timestamp. When two rows share a
/// `beginTime` the later row wins; rows with a NULL value contribute nothing.
pub fn series_from_rows(name: &str, rows: &[MeasurementRow], column: Column) -> TimeSeries {
    let mut points: Vec<(i64, SeriesValue)> = rows
        .iter()
        .filter_map(|r| r.value(column).map(|v| (r.begin_time, v)))
        .map(|(t, v)| match v {
            SeriesValue::Score(s) => (t, SeriesValue::Score(round_score(s))),
            count => (t, count),
        })
        .collect();
    points.sort_by_key(|(t, _)| *t);

    let mut data: Vec<(i64, SeriesValue)> = Vec::with_capacity(points.len());
    for (t, v) in points {
        match data.last_mut() {
            Some(last) if last.0 == t => last.1 = v,
            _ => data.push((t, v)),
        }
    }

    TimeSeries {
        name: name.to_string(),
        data,
        y_axis: None,
    }
}
