use crate::domain::models::{JsonOut, SeriesValue, TimeSeries};
use serde::Serialize;

fn print_json<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&JsonOut { ok: true, data })?
    );
    Ok(())
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    lines: impl Fn(&T) -> Vec<String>,
) -> anyhow::Result<()> {
    if json {
        return print_json(data);
    }
    for line in lines(&data) {
        println!("{}", line);
    }
    Ok(())
}

/// Tab-separated `timestamp value` lines under a `# name` header.
pub fn series_lines(series: &TimeSeries) -> Vec<String> {
    let mut out = vec![format!("# {}", series.name)];
    out.extend(series.data.iter().map(|(t, v)| match v {
        SeriesValue::Count(c) => format!("{}\t{}", t, c),
        SeriesValue::Score(s) => format!("{}\t{:.3}", t, s),
    }));
    out
}
