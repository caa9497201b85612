use crate::cli::{Cli, Commands};
use crate::domain::columns::Column;
use crate::domain::models::{ExampleSet, PipelineConfig, RankingResult, ScoreBundle};
use crate::services::examples::select_examples;
use crate::services::filter::filter_issuers;
use crate::services::output::{print_one, series_lines};
use crate::services::ranking::compute_rankings;
use crate::services::scores::build_score_bundle;
use crate::services::series::build_series;
use crate::services::source::{MeasurementSource, SqliteSource};
use crate::services::storage::{load_catalog, sanitize};

fn ranking_lines(r: &RankingResult) -> Vec<String> {
    let top = r
        .top_by_volume
        .iter()
        .enumerate()
        .map(|(i, issuer)| format!("top\t{}\t{}", i + 1, issuer));
    let worst = r
        .worst_by_score
        .iter()
        .enumerate()
        .map(|(i, issuer)| format!("worst\t{}\t{}", i + 1, issuer));
    top.chain(worst).collect()
}

fn bundle_lines(b: &ScoreBundle) -> Vec<String> {
    b.scores
        .values()
        .chain(std::iter::once(&b.volume))
        .flat_map(series_lines)
        .collect()
}

fn example_lines(set: &Option<ExampleSet>) -> Vec<String> {
    let Some(set) = set else {
        return vec!["no examples".to_string()];
    };
    set.categories()
        .filter_map(|cat| {
            set.get(cat).map(|ex| {
                let seen = ex
                    .last_seen
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "n/a".to_string());
                format!("{}\t{}", cat, seen)
            })
        })
        .collect()
}

pub fn handle_inspect_commands(cli: &Cli, config: &PipelineConfig) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Series { issuer, column } => {
            let column: Column = column.parse()?;
            let source = SqliteSource::open(&cli.db, &config.source)?;
            let series = build_series(&source, issuer, column)?;
            print_one(cli.json, series, series_lines)?;
        }
        Commands::Scores { issuer, score_kind } => {
            let source = SqliteSource::open(&cli.db, &config.source)?;
            let bundle = build_score_bundle(&source, issuer, *score_kind)?;
            print_one(cli.json, bundle, bundle_lines)?;
        }
        Commands::Rank => {
            let source = SqliteSource::open(&cli.db, &config.source)?;
            let rankings = compute_rankings(&source.catalog()?, &config.ranking);
            print_one(cli.json, rankings, ranking_lines)?;
        }
        Commands::Examples { issuer } => {
            let source = SqliteSource::open(&cli.db, &config.source)?;
            let examples = select_examples(&source, issuer)?;
            print_one(cli.json, examples, example_lines)?;
        }
        Commands::Filter { percent, out_dir } => {
            let catalog = load_catalog(out_dir)?;
            let report = filter_issuers(&catalog, *percent);
            print_one(cli.json, report, |r| {
                let mut out = vec![format!("minimum issuance: {}", r.minimum_issuance)];
                out.extend(r.issuers.iter().cloned());
                out
            })?;
        }
        Commands::Sanitize { name } => {
            print_one(cli.json, sanitize(name), |s| vec![s.clone()])?;
        }
        Commands::Build { .. } => unreachable!("build is dispatched to handle_build"),
    }
    Ok(())
}
