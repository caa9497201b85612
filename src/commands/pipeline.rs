use crate::cli::{Cli, Commands};
use crate::domain::models::{PipelineConfig, PipelineRun};
use crate::services::assembler;
use crate::services::output::print_one;
use crate::services::source::SqliteSource;

fn summary_lines(run: &PipelineRun) -> Vec<String> {
    let s = &run.summary;
    let mut out = vec![
        format!(
            "wrote {} of {} issuer artifacts to {}",
            s.succeeded, s.issuers, s.out_dir
        ),
        format!("max issuance: {}", run.catalog.max_issuance),
        format!("top issuers: {}", run.rankings.top_by_volume.join(", ")),
        format!("worst issuers: {}", run.rankings.worst_by_score.join(", ")),
    ];
    for f in &s.failures {
        out.push(format!("failed\t{}\t{}", f.issuer, f.reason));
    }
    out
}

pub fn handle_build(cli: &Cli, mut config: PipelineConfig) -> anyhow::Result<()> {
    let Commands::Build {
        out_dir,
        score_kind,
    } = &cli.command
    else {
        anyhow::bail!("handle_build called for a non-build command");
    };
    if let Some(kind) = score_kind {
        config.output.score_kind = *kind;
    }

    let source = SqliteSource::open(&cli.db, &config.source)?;
    tracing::info!(db = %cli.db.display(), out_dir = %out_dir.display(), "starting pipeline run");
    let run = assembler::run(&source, &config, out_dir)?;
    let data = serde_json::json!({
        "summary": run.summary,
        "max_issuance": run.catalog.max_issuance,
        "rankings": run.rankings,
    });
    print_one(cli.json, data, |_| summary_lines(&run))
}
