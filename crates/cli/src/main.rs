use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use footprint::prelude::*;
use footprint::sample::ReplayToken;
use serde_json::json;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod io;
mod provenance;

use io::{CfgRecord, DetectionRecord, FootprintRecord, SpanRecord};
use provenance::{write_sidecar, RunSummary, SpanCounts};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Detect architectural features on building footprints")]
struct Cmd {
    /// Log at DEBUG instead of INFO
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Detect and annotate features; writes spans and per-edge tags
    Detect {
        /// Footprints as .json, or .csv/.parquet with columns id, x, y
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// JSON file overriding any subset of the detector thresholds
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write synthetic footprints in the detect input format
    Sample {
        #[arg(long, default_value_t = 16)]
        count: u64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = Shape::Bumped)]
        shape: Shape,
        /// Bumps per rectilinear footprint
        #[arg(long, default_value_t = 4)]
        bumps: usize,
        /// Chords of the rounded corner (bumped) or the whole outline (round)
        #[arg(long)]
        segments: Option<usize>,
    },
    /// Print a small provenance JSON block with the default config
    Report,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Shape {
    Bumped,
    Round,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Detect { input, out, config } => detect(input, out, config),
        Action::Sample {
            count,
            seed,
            out,
            shape,
            bumps,
            segments,
        } => sample(count, seed, out, shape, bumps, segments),
        Action::Report => report(),
    }
}

fn detect(input: PathBuf, out: PathBuf, config: Option<PathBuf>) -> Result<()> {
    let cfg = io::load_cfg(config.as_deref())?;
    let records = io::read_footprints(&input)?;
    tracing::info!(input = %input.display(), footprints = records.len(), "detect");

    let mut results = Vec::with_capacity(records.len());
    let mut counts = SpanCounts::default();
    for rec in &records {
        let mut polygon = rec.to_polygon()?;
        let report = detect_features_report(&polygon, &cfg);
        let small_ran = report.small.ran();
        let spans = report.into_spans();
        annotate(&mut polygon, &spans);
        for s in &spans {
            counts.add(s.class);
        }
        results.push(DetectionRecord {
            id: rec.id.clone(),
            edges: polygon.len(),
            small_ran,
            spans: spans.iter().map(SpanRecord::from).collect(),
            tags: polygon.tags().iter().map(|t| t.map(|c| c.as_str())).collect(),
        });
    }
    let run = RunSummary::Detect {
        input: input.to_string_lossy().into_owned(),
        footprints: results.len(),
        with_features: results.iter().filter(|r| !r.spans.is_empty()).count(),
        small_skipped: results.iter().filter(|r| !r.small_ran).count(),
        spans: counts,
    };
    tracing::info!(spans = counts.total(), out = %out.display(), "detect_done");

    io::write_json(&out, &results)?;
    write_sidecar(&out, Some(CfgRecord::from(&cfg)), &run)?;
    Ok(())
}

fn sample(
    count: u64,
    seed: u64,
    out: PathBuf,
    shape: Shape,
    bumps: usize,
    segments: Option<usize>,
) -> Result<()> {
    let fcfg = FootprintCfg {
        shape: match shape {
            Shape::Bumped => FootprintShape::Rectilinear {
                bumps,
                rounded_corner: segments,
            },
            Shape::Round => FootprintShape::Round {
                segments: segments.unwrap_or(32),
            },
        },
        ..FootprintCfg::default()
    };
    tracing::info!(count, seed, shape = ?shape, "sample");

    let records = (0..count)
        .map(|index| {
            let fp = draw_footprint(&fcfg, ReplayToken { seed, index })
                .with_context(|| format!("sample {index}"))?;
            Ok(FootprintRecord {
                id: format!("s{seed}-{index}"),
                points: fp.points.iter().map(|p| [p.x, p.y]).collect(),
                bumps: fp.bumps.iter().map(|b| b.as_str().to_string()).collect(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    io::write_json(&out, &records)?;
    let run = RunSummary::Sample {
        seed,
        count,
        shape: format!("{shape:?}").to_lowercase(),
        bumps_placed: records.iter().map(|r| r.bumps.len()).sum(),
    };
    write_sidecar(&out, None, &run)?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::code_rev(),
        "footprint_version": footprint::VERSION,
        "cfg": CfgRecord::from(&FeatureCfg::default()),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
