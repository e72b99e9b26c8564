//! Provenance sidecars written next to every CLI artifact.
//!
//! `<stem>.provenance.json` records the code revision, the calling source
//! location, the library version, the detector config and a typed summary of
//! the run that produced the artifact.

use anyhow::Result;
use footprint::FeatureClass;
use serde::Serialize;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::io::CfgRecord;

/// Spans per feature class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SpanCounts {
    pub curvy: usize,
    pub rectangular: usize,
    pub triangular: usize,
}

impl SpanCounts {
    pub fn add(&mut self, class: FeatureClass) {
        match class {
            FeatureClass::Curvy => self.curvy += 1,
            FeatureClass::Rectangular => self.rectangular += 1,
            FeatureClass::Triangular => self.triangular += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.curvy + self.rectangular + self.triangular
    }
}

/// What the command did, tagged by command name.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum RunSummary {
    Detect {
        input: String,
        footprints: usize,
        with_features: usize,
        /// Footprints whose small-feature gate stayed closed.
        small_skipped: usize,
        spans: SpanCounts,
    },
    Sample {
        seed: u64,
        count: u64,
        shape: String,
        bumps_placed: usize,
    },
}

#[derive(Debug, Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

#[derive(Debug, Serialize)]
struct Sidecar<'a> {
    code_rev: String,
    callsite: Callsite,
    footprint_version: &'static str,
    cfg: Option<CfgRecord>,
    run: &'a RunSummary,
    output: String,
}

/// Write the sidecar for `artifact` and return its path.
#[track_caller]
pub fn write_sidecar(
    artifact: &Path,
    cfg: Option<CfgRecord>,
    run: &RunSummary,
) -> Result<PathBuf> {
    let caller = Location::caller();
    let doc = Sidecar {
        code_rev: code_rev(),
        callsite: Callsite {
            file: caller.file(),
            line: caller.line(),
        },
        footprint_version: footprint::VERSION,
        cfg,
        run,
        output: artifact.to_string_lossy().into_owned(),
    };
    let path = sidecar_path(artifact);
    crate::io::write_json(&path, &doc)?;
    tracing::debug!(path = %path.display(), "provenance");
    Ok(path)
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "artifact".into());
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// `GIT_COMMIT` (build time, then runtime), else `git rev-parse HEAD`, else "unknown".
pub fn code_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_owned)
        .into_iter()
        .chain(std::env::var("GIT_COMMIT").ok())
        .find(|rev| !rev.is_empty())
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_string())
}

fn git_head() -> Option<String> {
    let out = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    String::from_utf8(out.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}
