//! Footprint input/output and the optional JSON config file.
//!
//! Inputs
//! - JSON: `[{"id": "...", "points": [[x, y], ...]}]`.
//! - CSV or Parquet: columns `id, x, y`, one vertex per row in boundary
//!   order. Rows are grouped by `id` in order of first appearance.

use anyhow::{bail, Context, Result};
use footprint::prelude::*;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One footprint as stored on disk.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FootprintRecord {
    pub id: String,
    pub points: Vec<[f64; 2]>,
    /// Bumps placed by the sampler; ignored on input.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bumps: Vec<String>,
}

impl FootprintRecord {
    pub fn to_polygon(&self) -> Result<Polygon> {
        let pts: Vec<Vec2<f64>> = self.points.iter().map(|p| Vec2::new(p[0], p[1])).collect();
        Polygon::from_points(&pts).with_context(|| format!("footprint {}", self.id))
    }
}

/// Detection result for one footprint.
#[derive(Debug, Serialize)]
pub struct DetectionRecord {
    pub id: String,
    pub edges: usize,
    pub small_ran: bool,
    pub spans: Vec<SpanRecord>,
    pub tags: Vec<Option<&'static str>>,
}

#[derive(Debug, Serialize)]
pub struct SpanRecord {
    pub start: usize,
    pub end: usize,
    pub class: &'static str,
}

impl From<&FeatureSpan> for SpanRecord {
    fn from(s: &FeatureSpan) -> Self {
        Self {
            start: s.start.0,
            end: s.end.0,
            class: s.class.as_str(),
        }
    }
}

/// Read footprints, dispatching on the file extension.
pub fn read_footprints(path: &Path) -> Result<Vec<FootprintRecord>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => read_json(path),
        Some("csv") => read_csv(path),
        Some("parquet") => read_parquet(path),
        _ => bail!(
            "unsupported input {} (expected .json, .csv or .parquet)",
            path.display()
        ),
    }
}

pub fn read_json(path: &Path) -> Result<Vec<FootprintRecord>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

pub fn read_csv(path: &Path) -> Result<Vec<FootprintRecord>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()?
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    tracing::debug!(rows = df.height(), cols = df.width(), "input_csv_shape");
    group_vertices(&df, path)
}

pub fn read_parquet(path: &Path) -> Result<Vec<FootprintRecord>> {
    let df = LazyFrame::scan_parquet(path, ScanArgsParquet::default())?
        .select([col("id"), col("x"), col("y")])
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    tracing::debug!(rows = df.height(), "input_parquet_shape");
    group_vertices(&df, path)
}

fn group_vertices(df: &DataFrame, path: &Path) -> Result<Vec<FootprintRecord>> {
    let ids = df.column("id")?.cast(&DataType::String)?;
    let xs = df.column("x")?.cast(&DataType::Float64)?;
    let ys = df.column("y")?.cast(&DataType::Float64)?;

    let mut out: Vec<FootprintRecord> = Vec::new();
    let mut slot: HashMap<String, usize> = HashMap::new();
    let rows = ids.str()?.into_iter().zip(xs.f64()?).zip(ys.f64()?);
    for (row, ((id, x), y)) in rows.enumerate() {
        let (Some(id), Some(x), Some(y)) = (id, x, y) else {
            bail!("{}: missing value in row {row}", path.display());
        };
        let k = *slot.entry(id.to_string()).or_insert_with(|| {
            out.push(FootprintRecord {
                id: id.to_string(),
                points: Vec::new(),
                bumps: Vec::new(),
            });
            out.len() - 1
        });
        out[k].points.push([x, y]);
    }
    Ok(out)
}

/// Write any serializable value as pretty JSON, creating parent dirs.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

/// Config file contents; missing keys keep the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CfgFile {
    pub sin_lo: Option<f64>,
    pub sin_me: Option<f64>,
    pub sin_hi: Option<f64>,
    pub length_thresh: Option<f64>,
    pub curvy_length_factor: Option<f64>,
}

impl CfgFile {
    pub fn apply(self, base: FeatureCfg) -> FeatureCfg {
        FeatureCfg {
            sin_lo: self.sin_lo.unwrap_or(base.sin_lo),
            sin_me: self.sin_me.unwrap_or(base.sin_me),
            sin_hi: self.sin_hi.unwrap_or(base.sin_hi),
            length_thresh: self.length_thresh.unwrap_or(base.length_thresh),
            curvy_length_factor: self.curvy_length_factor.unwrap_or(base.curvy_length_factor),
        }
    }
}

/// Defaults, overlaid with `path` when given, then validated.
pub fn load_cfg(path: Option<&Path>) -> Result<FeatureCfg> {
    let cfg = match path {
        Some(p) => {
            let bytes = fs::read(p).with_context(|| format!("reading config {}", p.display()))?;
            let file: CfgFile = serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing config {}", p.display()))?;
            file.apply(FeatureCfg::default())
        }
        None => FeatureCfg::default(),
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Serialized form of the effective detector config.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CfgRecord {
    pub sin_lo: f64,
    pub sin_me: f64,
    pub sin_hi: f64,
    pub length_thresh: f64,
    pub curvy_length_factor: f64,
}

impl From<&FeatureCfg> for CfgRecord {
    fn from(cfg: &FeatureCfg) -> Self {
        Self {
            sin_lo: cfg.sin_lo,
            sin_me: cfg.sin_me,
            sin_hi: cfg.sin_hi,
            length_thresh: cfg.length_thresh,
            curvy_length_factor: cfg.curvy_length_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn json_records_parse() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fp.json");
        fs::write(
            &path,
            r#"[{"id": "a", "points": [[0, 0], [4, 0], [4, 3], [0, 3]]}]"#,
        )
        .unwrap();
        let recs = read_footprints(&path).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].id, "a");
        assert_eq!(recs[0].to_polygon().unwrap().len(), 4);
    }

    #[test]
    fn csv_rows_group_by_first_appearance() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fp.csv");
        fs::write(
            &path,
            "id,x,y\nb,0,0\nb,1,0\na,0,0\nb,1,1\na,2,0\na,2,2\nb,0,1\n",
        )
        .unwrap();
        let recs = read_footprints(&path).unwrap();
        let ids: Vec<&str> = recs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(
            recs[0].points,
            vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
        );
        assert_eq!(recs[1].points.len(), 3);
    }

    #[test]
    fn degenerate_footprint_names_its_id() {
        let rec = FootprintRecord {
            id: "tiny".into(),
            points: vec![[0.0, 0.0], [1.0, 0.0]],
            bumps: Vec::new(),
        };
        let err = rec.to_polygon().unwrap_err();
        assert!(format!("{err:#}").contains("tiny"));
    }

    #[test]
    fn parquet_rows_group_like_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fp.parquet");
        let mut df = polars::df!(
            "id" => ["q", "q", "q", "p", "p", "p"],
            "x" => [0.0, 3.0, 0.0, 0.0, 1.0, 1.0],
            "y" => [0.0, 0.0, 3.0, 0.0, 0.0, 1.0],
        )
        .unwrap();
        let file = fs::File::create(&path).unwrap();
        ParquetWriter::new(file).finish(&mut df).unwrap();
        let recs = read_footprints(&path).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].id, "q");
        assert_eq!(recs[1].points, vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(read_footprints(Path::new("fp.geojson")).is_err());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, r#"{"length_thresh": 2.0}"#).unwrap();
        let cfg = load_cfg(Some(&path)).unwrap();
        let def = FeatureCfg::default();
        assert_eq!(cfg.length_thresh, 2.0);
        assert_eq!(cfg.sin_me, def.sin_me);
        assert_eq!(cfg.curvy_length_factor, def.curvy_length_factor);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, r#"{"sin_lo": 0.9}"#).unwrap();
        assert!(load_cfg(Some(&path)).is_err());
        fs::write(&path, r#"{"sin_low": 0.1}"#).unwrap();
        assert!(load_cfg(Some(&path)).is_err());
    }
}
