//! Print detected features for a few synthetic footprints.
//!
//! Usage:
//!   cargo run -p footprint --example bumped_footprint -- bumped
//!   cargo run -p footprint --example bumped_footprint -- round

use footprint::prelude::*;
use footprint::sample::ReplayToken;
use footprint::symbols::{encode_small, render};

fn main() {
    let mode = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "bumped".to_string());
    let shape = match mode.as_str() {
        "bumped" => FootprintShape::Rectilinear {
            bumps: 4,
            rounded_corner: Some(4),
        },
        "round" => FootprintShape::Round { segments: 24 },
        _ => {
            eprintln!("usage: bumped_footprint [bumped|round]");
            return;
        }
    };
    let fcfg = FootprintCfg {
        shape,
        ..FootprintCfg::default()
    };
    let cfg = FeatureCfg::default();
    for index in 0..3 {
        let mut fp = draw_footprint(&fcfg, ReplayToken { seed: 2025, index }).unwrap();
        let symbols = render(&encode_small(&extract_attributes(&fp.polygon), &cfg));
        let spans = detect_and_annotate(&mut fp.polygon, &cfg);
        println!("sample {index}: N={} symbols={symbols}", fp.polygon.len());
        for s in &spans {
            println!(
                "  {:<12} edges {}..={} ({} edges)",
                s.class.as_str(),
                s.start.0,
                s.end.0,
                s.edge_count(fp.polygon.len())
            );
        }
    }
}
