use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use roiplace::geom2::solve_anchor_transform;
use roiplace::layout::BaselineLayout;
use roiplace::placement::{move_region_to, AlignmentContext, AnchorChoice};
use roiplace::trace::{TraceSink, TracingSink};
use roiplace::{AnchorPair, Vec2};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Re-place layout regions onto detected master anchors")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Place every region of a layout and write the placed layout as JSON
    Place {
        #[command(flatten)]
        detect: Detected,
        #[command(flatten)]
        flags: ModeFlags,
        /// Image the anchors were detected in (selects per-image baselines)
        #[arg(long)]
        image_key: Option<String>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Move a single region and print it as JSON
    Move {
        #[command(flatten)]
        detect: Detected,
        #[command(flatten)]
        flags: ModeFlags,
        /// Region id to move
        #[arg(long)]
        id: String,
        /// Anchor override; defaults to the layout's choice for the region
        #[arg(long, value_parser = parse_anchor)]
        anchor: Option<AnchorChoice>,
    },
    /// Print the transform solved from a baseline and a detected anchor pair
    Solve {
        #[arg(long, value_parser = parse_point)]
        base_m1: Vec2,
        #[arg(long, value_parser = parse_point)]
        base_m2: Vec2,
        #[arg(long, value_parser = parse_point)]
        m1: Vec2,
        #[arg(long, value_parser = parse_point)]
        m2: Vec2,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args)]
struct Detected {
    /// Baseline layout JSON
    #[arg(long)]
    layout: PathBuf,
    /// Detected first anchor, `x,y`
    #[arg(long, value_parser = parse_point)]
    m1: Vec2,
    /// Detected second anchor, `x,y`
    #[arg(long, value_parser = parse_point)]
    m2: Vec2,
}

/// Overrides for the layout's analyze flags.
#[derive(Args)]
struct ModeFlags {
    #[arg(long)]
    disable_rot: Option<bool>,
    #[arg(long)]
    scale_lock: Option<bool>,
}

impl ModeFlags {
    fn apply(&self, layout: &mut BaselineLayout) {
        if let Some(v) = self.disable_rot {
            layout.analyze.disable_rot = v;
        }
        if let Some(v) = self.scale_lock {
            layout.analyze.scale_lock = v;
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Place {
            detect,
            flags,
            image_key,
            out,
        } => run_place(&detect, &flags, image_key, &out),
        Action::Move {
            detect,
            flags,
            id,
            anchor,
        } => run_move(&detect, &flags, &id, anchor),
        Action::Solve {
            base_m1,
            base_m2,
            m1,
            m2,
        } => solve(AnchorPair::new(base_m1, base_m2), AnchorPair::new(m1, m2)),
        Action::Report => report(),
    }
}

fn load_layout(path: &Path, flags: &ModeFlags) -> Result<BaselineLayout> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut layout = BaselineLayout::from_json_str(&text)
        .with_context(|| format!("loading layout {}", path.display()))?;
    flags.apply(&mut layout);
    Ok(layout)
}

fn run_place(
    detect: &Detected,
    flags: &ModeFlags,
    image_key: Option<String>,
    out: &Path,
) -> Result<()> {
    let layout = load_layout(&detect.layout, flags)?;
    let mut input = layout.placement_input(AnchorPair::new(detect.m1, detect.m2))?;
    input.image_key = image_key;
    tracing::info!(
        layout = %detect.layout.display(),
        regions = layout.masters.len() + layout.dependents.len(),
        "place"
    );

    let output = layout.place(&input);
    TracingSink.emit(&output.trace);

    let placed = BaselineLayout {
        masters: output.placed_masters,
        dependents: output.placed_dependents,
        anchors: layout.anchors.clone(),
        analyze: layout.analyze,
        inspection_baselines_by_image: Default::default(),
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(out, placed.to_json_string()?)
        .with_context(|| format!("writing {}", out.display()))?;

    let payload = provenance::Payload::new(json!({
        "layout": detect.layout.to_string_lossy(),
        "input": input,
    }))
    .with_trace(&output.trace)?;
    provenance::write_sidecar(out, payload)?;
    Ok(())
}

fn run_move(
    detect: &Detected,
    flags: &ModeFlags,
    id: &str,
    anchor: Option<AnchorChoice>,
) -> Result<()> {
    let layout = load_layout(&detect.layout, flags)?;
    let baseline = layout.find(id)?;
    let anchor = anchor.unwrap_or_else(|| layout.anchor_for(id));
    let ctx = AlignmentContext::solve(
        layout.baseline_anchors()?,
        AnchorPair::new(detect.m1, detect.m2),
        layout.analyze.scale_lock,
        layout.analyze.disable_rot,
    );
    let outcome = move_region_to(baseline, anchor, &ctx);
    TracingSink.emit_move(&outcome.trace);
    println!("{}", serde_json::to_string_pretty(&outcome.region)?);
    Ok(())
}

fn solve(base: AnchorPair, detected: AnchorPair) -> Result<()> {
    let t = solve_anchor_transform(&base, &detected);
    tracing::info!(scale = t.scale, angle_delta_deg = t.angle_delta_deg(), "solve");
    let obj = json!({
        "dist_base": t.dist_base,
        "dist_det": t.dist_det,
        "scale": t.scale,
        "angle_delta_rad": t.angle_delta_rad,
        "angle_delta_deg": t.angle_delta_deg(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "version": roiplace::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

/// Parse `x,y` into a point.
fn parse_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("bad coordinate `{v}`: {e}"))
    };
    Ok(Vec2::new(parse(x)?, parse(y)?))
}

fn parse_anchor(s: &str) -> Result<AnchorChoice, String> {
    match s.to_ascii_lowercase().as_str() {
        "master1" | "m1" => Ok(AnchorChoice::Master1),
        "master2" | "m2" => Ok(AnchorChoice::Master2),
        "mid" => Ok(AnchorChoice::Mid),
        _ => Err(format!("unknown anchor `{s}` (master1, master2, mid)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const LAYOUT: &str = r#"{
        "masters": [
            {"id": "m1", "role": "Master1Pattern", "shape": "Rectangle", "x": 0, "y": 0, "width": 10, "height": 10},
            {"id": "m2", "role": "Master2Pattern", "shape": "Rectangle", "x": 10, "y": 0, "width": 10, "height": 10}
        ],
        "dependents": [
            {"id": "r1", "shape": "Rectangle", "x": 4, "y": 1, "width": 6, "height": 8, "angle_deg": 12}
        ],
        "anchors": {"r1": "Master1"}
    }"#;

    #[test]
    fn parse_point_accepts_spaces_and_rejects_garbage() {
        assert_eq!(parse_point("1.5, -2").unwrap(), Vec2::new(1.5, -2.0));
        assert!(parse_point("1.5").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn parse_anchor_names() {
        assert_eq!(parse_anchor("Master2").unwrap(), AnchorChoice::Master2);
        assert_eq!(parse_anchor("m1").unwrap(), AnchorChoice::Master1);
        assert_eq!(parse_anchor("MID").unwrap(), AnchorChoice::Mid);
        assert!(parse_anchor("m3").is_err());
    }

    #[test]
    fn place_writes_layout_and_sidecar() {
        let dir = tempdir().unwrap();
        let layout_path = dir.path().join("baseline.json");
        fs::write(&layout_path, LAYOUT).unwrap();
        let out = dir.path().join("placed").join("shot.json");
        let detect = Detected {
            layout: layout_path,
            m1: Vec2::new(5.0, 5.0),
            m2: Vec2::new(15.0, 5.0),
        };
        let flags = ModeFlags {
            disable_rot: Some(true),
            scale_lock: None,
        };
        run_place(&detect, &flags, Some("shot.png".into()), &out).unwrap();

        let placed = BaselineLayout::from_json_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(placed.dependents[0].center(), Vec2::new(9.0, 6.0));
        assert_eq!(placed.dependents[0].angle_deg, 12.0);
        assert_eq!(placed.masters[0].center(), Vec2::new(5.0, 5.0));
        assert!(placed.analyze.disable_rot);
        assert!(out.with_file_name("shot.provenance.json").exists());
    }

    #[test]
    fn load_layout_reports_missing_file() {
        let dir = tempdir().unwrap();
        let flags = ModeFlags {
            disable_rot: None,
            scale_lock: None,
        };
        let err = load_layout(&dir.path().join("missing.json"), &flags).unwrap_err();
        assert!(err.to_string().starts_with("reading "));
    }
}
