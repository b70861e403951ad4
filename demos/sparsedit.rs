//! Command-line front end for sparsedit
//!
//! Loads a reconstruction directory, runs a lasso selection through the same
//! pointer state machine an interactive viewer would drive, and writes the
//! edited reconstruction back out.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sparsedit_io::{read_reconstruction, ReconstructionPaths, TextReadOptions};
use sparsedit_viewport::{
    EditorConfig, EditorSession, PointerButton, PointerEvent, PointerOutcome, ScreenPoint,
    SelectionTarget, ShapeMode,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sparsedit", version, about = "Inspect and edit sparse reconstructions")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print counts and bounds of a reconstruction
    Info {
        /// Directory holding cameras.txt, images.txt and points3D.txt
        dir: PathBuf,
    },
    /// Select with a lasso, optionally invert and delete, then export
    Select(SelectArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    Points,
    Cameras,
}

impl From<Target> for SelectionTarget {
    fn from(target: Target) -> Self {
        match target {
            Target::Points => SelectionTarget::Points,
            Target::Cameras => SelectionTarget::Cameras,
        }
    }
}

#[derive(clap::Args)]
struct SelectArgs {
    /// Input reconstruction directory
    dir: PathBuf,

    /// Output directory, created if missing
    #[arg(long)]
    out: PathBuf,

    #[arg(long, value_enum, default_value = "points")]
    target: Target,

    /// Rectangle lasso from one corner to the other, in window pixels
    #[arg(
        long,
        num_args = 4,
        value_names = ["X0", "Y0", "X1", "Y1"],
        allow_negative_numbers = true,
        conflicts_with = "polygon",
        required_unless_present = "polygon"
    )]
    rect: Option<Vec<f64>>,

    /// Polygon lasso vertices as X,Y pairs, in window pixels
    #[arg(long, num_args = 1.., value_parser = parse_vertex, allow_negative_numbers = true)]
    polygon: Option<Vec<ScreenPoint>>,

    /// Invert the selection before deleting
    #[arg(long)]
    invert: bool,

    /// Delete the selected entities
    #[arg(long)]
    delete: bool,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    /// JSON editor configuration
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_vertex(s: &str) -> std::result::Result<ScreenPoint, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in '{s}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in '{s}': {e}"))?;
    Ok(ScreenPoint::new(x, y))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Info { dir } => info(&dir),
        Command::Select(args) => select(args),
    }
}

fn info(dir: &Path) -> Result<()> {
    let reconstruction = read_reconstruction(&ReconstructionPaths::in_dir(dir), &TextReadOptions::default())
        .with_context(|| format!("failed to load reconstruction from {}", dir.display()))?;

    println!("cameras: {}", reconstruction.num_cameras());
    println!("images:  {}", reconstruction.num_images());
    println!("points:  {}", reconstruction.num_points());
    match reconstruction.bounds() {
        Some(bounds) => {
            let (min, max) = (bounds.min, bounds.max);
            println!("bounds:  [{}, {}, {}] .. [{}, {}, {}]", min.x, min.y, min.z, max.x, max.y, max.z);
            println!("radius:  {}", bounds.radius());
        }
        None => println!("bounds:  none"),
    }
    Ok(())
}

fn select(args: SelectArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => EditorConfig::from_json_file(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => EditorConfig::default(),
    };

    let mut session = EditorSession::new(&config, args.width, args.height);
    session
        .import_dir(&args.dir)
        .with_context(|| format!("failed to load reconstruction from {}", args.dir.display()))?;

    let target = SelectionTarget::from(args.target);
    session.set_target(target);

    let events = match (&args.rect, &args.polygon) {
        (Some(rect), _) => {
            session.set_shape_mode(ShapeMode::Rectangle);
            rectangle_gesture(rect)?
        }
        (None, Some(vertices)) => {
            session.set_shape_mode(ShapeMode::Polygon);
            polygon_gesture(vertices)
        }
        (None, None) => bail!("either --rect or --polygon is required"),
    };

    let mut selected = 0;
    for event in &events {
        if let PointerOutcome::Selected { count, .. } = session.handle_pointer(event) {
            selected = count;
        }
    }
    log::info!("lasso selected {} {:?}", selected, target);

    if args.invert {
        session.invert_selection();
        log::info!(
            "inverted selection holds {}",
            session.selection().selected(target).len()
        );
    }

    if let Some(reconstruction) = session.reconstruction() {
        let positions = session.selection().selected(target);
        match target {
            SelectionTarget::Points => {
                println!("selected point ids: {:?}", reconstruction.point_ids_at(positions))
            }
            SelectionTarget::Cameras => {
                println!("selected image ids: {:?}", reconstruction.image_ids_at(positions))
            }
        }
    }

    if args.delete {
        let removed = session.delete_selection();
        println!("deleted {removed}");
    }

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create {}", args.out.display()))?;
    session
        .export_dir(&args.out)
        .with_context(|| format!("failed to export to {}", args.out.display()))?;
    println!("wrote {}", args.out.display());
    Ok(())
}

/// Press at one corner, drag to the other and release there
fn rectangle_gesture(rect: &[f64]) -> Result<Vec<PointerEvent>> {
    let &[x0, y0, x1, y1] = rect else {
        bail!("--rect takes exactly four values");
    };
    let start = ScreenPoint::new(x0, y0);
    let end = ScreenPoint::new(x1, y1);
    Ok(vec![
        PointerEvent::Press {
            button: PointerButton::Primary,
            position: start,
        },
        PointerEvent::Motion {
            position: end,
            primary_down: true,
        },
        PointerEvent::Release {
            button: PointerButton::Primary,
            position: end,
        },
    ])
}

/// One primary press per vertex, closed by a secondary press
fn polygon_gesture(vertices: &[ScreenPoint]) -> Vec<PointerEvent> {
    let mut events: Vec<PointerEvent> = vertices
        .iter()
        .map(|&position| PointerEvent::Press {
            button: PointerButton::Primary,
            position,
        })
        .collect();
    if let Some(&last) = vertices.last() {
        events.push(PointerEvent::Press {
            button: PointerButton::Secondary,
            position: last,
        });
    }
    events
}
