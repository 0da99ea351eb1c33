//! klighd-interactive CLI entry point.
//!
//! Replays interactive-layout decisions against JSON scene snapshots.

use std::fs;
use std::io::{self, Write};
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use klighd_interactive::{
    InteractionConfig, Point, Size, Viewport, layers_of, parse_scene, region_states,
    simulate_drop,
};

/// Interactive constraint layout decisions for diagram scenes.
#[derive(Parser, Debug)]
#[command(
    name = "klighd-interactive",
    version = env!("KLIGHD_INTERACTIVE_VERSION"),
    about = "Interactive constraint layout decisions for diagram scenes"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long = "output", global = true)]
    output: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drag a node to a point and print the resulting action
    Drop(DropArgs),
    /// Print the layer bands of a layered level
    Layers {
        /// Scene JSON file
        scene: String,
        /// Id of the node whose children form the level (defaults to the root)
        #[arg(long = "parent")]
        parent: Option<String>,
    },
    /// Run expand/collapse for a viewport and print region states
    Regions(RegionArgs),
}

#[derive(Args, Debug)]
struct DropArgs {
    /// Scene JSON file
    scene: String,
    /// Id of the dragged node
    #[arg(long = "node")]
    node: String,
    /// Drop point x (diagram coordinates)
    #[arg(long = "x", allow_hyphen_values = true)]
    x: f64,
    /// Drop point y (diagram coordinates)
    #[arg(long = "y", allow_hyphen_values = true)]
    y: f64,
    /// Emit relative in-layer constraints for layered levels
    #[arg(long = "relative")]
    relative: bool,
}

#[derive(Args, Debug)]
struct RegionArgs {
    /// Scene JSON file
    scene: String,
    #[arg(long = "zoom", default_value = "1.0")]
    zoom: f64,
    #[arg(long = "scroll-x", default_value = "0", allow_hyphen_values = true)]
    scroll_x: f64,
    #[arg(long = "scroll-y", default_value = "0", allow_hyphen_values = true)]
    scroll_y: f64,
    /// Canvas width in pixels
    #[arg(long = "width", default_value = "800")]
    width: f64,
    /// Canvas height in pixels
    #[arg(long = "height", default_value = "600")]
    height: f64,
    /// Full-detail threshold (fraction of the viewport)
    #[arg(long = "threshold")]
    threshold: Option<f64>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_scene(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", path, e);
            process::exit(1);
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

fn run(command: &Command) -> Result<String, String> {
    match command {
        Command::Drop(args) => {
            let text = read_scene(&args.scene);
            let config = InteractionConfig {
                relative_constraints: args.relative,
                ..InteractionConfig::default()
            };
            let action = simulate_drop(&text, &args.node, Point::new(args.x, args.y), &config)
                .map_err(|e| e.to_string())?;
            Ok(to_json(&action))
        }
        Command::Layers { scene, parent } => {
            let text = read_scene(scene);
            let scene = parse_scene(&text).map_err(|e| e.to_string())?;
            let parent = parent.clone().unwrap_or_else(|| scene.root_id().to_string());
            let layers = layers_of(&scene, &parent).map_err(|e| e.to_string())?;
            Ok(to_json(&layers))
        }
        Command::Regions(args) => {
            let text = read_scene(&args.scene);
            let scene = parse_scene(&text).map_err(|e| e.to_string())?;
            let mut config = InteractionConfig::default();
            if let Some(t) = args.threshold {
                config.full_detail_threshold = t;
            }
            let viewport = Viewport {
                scroll: Point::new(args.scroll_x, args.scroll_y),
                zoom: args.zoom,
                canvas: Size::new(args.width, args.height),
            };
            Ok(to_json(&region_states(&scene, &viewport, &config)))
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let rendered = match run(&cli.command) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    if let Some(ref path) = cli.output {
        if let Err(e) = fs::write(path, format!("{}\n", rendered)) {
            eprintln!("error: cannot write '{}': {}", path, e);
            process::exit(1);
        }
    } else {
        println!("{}", rendered);
        if let Err(e) = io::stdout().flush() {
            eprintln!("error: cannot flush stdout: {}", e);
            process::exit(1);
        }
    }
}
