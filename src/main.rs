mod app;
mod brain;
mod graph;
mod util;

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::brain::{Document, load_documents};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Directory holding the markdown documents [default: $HOME/clawd/brain]
    #[arg(long, env = "BRAIN_PATH")]
    brain_path: Option<PathBuf>,

    /// Print the document graph as JSON and exit
    #[arg(long)]
    export_graph: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn default_brain_path() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join("clawd")
        .join("brain")
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn export_graph(brain_path: &Path) -> anyhow::Result<()> {
    let documents = load_documents(brain_path)
        .with_context(|| format!("failed to load brain at {}", brain_path.display()))?;
    let refs = documents.iter().map(Document::to_ref).collect::<Vec<_>>();
    let model = graph::build_graph(&refs);

    let json = serde_json::to_string_pretty(&model).context("failed to serialize graph")?;
    println!("{json}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let brain_path = args.brain_path.unwrap_or_else(default_brain_path);
    tracing::info!(path = %brain_path.display(), "using brain");

    if args.export_graph {
        return export_graph(&brain_path);
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "brain-graph",
        options,
        Box::new(move |cc| Ok(Box::new(app::BrainGraphApp::new(cc, brain_path)))),
    )
    .map_err(|error| anyhow::anyhow!("failed to run the viewer: {error}"))
}
