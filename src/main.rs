//! parallax-snap - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Parallax cover-header scroll demo with snap-to-position gestures
#[derive(Parser, Debug)]
#[command(name = "parallax-snap")]
#[command(version)]
#[command(about = "Drag the cover header with the mouse; it snaps open, peeking, or collapsed")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Display width the zone thresholds derive from (defaults to terminal width)
    #[arg(short = 'w', long, value_parser = clap::value_parser!(u16).range(1..))]
    pub display_width: Option<u16>,

    /// Number of content rows below the cover image
    #[arg(short = 'r', long, value_parser = clap::value_parser!(u16).range(1..))]
    pub content_rows: Option<u16>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = parallax_snap::config::load_config_with_precedence(args.config.clone())?;
        let merged = parallax_snap::config::merge_config(config_file);
        let with_env = parallax_snap::config::apply_env_overrides(merged);
        parallax_snap::config::apply_cli_overrides(with_env, args.display_width, args.content_rows)
    };

    parallax_snap::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    parallax_snap::view::run_with_config(&config)?;

    Ok(())
}
