//! morphcurves CLI — convert blendshape captures into runtime curve documents.
//!
//! Usage:
//!   morphcurves convert <CSV>    Convert a capture table to curve JSON
//!   morphcurves info <JSON>      Show curve document information
//!   morphcurves bake <JSON>      Bake curves into frame keyframes

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use morphcurves_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "morphcurves",
    about = "Blendshape capture to animation curve converter",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON config file with conversion and logging defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a capture CSV into a curve document
    Convert {
        /// Path to the capture CSV
        input: PathBuf,

        /// Output JSON path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Frame rate of the timecode frame field
        #[arg(long)]
        timecode_fps: Option<f64>,

        /// Playback fps written to the document
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        playback_fps: Option<u32>,
    },

    /// Show curve document information
    Info {
        /// Path to the curve document
        path: PathBuf,
    },

    /// Bake a curve document into frame keyframes
    Bake {
        /// Path to the curve document
        path: PathBuf,

        /// Output JSON path
        #[arg(short, long, default_value = "morph_keys.json")]
        output: PathBuf,

        /// Channel mapping CSV (ARKit,Targets)
        #[arg(long)]
        mapping: Option<PathBuf>,

        /// Playback speed ratio
        #[arg(long, default_value = "1.0")]
        speed_ratio: f64,

        /// Play once instead of looping
        #[arg(long)]
        no_loop: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = cli
        .config
        .as_deref()
        .map(AppConfig::load_from)
        .unwrap_or_default();

    // Initialize logging
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    morphcurves_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Convert {
            input,
            output,
            timecode_fps,
            playback_fps,
        } => commands::convert::run(
            input,
            output.unwrap_or(config.conversion.output),
            timecode_fps.unwrap_or(config.conversion.timecode_fps),
            playback_fps.unwrap_or(config.conversion.playback_fps),
        ),
        Commands::Info { path } => commands::info::run(path),
        Commands::Bake {
            path,
            output,
            mapping,
            speed_ratio,
            no_loop,
        } => commands::bake::run(path, output, mapping, speed_ratio, !no_loop),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_rejects_zero_playback_fps() {
        let args = ["morphcurves", "convert", "in.csv", "--playback-fps", "0"];
        let err = Cli::try_parse_from(args)
            .err()
            .expect("zero playback fps should be rejected");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_convert_accepts_positive_playback_fps() {
        let args = ["morphcurves", "convert", "in.csv", "--playback-fps", "30"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Convert { playback_fps, .. } => assert_eq!(playback_fps, Some(30)),
            _ => panic!("expected convert"),
        }
    }
}
