use clap::Parser;
use std::path::PathBuf;

/// Compile tersecss sources into a stylesheet
#[derive(Parser, Debug)]
#[command(name = "tersecss")]
#[command(about = "Compile tersecss sources into a stylesheet")]
#[command(version)]
pub struct Args {
    /// Source units to compile, in order (overrides `build.inputs`)
    pub inputs: Vec<PathBuf>,

    /// Write the stylesheet here instead of stdout (overrides `build.output`)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Configuration file (defaults to ./tersecss.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// More logging; repeat for debug and trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Append log lines to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
