use clap::Parser;
use std::path::PathBuf;

/// Kalman point stabilizer: replays a simulated noisy sensor through the filter.
///
/// This struct defines the command-line arguments of the `stabilizer_sim` binary.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(short, long, default_value = "assets/scenarios/point_circle.toml")]
    pub scenario: PathBuf,

    /// Override the number of cycles from the scenario.
    #[arg(long)]
    pub steps: Option<usize>,

    /// Override the sensor noise seed from the scenario.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write per-cycle CSV here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only print the summary, no per-cycle rows. Cannot be combined with `--output`.
    #[arg(long, default_value_t = false, conflicts_with = "output")]
    pub summary_only: bool,

    /// Print the default scenario as TOML and exit.
    #[arg(long, default_value_t = false)]
    pub dump_default: bool,

    /// Only log warnings and errors.
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}
