use crate::config::Config;
use crate::formatter::OutputFormat;
use crate::handlers::CalculateOptions;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kuota-calc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Calculate the resource quota needs of your deployment(s)")]
#[command(
    long_about = "Reads Kubernetes and OpenShift workload manifests and calculates the CPU and memory quota they need, including the extra pods that exist while a rollout is in progress.",
    after_help = "Examples:\n    # pipe manifests into kuota-calc (also works as a kubectl plugin)\n    cat deployment.yaml | kuota-calc\n\n    # detailed output, at most two rollouts at a time\n    kuota-calc --detailed --max-rollouts 2 manifests/*.yaml"
)]
pub struct Cli {
    /// Manifest files to read. Reads stdin when empty or `-`
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Print a table with the usage of every workload
    #[arg(long)]
    pub detailed: bool,

    /// Limit the simultaneous rollout to the n most expensive rollouts per resource
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub max_rollouts: Option<i64>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Continue with the remaining documents after a calculation error
    #[arg(short, long)]
    pub keep_going: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Enable debug logging (same as -vv)
    #[arg(long, hide = true)]
    pub debug: bool,

    /// Suppress all log output
    #[arg(short, long, conflicts_with_all = ["verbose", "debug"])]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let verbose = if self.debug { self.verbose.max(2) } else { self.verbose };
        let level = match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }

    /// Merge the command line with the loaded configuration. Flags win over
    /// file values.
    pub fn calculate_options(&self, config: &Config) -> CalculateOptions {
        CalculateOptions {
            files: self.files.clone(),
            detailed: self.detailed || config.output.detailed,
            max_rollouts: self
                .max_rollouts
                .unwrap_or(config.calculation.max_rollouts),
            format: self.format.unwrap_or(config.output.format),
            keep_going: self.keep_going || config.calculation.keep_going,
            color: !self.no_color && config.output.color,
        }
    }
}
