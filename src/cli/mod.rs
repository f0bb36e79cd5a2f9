//! Command-line interface module

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::discovery::{DiscoveryConfig, DiscoveryStats};
use crate::error::{DiscoveryError, ScoutResult};
use crate::formatter::OutputFormat;
use crate::parser::{parse_size_limit, JsonSource, ParseOptions};
use crate::sniffer::{DatePolicy, TypeTag};

pub mod path_mapping;

/// Main CLI arguments
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "fieldscout")]
#[command(about = "Discover typed field paths in JSON documents")]
#[command(version = "0.1.0")]
#[command(long_about = None)]
pub struct Args {
    /// Input JSON source (string, file, or directory)
    #[arg()]
    pub input: Option<String>,

    /// Output file, or output directory for directory input (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read JSON from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Walk the root as a single object (root.a.b paths)
    #[arg(long)]
    pub objects: bool,

    /// Elements sampled from each array (default: 10)
    #[arg(long)]
    pub sample_limit: Option<usize>,

    /// Which values count as dates (default: strict)
    #[arg(long, value_enum)]
    pub date_policy: Option<DatePolicyArg>,

    /// Also walk records inside nested arrays
    #[arg(long)]
    pub descend_arrays: bool,

    /// Maximum nesting depth (default: 1000)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// First segment of every field path (default: root)
    #[arg(long)]
    pub root: Option<String>,

    /// Name the array property in exploration-set paths (root.data[].id)
    #[arg(long)]
    pub qualify_sets: bool,

    /// Output format (default: text, or json for directory input)
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,

    /// Only list fields of these types (comma separated)
    #[arg(long = "type", value_delimiter = ',')]
    pub types: Vec<String>,

    /// Recursively process directories
    #[arg(long)]
    pub recursive: bool,

    /// Maximum size of one JSON document (e.g., 100MB, default: 100MB)
    #[arg(long)]
    pub max_input_size: Option<String>,

    /// Use SIMD-optimized JSON parser
    #[arg(long)]
    pub simd: bool,

    /// Print discovery statistics to stderr
    #[arg(long)]
    pub stats: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,

    /// Keep processing other files when one file fails
    #[arg(long)]
    pub continue_on_error: bool,

    /// Disable colored type badges
    #[arg(long)]
    pub no_color: bool,
}

/// Date policies for CLI
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum DatePolicyArg {
    #[value(name = "strict")]
    Strict,
    #[value(name = "lenient", alias = "legacy")]
    Lenient,
    #[value(name = "off")]
    Off,
}

impl From<DatePolicyArg> for DatePolicy {
    fn from(policy: DatePolicyArg) -> Self {
        match policy {
            DatePolicyArg::Strict => DatePolicy::Strict,
            DatePolicyArg::Lenient => DatePolicy::Lenient,
            DatePolicyArg::Off => DatePolicy::Off,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Format {
    #[value(name = "text", alias = "table")]
    Text,
    #[value(name = "json")]
    Json,
    #[value(name = "options")]
    Options,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Options => OutputFormat::Options,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub discovery_config: DiscoveryConfig,
    pub parse_options: ParseOptions,
    pub type_filter: Vec<TypeTag>,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> ScoutResult<Self> {
        let discovery_config = Self::create_discovery_config(&args)?;

        let max_input_size = match &args.max_input_size {
            Some(limit) => parse_size_limit(limit).map_err(DiscoveryError::configuration)?,
            None => crate::parser::DEFAULT_MAX_INPUT_SIZE,
        };
        let parse_options = ParseOptions {
            max_input_size,
            simd: args.simd,
        };

        let type_filter = args
            .types
            .iter()
            .filter(|t| !t.trim().is_empty())
            .map(|t| TypeTag::parse(t))
            .collect::<Result<Vec<_>, _>>()
            .map_err(DiscoveryError::configuration)?;

        Ok(Self {
            args,
            discovery_config,
            parse_options,
            type_filter,
        })
    }

    /// Create discovery configuration from CLI arguments
    fn create_discovery_config(args: &Args) -> ScoutResult<DiscoveryConfig> {
        let mut config = DiscoveryConfig::default()
            .with_check_objects(args.objects)
            .with_descend_arrays(args.descend_arrays)
            .with_qualified_sets(args.qualify_sets)
            .with_date_policy(args.date_policy.map(DatePolicy::from).unwrap_or_default());

        if let Some(limit) = args.sample_limit {
            config = config
                .with_sample_limit(limit)
                .map_err(DiscoveryError::configuration)?;
        }
        if let Some(depth) = args.max_depth {
            config = config.with_max_depth(Some(depth));
        }
        if let Some(root) = &args.root {
            config = config.with_root_label(root.as_str());
        }

        config.validate().map_err(DiscoveryError::configuration)?;
        Ok(config)
    }

    /// Resolve the input source from `--stdin` or the positional input
    pub fn source(&self) -> ScoutResult<JsonSource> {
        if self.args.stdin {
            Ok(JsonSource::Stdin)
        } else if let Some(input) = &self.args.input {
            Ok(JsonSource::from_input(input))
        } else {
            Err(DiscoveryError::configuration(
                "No input provided. Use --stdin or provide an input path",
            ))
        }
    }

    /// Output format, defaulting per input kind
    pub fn output_format(&self, directory_input: bool) -> OutputFormat {
        match self.args.format {
            Some(format) => format.into(),
            None if directory_input => OutputFormat::Json,
            None => OutputFormat::Text,
        }
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if stats output is requested
    pub fn want_stats(&self) -> bool {
        self.args.stats
    }

    /// Check if we should continue on error
    pub fn continue_on_error(&self) -> bool {
        self.args.continue_on_error
    }

    /// Whether text output should color its badges
    pub fn use_color(&self) -> bool {
        !self.args.no_color && self.args.output.is_none() && CliUtils::should_use_color()
    }
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the default level
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed (e.g. by tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Render discovery statistics as aligned lines
    pub fn format_stats(stats: &DiscoveryStats, field_count: usize, elapsed: Duration) -> String {
        [
            "Discovery Statistics:".to_string(),
            format!("Fields found: {}", field_count),
            format!("Elements sampled: {}", stats.elements_sampled),
            format!("Elements skipped: {}", stats.elements_skipped),
            format!("Exploration sets: {}", stats.exploration_sets),
            format!("Arrays truncated: {}", stats.arrays_truncated),
            format!("Depth-limited objects: {}", stats.depth_limited),
            format!("Duplicate fields dropped: {}", stats.duplicates_dropped),
            format!("Processing time: {}", Self::format_duration(elapsed)),
        ]
        .join("\n")
    }

    /// Create a progress bar for file processing
    pub fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
        let pb = indicatif::ProgressBar::new(total);
        let style = indicatif::ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("✓ {}", message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Show a warning message (if not in quiet mode)
    pub fn show_warning(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("⚠ {}", message);
        }
    }

    /// Check if output should be colored
    pub fn should_use_color() -> bool {
        atty::is(atty::Stream::Stdout) && std::env::var("NO_COLOR").is_err()
    }

    /// Whether a progress bar makes sense on this terminal
    pub fn is_interactive() -> bool {
        atty::is(atty::Stream::Stderr)
    }

    /// Get the terminal width, falling back to 80 columns
    pub fn terminal_width() -> usize {
        terminal_size::terminal_size()
            .map(|(width, _)| width.0 as usize)
            .unwrap_or(80)
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &DiscoveryError) {
    CliUtils::show_error(&error.user_message());

    if let DiscoveryError::Parse(parse) = error {
        if let Some(preview) = &parse.input_preview {
            eprintln!("\n{}", preview);
        }
    }

    if let Some(hint) = error.hint() {
        eprintln!("\nTip: {}", hint);
    }

    eprintln!("\nTry 'fieldscout --help' for usage information.");
}
