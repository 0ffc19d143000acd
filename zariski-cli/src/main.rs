//! Zariski CLI - Command-line interface for the zariski exact algebra engine

mod format;
mod input;
mod processor;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use zariski_math::monomial::MonomialOrder;
use zariski_math::parse::parse_order;

use format::{eprintln_colored, render};
use processor::{EngineSettings, run_closure, run_determinant, run_groebner, run_inverse};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct CliConfig {
    /// Default monomial order
    #[serde(default)]
    order: Option<String>,
    /// Default Buchberger iteration cap
    #[serde(default)]
    max_iterations: Option<usize>,
    /// Default verbosity level
    #[serde(default)]
    verbosity: Option<String>,
    /// Default output format
    #[serde(default)]
    format: Option<String>,
    /// Enable colors by default
    #[serde(default)]
    color: Option<bool>,
}

impl CliConfig {
    /// Load configuration from `explicit`, or from the user config directory.
    ///
    /// A missing or unreadable default file is ignored; an explicit path must
    /// exist and parse.
    fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            return serde_yaml::from_str(&contents)
                .with_context(|| format!("invalid config {}", path.display()));
        }

        let config_path = dirs::config_dir().map(|mut p| {
            p.push("zariski");
            p.push("config.yaml");
            p
        });

        if let Some(path) = config_path
            && path.exists()
            && let Ok(contents) = fs::read_to_string(&path)
            && let Ok(config) = serde_yaml::from_str(&contents)
        {
            return Ok(config);
        }

        Ok(Self::default())
    }

    /// Merge configuration with command-line arguments
    fn merge_with_args(&self, args: &mut Args) -> Result<()> {
        // Only apply config if arg is not explicitly set
        if args.verbosity == Verbosity::Normal
            && let Some(ref v) = self.verbosity
        {
            args.verbosity = Verbosity::from_str(v, true)
                .map_err(|e| anyhow::anyhow!("invalid verbosity '{v}' in config: {e}"))?;
        }

        if args.format.is_none()
            && let Some(ref f) = self.format
        {
            args.format = Some(
                OutputFormat::from_str(f, true)
                    .map_err(|e| anyhow::anyhow!("invalid format '{f}' in config: {e}"))?,
            );
        }

        if let Some(color) = self.color
            && !color
        {
            args.no_color = true;
        }

        Ok(())
    }

    /// Engine defaults carried by the file; these rank below problem files.
    fn engine_settings(&self) -> Result<EngineSettings> {
        let order = self
            .order
            .as_deref()
            .map(parse_order)
            .transpose()
            .context("invalid order in config")?;
        Ok(EngineSettings {
            order,
            max_iterations: self.max_iterations,
        })
    }
}

/// Output format for results
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, PartialOrd, Ord)]
enum Verbosity {
    /// Errors only
    Quiet,
    /// Warnings and errors
    Normal,
    /// Progress information
    Verbose,
    /// Debug output
    Debug,
    /// Trace output
    Trace,
}

impl Verbosity {
    fn level(self) -> Level {
        match self {
            Verbosity::Quiet => Level::ERROR,
            Verbosity::Normal => Level::WARN,
            Verbosity::Verbose => Level::INFO,
            Verbosity::Debug => Level::DEBUG,
            Verbosity::Trace => Level::TRACE,
        }
    }
}

fn order_arg(s: &str) -> Result<MonomialOrder, String> {
    parse_order(s).map_err(|e| e.to_string())
}

/// Exact Gröbner bases and matrix algebra over Q and number fields
#[derive(Parser, Debug, Clone)]
#[command(name = "zariski")]
#[command(version)]
#[command(about = "Exact Gröbner bases and matrix algebra over Q and number fields")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbosity level
    #[arg(short, long, value_enum, default_value = "normal", global = true)]
    verbosity: Verbosity,

    /// Enable quiet mode (equivalent to --verbosity quiet)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Configuration file (default: <config dir>/zariski/config.yaml)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Monomial order: lex, grlex or grevlex
    #[arg(long, value_parser = order_arg, global = true)]
    order: Option<MonomialOrder>,

    /// Maximum number of S-pairs processed by Buchberger completion
    #[arg(long, global = true)]
    max_iterations: Option<usize>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Compute the reduced Gröbner basis of a polynomial system
    Groebner {
        /// JSON problem: { variables, polynomials, order?, max_iterations? }
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Determinant of a square matrix over Q or Q(α)
    Det {
        /// JSON problem: { matrix, minimal_polynomial?, generator? }
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Inverse of a square matrix over Q or Q(α)
    Inverse {
        /// JSON problem: { matrix, minimal_polynomial?, generator? }
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Approximate the vanishing ideal of sampled points or matrices
    Closure {
        /// JSON problem: { variables?, points?, matrices?, degree, order?, max_iterations? }
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Generate a shell completion script
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() {
    let args = Args::parse();
    let no_color = args.no_color;

    if let Err(e) = run(args) {
        eprintln_colored(no_color, &format!("error: {e:#}"));
        std::process::exit(1);
    }
}

fn run(mut args: Args) -> Result<()> {
    // Handle completion generation
    if let Command::Completions { shell } = args.command {
        let mut cmd = Args::command();
        let bin_name = cmd.get_name().to_string();
        generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        return Ok(());
    }

    // Load configuration file and merge with args
    let config = CliConfig::load(args.config.as_deref())?;
    config.merge_with_args(&mut args)?;
    let file_settings = config.engine_settings()?;
    let cli_settings = EngineSettings {
        order: args.order,
        max_iterations: args.max_iterations,
    };

    // Determine verbosity level
    let verbosity = if args.quiet {
        Verbosity::Quiet
    } else {
        args.verbosity
    };

    // Set up logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(verbosity.level())
        .with_writer(std::io::stderr)
        .with_ansi(!args.no_color)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let format = args.format.unwrap_or_default();
    let output = match &args.command {
        Command::Groebner { file } => {
            render(&run_groebner(file, &cli_settings, &file_settings)?, format)?
        }
        Command::Closure { file } => {
            render(&run_closure(file, &cli_settings, &file_settings)?, format)?
        }
        Command::Det { file } => render(&run_determinant(file)?, format)?,
        Command::Inverse { file } => render(&run_inverse(file)?, format)?,
        Command::Completions { .. } => return Ok(()),
    };
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_args_global_flags() {
        let args = parse(&["zariski", "groebner", "p.json", "--order", "lex", "-f", "json"]);
        assert_eq!(args.order, Some(MonomialOrder::Lex));
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert!(matches!(args.command, Command::Groebner { .. }));
        assert!(Args::try_parse_from(["zariski", "det", "m.json", "--order", "bogus"]).is_err());
    }

    #[test]
    fn test_config_merge_respects_explicit_flags() {
        let config: CliConfig = serde_yaml::from_str(
            "order: lex\nmax_iterations: 20\nverbosity: debug\nformat: yaml\ncolor: false\n",
        )
        .unwrap();

        let mut args = parse(&["zariski", "det", "m.json"]);
        config.merge_with_args(&mut args).unwrap();
        assert_eq!(args.verbosity, Verbosity::Debug);
        assert_eq!(args.format, Some(OutputFormat::Yaml));
        assert!(args.no_color);

        let mut args = parse(&["zariski", "det", "m.json", "-v", "trace", "-f", "text"]);
        config.merge_with_args(&mut args).unwrap();
        assert_eq!(args.verbosity, Verbosity::Trace);
        assert_eq!(args.format, Some(OutputFormat::Text));

        let settings = config.engine_settings().unwrap();
        assert_eq!(settings.order, Some(MonomialOrder::Lex));
        assert_eq!(settings.max_iterations, Some(20));
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let config: CliConfig = serde_yaml::from_str("format: xml\n").unwrap();
        let mut args = parse(&["zariski", "det", "m.json"]);
        assert!(config.merge_with_args(&mut args).is_err());

        let config: CliConfig = serde_yaml::from_str("order: elim\n").unwrap();
        assert!(config.engine_settings().is_err());
        assert!(serde_yaml::from_str::<CliConfig>("unknown_key: 1\n").is_err());
    }
}
