//! Command-line interface for the bowline utility
//!
//! Provides a CLI to convert JSON Canvas files into Mermaid.js flowchart
//! markup.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::debug;

use bowline::core::logging::init_logging;
use bowline::{CanvasData, ColorOverrides};

/// Bowline - Convert JSON Canvas files to Mermaid.js flowcharts
#[derive(Parser)]
#[command(name = "bowline")]
#[command(about = "A Rust utility to convert JSON Canvas files into Mermaid.js flowcharts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a JSON Canvas file to Mermaid flowchart syntax
    Convert {
        /// Input canvas file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the flowchart (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Flow direction of the generated flowchart
        #[arg(long, value_enum, default_value_t = DirectionChoice::Tb)]
        direction: DirectionChoice,

        /// Palette override as INDEX=HEX (e.g. 1=#ff0000); may be repeated
        #[arg(short, long = "color", value_name = "INDEX=HEX")]
        color: Vec<String>,
    },

    /// Print the containment hierarchy of a canvas as JSON
    Tree {
        /// Input canvas file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Validate a JSON Canvas file
    Validate {
        /// Input canvas file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Flow directions accepted on the command line
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum DirectionChoice {
    /// Top to bottom
    #[default]
    Tb,
    /// Left to right
    Lr,
    /// Bottom to top
    Bt,
    /// Right to left
    Rl,
}

impl DirectionChoice {
    /// The direction token the library expects
    pub fn token(&self) -> &'static str {
        match self {
            DirectionChoice::Tb => "TB",
            DirectionChoice::Lr => "LR",
            DirectionChoice::Bt => "BT",
            DirectionChoice::Rl => "RL",
        }
    }
}

/// Main CLI application
pub struct BowlineApp;

impl BowlineApp {
    /// Create a new application instance
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over CLI flags.
        let log_level_str = std::env::var("BOWLINE_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("BOWLINE_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Bowline v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Convert {
                input,
                output,
                direction,
                color,
            } => self.convert_command(input, output, direction, &color, cli.verbose),
            Commands::Tree { input, compact } => self.tree_command(input, compact),
            Commands::Validate { input } => self.validate_command(input),
        }
    }

    /// Handle the convert command
    fn convert_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        direction: DirectionChoice,
        color: &[String],
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let data = CanvasData::from_json_str(&content)?;
        let overrides = parse_color_overrides(color)?;

        let flowchart = bowline::render_flowchart(&data, &overrides, direction.token())?;
        debug!(output_len = flowchart.len(), "conversion finished");

        self.write_output(output, &flowchart)
    }

    /// Handle the tree command
    fn tree_command(&self, input: Option<PathBuf>, compact: bool) -> Result<()> {
        let content = self.read_input(input)?;
        let data = CanvasData::from_json_str(&content)?;

        let hierarchy = bowline::build_hierarchy(&data)?;
        let json = if compact {
            serde_json::to_string(&hierarchy)?
        } else {
            serde_json::to_string_pretty(&hierarchy)?
        };

        self.write_output(None, &json)
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>) -> Result<()> {
        let content = self.read_input(input)?;
        let data = CanvasData::from_json_str(&content)?;
        bowline::validate::validate_canvas(&data)?;

        println!("Canvas data is valid");
        Ok(())
    }

    /// Read input from a file or stdin ("-" or no path means stdin)
    fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.as_os_str() != "-" => fs::read_to_string(&path)
                .with_context(|| format!("failed to read input file {}", path.display())),
            _ => {
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .context("failed to read from stdin")?;
                Ok(buffer)
            }
        }
    }

    /// Write output to a file or stdout ("-" or no path means stdout)
    fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.as_os_str() != "-" => {
                fs::write(&path, content)
                    .with_context(|| format!("failed to write output file {}", path.display()))?;
            }
            _ => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                if !content.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
            }
        }
        Ok(())
    }
}

impl Default for BowlineApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse repeated `INDEX=HEX` override arguments into an override map
fn parse_color_overrides(args: &[String]) -> Result<ColorOverrides> {
    let mut overrides = ColorOverrides::new();
    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| anyhow!("invalid color override '{}': expected INDEX=HEX", arg))?;
        overrides.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(overrides)
}
