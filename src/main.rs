//! ILMerge Lane CLI
//!
//! Entry point for the `ilmerge-lane` command-line tool.

use clap::{Parser, Subcommand};
use ilmerge_lane::{build_args, ConfigSource, InvocationRecord, MergeConfig, ToolLocation};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "ilmerge-lane")]
#[command(about = "ILMerge invocation builder", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the ILMerge argument sequence for a configuration
    Args {
        /// Path to config file (default: .ilmerge.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output assembly path (overrides the config file)
        #[arg(long)]
        out: Option<String>,

        /// ILMerge location: a directory or a full executable path
        #[arg(long)]
        tool: Option<String>,

        /// Output the full invocation record as JSON
        #[arg(long)]
        json: bool,

        /// Input assemblies, primary first (override the config file;
        /// after --)
        #[arg(last = true)]
        inputs: Vec<String>,
    },

    /// Verify a merge configuration file
    Verify {
        /// Path to config file (default: .ilmerge.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },

    /// Resolve an ambiguous tool path into directory and executable
    Tool {
        /// A directory containing ILMerge.exe, or the executable itself
        path: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Args {
            config,
            out,
            tool,
            json,
            inputs,
        } => {
            run_args(config, out, tool, json, inputs);
        }
        Commands::Verify { config } => {
            run_verify(config);
        }
        Commands::Tool { path, json } => {
            run_tool(&path, json);
        }
    }
}

fn run_args(
    config_path: Option<PathBuf>,
    out: Option<String>,
    tool: Option<String>,
    json: bool,
    inputs: Vec<String>,
) {
    let (mut config, source) = match load_config(config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };

    // CLI values take precedence over the config file.
    if let Some(out) = out {
        config.output_file = Some(out);
    }
    if !inputs.is_empty() {
        config.input_assemblies = Some(inputs);
    }

    let args = match build_args(&config) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Invalid merge configuration [{}]: {}", e.code(), e);
            process::exit(1);
        }
    };

    let tool_location = match tool {
        Some(ref raw) => match ToolLocation::resolve(raw) {
            Ok(location) => location,
            Err(e) => {
                eprintln!("Error resolving tool path '{}': {}", raw, e);
                process::exit(1);
            }
        },
        None => ToolLocation::default(),
    };

    let record = InvocationRecord::new(tool_location, args, source);

    if json {
        match record.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("{}", record.command_line());
    }
}

fn run_verify(config_path: Option<PathBuf>) {
    let path = config_path.unwrap_or_else(|| PathBuf::from(".ilmerge.toml"));

    let (config, source) = match MergeConfig::from_file(&path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    println!("Configuration valid: {}", path.display());
    if let Some(digest) = source.digest {
        println!("  Digest: {}", digest);
    }
    println!();
    if let Some(ref output_file) = config.output_file {
        println!("  Output: {}", output_file);
    }
    if let Some(ref inputs) = config.input_assemblies {
        println!("  Inputs: {}", inputs.join(", "));
    }
    if let Some(ref target_type) = config.target_type {
        println!("  Target type: {}", target_type);
    }
    if !config.search_directories.is_empty() {
        println!("  Search directories: {}", config.search_directories.join(", "));
    }
    if config.internalize {
        match config.exclude_file {
            Some(ref exclude_file) => println!("  Internalize (exclude: {})", exclude_file),
            None => println!("  Internalize"),
        }
    }

    // A valid file may still be missing required fields; report that as
    // a diagnostic without failing verification.
    if let Err(e) = build_args(&config) {
        println!();
        println!("  Note: not buildable as-is [{}]: {}", e.code(), e);
    }
}

fn run_tool(raw: &str, json: bool) {
    let location = match ToolLocation::resolve(raw) {
        Ok(location) => location,
        Err(e) => {
            eprintln!("Error resolving tool path '{}': {}", raw, e);
            process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&location) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        match location.search_directory {
            Some(ref dir) => println!("Search directory: {}", dir.display()),
            None => println!("Search directory: (none)"),
        }
        println!("Executable: {}", location.executable);
    }
}

fn load_config(config_path: Option<PathBuf>) -> Result<(MergeConfig, ConfigSource), String> {
    let path = config_path.unwrap_or_else(|| PathBuf::from(".ilmerge.toml"));

    if path.exists() {
        MergeConfig::from_file(&path).map_err(|e| e.to_string())
    } else {
        // No file is fine; the CLI flags may supply everything.
        Ok((MergeConfig::default(), ConfigSource::default()))
    }
}
