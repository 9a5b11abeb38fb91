//! resume-layout CLI - resume layout and style analysis tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use resume_layout::{
    render, AnalysisResult, AnalyzeOptions, JsonFormat, JsonPageSource, ResumeLayout,
};

#[derive(Parser)]
#[command(name = "resume-layout")]
#[command(version)]
#[command(about = "Reconstruct resume layout, sections and style from decoded PDF pages", long_about = None)]
struct Cli {
    /// Decoded page dump (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Analysis tuning shared by every command.
#[derive(clap::Args, Clone)]
struct TuningArgs {
    /// Vertical tolerance for grouping tokens into lines
    #[arg(long, default_value = "2.0")]
    line_tolerance: f64,

    /// Horizontal gap that splits a line into regions
    #[arg(long, default_value = "50.0")]
    region_gap: f64,

    /// Analyze pages one at a time
    #[arg(long)]
    sequential: bool,
}

impl From<&TuningArgs> for AnalyzeOptions {
    fn from(args: &TuningArgs) -> Self {
        AnalyzeOptions::new()
            .with_line_tolerance(args.line_tolerance)
            .with_region_gap(args.region_gap)
            .with_parallel(!args.sequential)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a page dump into a layout document (JSON)
    Analyze {
        /// Decoded page dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Print font, palette and resume type suggestions
    Suggest {
        /// Decoded page dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Print the region-to-section outline
    Outline {
        /// Decoded page dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Analyze every page dump in a directory
    Batch {
        /// Directory containing *.json page dumps
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Analyze {
            input,
            output,
            compact,
            tuning,
        }) => cmd_analyze(&input, output.as_deref(), compact, &tuning),
        Some(Commands::Suggest {
            input,
            json,
            tuning,
        }) => cmd_suggest(&input, json, &tuning),
        Some(Commands::Outline { input, tuning }) => cmd_outline(&input, &tuning),
        Some(Commands::Batch {
            input,
            output,
            tuning,
        }) => cmd_batch(&input, output.as_deref(), &tuning),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: analyze to stdout if input is provided
            if let Some(input) = cli.input {
                let tuning = TuningArgs {
                    line_tolerance: 2.0,
                    region_gap: 50.0,
                    sequential: false,
                };
                cmd_analyze(&input, None, false, &tuning)
            } else {
                println!("{}", "Usage: resume-layout <FILE>".yellow());
                println!("       resume-layout --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(input: &Path, tuning: &TuningArgs) -> Result<AnalysisResult, Box<dyn std::error::Error>> {
    let source = JsonPageSource::open(input)?;
    let result = ResumeLayout::new()
        .with_options(tuning.into())
        .analyze_source(&source)?;
    Ok(result)
}

fn write_or_print(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_analyze(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    tuning: &TuningArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = run(input, tuning)?;
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    write_or_print(&result.to_json(format)?, output)
}

fn cmd_suggest(input: &Path, json: bool, tuning: &TuningArgs) -> Result<(), Box<dyn std::error::Error>> {
    let result = run(input, tuning)?;
    let suggestions = result.suggestions();

    if json {
        println!("{}", render::to_json(&suggestions, JsonFormat::Pretty)?);
        return Ok(());
    }

    let doc = result.document();
    println!("{}", "Style Suggestions".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Heading font".bold(), suggestions.heading_font);
    println!("{}: {}", "Body font".bold(), suggestions.body_font);
    println!("{}: {}", "Primary".bold(), suggestions.palette.primary);
    println!("{}: {}", "Text".bold(), suggestions.palette.text);
    println!("{}: {}", "Muted".bold(), suggestions.palette.muted);
    println!("{}: {:?}", "Resume type".bold(), suggestions.resume_type);

    println!();
    println!("{}", "Document Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!("{}: {}", "Regions".bold(), doc.regions().count());
    println!("{}: {}", "Fonts".bold(), doc.fonts.len());
    let order: Vec<&str> = doc
        .section_structure
        .sections_order
        .iter()
        .map(|s| s.as_str())
        .collect();
    println!("{}: {}", "Sections".bold(), order.join(", "));

    Ok(())
}

fn cmd_outline(input: &Path, tuning: &TuningArgs) -> Result<(), Box<dyn std::error::Error>> {
    let result = run(input, tuning)?;
    println!("{}", result.to_text()?);
    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: Option<&Path>,
    tuning: &TuningArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut dumps: Vec<PathBuf> = fs::read_dir(input)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    dumps.sort();
    log::debug!("Batch: {} page dumps in {}", dumps.len(), input.display());

    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| input.join("layout"));
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(dumps.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut failed = 0usize;
    for path in &dumps {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        pb.set_message(name.to_string());

        match run(path, tuning).and_then(|result| Ok(result.to_json(JsonFormat::Pretty)?)) {
            Ok(json) => {
                let stem = path.file_stem().unwrap_or_default().to_string_lossy();
                fs::write(output_dir.join(format!("{}.layout.json", stem)), json)?;
            }
            Err(e) => {
                failed += 1;
                pb.println(format!("{} {}: {}", "Failed".red(), name, e));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!(
        "{} {} analyzed, {} failed -> {}",
        "Done!".green().bold(),
        dumps.len() - failed,
        failed,
        output_dir.display()
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "resume-layout".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Resume layout reconstruction and style inference");
    println!();
    println!("License: MIT");
}
