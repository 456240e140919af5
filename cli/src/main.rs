//! pdf-outline CLI - outline extraction from PDF text blocks

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf_outline::render::{self, JsonFormat};
use pdf_outline::{
    compute_stats, Classifier, DocumentInput, FilterPreset, HeadingLevel, OutlineOptions,
    Outliner, RuleBasedClassifier, ThresholdProfile,
};

#[derive(Parser)]
#[command(name = "pdf-outline")]
#[command(version)]
#[command(about = "Extract Title/H1/H2/H3 outlines from PDF text blocks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build outlines for a blocks file or a directory of blocks files
    Outline {
        /// Blocks JSON file or directory
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Threshold profile (JSON)
        #[arg(long, value_name = "PROFILE")]
        config: Option<PathBuf>,

        /// Block filter preset
        #[arg(long, value_enum, default_value = "off")]
        filter: FilterLevel,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Classification budget per document, in milliseconds
        #[arg(long, value_name = "N")]
        budget_ms: Option<u64>,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,

        /// Send neighbouring blocks to the classifier
        #[arg(long)]
        context: bool,

        /// Print each outline as a tree
        #[arg(long)]
        print: bool,
    },

    /// Print the feature string of every block
    Features {
        /// Blocks JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Threshold profile (JSON)
        #[arg(long, value_name = "PROFILE")]
        config: Option<PathBuf>,
    },

    /// Show document statistics and tag counts
    Stats {
        /// Blocks JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Threshold profile (JSON)
        #[arg(long, value_name = "PROFILE")]
        config: Option<PathBuf>,
    },

    /// Print the default threshold profile as JSON
    Profile,

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FilterLevel {
    /// Classify every block
    Off,
    /// Drop running headers, long paragraphs and small body text first
    Standard,
}

impl From<FilterLevel> for FilterPreset {
    fn from(level: FilterLevel) -> Self {
        match level {
            FilterLevel::Off => FilterPreset::Off,
            FilterLevel::Standard => FilterPreset::Standard,
        }
    }
}

struct OutlineArgs {
    input: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    filter: FilterLevel,
    compact: bool,
    budget_ms: Option<u64>,
    sequential: bool,
    context: bool,
    print: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Outline {
            input,
            output,
            config,
            filter,
            compact,
            budget_ms,
            sequential,
            context,
            print,
        } => cmd_outline(OutlineArgs {
            input,
            output,
            config,
            filter,
            compact,
            budget_ms,
            sequential,
            context,
            print,
        }),
        Commands::Features { input, config } => cmd_features(&input, config.as_deref()),
        Commands::Stats { input, config } => cmd_stats(&input, config.as_deref()),
        Commands::Profile => cmd_profile(),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_profile(config: Option<&Path>) -> pdf_outline::Result<ThresholdProfile> {
    match config {
        Some(path) => ThresholdProfile::from_file(path),
        None => Ok(ThresholdProfile::default()),
    }
}

fn rules() -> Arc<dyn Classifier> {
    Arc::new(RuleBasedClassifier::new())
}

fn cmd_outline(args: OutlineArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = OutlineOptions::new()
        .with_profile(load_profile(args.config.as_deref())?)
        .with_filter_preset(args.filter.into())
        .with_context_window(args.context)
        .with_parallel(!args.sequential);
    if let Some(ms) = args.budget_ms {
        options = options.with_time_budget(Duration::from_millis(ms));
    }
    options.validate()?;

    let files = render::collect_inputs(&args.input)?;
    if files.is_empty() {
        println!("{} no .json files in {}", "Nothing to do:".yellow(), args.input.display());
        return Ok(());
    }

    let output_dir = args.output.unwrap_or_else(|| PathBuf::from("output"));
    fs::create_dir_all(&output_dir)?;

    // Documents are identified by file stem so outputs line up with inputs.
    let mut documents = Vec::with_capacity(files.len());
    let mut read_failures = Vec::new();
    for path in &files {
        match render::read_document(path) {
            Ok(mut doc) => {
                doc.id = file_stem(path);
                documents.push(doc);
            }
            Err(e) => read_failures.push((file_stem(path), e.to_string())),
        }
    }

    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Outlining...");

    let outliner = Outliner::new(rules()).with_options(options);
    let report = outliner.process_batch_with_progress(&documents, || pb.inc(1));

    let format = if args.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let mut written = Vec::with_capacity(report.outlines.len());
    for (id, outline) in &report.outlines {
        let path = output_dir.join(format!("{}.json", id));
        render::write_outline(&path, outline, format)?;
        written.push((id, outline, path));
    }
    pb.finish_with_message("Done!");

    println!("\n{}", "Outlines:".green().bold());
    for (i, (id, outline, path)) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        let headings = if outline.is_empty() {
            "title only".to_string()
        } else {
            format!("{} headings", outline.outline.len())
        };
        println!(
            "  {} {} {} {} ({})",
            branch.dimmed(),
            id,
            "→".dimmed(),
            path.display(),
            headings
        );
        if args.print {
            for line in render::to_text(outline).lines() {
                println!("       {}", line);
            }
        }
    }

    let failures: Vec<(String, String)> = read_failures
        .into_iter()
        .chain(
            report
                .failures
                .iter()
                .map(|f| (f.id.clone(), f.reason.clone())),
        )
        .collect();

    if !failures.is_empty() {
        println!("\n{}", "Failed:".red().bold());
        for (id, reason) in &failures {
            println!("  {} {}: {}", "✗".red(), id, reason);
        }
    }

    println!(
        "\n{} {} of {} documents outlined",
        "Summary:".cyan().bold(),
        written.len(),
        files.len()
    );

    if written.is_empty() {
        return Err(format!("all {} documents failed", files.len()).into());
    }
    Ok(())
}

fn cmd_features(input: &Path, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let doc = render::read_document(input)?;
    let options = OutlineOptions::new().with_profile(load_profile(config)?);
    options.validate()?;
    let outliner = Outliner::new(rules()).with_options(options);

    for (i, (vector, feature)) in outliner.features(&doc).iter().enumerate() {
        let marker = if vector.low_confidence {
            "!".yellow().to_string()
        } else {
            " ".to_string()
        };
        println!("{:>4}{} {}", i, marker, feature);
    }

    Ok(())
}

fn cmd_stats(input: &Path, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let doc: DocumentInput = render::read_document(input)?;
    let stats = compute_stats(&doc.blocks);
    let options = OutlineOptions::new().with_profile(load_profile(config)?);
    options.validate()?;
    let outliner = Outliner::new(rules()).with_options(options);
    let features = outliner.features(&doc);

    println!("{}", "Document Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Blocks".bold(), doc.blocks.len());
    println!("{}: {}", "Pages".bold(), stats.page_count);
    println!("{}: {:.1}pt", "Dominant font".bold(), stats.dominant_font_size);
    println!(
        "{}: {}",
        "Low confidence".bold(),
        features.iter().filter(|(v, _)| v.low_confidence).count()
    );

    let mut tags: BTreeMap<String, usize> = BTreeMap::new();
    for (_, feature) in &features {
        for token in feature.tags() {
            *tags.entry(token.to_string()).or_insert(0) += 1;
        }
    }

    println!();
    println!("{}", "Tag Counts".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (tag, count) in &tags {
        println!("{:<14} {}", tag, count);
    }

    let outline = outliner.process(&doc)?;
    println!();
    println!("{}", "Outline".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Title".bold(), outline.title);
    for level in [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3] {
        println!("{}: {}", level.as_str().bold(), outline.count(level));
    }

    Ok(())
}

fn cmd_profile() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", ThresholdProfile::default().to_json()?);
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdf-outline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF outline extraction tool");
    println!();
    println!("License: MIT");
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(Path::new("in/file01.json")), "file01");
    }

    #[test]
    fn test_filter_level_conversion() {
        assert_eq!(FilterPreset::from(FilterLevel::Standard), FilterPreset::Standard);
        assert_eq!(FilterPreset::from(FilterLevel::Off), FilterPreset::Off);
    }
}
