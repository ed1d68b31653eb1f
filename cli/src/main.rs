//! pdfchunk CLI - split PDF text into Markdown chunk files

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfchunk::{
    detect_format_from_path, ChunkedExtractor, LopdfSource, PageSource, SplitEvent, SplitOptions,
    DEFAULT_CHUNK_SIZE, DEFAULT_PREFIX,
};

#[derive(Parser)]
#[command(name = "pdfchunk")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Split PDF text into page-headed Markdown chunk files", long_about = None)]
#[command(after_help = "An input file named like a subcommand (split, info, version) \
needs the explicit form: pdfchunk split <FILE> <OUTPUT_DIR>")]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE", requires = "output")]
    input: Option<PathBuf>,

    /// Output directory (must exist)
    #[arg(value_name = "OUTPUT_DIR")]
    output: Option<PathBuf>,

    #[command(flatten)]
    split: SplitArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args, Clone)]
struct SplitArgs {
    /// Output file name prefix
    #[arg(long, env = "PDFCHUNK_PREFIX", default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// Pages per output file
    #[arg(
        short = 'n',
        long,
        env = "PDFCHUNK_CHUNK_SIZE",
        default_value_t = DEFAULT_CHUNK_SIZE,
        value_parser = parse_chunk_size
    )]
    chunk_size: usize,

    /// Keep chunk files that already exist with the expected page range
    #[arg(long)]
    resume: bool,

    /// Print the run report as JSON instead of the summary
    #[arg(long)]
    json: bool,

    /// Do not draw a progress bar
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a PDF into chunk files
    Split {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory (must exist)
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        #[command(flatten)]
        split: SplitArgs,
    },

    /// Show page count and the chunk files a split would create
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Pages per output file
        #[arg(short = 'n', long, default_value_t = DEFAULT_CHUNK_SIZE, value_parser = parse_chunk_size)]
        chunk_size: usize,
    },

    /// Show version information
    Version,
}

fn parse_chunk_size(s: &str) -> Result<usize, String> {
    let size: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a page count", s))?;
    if size == 0 {
        return Err("chunk size must be at least 1".to_string());
    }
    Ok(size)
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Split {
            input,
            output,
            split,
        }) => cmd_split(&input, &output, &split),
        Some(Commands::Info { input, chunk_size }) => cmd_info(&input, chunk_size),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match (cli.input, cli.output) {
            (Some(input), Some(output)) => cmd_split(&input, &output, &cli.split),
            _ => {
                println!("{}", "Usage: pdfchunk <FILE> <OUTPUT_DIR>".yellow());
                println!("       pdfchunk split <FILE> <OUTPUT_DIR>");
                println!("       pdfchunk --help for more information");
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn split_options(output: &Path, args: &SplitArgs) -> SplitOptions {
    SplitOptions::new(output)
        .with_prefix(args.prefix.clone())
        .with_chunk_size(args.chunk_size)
        .with_resume(args.resume)
}

fn cmd_split(input: &Path, output: &Path, args: &SplitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = split_options(output, args);
    options.validate()?;
    log::debug!("Split options: {:?}", options);

    let source = LopdfSource::open(input)?;
    let extractor = ChunkedExtractor::new(options);
    let human = !args.json;

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        pb
    };

    let report = extractor.run_with_progress(&source, |event| match event {
        SplitEvent::Started {
            total_pages,
            chunk_count,
        } => {
            pb.set_length(*chunk_count as u64);
            if human {
                pb.suspend(|| println!("Total pages: {}", total_pages));
            }
        }
        SplitEvent::PageFailed { page, reason } => {
            pb.suspend(|| {
                eprintln!(
                    "{} page {}: {}",
                    "Warning".yellow().bold(),
                    page,
                    reason
                )
            });
        }
        SplitEvent::ChunkWritten { path, chunk } => {
            pb.set_message(format!("pages {}", chunk));
            pb.inc(1);
            if human {
                pb.suspend(|| println!("Created {} (pages {})", path.display(), chunk));
            }
        }
        SplitEvent::ChunkSkipped { path, chunk } => {
            pb.inc(1);
            if human {
                pb.suspend(|| {
                    println!(
                        "{} {} (pages {}, up to date)",
                        "Skipped".dimmed(),
                        path.display(),
                        chunk
                    )
                });
            }
        }
        SplitEvent::Finished { .. } => pb.finish_and_clear(),
    })?;

    if human {
        println!(
            "\n{} Created {} files.",
            "Extraction complete!".green().bold(),
            report.files_created
        );
        if report.files_skipped > 0 {
            println!("Skipped {} existing files.", report.files_skipped);
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn cmd_info(input: &Path, chunk_size: usize) -> Result<(), Box<dyn std::error::Error>> {
    let format = detect_format_from_path(input)?;
    let source = LopdfSource::open(input)?;
    let options = SplitOptions::new(".").with_chunk_size(chunk_size);
    let plan = ChunkedExtractor::new(options.clone()).plan(&source)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);
    println!("{}: {}", "Pages".bold(), source.page_count());
    println!(
        "{}: {}",
        "Encrypted".bold(),
        if source.is_encrypted() { "Yes" } else { "No" }
    );

    println!();
    println!("{}", "Chunk Plan".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Chunk size".bold(), plan.chunk_size());
    println!("{}: {}", "Files".bold(), plan.len());
    for chunk in &plan {
        let name = options.output_path(chunk.number);
        let name = name.file_name().unwrap_or_default().to_string_lossy();
        println!("  {} {} (pages {})", "├─".dimmed(), name, chunk);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfchunk".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF to Markdown chunk splitter");
    println!();
    println!("License: MIT");
}
