//! pdf2md CLI - convert PDF documents to Markdown

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;

use pdf2md::validate::default_output_path;
use pdf2md::{
    ConversionSummary, ConvertOptions, Converter, ErrorMode, ExtractOptions, OutputFormat,
    PageSelection, RenderOptions,
};

#[derive(Parser, Debug)]
#[command(name = "pdf2md")]
#[command(version)]
#[command(about = "Convert PDF documents to Markdown with heading and list detection", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file (defaults to the input path with a .md extension)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Overwrite the output file if it already exists
    #[arg(short, long)]
    force: bool,

    /// Print progress details and statistics
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    quiet: bool,

    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long, value_name = "RANGE")]
    pages: Option<String>,

    /// Maximum heading level (1-6)
    #[arg(
        long,
        env = "PDF2MD_MAX_HEADING",
        default_value_t = 6,
        value_parser = clap::value_parser!(u8).range(1..=6)
    )]
    max_heading: u8,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Markdown)]
    format: Format,

    /// Fail on the first unreadable page instead of skipping it
    #[arg(long)]
    strict: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Markdown document
    Markdown,
    /// JSON dump of the detected blocks
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Markdown => OutputFormat::Markdown,
            Format::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Error
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }

    fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let format = OutputFormat::from(self.format);
            default_output_path(&self.input, format.extension())
        })
    }

    fn convert_options(&self) -> pdf2md::Result<ConvertOptions> {
        let pages = match &self.pages {
            Some(p) => PageSelection::parse(p)?,
            None => PageSelection::All,
        };

        let mut extract = ExtractOptions::new().with_pages(pages);
        if self.strict {
            extract = extract.with_error_mode(ErrorMode::Strict);
        }

        Ok(ConvertOptions::new()
            .with_extract_options(extract)
            .with_render_options(RenderOptions::new().with_max_heading(self.max_heading))
            .with_format(self.format.into())
            .with_force(self.force))
    }
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG overrides the flag-derived level
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        process::exit(e.exit_code());
    }
}

fn run(cli: &Cli) -> pdf2md::Result<()> {
    let options = cli.convert_options()?;
    let output = cli.output_path();

    if cli.verbose {
        println!("{} {}", "pdf2md".cyan().bold(), env!("CARGO_PKG_VERSION"));
        println!("{}: {}", "Input".bold(), cli.input.display());
        println!("{}: {}", "Output".bold(), output.display());
    }

    let spinner = (!cli.quiet).then(|| spinner("Converting..."));
    let result = Converter::new(cli.input.clone(), output)
        .with_options(options)
        .convert();
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let summary = result?;

    if cli.quiet {
        return Ok(());
    }

    if summary.is_empty() {
        eprintln!(
            "{}: no extractable text found in {} (scanned or image-only PDF?)",
            "Warning".yellow().bold(),
            cli.input.display()
        );
    }

    println!("{} {}", "Saved to".green(), summary.output_path.display());

    if cli.verbose {
        print_stats(&summary);
    }

    Ok(())
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn print_stats(summary: &ConversionSummary) {
    let stats = &summary.stats;

    println!();
    println!("{}", "Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Pages".bold(), summary.pages_converted);
    println!("{}: {}", "Fragments".bold(), stats.fragment_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
}
