//! Risk Log Charts CLI
//!
//! Command-line interface for rendering charts from Risk simulation logs.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

use risk_log_charts::{
    analytics::report::{print_summary, BatchReport},
    config::{AnalysisConfig, UnknownLogPolicy},
    logs::{ChartLayout, LogKind},
    pipeline::Analyzer,
};

#[derive(Parser)]
#[command(name = "risk-charts")]
#[command(version)]
#[command(about = "Render line charts from Risk simulation logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render charts for every matching log file (default)
    Render(RenderArgs),

    /// List matching log files with their kind and run id
    Classify {
        /// Glob pattern of log files
        #[arg(short, long)]
        input: Option<String>,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Fail on the first file with an unrecognized name
        #[arg(long)]
        strict: bool,
    },

    /// Print the summary of a saved batch report
    Summary {
        /// JSON report written by `render --report`
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the known log kinds and their column schemas
    Info,
}

#[derive(Args, Default)]
struct RenderArgs {
    /// Glob pattern of log files [default: ../*.log]
    #[arg(short, long)]
    input: Option<String>,

    /// Directory receiving the img_run_<id> directories [default: .]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Player whose continent occupation is charted [default: 0]
    #[arg(short, long)]
    player: Option<u32>,

    /// Abort on log files with an unrecognized name instead of skipping them
    #[arg(long)]
    strict: bool,

    /// JSON configuration file; flags take precedence over its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Save a JSON batch report to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    FmtSubscriber::builder()
        .with_env_filter(log_filter(cli.verbose, rust_log.as_deref()))
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    match cli.command.unwrap_or_else(|| Commands::Render(RenderArgs::default())) {
        Commands::Render(args) => {
            let config = render_config(&args)?;
            run_render(config)?;
        }

        Commands::Classify {
            input,
            config,
            strict,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(input) = input {
                config.input_pattern = input;
            }
            if strict {
                config.unknown_policy = UnknownLogPolicy::Abort;
            }
            run_classify(config)?;
        }

        Commands::Summary { input } => {
            let report = BatchReport::load(&input)
                .with_context(|| format!("Failed to load report {}", input.display()))?;
            print_summary(&report);
        }

        Commands::Info => {
            print_info();
        }
    }

    Ok(())
}

/// Level from `--verbose`, refined by `RUST_LOG` directives when set
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(log_level).into())
        .parse_lossy(rust_log.unwrap_or_default())
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            AnalysisConfig::load(path)
        }
        None => Ok(AnalysisConfig::default()),
    }
}

fn render_config(args: &RenderArgs) -> Result<AnalysisConfig> {
    let mut config = load_config(args.config.as_deref())?;

    if let Some(input) = &args.input {
        config.input_pattern = input.clone();
    }
    if let Some(output) = &args.output {
        config.output_root = output.clone();
    }
    if let Some(player) = args.player {
        config.focus_player = player;
    }
    if args.strict {
        config.unknown_policy = UnknownLogPolicy::Abort;
    }
    if let Some(report) = &args.report {
        config.report_file = Some(report.clone());
    }

    Ok(config)
}

fn run_render(config: AnalysisConfig) -> Result<()> {
    info!("Configuration:");
    info!("  Input pattern:   {}", config.input_pattern);
    info!("  Output root:     {}", config.output_root.display());
    info!("  Focus player:    {}", config.focus_player);
    info!("  Unknown logs:    {:?}", config.unknown_policy);
    info!("  Chart size:      {}x{}", config.chart_width, config.chart_height);

    let analyzer = Analyzer::from_config(config);
    let report = analyzer.run()?;

    print_summary(&report);

    if let Some(path) = &analyzer.config().report_file {
        report.save(path)?;
        println!("📁 Report saved to: {}", path.display());
        println!();
    }

    Ok(())
}

fn run_classify(config: AnalysisConfig) -> Result<()> {
    let analyzer = Analyzer::from_config(config);
    let paths = analyzer.discover()?;

    println!();
    for path in &paths {
        match analyzer.classify(path)? {
            Some(log) => println!(
                "  {:<24} run {:<8} {}",
                log.kind.to_string(),
                log.run_id,
                path.display()
            ),
            None => println!("  {:<24} {:<12} {}", "skipped", "", path.display()),
        }
    }
    println!();
    println!(
        "{} log files match {}",
        paths.len(),
        analyzer.config().input_pattern
    );
    println!();

    Ok(())
}

fn print_info() {
    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║       Risk Log Charts - Info                             ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();
    println!("LOG KINDS:");
    for kind in LogKind::ALL {
        let layout = match kind.layout() {
            ChartLayout::PerPlayer => "one chart per column, one line per player",
            ChartLayout::FocusPlayerRatio => "one chart for the focus player, one line per column",
        };
        println!("  • {} (*{}*)", kind, kind.tag());
        println!("      columns: {}", kind.columns().join(", "));
        println!("      charts:  {}", layout);
    }
    println!();
    println!("USAGE:");
    println!("  risk-charts                           # Render ../*.log into ./img_run_<id>/");
    println!("  risk-charts render -i 'logs/*.log'    # Render another set of logs");
    println!("  risk-charts classify                  # Show how files would be handled");
    println!("  RUST_LOG=debug risk-charts            # Override the log level");
    println!("  risk-charts summary -i report.json    # Reprint a saved report");
    println!();
}
