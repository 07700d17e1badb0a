use anyhow::Result;
use clap::Parser;
use hq_description::{Config, DescriptionGenerator, GenerationMode};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hq-description")]
#[command(version, about = "Generate English/Japanese video descriptions for a recorded match session")]
struct Cli {
    /// Match result file, named YYYYMMDD...
    #[arg(short, long, value_name = "FILE")]
    results: PathBuf,

    /// Raw timestamp log with Player1/Player2 placeholders
    #[arg(short, long, value_name = "FILE")]
    timestamps: PathBuf,

    /// Replacement table (local,canonical per line)
    #[arg(long, value_name = "FILE")]
    replace_info: Option<PathBuf>,

    /// Comment template file (4 lines)
    #[arg(long, value_name = "FILE")]
    comments: Option<PathBuf>,

    /// Output directory for the description files
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the descriptions instead of writing files
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config comes first so its log level can seed the subscriber
    let config = match &cli.config {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    };

    let default_filter = match &config {
        Ok(config) => config.log_filter(cli.verbose),
        Err(_) => Config::default().log_filter(cli.verbose),
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    let mut config = match (config, &cli.config) {
        (Ok(config), _) => config,
        (Err(e), Some(_)) => return Err(e),
        (Err(e), None) => {
            warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    };

    if let Some(path) = cli.replace_info {
        config.inputs.replace_info_file = path;
    }
    if let Some(path) = cli.comments {
        config.inputs.comment_file = path;
    }
    if let Some(dir) = cli.output_dir {
        config.output.dir = dir;
    }
    config.validate()?;

    info!("🚀 Description generator starting...");
    info!("{}", config.summary());

    let generator = DescriptionGenerator::new(config);
    let result = generator.generate(&cli.results, &cli.timestamps)?;

    if cli.dry_run {
        for document in &result.documents {
            println!("===== {} ({}) =====", document.language, document.path.display());
            print!("{}", document.content);
        }
    } else {
        generator.write(&result)?;
    }

    if result.mode == GenerationMode::Manual {
        info!("📝 Manual mode: player names were not substituted");
    }
    info!(
        "🎉 Generated {} description(s) for {} in {:.2}s",
        result.documents.len(),
        result.session_date,
        result.processing_time.as_secs_f64()
    );

    Ok(())
}
