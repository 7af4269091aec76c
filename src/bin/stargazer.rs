//! stargazer: generate one personalized insight from the command line.

use clap::Parser;
use tracing::info;

use stargazer::{
    Config, GenerationRequest, Language, Secrets, StargazerBuilder, TranslationMethod, ZodiacSign,
};

/// Stargazer CLI
#[derive(Parser)]
#[command(name = "stargazer")]
#[command(version = stargazer::PKG_VERSION)]
#[command(about = "Generate a personalized daily insight")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long, env = "STARGAZER_CONFIG")]
    config: Option<std::path::PathBuf>,

    /// Subject name
    #[arg(long)]
    name: String,

    /// Birth date (YYYY-MM-DD)
    #[arg(long)]
    birth_date: String,

    /// Zodiac sign (e.g. "Leo")
    #[arg(long)]
    sign: ZodiacSign,

    /// Birth time (HH:MM)
    #[arg(long, default_value = "")]
    birth_time: String,

    /// Birth place (city, country)
    #[arg(long, default_value = "")]
    birth_place: String,

    /// Output language: en or hi
    #[arg(short, long, default_value = "en")]
    language: Language,

    /// Override the configured translation method
    #[arg(long)]
    translation: Option<TranslationMethod>,

    /// Print the full insight as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: info; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;
    let secrets = Secrets::load()?;

    let mut builder = StargazerBuilder::from_config(&config, &secrets);
    if let Some(method) = args.translation {
        builder = builder.translation_method(method);
    }
    let engine = builder.build()?;

    info!(
        version = stargazer::PKG_VERSION,
        providers = ?engine.provider_names(),
        "stargazer ready"
    );

    let request = GenerationRequest::new(args.name, args.birth_date, args.sign)
        .birth_time(args.birth_time)
        .birth_place(args.birth_place)
        .language(args.language);

    let insight = engine.generate_insight(&request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&insight)?);
    } else {
        println!("{}", insight.text);
    }

    Ok(())
}
