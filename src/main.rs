//! LexiGen 命令行工具

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use lexigen::env::{core as env_core, generate_env_docs, EnvConfig, EnvVar};
use lexigen::translation::config::{config_file_exists, load_service_config, ConfigManager, ServiceConfig};
use lexigen::translation::review::violations;
use lexigen::translation::{
    select_engine, LegalDomain, TranslationConfiguration, TranslationService, TranslationStyle,
};

#[derive(Parser)]
#[command(name = "lexigen", version, about = "Structured legal-document translation workbench")]
struct Cli {
    /// Service configuration file (TOML or JSON)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show which engine a style is routed to
    Engine {
        #[arg(short, long, default_value = "Legal")]
        style: TranslationStyle,
    },

    /// Translate a structured document
    Translate {
        /// Input file
        file: PathBuf,

        #[command(flatten)]
        options: TranslationOptions,

        /// Write the translation to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check glossary usage between a source document and its translation
    Review {
        source: PathBuf,
        target: PathBuf,

        #[command(flatten)]
        options: TranslationOptions,
    },

    /// Run the structural and terminology audit
    Audit { source: PathBuf, target: PathBuf },

    /// Print the effective configuration
    Config {
        /// Write an example configuration file to this path
        #[arg(long)]
        example: Option<String>,

        /// Print documentation for all environment variables
        #[arg(long)]
        env_docs: bool,
    },
}

#[derive(clap::Args)]
struct TranslationOptions {
    #[arg(short, long, default_value = "Legal")]
    style: TranslationStyle,

    #[arg(short, long, default_value = "General")]
    domain: LegalDomain,

    #[arg(long, default_value = "pt-BR")]
    from: String,

    #[arg(long, default_value = "en-US")]
    to: String,

    #[arg(long, default_value = "US")]
    jurisdiction: String,

    /// Format numbers for the target locale
    #[arg(long)]
    numeric: bool,

    /// Custom glossary term, repeatable
    #[arg(short = 't', long = "term", value_name = "SOURCE=TARGET", value_parser = parse_term)]
    terms: Vec<(String, String)>,
}

impl TranslationOptions {
    fn into_configuration(self) -> Result<TranslationConfiguration, Box<dyn std::error::Error>> {
        let mut config = TranslationConfiguration {
            source_lang: self.from,
            target_lang: self.to,
            jurisdiction: self.jurisdiction,
            style: self.style,
            format_numeric: self.numeric,
            legal_domain: self.domain,
            ..Default::default()
        };
        for (source, target) in &self.terms {
            config.custom_terms.add(source, target);
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_term(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((source, target)) if !source.trim().is_empty() && !target.trim().is_empty() => {
            Ok((source.trim().to_string(), target.trim().to_string()))
        }
        _ => Err(format!("expected SOURCE=TARGET, got '{}'", value)),
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let level = env_core::LogLevel::get_or_default("info".to_string());
    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(!env_core::NoColor::get_or_default(false))
        .with_writer(std::io::stderr)
        .init();
}

fn service_config(path: Option<&str>) -> Result<ServiceConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(ConfigManager::from_file(path)?.into_config()),
        None => Ok(load_service_config()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Engine { style } => {
            let config = TranslationConfiguration {
                style,
                ..Default::default()
            };
            println!("{}", select_engine(&config));
        }
        Command::Translate {
            file,
            options,
            output,
        } => {
            let config = options.into_configuration()?;
            let text = fs::read_to_string(&file)?;
            let service = TranslationService::new(service_config(cli.config.as_deref())?);

            let result = service.translate(&text, &config).await;
            eprintln!("Engine: {}", result.engine);

            match output {
                Some(path) => fs::write(path, &result.text)?,
                None => println!("{}", result.text),
            }
        }
        Command::Review {
            source,
            target,
            options,
        } => {
            let config = options.into_configuration()?;
            let source = fs::read_to_string(source)?;
            let target = fs::read_to_string(target)?;
            let service = TranslationService::new(service_config(cli.config.as_deref())?);

            let findings = service.review(&source, &target, &config);
            println!("{}", serde_json::to_string_pretty(&findings)?);
            eprintln!("{} finding(s), {} violation(s)", findings.len(), violations(&findings));
        }
        Command::Audit { source, target } => {
            let source = fs::read_to_string(source)?;
            let target = fs::read_to_string(target)?;
            let service = TranslationService::new(service_config(cli.config.as_deref())?);

            let report = service.audit(&source, &target).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Config { example, env_docs } => {
            if let Some(path) = example {
                ConfigManager::generate_example_config(&path)?;
                println!("Example configuration written to {}", path);
                return Ok(());
            }

            if env_docs {
                print!("{}", generate_env_docs());
                return Ok(());
            }

            EnvConfig::from_env()?.print_summary();
            if cli.config.is_none() && !config_file_exists() {
                println!("  Config File: [none, using defaults]");
            }
            let config = service_config(cli.config.as_deref())?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
