//! Web 服务器主程序入口

#[cfg(feature = "web")]
use clap::Parser;
#[cfg(feature = "web")]
use lexigen::env::{core::LogLevel, EnvVar};
#[cfg(feature = "web")]
use lexigen::translation::TranslationService;
#[cfg(feature = "web")]
use lexigen::web::{WebConfig, WebServer};

/// 命令行参数优先于环境变量
#[cfg(feature = "web")]
#[derive(Parser)]
#[command(
    name = "lexigen-web",
    version,
    about = "LexiGen Web Server",
    after_help = "ENVIRONMENT:\n    \
        LEXIGEN_API_KEY          Generative backend API key (falls back to GEMINI_API_KEY)\n    \
        LEXIGEN_ACCESS_TOKEN     Bearer token required on /api requests\n    \
        LEXIGEN_LOG_LEVEL        Log filter [default: info]"
)]
struct Args {
    /// Bind address [default: LEXIGEN_WEB_BIND_ADDRESS or 127.0.0.1]
    #[arg(short, long, value_name = "ADDRESS")]
    bind: Option<String>,

    /// Port number [default: LEXIGEN_WEB_PORT or 7080]
    #[arg(short, long)]
    port: Option<u16>,
}

#[cfg(feature = "web")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut web_config = WebConfig::from_env()?;
    if let Some(bind) = args.bind {
        web_config.bind_addr = bind;
    }
    if let Some(port) = args.port {
        web_config.port = port;
    }

    init_tracing();
    web_config.validate()?;

    let service = TranslationService::from_env();
    WebServer::new(web_config, service).start().await?;

    Ok(())
}

#[cfg(feature = "web")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let level = LogLevel::get_or_default("info".to_string());
    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(not(feature = "web"))]
fn main() {
    eprintln!("Error: Web feature not enabled. Please compile with --features web");
    std::process::exit(1);
}
