use anyhow::Result;
use clap::Parser;
use langrank::{download, fetch, FetchConfig};
use std::{path::PathBuf, time::Duration};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

/// Download the monthly programming-language ranking as TSV.
#[derive(Debug, Parser)]
#[command(name = "langrank", version, about)]
struct Cli {
    /// Directory receiving `<year>/<year>-<MM>.tsv`.
    #[arg(default_value = ".")]
    save_dir: PathBuf,

    /// Ranking page to scrape.
    #[arg(long, default_value = fetch::DEFAULT_URL)]
    url: Url,

    /// User-Agent header sent with the request.
    #[arg(long, default_value = fetch::DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = fetch::DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cli = Cli::parse();
    let config = FetchConfig {
        url: cli.url,
        user_agent: cli.user_agent,
        timeout: Duration::from_secs(cli.timeout_secs),
    };

    match download(&config, &cli.save_dir)? {
        Some(path) => info!("wrote {}", path.display()),
        None => info!("nothing written"),
    }
    Ok(())
}
