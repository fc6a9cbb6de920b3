// Command-line and environment configuration.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Backend used by `--local`: the development server's default port.
pub const LOCAL_BACKEND_URL: &str = "http://localhost:5267/api";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "unibytes-seed",
    about = "Seed the UniBytes menu backend with the built-in categories and menu items",
    version
)]
pub struct Cli {
    /// Backend /api base URL, e.g. https://host/api.
    #[arg(long, env = "BACKEND_URL", value_parser = non_empty, required_unless_present = "local")]
    pub base_url: Option<String>,

    /// Target a backend running locally on the default development port.
    /// Overrides --base-url and BACKEND_URL.
    #[arg(long)]
    pub local: bool,

    /// Directory holding candidate menu item images.
    #[arg(long, env = "IMAGE_DIR", default_value = "images")]
    pub image_dir: PathBuf,

    /// Create items without uploading images.
    #[arg(long)]
    pub no_images: bool,

    /// Currency code sent with every menu item.
    #[arg(long, env = "SEED_CURRENCY", default_value = "ron")]
    pub currency: String,

    /// Timeout in seconds for category and menu item calls.
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Seed for the image picker, for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Do not ask for confirmation.
    #[arg(short, long)]
    pub yes: bool,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

fn non_empty(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err("backend URL must not be empty".into());
    }
    Ok(trimmed.to_string())
}

/// Resolved settings for one seeding run.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedConfig {
    pub base_url: String,
    /// `None` disables image uploads entirely.
    pub image_dir: Option<PathBuf>,
    pub currency: String,
    pub timeout: Duration,
    pub rng_seed: Option<u64>,
}

impl From<&Cli> for SeedConfig {
    fn from(cli: &Cli) -> Self {
        let base_url = match (&cli.base_url, cli.local) {
            (_, true) | (None, false) => LOCAL_BACKEND_URL.to_string(),
            (Some(url), false) => url.clone(),
        };
        SeedConfig {
            base_url,
            image_dir: (!cli.no_images).then(|| cli.image_dir.clone()),
            currency: cli.currency.clone(),
            timeout: Duration::from_secs(cli.timeout_secs),
            rng_seed: cli.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("unibytes-seed").chain(args.iter().copied()))
    }

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let cli = parse(&["--base-url", "https://menu.example/api/"]).unwrap();
        let cfg = SeedConfig::from(&cli);
        assert_eq!(cfg.base_url, "https://menu.example/api");
        assert_eq!(cfg.currency, "ron");
        assert_eq!(cfg.image_dir, Some(PathBuf::from("images")));
        assert_eq!(cfg.timeout, Duration::from_secs(10));
    }

    #[test]
    fn local_targets_development_server() {
        let cli = parse(&["--local", "--currency", "USD", "--no-images"]).unwrap();
        let cfg = SeedConfig::from(&cli);
        assert_eq!(cfg.base_url, LOCAL_BACKEND_URL);
        assert_eq!(cfg.currency, "USD");
        assert_eq!(cfg.image_dir, None);
    }

    #[test]
    fn empty_base_url_is_rejected() {
        assert!(parse(&["--base-url", " / "]).is_err());
    }

    #[test]
    fn local_overrides_base_url() {
        let cli = parse(&["--base-url", "http://x/api", "--local"]).unwrap();
        assert_eq!(SeedConfig::from(&cli).base_url, LOCAL_BACKEND_URL);
    }
}
