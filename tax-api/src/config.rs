use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tax_core::provider::ProviderConfig;

/// Deployment environment reported at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Progressive income tax service.
///
/// Serves `GET /v1/tax-calculator?income=..&taxYear=..`, fetching the
/// bracket schedule for each request from the configured provider.
#[derive(Debug, Parser)]
#[command(name = "tax-api", version, about)]
pub struct Cli {
    /// Port to listen on.
    #[arg(long, env = "TAX_API_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Environment name, reported in logs.
    #[arg(long, env = "TAX_API_ENV", value_enum, default_value_t = Environment::Development)]
    pub env: Environment,

    /// Bracket provider backend (`http` or `csv`).
    #[arg(long, env = "TAX_API_PROVIDER", default_value = "http")]
    pub provider: String,

    /// Provider source: base URL for `http`, file path for `csv`.
    #[arg(
        long,
        env = "TAX_CALCULATOR_URL",
        default_value = "http://localhost:5000/tax-calculator"
    )]
    pub tax_calculator_url: String,

    /// Timeout for one bracket fetch, in seconds.
    #[arg(long, env = "TAX_API_FETCH_TIMEOUT_SECS", default_value_t = 10)]
    pub fetch_timeout_secs: u64,

    /// Timeout for handling one API request, in seconds.
    #[arg(long, env = "TAX_API_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Also append log records to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            backend: self.provider.to_ascii_lowercase(),
            source: self.tax_calculator_url.clone(),
            request_timeout: Duration::from_secs(self.fetch_timeout_secs),
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_match_local_development() {
        let cli = Cli::try_parse_from(["tax-api"]).unwrap();

        assert_eq!(cli.port, 8000);
        assert_eq!(cli.env, Environment::Development);
        assert_eq!(cli.bind_addr().to_string(), "0.0.0.0:8000");
        assert_eq!(cli.request_timeout(), Duration::from_secs(30));
        assert_eq!(cli.provider_config(), ProviderConfig::default());
        assert_eq!(cli.log_file, None);
    }

    #[test]
    fn provider_flags_build_provider_config() {
        let cli = Cli::try_parse_from([
            "tax-api",
            "--provider",
            "CSV",
            "--tax-calculator-url",
            "brackets.csv",
            "--fetch-timeout-secs",
            "3",
        ])
        .unwrap();

        assert_eq!(
            cli.provider_config(),
            ProviderConfig {
                backend: "csv".to_string(),
                source: "brackets.csv".to_string(),
                request_timeout: Duration::from_secs(3),
            }
        );
    }

    #[test]
    fn env_accepts_known_names_only() {
        let cli = Cli::try_parse_from(["tax-api", "--env", "production"]).unwrap();
        assert_eq!(cli.env.to_string(), "production");

        assert!(Cli::try_parse_from(["tax-api", "--env", "qa"]).is_err());
    }

    #[test]
    fn port_must_be_numeric() {
        assert!(Cli::try_parse_from(["tax-api", "--port", "http"]).is_err());
    }
}
