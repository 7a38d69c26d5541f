pub mod cli;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "csv-json-server")]
#[command(about = "Web service that previews CSV uploads and converts them to JSON")]
pub struct CliConfig {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Bind address (default: 127.0.0.1)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (default: 8000)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory converted JSON files are written to (default: ./output)
    #[arg(long)]
    pub output_path: Option<String>,

    /// CSV file converted by `GET /convert`
    #[arg(long)]
    pub default_csv: Option<String>,

    /// Number of rows returned by the upload preview (default: 10)
    #[arg(long)]
    pub preview_rows: Option<usize>,

    /// Field delimiter, a single ASCII character (default: ",")
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Trim whitespace around fields (`--trim true|false`)
    #[arg(long)]
    pub trim: Option<bool>,

    /// Maximum upload size in MiB (default: 16)
    #[arg(long)]
    pub max_upload_mb: Option<usize>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Resolves defaults, the optional TOML file, then command line flags.
    pub fn resolve(&self) -> Result<settings::ServiceSettings> {
        let mut resolved = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                settings::ServiceSettings::from_toml(&toml_config::TomlConfig::from_file(path)?)
            }
            None => settings::ServiceSettings::default(),
        };

        if let Some(host) = &self.host {
            resolved.host = host.clone();
        }
        if let Some(port) = self.port {
            resolved.port = port;
        }
        if let Some(output_path) = &self.output_path {
            resolved.output_path = output_path.clone();
        }
        if let Some(default_csv) = &self.default_csv {
            resolved.default_csv = Some(default_csv.clone());
        }
        if let Some(preview_rows) = self.preview_rows {
            resolved.preview_rows = preview_rows;
        }
        if let Some(delimiter) = &self.delimiter {
            resolved.delimiter = delimiter.clone();
        }
        if let Some(trim) = self.trim {
            resolved.trim = trim;
        }
        if let Some(max_upload_mb) = self.max_upload_mb {
            resolved.max_upload_mb = max_upload_mb;
        }

        Ok(resolved)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_flags_override_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nport = 9000\nhost = \"0.0.0.0\"\n")
            .unwrap();

        let config = CliConfig::parse_from([
            "csv-json-server",
            "--config",
            temp_file.path().to_str().unwrap(),
            "--port",
            "9500",
        ]);
        let settings = config.resolve().unwrap();

        assert_eq!(settings.port, 9500);
        assert_eq!(settings.host, "0.0.0.0");
    }

    #[test]
    fn test_trim_flag_overrides_toml_both_ways() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[conversion]\ntrim = true\n")
            .unwrap();
        let path = temp_file.path().to_str().unwrap();

        let from_file = CliConfig::parse_from(["csv-json-server", "--config", path]);
        assert!(from_file.resolve().unwrap().trim);

        let disabled =
            CliConfig::parse_from(["csv-json-server", "--config", path, "--trim", "false"]);
        assert!(!disabled.resolve().unwrap().trim);

        let enabled = CliConfig::parse_from(["csv-json-server", "--trim", "true"]);
        assert!(enabled.resolve().unwrap().trim);
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let config = CliConfig {
            config: Some("/definitely/not/here.toml".to_string()),
            ..Default::default()
        };
        assert!(config.resolve().is_err());
    }
}
