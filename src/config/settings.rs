use crate::config::toml_config::TomlConfig;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_delimiter, validate_file_extensions, validate_non_empty_string, validate_path,
    validate_positive_number, validate_range, Validate,
};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_PREVIEW_ROWS: usize = 10;
pub const DEFAULT_MAX_UPLOAD_MB: usize = 16;

/// Fully resolved settings: built-in defaults, then the TOML file, then flags.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub host: String,
    pub port: u16,
    pub output_path: String,
    pub default_csv: Option<String>,
    pub preview_rows: usize,
    pub delimiter: String,
    pub trim: bool,
    pub max_upload_mb: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            default_csv: None,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            delimiter: ",".to_string(),
            trim: false,
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
        }
    }
}

impl ServiceSettings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let mut settings = Self::default();
        settings.merge_toml(config);
        settings
    }

    pub fn merge_toml(&mut self, config: &TomlConfig) {
        if let Some(host) = &config.server.host {
            self.host = host.clone();
        }
        if let Some(port) = config.server.port {
            self.port = port;
        }
        if let Some(max_upload_mb) = config.server.max_upload_mb {
            self.max_upload_mb = max_upload_mb;
        }
        if let Some(delimiter) = &config.conversion.delimiter {
            self.delimiter = delimiter.clone();
        }
        if let Some(trim) = config.conversion.trim {
            self.trim = trim;
        }
        if let Some(preview_rows) = config.conversion.preview_rows {
            self.preview_rows = preview_rows;
        }
        if let Some(default_csv) = &config.conversion.default_csv {
            self.default_csv = Some(default_csv.clone());
        }
        if let Some(output_path) = &config.storage.output_path {
            self.output_path = output_path.clone();
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024).saturating_mul(1024)
    }
}

impl ConfigProvider for ServiceSettings {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn default_csv(&self) -> Option<&str> {
        self.default_csv.as_deref()
    }

    fn preview_rows(&self) -> usize {
        self.preview_rows
    }

    fn delimiter(&self) -> u8 {
        // validate() 已保證為單一 ASCII 字元
        self.delimiter.as_bytes().first().copied().unwrap_or(b',')
    }

    fn trim_fields(&self) -> bool {
        self.trim
    }
}

impl Validate for ServiceSettings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("host", &self.host)?;
        validate_path("output_path", &self.output_path)?;
        validate_positive_number("preview_rows", self.preview_rows, 1)?;
        validate_range("max_upload_mb", self.max_upload_mb, 1, 1024)?;
        validate_delimiter("delimiter", &self.delimiter)?;

        if let Some(default_csv) = &self.default_csv {
            validate_path("default_csv", default_csv)?;
            validate_file_extensions("default_csv", &[default_csv.clone()], &["csv"])?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ConvertError;

    #[test]
    fn test_defaults_are_valid() {
        let settings = ServiceSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.bind_address(), "127.0.0.1:8000");
        assert_eq!(settings.delimiter(), b',');
        assert_eq!(settings.max_upload_bytes(), 16 * 1024 * 1024);
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
[server]
port = 9100

[conversion]
delimiter = "\t"
preview_rows = 3
"#,
        )
        .unwrap();

        let settings = ServiceSettings::from_toml(&config);
        assert_eq!(settings.port, 9100);
        assert_eq!(settings.host, DEFAULT_HOST);
        assert_eq!(settings.delimiter(), b'\t');
        assert_eq!(settings.preview_rows(), 3);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let settings = ServiceSettings {
            preview_rows: 0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConvertError::InvalidConfigValueError { .. })
        ));

        let settings = ServiceSettings {
            default_csv: Some("data.json".to_string()),
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = ServiceSettings {
            delimiter: "||".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
