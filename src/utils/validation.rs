use crate::utils::error::{ConvertError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        if let Some(extension) = std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            if !allowed_set.contains(extension) {
                return Err(ConvertError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
        } else {
            return Err(ConvertError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: file.clone(),
                reason: "File has no extension or invalid filename".to_string(),
            });
        }
    }

    Ok(())
}

/// Accepts any name ending in `.csv`, case-sensitive.
pub fn validate_upload_name(file_name: &str) -> Result<()> {
    if !file_name.ends_with(".csv") {
        return Err(ConvertError::ValidationError {
            message: format!("Only CSV files are allowed, got '{}'", file_name),
        });
    }
    Ok(())
}

/// A delimiter must be one ASCII byte that cannot be confused with quoting or line breaks.
pub fn validate_delimiter(field_name: &str, value: &str) -> Result<u8> {
    let invalid = |reason: &str| ConvertError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let bytes = value.as_bytes();
    if bytes.len() != 1 || !bytes[0].is_ascii() {
        return Err(invalid("Delimiter must be a single ASCII character"));
    }

    match bytes[0] {
        b'"' | b'\n' | b'\r' => Err(invalid("Delimiter cannot be a quote or a line break")),
        b => Ok(b),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output_path", "./output").is_ok());
        assert!(validate_path("output_path", "").is_err());
        assert!(validate_path("output_path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("preview_rows", 5, 1).is_ok());
        assert!(validate_positive_number("preview_rows", 0, 1).is_err());
    }

    #[test]
    fn test_validate_file_extensions() {
        let files = vec!["data.csv".to_string()];
        assert!(validate_file_extensions("default_csv", &files, &["csv"]).is_ok());

        let invalid_files = vec!["data.txt".to_string()];
        assert!(validate_file_extensions("default_csv", &invalid_files, &["csv"]).is_err());
    }

    #[test]
    fn test_validate_upload_name() {
        assert!(validate_upload_name("people.csv").is_ok());
        assert!(matches!(
            validate_upload_name("people.xlsx"),
            Err(ConvertError::ValidationError { .. })
        ));
        assert!(validate_upload_name("").is_err());
        assert!(validate_upload_name(".csv").is_ok());
        assert!(validate_upload_name("people.CSV").is_err());
    }

    #[test]
    fn test_validate_delimiter() {
        assert_eq!(validate_delimiter("delimiter", ",").unwrap(), b',');
        assert_eq!(validate_delimiter("delimiter", "\t").unwrap(), b'\t');
        assert!(validate_delimiter("delimiter", ";;").is_err());
        assert!(validate_delimiter("delimiter", "\"").is_err());
        assert!(validate_delimiter("delimiter", "é").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("host", "127.0.0.1").is_ok());
        assert!(validate_non_empty_string("host", "   ").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("max_upload_mb", 16, 1, 1024).is_ok());
        assert!(validate_range("max_upload_mb", 0, 1, 1024).is_err());
    }
}
