//! Orchestration behind the HTTP routes.
//!
//! Each conversion is written to its own `<id>.json`; the service only keeps
//! the id of the most recent one, so concurrent requests never share an
//! output file.

use crate::core::converter::CsvConverter;
use crate::core::etl::ConversionEngine;
use crate::core::pipeline::CsvPipeline;
use crate::core::{ConfigProvider, ConversionId, ConversionOutput, CsvSource, Dataset, Storage};
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::validate_upload_name;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
pub struct Preview {
    pub dataset: Dataset,
    pub total_rows: usize,
}

pub struct ConverterService<S: Storage> {
    storage: S,
    converter: CsvConverter,
    preview_rows: usize,
    default_csv: Option<PathBuf>,
    last_conversion: RwLock<Option<ConversionId>>,
}

impl<S: Storage> ConverterService<S> {
    pub fn new(storage: S, converter: CsvConverter, preview_rows: usize) -> Self {
        Self {
            storage,
            converter,
            preview_rows,
            default_csv: None,
            last_conversion: RwLock::new(None),
        }
    }

    pub fn from_config<C: ConfigProvider>(storage: S, config: &C) -> Self {
        let converter = CsvConverter::new()
            .with_delimiter(config.delimiter())
            .with_trim(config.trim_fields());
        let mut service = Self::new(storage, converter, config.preview_rows());
        service.default_csv = config.default_csv().map(PathBuf::from);
        service
    }

    pub fn with_default_csv(mut self, path: impl AsRef<Path>) -> Self {
        self.default_csv = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn default_preview_rows(&self) -> usize {
        self.preview_rows
    }

    /// Parses an upload and returns its first rows. Nothing is stored.
    pub async fn preview_upload(&self, upload: CsvSource, rows: Option<usize>) -> Result<Preview> {
        validate_upload_name(&upload.file_name)?;

        let dataset = self.converter.parse_bytes(&upload.bytes)?;
        let rows = rows.unwrap_or(self.preview_rows);
        tracing::debug!(
            "Previewing {} of {} rows from '{}'",
            rows.min(dataset.len()),
            dataset.len(),
            upload.file_name
        );

        Ok(Preview {
            total_rows: dataset.len(),
            dataset: dataset.preview(rows),
        })
    }

    pub async fn convert_upload(&self, upload: CsvSource) -> Result<ConversionOutput> {
        validate_upload_name(&upload.file_name)?;
        self.convert(upload).await
    }

    /// Converts the configured default CSV file.
    pub async fn convert_default(&self) -> Result<ConversionOutput> {
        let path = self
            .default_csv
            .as_ref()
            .ok_or_else(|| ConvertError::NotFoundError {
                message: "No default CSV file is configured".to_string(),
            })?;

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConvertError::NotFoundError {
                    message: format!("Default CSV file not found: {}", path.display()),
                });
            }
            Err(e) => return Err(e.into()),
        };
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.convert(CsvSource::new(file_name, bytes)).await
    }

    /// The stored JSON for `id`, or for the most recent conversion when `id` is `None`.
    pub async fn download(&self, id: Option<&ConversionId>) -> Result<Vec<u8>> {
        let id = match id {
            Some(id) => id.clone(),
            None => self
                .last_conversion()
                .await
                .ok_or_else(|| ConvertError::NotFoundError {
                    message: "No JSON file found. Upload a CSV first.".to_string(),
                })?,
        };

        match self.storage.read_file(&id.file_name()).await {
            Ok(bytes) => Ok(bytes),
            Err(ConvertError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ConvertError::NotFoundError {
                    message: format!("No conversion with id {}", id),
                })
            }
            Err(e) => Err(e),
        }
    }

    pub async fn last_conversion(&self) -> Option<ConversionId> {
        self.last_conversion.read().await.clone()
    }

    async fn convert(&self, source: CsvSource) -> Result<ConversionOutput> {
        tracing::info!("🔄 Converting '{}'", source.file_name);

        let pipeline = CsvPipeline::new(source, self.converter.clone(), &self.storage);
        let output = ConversionEngine::new(pipeline).run().await?;

        // 檔案寫入完成後才更新指標
        *self.last_conversion.write().await = Some(output.id.clone());
        Ok(output)
    }
}
