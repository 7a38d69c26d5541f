use crate::core::converter::{self, CsvConverter};
use crate::core::{ConversionId, ConversionOutput, CsvSource, Dataset, Pipeline, Storage, TransformResult};
use crate::utils::error::Result;
use chrono::Utc;

/// Converts one CSV source and writes the JSON to `<id>.json` in storage.
pub struct CsvPipeline<'a, S: Storage> {
    source: CsvSource,
    converter: CsvConverter,
    storage: &'a S,
    id: ConversionId,
}

impl<'a, S: Storage> CsvPipeline<'a, S> {
    pub fn new(source: CsvSource, converter: CsvConverter, storage: &'a S) -> Self {
        Self {
            source,
            converter,
            storage,
            id: ConversionId::generate(),
        }
    }

    pub fn id(&self) -> &ConversionId {
        &self.id
    }
}

#[async_trait::async_trait]
impl<'a, S: Storage> Pipeline for CsvPipeline<'a, S> {
    async fn extract(&self) -> Result<Dataset> {
        tracing::debug!(
            "Parsing '{}' ({} bytes)",
            self.source.file_name,
            self.source.bytes.len()
        );
        self.converter.parse_bytes(&self.source.bytes)
    }

    async fn transform(&self, data: Dataset) -> Result<TransformResult> {
        let json_output = converter::to_json_pretty(&data)?;
        Ok(TransformResult {
            dataset: data,
            json_output,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<ConversionOutput> {
        let output_path = self.id.file_name();

        tracing::debug!(
            "Writing {} bytes to {}",
            result.json_output.len(),
            output_path
        );
        self.storage
            .write_file(&output_path, result.json_output.as_bytes())
            .await?;

        Ok(ConversionOutput {
            id: self.id.clone(),
            dataset: result.dataset,
            output_path,
            converted_at: Utc::now(),
            bytes_written: result.json_output.len(),
        })
    }
}
