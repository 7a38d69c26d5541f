use crate::core::{ConversionOutput, Pipeline};
use crate::utils::error::Result;
use std::time::Instant;

pub struct ConversionEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ConversionEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<ConversionOutput> {
        let started = Instant::now();

        // Extract
        let dataset = self.pipeline.extract().await?;
        tracing::debug!(
            "Extracted {} records ({} columns)",
            dataset.len(),
            dataset.columns().len()
        );

        // Transform
        let transformed = self.pipeline.transform(dataset).await?;
        tracing::debug!("Serialized {} bytes of JSON", transformed.json_output.len());

        // Load
        let output = self.pipeline.load(transformed).await?;

        tracing::info!(
            "✅ Conversion {} finished: {} records, {} bytes in {:?}",
            output.id,
            output.dataset.len(),
            output.bytes_written,
            started.elapsed()
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::converter::CsvConverter;
    use crate::core::pipeline::tests::MockStorage;
    use crate::core::pipeline::CsvPipeline;
    use crate::core::CsvSource;
    use crate::utils::error::ConvertError;

    #[tokio::test]
    async fn test_run_converts_and_stores() {
        let storage = MockStorage::new();
        let source = CsvSource::new("data.csv", "a,b\n1,2\n3,4\n");
        let engine = ConversionEngine::new(CsvPipeline::new(source, CsvConverter::new(), &storage));

        let output = tokio_test::assert_ok!(engine.run().await);

        assert_eq!(output.dataset.len(), 2);
        assert_eq!(storage.file_count().await, 1);
    }

    #[tokio::test]
    async fn test_parse_failure_stores_nothing() {
        let storage = MockStorage::new();
        let source = CsvSource::new("data.csv", "a,b\n\"unterminated\n");
        let engine = ConversionEngine::new(CsvPipeline::new(source, CsvConverter::new(), &storage));

        let err = tokio_test::assert_err!(engine.run().await);

        assert!(matches!(err, ConvertError::ParseError { .. }));
        assert_eq!(storage.file_count().await, 0);
    }
}
