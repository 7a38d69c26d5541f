use crate::domain::model::{ConversionOutput, Dataset, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn default_csv(&self) -> Option<&str>;
    fn preview_rows(&self) -> usize;
    fn delimiter(&self) -> u8;
    fn trim_fields(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Dataset>;
    async fn transform(&self, data: Dataset) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<ConversionOutput>;
}
