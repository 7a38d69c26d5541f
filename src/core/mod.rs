pub mod converter;
pub mod etl;
pub mod pipeline;
pub mod service;

pub use crate::domain::model::{
    ConversionId, ConversionOutput, CsvSource, Dataset, Record, TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
