pub mod config;
pub mod core;
pub mod domain;
pub mod http;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, settings::ServiceSettings};
pub use core::{
    converter::{preview, to_json, to_json_pretty, CsvConverter},
    etl::ConversionEngine,
    pipeline::CsvPipeline,
    service::ConverterService,
};
pub use domain::model::{ConversionId, ConversionOutput, CsvSource, Dataset, Record};
pub use utils::error::{ConvertError, Result};
