//! End-to-end news ingest: credential → fetch → normalize → Parquet → upload.

pub mod error;
pub mod naming;
pub mod pipeline;

pub use error::PipelineError;
pub use naming::{object_key, output_filename, storage_uri};
pub use pipeline::{NewsPipeline, PipelineSettings};
