//! Local Parquet persistence and object-storage upload.

pub mod error;
pub mod upload;
pub mod writer;

pub use error::{UploadError, WriteError};
pub use upload::{ObjectStoreUploader, ObjectUploader};
pub use writer::{record_schema, write_records};
