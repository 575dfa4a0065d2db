pub mod client;
pub mod upload;

pub use client::{ObjectStore, PutRequest, S3Client};
pub use upload::{UploadJob, object_key, prepare, upload_all, upload_file};
