pub mod acl;
pub mod config;
pub mod error;
pub mod logging;
pub mod region;
pub mod report;
pub mod s3;
pub mod sniff;

pub use acl::CannedAcl;
pub use config::{Cli, Config};
pub use error::{Error, ErrorKind, Result};
pub use region::RegionInfo;
pub use s3::{ObjectStore, PutRequest, S3Client, UploadJob};
