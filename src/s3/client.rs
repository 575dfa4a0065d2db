use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Builder as S3ConfigBuilder, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::{ByteStream, Length};
use tokio::fs::File;
use tracing::debug;

use crate::acl::CannedAcl;
use crate::config::Config;
use crate::error::{Error, Result};

/// A single-part PUT of an open file
#[derive(Debug)]
pub struct PutRequest {
    pub key: String,
    /// Positioned at offset 0; dropped (and closed) once the PUT returns
    pub body: File,
    pub content_length: u64,
    pub content_type: &'static str,
    pub acl: CannedAcl,
}

/// Destination for uploads, bound to one bucket
pub trait ObjectStore {
    fn put_object(&self, request: PutRequest) -> impl Future<Output = Result<()>>;
}

pub struct S3Client {
    client: Client,
    bucket: String,
}

impl S3Client {
    /// Build a client for `config.bucket` using only the configured region and keys.
    ///
    /// Nothing is read from the environment or shared config files, so
    /// endpoint overrides such as `AWS_ENDPOINT_URL` have no effect.
    pub fn new(config: &Config) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "s3put",
        );

        let s3_config = S3ConfigBuilder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.name))
            .credentials_provider(credentials)
            .build();
        let client = Client::from_conf(s3_config);

        debug!(
            "S3 client for bucket {} via {}",
            config.bucket,
            config.region.s3_endpoint()
        );

        Self {
            client,
            bucket: config.bucket.clone(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

impl ObjectStore for S3Client {
    async fn put_object(&self, request: PutRequest) -> Result<()> {
        let PutRequest {
            key,
            body,
            content_length,
            content_type,
            acl,
        } = request;

        let body = ByteStream::read_from()
            .file(body)
            .length(Length::Exact(content_length))
            .build()
            .await
            .map_err(|e| Error::Upload {
                key: key.clone(),
                message: e.to_string(),
            })?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(body)
            .content_length(content_length as i64)
            .content_type(content_type)
            .acl(acl.into())
            .send()
            .await
            .map_err(|e| Error::Upload {
                key: key.clone(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        debug!("stored s3://{}/{}", self.bucket, key);

        Ok(())
    }
}
