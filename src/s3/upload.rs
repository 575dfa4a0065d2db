use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tracing::{debug, info};

use super::client::{ObjectStore, PutRequest};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::sniff::{SNIFF_LEN, detect_content_type};

/// Everything known about one file right before its PUT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadJob {
    pub local_path: PathBuf,
    /// Size at stat time, sent as Content-Length
    pub size: u64,
    pub content_type: &'static str,
    pub object_key: String,
}

/// Object key for `local_path`: its base name joined under `prefix`.
///
/// Directories in `local_path` are not kept. The join uses `/` and cleans
/// the result (repeated slashes collapse, `.` and `..` segments resolve).
pub fn object_key(prefix: &str, local_path: &Path) -> Result<String> {
    let name = local_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::InvalidFileName {
            path: local_path.to_path_buf(),
        })?;
    Ok(join_key(prefix, name))
}

fn join_key(prefix: &str, name: &str) -> String {
    let rooted = prefix.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in prefix.split('/').chain(std::iter::once(name)) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            s => segments.push(s),
        }
    }

    let joined = segments.join("/");
    if rooted { format!("/{joined}") } else { joined }
}

/// Open `local_path` and work out its size, Content-Type and object key.
///
/// The returned file is rewound to offset 0.
pub async fn prepare(prefix: &str, local_path: &Path) -> Result<(UploadJob, File)> {
    let mut file = File::open(local_path).await.map_err(|source| Error::Open {
        path: local_path.to_path_buf(),
        source,
    })?;

    let metadata = file.metadata().await.map_err(|source| Error::Stat {
        path: local_path.to_path_buf(),
        source,
    })?;
    if !metadata.is_file() {
        return Err(Error::NotRegularFile {
            path: local_path.to_path_buf(),
        });
    }
    let size = metadata.len();

    let mut head = Vec::with_capacity(SNIFF_LEN);
    (&mut file)
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut head)
        .await
        .map_err(|source| Error::Read {
            path: local_path.to_path_buf(),
            source,
        })?;
    let content_type = detect_content_type(&head);

    file.seek(SeekFrom::Start(0))
        .await
        .map_err(|source| Error::Seek {
            path: local_path.to_path_buf(),
            source,
        })?;

    let job = UploadJob {
        local_path: local_path.to_path_buf(),
        size,
        content_type,
        object_key: object_key(prefix, local_path)?,
    };

    Ok((job, file))
}

/// Upload one file to the store's bucket
pub async fn upload_file<S: ObjectStore>(
    store: &S,
    config: &Config,
    local_path: &Path,
) -> Result<UploadJob> {
    let (job, file) = prepare(&config.prefix, local_path).await?;

    info!("uploading {} ({})", local_path.display(), job.content_type);
    debug!(
        "{} -> s3://{}/{} ({} bytes, acl {})",
        local_path.display(),
        config.bucket,
        job.object_key,
        job.size,
        config.acl
    );

    store
        .put_object(PutRequest {
            key: job.object_key.clone(),
            body: file,
            content_length: job.size,
            content_type: job.content_type,
            acl: config.acl,
        })
        .await?;

    Ok(job)
}

/// Upload every file in `config.files`, in order, stopping at the first error
pub async fn upload_all<S: ObjectStore>(store: &S, config: &Config) -> Result<Vec<UploadJob>> {
    let mut jobs = Vec::with_capacity(config.files.len());
    for path in &config.files {
        jobs.push(upload_file(store, config, path).await?);
    }
    Ok(jobs)
}
