use tracing::error;

use crate::acl::CannedAcl;
use crate::config::usage;
use crate::error::{Error, ErrorKind};
use crate::region::RegionInfo;

/// Log a fatal error the way the user needs to see it.
///
/// Misuse prints the usage text, an unknown region or ACL is followed by
/// the list of accepted names, anything else is logged as one line with
/// its cause chain.
pub fn report(err: &anyhow::Error, program: &str) {
    let Some(e) = err.downcast_ref::<Error>() else {
        error!("{:#}", err);
        return;
    };

    match e.kind() {
        ErrorKind::Usage => error!("{}", usage(program).trim_end()),
        ErrorKind::Config => {
            error!("{}", e);
            let supported: Option<(&str, Vec<&str>)> = match e {
                Error::InvalidRegion { .. } => Some(("regions", RegionInfo::names().collect())),
                Error::InvalidAcl { .. } => Some(("ACLs", CannedAcl::names().collect())),
                _ => None,
            };
            if let Some((what, names)) = supported {
                error!("Supported {} are:", what);
                for name in names {
                    error!("- {}", name);
                }
            }
        }
        ErrorKind::LocalIo | ErrorKind::Remote => error!("{:#}", err),
    }
}
