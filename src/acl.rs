use aws_sdk_s3::types::ObjectCannedAcl;
use std::fmt;

/// Canned ACLs accepted by the `-acl` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CannedAcl {
    Private,
    PublicRead,
    PublicReadWrite,
    AuthenticatedRead,
    BucketOwnerRead,
    BucketOwnerFullControl,
}

/// Every supported ACL with its flag name. Names are case-sensitive.
pub const SUPPORTED_ACLS: [(&str, CannedAcl); 6] = [
    ("private", CannedAcl::Private),
    ("public-read", CannedAcl::PublicRead),
    ("public-read-write", CannedAcl::PublicReadWrite),
    ("authenticated-read", CannedAcl::AuthenticatedRead),
    ("bucket-owner-read", CannedAcl::BucketOwnerRead),
    ("bucket-owner-full-control", CannedAcl::BucketOwnerFullControl),
];

pub const DEFAULT_ACL: &str = "private";

impl CannedAcl {
    /// Look up an ACL by its flag name
    pub fn lookup(name: &str) -> Option<Self> {
        SUPPORTED_ACLS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, acl)| *acl)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::PublicRead => "public-read",
            Self::PublicReadWrite => "public-read-write",
            Self::AuthenticatedRead => "authenticated-read",
            Self::BucketOwnerRead => "bucket-owner-read",
            Self::BucketOwnerFullControl => "bucket-owner-full-control",
        }
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        SUPPORTED_ACLS.iter().map(|(name, _)| *name)
    }
}

impl fmt::Display for CannedAcl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CannedAcl> for ObjectCannedAcl {
    fn from(acl: CannedAcl) -> Self {
        match acl {
            CannedAcl::Private => ObjectCannedAcl::Private,
            CannedAcl::PublicRead => ObjectCannedAcl::PublicRead,
            CannedAcl::PublicReadWrite => ObjectCannedAcl::PublicReadWrite,
            CannedAcl::AuthenticatedRead => ObjectCannedAcl::AuthenticatedRead,
            CannedAcl::BucketOwnerRead => ObjectCannedAcl::BucketOwnerRead,
            CannedAcl::BucketOwnerFullControl => ObjectCannedAcl::BucketOwnerFullControl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_names() {
        for (name, acl) in SUPPORTED_ACLS {
            assert_eq!(CannedAcl::lookup(name), Some(acl));
            assert_eq!(acl.as_str(), name);
        }
        assert_eq!(CannedAcl::lookup(DEFAULT_ACL), Some(CannedAcl::Private));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(CannedAcl::lookup("Private"), None);
        assert_eq!(CannedAcl::lookup("PUBLIC-READ"), None);
        assert_eq!(CannedAcl::lookup("world-readable"), None);
        assert_eq!(CannedAcl::lookup(""), None);
    }

    #[test]
    fn test_sdk_mapping() {
        assert_eq!(
            ObjectCannedAcl::from(CannedAcl::BucketOwnerFullControl).as_str(),
            "bucket-owner-full-control"
        );
        for (name, acl) in SUPPORTED_ACLS {
            assert_eq!(ObjectCannedAcl::from(acl).as_str(), name);
        }
    }

    #[test]
    fn test_names() {
        let names: Vec<_> = CannedAcl::names().collect();
        assert_eq!(names.len(), 6);
        assert!(names.contains(&"bucket-owner-read"));
    }
}
