/// An AWS region the uploader knows how to reach
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionInfo {
    pub name: &'static str,
    /// DNS suffix of the partition the region belongs to
    pub dns_suffix: &'static str,
}

const AWS: &str = "amazonaws.com";
const AWS_CN: &str = "amazonaws.com.cn";

pub const DEFAULT_REGION: &str = "us-west-1";

pub const SUPPORTED_REGIONS: &[RegionInfo] = &[
    region("us-east-1", AWS),
    region("us-east-2", AWS),
    region("us-west-1", AWS),
    region("us-west-2", AWS),
    region("af-south-1", AWS),
    region("ap-east-1", AWS),
    region("ap-south-1", AWS),
    region("ap-south-2", AWS),
    region("ap-northeast-1", AWS),
    region("ap-northeast-2", AWS),
    region("ap-northeast-3", AWS),
    region("ap-southeast-1", AWS),
    region("ap-southeast-2", AWS),
    region("ap-southeast-3", AWS),
    region("ap-southeast-4", AWS),
    region("ca-central-1", AWS),
    region("ca-west-1", AWS),
    region("eu-central-1", AWS),
    region("eu-central-2", AWS),
    region("eu-west-1", AWS),
    region("eu-west-2", AWS),
    region("eu-west-3", AWS),
    region("eu-north-1", AWS),
    region("eu-south-1", AWS),
    region("eu-south-2", AWS),
    region("il-central-1", AWS),
    region("me-central-1", AWS),
    region("me-south-1", AWS),
    region("sa-east-1", AWS),
    region("us-gov-east-1", AWS),
    region("us-gov-west-1", AWS),
    region("cn-north-1", AWS_CN),
    region("cn-northwest-1", AWS_CN),
];

const fn region(name: &'static str, dns_suffix: &'static str) -> RegionInfo {
    RegionInfo { name, dns_suffix }
}

impl RegionInfo {
    /// Exact-match lookup by region name
    pub fn lookup(name: &str) -> Option<&'static RegionInfo> {
        SUPPORTED_REGIONS.iter().find(|r| r.name == name)
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        SUPPORTED_REGIONS.iter().map(|r| r.name)
    }

    /// Regional S3 host, e.g. `s3.us-west-1.amazonaws.com`
    pub fn s3_endpoint(&self) -> String {
        format!("s3.{}.{}", self.name, self.dns_suffix)
    }
}
