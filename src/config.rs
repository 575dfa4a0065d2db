use clap::{CommandFactory, Parser};
use std::env;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use crate::acl::{CannedAcl, DEFAULT_ACL};
use crate::error::{Error, Result};
use crate::region::{DEFAULT_REGION, RegionInfo};

pub const ENV_ACL: &str = "S3_ACL";
pub const ENV_REGION: &str = "S3_REGION";
pub const ENV_BUCKET: &str = "S3_BUCKET";
pub const ENV_ACCESS_KEY: &str = "S3_ACCESS_KEY";
pub const ENV_SECRET_KEY: &str = "S3_SECRET_KEY";

/// Flags that take a value, in their single-dash spelling
const VALUE_FLAGS: &[&str] = &["acl", "reg", "b", "ak", "sk", "p"];

#[derive(Parser, Debug, Default)]
#[command(
    name = "s3put",
    version = env!("CARGO_PKG_VERSION"),
    about = "Upload files to an S3 bucket",
    long_about = "Upload one or more local files to an S3 bucket. Each object is keyed by the file's \
                  base name under an optional prefix, tagged with a canned ACL, and given a Content-Type \
                  sniffed from the first 512 bytes of the file.",
    override_usage = "s3put [flags] <filenames to upload>",
    after_help = "Flags may be written with one dash or two (-acl or --acl, -b=bucket or --b bucket).\n\n\
                  Examples:\n  \
                  s3put -b my-bucket ./report.pdf                 # Upload a single file\n  \
                  s3put -p uploads/2024 -acl public-read *.png    # Upload under a prefix\n\n\
                  Environment (flags take precedence):\n  \
                  S3_ACL, S3_REGION, S3_BUCKET, S3_ACCESS_KEY, S3_SECRET_KEY"
)]
pub struct Cli {
    /// ACL (S3_ACL variable)
    #[arg(long = "acl", value_name = "NAME", allow_hyphen_values = true)]
    pub acl: Option<String>,

    /// region (S3_REGION variable)
    #[arg(long = "reg", value_name = "REGION", allow_hyphen_values = true)]
    pub region: Option<String>,

    /// bucket (S3_BUCKET variable)
    #[arg(long = "b", value_name = "BUCKET", allow_hyphen_values = true)]
    pub bucket: Option<String>,

    /// access key (S3_ACCESS_KEY variable)
    #[arg(long = "ak", value_name = "KEY", allow_hyphen_values = true)]
    pub access_key: Option<String>,

    /// secret key (S3_SECRET_KEY variable)
    #[arg(long = "sk", value_name = "KEY", allow_hyphen_values = true)]
    pub secret_key: Option<String>,

    /// prefix path to add to uploaded filename (subdirectory)
    #[arg(long = "p", value_name = "PREFIX", allow_hyphen_values = true)]
    pub prefix: Option<String>,

    /// Files to upload
    #[arg(value_name = "FILE", trailing_var_arg = true)]
    pub files: Vec<PathBuf>,
}

/// Rewrite single-dash long flags (`-acl x`, `-b=x`) into the `--` form clap expects.
///
/// Rewriting stops at `--` or at the first positional argument; everything
/// after that is passed through untouched and collected as file names.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut out: Vec<OsString> = args.next().into_iter().collect();
    let mut expect_value = false;
    let mut flags_done = false;

    for arg in args {
        if flags_done || expect_value {
            expect_value = false;
            out.push(arg);
            continue;
        }

        let rewritten = match arg.to_str() {
            Some("--") => {
                flags_done = true;
                None
            }
            Some(s) if s.len() > 1 && s.starts_with('-') => {
                let flag = s.trim_start_matches('-');
                let (name, inline_value) = match flag.split_once('=') {
                    Some((name, _)) => (name, true),
                    None => (flag, false),
                };
                if VALUE_FLAGS.contains(&name) {
                    expect_value = !inline_value;
                    Some(OsString::from(format!("--{flag}")))
                } else if name == "help" {
                    Some(OsString::from("--help"))
                } else {
                    // unknown flags are left for clap to report
                    None
                }
            }
            _ => {
                flags_done = true;
                None
            }
        };
        out.push(rewritten.unwrap_or(arg));
    }

    out
}

/// Render the help text shown on misuse: the usage line, then the flags
pub fn usage(program: &str) -> String {
    let mut cmd = Cli::command()
        .override_usage(format!("{program} [flags] <filenames to upload>"))
        .help_template("{usage-heading} {usage}\n\n{all-args}{after-help}");
    cmd.render_help().to_string()
}

/// Resolved, validated settings for one run
#[derive(Clone)]
pub struct Config {
    pub acl: CannedAcl,
    pub region: &'static RegionInfo,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub prefix: String,
    pub files: Vec<PathBuf>,
}

impl Config {
    /// Resolve configuration from parsed flags and the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if no files are given, the bucket or credentials are
    /// missing, or the region or ACL is not recognized
    pub fn from_env(cli: Cli) -> Result<Self> {
        Self::resolve(cli, |key| env::var(key).ok())
    }

    /// Resolve configuration with `flag > environment > default` precedence.
    ///
    /// `lookup` supplies environment values. Validation runs in a fixed
    /// order and the first failure is returned.
    pub fn resolve<F>(cli: Cli, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let acl = cli
            .acl
            .or_else(|| non_empty(ENV_ACL))
            .unwrap_or_else(|| DEFAULT_ACL.to_string());
        let region = cli
            .region
            .or_else(|| non_empty(ENV_REGION))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        let bucket = cli.bucket.or_else(|| lookup(ENV_BUCKET)).unwrap_or_default();
        let access_key = cli
            .access_key
            .or_else(|| lookup(ENV_ACCESS_KEY))
            .unwrap_or_default();
        let secret_key = cli
            .secret_key
            .or_else(|| lookup(ENV_SECRET_KEY))
            .unwrap_or_default();
        let prefix = cli.prefix.unwrap_or_default();

        if cli.files.is_empty() {
            return Err(Error::Usage);
        }
        if bucket.is_empty() {
            return Err(Error::MissingBucket);
        }
        if access_key.is_empty() || secret_key.is_empty() {
            return Err(Error::MissingCredentials);
        }
        let region = Self::validate_region(&region)?;
        let acl = Self::validate_acl(&acl)?;

        Ok(Self {
            acl,
            region,
            bucket,
            access_key,
            secret_key,
            prefix,
            files: cli.files,
        })
    }

    fn validate_region(region: &str) -> Result<&'static RegionInfo> {
        RegionInfo::lookup(region).ok_or_else(|| Error::InvalidRegion {
            region: region.to_string(),
        })
    }

    fn validate_acl(acl: &str) -> Result<CannedAcl> {
        CannedAcl::lookup(acl).ok_or_else(|| Error::InvalidAcl {
            acl: acl.to_string(),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("acl", &self.acl.as_str())
            .field("region", &self.region.name)
            .field("bucket", &self.bucket)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("prefix", &self.prefix)
            .field("files", &self.files)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_env() -> HashMap<String, String> {
        env_of(&[
            (ENV_BUCKET, "b"),
            (ENV_ACCESS_KEY, "k"),
            (ENV_SECRET_KEY, "s"),
        ])
    }

    fn resolve(args: &[&str], env: &HashMap<String, String>) -> Result<Config> {
        let mut argv = vec!["s3put"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(normalize_args(argv)).unwrap();
        Config::resolve(cli, |key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = resolve(&["hello.txt"], &full_env()).unwrap();

        assert_eq!(config.acl, CannedAcl::Private);
        assert_eq!(config.region.name, "us-west-1");
        assert_eq!(config.bucket, "b");
        assert_eq!(config.access_key, "k");
        assert_eq!(config.secret_key, "s");
        assert_eq!(config.prefix, "");
        assert_eq!(config.files, vec![PathBuf::from("hello.txt")]);
    }

    #[test]
    fn test_env_overrides_default() {
        let mut env = full_env();
        env.insert(ENV_ACL.to_string(), "public-read".to_string());
        env.insert(ENV_REGION.to_string(), "eu-west-1".to_string());

        let config = resolve(&["x"], &env).unwrap();
        assert_eq!(config.acl, CannedAcl::PublicRead);
        assert_eq!(config.region.name, "eu-west-1");
    }

    #[test]
    fn test_flag_overrides_env() {
        let mut env = full_env();
        env.insert(ENV_ACL.to_string(), "public-read".to_string());
        env.insert(ENV_REGION.to_string(), "eu-west-1".to_string());

        let config = resolve(
            &[
                "-acl", "private", "-reg", "us-east-1", "-b", "other", "-ak", "k2", "-sk", "s2",
                "x",
            ],
            &env,
        )
        .unwrap();
        assert_eq!(config.acl, CannedAcl::Private);
        assert_eq!(config.region.name, "us-east-1");
        assert_eq!(config.bucket, "other");
        assert_eq!(config.access_key, "k2");
        assert_eq!(config.secret_key, "s2");
    }

    #[test]
    fn test_empty_acl_and_region_env_fall_back_to_default() {
        let mut env = full_env();
        env.insert(ENV_ACL.to_string(), String::new());
        env.insert(ENV_REGION.to_string(), String::new());

        let config = resolve(&["x"], &env).unwrap();
        assert_eq!(config.acl, CannedAcl::Private);
        assert_eq!(config.region.name, DEFAULT_REGION);
    }

    #[test]
    fn test_empty_bucket_flag_wins_over_env() {
        let err = resolve(&["-b", "", "x"], &full_env()).unwrap_err();
        assert!(matches!(err, Error::MissingBucket));
    }

    #[test]
    fn test_no_files_is_usage_error_first() {
        let err = resolve(&[], &HashMap::new()).unwrap_err();
        assert!(matches!(err, Error::Usage));

        let err = resolve(&["-acl", "bogus"], &full_env()).unwrap_err();
        assert!(matches!(err, Error::Usage));
    }

    #[test]
    fn test_validation_order() {
        let err = resolve(&["x"], &HashMap::new()).unwrap_err();
        assert!(matches!(err, Error::MissingBucket));

        let err = resolve(&["x"], &env_of(&[(ENV_BUCKET, "b")])).unwrap_err();
        assert!(matches!(err, Error::MissingCredentials));
        assert_eq!(
            err.to_string(),
            "Both AccessKey and SecretKey should be set"
        );

        let err = resolve(&["-ak", "k", "x"], &env_of(&[(ENV_BUCKET, "b")])).unwrap_err();
        assert!(matches!(err, Error::MissingCredentials));

        let err = resolve(&["-reg", "nowhere", "-acl", "bogus", "x"], &full_env()).unwrap_err();
        assert!(matches!(err, Error::InvalidRegion { ref region } if region == "nowhere"));
    }

    #[test]
    fn test_unknown_acl() {
        let err = resolve(&["-acl", "world-readable", "x"], &full_env()).unwrap_err();
        assert!(matches!(err, Error::InvalidAcl { ref acl } if acl == "world-readable"));
    }

    #[test]
    fn test_prefix_and_file_order() {
        let config = resolve(&["-p", "uploads/2024", "c", "a", "b"], &full_env()).unwrap();
        assert_eq!(config.prefix, "uploads/2024");
        assert_eq!(
            config.files,
            vec![PathBuf::from("c"), PathBuf::from("a"), PathBuf::from("b")]
        );
    }

    #[test]
    fn test_normalize_single_dash_flags() {
        let args = normalize_args(["s3put", "-acl", "public-read", "-b=bucket", "--p", "x", "f"]);
        assert_eq!(
            args,
            vec!["s3put", "--acl", "public-read", "--b=bucket", "--p", "x", "f"]
        );
    }

    #[test]
    fn test_normalize_stops_at_first_positional() {
        let args = normalize_args(["s3put", "-p", "-odd-prefix", "file", "-acl", "x"]);
        assert_eq!(args, vec!["s3put", "--p", "-odd-prefix", "file", "-acl", "x"]);

        let cli = Cli::try_parse_from(normalize_args(["s3put", "-b", "b", "file", "-acl", "x"]))
            .unwrap();
        assert_eq!(cli.acl, None);
        assert_eq!(
            cli.files,
            vec![
                PathBuf::from("file"),
                PathBuf::from("-acl"),
                PathBuf::from("x")
            ]
        );
    }

    #[test]
    fn test_flag_values_may_start_with_dash() {
        let cli = Cli::try_parse_from(normalize_args(["s3put", "-p", "-odd-prefix", "file"]))
            .unwrap();
        assert_eq!(cli.prefix.as_deref(), Some("-odd-prefix"));
        assert_eq!(cli.files, vec![PathBuf::from("file")]);

        let cli = Cli::try_parse_from(normalize_args([
            "s3put", "-ak", "-key", "-sk", "-abc", "-b", "-x", "file",
        ]))
        .unwrap();
        assert_eq!(cli.access_key.as_deref(), Some("-key"));
        assert_eq!(cli.secret_key.as_deref(), Some("-abc"));
        assert_eq!(cli.bucket.as_deref(), Some("-x"));
        assert_eq!(cli.files, vec![PathBuf::from("file")]);
    }

    #[test]
    fn test_normalize_double_dash_and_stdin_name() {
        let args = normalize_args(["s3put", "--", "-b", "x"]);
        assert_eq!(args, vec!["s3put", "--", "-b", "x"]);

        let args = normalize_args(["s3put", "-", "-b"]);
        assert_eq!(args, vec!["s3put", "-", "-b"]);

        let args = normalize_args(["s3put", "-help"]);
        assert_eq!(args, vec!["s3put", "--help"]);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let result = Cli::try_parse_from(normalize_args(["s3put", "-bogus", "x"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_usage_text() {
        let text = usage("/usr/local/bin/s3put");
        assert_eq!(
            text.lines().next(),
            Some("Usage: /usr/local/bin/s3put [flags] <filenames to upload>")
        );
        assert!(!text.contains("Upload files to an S3 bucket"));
        assert!(text.contains("--acl <NAME>"));
        assert!(text.contains("S3_ACCESS_KEY"));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = resolve(&["x"], &full_env()).unwrap();
        let debug = format!("{:?}", config);
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret_key: \"s\""));
    }
}
