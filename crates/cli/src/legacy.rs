//! Single-dash long flags
//!
//! s3upload has always accepted Go-style flags such as `-bucket name` and
//! `-dir=/srv/www`. They are rewritten to their `--` form before clap parses
//! the command line. Unknown single-dash words are left untouched so clap can
//! report them.

use std::ffi::OsString;

/// Long flag names accepted with a single dash
const LONG_FLAGS: &[&str] = &[
    "bucket",
    "dir",
    "verbose",
    "help",
    "version",
    "recursive",
    "include-unknown-mime-types",
    "ignore",
    "s3-prefix",
    "region",
    "endpoint-url",
    "dry-run",
    "json",
    "no-color",
    "quiet",
];

/// Flags whose value may follow as the next word
const VALUE_FLAGS: &[&str] = &["bucket", "dir", "ignore", "s3-prefix", "region", "endpoint-url"];

/// Rewrite `-name` and `-name=value` to `--name` forms.
///
/// The first argument is the program name and everything after `--` is
/// passed through unchanged. The word after a value flag is its value and is
/// never rewritten, so `-ignore -json` ignores a file named `-json`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut passthrough = false;
    let mut expect_value = false;

    for (i, arg) in args.into_iter().map(Into::into).enumerate() {
        if i == 0 || passthrough || expect_value {
            expect_value = false;
            normalized.push(arg);
            continue;
        }

        if arg == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }

        if let Some(flag) = arg.to_str() {
            expect_value = takes_separate_value(flag);
        }

        match arg.to_str().and_then(rewrite) {
            Some(long) => normalized.push(OsString::from(long)),
            None => normalized.push(arg),
        }
    }

    normalized
}

fn rewrite(arg: &str) -> Option<String> {
    let rest = arg.strip_prefix('-')?;
    if rest.starts_with('-') {
        return None;
    }

    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    LONG_FLAGS.contains(&name).then(|| format!("-{arg}"))
}

/// True for `-name`/`--name` of a value flag written without `=value`
fn takes_separate_value(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    let name = rest.strip_prefix('-').unwrap_or(rest);
    VALUE_FLAGS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(args: &[&str]) -> Vec<String> {
        normalize_args(args.iter().copied())
            .into_iter()
            .map(|a| a.into_string().unwrap())
            .collect()
    }

    #[test]
    fn test_rewrites_single_dash_long_flags() {
        assert_eq!(
            normalize(&["s3upload", "-bucket", "b", "-s3-prefix=site", "-recursive"]),
            vec!["s3upload", "--bucket", "b", "--s3-prefix=site", "--recursive"]
        );
    }

    #[test]
    fn test_leaves_other_arguments_alone() {
        assert_eq!(
            normalize(&["s3upload", "--dir", "/srv", "-n", "-q", "-bogus", "value"]),
            vec!["s3upload", "--dir", "/srv", "-n", "-q", "-bogus", "value"]
        );
    }

    #[test]
    fn test_stops_after_double_dash() {
        assert_eq!(
            normalize(&["-help", "--", "-bucket"]),
            vec!["-help", "--", "-bucket"]
        );
    }

    #[test]
    fn test_flag_values_are_not_rewritten() {
        assert_eq!(
            normalize(&["s3upload", "-ignore", "-json", "-bucket=b", "-dir", "-help"]),
            vec!["s3upload", "--ignore", "-json", "--bucket=b", "--dir", "-help"]
        );
        assert_eq!(
            normalize(&["s3upload", "--s3-prefix", "-verbose", "-recursive"]),
            vec!["s3upload", "--s3-prefix", "-verbose", "--recursive"]
        );
    }
}
