//! Checksum list parsing and verification
//!
//! Accepts the GNU `sha1sum` layout (`<hex>  <path>` or `<hex> *<path>`) and
//! the BSD tagged layout (`SHA1 (<path>) = <hex>`). Blank lines and lines
//! starting with `#` are ignored.

use anyhow::{Context, Result};
use sha1_core::error::IoErrorKind;
use sha1_core::{Digest, Error, FileHasher};
use std::fmt;
use std::path::{Path, PathBuf};

const HEX_LEN: usize = 40;

/// One expected digest from a checksum list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumEntry {
    pub expected: Digest,
    pub path: PathBuf,
    /// Line number within the list, starting at 1
    pub line: usize,
}

/// Verification outcome for one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Ok,
    Failed,
    Missing,
    Unreadable,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CheckStatus::Ok => "OK",
            CheckStatus::Failed => "FAILED",
            CheckStatus::Missing => "MISSING",
            CheckStatus::Unreadable => "FAILED open or read",
        };
        f.write_str(text)
    }
}

/// Results of verifying a checksum list, in list order
#[derive(Debug, Default)]
pub struct CheckReport {
    pub results: Vec<(ChecksumEntry, CheckStatus)>,
}

impl CheckReport {
    pub fn all_ok(&self) -> bool {
        self.results
            .iter()
            .all(|(_, status)| *status == CheckStatus::Ok)
    }

    /// Number of entries with the given status
    pub fn count(&self, status: CheckStatus) -> usize {
        self.results.iter().filter(|(_, s)| *s == status).count()
    }
}

/// Parse a checksum list
pub fn parse_checksum_list(content: &str) -> Result<Vec<ChecksumEntry>> {
    let mut entries = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let (hex, path) = split_tagged(line)
            .or_else(|| split_gnu(line))
            .with_context(|| format!("line {}: unrecognised checksum line", index + 1))?;

        let expected: Digest = hex
            .parse()
            .with_context(|| format!("line {}: bad digest", index + 1))?;

        entries.push(ChecksumEntry {
            expected,
            path: PathBuf::from(path),
            line: index + 1,
        });
    }

    Ok(entries)
}

/// `<hex>  <path>` or `<hex> *<path>`
fn split_gnu(line: &str) -> Option<(&str, &str)> {
    let hex = line.get(..HEX_LEN)?;
    let rest = line.get(HEX_LEN..)?;
    let path = rest
        .strip_prefix("  ")
        .or_else(|| rest.strip_prefix(" *"))?;
    (!path.is_empty()).then_some((hex, path))
}

/// `SHA1 (<path>) = <hex>`
fn split_tagged(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix("SHA1 (")?;
    let (path, hex) = rest.rsplit_once(") = ")?;
    (!path.is_empty()).then_some((hex, path))
}

/// Hash every listed file and compare against its expected digest.
///
/// Relative paths are resolved against `base_dir`.
pub async fn verify(
    entries: Vec<ChecksumEntry>,
    base_dir: &Path,
    hasher: &FileHasher,
) -> CheckReport {
    let mut report = CheckReport::default();

    for entry in entries {
        let path = base_dir.join(&entry.path);
        let status = match hasher.hash_file(&path).await {
            Ok(result) if result.digest == entry.expected => CheckStatus::Ok,
            Ok(_) => CheckStatus::Failed,
            Err(Error::Io(io_err)) if io_err.kind == IoErrorKind::FileNotFound => {
                CheckStatus::Missing
            }
            Err(err) => {
                log::debug!("Could not hash {}: {err}", path.display());
                CheckStatus::Unreadable
            }
        };
        report.results.push((entry, status));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABC: &str = "a9993e364706816aba3e25717850c26c9cd0d89d";

    #[test]
    fn test_parse_gnu_text_and_binary() {
        let content = format!("{ABC}  abc.txt\n{ABC} *bin/abc.dat\n");
        let entries = parse_checksum_list(&content).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, PathBuf::from("abc.txt"));
        assert_eq!(entries[1].path, PathBuf::from("bin/abc.dat"));
        assert_eq!(entries[1].line, 2);
        assert_eq!(entries[0].expected.to_hex(), ABC);
    }

    #[test]
    fn test_parse_bsd_tagged() {
        let content = format!("SHA1 (name with ) paren.txt) = {}\n", ABC.to_uppercase());
        let entries = parse_checksum_list(&content).unwrap();

        assert_eq!(entries[0].path, PathBuf::from("name with ) paren.txt"));
        assert_eq!(entries[0].expected.to_hex(), ABC);
    }

    #[test]
    fn test_parse_skips_blank_and_comment_lines() {
        let content = format!("# generated\n\n{ABC}  a\r\n   \n");
        let entries = parse_checksum_list(&content).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].line, 3);
        assert_eq!(entries[0].path, PathBuf::from("a"));
    }

    #[test]
    fn test_parse_reports_line_number() {
        let content = format!("{ABC}  ok\nnot a checksum\n");
        let err = parse_checksum_list(&content).unwrap_err();
        assert!(err.to_string().contains("line 2"));

        let content = format!("{}  bad-hex\n", "g".repeat(40));
        let err = parse_checksum_list(&content).unwrap_err();
        assert!(err.to_string().contains("line 1: bad digest"));
    }

    #[test]
    fn test_parse_rejects_single_space_separator() {
        let content = format!("{ABC} abc.txt\n");
        assert!(parse_checksum_list(&content).is_err());
    }

    #[tokio::test]
    async fn test_verify_statuses() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.txt"), b"abc").unwrap();
        std::fs::write(dir.path().join("bad.txt"), b"abd").unwrap();

        let content = format!("{ABC}  good.txt\n{ABC}  bad.txt\n{ABC}  gone.txt\n");
        let entries = parse_checksum_list(&content).unwrap();
        let report = verify(entries, dir.path(), &FileHasher::default()).await;

        let statuses: Vec<_> = report.results.iter().map(|(_, s)| *s).collect();
        assert_eq!(
            statuses,
            vec![CheckStatus::Ok, CheckStatus::Failed, CheckStatus::Missing]
        );
        assert!(!report.all_ok());
        assert_eq!(report.count(CheckStatus::Ok), 1);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(CheckStatus::Ok.to_string(), "OK");
        assert_eq!(CheckStatus::Failed.to_string(), "FAILED");
        assert_eq!(CheckStatus::Missing.to_string(), "MISSING");
    }
}
