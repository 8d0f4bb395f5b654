//! Scan engine that shells out to the `clamscan` binary.

use super::error::EngineError;
use super::settings::ClamscanSettings;
use super::traits::{ScanEngine, ScanVerdict};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;
use tracing::trace;

/// Runs `clamscan` once per file.
///
/// Exit status 0 means clean, 1 means infected; anything else is an error.
#[derive(Debug, Clone)]
pub struct ClamscanEngine {
    binary: PathBuf,
    database: Option<PathBuf>,
    scan_archives: bool,
    timeout: Duration,
}

impl ClamscanEngine {
    pub fn from_settings(settings: &ClamscanSettings) -> Self {
        Self {
            binary: settings.path.clone(),
            database: settings.database.clone(),
            scan_archives: settings.scan_archives,
            timeout: settings.timeout,
        }
    }

    async fn run(&self, args: Vec<OsString>) -> Result<Output, EngineError> {
        let mut command = Command::new(&self.binary);
        command.args(args).kill_on_drop(true);

        tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| EngineError::Timeout(self.timeout))?
            .map_err(|source| EngineError::Spawn {
                binary: self.binary.clone(),
                source,
            })
    }

    fn scan_args(&self, path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["--no-summary".into(), "--stdout".into()];
        if let Some(db) = &self.database {
            let mut arg = OsString::from("--database=");
            arg.push(db);
            args.push(arg);
        }
        args.push(if self.scan_archives {
            "--scan-archive=yes".into()
        } else {
            "--scan-archive=no".into()
        });
        args.push("--".into());
        args.push(path.as_os_str().to_owned());
        args
    }
}

/// Extract threat names from clamscan's `<path>: <name> FOUND` lines.
pub fn parse_found_lines(stdout: &str, path: &Path) -> Vec<String> {
    let prefix = format!("{}: ", path.display());
    stdout
        .lines()
        .filter_map(|line| {
            let line = line.trim_end();
            let body = line
                .strip_prefix(&prefix)
                .or_else(|| line.rsplit_once(": ").map(|(_, rest)| rest))?;
            body.strip_suffix("FOUND").map(|name| name.trim().to_string())
        })
        .filter(|name| !name.is_empty())
        .collect()
}

#[async_trait]
impl ScanEngine for ClamscanEngine {
    fn name(&self) -> &str {
        "clamscan"
    }

    async fn ping(&self) -> Result<(), EngineError> {
        let output = self.run(vec!["--version".into()]).await?;
        if output.status.success() {
            Ok(())
        } else {
            Err(EngineError::UnexpectedExit {
                binary: self.binary.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    async fn scan(&self, path: &Path) -> Result<ScanVerdict, EngineError> {
        let output = self.run(self.scan_args(path)).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        trace!(path = %path.display(), code = ?output.status.code(), "clamscan finished");

        match output.status.code() {
            Some(0) => Ok(ScanVerdict::clean()),
            Some(1) => Ok(ScanVerdict::infected(parse_found_lines(&stdout, path))),
            code => Err(EngineError::UnexpectedExit {
                binary: self.binary.clone(),
                code,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(binary: impl Into<PathBuf>) -> ClamscanEngine {
        ClamscanEngine::from_settings(&ClamscanSettings {
            path: binary.into(),
            timeout: Duration::from_secs(10),
            ..ClamscanSettings::default()
        })
    }

    #[test]
    fn test_parse_found_lines() {
        let path = Path::new("/srv/up: load/a.txt");
        let stdout = "/srv/up: load/a.txt: Eicar-Test-Signature FOUND\n";
        assert_eq!(parse_found_lines(stdout, path), vec!["Eicar-Test-Signature"]);
    }

    #[test]
    fn test_parse_found_lines_ignores_ok() {
        let path = Path::new("/srv/a.txt");
        assert!(parse_found_lines("/srv/a.txt: OK\n", path).is_empty());
    }

    #[test]
    fn test_scan_args_with_database() {
        let mut e = engine("/usr/bin/clamscan");
        e.database = Some(PathBuf::from("/var/lib/clamav"));
        let args = e.scan_args(Path::new("/srv/a.txt"));
        assert!(args.contains(&"--database=/var/lib/clamav".into()));
        assert!(args.contains(&"--scan-archive=yes".into()));
        assert_eq!(args.last().unwrap(), "/srv/a.txt");
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let e = engine("/nonexistent/bin/clamscan");
        assert!(matches!(e.ping().await, Err(EngineError::Spawn { .. })));
    }

    #[cfg(unix)]
    mod with_fake_binary {
        use super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        /// Writes a shell script that mimics clamscan's exit codes.
        fn fake_clamscan(dir: &Path) -> PathBuf {
            let script = dir.join("clamscan");
            fs::write(
                &script,
                r#"#!/bin/sh
if [ "$1" = "--version" ]; then echo "ClamAV 1.4.0"; exit 0; fi
for last; do :; done
if [ ! -r "$last" ]; then echo "$last: Can't open file" >&2; exit 2; fi
if grep -q EICAR "$last"; then echo "$last: Eicar-Test-Signature FOUND"; exit 1; fi
echo "$last: OK"
exit 0
"#,
            )
            .unwrap();
            fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
            script
        }

        #[tokio::test]
        async fn test_scan_verdicts() {
            let dir = TempDir::new().unwrap();
            let e = engine(fake_clamscan(dir.path()));
            let clean = dir.path().join("clean.txt");
            let dirty = dir.path().join("dirty.txt");
            fs::write(&clean, "hello").unwrap();
            fs::write(&dirty, "X5O EICAR").unwrap();

            e.ping().await.unwrap();
            assert_eq!(e.scan(&clean).await.unwrap(), ScanVerdict::clean());
            assert_eq!(
                e.scan(&dirty).await.unwrap(),
                ScanVerdict::infected(["Eicar-Test-Signature"])
            );
        }

        #[tokio::test]
        async fn test_unreadable_file_is_unexpected_exit() {
            let dir = TempDir::new().unwrap();
            let e = engine(fake_clamscan(dir.path()));

            let result = e.scan(&dir.path().join("missing.txt")).await;
            assert!(matches!(
                result,
                Err(EngineError::UnexpectedExit { code: Some(2), .. })
            ));
        }
    }
}
