//! Effective-POM resolution through an external Maven invocation.
//!
//! When a coordinate is inherited from a parent that is not available
//! locally, Maven itself is asked to materialize the fully resolved model
//! with `help:effective-pom`, writing it to a fixed output file.
//!
//! The Maven exit status is not checked. Failures are logged and the caller
//! reads the output file anyway, so a failed run shows up as a read or
//! missing-field error.

use crate::error::{CoordsError, Result};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// File name of the effective POM inside the system temp directory.
pub const DEFAULT_OUTPUT_FILE: &str = "pom-coords-effective.xml";

/// Number of trailing Maven output lines included in failure logs.
const LOG_TAIL_LINES: usize = 20;

/// Produces a fully resolved POM for a module.
///
/// # Examples
///
/// ```no_run
/// use async_trait::async_trait;
/// use pom_coords_core::EffectivePomResolver;
/// use std::path::{Path, PathBuf};
///
/// struct Prebuilt(PathBuf);
///
/// #[async_trait]
/// impl EffectivePomResolver for Prebuilt {
///     async fn resolve(&self, _pom: &Path) -> pom_coords_core::Result<PathBuf> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait EffectivePomResolver: Send + Sync {
    /// Resolves `pom` and returns the path of the resolved POM XML.
    async fn resolve(&self, pom: &Path) -> Result<PathBuf>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenConfig {
    /// Maven executable, looked up on `PATH` when relative.
    pub executable: PathBuf,
    /// Where the effective POM is written. Any existing file is removed
    /// before every run, unless it is the POM being resolved.
    pub output: PathBuf,
    /// Passed as `-Dmaven.repo.local`.
    pub local_repository: Option<PathBuf>,
    /// Appended after the generated arguments.
    pub extra_args: Vec<String>,
    /// No limit when `None`.
    pub timeout: Option<Duration>,
}

impl Default for MavenConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("mvn"),
            output: std::env::temp_dir().join(DEFAULT_OUTPUT_FILE),
            local_repository: None,
            extra_args: Vec::new(),
            timeout: None,
        }
    }
}

/// Resolver backed by `mvn help:effective-pom`.
#[derive(Debug, Clone, Default)]
pub struct MavenEffectivePom {
    config: MavenConfig,
}

impl MavenEffectivePom {
    pub fn new(config: MavenConfig) -> Self {
        Self { config }
    }

    /// Command-line arguments for resolving `pom`.
    pub fn args(&self, pom: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-q".into(),
            "-f".into(),
            pom.into(),
            "help:effective-pom".into(),
        ];

        let mut output = OsString::from("-Doutput=");
        output.push(&self.config.output);
        args.push(output);

        if let Some(repo) = &self.config.local_repository {
            let mut arg = OsString::from("-Dmaven.repo.local=");
            arg.push(repo);
            args.push(arg);
        }

        args.extend(self.config.extra_args.iter().map(OsString::from));
        args
    }

    /// Refuses an output path that points at `pom` itself, which would
    /// otherwise be deleted and replaced by Maven's output.
    async fn check_output_path(&self, pom: &Path) -> Result<()> {
        let (Ok(output), Ok(pom)) = (
            tokio::fs::canonicalize(&self.config.output).await,
            tokio::fs::canonicalize(pom).await,
        ) else {
            return Ok(());
        };

        if output == pom {
            return Err(CoordsError::OutputIsInput { path: output });
        }
        Ok(())
    }

    async fn remove_stale_output(&self) {
        match tokio::fs::remove_file(&self.config.output).await {
            Ok(()) => tracing::debug!("Removed stale effective POM {:?}", self.config.output),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                "Failed to remove stale effective POM {:?}: {}",
                self.config.output,
                e
            ),
        }
    }
}

#[async_trait]
impl EffectivePomResolver for MavenEffectivePom {
    async fn resolve(&self, pom: &Path) -> Result<PathBuf> {
        self.check_output_path(pom).await?;
        self.remove_stale_output().await;

        let args = self.args(pom);
        tracing::debug!("Running {:?} {:?}", self.config.executable, args);

        let mut command = Command::new(&self.config.executable);
        command
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let run = command.output();
        let output = match self.config.timeout {
            Some(timeout) => tokio::time::timeout(timeout, run)
                .await
                .map_err(|_| CoordsError::MavenTimeout { timeout })?,
            None => run.await,
        };

        match output {
            Ok(out) if out.status.success() => {
                tracing::debug!("Effective POM written to {:?}", self.config.output);
            }
            Ok(out) => {
                tracing::warn!(
                    "{:?} exited with {} for {:?}, continuing anyway\n{}{}",
                    self.config.executable,
                    out.status,
                    pom,
                    tail(&out.stdout),
                    tail(&out.stderr),
                );
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to run {:?} for {:?}, continuing anyway: {}",
                    self.config.executable,
                    pom,
                    e
                );
            }
        }

        Ok(self.config.output.clone())
    }
}

fn tail(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(LOG_TAIL_LINES);
    lines[start..]
        .iter()
        .map(|line| format!("{line}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &Path) -> MavenConfig {
        MavenConfig {
            output: dir.join("effective.xml"),
            ..MavenConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = MavenConfig::default();
        assert_eq!(config.executable, PathBuf::from("mvn"));
        assert_eq!(config.output, std::env::temp_dir().join(DEFAULT_OUTPUT_FILE));
        assert!(config.local_repository.is_none());
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_args_without_local_repository() {
        let resolver = MavenEffectivePom::new(MavenConfig {
            output: PathBuf::from("/tmp/eff.xml"),
            ..MavenConfig::default()
        });
        let args = resolver.args(Path::new("module/pom.xml"));
        assert_eq!(
            args,
            [
                "-q",
                "-f",
                "module/pom.xml",
                "help:effective-pom",
                "-Doutput=/tmp/eff.xml"
            ]
            .map(OsString::from)
        );
    }

    #[test]
    fn test_args_with_local_repository_and_extras() {
        let resolver = MavenEffectivePom::new(MavenConfig {
            output: PathBuf::from("/tmp/eff.xml"),
            local_repository: Some(PathBuf::from("/srv/m2")),
            extra_args: vec!["-o".into(), "-Pci".into()],
            ..MavenConfig::default()
        });
        let args = resolver.args(Path::new("pom.xml"));
        assert_eq!(args[5], OsString::from("-Dmaven.repo.local=/srv/m2"));
        assert_eq!(&args[6..], ["-o", "-Pci"].map(OsString::from));
    }

    #[test]
    fn test_tail_keeps_last_lines() {
        let text: String = (0..30).map(|i| format!("line {i}\n")).collect();
        let tailed = tail(text.as_bytes());
        assert_eq!(tailed.lines().count(), LOG_TAIL_LINES);
        assert!(tailed.starts_with("line 10\n"));
        assert!(tailed.ends_with("line 29\n"));
    }

    #[tokio::test]
    async fn test_missing_executable_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let config = MavenConfig {
            executable: PathBuf::from("/nonexistent/bin/mvn"),
            ..config_in(dir.path())
        };
        std::fs::write(&config.output, "<project/>").unwrap();

        let resolver = MavenEffectivePom::new(config.clone());
        let resolved = resolver.resolve(Path::new("pom.xml")).await.unwrap();

        assert_eq!(resolved, config.output);
        // Stale output from an earlier run must not be reused.
        assert!(!resolved.exists());
    }

    #[tokio::test]
    async fn test_output_pointing_at_pom_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let pom = dir.path().join("pom.xml");
        std::fs::write(&pom, "<project><artifactId>a</artifactId></project>").unwrap();

        let resolver = MavenEffectivePom::new(MavenConfig {
            executable: PathBuf::from("/nonexistent/bin/mvn"),
            output: dir.path().join(".").join("pom.xml"),
            ..MavenConfig::default()
        });
        let result = resolver.resolve(&pom).await;

        assert!(matches!(result, Err(CoordsError::OutputIsInput { .. })));
        let content = std::fs::read_to_string(&pom).unwrap();
        assert!(content.contains("<artifactId>a</artifactId>"));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        fn script(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("fake-mvn");
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[tokio::test]
        async fn test_script_writes_output() {
            let dir = tempfile::tempdir().unwrap();
            let executable = script(
                dir.path(),
                r#"for arg in "$@"; do
  case "$arg" in
    -Doutput=*) out="${arg#-Doutput=}" ;;
  esac
done
echo '<project><version>9</version></project>' > "$out""#,
            );
            let resolver = MavenEffectivePom::new(MavenConfig {
                executable,
                ..config_in(dir.path())
            });

            let resolved = resolver.resolve(Path::new("pom.xml")).await.unwrap();
            let content = std::fs::read_to_string(resolved).unwrap();
            assert!(content.contains("<version>9</version>"));
        }

        #[tokio::test]
        async fn test_nonzero_exit_is_ignored() {
            let dir = tempfile::tempdir().unwrap();
            let executable = script(dir.path(), "echo '[ERROR] boom'\nexit 1");
            let resolver = MavenEffectivePom::new(MavenConfig {
                executable,
                ..config_in(dir.path())
            });

            let resolved = resolver.resolve(Path::new("pom.xml")).await;
            assert!(resolved.is_ok());
        }

        #[tokio::test]
        async fn test_timeout() {
            let dir = tempfile::tempdir().unwrap();
            let executable = script(dir.path(), "sleep 5");
            let resolver = MavenEffectivePom::new(MavenConfig {
                executable,
                timeout: Some(Duration::from_millis(200)),
                ..config_in(dir.path())
            });

            let result = resolver.resolve(Path::new("pom.xml")).await;
            assert!(matches!(result, Err(CoordsError::MavenTimeout { .. })));
        }
    }
}
