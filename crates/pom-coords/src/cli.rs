//! Command-line arguments.

use crate::logging::Verbosity;
use crate::output::OutputFormat;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Print `groupId:artifactId:version:packaging` for Maven POM files.
///
/// Coordinates inherited from a parent are resolved by running
/// `mvn help:effective-pom`.
#[derive(Parser, Debug)]
#[command(name = "pom-coords", version)]
pub struct Cli {
    /// POM files to read, processed in order
    #[arg(value_name = "POM", required = true)]
    pub poms: Vec<PathBuf>,

    /// Print nothing for modules with `pom` packaging
    #[arg(long)]
    pub skip_pom: bool,

    /// Take a missing groupId/version from <parent> before invoking Maven
    #[arg(long)]
    pub inherit_parent: bool,

    /// Local repository passed to Maven as -Dmaven.repo.local
    #[arg(long, value_name = "DIR", env = "POM_COORDS_LOCAL_REPO")]
    pub local_repo: Option<PathBuf>,

    /// Maven executable
    #[arg(long, value_name = "PATH", env = "POM_COORDS_MVN")]
    pub mvn: Option<PathBuf>,

    /// Where Maven writes the effective POM. An existing file at this path
    /// is deleted before each Maven run; the POM being resolved is refused
    #[arg(long, value_name = "PATH")]
    pub effective_pom: Option<PathBuf>,

    /// Extra argument for Maven (repeatable)
    #[arg(long = "maven-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub maven_args: Vec<String>,

    /// Kill Maven after this many seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// JSON configuration file
    #[arg(long, value_name = "FILE", env = "POM_COORDS_CONFIG")]
    pub config: Option<PathBuf>,

    /// More logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Level(self.verbose)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_single_path() {
        let cli = Cli::try_parse_from(["pom-coords", "pom.xml"]).unwrap();
        assert_eq!(cli.poms, [PathBuf::from("pom.xml")]);
        assert!(!cli.skip_pom);
        assert!(cli.format.is_none());
        assert_eq!(cli.verbosity(), Verbosity::Level(0));
    }

    #[test]
    fn test_path_required() {
        assert!(Cli::try_parse_from(["pom-coords"]).is_err());
    }

    #[test]
    fn test_all_options() {
        let cli = Cli::try_parse_from([
            "pom-coords",
            "--skip-pom",
            "--inherit-parent",
            "--local-repo",
            "/srv/m2",
            "--mvn",
            "/opt/maven/bin/mvn",
            "--effective-pom",
            "/tmp/eff.xml",
            "--maven-arg",
            "-o",
            "--maven-arg=-Pci",
            "--timeout",
            "60",
            "--format",
            "json",
            "-vv",
            "a/pom.xml",
            "b/pom.xml",
        ])
        .unwrap();

        assert!(cli.skip_pom);
        assert!(cli.inherit_parent);
        assert_eq!(cli.local_repo, Some(PathBuf::from("/srv/m2")));
        assert_eq!(cli.mvn, Some(PathBuf::from("/opt/maven/bin/mvn")));
        assert_eq!(cli.effective_pom, Some(PathBuf::from("/tmp/eff.xml")));
        assert_eq!(cli.maven_args, ["-o", "-Pci"]);
        assert_eq!(cli.timeout, Some(60));
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.verbosity(), Verbosity::Level(2));
        assert_eq!(cli.poms.len(), 2);
    }

    #[test]
    fn test_timeout_must_be_positive() {
        assert!(Cli::try_parse_from(["pom-coords", "--timeout", "0", "pom.xml"]).is_err());
        let cli = Cli::try_parse_from(["pom-coords", "--timeout", "1", "pom.xml"]).unwrap();
        assert_eq!(cli.timeout, Some(1));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["pom-coords", "-q", "-v", "pom.xml"]).is_err());
        let cli = Cli::try_parse_from(["pom-coords", "-q", "pom.xml"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
    }
}
