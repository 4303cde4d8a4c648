//! Sequential processing of the POMs named on the command line.

use crate::error::CliError;
use crate::output::{OutputFormat, render};
use pom_coords_core::{CoordinateExtractor, EffectivePomResolver, Extraction};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub printed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Extracts every POM in order, writing one line per result to `out` and
/// one `error:` line per failure to `err`.
///
/// A failing POM does not stop the remaining ones. Only failures to write
/// the output itself are returned as errors.
pub async fn run<R, O, E>(
    extractor: &CoordinateExtractor<R>,
    poms: &[PathBuf],
    format: OutputFormat,
    out: &mut O,
    err: &mut E,
) -> Result<Summary, CliError>
where
    R: EffectivePomResolver,
    O: Write,
    E: Write,
{
    let mut summary = Summary::default();

    for pom in poms {
        match extractor.extract(pom).await {
            Ok(Extraction::Coordinates(coords)) => {
                writeln!(out, "{}", render(&coords, format)?)?;
                summary.printed += 1;
            }
            Ok(Extraction::Skipped { packaging }) => {
                tracing::debug!("No output for {:?} ({} packaging)", pom, packaging);
                summary.skipped += 1;
            }
            Err(e) => {
                tracing::debug!("Extraction failed for {:?}: {:?}", pom, e);
                writeln!(err, "error: {}: {e}", pom.display())?;
                summary.failed += 1;
            }
        }
    }

    out.flush()?;
    tracing::debug!(
        "Processed {} POM(s): {} printed, {} skipped, {} failed",
        poms.len(),
        summary.printed,
        summary.skipped,
        summary.failed
    );
    Ok(summary)
}
