use clap::Parser;
use pom_coords::{Cli, Settings, logging, run};
use pom_coords_core::{CoordinateExtractor, MavenEffectivePom};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbosity());

    let settings = match Settings::load(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::debug!("Configuration failed: {:?}", e);
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!("Settings: {:?}", settings);

    let extractor = CoordinateExtractor::new(
        MavenEffectivePom::new(settings.maven.clone()),
        settings.options,
    );

    match run(
        &extractor,
        &cli.poms,
        settings.format,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
    .await
    {
        Ok(summary) => summary.exit_code(),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
