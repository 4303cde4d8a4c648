//! Rendering of extracted coordinates.

use crate::error::CliError;
use pom_coords_core::Coordinates;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `groupId:artifactId:version:packaging`
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

pub fn render(coords: &Coordinates, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(coords.to_string()),
        OutputFormat::Json => Ok(serde_json::to_string(coords)?),
    }
}
