//! Coordinate extraction pipeline.

use crate::effective::EffectivePomResolver;
use crate::error::{CoordsError, Result};
use crate::loader::load_pom;
use crate::pom::PomDocument;
use crate::types::Extraction;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Report `Extraction::Skipped` for `pom`-packaged modules.
    pub skip_pom: bool,
    /// Fill groupId/version from the `<parent>` block before falling back
    /// to Maven.
    pub inherit_parent: bool,
}

pub struct CoordinateExtractor<R> {
    resolver: R,
    options: ExtractOptions,
}

impl<R: EffectivePomResolver> CoordinateExtractor<R> {
    pub fn new(resolver: R, options: ExtractOptions) -> Self {
        Self { resolver, options }
    }

    /// Extracts the coordinates of the POM at `path`.
    ///
    /// Packaging is read from `path` only and defaults to `jar`. When
    /// groupId, artifactId or version is absent the resolver is invoked and
    /// those three fields are read from the resolved POM instead.
    ///
    /// # Errors
    ///
    /// Fails when `path` cannot be read or parsed, or when a field is still
    /// missing after resolution.
    pub async fn extract(&self, path: &Path) -> Result<Extraction> {
        let content = load_pom(path).await?;
        let pom = PomDocument::parse(&content)?;

        let mut raw = pom.raw_coordinates();
        if self.options.inherit_parent
            && let Some(parent) = pom.parent()
        {
            raw.inherit_from(&parent);
        }

        let packaging = raw.packaging_or_default().to_string();
        if self.options.skip_pom && packaging == "pom" {
            tracing::debug!("Skipping {:?}: packaging is pom", path);
            return Ok(Extraction::Skipped { packaging });
        }

        if let Ok(coords) = raw.complete(&packaging) {
            return Ok(Extraction::Coordinates(coords));
        }

        tracing::info!(
            "{:?} does not declare {}, resolving effective POM",
            path,
            raw.missing().join(", ")
        );

        let resolved_path = self.resolver.resolve(path).await?;
        let resolved = PomDocument::parse(&load_pom(&resolved_path).await?)?.raw_coordinates();

        resolved
            .complete(&packaging)
            .map(Extraction::Coordinates)
            .map_err(|field| CoordsError::MissingField {
                field,
                path: resolved_path,
            })
    }
}
