//! Domain types for Maven coordinates.

use serde::Serialize;
use std::fmt;

/// Packaging assumed when `<packaging>` is absent.
pub const DEFAULT_PACKAGING: &str = "jar";

/// A fully populated `groupId:artifactId:version:packaging` tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub packaging: String,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.version, self.packaging
        )
    }
}

/// Coordinates as written in a single POM, before any resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCoordinates {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: Option<String>,
}

impl RawCoordinates {
    /// Declared packaging, or `jar`.
    pub fn packaging_or_default(&self) -> &str {
        self.packaging.as_deref().unwrap_or(DEFAULT_PACKAGING)
    }

    /// Names of the absent groupId/artifactId/version fields, in that order.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.group_id.is_none() {
            missing.push("groupId");
        }
        if self.artifact_id.is_none() {
            missing.push("artifactId");
        }
        if self.version.is_none() {
            missing.push("version");
        }
        missing
    }

    /// Fills groupId and version from `<parent>` the way Maven inherits them.
    ///
    /// artifactId is never inherited.
    pub fn inherit_from(&mut self, parent: &ParentRef) {
        if self.group_id.is_none() {
            self.group_id.clone_from(&parent.group_id);
        }
        if self.version.is_none() {
            self.version.clone_from(&parent.version);
        }
    }

    /// Completes the coordinates with `packaging`.
    ///
    /// Fails with the name of the first missing field.
    pub fn complete(&self, packaging: &str) -> Result<Coordinates, &'static str> {
        let field = |value: &Option<String>, name: &'static str| value.clone().ok_or(name);
        Ok(Coordinates {
            group_id: field(&self.group_id, "groupId")?,
            artifact_id: field(&self.artifact_id, "artifactId")?,
            version: field(&self.version, "version")?,
            packaging: packaging.to_string(),
        })
    }
}

/// The `<parent>` block of a POM.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentRef {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
}

/// Result of extracting one POM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Coordinates(Coordinates),
    /// Packaging was `pom` and skipping was requested.
    Skipped { packaging: String },
}
