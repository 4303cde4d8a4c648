//! Reading coordinates out of a parsed POM.

use crate::error::{CoordsError, Result};
use crate::types::{ParentRef, RawCoordinates};
use crate::xml::{XmlElement, parse_document};

/// A parsed POM, positioned on its `<project>` element.
#[derive(Debug, Clone)]
pub struct PomDocument {
    project: XmlElement,
}

impl PomDocument {
    /// Parses `content` and locates the `<project>` element.
    ///
    /// `mvn help:effective-pom` on a multi-module build writes a
    /// `<projects>` root; the first `<project>` under it is the module the
    /// command was run against.
    pub fn parse(content: &str) -> Result<Self> {
        let root = parse_document(content)?;
        match root.name.as_str() {
            "project" => Ok(Self { project: root }),
            "projects" => root
                .children
                .into_iter()
                .find(|c| c.name == "project")
                .map(|project| Self { project })
                .ok_or_else(|| CoordsError::MissingProject {
                    root: "projects".into(),
                }),
            _ => Err(CoordsError::MissingProject { root: root.name }),
        }
    }

    pub fn project(&self) -> &XmlElement {
        &self.project
    }

    /// Coordinates declared directly on `<project>`.
    pub fn raw_coordinates(&self) -> RawCoordinates {
        RawCoordinates {
            group_id: self.text("groupId"),
            artifact_id: self.text("artifactId"),
            version: self.text("version"),
            packaging: self.text("packaging"),
        }
    }

    pub fn parent(&self) -> Option<ParentRef> {
        let parent = self.project.child("parent")?;
        let text = |name: &str| parent.child_text(name).map(str::to_string);
        Some(ParentRef {
            group_id: text("groupId"),
            artifact_id: text("artifactId"),
            version: text("version"),
        })
    }

    fn text(&self, name: &str) -> Option<String> {
        self.project.child_text(name).map(str::to_string)
    }
}
