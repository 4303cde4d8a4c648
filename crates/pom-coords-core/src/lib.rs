//! pom.xml coordinate extraction.
//!
//! Reads `groupId`, `artifactId`, `version` and `packaging` from a Maven
//! POM, falling back to `mvn help:effective-pom` when a coordinate is
//! inherited from a parent and absent from the raw file.

pub mod effective;
pub mod error;
pub mod extractor;
pub mod loader;
pub mod pom;
pub mod types;
pub mod xml;

pub use effective::{EffectivePomResolver, MavenConfig, MavenEffectivePom};
pub use error::{CoordsError, Result};
pub use extractor::{CoordinateExtractor, ExtractOptions};
pub use loader::load_pom;
pub use pom::PomDocument;
pub use types::{Coordinates, DEFAULT_PACKAGING, Extraction, ParentRef, RawCoordinates};
pub use xml::{XmlElement, parse_document};
