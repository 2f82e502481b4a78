//! Artifact kinds and their template/path selection

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which artifact a generation call produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// Resource binding source stub
    Resource,
    /// Data source binding source stub
    DataSource,
    /// Documentation stub
    Doc,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::Resource,
        ArtifactKind::DataSource,
        ArtifactKind::Doc,
    ];

    /// Name the template body is registered under
    pub fn template_name(&self) -> &'static str {
        match self {
            ArtifactKind::Resource => "resource.rs",
            ArtifactKind::DataSource => "data_source.rs",
            ArtifactKind::Doc => "doc.md",
        }
    }

    /// Directory label used in output paths
    pub fn dir_label(&self) -> &'static str {
        match self {
            ArtifactKind::Resource => "resources",
            ArtifactKind::DataSource => "datasources",
            ArtifactKind::Doc => "doc",
        }
    }

    /// Resource and data source kinds produce source code
    pub fn is_code(&self) -> bool {
        !matches!(self, ArtifactKind::Doc)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_label())
    }
}
