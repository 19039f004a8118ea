use crate::assemble::{AssemblyRequest, SourceRange};
use crate::spec::PrintSpecification;
use crate::store::PdfStore;
use crate::types::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A source document on disk
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DocumentSource {
    pub id: DocumentId,
    pub path: PathBuf,
}

/// Saved build: source documents, how to assemble them, and how to print
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProjectFile {
    pub documents: Vec<DocumentSource>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub assembly: AssemblyRequest,
    #[cfg_attr(feature = "serde", serde(default))]
    pub specification: PrintSpecification,
}

impl ProjectFile {
    /// Load a project from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let mut project: Self = serde_json::from_slice(&bytes)
            .map_err(|e| ImposeError::Config(format!("Failed to parse project: {}", e)))?;

        // Document paths are relative to the project file
        if let Some(base) = path.parent() {
            for doc in &mut project.documents {
                if doc.path.is_relative() {
                    doc.path = base.join(&doc.path);
                }
            }
        }
        Ok(project)
    }

    /// Save a project to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize project: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Check the document list and that the assembly only names known documents
    pub fn validate(&self) -> Result<()> {
        if self.documents.is_empty() {
            return Err(ImposeError::Config("No documents specified".to_string()));
        }

        let mut seen = HashSet::new();
        for doc in &self.documents {
            if !seen.insert(&doc.id) {
                return Err(ImposeError::Config(format!(
                    "Duplicate document id {}",
                    doc.id
                )));
            }
        }

        for range in self.ranges() {
            if !seen.contains(&range.document) {
                return Err(ImposeError::UnknownDocument(range.document.clone()));
            }
        }

        Ok(())
    }

    /// Load every listed document into a fresh PDF store
    pub async fn load_store(&self) -> Result<PdfStore> {
        self.validate()?;
        let mut store = PdfStore::new();
        for doc in &self.documents {
            store.load(doc.id.clone(), &doc.path).await?;
        }
        log::info!("Loaded {} source documents", self.documents.len());
        Ok(store)
    }

    fn ranges(&self) -> impl Iterator<Item = &SourceRange> {
        let a = &self.assembly;
        [&a.cover_front, &a.interior, &a.spine, &a.cover_back]
            .into_iter()
            .flatten()
    }
}
