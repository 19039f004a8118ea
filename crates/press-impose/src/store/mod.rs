//! Source document access
//!
//! The planner never reads documents itself. Assembly asks a
//! [`DocumentStore`] for page counts and page sizes; hosts plug in whatever
//! backs their uploads.

mod pdf;

pub use pdf::{PdfStore, load_pdf};

use crate::types::*;
use std::collections::HashMap;

/// Read-only view of the external document store
pub trait DocumentStore {
    /// Number of pages in a document
    fn page_count(&self, document: &DocumentId) -> Result<usize>;

    /// Size of one page (0-based index)
    fn page_dimensions(&self, document: &DocumentId, page_index: usize) -> Result<Dimensions>;
}

/// Page sizes held in memory, keyed by document
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: HashMap<DocumentId, Vec<Dimensions>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document whose pages all share one size
    pub fn insert_uniform(&mut self, document: impl Into<String>, pages: usize, size: Dimensions) {
        self.insert(document, vec![size; pages]);
    }

    pub fn insert(&mut self, document: impl Into<String>, pages: Vec<Dimensions>) {
        self.documents.insert(DocumentId::new(document), pages);
    }

    fn pages(&self, document: &DocumentId) -> Result<&[Dimensions]> {
        self.documents
            .get(document)
            .map(Vec::as_slice)
            .ok_or_else(|| ImposeError::UnknownDocument(document.clone()))
    }
}

impl DocumentStore for MemoryStore {
    fn page_count(&self, document: &DocumentId) -> Result<usize> {
        Ok(self.pages(document)?.len())
    }

    fn page_dimensions(&self, document: &DocumentId, page_index: usize) -> Result<Dimensions> {
        let pages = self.pages(document)?;
        pages
            .get(page_index)
            .copied()
            .ok_or_else(|| ImposeError::PageOutOfRange {
                document: document.clone(),
                page_index,
                page_count: pages.len(),
            })
    }
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn page_count(&self, document: &DocumentId) -> Result<usize> {
        (**self).page_count(document)
    }

    fn page_dimensions(&self, document: &DocumentId, page_index: usize) -> Result<Dimensions> {
        (**self).page_dimensions(document, page_index)
    }
}

impl<S: DocumentStore + ?Sized> DocumentStore for Box<S> {
    fn page_count(&self, document: &DocumentId) -> Result<usize> {
        (**self).page_count(document)
    }

    fn page_dimensions(&self, document: &DocumentId, page_index: usize) -> Result<Dimensions> {
        (**self).page_dimensions(document, page_index)
    }
}
