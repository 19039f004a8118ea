//! PDF-backed document store

use super::DocumentStore;
use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;
use std::path::Path;

/// Parent chain depth limit when looking up inherited page attributes
const MAX_INHERITANCE_DEPTH: usize = 32;

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Source documents parsed with lopdf
#[derive(Default)]
pub struct PdfStore {
    documents: HashMap<DocumentId, Document>,
}

impl PdfStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a PDF from disk under the given id, replacing any previous one
    pub async fn load(&mut self, document: DocumentId, path: impl AsRef<Path>) -> Result<usize> {
        let doc = load_pdf(path).await?;
        let pages = doc.get_pages().len();
        log::debug!("Loaded document {} ({} pages)", document, pages);
        self.documents.insert(document, doc);
        Ok(pages)
    }

    pub fn insert(&mut self, document: DocumentId, doc: Document) {
        self.documents.insert(document, doc);
    }

    pub fn contains(&self, document: &DocumentId) -> bool {
        self.documents.contains_key(document)
    }

    fn document(&self, document: &DocumentId) -> Result<&Document> {
        self.documents
            .get(document)
            .ok_or_else(|| ImposeError::UnknownDocument(document.clone()))
    }
}

impl DocumentStore for PdfStore {
    fn page_count(&self, document: &DocumentId) -> Result<usize> {
        Ok(self.document(document)?.get_pages().len())
    }

    fn page_dimensions(&self, document: &DocumentId, page_index: usize) -> Result<Dimensions> {
        let doc = self.document(document)?;
        let pages = doc.get_pages();
        let page_id = pages
            .values()
            .nth(page_index)
            .copied()
            .ok_or_else(|| ImposeError::PageOutOfRange {
                document: document.clone(),
                page_index,
                page_count: pages.len(),
            })?;
        get_page_dimensions(doc, page_id)
    }
}

/// Get the displayed size of a page in points.
///
/// Reads the MediaBox (inherited from the page tree if needed) and swaps
/// width and height for pages with a quarter-turn /Rotate. Pages without a
/// usable MediaBox are treated as US Letter.
pub fn get_page_dimensions(doc: &Document, page_id: ObjectId) -> Result<Dimensions> {
    let page_dict = doc.get_dictionary(page_id)?;

    let (width, height) = inherited(doc, page_dict, b"MediaBox")
        .and_then(|obj| obj.as_array().ok())
        .and_then(|mb| media_box_size(mb))
        .unwrap_or(DEFAULT_PAGE_DIMENSIONS);

    let quarter_turn = inherited(doc, page_dict, b"Rotate")
        .and_then(|obj| obj.as_i64().ok())
        .is_some_and(|r| r.rem_euclid(180) == 90);

    let dims = Dimensions::points(width, height);
    Ok(if quarter_turn { dims.rotated() } else { dims })
}

/// Look up a page attribute, walking up the page tree for inherited ones
fn inherited<'a>(doc: &'a Document, page: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
    let mut dict = page;
    for _ in 0..MAX_INHERITANCE_DEPTH {
        if let Ok(value) = dict.get(key) {
            return Some(value);
        }
        let parent = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
        dict = doc.get_dictionary(parent).ok()?;
    }
    None
}

fn media_box_size(mb: &[Object]) -> Option<(f32, f32)> {
    if mb.len() != 4 {
        return None;
    }
    let x0 = extract_number(&mb[0])?;
    let y0 = extract_number(&mb[1])?;
    let x1 = extract_number(&mb[2])?;
    let y1 = extract_number(&mb[3])?;
    Some(((x1 - x0).abs(), (y1 - y0).abs()))
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
