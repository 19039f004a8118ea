//! Document assembly: role-tagged page ranges to a fresh page sequence

use crate::sequence::PageSequence;
use crate::store::DocumentStore;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered range of pages from one source document
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceRange {
    pub document: DocumentId,
    /// 0-based first page
    #[cfg_attr(feature = "serde", serde(default))]
    pub first_page: usize,
    /// Number of pages; `None` runs to the end of the document
    #[cfg_attr(feature = "serde", serde(default))]
    pub page_count: Option<usize>,
}

impl SourceRange {
    /// Every page of a document
    pub fn whole(document: impl Into<String>) -> Self {
        Self {
            document: DocumentId::new(document),
            first_page: 0,
            page_count: None,
        }
    }

    /// A single page of a document
    pub fn page(document: impl Into<String>, page_index: usize) -> Self {
        Self {
            document: DocumentId::new(document),
            first_page: page_index,
            page_count: Some(1),
        }
    }

    pub fn pages(document: impl Into<String>, first_page: usize, page_count: usize) -> Self {
        Self {
            document: DocumentId::new(document),
            first_page,
            page_count: Some(page_count),
        }
    }

    /// Resolve to concrete page indices against the store
    fn indices(&self, store: &impl DocumentStore) -> Result<std::ops::Range<usize>> {
        let available = store.page_count(&self.document)?;
        let out_of_range = |page_index: usize| ImposeError::PageOutOfRange {
            document: self.document.clone(),
            page_index,
            page_count: available,
        };

        let end = match self.page_count {
            Some(count) => self
                .first_page
                .checked_add(count)
                .ok_or_else(|| out_of_range(usize::MAX))?,
            None => available,
        };
        if end > available || self.first_page > end {
            return Err(out_of_range(end.max(self.first_page.saturating_add(1)) - 1));
        }
        Ok(self.first_page..end)
    }
}

/// Up to four role-tagged sources for one build
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AssemblyRequest {
    pub cover_front: Option<SourceRange>,
    pub interior: Option<SourceRange>,
    pub spine: Option<SourceRange>,
    pub cover_back: Option<SourceRange>,
}

/// Concatenate the sources in canonical order
/// `cover-front, interior..., spine?, cover-back` with fresh entry ids.
///
/// Fails with `MissingInterior` when the interior is absent or empty. The
/// result replaces any previous sequence; it never merges with one.
pub fn assemble(request: &AssemblyRequest, store: &impl DocumentStore) -> Result<PageSequence> {
    let interior = match &request.interior {
        Some(range) => range.indices(store)?,
        None => return Err(ImposeError::MissingInterior),
    };
    if interior.is_empty() {
        return Err(ImposeError::MissingInterior);
    }

    let cover_front = single_page(request.cover_front.as_ref(), PageRole::CoverFront, store)?;
    let spine = single_page(request.spine.as_ref(), PageRole::Spine, store)?;
    let cover_back = single_page(request.cover_back.as_ref(), PageRole::CoverBack, store)?;

    let mut sequence = PageSequence::new();

    if let Some(source) = cover_front {
        push_source(&mut sequence, PageRole::CoverFront, source, store)?;
    }
    if let Some(range) = &request.interior {
        for page_index in interior {
            let source = SourceRef {
                document: range.document.clone(),
                page_index,
            };
            push_source(&mut sequence, PageRole::Interior, source, store)?;
        }
    }
    if let Some(source) = spine {
        push_source(&mut sequence, PageRole::Spine, source, store)?;
    }
    if let Some(source) = cover_back {
        push_source(&mut sequence, PageRole::CoverBack, source, store)?;
    }

    log::debug!(
        "Assembled {} pages ({} interior)",
        sequence.len(),
        sequence.interior_count()
    );
    debug_assert!(sequence.is_well_formed());
    Ok(sequence)
}

/// Covers and spine must each be exactly one page
fn single_page(
    range: Option<&SourceRange>,
    role: PageRole,
    store: &impl DocumentStore,
) -> Result<Option<SourceRef>> {
    let Some(range) = range else {
        return Ok(None);
    };
    let indices = range.indices(store)?;
    if indices.len() != 1 {
        return Err(ImposeError::SinglePageRole {
            role,
            pages: indices.len(),
        });
    }
    Ok(Some(SourceRef {
        document: range.document.clone(),
        page_index: indices.start,
    }))
}

fn push_source(
    sequence: &mut PageSequence,
    role: PageRole,
    source: SourceRef,
    store: &impl DocumentStore,
) -> Result<()> {
    let orientation = store
        .page_dimensions(&source.document, source.page_index)?
        .orientation();
    sequence.push(role, Some(source), orientation);
    Ok(())
}
