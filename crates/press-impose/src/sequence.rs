//! Builder state: the ordered, user-edited list of pages
//!
//! The sequence always has the shape
//!
//! ```text
//! [cover-front]? (interior | blank)* [spine]? [cover-back]?
//! ```
//!
//! Covers and spine are pinned to the boundaries. Every mutation either keeps
//! that shape or is rejected before anything changes.

use crate::types::*;
use std::collections::HashSet;
use std::ops::Range;

/// One page of the built document
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageEntry {
    pub id: PageId,
    pub role: PageRole,
    /// Source page, `None` for blanks
    pub source: Option<SourceRef>,
    pub rotation: Rotation,
    pub orientation: Orientation,
}

/// Ordered page entries; index = logical reading position
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSequence"))]
pub struct PageSequence {
    entries: Vec<PageEntry>,
    next_id: u64,
}

/// Unchecked wire form of a [`PageSequence`]
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSequence {
    entries: Vec<PageEntry>,
    #[serde(default)]
    next_id: u64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSequence> for PageSequence {
    type Error = ImposeError;

    fn try_from(raw: RawSequence) -> Result<Self> {
        let highest = raw.entries.iter().map(|e| e.id.0).max().unwrap_or(0);
        let sequence = PageSequence {
            entries: raw.entries,
            next_id: raw.next_id.max(highest),
        };
        sequence.check_well_formed()?;
        Ok(sequence)
    }
}

impl PageSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[PageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: PageId) -> Option<&PageEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// 0-based position of an entry
    pub fn position(&self, id: PageId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Source page for a placed entry, as needed by a renderer
    pub fn resolve(&self, id: PageId) -> Option<&SourceRef> {
        self.get(id).and_then(|e| e.source.as_ref())
    }

    /// First entry with the given role
    pub fn find_role(&self, role: PageRole) -> Option<&PageEntry> {
        self.entries.iter().find(|e| e.role == role)
    }

    /// Number of entries with role `interior` (blanks excluded)
    pub fn interior_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.role == PageRole::Interior)
            .count()
    }

    /// Interior and blank entries in reading order
    pub fn interior_entries(&self) -> &[PageEntry] {
        &self.entries[self.interior_run()]
    }

    /// Index range of the run between the pinned leading and trailing entries
    pub fn interior_run(&self) -> Range<usize> {
        let start = match self.entries.first() {
            Some(e) if e.role == PageRole::CoverFront => 1,
            _ => 0,
        };
        let mut end = self.entries.len();
        if end > start && self.entries[end - 1].role == PageRole::CoverBack {
            end -= 1;
        }
        if end > start && self.entries[end - 1].role == PageRole::Spine {
            end -= 1;
        }
        start..end
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Insert a blank page. The index is clamped into the interior run so the
    /// insertion always succeeds.
    pub fn insert_blank(&mut self, at: usize) -> PageId {
        let at = self.clamp_into_run(at);
        let entry = self.new_entry(PageRole::Blank, None, Orientation::Portrait);
        let id = entry.id;
        self.entries.insert(at, entry);
        debug_assert!(self.is_well_formed());
        id
    }

    /// Insert an interior content page, clamped like [`Self::insert_blank`]
    pub fn insert_page(&mut self, at: usize, source: SourceRef, orientation: Orientation) -> PageId {
        let at = self.clamp_into_run(at);
        let entry = self.new_entry(PageRole::Interior, Some(source), orientation);
        let id = entry.id;
        self.entries.insert(at, entry);
        debug_assert!(self.is_well_formed());
        id
    }

    /// Move an entry so that it ends up at `to`.
    ///
    /// Covers and spine can only "move" to where they already are. Interior
    /// and blank entries can move anywhere inside the interior run.
    pub fn reorder(&mut self, id: PageId, to: usize) -> Result<()> {
        let from = self.position(id).ok_or(ImposeError::NotFound(id))?;
        let role = self.entries[from].role;
        let to = to.min(self.entries.len() - 1);

        if role.is_pinned() {
            if to == from {
                return Ok(());
            }
            return Err(ImposeError::InvalidBindingMove { id, role, to });
        }

        let run = self.interior_run();
        if to < run.start || to >= run.end {
            return Err(ImposeError::InvalidBindingMove { id, role, to });
        }

        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        debug_assert!(self.is_well_formed());
        Ok(())
    }

    /// Point an existing content entry at a different source page.
    ///
    /// `orientation` is the new source page's, so the entry keeps describing
    /// the page it draws.
    pub fn replace(
        &mut self,
        id: PageId,
        source: SourceRef,
        orientation: Orientation,
    ) -> Result<()> {
        let pos = self.position(id).ok_or(ImposeError::NotFound(id))?;
        let entry = &mut self.entries[pos];
        if entry.role == PageRole::Blank {
            return Err(ImposeError::RoleMismatch(id));
        }
        entry.source = Some(source);
        entry.orientation = orientation;
        Ok(())
    }

    /// Delete an entry, returning it
    pub fn remove(&mut self, id: PageId) -> Result<PageEntry> {
        let pos = self.position(id).ok_or(ImposeError::NotFound(id))?;
        let entry = self.entries.remove(pos);
        debug_assert!(self.is_well_formed());
        Ok(entry)
    }

    pub fn set_rotation(&mut self, id: PageId, rotation: Rotation) -> Result<()> {
        let pos = self.position(id).ok_or(ImposeError::NotFound(id))?;
        self.entries[pos].rotation = rotation;
        Ok(())
    }

    /// Append an entry. Used by assembly, which pushes roles in canonical order.
    pub(crate) fn push(
        &mut self,
        role: PageRole,
        source: Option<SourceRef>,
        orientation: Orientation,
    ) -> PageId {
        let entry = self.new_entry(role, source, orientation);
        let id = entry.id;
        self.entries.push(entry);
        id
    }

    /// Check the structural invariants: pinned covers and spine, at most one
    /// of each, one contiguous interior run, unique ids.
    pub fn is_well_formed(&self) -> bool {
        let mut seen = HashSet::new();
        if !self.entries.iter().all(|e| seen.insert(e.id)) {
            return false;
        }

        let run = self.interior_run();
        let leading_ok = self.entries[..run.start]
            .iter()
            .all(|e| e.role == PageRole::CoverFront);
        let body_ok = self.entries[run.clone()]
            .iter()
            .all(|e| e.role.is_interior_eligible());
        let trailing = &self.entries[run.end..];
        let trailing_ok = match trailing {
            [] => true,
            [a] => matches!(a.role, PageRole::Spine | PageRole::CoverBack),
            [a, b] => a.role == PageRole::Spine && b.role == PageRole::CoverBack,
            _ => false,
        };

        leading_ok && body_ok && trailing_ok
    }

    /// [`Self::is_well_formed`] as a `MalformedSequence` error
    pub fn check_well_formed(&self) -> Result<()> {
        if self.is_well_formed() {
            return Ok(());
        }
        let roles: Vec<_> = self.entries.iter().map(|e| e.role.to_string()).collect();
        Err(ImposeError::MalformedSequence(format!("[{}]", roles.join(", "))))
    }

    fn clamp_into_run(&self, at: usize) -> usize {
        let run = self.interior_run();
        at.min(self.entries.len()).clamp(run.start, run.end)
    }

    fn new_entry(
        &mut self,
        role: PageRole,
        source: Option<SourceRef>,
        orientation: Orientation,
    ) -> PageEntry {
        self.next_id += 1;
        PageEntry {
            id: PageId(self.next_id),
            role,
            source,
            rotation: Rotation::None,
            orientation,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
