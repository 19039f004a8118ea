//! Layout data types for imposition
//!
//! A [`SheetLayout`] is an immutable snapshot: every planner run builds a new
//! one and nothing patches it afterwards.

use crate::spec::ImpositionType;
use crate::types::{PageId, Rotation};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which physical side of the printed sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SheetSide {
    /// Front of the sheet (printed first in duplex)
    Front,
    /// Back of the sheet (printed second in duplex)
    Back,
}

/// Where a placement sits on its sheet side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SlotPosition {
    /// Grid cell; row 0 is the top row, col 0 the leftmost column
    Cell { row: usize, col: usize },
    /// Narrow strip across the binding edge of a cover sheet
    Spine,
}

impl SlotPosition {
    pub fn cell(row: usize, col: usize) -> Self {
        SlotPosition::Cell { row, col }
    }
}

/// One page position on a sheet side
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacedPage {
    /// Entry to draw here; `None` = blank fill or padding
    pub page: Option<PageId>,
    pub position: SlotPosition,
    pub rotation: Rotation,
}

impl PlacedPage {
    pub fn empty(position: SlotPosition) -> Self {
        Self {
            page: None,
            position,
            rotation: Rotation::None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.page.is_none()
    }
}

/// What a sheet is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SheetKind {
    /// Cover wrap of a booklet
    Cover,
    /// Folded booklet sheet, index 0 = outermost
    Signature,
    /// N-up sheet in reading order
    Stack,
}

/// One physical sheet
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sheet {
    /// Position in [`SheetLayout::sheets`], unique across kinds
    pub print_order: usize,
    /// Index among sheets of the same kind
    pub index: usize,
    pub kind: SheetKind,
    /// Front placements, left to right then top to bottom
    pub front: Vec<PlacedPage>,
    /// Back placements, same visual order as the front
    pub back: Vec<PlacedPage>,
    /// Creep push-out for this sheet in points, applied at export
    pub creep_offset_pt: f32,
}

impl Sheet {
    pub fn side(&self, side: SheetSide) -> &[PlacedPage] {
        match side {
            SheetSide::Front => &self.front,
            SheetSide::Back => &self.back,
        }
    }

    /// Page ids on one side in visual order
    pub fn page_ids(&self, side: SheetSide) -> Vec<Option<PageId>> {
        self.side(side).iter().map(|p| p.page).collect()
    }

    pub fn filled_count(&self, side: SheetSide) -> usize {
        self.side(side).iter().filter(|p| !p.is_empty()).count()
    }
}

/// Grid of page cells on one sheet side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridSize {
    pub cols: usize,
    pub rows: usize,
}

impl GridSize {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    /// Total number of cells in the grid
    pub fn cell_count(&self) -> usize {
        self.cols.saturating_mul(self.rows)
    }

    /// Cell positions in row-major order (top-left to bottom-right)
    pub fn positions(self) -> impl Iterator<Item = SlotPosition> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| SlotPosition::cell(row, col)))
    }
}

/// The planner's output
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SheetLayout {
    pub imposition: ImpositionType,
    /// Cell grid of interior sheets
    pub grid: GridSize,
    /// Physical sheets in print order (cover sheet first when present)
    pub sheets: Vec<Sheet>,
    /// Blank pages appended to complete the last signature
    pub padding_added: usize,
    /// Width of the spine placement, when one is placed
    pub spine_width_pt: Option<f32>,
}

impl SheetLayout {
    pub fn cover_sheet(&self) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.kind == SheetKind::Cover)
    }

    /// Signature or stack sheets, cover excluded
    pub fn interior_sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter().filter(|s| s.kind != SheetKind::Cover)
    }

    /// Every placed entry id, in sheet order (front before back)
    pub fn placed_ids(&self) -> Vec<PageId> {
        self.sheets
            .iter()
            .flat_map(|s| s.front.iter().chain(s.back.iter()))
            .filter_map(|p| p.page)
            .collect()
    }
}
