//! Grid layout calculation
//!
//! This module handles how many pages of a given trim size tile a press
//! sheet, and which standard sheet tiles a page best.

use crate::constants::{MAX_GRID_CELLS, TILING_EPSILON, in_to_pt};
use crate::types::{Dimensions, ImposeError, Orientation, Result};

use super::GridSize;

// =============================================================================
// Grid Creation
// =============================================================================

/// Create the stack grid for pages of `page` size on a `sheet`.
///
/// Floor division on both axes; pages are never rotated to fit. Fails with
/// `DimensionMismatch` if not even one page fits, and with `GridTooLarge`
/// past [`MAX_GRID_CELLS`] positions per side.
pub fn create_stack_grid(page: Dimensions, sheet: Dimensions) -> Result<GridSize> {
    let grid = tile_count(page, sheet)?;
    if grid.cell_count() == 0 {
        return Err(ImposeError::DimensionMismatch { page, sheet });
    }
    Ok(grid)
}

fn tile_count(page: Dimensions, sheet: Dimensions) -> Result<GridSize> {
    let (page_w, page_h) = page.to_points();
    let (sheet_w, sheet_h) = sheet.to_points();

    let cols = (sheet_w / page_w + TILING_EPSILON).floor();
    let rows = (sheet_h / page_h + TILING_EPSILON).floor();

    if cols.is_nan() || rows.is_nan() {
        return Err(ImposeError::DimensionMismatch { page, sheet });
    }
    let cells = cols * rows;
    if cells.is_nan() || cells > MAX_GRID_CELLS as f32 {
        return Err(ImposeError::GridTooLarge {
            page,
            sheet,
            max_cells: MAX_GRID_CELLS,
        });
    }

    Ok(GridSize::new(cols as usize, rows as usize))
}

/// Area of the sheet not covered by pages, in square points
fn waste(page: Dimensions, sheet: Dimensions, grid: GridSize) -> f32 {
    let (page_w, page_h) = page.to_points();
    let (sheet_w, sheet_h) = sheet.to_points();
    sheet_w * sheet_h - grid.cell_count() as f32 * page_w * page_h
}

// =============================================================================
// Sheet Suggestion
// =============================================================================

/// Standard press sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PressSheet {
    Letter,
    Legal,
    Tabloid,
    /// 12 x 18 in digital press sheet
    DigitalPress,
    /// 13 x 19 in
    SuperB,
    A4,
    A3,
    A2,
}

impl PressSheet {
    pub const ALL: [PressSheet; 8] = [
        PressSheet::Letter,
        PressSheet::Legal,
        PressSheet::Tabloid,
        PressSheet::DigitalPress,
        PressSheet::SuperB,
        PressSheet::A4,
        PressSheet::A3,
        PressSheet::A2,
    ];

    /// (short side, long side) in inches
    pub fn sides_inches(self) -> (f32, f32) {
        match self {
            PressSheet::Letter => (8.5, 11.0),
            PressSheet::Legal => (8.5, 14.0),
            PressSheet::Tabloid => (11.0, 17.0),
            PressSheet::DigitalPress => (12.0, 18.0),
            PressSheet::SuperB => (13.0, 19.0),
            PressSheet::A4 => (8.27, 11.69),
            PressSheet::A3 => (11.69, 16.54),
            PressSheet::A2 => (16.54, 23.39),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PressSheet::Letter => "Letter (8.5 x 11 in)",
            PressSheet::Legal => "Legal (8.5 x 14 in)",
            PressSheet::Tabloid => "Tabloid (11 x 17 in)",
            PressSheet::DigitalPress => "Digital Press (12 x 18 in)",
            PressSheet::SuperB => "Super B (13 x 19 in)",
            PressSheet::A4 => "A4 (210 x 297 mm)",
            PressSheet::A3 => "A3 (297 x 420 mm)",
            PressSheet::A2 => "A2 (420 x 594 mm)",
        }
    }

    /// Sheet dimensions in points with orientation applied
    pub fn dimensions(self, orientation: Orientation) -> Dimensions {
        let (short, long) = self.sides_inches();
        let (short, long) = (in_to_pt(short), in_to_pt(long));
        match orientation {
            Orientation::Portrait => Dimensions::points(short, long),
            Orientation::Landscape => Dimensions::points(long, short),
        }
    }
}

/// Best standard sheet for stacking a page size
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetSuggestion {
    pub sheet: PressSheet,
    pub orientation: Orientation,
    pub grid: GridSize,
    /// Uncovered sheet area in square points
    pub waste: f32,
}

impl SheetSuggestion {
    pub fn sheet_dimensions(&self) -> Dimensions {
        self.sheet.dimensions(self.orientation)
    }
}

/// Find the standard sheet and orientation that stacks the most pages.
///
/// Ties go to the layout with less waste, then to the earlier sheet in
/// [`PressSheet::ALL`] (portrait before landscape). Returns `None` when the
/// page is larger than every sheet.
pub fn suggest_sheet(page: Dimensions) -> Option<SheetSuggestion> {
    let mut best: Option<SheetSuggestion> = None;

    for sheet in PressSheet::ALL {
        for orientation in [Orientation::Portrait, Orientation::Landscape] {
            let dims = sheet.dimensions(orientation);
            let Ok(grid) = tile_count(page, dims) else {
                continue;
            };
            if grid.cell_count() == 0 {
                continue;
            }
            let candidate = SheetSuggestion {
                sheet,
                orientation,
                grid,
                waste: waste(page, dims, grid),
            };
            let better = match &best {
                None => true,
                Some(b) => {
                    candidate.grid.cell_count() > b.grid.cell_count()
                        || (candidate.grid.cell_count() == b.grid.cell_count()
                            && candidate.waste < b.waste)
                }
            };
            if better {
                best = Some(candidate);
            }
        }
    }

    best
}

// =============================================================================
// Tests
// =============================================================================
