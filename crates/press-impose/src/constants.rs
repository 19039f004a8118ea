//! Shared constants for imposition planning
//!
//! This module centralizes magic numbers and constants used throughout
//! the planner and the document store.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per inch
pub const POINTS_PER_INCH: f32 = 72.0;

/// Millimeters per inch
pub const MM_PER_INCH: f32 = 25.4;

/// Convert inches to points
#[inline]
pub fn in_to_pt(inches: f32) -> f32 {
    inches * POINTS_PER_INCH
}

/// Tolerance when dividing sheet extents by page extents, so that a sheet of
/// exactly twice the page width tiles two pages despite rounding in unit
/// conversion.
pub const TILING_EPSILON: f32 = 1e-3;

/// Upper bound on page positions per stack sheet side
pub const MAX_GRID_CELLS: usize = 1024;

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Booklet
// =============================================================================

/// Logical pages carried by one folded booklet sheet (two per side)
pub const PAGES_PER_BOOKLET_SHEET: usize = 4;

/// Page positions on each side of a booklet or cover sheet
pub const BOOKLET_COLUMNS: usize = 2;
