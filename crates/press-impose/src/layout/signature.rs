//! Booklet signature ordering
//!
//! This module calculates which logical pages share a folded sheet in a
//! saddle-stitch style booklet, and the creep push-out of each sheet.
//!
//! ## Nesting
//!
//! Every sheet carries four pages, two per side. Sheet 0 is the outermost
//! spread. For an 8 page booklet read left to right:
//!
//! ```text
//!            front        back
//! sheet 0:  [8 | 1]      [2 | 7]
//! sheet 1:  [6 | 3]      [4 | 5]
//! ```
//!
//! Right-to-left books bind on the other edge, so every side is mirrored:
//! sheet 0 front is `[1 | 8]` and back is `[7 | 2]`.

use crate::constants::PAGES_PER_BOOKLET_SHEET;
use crate::spec::ReadingDirection;

/// Round a page count up to whole booklet sheets
pub fn padded_page_count(pages: usize) -> usize {
    pages.div_ceil(PAGES_PER_BOOKLET_SHEET) * PAGES_PER_BOOKLET_SHEET
}

/// Number of folded sheets for a padded page count
pub fn booklet_sheet_count(padded_pages: usize) -> usize {
    padded_pages / PAGES_PER_BOOKLET_SHEET
}

/// 1-based logical page numbers on one booklet sheet, in visual
/// left-to-right order on each side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetPairs {
    pub front: [usize; 2],
    pub back: [usize; 2],
}

/// Pages on sheet `sheet_index` of a booklet with `padded_pages` pages.
///
/// `padded_pages` must be a multiple of four and `sheet_index` below
/// `padded_pages / 4`.
pub fn booklet_pairs(
    sheet_index: usize,
    padded_pages: usize,
    direction: ReadingDirection,
) -> SheetPairs {
    debug_assert_eq!(padded_pages % PAGES_PER_BOOKLET_SHEET, 0);
    debug_assert!(sheet_index < booklet_sheet_count(padded_pages));

    let n = padded_pages;
    let k = sheet_index;

    let outer_low = 2 * k + 1;
    let outer_high = n - 2 * k;
    let inner_low = 2 * k + 2;
    let inner_high = n - 2 * k - 1;

    match direction {
        ReadingDirection::Ltr => SheetPairs {
            front: [outer_high, outer_low],
            back: [inner_low, inner_high],
        },
        ReadingDirection::Rtl => SheetPairs {
            front: [outer_low, outer_high],
            back: [inner_high, inner_low],
        },
    }
}

/// Creep push-out per sheet, in points.
///
/// The total is spread linearly from 0 on the outermost sheet to `total_pt`
/// on the innermost one.
pub fn creep_offsets(total_pt: f32, sheets: usize) -> Vec<f32> {
    if sheets <= 1 {
        return vec![0.0; sheets];
    }
    let step = total_pt / (sheets - 1) as f32;
    (0..sheets).map(|k| k as f32 * step).collect()
}

// =============================================================================
// Tests
// =============================================================================
