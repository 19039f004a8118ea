//! Booklet imposition (folded two-up sheets plus cover wrap)

use crate::constants::BOOKLET_COLUMNS;
use crate::layout::{
    GridSize, PlacedPage, Sheet, SheetKind, SheetLayout, SlotPosition, booklet_pairs,
    booklet_sheet_count, creep_offsets, padded_page_count,
};
use crate::sequence::{PageEntry, PageSequence};
use crate::spec::{ImpositionType, ReadingDirection, ResolvedSpecification};
use crate::types::*;

/// Impose interior pages as nested signatures.
///
/// The interior run (interior and blank entries) is padded on a working copy
/// to a multiple of four; the caller's sequence is never touched. Covers and
/// spine go on a separate cover sheet ahead of the signatures.
pub(crate) fn impose_booklet(
    sequence: &PageSequence,
    spec: &ResolvedSpecification,
) -> Result<SheetLayout> {
    let direction = spec.effective_direction();

    // Working copy of the interior run; `None` marks padding
    let mut working: Vec<Option<&PageEntry>> = sequence.interior_entries().iter().map(Some).collect();
    let interior_pages = working.len();
    let padded = padded_page_count(interior_pages);
    working.resize(padded, None);

    let sheet_count = booklet_sheet_count(padded);
    let creep_total_pt = spec.creep.map(Length::to_points).unwrap_or(0.0);
    let creep = creep_offsets(creep_total_pt, sheet_count);

    let mut sheets = Vec::with_capacity(sheet_count + 1);
    if let Some(cover) = cover_sheet(sequence, direction) {
        sheets.push(cover);
    }

    for (k, creep_offset_pt) in creep.into_iter().enumerate() {
        let pairs = booklet_pairs(k, padded, direction);
        let side = |pages: [usize; 2]| -> Vec<PlacedPage> {
            pages
                .iter()
                .enumerate()
                .map(|(col, &page)| placed(working[page - 1], SlotPosition::cell(0, col)))
                .collect()
        };
        sheets.push(Sheet {
            print_order: sheets.len(),
            index: k,
            kind: SheetKind::Signature,
            front: side(pairs.front),
            back: side(pairs.back),
            creep_offset_pt,
        });
    }

    let spine_width_pt = sequence
        .find_role(PageRole::Spine)
        .and(spec.spine_width)
        .map(Length::to_points);

    log::debug!(
        "Booklet imposition ({:?}): {} interior pages padded to {}, {} signature sheets",
        direction,
        interior_pages,
        padded,
        sheet_count
    );

    Ok(SheetLayout {
        imposition: ImpositionType::Booklet,
        grid: GridSize::new(BOOKLET_COLUMNS, 1),
        sheets,
        padding_added: padded - interior_pages,
        spine_width_pt,
    })
}

/// Build the cover wrap, if the sequence has any cover or spine entry.
///
/// Outside face, left to right: back cover, spine, front cover for
/// left-to-right books; mirrored for right-to-left. The inside face is left
/// empty.
fn cover_sheet(sequence: &PageSequence, direction: ReadingDirection) -> Option<Sheet> {
    let front_cover = sequence.find_role(PageRole::CoverFront);
    let back_cover = sequence.find_role(PageRole::CoverBack);
    let spine = sequence.find_role(PageRole::Spine);

    if front_cover.is_none() && back_cover.is_none() && spine.is_none() {
        return None;
    }

    let (left, right) = match direction {
        ReadingDirection::Ltr => (back_cover, front_cover),
        ReadingDirection::Rtl => (front_cover, back_cover),
    };

    let mut front = vec![placed(left, SlotPosition::cell(0, 0))];
    if spine.is_some() {
        front.push(placed(spine, SlotPosition::Spine));
    }
    front.push(placed(right, SlotPosition::cell(0, 1)));

    let back = (0..BOOKLET_COLUMNS)
        .map(|col| PlacedPage::empty(SlotPosition::cell(0, col)))
        .collect();

    Some(Sheet {
        print_order: 0,
        index: 0,
        kind: SheetKind::Cover,
        front,
        back,
        creep_offset_pt: 0.0,
    })
}

fn placed(entry: Option<&PageEntry>, position: SlotPosition) -> PlacedPage {
    match entry {
        Some(entry) => PlacedPage {
            page: Some(entry.id),
            position,
            rotation: entry.rotation,
        },
        None => PlacedPage::empty(position),
    }
}
