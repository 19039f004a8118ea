//! Stack imposition: N-up tiling in reading order

use crate::layout::{GridSize, PlacedPage, Sheet, SheetKind, SheetLayout, create_stack_grid};
use crate::sequence::{PageEntry, PageSequence};
use crate::spec::{FieldError, ImpositionType, ResolvedSpecification, SpecField};
use crate::types::*;

/// Fill sheet fronts in strict reading order.
///
/// Reading direction is never consulted and no padding is added; unused
/// positions on the last sheet stay empty.
pub(crate) fn impose_stack(
    sequence: &PageSequence,
    spec: &ResolvedSpecification,
) -> Result<SheetLayout> {
    let sheet = spec.sheet.ok_or_else(|| {
        ImposeError::InvalidSpecification(vec![FieldError::Required(SpecField::SheetSize)])
    })?;
    let grid = create_stack_grid(spec.dimensions, sheet)?;

    let pages = sequence.entries();
    let sheets: Vec<Sheet> = pages
        .chunks(grid.cell_count())
        .enumerate()
        .map(|(index, chunk)| stack_sheet(index, chunk, grid))
        .collect();

    log::debug!(
        "Stack imposition: {} pages, {}x{} grid, {} sheets",
        pages.len(),
        grid.cols,
        grid.rows,
        sheets.len()
    );

    Ok(SheetLayout {
        imposition: ImpositionType::Stack,
        grid,
        sheets,
        padding_added: 0,
        spine_width_pt: None,
    })
}

fn stack_sheet(index: usize, chunk: &[PageEntry], grid: GridSize) -> Sheet {
    let front = grid
        .positions()
        .enumerate()
        .map(|(slot, position)| match chunk.get(slot) {
            Some(entry) => PlacedPage {
                page: Some(entry.id),
                position,
                rotation: entry.rotation,
            },
            None => PlacedPage::empty(position),
        })
        .collect();

    Sheet {
        print_order: index,
        index,
        kind: SheetKind::Stack,
        front,
        back: Vec::new(),
        creep_offset_pt: 0.0,
    }
}
