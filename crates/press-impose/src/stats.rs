use crate::impose::plan;
use crate::layout::{SheetLayout, SheetSide};
use crate::sequence::PageSequence;
use crate::spec::ResolvedSpecification;
use crate::types::*;

/// Calculate statistics for the imposition
pub fn calculate_statistics(
    sequence: &PageSequence,
    spec: &ResolvedSpecification,
) -> Result<ImpositionStatistics> {
    let layout = plan(sequence, spec)?;
    Ok(layout_statistics(sequence, &layout))
}

/// Summarize an already planned layout
pub fn layout_statistics(sequence: &PageSequence, layout: &SheetLayout) -> ImpositionStatistics {
    let output_sides = layout
        .sheets
        .iter()
        .map(|sheet| {
            [SheetSide::Front, SheetSide::Back]
                .into_iter()
                .filter(|&side| sheet.filled_count(side) > 0)
                .count()
        })
        .sum();

    ImpositionStatistics {
        sequence_pages: sequence.len(),
        interior_pages: sequence.interior_entries().len(),
        output_sheets: layout.sheets.len(),
        output_sides,
        blank_pages_added: layout.padding_added,
        slots_per_side: layout.grid.cell_count(),
    }
}
