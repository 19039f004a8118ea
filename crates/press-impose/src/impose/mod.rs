//! Imposition planning - arranging pages onto physical sheets
//!
//! This module orchestrates the planning process:
//! 1. Check the sequence against the resolved specification
//! 2. Dispatch on imposition type (stack or booklet)
//! 3. Return a fresh `SheetLayout` snapshot
//!
//! Planning is a pure function of its inputs. Callers never get a partial
//! layout: any failure returns an error instead.

mod booklet;
mod stack;

use crate::layout::SheetLayout;
use crate::sequence::PageSequence;
use crate::spec::{
    FieldError, ImpositionType, PrintSpecification, ResolvedSpecification, SpecField, validate,
};
use crate::types::*;

/// Plan the sheet layout for a sequence.
///
/// The spine rules are checked again here, so a specification resolved
/// against an earlier version of the sequence cannot place an unsized spine.
pub fn plan(sequence: &PageSequence, spec: &ResolvedSpecification) -> Result<SheetLayout> {
    sequence.check_well_formed()?;
    if sequence.interior_count() == 0 {
        return Err(ImposeError::EmptySequence);
    }

    let has_spine = sequence.find_role(PageRole::Spine).is_some();
    if has_spine && !spec.state().spine_permitted() {
        return Err(ImposeError::UnexpectedSpine);
    }
    if has_spine && spec.spine_width.is_none() {
        return Err(ImposeError::InvalidSpecification(vec![FieldError::Required(
            SpecField::SpineWidth,
        )]));
    }

    match spec.imposition_type {
        ImpositionType::Stack => {
            if has_spine {
                return Err(ImposeError::InvalidSpecification(vec![
                    FieldError::SpineRequiresBooklet,
                ]));
            }
            stack::impose_stack(sequence, spec)
        }
        ImpositionType::Booklet => booklet::impose_booklet(sequence, spec),
    }
}

/// Validate a raw specification, then plan with it
pub fn plan_specification(
    sequence: &PageSequence,
    spec: &PrintSpecification,
) -> Result<SheetLayout> {
    let resolved = validate(spec, sequence).map_err(ImposeError::InvalidSpecification)?;
    plan(sequence, &resolved)
}

/// Plan on a blocking worker thread, keeping the caller's task responsive
pub async fn plan_async(
    sequence: PageSequence,
    spec: ResolvedSpecification,
) -> Result<SheetLayout> {
    tokio::task::spawn_blocking(move || plan(&sequence, &spec)).await?
}
