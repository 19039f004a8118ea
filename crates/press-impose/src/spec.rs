//! Print specification and its validator
//!
//! Which optional fields apply depends only on two enum fields, the binding
//! and the imposition type. [`SpecState`] captures that pair; [`validate`]
//! turns a raw [`PrintSpecification`] into a [`ResolvedSpecification`] with
//! every inactive field nulled out, or into a list of field errors.

use crate::sequence::PageSequence;
use crate::types::*;
use std::fmt;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Binding methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Binding {
    /// Nested folded sheets stapled through the fold
    #[default]
    SaddleStitch,
    /// Stacked leaves glued to a flat spine
    PerfectBound,
    /// No binding edge at all
    LooseSheets,
}

/// Which side the book opens from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ReadingDirection {
    #[default]
    Ltr,
    Rtl,
}

/// How pages are laid onto sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ImpositionType {
    /// N-up tiling in reading order, no folding
    Stack,
    /// Two-up folded signatures, outside-in
    #[default]
    Booklet,
}

/// The specification as edited by the user
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct PrintSpecification {
    /// Trim size of one page
    pub dimensions: Dimensions,
    /// Press sheet; required for stack imposition
    pub sheet: Option<Dimensions>,
    pub binding: Binding,
    /// Stored even when inactive; only read for bound work
    pub reading_direction: Option<ReadingDirection>,
    pub imposition_type: ImpositionType,
    /// Total creep across all signature sheets; `Some` = toggle on
    pub creep: Option<Length>,
    /// Spine strip width for perfect bound covers
    pub spine_width: Option<Length>,
}

impl Default for PrintSpecification {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::inches(5.5, 8.5),
            sheet: Some(Dimensions::inches(11.0, 8.5)),
            binding: Binding::SaddleStitch,
            reading_direction: Some(ReadingDirection::Ltr),
            imposition_type: ImpositionType::Booklet,
            creep: None,
            spine_width: None,
        }
    }
}

// =============================================================================
// Applicability state machine
// =============================================================================

/// Whether the binding has a physical binding edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingClass {
    Loose,
    Bound,
}

impl From<Binding> for BindingClass {
    fn from(binding: Binding) -> Self {
        match binding {
            Binding::LooseSheets => BindingClass::Loose,
            Binding::SaddleStitch | Binding::PerfectBound => BindingClass::Bound,
        }
    }
}

/// Applicability of the optional fields, derived from the two enum fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecState {
    pub binding: Binding,
    pub imposition: ImpositionType,
}

impl SpecState {
    pub fn of(spec: &PrintSpecification) -> Self {
        Self {
            binding: spec.binding,
            imposition: spec.imposition_type,
        }
    }

    pub fn binding_class(self) -> BindingClass {
        self.binding.into()
    }

    /// Reading direction is active and required for bound work
    pub fn reading_direction_active(self) -> bool {
        self.binding_class() == BindingClass::Bound
    }

    /// The per-sheet creep toggle only exists for booklets
    pub fn creep_active(self) -> bool {
        self.imposition == ImpositionType::Booklet
    }

    /// A spine page slot exists only for perfect binding
    pub fn spine_permitted(self) -> bool {
        self.binding == Binding::PerfectBound
    }

    pub fn spine_width_active(self) -> bool {
        self.spine_permitted()
    }

    pub fn sheet_required(self) -> bool {
        self.imposition == ImpositionType::Stack
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Specification fields named in validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpecField {
    PageSize,
    SheetSize,
    Binding,
    ReadingDirection,
    ImpositionType,
    Creep,
    SpineWidth,
}

impl fmt::Display for SpecField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SpecField::PageSize => "dimensions",
            SpecField::SheetSize => "sheet",
            SpecField::Binding => "binding",
            SpecField::ReadingDirection => "readingDirection",
            SpecField::ImpositionType => "impositionType",
            SpecField::Creep => "creep",
            SpecField::SpineWidth => "spineWidth",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FieldError {
    #[error("{0} is required")]
    Required(SpecField),
    #[error("{0} must be positive")]
    NotPositive(SpecField),
    #[error("{0} must not be negative")]
    Negative(SpecField),
    #[error("booklet imposition needs a saddle stitch or perfect bound binding")]
    BookletRequiresBinding,
    #[error("spine page present but binding is not perfect bound")]
    UnexpectedSpine,
    #[error("spine page needs booklet imposition")]
    SpineRequiresBooklet,
}

impl FieldError {
    /// The field the error is reported against
    pub fn field(&self) -> SpecField {
        match self {
            FieldError::Required(f) | FieldError::NotPositive(f) | FieldError::Negative(f) => *f,
            FieldError::BookletRequiresBinding | FieldError::SpineRequiresBooklet => {
                SpecField::ImpositionType
            }
            FieldError::UnexpectedSpine => SpecField::Binding,
        }
    }
}

/// A specification with every inactive field nulled out.
///
/// Only [`validate`] builds one, so holding a value means validation passed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[non_exhaustive]
pub struct ResolvedSpecification {
    pub dimensions: Dimensions,
    pub sheet: Option<Dimensions>,
    pub binding: Binding,
    /// `None` for loose sheets
    pub reading_direction: Option<ReadingDirection>,
    pub imposition_type: ImpositionType,
    /// `None` unless booklet with creep enabled
    pub creep: Option<Length>,
    /// `None` unless perfect bound
    pub spine_width: Option<Length>,
}

impl ResolvedSpecification {
    pub fn state(&self) -> SpecState {
        SpecState {
            binding: self.binding,
            imposition: self.imposition_type,
        }
    }

    /// Reading direction as the planner uses it
    pub fn effective_direction(&self) -> ReadingDirection {
        self.reading_direction.unwrap_or_default()
    }
}

/// Validate a specification against the page sequence it will be planned with
pub fn validate(
    spec: &PrintSpecification,
    sequence: &PageSequence,
) -> std::result::Result<ResolvedSpecification, Vec<FieldError>> {
    let state = SpecState::of(spec);
    let mut errors = Vec::new();

    if !spec.dimensions.is_positive() {
        errors.push(FieldError::NotPositive(SpecField::PageSize));
    }

    let sheet = match spec.sheet {
        Some(sheet) if !sheet.is_positive() => {
            errors.push(FieldError::NotPositive(SpecField::SheetSize));
            None
        }
        None if state.sheet_required() => {
            errors.push(FieldError::Required(SpecField::SheetSize));
            None
        }
        other => other,
    };

    let reading_direction = if state.reading_direction_active() {
        if spec.reading_direction.is_none() {
            errors.push(FieldError::Required(SpecField::ReadingDirection));
        }
        spec.reading_direction
    } else {
        None
    };

    if spec.imposition_type == ImpositionType::Booklet
        && state.binding_class() == BindingClass::Loose
    {
        errors.push(FieldError::BookletRequiresBinding);
    }

    let creep = if state.creep_active() {
        spec.creep
    } else {
        None
    };
    if creep.is_some_and(|c| c.value < 0.0) {
        errors.push(FieldError::Negative(SpecField::Creep));
    }

    let has_spine = sequence.find_role(PageRole::Spine).is_some();
    if has_spine && !state.spine_permitted() {
        errors.push(FieldError::UnexpectedSpine);
    }
    if has_spine && state.spine_permitted() && spec.imposition_type == ImpositionType::Stack {
        errors.push(FieldError::SpineRequiresBooklet);
    }

    let spine_width = if state.spine_width_active() {
        spec.spine_width
    } else {
        None
    };
    match spine_width {
        Some(w) if w.value < 0.0 => errors.push(FieldError::Negative(SpecField::SpineWidth)),
        None if has_spine && state.spine_permitted() => {
            errors.push(FieldError::Required(SpecField::SpineWidth))
        }
        _ => {}
    }

    if !errors.is_empty() {
        log::debug!("Specification rejected with {} field error(s)", errors.len());
        return Err(errors);
    }

    Ok(ResolvedSpecification {
        dimensions: spec.dimensions,
        sheet,
        binding: spec.binding,
        reading_direction,
        imposition_type: spec.imposition_type,
        creep,
        spine_width,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loose_stack() -> PrintSpecification {
        PrintSpecification {
            binding: Binding::LooseSheets,
            imposition_type: ImpositionType::Stack,
            ..Default::default()
        }
    }

    #[test]
    fn test_state_transitions() {
        let loose = SpecState {
            binding: Binding::LooseSheets,
            imposition: ImpositionType::Stack,
        };
        assert!(!loose.reading_direction_active());
        assert!(!loose.creep_active());
        assert!(!loose.spine_permitted());

        let saddle = SpecState {
            binding: Binding::SaddleStitch,
            imposition: ImpositionType::Booklet,
        };
        assert!(saddle.reading_direction_active());
        assert!(saddle.creep_active());
        assert!(!saddle.spine_permitted());

        let perfect = SpecState {
            binding: Binding::PerfectBound,
            imposition: ImpositionType::Booklet,
        };
        assert!(perfect.spine_permitted());
    }

    #[test]
    fn test_loose_sheets_null_out_direction() {
        let mut spec = loose_stack();
        spec.reading_direction = Some(ReadingDirection::Rtl);

        let resolved = validate(&spec, &PageSequence::new()).unwrap();
        assert_eq!(resolved.reading_direction, None);
    }

    #[test]
    fn test_bound_requires_direction() {
        let spec = PrintSpecification {
            reading_direction: None,
            ..Default::default()
        };

        let errors = validate(&spec, &PageSequence::new()).unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::Required(SpecField::ReadingDirection)]
        );
        assert_eq!(errors[0].field(), SpecField::ReadingDirection);
    }

    #[test]
    fn test_creep_inactive_for_stack() {
        let spec = PrintSpecification {
            imposition_type: ImpositionType::Stack,
            creep: Some(Length::new(0.1, Units::Inches)),
            ..Default::default()
        };

        let resolved = validate(&spec, &PageSequence::new()).unwrap();
        assert_eq!(resolved.creep, None);
    }

    #[test]
    fn test_stack_requires_sheet() {
        let spec = PrintSpecification {
            sheet: None,
            ..loose_stack()
        };

        let errors = validate(&spec, &PageSequence::new()).unwrap_err();
        assert!(errors.contains(&FieldError::Required(SpecField::SheetSize)));
    }

    #[test]
    fn test_booklet_on_loose_sheets_rejected() {
        let spec = PrintSpecification {
            binding: Binding::LooseSheets,
            ..Default::default()
        };

        let errors = validate(&spec, &PageSequence::new()).unwrap_err();
        assert_eq!(errors, vec![FieldError::BookletRequiresBinding]);
    }

    #[test]
    fn test_spine_with_saddle_stitch_is_unexpected() {
        let mut seq = PageSequence::new();
        seq.push(PageRole::Interior, None, Orientation::Portrait);
        seq.push(PageRole::Spine, None, Orientation::Portrait);

        let errors = validate(&PrintSpecification::default(), &seq).unwrap_err();
        assert!(errors.contains(&FieldError::UnexpectedSpine));
    }

    #[test]
    fn test_perfect_bound_spine_needs_width() {
        let mut seq = PageSequence::new();
        seq.push(PageRole::Interior, None, Orientation::Portrait);
        seq.push(PageRole::Spine, None, Orientation::Portrait);

        let mut spec = PrintSpecification {
            binding: Binding::PerfectBound,
            ..Default::default()
        };
        let errors = validate(&spec, &seq).unwrap_err();
        assert_eq!(errors, vec![FieldError::Required(SpecField::SpineWidth)]);

        spec.spine_width = Some(Length::new(0.25, Units::Inches));
        let resolved = validate(&spec, &seq).unwrap();
        assert_eq!(resolved.spine_width, Some(Length::new(0.25, Units::Inches)));
    }

    #[test]
    fn test_spine_width_dropped_without_perfect_binding() {
        let spec = PrintSpecification {
            spine_width: Some(Length::new(3.0, Units::Millimeters)),
            ..Default::default()
        };

        let resolved = validate(&spec, &PageSequence::new()).unwrap();
        assert_eq!(resolved.spine_width, None);
    }

    #[test]
    fn test_non_positive_dimensions() {
        let spec = PrintSpecification {
            dimensions: Dimensions::inches(0.0, 8.5),
            ..Default::default()
        };

        let errors = validate(&spec, &PageSequence::new()).unwrap_err();
        assert_eq!(errors, vec![FieldError::NotPositive(SpecField::PageSize)]);
    }

    #[test]
    fn test_negative_creep() {
        let spec = PrintSpecification {
            creep: Some(Length::new(-0.1, Units::Inches)),
            ..Default::default()
        };

        let errors = validate(&spec, &PageSequence::new()).unwrap_err();
        assert_eq!(errors, vec![FieldError::Negative(SpecField::Creep)]);
        assert_eq!(errors[0].field(), SpecField::Creep);
    }

    #[test]
    fn test_negative_spine_width() {
        let spec = PrintSpecification {
            binding: Binding::PerfectBound,
            spine_width: Some(Length::new(-2.0, Units::Millimeters)),
            ..Default::default()
        };

        let errors = validate(&spec, &PageSequence::new()).unwrap_err();
        assert_eq!(errors, vec![FieldError::Negative(SpecField::SpineWidth)]);
    }

    #[test]
    fn test_spine_with_perfect_bound_stack() {
        let mut seq = PageSequence::new();
        seq.push(PageRole::Interior, None, Orientation::Portrait);
        seq.push(PageRole::Spine, None, Orientation::Portrait);

        let spec = PrintSpecification {
            binding: Binding::PerfectBound,
            imposition_type: ImpositionType::Stack,
            spine_width: Some(Length::new(0.25, Units::Inches)),
            ..Default::default()
        };

        let errors = validate(&spec, &seq).unwrap_err();
        assert_eq!(errors, vec![FieldError::SpineRequiresBooklet]);
        assert_eq!(errors[0].field(), SpecField::ImpositionType);
    }
}
