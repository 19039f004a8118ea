//! Hand-off to the export collaborator

use crate::impose::plan;
use crate::layout::SheetLayout;
use crate::sequence::PageSequence;
use crate::spec::ResolvedSpecification;
use crate::types::*;

/// Everything the exporter needs to lay down sheets
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExportJob {
    pub specification: ResolvedSpecification,
    pub layout: SheetLayout,
}

impl ExportJob {
    pub fn new(specification: ResolvedSpecification, layout: SheetLayout) -> Self {
        Self {
            specification,
            layout,
        }
    }

    /// Plan the sequence and bundle the result
    pub fn plan(sequence: &PageSequence, specification: ResolvedSpecification) -> Result<Self> {
        let layout = plan(sequence, &specification)?;
        Ok(Self::new(specification, layout))
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize export job: {}", e)))
    }
}
