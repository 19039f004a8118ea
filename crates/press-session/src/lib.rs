//! Command-driven builder session
//!
//! A host (UI, CLI, server) sends [`BuilderCommand`]s to a
//! [`session_task`] and receives [`BuilderUpdate`]s back. The task owns one
//! [`Session`]: a page sequence, a print specification and a document store.

mod session;
mod worker;

pub use session::Session;
pub use worker::session_task;

// Re-export types from the library crate
pub use press_impose::{
    AssemblyRequest, FieldError, ImpositionStatistics, PageId, PageSequence, PrintSpecification,
    ResolvedSpecification, Rotation, SheetLayout, SourceRef,
};

/// Commands sent from the host to the session
#[derive(Debug, Clone)]
pub enum BuilderCommand {
    /// Build a fresh sequence, replacing the current one
    Assemble {
        request: AssemblyRequest,
    },
    InsertBlank {
        at: usize,
    },
    InsertPage {
        at: usize,
        source: SourceRef,
    },
    Reorder {
        id: PageId,
        to: usize,
    },
    Replace {
        id: PageId,
        source: SourceRef,
    },
    Remove {
        id: PageId,
    },
    Rotate {
        id: PageId,
        rotation: Rotation,
    },
    SetSpecification {
        specification: PrintSpecification,
    },
    /// Plan the current state; queued plan requests collapse into one
    Plan,
    CalculateStats,
}

/// Updates sent from the session to the host
#[derive(Debug, Clone)]
pub enum BuilderUpdate {
    SequenceChanged {
        sequence: PageSequence,
    },
    SpecificationResolved {
        specification: ResolvedSpecification,
    },
    SpecificationRejected {
        errors: Vec<FieldError>,
    },
    LayoutReady {
        layout: SheetLayout,
    },
    StatsCalculated {
        stats: ImpositionStatistics,
    },
    Error {
        message: String,
    },
}
