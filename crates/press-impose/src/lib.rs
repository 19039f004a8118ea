pub mod assemble;
pub mod constants;
mod export;
pub mod impose;
pub mod layout;
mod project;
pub mod sequence;
pub mod spec;
mod stats;
pub mod store;
mod types;

pub use assemble::{AssemblyRequest, SourceRange, assemble};
pub use export::ExportJob;
pub use impose::{plan, plan_async, plan_specification};
pub use layout::{
    GridSize, PlacedPage, PressSheet, Sheet, SheetKind, SheetLayout, SheetSide, SheetSuggestion,
    SlotPosition, suggest_sheet,
};
pub use project::{DocumentSource, ProjectFile};
pub use sequence::{PageEntry, PageSequence};
pub use spec::{
    Binding, FieldError, ImpositionType, PrintSpecification, ReadingDirection,
    ResolvedSpecification, SpecField, SpecState, validate,
};
pub use stats::{calculate_statistics, layout_statistics};
pub use store::{DocumentStore, MemoryStore, PdfStore, load_pdf};
pub use types::*;
