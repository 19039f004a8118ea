use press_impose::{
    AssemblyRequest, DocumentStore, FieldError, PageId, PageSequence, PrintSpecification,
    ResolvedSpecification, Result, Rotation, SheetLayout, SourceRef, assemble, plan, validate,
};

/// State of one build: sequence, specification and the documents behind them
pub struct Session<S> {
    store: S,
    sequence: PageSequence,
    specification: PrintSpecification,
}

impl<S: DocumentStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            sequence: PageSequence::new(),
            specification: PrintSpecification::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sequence(&self) -> &PageSequence {
        &self.sequence
    }

    pub fn specification(&self) -> &PrintSpecification {
        &self.specification
    }

    /// Replace the sequence with a freshly assembled one
    pub fn assemble(&mut self, request: &AssemblyRequest) -> Result<()> {
        self.sequence = assemble(request, &self.store)?;
        Ok(())
    }

    pub fn insert_blank(&mut self, at: usize) -> PageId {
        self.sequence.insert_blank(at)
    }

    /// Insert a content page, checking the source page exists first
    pub fn insert_page(&mut self, at: usize, source: SourceRef) -> Result<PageId> {
        let orientation = self
            .store
            .page_dimensions(&source.document, source.page_index)?
            .orientation();
        Ok(self.sequence.insert_page(at, source, orientation))
    }

    pub fn reorder(&mut self, id: PageId, to: usize) -> Result<()> {
        self.sequence.reorder(id, to)
    }

    /// Swap an entry's source page, taking the orientation of the new page
    pub fn replace(&mut self, id: PageId, source: SourceRef) -> Result<()> {
        let orientation = self
            .store
            .page_dimensions(&source.document, source.page_index)?
            .orientation();
        self.sequence.replace(id, source, orientation)
    }

    pub fn remove(&mut self, id: PageId) -> Result<()> {
        self.sequence.remove(id).map(|_| ())
    }

    pub fn rotate(&mut self, id: PageId, rotation: Rotation) -> Result<()> {
        self.sequence.set_rotation(id, rotation)
    }

    /// Store the specification as edited and report whether it resolves.
    ///
    /// The edit is kept even when rejected so the host can keep fixing fields.
    pub fn set_specification(
        &mut self,
        specification: PrintSpecification,
    ) -> std::result::Result<ResolvedSpecification, Vec<FieldError>> {
        self.specification = specification;
        self.resolve()
    }

    /// Validate the current specification against the current sequence
    pub fn resolve(&self) -> std::result::Result<ResolvedSpecification, Vec<FieldError>> {
        validate(&self.specification, &self.sequence)
    }

    /// Plan the current state on the calling thread
    pub fn plan(&self, specification: &ResolvedSpecification) -> Result<SheetLayout> {
        plan(&self.sequence, specification)
    }
}
