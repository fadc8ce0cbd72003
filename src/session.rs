use crate::{
    error::{Diagnostics, Warning},
    options::ExportOptions,
    registry::BlockStore,
};

/// Everything one export run shares: the options it was started with, the blocks exported so
/// far, and the warnings raised along the way. Create one per export and pass it to every
/// exporter; nothing is kept between runs.
#[derive(Debug)]
pub struct ExportSession {
    options: ExportOptions,
    pub(crate) store: BlockStore,
    pub(crate) diagnostics: Diagnostics,
}

impl ExportSession {
    pub fn new(options: ExportOptions) -> Self {
        Self {
            options,
            store: BlockStore::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    pub fn store(&self) -> &BlockStore {
        &self.store
    }

    pub fn warnings(&self) -> &[Warning] {
        self.diagnostics.warnings()
    }

    /// Hands the warnings collected so far to the caller.
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        self.diagnostics.take()
    }

    /// Starts a new export run with the same options.
    pub fn reset(&mut self) {
        self.store.clear();
        self.diagnostics.take();
    }

    /// Ends the run, returning the exported blocks.
    pub fn into_store(self) -> BlockStore {
        self.store
    }

    pub(crate) fn warn(&mut self, warning: Warning) {
        self.diagnostics.warn(warning);
    }
}
