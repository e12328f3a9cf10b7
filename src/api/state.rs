//! Shared handler state

use std::sync::Arc;

use crate::instructions::InstructionTable;
use crate::storage::Store;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Record store
    pub store: Arc<Store>,

    /// Instruction lists used by the free-text current-recipe endpoint
    pub instructions: Arc<InstructionTable>,

    /// Fail free-text requests that match no step instead of storing step 0
    pub reject_unknown_instructions: bool,
}

impl AppState {
    /// State with the built-in instruction table and lenient matching
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            instructions: Arc::new(InstructionTable::default()),
            reject_unknown_instructions: false,
        }
    }

    pub fn with_instructions(mut self, instructions: InstructionTable) -> Self {
        self.instructions = Arc::new(instructions);
        self
    }

    pub fn reject_unknown_instructions(mut self, reject: bool) -> Self {
        self.reject_unknown_instructions = reject;
        self
    }
}
