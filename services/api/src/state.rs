//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds the resources shared
//! by every handler. Everything in it is immutable after startup.

use std::sync::Arc;
use tutor_core::TutorPipeline;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<TutorPipeline>,
}

impl AppState {
    pub fn new(pipeline: TutorPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}
