//! Application state shared by every handler.

use imagelab_core::Config;
use imagelab_processing::{Gallery, ProcessingService};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub processing: ProcessingService,
}

impl AppState {
    pub fn new(config: Config, processing: ProcessingService) -> Self {
        Self {
            config: Arc::new(config),
            processing,
        }
    }

    pub fn gallery(&self) -> &Gallery {
        self.processing.gallery()
    }
}
