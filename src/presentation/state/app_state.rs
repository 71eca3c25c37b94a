use std::sync::Arc;

use crate::application::services::PipelineService;
use crate::infrastructure::storage::NarrationStore;
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub pipeline_service: Arc<PipelineService>,
    pub narration_store: Arc<NarrationStore>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(
        pipeline_service: Arc<PipelineService>,
        narration_store: Arc<NarrationStore>,
        settings: Settings,
    ) -> Self {
        Self {
            pipeline_service,
            narration_store,
            settings: Arc::new(settings),
        }
    }
}
