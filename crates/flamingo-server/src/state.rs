use std::sync::Arc;

use flamingo_weather::{ForecastClient, SunbathingCriteria};

/// Shared, read-only request state
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: Arc<ForecastClient>,
    pub criteria: SunbathingCriteria,
}

impl AppState {
    pub fn new(client: ForecastClient) -> Self {
        Self {
            client: Arc::new(client),
            criteria: SunbathingCriteria::default(),
        }
    }
}
