use std::sync::Arc;

use salvo::async_trait;

use crate::error::AppResult;
use spooky_core::error::CoreError;
use spooky_geocode::GeocodeProvider;
use spooky_service::geocode::SearchGate;

/// Makes the geocoding provider and the process-wide search gate available to handlers.
///
/// The gate is shared, not cloned, so every request sees the same rate
/// window and cache.
pub struct GeocodeHandler {
    pub provider: Arc<dyn GeocodeProvider>,
    pub gate: Arc<SearchGate>,
}

impl GeocodeHandler {
    #[must_use]
    pub fn new<P: GeocodeProvider + 'static>(provider: P, gate: SearchGate) -> Self {
        Self {
            provider: Arc::new(provider),
            gate: Arc::new(gate),
        }
    }
}

#[async_trait]
impl salvo::Handler for GeocodeHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.provider));
        depot.inject(Arc::clone(&self.gate));
    }
}

/// ## Summary
/// Retrieves the geocoding provider from the depot.
///
/// ## Errors
/// Returns an error if the provider is not found in the depot.
pub fn get_provider_from_depot(depot: &salvo::Depot) -> AppResult<Arc<dyn GeocodeProvider>> {
    depot
        .obtain::<Arc<dyn GeocodeProvider>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Geocode provider not found in depot").into())
}

/// ## Summary
/// Retrieves the search gate from the depot.
///
/// ## Errors
/// Returns an error if the gate is not found in the depot.
pub fn get_gate_from_depot(depot: &salvo::Depot) -> AppResult<Arc<SearchGate>> {
    depot
        .obtain::<Arc<SearchGate>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Search gate not found in depot").into())
}
