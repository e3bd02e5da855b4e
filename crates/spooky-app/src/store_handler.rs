use std::sync::Arc;

use salvo::async_trait;

use crate::error::AppResult;
use spooky_core::error::CoreError;
use spooky_db::store::Store;

/// Makes the user and house storage available to handlers.
pub struct StoreHandler {
    pub store: Arc<dyn Store>,
}

impl StoreHandler {
    #[must_use]
    pub fn new<S: Store + 'static>(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

#[async_trait]
impl salvo::Handler for StoreHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.store));
    }
}

/// ## Summary
/// Retrieves the storage from the depot.
///
/// ## Errors
/// Returns an error if the storage is not found in the depot.
pub fn get_store_from_depot(depot: &salvo::Depot) -> AppResult<Arc<dyn Store>> {
    depot
        .obtain::<Arc<dyn Store>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Store not found in depot").into())
}
