use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::StoreError;
use crate::row::RowCells;

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Read-only access to the quake table: one row per exact key.
///
/// The service only ever holds this trait; it does not know which backend
/// sits behind it. One instance lives for the whole process and is shared
/// across concurrent requests.
pub trait RowStore: Send + Sync {
    /// Check connectivity and that the table exists. Called once at startup.
    fn init(&self) -> StoreFuture<'_, ()>;

    /// Fetch every cell of `row_key`.
    ///
    /// `Ok(None)` means the row does not exist. A row that exists but holds
    /// none of the columns the caller cares about is `Ok(Some(..))`.
    fn get(&self, row_key: &str) -> StoreFuture<'_, Option<RowCells>>;

    /// Release the connection. Called once at shutdown.
    fn close(&self) -> StoreFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }
}

/// Builds a store from its config section, serialised as JSON.
pub trait StoreFactory: Send + Sync {
    fn create(&self, config_json: &str) -> Result<Arc<dyn RowStore>, StoreError>;
}
