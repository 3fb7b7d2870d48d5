use async_trait::async_trait;

use crate::domain::DomainError;

/// A single global counter held by an external store with atomic increments.
///
/// Callers only ever do blind increments and blind reads; there is no
/// read-modify-write on this side.
#[async_trait]
pub trait RequestCounter: Send + Sync {
    /// Atomically add one and return the new value.
    async fn increment(&self) -> Result<u64, DomainError>;

    /// Current value, or `None` if the key has never been written.
    async fn get(&self) -> Result<Option<u64>, DomainError>;
}
