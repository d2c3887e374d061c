//! Transaction scope port.
//!
//! Every application handler opens exactly one [`StoreTransaction`] and
//! passes it explicitly to the code that needs repositories. There is no
//! ambient transaction: a repository can only be reached through the
//! transaction it belongs to.
//!
//! # Example
//!
//! ```ignore
//! let mut tx = store.begin().await?;
//! let mut pr = tx.pull_requests().get_by_id(&id).await?;
//! pr.merge();
//! tx.pull_requests().save(&pr).await?;
//! tx.commit().await?;
//! ```
//!
//! Dropping a transaction without calling `commit` rolls it back. This
//! covers early returns through `?` and cancelled futures alike.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

use super::{PullRequestRepository, TeamRepository, UserRepository};

/// Factory for atomic units of work.
#[async_trait]
pub trait Store: Send + Sync {
    /// Open a new transaction.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the backing store refuses the transaction
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, DomainError>;
}

/// One atomic unit of work spanning all repositories.
#[async_trait]
pub trait StoreTransaction: Send {
    fn teams(&mut self) -> &mut dyn TeamRepository;

    fn users(&mut self) -> &mut dyn UserRepository;

    fn pull_requests(&mut self) -> &mut dyn PullRequestRepository;

    /// Make every write issued through this transaction visible.
    async fn commit(self: Box<Self>) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn Store) {}
        fn _accepts_dyn_tx(_tx: Box<dyn StoreTransaction>) {}
    }
}
