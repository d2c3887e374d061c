//! PostgreSQL transaction scope.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::foundation::DomainError;
use crate::ports::{
    PullRequestRepository, Store, StoreTransaction, TeamRepository, UserRepository,
};

use super::errors::map_sqlx_error;

/// PostgreSQL implementation of [`Store`].
///
/// Every transaction runs at `SERIALIZABLE`, so two operations racing for
/// the same reviewer slot cannot both commit.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin transaction", e))?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("set isolation level", e))?;

        Ok(Box::new(PostgresTransaction { tx }))
    }
}

/// An open PostgreSQL transaction. Dropping it rolls back.
pub struct PostgresTransaction {
    pub(super) tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTransaction for PostgresTransaction {
    fn teams(&mut self) -> &mut dyn TeamRepository {
        self
    }

    fn users(&mut self) -> &mut dyn UserRepository {
        self
    }

    fn pull_requests(&mut self) -> &mut dyn PullRequestRepository {
        self
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.tx
            .commit()
            .await
            .map_err(|e| map_sqlx_error("commit transaction", e))
    }
}
