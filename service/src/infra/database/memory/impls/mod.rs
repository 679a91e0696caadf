//! [`Database`] implementations.

mod driver;
mod order;
mod trailer;

use std::{mem, sync::Arc};

use common::operations::{Commit, Transact};
use tokio::sync::{Mutex, RwLock};
use tracerr::Traced;

use crate::infra::{database, Database};

use super::{Change, Memory, Tables, Transaction};

impl Database<Transact> for Memory {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        if self.staged.is_some() {
            return Ok(self.clone());
        }

        let snapshot = self.committed.read().await.clone();
        Ok(Self {
            committed: Arc::clone(&self.committed),
            staged: Some(Transaction {
                tables: Arc::new(RwLock::new(snapshot)),
                changes: Arc::new(Mutex::new(Vec::new())),
            }),
        })
    }
}

impl Database<Commit> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        let Some(tx) = &self.staged else {
            return Ok(());
        };

        let changes: Vec<Change> = mem::take(&mut *tx.changes.lock().await);
        let mut committed = self.committed.write().await;
        let mut tables = Tables::clone(&committed);
        for change in &changes {
            change.apply(&mut tables).map_err(|e| {
                tracerr::new!(database::Error::from(e))
            })?;
        }
        *committed = tables;
        Ok(())
    }
}
