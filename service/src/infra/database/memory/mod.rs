//! In-memory [`Database`] implementation.

mod impls;

use std::{collections::HashMap, sync::Arc};

use derive_more::{Display, Error as StdError};
use tokio::sync::{Mutex, RwLock, RwLockReadGuard};

use crate::{
    domain::{driver, order, trailer, Driver, Order, Trailer},
    infra::database::LICENSE_PLATE_CONSTRAINT,
};
#[cfg(doc)]
use crate::infra::Database;

/// In-memory [`Database`].
///
/// Keeps the same referential rules as the persistent storage does:
/// deleting a record detaches everything referencing it, and license plates
/// are unique.
///
/// [`Transact`]ion stages its writes on a snapshot of the committed tables
/// and records them as [`Change`]s. [`Commit`] replays the recorded
/// [`Change`]s onto the committed tables as they are at that moment, so
/// writes made outside the transaction are preserved. If any replayed
/// [`Change`] violates a constraint, nothing is committed.
///
/// [`Commit`]: common::operations::Commit
/// [`Transact`]: common::operations::Transact
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// Committed [`Tables`].
    committed: Arc<RwLock<Tables>>,

    /// Ongoing transaction, if any.
    staged: Option<Transaction>,
}

impl Memory {
    /// Creates a new empty [`Memory`] database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns [`Tables`] visible to this [`Memory`] client.
    fn tables(&self) -> &RwLock<Tables> {
        self.staged.as_ref().map_or(&self.committed, |tx| &tx.tables)
    }

    /// Locks [`Tables`] for reading.
    async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables().read().await
    }

    /// Applies the provided [`Change`] to the visible [`Tables`], recording
    /// it if a transaction is ongoing.
    async fn apply(&self, change: Change) -> Result<(), Error> {
        let Some(tx) = &self.staged else {
            return change.apply(&mut *self.committed.write().await);
        };

        let mut changes = tx.changes.lock().await;
        change.apply(&mut *tx.tables.write().await)?;
        changes.push(change);
        Ok(())
    }
}

/// Ongoing transaction of a [`Memory`] database.
#[derive(Clone, Debug)]
struct Transaction {
    /// Committed [`Tables`] snapshot with the recorded [`Change`]s applied.
    tables: Arc<RwLock<Tables>>,

    /// [`Change`]s recorded so far, in order.
    changes: Arc<Mutex<Vec<Change>>>,
}

/// Tables of a [`Memory`] database.
#[derive(Clone, Debug, Default)]
struct Tables {
    /// Stored [`Driver`]s.
    drivers: HashMap<driver::Id, Driver>,

    /// Stored [`Trailer`]s.
    trailers: HashMap<trailer::Id, Trailer>,

    /// Stored [`Order`]s.
    orders: HashMap<order::Id, Order>,
}

/// Single write to [`Tables`].
#[derive(Debug)]
enum Change {
    /// Inserts or replaces a [`Driver`].
    PutDriver(Driver),

    /// Removes a [`Driver`] detaching everything referencing it.
    RemoveDriver(driver::Id),

    /// Inserts or replaces a [`Trailer`].
    PutTrailer(Trailer),

    /// Removes a [`Trailer`] detaching [`Order`]s referencing it.
    RemoveTrailer(trailer::Id),

    /// Inserts or replaces an [`Order`].
    PutOrder(Order),

    /// Removes an [`Order`].
    RemoveOrder(order::Id),
}

impl Change {
    /// Applies this [`Change`] to the provided [`Tables`].
    ///
    /// [`Tables`] are left untouched on error.
    fn apply(&self, tables: &mut Tables) -> Result<(), Error> {
        match self {
            Self::PutDriver(d) => {
                drop(tables.drivers.insert(d.id, d.clone()));
            }
            Self::RemoveDriver(id) => {
                if tables.drivers.remove(id).is_none() {
                    return Ok(());
                }
                let detached = Some(*id);
                for d in tables.drivers.values_mut() {
                    if d.partner == detached {
                        d.partner = None;
                    }
                }
                for t in tables.trailers.values_mut() {
                    if t.driver == detached {
                        t.driver = None;
                    }
                }
                for o in tables.orders.values_mut() {
                    if o.driver == detached {
                        o.driver = None;
                    }
                }
            }
            Self::PutTrailer(t) => {
                let occupied = tables.trailers.values().any(|other| {
                    other.id != t.id && other.license_plate == t.license_plate
                });
                if occupied {
                    return Err(Error::UniqueViolation(
                        LICENSE_PLATE_CONSTRAINT,
                    ));
                }
                drop(tables.trailers.insert(t.id, t.clone()));
            }
            Self::RemoveTrailer(id) => {
                if tables.trailers.remove(id).is_none() {
                    return Ok(());
                }
                for o in tables.orders.values_mut() {
                    if o.trailer == Some(*id) {
                        o.trailer = None;
                    }
                }
            }
            Self::PutOrder(o) => {
                drop(tables.orders.insert(o.id, o.clone()));
            }
            Self::RemoveOrder(id) => {
                drop(tables.orders.remove(id));
            }
        }
        Ok(())
    }
}

/// [`Memory`] database error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// Unique constraint is violated.
    #[display("Unique constraint `{_0}` is violated")]
    UniqueViolation(#[error(not(source))] &'static str),
}

impl Error {
    /// Checks if the error is a unique violation of the specified constraint.
    #[must_use]
    pub fn is_unique_violation(&self, constraint: Option<&str>) -> bool {
        match self {
            Self::UniqueViolation(c) => constraint.map_or(true, |v| v == *c),
        }
    }
}
