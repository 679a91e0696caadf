//! [`Query`] collection related to a single [`Driver`].

use common::operations::By;

use crate::domain::{driver, Driver};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Driver`] by its [`driver::Id`].
pub type ById = DatabaseQuery<By<Option<Driver>, driver::Id>>;
