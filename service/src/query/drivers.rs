//! [`Query`] collection related to the multiple [`Driver`]s.

use common::operations::By;

use crate::domain::Driver;
#[cfg(doc)]
use crate::{domain::driver::FullName, Query};

use super::DatabaseQuery;

/// Queries all the [`Driver`]s ordered by their [`FullName`]s.
pub type List = DatabaseQuery<By<Vec<Driver>, ()>>;
