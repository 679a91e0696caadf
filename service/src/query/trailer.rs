//! [`Query`] collection related to a single [`Trailer`].

use common::operations::By;

use crate::domain::{trailer, Trailer};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Trailer`] by its [`trailer::Id`].
pub type ById = DatabaseQuery<By<Option<Trailer>, trailer::Id>>;

/// Queries a [`Trailer`] by its [`trailer::LicensePlate`].
pub type ByLicensePlate =
    DatabaseQuery<By<Option<Trailer>, trailer::LicensePlate>>;
