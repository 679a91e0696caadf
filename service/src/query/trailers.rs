//! [`Query`] collection related to the multiple [`Trailer`]s.

use common::operations::By;

use crate::domain::Trailer;
#[cfg(doc)]
use crate::{domain::trailer::Brand, Query};

use super::DatabaseQuery;

/// Queries all the [`Trailer`]s ordered by their [`Brand`]s.
pub type List = DatabaseQuery<By<Vec<Trailer>, ()>>;
