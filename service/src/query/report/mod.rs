//! Reporting [`Query`]s.
//!
//! [`Query`]: crate::Query

pub mod statistics;

pub use self::statistics::Statistics;
