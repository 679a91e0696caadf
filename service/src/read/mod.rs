//! Read entities definitions.

pub mod driver;
pub mod order;
pub mod trailer;
