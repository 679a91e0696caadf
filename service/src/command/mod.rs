//! [`Command`] definition.

pub mod create_driver;
pub mod create_order;
pub mod create_trailer;
pub mod delete_driver;
pub mod delete_order;
pub mod delete_trailer;
pub mod update_driver;
pub mod update_order;
pub mod update_trailer;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_driver::CreateDriver, create_order::CreateOrder,
    create_trailer::CreateTrailer, delete_driver::DeleteDriver,
    delete_order::DeleteOrder, delete_trailer::DeleteTrailer,
    update_driver::UpdateDriver, update_order::UpdateOrder,
    update_trailer::UpdateTrailer,
};
