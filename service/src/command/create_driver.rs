//! [`Command`] for creating a new [`Driver`].

use common::operations::{By, Commit, Insert, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{driver, Driver},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Driver`].
#[derive(Clone, Debug)]
pub struct CreateDriver {
    /// [`driver::FullName`] of a new [`Driver`].
    pub full_name: driver::FullName,

    /// [`driver::PassportNumber`] of a new [`Driver`].
    pub passport_number: driver::PassportNumber,

    /// [`driver::Experience`] of a new [`Driver`].
    pub experience: driver::Experience,

    /// [`driver::Class`] of a new [`Driver`].
    pub class: driver::Class,

    /// ID of the partner [`Driver`], if any.
    pub partner: Option<driver::Id>,
}

impl<Db> Command<CreateDriver> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Driver>, driver::Id>>,
            Ok = Option<Driver>,
            Err = Traced<database::Error>,
        > + Database<Insert<Driver>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Driver;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateDriver) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateDriver {
            full_name,
            passport_number,
            experience,
            class,
            partner,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        if let Some(partner_id) = partner {
            _ = tx
                .execute(Select(By::<Option<Driver>, _>::new(partner_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::PartnerNotExists(partner_id))
                .map_err(tracerr::wrap!())?;
        }

        let driver = Driver {
            id: driver::Id::new(),
            full_name,
            passport_number,
            experience,
            class,
            partner,
        };
        tx.execute(Insert(driver.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(driver)
    }
}

/// Error of [`CreateDriver`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Partner [`Driver`] doesn't exist.
    #[display("Partner `Driver(id: {_0})` does not exist")]
    #[from(ignore)]
    PartnerNotExists(#[error(not(source))] driver::Id),
}
