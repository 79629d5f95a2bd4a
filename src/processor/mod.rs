use thiserror::Error;

use crate::{
    client::DirectoryError,
    dispenser::DispenserError,
    operation::{OperationError, OperationKind},
};

pub mod atm_processor;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    OperationErr(#[from] OperationError),
    #[error(transparent)]
    DirectoryErr(#[from] DirectoryError),
    #[error(transparent)]
    DispenserErr(#[from] DispenserError),
}

pub trait OperationProcessor {
    fn process_operation(
        &mut self,
        kind: OperationKind,
        client: Option<String>,
        denomination: Option<u64>,
        count: Option<u32>,
        amount: Option<u64>,
    ) -> Result<(), ProcessError>;
}
