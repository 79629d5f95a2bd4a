use serde::Deserialize;
use thiserror::Error;

use crate::inventory::{Denomination, InvalidDenomination, NoteBundle};

/// Raw operation tag, as it appears in a script row.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Add a client to the bank directory.
    Enroll,
    /// Remove a client from the bank directory.
    Strike,
    /// Start a session for a client.
    Open,
    /// End the active session.
    Close,
    /// Feed notes of one denomination into the machine.
    Deposit,
    /// Dispense an exact amount.
    Withdraw,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OperationError {
    #[error("a client name is required for {kind:?}")]
    ClientRequired { kind: OperationKind },
    #[error("an amount is required for {kind:?}")]
    AmountRequired { kind: OperationKind },
    #[error("a denomination and a note count are required for Deposit")]
    NotesRequired,
    #[error(transparent)]
    InvalidDenomination(#[from] InvalidDenomination),
}

/// A fully typed operation, validated from the loosely shaped row fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Enroll { client: String, balance: u64 },
    Strike { client: String },
    Open { client: String },
    Close,
    Deposit { notes: NoteBundle },
    Withdraw { amount: u64 },
}

impl Operation {
    pub fn parse(
        kind: OperationKind,
        client: Option<String>,
        denomination: Option<u64>,
        count: Option<u32>,
        amount: Option<u64>,
    ) -> Result<Self, OperationError> {
        match kind {
            OperationKind::Enroll => Ok(Self::Enroll {
                client: required_client(kind, client)?,
                balance: amount.unwrap_or(0),
            }),
            OperationKind::Strike => Ok(Self::Strike {
                client: required_client(kind, client)?,
            }),
            OperationKind::Open => Ok(Self::Open {
                client: required_client(kind, client)?,
            }),
            OperationKind::Close => Ok(Self::Close),
            OperationKind::Deposit => {
                let (face, count) = denomination
                    .zip(count)
                    .ok_or(OperationError::NotesRequired)?;
                let denomination = Denomination::try_from(face)?;
                Ok(Self::Deposit {
                    notes: [(denomination, count)].into_iter().collect(),
                })
            }
            OperationKind::Withdraw => Ok(Self::Withdraw {
                amount: amount.ok_or(OperationError::AmountRequired { kind })?,
            }),
        }
    }
}

fn required_client(
    kind: OperationKind,
    client: Option<String>,
) -> Result<String, OperationError> {
    match client {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(OperationError::ClientRequired { kind }),
    }
}
