use crate::{
    client::Client,
    dispenser::Dispenser,
    operation::{Operation, OperationKind},
};

use super::{OperationProcessor, ProcessError};

/// Drives one dispenser (and through it, its bank) from a stream of parsed
/// operations.
pub struct AtmProcessor {
    pub dispenser: Dispenser,
}

impl AtmProcessor {
    pub fn new(dispenser: Dispenser) -> Self {
        Self { dispenser }
    }
}

impl OperationProcessor for AtmProcessor {
    fn process_operation(
        &mut self,
        kind: OperationKind,
        client: Option<String>,
        denomination: Option<u64>,
        count: Option<u32>,
        amount: Option<u64>,
    ) -> Result<(), ProcessError> {
        let operation = Operation::parse(kind, client, denomination, count, amount)?;
        match operation {
            Operation::Enroll { client, balance } => {
                self.dispenser
                    .bank_mut()
                    .add_client(Client::new(client, balance))?;
            }
            Operation::Strike { client } => {
                self.dispenser.bank_mut().remove_client(&client)?;
            }
            Operation::Open { client } => self.dispenser.start_session(&client)?,
            Operation::Close => self.dispenser.end_session()?,
            Operation::Deposit { notes } => {
                self.dispenser.deposit(std::slice::from_ref(&notes))?;
            }
            Operation::Withdraw { amount } => {
                self.dispenser.withdraw(amount)?;
            }
        }
        Ok(())
    }
}
