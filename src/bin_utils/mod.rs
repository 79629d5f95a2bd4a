//! This module could be a separate crate on its own, to bootstrap [`bankomat`]
//! within a binary, but for simplicity purposes it lives here so the
//! integration test can drive it too.

use std::io::{Read, Write};

use anyhow::Result;
use tracing::{info, warn};

use crate::{
    client::Bank,
    dispenser::Dispenser,
    inventory::Inventory,
    processor::{OperationProcessor, ProcessError, atm_processor::AtmProcessor},
};
use csv_parser::CsvOperationParser;
use csv_printer::{ClientRow, print_clients};

pub mod csv_parser;
pub mod csv_printer;

pub struct Service<'w, R, W: 'w> {
    pub bank: Bank,
    pub inventory: Inventory,
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, ProcessError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let mut processor = AtmProcessor::new(Dispenser::new(self.bank, self.inventory));

        let mut processed = 0u64;
        let mut skipped = 0u64;
        for (line, row) in parser {
            let row = match row {
                Ok(row) => row,
                Err(err) => {
                    warn!("Skipping malformed row at line {line}: {err}");
                    skipped += 1;
                    continue;
                }
            };
            match processor.process_operation(
                row.op,
                row.client,
                row.denomination,
                row.count,
                row.amount,
            ) {
                Ok(()) => processed += 1,
                Err(err) => {
                    skipped += 1;
                    (self.error_printer)(line, err);
                }
            }
        }
        info!("Processed {processed} operations, rejected {skipped}");

        print_clients(
            self.output,
            processor.dispenser.bank().clients().map(|client| ClientRow {
                client: client.name().to_owned(),
                balance: client.balance(),
            }),
        )
    }
}
