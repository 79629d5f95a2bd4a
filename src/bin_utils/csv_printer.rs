use std::io::Write;

use csv::Writer;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ClientRow {
    pub client: String,
    pub balance: u64,
}

pub fn print_clients<W>(
    output: &mut W,
    clients: impl Iterator<Item = ClientRow>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for row in clients {
        if let Err(err) = writer.serialize(row) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
