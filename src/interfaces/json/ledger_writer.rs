use crate::domain::order::Order;
use crate::error::Result;
use std::io::Write;

/// Writes the completed-order ledger as pretty-printed JSON.
pub struct LedgerWriter<W: Write> {
    writer: W,
}

impl<W: Write> LedgerWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_orders(&mut self, orders: &[Order]) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, orders)?;
        writeln!(self.writer)?;
        Ok(())
    }
}
