use embedded_io::Write;

use super::{Outcome, VERIFY_INTERVAL};
use crate::device::FramDevice;
use crate::error::Result;
use crate::record::Record;
use crate::response::ResponseWriter;

/// Store `data` as the device record
///
/// The payload is truncated to `capacity - 1` bytes so the sentinel always
/// fits. Only indices that are multiples of [`VERIFY_INTERVAL`] are read
/// back; a mismatch aborts before the sentinel is written, leaving the
/// device partially updated.
pub fn write<D, W>(dev: &mut D, out: &mut ResponseWriter<W>, data: &[u8]) -> Result<Outcome>
where
    D: FramDevice + ?Sized,
    W: Write,
{
    if data.is_empty() {
        out.error("No data provided")?;
        return Ok(Outcome::Rejected);
    }

    let max_len = dev.capacity().saturating_sub(1) as usize;
    let payload = &data[..data.len().min(max_len)];
    if payload.len() < data.len() {
        log::debug!(
            "write payload truncated from {} to {} bytes",
            data.len(),
            payload.len()
        );
    }

    for (addr, &byte) in (0u32..).zip(payload) {
        dev.write_byte(addr, byte)?;

        if addr % VERIFY_INTERVAL == 0 {
            let readback = dev.read_byte(addr)?;
            if readback != byte {
                log::warn!(
                    "verify mismatch at {}: wrote 0x{:02X}, read 0x{:02X}",
                    addr,
                    byte,
                    readback
                );
                out.error_at("Write verification failed at position", addr)?;
                return Ok(Outcome::Aborted { position: addr });
            }
        }
    }

    Record::new(dev).terminate(payload.len() as u32)?;
    out.line("WRITTEN: Data written successfully")?;
    log::debug!("stored {}-byte record", payload.len());
    Ok(Outcome::Completed)
}
