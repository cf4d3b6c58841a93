//! Export capture to file

use super::spinner;
use framctl_serial::{ExportDump, FramClient, Transport};
use std::fs;
use std::path::Path;

/// Run `EXPORT` and save the result as a hex listing or raw image
pub fn cmd_export<T: Transport>(
    client: &mut FramClient<T>,
    output: &Path,
    binary: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dump = capture_export(client)?;

    if binary {
        fs::write(output, &dump.bytes)?;
    } else {
        fs::write(output, dump.listing_text())?;
    }

    println!(
        "Exported {} bytes ({} KiB) to {:?}",
        dump.bytes.len(),
        dump.bytes.len() / 1024,
        output
    );
    Ok(())
}

/// Run `EXPORT` and decode the listing
pub fn capture_export<T: Transport>(
    client: &mut FramClient<T>,
) -> Result<ExportDump, Box<dyn std::error::Error>> {
    let pb = spinner("Exporting...")?;
    let mut bytes = 0usize;
    let result = client.execute_with("EXPORT", |line| {
        if let Some((_, rest)) = line.split_once(": ") {
            bytes += rest.split("  ").next().map_or(0, |hex| hex.split(' ').count());
            pb.set_message(format!("Exporting... {} bytes", bytes));
        }
    });
    pb.finish_and_clear();

    let response = result?.into_result()?;
    let dump = ExportDump::parse(&response.lines)?;
    log::debug!("Export listing has {} lines", response.lines.len());
    Ok(dump)
}
