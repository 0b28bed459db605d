// Ctrl-C handling
// Ends the session with a notice instead of dying silently

use std::io::{self, Write};
use std::process;

use anyhow::{Context, Result};
use tracing::info;

/// Printed when the user interrupts the session.
pub const INTERRUPT_MESSAGE: &str = "User close program";

/// Write the interrupt notice on a fresh line.
pub fn write_interrupt_notice(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{INTERRUPT_MESSAGE}")?;
    out.flush()
}

/// Install a Ctrl-C handler that prints [`INTERRUPT_MESSAGE`] to stdout and
/// exits with status 0.
///
/// Stdout must not be held locked by the session, or the handler blocks.
pub fn install_interrupt_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        info!("interrupted by user");
        // nothing useful to do if stdout is gone
        let _ = write_interrupt_notice(&mut io::stdout());
        process::exit(0);
    })
    .context("failed to install interrupt handler")
}
