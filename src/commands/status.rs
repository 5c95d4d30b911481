//! The `status` command: print the current reminder state.

use anyhow::Result;
use std::sync::Arc;

use crate::io::bus::Bus;
use crate::settings::FileStore;
use crate::settings::SettingsStore;
use crate::surface::control::Control;

/// Query the scheduler surface for its reminder state and print the literal
/// state tag. With no scheduler loaded in this process the query degrades to
/// `notActive`, the safe default.
pub fn run() -> Result<()> {
    let store = Arc::new(FileStore::new()?);
    let settings = store.load();
    let control = Control::new(Bus::new(), store);

    let state = control.reminder_state();
    log_block_start!("Reminder state: {}", state.tag());
    log_indented!(
        "Reminders {}, window {} – {}",
        if settings.is_active() {
            "enabled"
        } else {
            "disabled"
        },
        settings.window().start().format("%H:%M"),
        settings.window().end().format("%H:%M")
    );
    log_end!();
    Ok(())
}
