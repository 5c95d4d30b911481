//! Help and version screens.

/// Print usage information.
pub fn display_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!("walkr v{version} - break reminders scoped to your work hours");
    println!();
    println!("USAGE:");
    println!("    walkr [run]                      Start the reminder scheduler");
    println!("    walkr simulate <START> <END>     Run against compressed simulated time");
    println!("                                     (datetimes as YYYY-MM-DDTHH:MM)");
    println!("    walkr set <key=value>...         Update settings and notify the scheduler");
    println!("    walkr status                     Print the current reminder state");
    println!();
    println!("SET KEYS:");
    println!("    start=HH:MM          Work window start");
    println!("    end=HH:MM            Work window end (may be earlier than start");
    println!("                         for overnight windows, e.g. 22:00-06:00)");
    println!("    active=true|false    Enable or disable reminders");
    println!("    interval=MINUTES     Minutes between reminders");
    println!();
    println!("OPTIONS:");
    println!("    -d, --debug              Extra scheduling diagnostics");
    println!("    -m, --multiplier <N>     Simulated seconds per real second");
    println!("                             (simulate only; 0 = fast-forward)");
    println!("    -h, --help               Show this help");
    println!("    -V, --version            Show version");
}

/// Print the version line.
pub fn display_version() {
    println!("walkr {}", env!("CARGO_PKG_VERSION"));
}
