//! Binary entry point: parse arguments and dispatch to the runner or a
//! one-shot command.

use walkr::Walkr;
use walkr::args::{CliAction, ParsedArgs};
use walkr::commands;
use walkr::common::constants::EXIT_FAILURE;
use walkr::log_error_exit;

fn main() {
    let parsed = ParsedArgs::parse(std::env::args().skip(1));

    let result = match parsed.action {
        CliAction::ShowVersion => {
            commands::help::display_version();
            Ok(())
        }
        CliAction::ShowHelp | CliAction::ShowHelpDueToError => {
            commands::help::display_help();
            Ok(())
        }
        CliAction::Run { debug_enabled } => Walkr::new(debug_enabled).run(),
        CliAction::Simulate {
            debug_enabled,
            start,
            end,
            multiplier,
        } => Walkr::new(debug_enabled).run_simulation(&start, &end, multiplier),
        CliAction::Set { fields, .. } => commands::set::run(&fields),
        CliAction::Status => commands::status::run(),
    };

    if let Err(e) = result {
        log_error_exit!("{e:#}");
        std::process::exit(EXIT_FAILURE);
    }
}
