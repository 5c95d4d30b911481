//! Command-line argument parsing.
//!
//! Hand-rolled parsing over an argument iterator: subcommands first, flags
//! anywhere, unknown input degrades to showing help rather than erroring
//! cryptically.

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the scheduler against the real clock.
    Run { debug_enabled: bool },
    /// Run the scheduler against compressed simulated time.
    Simulate {
        debug_enabled: bool,
        start: String,
        end: String,
        multiplier: f64,
    },
    /// Update settings fields and notify the scheduler.
    Set {
        debug_enabled: bool,
        fields: Vec<(String, String)>,
    },
    /// Print the current reminder state.
    Status,
    /// Display help information and exit.
    ShowHelp,
    /// Display version information and exit.
    ShowVersion,
    /// Show help due to unknown arguments and exit.
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments (without the program name) into a
    /// structured action.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut debug_enabled = false;
        let mut subcommand: Option<String> = None;
        let mut positionals: Vec<String> = Vec::new();
        let mut multiplier = 0.0_f64;
        let mut bad_args = false;

        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            let arg = arg.as_ref();
            match arg {
                "--help" | "-h" => return ParsedArgs::with(CliAction::ShowHelp),
                "--version" | "-V" => return ParsedArgs::with(CliAction::ShowVersion),
                "--debug" | "-d" => debug_enabled = true,
                "--multiplier" | "-m" => match iter.next() {
                    Some(value) => match value.as_ref().parse::<f64>() {
                        Ok(parsed) if parsed >= 0.0 => multiplier = parsed,
                        _ => bad_args = true,
                    },
                    None => bad_args = true,
                },
                _ if arg.starts_with('-') => bad_args = true,
                _ if subcommand.is_none() => subcommand = Some(arg.to_string()),
                _ => positionals.push(arg.to_string()),
            }
        }

        if bad_args {
            return ParsedArgs::with(CliAction::ShowHelpDueToError);
        }

        let action = match subcommand.as_deref() {
            None | Some("run") if positionals.is_empty() => CliAction::Run { debug_enabled },
            Some("simulate") => match Self::parse_simulate(&positionals) {
                Some((start, end)) => CliAction::Simulate {
                    debug_enabled,
                    start,
                    end,
                    multiplier,
                },
                None => CliAction::ShowHelpDueToError,
            },
            Some("set") => match Self::parse_fields(&positionals) {
                Some(fields) if !fields.is_empty() => CliAction::Set {
                    debug_enabled,
                    fields,
                },
                _ => CliAction::ShowHelpDueToError,
            },
            Some("status") if positionals.is_empty() => CliAction::Status,
            _ => CliAction::ShowHelpDueToError,
        };

        ParsedArgs { action }
    }

    fn with(action: CliAction) -> ParsedArgs {
        ParsedArgs { action }
    }

    /// `simulate` takes exactly two datetime positionals: START and END,
    /// each "YYYY-MM-DD HH:MM" (quoted) or "YYYY-MM-DDTHH:MM".
    fn parse_simulate(positionals: &[String]) -> Option<(String, String)> {
        match positionals {
            [start, end] => Some((start.replace('T', " "), end.replace('T', " "))),
            _ => None,
        }
    }

    /// `set` takes key=value pairs.
    fn parse_fields(positionals: &[String]) -> Option<Vec<(String, String)>> {
        let mut fields = Vec::new();
        for positional in positionals {
            let (key, value) = positional.split_once('=')?;
            if key.is_empty() || value.is_empty() {
                return None;
            }
            fields.push((key.to_string(), value.to_string()));
        }
        Some(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_runs_normally() {
        let parsed = ParsedArgs::parse(Vec::<String>::new());
        assert_eq!(
            parsed.action,
            CliAction::Run {
                debug_enabled: false
            }
        );
    }

    #[test]
    fn debug_flag_is_recognized() {
        let parsed = ParsedArgs::parse(["--debug"]);
        assert_eq!(parsed.action, CliAction::Run { debug_enabled: true });
    }

    #[test]
    fn simulate_requires_start_and_end() {
        let parsed = ParsedArgs::parse(["simulate", "2026-03-10T08:00", "2026-03-11T08:00"]);
        assert_eq!(
            parsed.action,
            CliAction::Simulate {
                debug_enabled: false,
                start: "2026-03-10 08:00".to_string(),
                end: "2026-03-11 08:00".to_string(),
                multiplier: 0.0,
            }
        );

        let parsed = ParsedArgs::parse(["simulate", "2026-03-10T08:00"]);
        assert_eq!(parsed.action, CliAction::ShowHelpDueToError);
    }

    #[test]
    fn set_collects_field_pairs() {
        let parsed = ParsedArgs::parse(["set", "start=09:00", "active=true"]);
        assert_eq!(
            parsed.action,
            CliAction::Set {
                debug_enabled: false,
                fields: vec![
                    ("start".to_string(), "09:00".to_string()),
                    ("active".to_string(), "true".to_string()),
                ],
            }
        );
    }

    #[test]
    fn set_without_fields_shows_help() {
        let parsed = ParsedArgs::parse(["set"]);
        assert_eq!(parsed.action, CliAction::ShowHelpDueToError);
    }

    #[test]
    fn unknown_flags_show_help() {
        let parsed = ParsedArgs::parse(["--frobnicate"]);
        assert_eq!(parsed.action, CliAction::ShowHelpDueToError);
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(ParsedArgs::parse(["--help"]).action, CliAction::ShowHelp);
        assert_eq!(ParsedArgs::parse(["-V"]).action, CliAction::ShowVersion);
    }
}
