// src/cli.rs

//! CLI argument parsing using `clap`.

use std::ffi::OsString;
use std::path::Path;

use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, Parser, ValueEnum};

use crate::engine::RunOptions;
use crate::scan::DEFAULT_MAX_LINE;

const AFTER_HELP: &str = "\
All text outside the armoured blocks is ignored. Each block, including its
BEGIN and END lines, is written to the standard input of a fresh instance of
the command.

ENVIRONMENT
  XARMOUR_INDEX  Index of armoured text, starting at zero.
  XARMOUR_COUNT  Command successes so far.
  XARMOUR_TIMES  Times, if set.
  XARMOUR_LABEL  Label of the armoured text.
  XARMOUR_LOG    Log level for xarmour itself (default: warn).

RETURN VALUE
  Without --times, the return code of the first command to fail. If the
  command was killed by a signal, the signal number plus 128.

  With --times, 0 if the command succeeded at least that many times, else 1.
  All armoured blocks are processed in this mode even if xarmour could stop
  early.

  If the command could not be executed, or if the options are invalid, the
  status 1 is returned.

EXAMPLES
  Print the label of each armoured block found:

    cat chain.pem | xarmour -- printenv XARMOUR_LABEL

  Verify a series of detached PGP signatures, succeeding if two are valid:

    cat original_file.asc | xarmour -t 2 -- gpg --verify - original_file";

// Manual-style layout shared by `-h` and `--help`.
const HELP_TEMPLATE: &str = "\
NAME
  {name} - {about}

SYNOPSIS
  {usage}

DESCRIPTION
  Parses multiple armoured text blocks containing PEM encoded or PGP
  armoured data, and passes each one to the command specified via stdin.

OPTIONS
{all-args}

{after-help}";

const TIMES_ERROR: &str = "Count must be bigger than 0.";

/// Command-line arguments for `xarmour`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "xarmour",
    about = "Split armoured data and process each one through a command.",
    help_template = HELP_TEMPLATE,
    after_help = AFTER_HELP,
    disable_version_flag = true
)]
pub struct CliArgs {
    /// Number of times the command must succeed for xarmour to return
    /// success. If unset, xarmour gives up on the first failure.
    #[arg(
        short = 't',
        long = "times",
        value_name = "TIMES",
        value_parser = parse_times
    )]
    pub times: Option<u64>,

    /// Display the version number.
    #[arg(short = 'v', long = "version", action = ArgAction::SetTrue)]
    pub version: bool,

    /// Longest input chunk in bytes; longer lines are split and a BEGIN or
    /// END line split this way does not match.
    #[arg(
        long,
        value_name = "BYTES",
        default_value_t = DEFAULT_MAX_LINE,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub max_line: usize,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `XARMOUR_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Command to run for each armoured block, followed by its arguments.
    #[arg(value_name = "COMMAND", trailing_var_arg = true, num_args = 0..)]
    pub command: Vec<OsString>,
}

impl CliArgs {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            threshold: self.times,
            max_line: self.max_line,
        }
    }
}

fn parse_times(value: &str) -> Result<u64, String> {
    value
        .parse::<u64>()
        .ok()
        .filter(|&times| times > 0)
        .ok_or_else(|| TIMES_ERROR.to_string())
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Parse the process arguments.
///
/// Help is printed to stdout with status 0; any parse error is printed to
/// stderr with status 1.
pub fn parse() -> CliArgs {
    CliArgs::try_parse().unwrap_or_else(|err| {
        let code = if err.use_stderr() { 1 } else { 0 };
        let _ = err.print();
        std::process::exit(code);
    })
}

pub fn version_string() -> String {
    format!("xarmour {}", env!("CARGO_PKG_VERSION"))
}

/// Basename of `argv[0]`, used to prefix diagnostics.
pub fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "xarmour".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    fn parse_from(args: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("xarmour").chain(args.iter().copied()))
    }

    #[test]
    fn command_and_arguments_after_double_dash() {
        let args = parse_from(&["-t", "2", "--", "gpg", "--verify", "-", "file"]).unwrap();
        assert_eq!(args.times, Some(2));
        assert_eq!(args.command, vec!["gpg", "--verify", "-", "file"]);
    }

    #[test]
    fn first_positional_ends_option_parsing() {
        let args = parse_from(&["printenv", "-t"]).unwrap();
        assert_eq!(args.times, None);
        assert_eq!(args.command, vec!["printenv", "-t"]);
    }

    #[test]
    fn long_times_option() {
        let args = parse_from(&["--times", "3", "true"]).unwrap();
        assert_eq!(args.run_options().threshold, Some(3));
    }

    #[test]
    fn times_must_be_positive() {
        assert!(parse_from(&["-t", "0", "true"]).is_err());
        assert!(parse_from(&["-t", "-2", "true"]).is_err());
        assert!(parse_from(&["-t", "two", "true"]).is_err());
        assert!(parse_from(&["-t"]).is_err());
    }

    #[test]
    fn invalid_times_reports_count_message() {
        for value in ["0", "two", "3x"] {
            let err = parse_from(&["-t", value, "true"]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation);
            assert!(err.to_string().contains(TIMES_ERROR), "{value:?}: {err}");
        }
    }

    #[test]
    fn help_has_manual_sections() {
        let help = CliArgs::command().render_long_help().to_string();
        let mut last = 0;
        for heading in [
            "NAME",
            "SYNOPSIS",
            "DESCRIPTION",
            "OPTIONS",
            "ENVIRONMENT",
            "RETURN VALUE",
            "EXAMPLES",
        ] {
            let at = help[last..]
                .find(&format!("{heading}\n"))
                .unwrap_or_else(|| panic!("missing {heading} in:\n{help}"));
            last += at;
        }
        assert!(help.contains("xarmour - Split armoured data"));
        assert!(help.contains("xarmour [OPTIONS] [COMMAND]..."));
        assert!(help.contains("--times"));
    }

    #[test]
    fn missing_command_parses_to_empty_argv() {
        let args = parse_from(&[]).unwrap();
        assert!(args.command.is_empty());
    }

    #[test]
    fn version_flag_is_lowercase_v() {
        assert!(parse_from(&["-v"]).unwrap().version);
        assert!(parse_from(&["--version"]).unwrap().version);
    }

    #[test]
    fn help_is_not_an_error_on_stderr() {
        let err = parse_from(&["-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(!err.use_stderr());
    }

    #[test]
    fn max_line_defaults_to_historical_buffer() {
        let args = parse_from(&["true"]).unwrap();
        assert_eq!(args.max_line, DEFAULT_MAX_LINE);
        assert!(parse_from(&["--max-line", "0", "true"]).is_err());
        assert_eq!(parse_from(&["--max-line", "80", "true"]).unwrap().max_line, 80);
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(parse_from(&["--bogus", "true"]).is_err());
    }
}
