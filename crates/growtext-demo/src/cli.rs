#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args by hand; there are only a handful of flags. Every flag has a
//! `GROWTEXT_DEMO_*` environment override that applies first, so an explicit
//! flag always wins.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
growtext demo: a text area that grows with its content

USAGE:
    growtext-demo [OPTIONS]

OPTIONS:
    --width=N            Text columns (default: 30)
    --max-height=N       Maximum content rows, 0 for unbounded (default: 3)
    --min-height=N       Minimum content rows (default: 1)
    --placeholder=TEXT   Text shown while empty (default: Placeholder...)
    --line-numbers       Show a line-number gutter
    --no-border          Draw without the rounded border
    --blink-ms=N         Cursor blink interval, 0 for a steady cursor (default: 530)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    Esc / Ctrl+C          Quit
    Enter                 New line
    Ctrl+A / Ctrl+E       Line start / end
    Ctrl+K / Ctrl+U       Delete to line end / start
    Alt+< / Alt+>         Document start / end

ENVIRONMENT VARIABLES:
    GROWTEXT_DEMO_WIDTH         Override --width
    GROWTEXT_DEMO_MAX_HEIGHT    Override --max-height
    GROWTEXT_DEMO_MIN_HEIGHT    Override --min-height
    GROWTEXT_DEMO_PLACEHOLDER   Override --placeholder
    GROWTEXT_DEMO_LINE_NUMBERS  Show line numbers (1/true)
    GROWTEXT_DEMO_NO_BORDER     Hide the border (1/true)
    GROWTEXT_DEMO_BLINK_MS      Override --blink-ms
    GROWTEXT_LOG                Write logs to this file
    GROWTEXT_LOG_LEVEL          Log filter (falls back to RUST_LOG, then info)
    GROWTEXT_CJK_WIDTH          Treat ambiguous-width glyphs as wide (1/true)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    pub width: usize,
    /// `None` when unbounded (`--max-height=0`).
    pub max_height: Option<usize>,
    pub min_height: usize,
    pub placeholder: String,
    pub line_numbers: bool,
    pub border: bool,
    /// Blink interval in milliseconds; 0 keeps the cursor steady.
    pub blink_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Help,
    Version,
    InvalidValue { flag: &'static str, value: String },
    UnknownArg(String),
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            width: 30,
            max_height: Some(3),
            min_height: 1,
            placeholder: "Placeholder...".into(),
            line_numbers: false,
            border: true,
            blink_ms: 530,
        }
    }
}

fn env_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

fn max_height_from(n: usize) -> Option<usize> {
    (n > 0).then_some(n)
}

fn parse_value<T: std::str::FromStr>(flag: &'static str, val: &str) -> Result<T, ParseError> {
    val.parse().map_err(|_| ParseError::InvalidValue {
        flag,
        value: val.to_string(),
    })
}

impl Opts {
    /// Parse command-line arguments and environment variables, exiting on
    /// `--help`, `--version`, or a bad argument.
    pub fn parse() -> Self {
        match Self::parse_from_env_and_args(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(opts) => opts,
            Err(ParseError::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Err(ParseError::Version) => {
                println!("growtext-demo {VERSION}");
                process::exit(0);
            }
            Err(ParseError::InvalidValue { flag, value }) => {
                eprintln!("Invalid {flag} value: {value}");
                process::exit(2);
            }
            Err(ParseError::UnknownArg(arg)) => {
                eprintln!("Unknown argument: {arg}");
                eprintln!("Run with --help for usage information.");
                process::exit(2);
            }
        }
    }

    pub fn parse_from_env_and_args<I, S, F>(args: I, get_env: F) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Environment first; unparsable values are ignored.
        if let Some(val) = get_env("GROWTEXT_DEMO_WIDTH")
            && let Ok(n) = val.trim().parse()
        {
            opts.width = n;
        }
        if let Some(val) = get_env("GROWTEXT_DEMO_MAX_HEIGHT")
            && let Ok(n) = val.trim().parse()
        {
            opts.max_height = max_height_from(n);
        }
        if let Some(val) = get_env("GROWTEXT_DEMO_MIN_HEIGHT")
            && let Ok(n) = val.trim().parse()
        {
            opts.min_height = n;
        }
        if let Some(val) = get_env("GROWTEXT_DEMO_PLACEHOLDER") {
            opts.placeholder = val;
        }
        if let Some(val) = get_env("GROWTEXT_DEMO_LINE_NUMBERS") {
            opts.line_numbers = env_flag(&val);
        }
        if let Some(val) = get_env("GROWTEXT_DEMO_NO_BORDER") {
            opts.border = !env_flag(&val);
        }
        if let Some(val) = get_env("GROWTEXT_DEMO_BLINK_MS")
            && let Ok(n) = val.trim().parse()
        {
            opts.blink_ms = n;
        }

        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "--help" | "-h" => return Err(ParseError::Help),
                "--version" | "-V" => return Err(ParseError::Version),
                "--line-numbers" => opts.line_numbers = true,
                "--no-border" => opts.border = false,
                other => {
                    if let Some(val) = other.strip_prefix("--width=") {
                        opts.width = parse_value("--width", val)?;
                    } else if let Some(val) = other.strip_prefix("--max-height=") {
                        opts.max_height = max_height_from(parse_value("--max-height", val)?);
                    } else if let Some(val) = other.strip_prefix("--min-height=") {
                        opts.min_height = parse_value("--min-height", val)?;
                    } else if let Some(val) = other.strip_prefix("--placeholder=") {
                        opts.placeholder = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--blink-ms=") {
                        opts.blink_ms = parse_value("--blink-ms", val)?;
                    } else {
                        return Err(ParseError::UnknownArg(other.to_string()));
                    }
                }
            }
        }

        Ok(opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_with_env<I, S>(
        args: I,
        env_pairs: &[(&'static str, &'static str)],
    ) -> Result<Opts, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let map: std::collections::HashMap<_, _> = env_pairs.iter().copied().collect();
        Opts::parse_from_env_and_args(args, |key| map.get(key).map(|value| (*value).to_string()))
    }

    #[test]
    fn defaults_match_the_demo() {
        let opts = parse_with_env(Vec::<String>::new(), &[]).expect("parse");
        assert_eq!(opts, Opts::default());
        assert_eq!(opts.width, 30);
        assert_eq!(opts.max_height, Some(3));
        assert_eq!(opts.placeholder, "Placeholder...");
        assert!(opts.border);
        assert!(!opts.line_numbers);
    }

    #[test]
    fn help_text_lists_env_vars() {
        for var in [
            "GROWTEXT_DEMO_WIDTH",
            "GROWTEXT_DEMO_MAX_HEIGHT",
            "GROWTEXT_DEMO_BLINK_MS",
            "GROWTEXT_LOG",
        ] {
            assert!(HELP_TEXT.contains(var), "help text missing {var}");
        }
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn env_overrides_apply() {
        let env = [
            ("GROWTEXT_DEMO_WIDTH", "44"),
            ("GROWTEXT_DEMO_MAX_HEIGHT", "0"),
            ("GROWTEXT_DEMO_LINE_NUMBERS", "true"),
            ("GROWTEXT_DEMO_NO_BORDER", "1"),
            ("GROWTEXT_DEMO_PLACEHOLDER", "say something"),
        ];
        let opts = parse_with_env(Vec::<String>::new(), &env).expect("parse");
        assert_eq!(opts.width, 44);
        assert_eq!(opts.max_height, None);
        assert!(opts.line_numbers);
        assert!(!opts.border);
        assert_eq!(opts.placeholder, "say something");
    }

    #[test]
    fn bad_env_values_are_ignored() {
        let opts = parse_with_env(Vec::<String>::new(), &[("GROWTEXT_DEMO_WIDTH", "wide")])
            .expect("parse");
        assert_eq!(opts.width, 30);
    }

    #[test]
    fn args_override_env() {
        let args = ["--width=12", "--max-height=5"];
        let env = [("GROWTEXT_DEMO_WIDTH", "44"), ("GROWTEXT_DEMO_MAX_HEIGHT", "0")];
        let opts = parse_with_env(args, &env).expect("parse");
        assert_eq!(opts.width, 12, "args={args:?} env={env:?}");
        assert_eq!(opts.max_height, Some(5));
    }

    #[test]
    fn flags_parse() {
        let args = [
            "--line-numbers",
            "--no-border",
            "--min-height=2",
            "--blink-ms=0",
            "--placeholder=",
        ];
        let opts = parse_with_env(args, &[]).expect("parse");
        assert!(opts.line_numbers);
        assert!(!opts.border);
        assert_eq!(opts.min_height, 2);
        assert_eq!(opts.blink_ms, 0);
        assert_eq!(opts.placeholder, "");
    }

    #[test]
    fn help_and_version() {
        assert_eq!(parse_with_env(["-h"], &[]), Err(ParseError::Help));
        assert_eq!(parse_with_env(["--version"], &[]), Err(ParseError::Version));
    }

    #[test]
    fn invalid_value_reports_flag() {
        let err = parse_with_env(["--width=bad"], &[]);
        assert_eq!(
            err,
            Err(ParseError::InvalidValue {
                flag: "--width",
                value: "bad".into()
            })
        );
    }

    #[test]
    fn unknown_arg_reports_error() {
        let err = parse_with_env(["--mystery-flag"], &[]);
        assert!(
            matches!(err, Err(ParseError::UnknownArg(ref arg)) if arg == "--mystery-flag"),
            "expected UnknownArg for --mystery-flag, got {err:?}"
        );
    }
}
