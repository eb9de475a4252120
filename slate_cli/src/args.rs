//! Command-line argument parsing.
//!
//! Hand-rolled parser over the raw argv slice. Usage errors come back as
//! plain strings for the entry point to report.

/// What the invocation asked the CLI to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Execute the named embedded program.
    Run(String),
    /// Print the disassembly of the named embedded program.
    Disasm(String),
    /// List the embedded programs.
    List,
    /// Print version and exit.
    PrintVersion,
    /// Print usage and exit.
    PrintHelp,
}

/// Fully parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArgs {
    pub mode: ExecutionMode,
    /// Emit a per-instruction trace while executing.
    pub trace: bool,
    /// Report elapsed execution time on stderr.
    pub time: bool,
}

/// Parse the argument vector (argv[0] already stripped).
pub fn parse_args_vec(args: &[String]) -> Result<ParsedArgs, String> {
    let mut trace = false;
    let mut time = false;
    let mut disasm = false;
    let mut list = false;
    let mut name: Option<String> = None;

    for arg in args {
        match arg.as_str() {
            "--trace" | "-t" => trace = true,
            "--time" => time = true,
            "--disasm" | "-d" => disasm = true,
            "--list" | "-l" => list = true,
            "--help" | "-h" => {
                return Ok(ParsedArgs {
                    mode: ExecutionMode::PrintHelp,
                    trace,
                    time,
                });
            }
            "--version" | "-V" => {
                return Ok(ParsedArgs {
                    mode: ExecutionMode::PrintVersion,
                    trace,
                    time,
                });
            }
            other if other.starts_with('-') => {
                return Err(format!("unknown option '{}'", other));
            }
            other => {
                if name.is_some() {
                    return Err(format!("unexpected argument '{}'", other));
                }
                name = Some(other.to_string());
            }
        }
    }

    let mode = if list {
        ExecutionMode::List
    } else {
        match name {
            Some(name) if disasm => ExecutionMode::Disasm(name),
            Some(name) => ExecutionMode::Run(name),
            None => return Err("missing program name (try --list)".to_string()),
        }
    };
    Ok(ParsedArgs { mode, trace, time })
}

/// Version banner for `--version`.
pub fn version_string() -> String {
    format!("slate {}", slate_core::VERSION)
}

/// Usage text for `--help`.
pub fn help_text() -> String {
    "\
usage: slate [options] <program>

options:
  -t, --trace      trace each instruction, the stack, and final globals
      --time       report elapsed execution time on stderr
  -d, --disasm     print the program's disassembly instead of running it
  -l, --list       list the embedded programs
  -h, --help       print this help
  -V, --version    print version"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ParsedArgs, String> {
        let owned: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        parse_args_vec(&owned)
    }

    #[test]
    fn bare_name_runs() {
        let parsed = parse(&["factorial"]).unwrap();
        assert_eq!(parsed.mode, ExecutionMode::Run("factorial".into()));
        assert!(!parsed.trace);
        assert!(!parsed.time);
    }

    #[test]
    fn flags_combine_with_name() {
        let parsed = parse(&["--trace", "--time", "loop"]).unwrap();
        assert_eq!(parsed.mode, ExecutionMode::Run("loop".into()));
        assert!(parsed.trace);
        assert!(parsed.time);
    }

    #[test]
    fn disasm_mode() {
        let parsed = parse(&["-d", "hello"]).unwrap();
        assert_eq!(parsed.mode, ExecutionMode::Disasm("hello".into()));
    }

    #[test]
    fn list_needs_no_name() {
        assert_eq!(parse(&["--list"]).unwrap().mode, ExecutionMode::List);
    }

    #[test]
    fn missing_name_is_a_usage_error() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--trace"]).is_err());
    }

    #[test]
    fn unknown_flag_and_extra_positional_rejected() {
        assert!(parse(&["--frobnicate", "hello"]).is_err());
        assert!(parse(&["hello", "world"]).is_err());
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(parse(&["-h"]).unwrap().mode, ExecutionMode::PrintHelp);
        assert_eq!(
            parse(&["--version"]).unwrap().mode,
            ExecutionMode::PrintVersion
        );
    }
}
