//! Slate — a sequential stack-based bytecode VM.
//!
//! CLI entry point: selects an embedded program by name and runs it through
//! the VM, optionally tracing execution or printing its disassembly.

mod args;
mod programs;

use args::ExecutionMode;
use programs::Program;
use slate_vm::Vm;
use std::process::ExitCode;
use std::time::Instant;

/// Runtime fault or other execution failure.
const EXIT_ERROR: u8 = 1;
/// Bad command line.
const EXIT_USAGE_ERROR: u8 = 2;

fn main() -> ExitCode {
    // Parse CLI arguments (skip argv[0] = program name).
    let raw_args: Vec<String> = std::env::args().skip(1).collect();

    let parsed = match args::parse_args_vec(&raw_args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("slate: {}", e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    match &parsed.mode {
        ExecutionMode::PrintVersion => {
            println!("{}", args::version_string());
            ExitCode::SUCCESS
        }
        ExecutionMode::PrintHelp => {
            println!("{}", args::help_text());
            ExitCode::SUCCESS
        }
        ExecutionMode::List => {
            list_programs();
            ExitCode::SUCCESS
        }
        ExecutionMode::Run(name) => match lookup(name) {
            Ok(program) => run_program(program, parsed.trace, parsed.time),
            Err(code) => code,
        },
        ExecutionMode::Disasm(name) => match lookup(name) {
            Ok(program) => disasm_program(program),
            Err(code) => code,
        },
    }
}

fn lookup(name: &str) -> Result<&'static Program, ExitCode> {
    programs::find(name).ok_or_else(|| {
        eprintln!("slate: unknown program '{}' (try --list)", name);
        ExitCode::from(EXIT_USAGE_ERROR)
    })
}

fn list_programs() {
    for program in programs::PROGRAMS {
        println!("{:<12}{}", program.name, program.description);
    }
}

/// Execute an embedded program, reporting any fault on stderr.
fn run_program(program: &Program, trace: bool, time: bool) -> ExitCode {
    let mut vm = Vm::new(program.code, program.nglobals);

    let started = Instant::now();
    let result = vm.execute(program.start, trace);
    let elapsed = started.elapsed();

    if time {
        eprintln!("duration = {} ms", elapsed.as_millis());
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("slate: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Print the program's instruction listing without executing it.
fn disasm_program(program: &Program) -> ExitCode {
    let mut addr = 0;
    while addr < program.code.len() {
        match slate_core::decode(program.code, addr) {
            Ok(instr) => {
                println!("{}", instr);
                addr = instr.next_addr();
            }
            Err(e) => {
                eprintln!("slate: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }
    ExitCode::SUCCESS
}
