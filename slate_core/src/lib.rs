//! # Slate Core
//!
//! Core types shared across the Slate virtual machine components:
//!
//! - **Instruction Table**: opcode metadata (mnemonic, immediate arity) and
//!   the canonical integer encoding of the instruction set
//! - **Decoder**: the decoded instruction form with its disassembly rendering
//! - **Error Handling**: the unified result and error definitions embedders
//!   see at the crate boundary
//!
//! Programs are flat sequences of signed 64-bit integers; each instruction is
//! one opcode slot followed by zero or more immediate-operand slots. This
//! crate defines that encoding but performs no execution — the engine lives
//! in `slate_vm`.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bytecode;
pub mod error;

pub use bytecode::{DecodeError, FALSE, Instr, MAX_OPERANDS, Opcode, TRUE, decode};
pub use error::{SlateError, SlateResult};

/// Slate runtime version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
