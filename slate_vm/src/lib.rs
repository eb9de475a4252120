//! Stack-based bytecode interpreter for Slate.
//!
//! This crate provides the execution engine: a VM instance borrowing a flat
//! `i64` program and running it through a dispatch loop with:
//!
//! - **Dispatch table**: Static function pointer table for O(1) opcode dispatch
//! - **Operand stack**: Bounded LIFO of `i64` values shared across frames
//! - **Call frames**: Private local slots per invocation, arguments moved
//!   from the operand stack
//! - **Tracing**: Optional per-instruction, per-step stack, and final
//!   global-memory dumps
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                     Vm                        │
//! ├───────────────────────────────────────────────┤
//! │  ┌─────────┐  ┌─────────┐  ┌───────────────┐  │
//! │  │ Frame 0 │  │ Frame 1 │  │ Frame N (top) │  │
//! │  │ locals  │→ │ locals  │→ │ locals        │  │
//! │  └─────────┘  └─────────┘  └───────────────┘  │
//! │                                               │
//! │  ┌──────────────┐  ┌───────────────────────┐  │
//! │  │ OperandStack │  │ GlobalMemory          │  │
//! │  │ (bounded)    │  │ (zero-init i64 slots) │  │
//! │  └──────────────┘  └───────────────────────┘  │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use slate_core::Opcode;
//! use slate_vm::Vm;
//!
//! let code = [
//!     Opcode::Iconst.encoding(), 2,
//!     Opcode::Iconst.encoding(), 3,
//!     Opcode::Iadd.encoding(),
//!     Opcode::Halt.encoding(),
//! ];
//! let mut vm = Vm::new(&code, 0);
//! vm.execute(0, false).unwrap();
//! assert_eq!(vm.stack().contents(), &[5]);
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod error;
pub mod frame;
pub mod globals;
pub mod stack;
pub mod vm;

// Execution infrastructure
pub mod dispatch;
pub mod trace;

// Opcode handlers (organized by category)
pub mod ops;

// Re-exports
pub use config::VmConfig;
pub use dispatch::ControlFlow;
pub use error::{FaultKind, RuntimeError, VmResult};
pub use frame::{DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_FRAME_LOCALS, Frame};
pub use globals::GlobalMemory;
pub use stack::{DEFAULT_STACK_CAPACITY, OperandStack};
pub use vm::{Vm, VmState};

/// Convenience function to create and run a VM over `code`.
pub fn run(code: &[i64], start: usize, nglobals: usize) -> slate_core::SlateResult<()> {
    let mut vm = Vm::new(code, nglobals);
    vm.execute(start, false)?;
    Ok(())
}
