//! Opcode handlers, organized by category.
//!
//! Each handler executes exactly one instruction against the VM state and
//! reports what the dispatch loop should do next. Handlers detect every
//! invalid condition at the point of use and fault; none of them print
//! diagnostics or terminate the process.

pub mod arithmetic;
pub mod calls;
pub mod comparison;
pub mod control;
pub mod load_store;
pub mod stack;

use crate::error::{FaultKind, RuntimeError, VmResult};
use slate_core::bytecode::Instr;

/// Convert a raw branch/call target immediate into a program address.
///
/// Negative values are not addresses; targets past the end of the program
/// are left to the dispatch loop, which halts at end-of-program.
#[inline]
pub(crate) fn address(raw: i64, instr: &Instr) -> VmResult<usize> {
    usize::try_from(raw).map_err(|_| {
        RuntimeError::at(FaultKind::BranchTargetOutOfRange { target: raw }, instr)
    })
}
