//! Dispatch table for the fetch-decode-execute cycle.
//!
//! Uses a static function pointer table for O(1) opcode-to-handler mapping.
//! Decoding validates the opcode before dispatch, so every reachable table
//! entry is a real handler; the semantics are identical to a match over the
//! opcode enumeration.

use crate::Vm;
use crate::error::{FaultKind, RuntimeError, VmResult};
use slate_core::bytecode::{Instr, Opcode};

/// Control flow result from executing one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    /// Continue to the next instruction.
    Continue,
    /// Set the program counter to an absolute address.
    Jump(usize),
    /// Push a frame sized `nargs + nlocals` and jump to `target`.
    Call {
        /// Callee entry address.
        target: usize,
        /// Argument values to move from the operand stack into the frame.
        nargs: usize,
        /// Additional scratch slots for the callee.
        nlocals: usize,
    },
    /// Pop the active frame and resume at its return address.
    Return,
    /// Terminate execution of the current run.
    Halt,
}

/// Opcode handler function signature.
///
/// Handlers return the next control-flow action or a fault; they never
/// terminate the process.
pub type OpHandler = for<'p> fn(&mut Vm<'p>, Instr) -> VmResult<ControlFlow>;

/// Unreachable once decode has validated the opcode.
fn op_invalid(_vm: &mut Vm<'_>, instr: Instr) -> VmResult<ControlFlow> {
    Err(RuntimeError::at(
        FaultKind::Internal {
            message: format!("no handler mapped for {}", instr.opcode()),
        },
        &instr,
    ))
}

use crate::ops::arithmetic;
use crate::ops::calls;
use crate::ops::comparison;
use crate::ops::control;
use crate::ops::load_store;
use crate::ops::stack;

/// Build the static dispatch table, one entry per instruction-table opcode.
const fn build_dispatch_table() -> [OpHandler; Opcode::COUNT] {
    let mut table: [OpHandler; Opcode::COUNT] = [op_invalid; Opcode::COUNT];

    table[Opcode::Noop as usize] = control::noop;
    table[Opcode::Iadd as usize] = arithmetic::iadd;
    table[Opcode::Isub as usize] = arithmetic::isub;
    table[Opcode::Imul as usize] = arithmetic::imul;
    table[Opcode::Ilt as usize] = comparison::ilt;
    table[Opcode::Ieq as usize] = comparison::ieq;
    table[Opcode::Br as usize] = control::br;
    table[Opcode::Brt as usize] = control::brt;
    table[Opcode::Brf as usize] = control::brf;
    table[Opcode::Iconst as usize] = load_store::iconst;
    table[Opcode::Load as usize] = load_store::load;
    table[Opcode::Gload as usize] = load_store::gload;
    table[Opcode::Store as usize] = load_store::store;
    table[Opcode::Gstore as usize] = load_store::gstore;
    table[Opcode::Print as usize] = stack::print;
    table[Opcode::Pop as usize] = stack::pop;
    table[Opcode::Call as usize] = calls::call;
    table[Opcode::Ret as usize] = calls::ret;
    table[Opcode::Halt as usize] = control::halt;

    table
}

/// Static dispatch table, computed at compile time.
static DISPATCH_TABLE: [OpHandler; Opcode::COUNT] = build_dispatch_table();

/// Get the handler for a decoded opcode.
#[inline(always)]
pub(crate) fn get_handler(opcode: Opcode) -> OpHandler {
    DISPATCH_TABLE[opcode as usize]
}
