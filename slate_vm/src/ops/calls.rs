//! Call and return handlers.
//!
//! `call` only validates and describes the transfer; the dispatch loop owns
//! the frame push (argument copying, return-address capture) so that frame
//! state changes happen in exactly one place. Likewise `ret` and the frame
//! pop.

use crate::Vm;
use crate::dispatch::ControlFlow;
use crate::error::{FaultKind, RuntimeError, VmResult};
use crate::ops::address;
use slate_core::bytecode::Instr;

#[inline]
fn slot_count(raw: i64, limit: usize, instr: &Instr) -> VmResult<usize> {
    usize::try_from(raw).map_err(|_| {
        RuntimeError::at(FaultKind::LocalSlotOutOfRange { slot: raw, limit }, instr)
    })
}

/// call target,nargs,nlocals: transfer into a new frame.
#[inline(always)]
pub fn call(vm: &mut Vm<'_>, instr: Instr) -> VmResult<ControlFlow> {
    let limit = vm.max_frame_locals();
    let target = address(instr.operand(0), &instr)?;
    let nargs = slot_count(instr.operand(1), limit, &instr)?;
    let nlocals = slot_count(instr.operand(2), limit, &instr)?;
    Ok(ControlFlow::Call {
        target,
        nargs,
        nlocals,
    })
}

/// ret: pop the active frame and resume at its return address.
#[inline(always)]
pub fn ret(_vm: &mut Vm<'_>, _instr: Instr) -> VmResult<ControlFlow> {
    Ok(ControlFlow::Return)
}
