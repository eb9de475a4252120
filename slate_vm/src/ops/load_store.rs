//! Constant, local, and global load/store handlers.
//!
//! `load`/`store` address the currently active frame's private local slots;
//! `gload`/`gstore` address the fixed global memory bank. Both are
//! bounds-checked at the point of use.

use crate::Vm;
use crate::dispatch::ControlFlow;
use crate::error::{RuntimeError, VmResult};
use slate_core::bytecode::Instr;

/// iconst value: push the immediate.
#[inline(always)]
pub fn iconst(vm: &mut Vm<'_>, instr: Instr) -> VmResult<ControlFlow> {
    vm.push_value(instr.operand(0), &instr)?;
    Ok(ControlFlow::Continue)
}

/// load slot: push the active frame's local.
#[inline(always)]
pub fn load(vm: &mut Vm<'_>, instr: Instr) -> VmResult<ControlFlow> {
    let value = vm
        .active_frame(&instr)?
        .local(instr.operand(0))
        .map_err(|kind| RuntimeError::at(kind, &instr))?;
    vm.push_value(value, &instr)?;
    Ok(ControlFlow::Continue)
}

/// store slot: pop into the active frame's local.
#[inline(always)]
pub fn store(vm: &mut Vm<'_>, instr: Instr) -> VmResult<ControlFlow> {
    let value = vm.pop_value(&instr)?;
    vm.active_frame_mut(&instr)?
        .set_local(instr.operand(0), value)
        .map_err(|kind| RuntimeError::at(kind, &instr))?;
    Ok(ControlFlow::Continue)
}

/// gload addr: push the global slot.
#[inline(always)]
pub fn gload(vm: &mut Vm<'_>, instr: Instr) -> VmResult<ControlFlow> {
    let value = vm
        .globals
        .load(instr.operand(0))
        .map_err(|kind| RuntimeError::at(kind, &instr))?;
    vm.push_value(value, &instr)?;
    Ok(ControlFlow::Continue)
}

/// gstore addr: pop into the global slot.
#[inline(always)]
pub fn gstore(vm: &mut Vm<'_>, instr: Instr) -> VmResult<ControlFlow> {
    let value = vm.pop_value(&instr)?;
    vm.globals
        .store(instr.operand(0), value)
        .map_err(|kind| RuntimeError::at(kind, &instr))?;
    Ok(ControlFlow::Continue)
}
