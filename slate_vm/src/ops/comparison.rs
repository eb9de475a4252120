//! Comparison handlers.
//!
//! Same operand discipline as arithmetic; results are pushed as integers in
//! the same domain (1 for true, 0 for false — there is no boolean type).

use crate::Vm;
use crate::dispatch::ControlFlow;
use crate::error::VmResult;
use slate_core::bytecode::{FALSE, Instr, TRUE};

#[inline]
fn compare(vm: &mut Vm<'_>, instr: Instr, pred: fn(i64, i64) -> bool) -> VmResult<ControlFlow> {
    let b = vm.pop_value(&instr)?;
    let a = vm.pop_value(&instr)?;
    vm.push_value(if pred(a, b) { TRUE } else { FALSE }, &instr)?;
    Ok(ControlFlow::Continue)
}

/// ilt: push 1 if a < b else 0.
#[inline(always)]
pub fn ilt(vm: &mut Vm<'_>, instr: Instr) -> VmResult<ControlFlow> {
    compare(vm, instr, |a, b| a < b)
}

/// ieq: push 1 if a == b else 0.
#[inline(always)]
pub fn ieq(vm: &mut Vm<'_>, instr: Instr) -> VmResult<ControlFlow> {
    compare(vm, instr, |a, b| a == b)
}
