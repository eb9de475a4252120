//! Integer arithmetic handlers.
//!
//! Each pops the right operand first (stack top), then the left, and pushes
//! one result. Arithmetic wraps on overflow (two's complement).

use crate::Vm;
use crate::dispatch::ControlFlow;
use crate::error::VmResult;
use slate_core::bytecode::Instr;

#[inline]
fn binary(vm: &mut Vm<'_>, instr: Instr, op: fn(i64, i64) -> i64) -> VmResult<ControlFlow> {
    let b = vm.pop_value(&instr)?;
    let a = vm.pop_value(&instr)?;
    vm.push_value(op(a, b), &instr)?;
    Ok(ControlFlow::Continue)
}

/// iadd: push a + b.
#[inline(always)]
pub fn iadd(vm: &mut Vm<'_>, instr: Instr) -> VmResult<ControlFlow> {
    binary(vm, instr, |a, b| a.wrapping_add(b))
}

/// isub: push a - b.
#[inline(always)]
pub fn isub(vm: &mut Vm<'_>, instr: Instr) -> VmResult<ControlFlow> {
    binary(vm, instr, |a, b| a.wrapping_sub(b))
}

/// imul: push a * b.
#[inline(always)]
pub fn imul(vm: &mut Vm<'_>, instr: Instr) -> VmResult<ControlFlow> {
    binary(vm, instr, |a, b| a.wrapping_mul(b))
}
