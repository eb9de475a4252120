//! Control-flow handlers: noop, branches, halt.

use crate::Vm;
use crate::dispatch::ControlFlow;
use crate::error::VmResult;
use crate::ops::address;
use slate_core::bytecode::{FALSE, Instr, TRUE};

/// noop: no effect.
#[inline(always)]
pub fn noop(_vm: &mut Vm<'_>, _instr: Instr) -> VmResult<ControlFlow> {
    Ok(ControlFlow::Continue)
}

/// br target: unconditional jump.
#[inline(always)]
pub fn br(_vm: &mut Vm<'_>, instr: Instr) -> VmResult<ControlFlow> {
    Ok(ControlFlow::Jump(address(instr.operand(0), &instr)?))
}

/// brt target: pop; jump if the value is 1, else fall through.
#[inline(always)]
pub fn brt(vm: &mut Vm<'_>, instr: Instr) -> VmResult<ControlFlow> {
    let target = address(instr.operand(0), &instr)?;
    if vm.pop_value(&instr)? == TRUE {
        Ok(ControlFlow::Jump(target))
    } else {
        Ok(ControlFlow::Continue)
    }
}

/// brf target: pop; jump if the value is 0, else fall through.
#[inline(always)]
pub fn brf(vm: &mut Vm<'_>, instr: Instr) -> VmResult<ControlFlow> {
    let target = address(instr.operand(0), &instr)?;
    if vm.pop_value(&instr)? == FALSE {
        Ok(ControlFlow::Jump(target))
    } else {
        Ok(ControlFlow::Continue)
    }
}

/// halt: terminate the current run.
#[inline(always)]
pub fn halt(_vm: &mut Vm<'_>, _instr: Instr) -> VmResult<ControlFlow> {
    Ok(ControlFlow::Halt)
}
