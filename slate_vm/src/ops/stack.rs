//! Stack-manipulation and output handlers.

use crate::Vm;
use crate::dispatch::ControlFlow;
use crate::error::VmResult;
use slate_core::bytecode::Instr;

/// pop: discard the top of the operand stack without inspection.
#[inline(always)]
pub fn pop(vm: &mut Vm<'_>, instr: Instr) -> VmResult<ControlFlow> {
    vm.pop_value(&instr)?;
    Ok(ControlFlow::Continue)
}

/// print: pop and emit the value through the output sink, one per line.
///
/// The pop is side-effecting and irreversible; a sink write failure still
/// consumes the value.
#[inline(always)]
pub fn print(vm: &mut Vm<'_>, instr: Instr) -> VmResult<ControlFlow> {
    let value = vm.pop_value(&instr)?;
    vm.emit(value, &instr)?;
    Ok(ControlFlow::Continue)
}
