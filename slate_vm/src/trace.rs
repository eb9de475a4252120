//! Execution tracer.
//!
//! Read-only rendering of VM state: the current instruction before it
//! executes, the operand stack after, and the global memory dump at halt.
//! The tracer observes through shared references and never influences
//! execution; line formats follow the classic interpreter trace form.

use crate::globals::GlobalMemory;
use crate::stack::OperandStack;
use slate_core::bytecode::Instr;
use std::io::{self, Write};

/// Render the instruction line: `"<addr>: <mnemonic> <immediates>"`.
pub fn instruction(out: &mut dyn Write, instr: &Instr) -> io::Result<()> {
    writeln!(out, "{}", instr)
}

/// Render the operand stack, lowest to highest: `"stack=[ v1 v2 ... ]"`.
pub fn stack(out: &mut dyn Write, stack: &OperandStack) -> io::Result<()> {
    write!(out, "stack=[")?;
    for value in stack.contents() {
        write!(out, " {}", value)?;
    }
    writeln!(out, " ]")
}

/// Render the global memory dump, one `"<addr>: <value>"` line per slot.
pub fn globals(out: &mut dyn Write, globals: &GlobalMemory) -> io::Result<()> {
    writeln!(out, "Data memory:")?;
    for (addr, value) in globals.slots().iter().enumerate() {
        writeln!(out, "{:04}: {}", addr, value)?;
    }
    Ok(())
}
