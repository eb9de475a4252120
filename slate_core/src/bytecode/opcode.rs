//! Stack-based bytecode opcode definitions.
//!
//! Opcodes are encoded directly as their `i64` program-slot value; the
//! discriminants below are the canonical wire encoding and must not change.

use std::fmt;

/// Bytecode opcodes for the stack-based VM.
///
/// Each opcode occupies one program slot and is followed by
/// [`arity`](Opcode::arity) immediate-operand slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i64)]
pub enum Opcode {
    /// No operation.
    Noop = 0,
    /// Integer add: pop b, pop a, push a + b.
    Iadd = 1,
    /// Integer subtract: pop b, pop a, push a - b.
    Isub = 2,
    /// Integer multiply: pop b, pop a, push a * b.
    Imul = 3,
    /// Less than: pop b, pop a, push 1 if a < b else 0.
    Ilt = 4,
    /// Equal: pop b, pop a, push 1 if a == b else 0.
    Ieq = 5,
    /// Unconditional branch to the target address.
    Br = 6,
    /// Pop; branch to the target address if the value is 1.
    Brt = 7,
    /// Pop; branch to the target address if the value is 0.
    Brf = 8,
    /// Push the immediate constant.
    Iconst = 9,
    /// Push the active frame's local slot.
    Load = 10,
    /// Push the global memory slot.
    Gload = 11,
    /// Pop into the active frame's local slot.
    Store = 12,
    /// Pop into the global memory slot.
    Gstore = 13,
    /// Pop and emit the value, one per line.
    Print = 14,
    /// Discard the top of the operand stack.
    Pop = 15,
    /// Call target,nargs,nlocals: push a frame and jump to target.
    Call = 16,
    /// Pop the active frame and resume at its return address.
    Ret = 17,
    /// Terminate execution of the current run.
    Halt = 18,
}

impl Opcode {
    /// Number of entries in the instruction table.
    pub const COUNT: usize = 19;

    /// Convert from a raw program slot, returning `None` for values with no
    /// table entry.
    #[inline]
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(Opcode::Noop),
            1 => Some(Opcode::Iadd),
            2 => Some(Opcode::Isub),
            3 => Some(Opcode::Imul),
            4 => Some(Opcode::Ilt),
            5 => Some(Opcode::Ieq),
            6 => Some(Opcode::Br),
            7 => Some(Opcode::Brt),
            8 => Some(Opcode::Brf),
            9 => Some(Opcode::Iconst),
            10 => Some(Opcode::Load),
            11 => Some(Opcode::Gload),
            12 => Some(Opcode::Store),
            13 => Some(Opcode::Gstore),
            14 => Some(Opcode::Print),
            15 => Some(Opcode::Pop),
            16 => Some(Opcode::Call),
            17 => Some(Opcode::Ret),
            18 => Some(Opcode::Halt),
            _ => None,
        }
    }

    /// Assembly mnemonic for this opcode.
    #[inline]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Noop => "noop",
            Opcode::Iadd => "iadd",
            Opcode::Isub => "isub",
            Opcode::Imul => "imul",
            Opcode::Ilt => "ilt",
            Opcode::Ieq => "ieq",
            Opcode::Br => "br",
            Opcode::Brt => "brt",
            Opcode::Brf => "brf",
            Opcode::Iconst => "iconst",
            Opcode::Load => "load",
            Opcode::Gload => "gload",
            Opcode::Store => "store",
            Opcode::Gstore => "gstore",
            Opcode::Print => "print",
            Opcode::Pop => "pop",
            Opcode::Call => "call",
            Opcode::Ret => "ret",
            Opcode::Halt => "halt",
        }
    }

    /// Number of immediate-operand slots following this opcode.
    #[inline]
    pub const fn arity(self) -> usize {
        match self {
            Opcode::Br
            | Opcode::Brt
            | Opcode::Brf
            | Opcode::Iconst
            | Opcode::Load
            | Opcode::Gload
            | Opcode::Store
            | Opcode::Gstore => 1,
            Opcode::Call => 3,
            _ => 0,
        }
    }

    /// Raw encoding value of this opcode.
    #[inline]
    pub const fn encoding(self) -> i64 {
        self as i64
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
