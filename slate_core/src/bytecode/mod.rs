//! Bytecode encoding, instruction table, and decoder.
//!
//! A program is an immutable ordered sequence of signed 64-bit integers.
//! Each instruction occupies one opcode slot followed by zero or more
//! immediate-operand slots, fully determined by the opcode's registered
//! arity. Addresses are indices into the sequence.

pub mod opcode;

pub use opcode::Opcode;

use std::fmt;
use thiserror::Error;

/// Integer value the comparison opcodes push for "true".
pub const TRUE: i64 = 1;

/// Integer value the comparison opcodes push for "false".
pub const FALSE: i64 = 0;

/// Maximum number of immediate operands any opcode carries.
pub const MAX_OPERANDS: usize = 3;

/// A decoded instruction: opcode, program address, and immediates.
///
/// Immediates beyond the opcode's arity are zero. The `Display` rendering is
/// the disassembly/trace line form, `"<addr>: <mnemonic> <immediates>"` with
/// the address zero-padded to four digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instr {
    opcode: Opcode,
    addr: usize,
    operands: [i64; MAX_OPERANDS],
}

impl Instr {
    /// Create a decoded instruction.
    #[inline]
    pub const fn new(opcode: Opcode, addr: usize, operands: [i64; MAX_OPERANDS]) -> Self {
        Self {
            opcode,
            addr,
            operands,
        }
    }

    /// The instruction's opcode.
    #[inline]
    pub const fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Program address of the opcode slot.
    #[inline]
    pub const fn addr(&self) -> usize {
        self.addr
    }

    /// The `i`-th immediate operand (zero beyond the opcode's arity).
    #[inline]
    pub const fn operand(&self, i: usize) -> i64 {
        self.operands[i]
    }

    /// Total slots occupied: opcode plus immediates.
    #[inline]
    pub const fn len(&self) -> usize {
        1 + self.opcode.arity()
    }

    /// Always false; an instruction occupies at least its opcode slot.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Address of the slot immediately after this instruction.
    #[inline]
    pub const fn next_addr(&self) -> usize {
        self.addr + self.len()
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.opcode.mnemonic();
        match self.opcode.arity() {
            0 => write!(f, "{:04}:  {}", self.addr, m),
            1 => write!(f, "{:04}:  {:<10}{}", self.addr, m, self.operands[0]),
            _ => write!(
                f,
                "{:04}:  {:<10}{}, {}, {}",
                self.addr, m, self.operands[0], self.operands[1], self.operands[2]
            ),
        }
    }
}

/// Decode failure at a given program address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The decoded value has no instruction-table entry.
    #[error("invalid opcode {value} at {addr:04}")]
    InvalidOpcode {
        /// The raw program-slot value.
        value: i64,
        /// Address of the offending slot.
        addr: usize,
    },
    /// The program ended in the middle of an instruction's immediates.
    #[error("truncated {} instruction at {addr:04}", .opcode.mnemonic())]
    Truncated {
        /// The opcode whose immediates are missing.
        opcode: Opcode,
        /// Address of the opcode slot.
        addr: usize,
    },
    /// The requested address is past the end of the program.
    #[error("address {addr:04} out of range for program of length {len}")]
    AddressOutOfRange {
        /// The requested address.
        addr: usize,
        /// Program length in slots.
        len: usize,
    },
}

/// Decode one instruction at `addr`.
///
/// Reads the opcode slot, then `arity` immediate slots in program order.
#[inline]
pub fn decode(code: &[i64], addr: usize) -> Result<Instr, DecodeError> {
    let raw = *code.get(addr).ok_or(DecodeError::AddressOutOfRange {
        addr,
        len: code.len(),
    })?;
    let opcode = Opcode::from_i64(raw).ok_or(DecodeError::InvalidOpcode { value: raw, addr })?;

    let mut operands = [0i64; MAX_OPERANDS];
    for (i, slot) in operands.iter_mut().enumerate().take(opcode.arity()) {
        *slot = *code
            .get(addr + 1 + i)
            .ok_or(DecodeError::Truncated { opcode, addr })?;
    }
    Ok(Instr::new(opcode, addr, operands))
}
