//! Runtime fault types for the virtual machine.
//!
//! Every fault identifies the offending opcode and instruction address. The
//! dispatch loop detects each condition at the point of use and stops in the
//! Faulted state; there is no retry or partial recovery — these are
//! programming-contract violations in the supplied bytecode, not transient
//! failures.

use slate_core::bytecode::{Instr, Opcode};
use slate_core::error::SlateError;
use std::fmt;

/// Runtime fault during bytecode execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    /// What went wrong.
    pub kind: FaultKind,
    /// Address of the instruction that faulted.
    pub addr: usize,
    /// Opcode of the faulting instruction, when one was decoded.
    pub opcode: Option<Opcode>,
}

/// Specific fault conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaultKind {
    /// Decoded value has no instruction-table entry.
    InvalidOpcode {
        /// The raw program-slot value.
        value: i64,
    },
    /// Immediates run past the end of the program.
    TruncatedInstruction,
    /// Pop from an empty operand stack.
    StackUnderflow,
    /// Push past the operand stack's fixed capacity.
    StackOverflow {
        /// The capacity that would be exceeded.
        capacity: usize,
    },
    /// Call depth exceeds the call-stack capacity.
    CallStackOverflow {
        /// The depth that would be exceeded.
        depth: usize,
    },
    /// Local slot outside the frame's allocated capacity.
    LocalSlotOutOfRange {
        /// The requested slot (raw immediate; may be negative).
        slot: i64,
        /// Slots actually allocated.
        limit: usize,
    },
    /// Global address outside `[0, nglobals)`.
    GlobalAddressOutOfRange {
        /// The requested address (raw immediate; may be negative).
        addr: i64,
        /// Number of global slots.
        len: usize,
    },
    /// `ret`, `load`, or `store` with no active frame.
    NoActiveFrame,
    /// Branch or call target that is not a program address.
    BranchTargetOutOfRange {
        /// The raw target immediate.
        target: i64,
    },
    /// Condition that cannot arise from well-formed engine state, such as an
    /// output-sink write failure.
    Internal {
        /// Description of the condition.
        message: String,
    },
}

impl RuntimeError {
    /// Create a fault attributed to a decoded instruction.
    #[inline]
    pub fn at(kind: FaultKind, instr: &Instr) -> Self {
        Self {
            kind,
            addr: instr.addr(),
            opcode: Some(instr.opcode()),
        }
    }

    /// Fault for a program slot that decoded to no table entry.
    #[inline]
    pub fn invalid_opcode(value: i64, addr: usize) -> Self {
        Self {
            kind: FaultKind::InvalidOpcode { value },
            addr,
            opcode: None,
        }
    }

    /// Fault for an instruction whose immediates run past the program end.
    #[inline]
    pub fn truncated(opcode: Opcode, addr: usize) -> Self {
        Self {
            kind: FaultKind::TruncatedInstruction,
            addr,
            opcode: Some(opcode),
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultKind::InvalidOpcode { value } => write!(f, "invalid opcode {}", value),
            FaultKind::TruncatedInstruction => write!(f, "truncated instruction"),
            FaultKind::StackUnderflow => write!(f, "operand stack underflow"),
            FaultKind::StackOverflow { capacity } => {
                write!(f, "operand stack overflow (capacity {})", capacity)
            }
            FaultKind::CallStackOverflow { depth } => {
                write!(f, "call stack overflow (depth {})", depth)
            }
            FaultKind::LocalSlotOutOfRange { slot, limit } => {
                write!(f, "local slot {} out of range (frame has {})", slot, limit)
            }
            FaultKind::GlobalAddressOutOfRange { addr, len } => {
                write!(f, "global address {} out of range (nglobals {})", addr, len)
            }
            FaultKind::NoActiveFrame => write!(f, "no active frame"),
            FaultKind::BranchTargetOutOfRange { target } => {
                write!(f, "branch target {} is not a program address", target)
            }
            FaultKind::Internal { message } => write!(f, "internal error: {}", message),
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.opcode {
            Some(op) => write!(f, "fault at {:04} ({}): {}", self.addr, op.mnemonic(), self.kind),
            None => write!(f, "fault at {:04}: {}", self.addr, self.kind),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<RuntimeError> for SlateError {
    fn from(err: RuntimeError) -> Self {
        match err.kind {
            FaultKind::InvalidOpcode { value } => SlateError::InvalidOpcode {
                value,
                addr: err.addr,
            },
            FaultKind::TruncatedInstruction => SlateError::TruncatedInstruction { addr: err.addr },
            _ => SlateError::Fault {
                message: err.to_string(),
            },
        }
    }
}

/// Result type for VM operations.
pub type VmResult<T> = Result<T, RuntimeError>;
