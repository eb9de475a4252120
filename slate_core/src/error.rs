//! Error types and result definitions for Slate.
//!
//! `SlateError` is the unified error surface embedders see: decode failures
//! and runtime faults all arrive here as values. The engine never terminates
//! the process on a bad program; the embedding code decides whether to
//! abort, log, or recover.

use crate::bytecode::DecodeError;
use thiserror::Error;

/// The unified result type used throughout Slate.
pub type SlateResult<T> = Result<T, SlateError>;

/// Unified error type covering all Slate error conditions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlateError {
    /// A program slot decoded to a value with no instruction-table entry.
    #[error("invalid opcode {value} at {addr:04}")]
    InvalidOpcode {
        /// The raw program-slot value.
        value: i64,
        /// Address of the offending slot.
        addr: usize,
    },

    /// The program ended in the middle of an instruction's immediates.
    #[error("truncated instruction at {addr:04}")]
    TruncatedInstruction {
        /// Address of the opcode slot.
        addr: usize,
    },

    /// Execution stopped in the Faulted state.
    #[error("{message}")]
    Fault {
        /// Diagnostic identifying the opcode and address.
        message: String,
    },
}

impl From<DecodeError> for SlateError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::InvalidOpcode { value, addr } => SlateError::InvalidOpcode { value, addr },
            DecodeError::Truncated { addr, .. } => SlateError::TruncatedInstruction { addr },
            DecodeError::AddressOutOfRange { .. } => SlateError::Fault {
                message: err.to_string(),
            },
        }
    }
}
