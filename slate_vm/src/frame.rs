//! Call frames with frame-private local storage.
//!
//! A frame is created when a `call` executes and lives until its matching
//! `ret`. It owns its local slots exclusively: slots `0..nargs` receive the
//! call arguments (reversed relative to push order), slots
//! `nargs..nargs+nlocals` are callee scratch space. Locals never alias the
//! shared operand stack.

use crate::error::FaultKind;
use smallvec::SmallVec;

/// Default maximum call depth before a call-stack overflow fault.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

/// Default per-frame local-slot limit; a `call` requesting more faults.
pub const DEFAULT_MAX_FRAME_LOCALS: usize = 256;

/// A call frame: return address plus private local slots.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Program address to resume at on `ret`.
    pub return_addr: usize,
    /// Local slots, sized `nargs + nlocals` at call time.
    locals: SmallVec<[i64; 8]>,
}

impl Frame {
    /// Create a frame with `nslots` zero-initialized local slots.
    pub fn new(return_addr: usize, nslots: usize) -> Self {
        Self {
            return_addr,
            locals: SmallVec::from_elem(0, nslots),
        }
    }

    /// Read the local at `slot`.
    #[inline]
    pub fn local(&self, slot: i64) -> Result<i64, FaultKind> {
        usize::try_from(slot)
            .ok()
            .and_then(|i| self.locals.get(i))
            .copied()
            .ok_or(FaultKind::LocalSlotOutOfRange {
                slot,
                limit: self.locals.len(),
            })
    }

    /// Write `value` to the local at `slot`.
    #[inline]
    pub fn set_local(&mut self, slot: i64, value: i64) -> Result<(), FaultKind> {
        let limit = self.locals.len();
        let cell = usize::try_from(slot)
            .ok()
            .and_then(|i| self.locals.get_mut(i))
            .ok_or(FaultKind::LocalSlotOutOfRange { slot, limit })?;
        *cell = value;
        Ok(())
    }

    /// Number of allocated local slots.
    #[inline]
    pub fn nslots(&self) -> usize {
        self.locals.len()
    }
}
