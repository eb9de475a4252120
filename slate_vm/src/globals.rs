//! Fixed-size global memory bank.
//!
//! Sized at VM construction, zero-initialized, addressed by immediate
//! operand. Mutated only by `gstore`, read only by `gload`; out-of-range
//! access is a fault.

use crate::error::FaultKind;

/// The VM's global variable space.
#[derive(Debug)]
pub struct GlobalMemory {
    slots: Box<[i64]>,
}

impl GlobalMemory {
    /// Create a zero-initialized bank of `nglobals` slots.
    pub fn new(nglobals: usize) -> Self {
        Self {
            slots: vec![0; nglobals].into_boxed_slice(),
        }
    }

    /// Read the slot at `addr`.
    #[inline]
    pub fn load(&self, addr: i64) -> Result<i64, FaultKind> {
        usize::try_from(addr)
            .ok()
            .and_then(|i| self.slots.get(i))
            .copied()
            .ok_or(FaultKind::GlobalAddressOutOfRange {
                addr,
                len: self.slots.len(),
            })
    }

    /// Write `value` to the slot at `addr`.
    #[inline]
    pub fn store(&mut self, addr: i64, value: i64) -> Result<(), FaultKind> {
        let len = self.slots.len();
        let slot = usize::try_from(addr)
            .ok()
            .and_then(|i| self.slots.get_mut(i))
            .ok_or(FaultKind::GlobalAddressOutOfRange { addr, len })?;
        *slot = value;
        Ok(())
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the bank has zero slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All slots in address order.
    #[inline]
    pub fn slots(&self) -> &[i64] {
        &self.slots
    }
}
