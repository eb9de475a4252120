//! Bounded operand stack.
//!
//! All intermediate computation and cross-call argument/return traffic goes
//! through this stack. Capacity is fixed at construction; pushing past it or
//! popping when empty is a fault, never silent corruption.

use crate::error::FaultKind;

/// Default operand stack capacity, in slots.
pub const DEFAULT_STACK_CAPACITY: usize = 1000;

/// The VM's operand stack of integer values.
#[derive(Debug)]
pub struct OperandStack {
    values: Vec<i64>,
    capacity: usize,
}

impl OperandStack {
    /// Create an empty stack with the given fixed capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a value onto the stack.
    #[inline]
    pub fn push(&mut self, value: i64) -> Result<(), FaultKind> {
        if self.values.len() >= self.capacity {
            return Err(FaultKind::StackOverflow {
                capacity: self.capacity,
            });
        }
        self.values.push(value);
        Ok(())
    }

    /// Pop the top value from the stack.
    #[inline]
    pub fn pop(&mut self) -> Result<i64, FaultKind> {
        self.values.pop().ok_or(FaultKind::StackUnderflow)
    }

    /// Peek at the top value without removing it.
    #[inline]
    pub fn peek(&self) -> Result<i64, FaultKind> {
        self.values.last().copied().ok_or(FaultKind::StackUnderflow)
    }

    /// Current number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the stack is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The fixed capacity this stack was constructed with.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stack contents, lowest to highest.
    #[inline]
    pub fn contents(&self) -> &[i64] {
        &self.values
    }

    /// Discard all values.
    #[inline]
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl Default for OperandStack {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_STACK_CAPACITY)
    }
}
