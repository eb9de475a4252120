//! Engine configuration.

use crate::frame::{DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_FRAME_LOCALS};
use crate::stack::DEFAULT_STACK_CAPACITY;

/// Capacities and sizing for one VM instance.
///
/// All bounds are fixed for the lifetime of the instance; exceeding any of
/// them at runtime is a typed fault, never silent growth or corruption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmConfig {
    /// Number of global memory slots.
    pub nglobals: usize,
    /// Operand stack capacity, in slots.
    pub stack_capacity: usize,
    /// Maximum call-stack depth.
    pub max_call_depth: usize,
    /// Maximum local slots (`nargs + nlocals`) a single frame may request.
    pub max_frame_locals: usize,
}

impl VmConfig {
    /// Configuration with `nglobals` globals and default capacities.
    pub fn new(nglobals: usize) -> Self {
        Self {
            nglobals,
            stack_capacity: DEFAULT_STACK_CAPACITY,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            max_frame_locals: DEFAULT_MAX_FRAME_LOCALS,
        }
    }

    /// Override the operand stack capacity.
    pub fn stack_capacity(mut self, capacity: usize) -> Self {
        self.stack_capacity = capacity;
        self
    }

    /// Override the maximum call depth.
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Override the per-frame local-slot limit.
    pub fn max_frame_locals(mut self, limit: usize) -> Self {
        self.max_frame_locals = limit;
        self
    }
}

impl Default for VmConfig {
    fn default() -> Self {
        Self::new(0)
    }
}
