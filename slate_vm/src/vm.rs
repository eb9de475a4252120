//! Virtual machine instance and dispatch loop.
//!
//! `Vm` owns the operand stack, global memory, and call stack, and borrows
//! the program it executes. The dispatch loop is the sole active component:
//! it fetches and decodes instructions, routes them through the dispatch
//! table, applies the resulting control flow, and optionally emits trace
//! records between steps.

use crate::config::VmConfig;
use crate::dispatch::{self, ControlFlow};
use crate::error::{FaultKind, RuntimeError, VmResult};
use crate::frame::Frame;
use crate::globals::GlobalMemory;
use crate::stack::OperandStack;
use crate::trace;
use slate_core::bytecode::{self, DecodeError, Instr};
use std::io::{self, Write};

/// Execution state of a VM instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmState {
    /// Created but not yet executed.
    Idle,
    /// Inside the dispatch loop.
    Running,
    /// Stopped at a halt instruction or the end of the program.
    Halted,
    /// Stopped on a fault; the error was returned to the caller.
    Faulted,
}

/// A stack-based bytecode virtual machine instance.
///
/// The program is borrowed, never owned or mutated; all owned storage
/// (globals, operand stack, call stack) is released together on drop. One
/// instance executes at most one program at a time with no internal
/// suspension points; independent instances may run concurrently.
pub struct Vm<'p> {
    /// The program: a flat sequence of opcode and immediate slots.
    code: &'p [i64],
    pub(crate) stack: OperandStack,
    pub(crate) globals: GlobalMemory,
    frames: Vec<Frame>,
    config: VmConfig,
    pc: usize,
    state: VmState,
    out: Box<dyn Write + 'p>,
}

impl<'p> Vm<'p> {
    /// Create a VM over `code` with `nglobals` zero-initialized globals,
    /// writing output to stdout.
    pub fn new(code: &'p [i64], nglobals: usize) -> Self {
        Self::build(code, VmConfig::new(nglobals), Box::new(io::stdout()))
    }

    /// Create a VM with explicit capacities, writing output to stdout.
    pub fn with_config(code: &'p [i64], config: VmConfig) -> Self {
        Self::build(code, config, Box::new(io::stdout()))
    }

    /// Create a VM writing print and trace output to `out`.
    pub fn with_output(code: &'p [i64], nglobals: usize, out: Box<dyn Write + 'p>) -> Self {
        Self::build(code, VmConfig::new(nglobals), out)
    }

    fn build(code: &'p [i64], config: VmConfig, out: Box<dyn Write + 'p>) -> Self {
        Self {
            code,
            stack: OperandStack::with_capacity(config.stack_capacity),
            globals: GlobalMemory::new(config.nglobals),
            frames: Vec::new(),
            pc: 0,
            state: VmState::Idle,
            out,
            config,
        }
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Execute from `start` until Halted or Faulted.
    ///
    /// The operand stack and call stack reset at the start of each run;
    /// global memory persists across runs on the same instance. With `trace`
    /// set, each instruction is rendered before it executes, the operand
    /// stack after, and global memory at halt.
    pub fn execute(&mut self, start: usize, trace: bool) -> VmResult<()> {
        self.pc = start;
        self.stack.clear();
        self.frames.clear();
        self.state = VmState::Running;
        match self.run_loop(trace) {
            Ok(()) => {
                self.state = VmState::Halted;
                Ok(())
            }
            Err(err) => {
                self.state = VmState::Faulted;
                Err(err)
            }
        }
    }

    /// Main dispatch loop: fetch, decode, execute, apply control flow.
    fn run_loop(&mut self, trace: bool) -> VmResult<()> {
        while self.pc < self.code.len() {
            let instr = self.fetch()?;
            if trace {
                self.trace_instruction(&instr)?;
            }

            let handler = dispatch::get_handler(instr.opcode());
            let flow = handler(self, instr)?;

            let halted = match flow {
                ControlFlow::Continue => false,
                ControlFlow::Jump(target) => {
                    self.pc = target;
                    false
                }
                ControlFlow::Call {
                    target,
                    nargs,
                    nlocals,
                } => {
                    self.push_frame(target, nargs, nlocals, &instr)?;
                    false
                }
                ControlFlow::Return => {
                    self.pop_frame(&instr)?;
                    false
                }
                ControlFlow::Halt => true,
            };

            if trace {
                self.trace_stack()?;
            }
            if halted {
                break;
            }
        }
        // Reaching the end of the program without a halt also ends the run
        // in the Halted state.
        if trace {
            self.trace_globals()?;
        }
        Ok(())
    }

    /// Decode the instruction at the program counter and advance past it.
    fn fetch(&mut self) -> VmResult<Instr> {
        let instr = bytecode::decode(self.code, self.pc).map_err(|err| match err {
            DecodeError::InvalidOpcode { value, addr } => RuntimeError::invalid_opcode(value, addr),
            DecodeError::Truncated { opcode, addr } => RuntimeError::truncated(opcode, addr),
            // Unreachable: the loop guard keeps pc inside the program.
            DecodeError::AddressOutOfRange { addr, .. } => RuntimeError {
                kind: FaultKind::Internal {
                    message: "fetch past end of program".into(),
                },
                addr,
                opcode: None,
            },
        })?;
        self.pc = instr.next_addr();
        Ok(instr)
    }

    // =========================================================================
    // Frame Management
    // =========================================================================

    /// Push a frame for `call target,nargs,nlocals`.
    ///
    /// The program counter already points past the call's immediates, so it
    /// is the return address. The `nargs` topmost operand-stack values move
    /// into local slots reversed: slot 0 receives the stack top (the
    /// last-pushed argument).
    fn push_frame(
        &mut self,
        target: usize,
        nargs: usize,
        nlocals: usize,
        instr: &Instr,
    ) -> VmResult<()> {
        if self.frames.len() >= self.config.max_call_depth {
            return Err(RuntimeError::at(
                FaultKind::CallStackOverflow {
                    depth: self.config.max_call_depth,
                },
                instr,
            ));
        }
        let limit = self.config.max_frame_locals;
        let nslots = nargs
            .checked_add(nlocals)
            .filter(|&n| n <= limit)
            .ok_or_else(|| {
                RuntimeError::at(
                    FaultKind::LocalSlotOutOfRange {
                        slot: (nargs as i64).saturating_add(nlocals as i64),
                        limit,
                    },
                    instr,
                )
            })?;

        let mut frame = Frame::new(self.pc, nslots);
        for slot in 0..nargs {
            let value = self
                .stack
                .pop()
                .map_err(|kind| RuntimeError::at(kind, instr))?;
            frame
                .set_local(slot as i64, value)
                .map_err(|kind| RuntimeError::at(kind, instr))?;
        }
        self.frames.push(frame);
        self.pc = target;
        Ok(())
    }

    /// Pop the active frame and resume at its return address.
    fn pop_frame(&mut self, instr: &Instr) -> VmResult<()> {
        let frame = self
            .frames
            .pop()
            .ok_or_else(|| RuntimeError::at(FaultKind::NoActiveFrame, instr))?;
        self.pc = frame.return_addr;
        Ok(())
    }

    // =========================================================================
    // Handler Support
    // =========================================================================

    /// Pop the operand stack, attributing underflow to `instr`.
    #[inline]
    pub(crate) fn pop_value(&mut self, instr: &Instr) -> VmResult<i64> {
        self.stack
            .pop()
            .map_err(|kind| RuntimeError::at(kind, instr))
    }

    /// Push the operand stack, attributing overflow to `instr`.
    #[inline]
    pub(crate) fn push_value(&mut self, value: i64, instr: &Instr) -> VmResult<()> {
        self.stack
            .push(value)
            .map_err(|kind| RuntimeError::at(kind, instr))
    }

    /// The currently active (topmost) frame.
    #[inline]
    pub(crate) fn active_frame(&self, instr: &Instr) -> VmResult<&Frame> {
        self.frames
            .last()
            .ok_or_else(|| RuntimeError::at(FaultKind::NoActiveFrame, instr))
    }

    /// The currently active frame, mutably.
    #[inline]
    pub(crate) fn active_frame_mut(&mut self, instr: &Instr) -> VmResult<&mut Frame> {
        self.frames
            .last_mut()
            .ok_or_else(|| RuntimeError::at(FaultKind::NoActiveFrame, instr))
    }

    /// Per-frame local-slot limit from the instance configuration.
    #[inline]
    pub(crate) fn max_frame_locals(&self) -> usize {
        self.config.max_frame_locals
    }

    /// Write one printed value to the output sink.
    pub(crate) fn emit(&mut self, value: i64, instr: &Instr) -> VmResult<()> {
        writeln!(self.out, "{}", value).map_err(|err| {
            RuntimeError::at(
                FaultKind::Internal {
                    message: format!("output sink failure: {}", err),
                },
                instr,
            )
        })
    }

    // =========================================================================
    // Tracing
    // =========================================================================

    fn trace_instruction(&mut self, instr: &Instr) -> VmResult<()> {
        trace::instruction(&mut self.out, instr).map_err(|err| self.sink_fault(err))
    }

    fn trace_stack(&mut self) -> VmResult<()> {
        trace::stack(&mut self.out, &self.stack).map_err(|err| self.sink_fault(err))
    }

    fn trace_globals(&mut self) -> VmResult<()> {
        trace::globals(&mut self.out, &self.globals).map_err(|err| self.sink_fault(err))
    }

    fn sink_fault(&self, err: io::Error) -> RuntimeError {
        RuntimeError {
            kind: FaultKind::Internal {
                message: format!("output sink failure: {}", err),
            },
            addr: self.pc,
            opcode: None,
        }
    }

    // =========================================================================
    // State Access
    // =========================================================================

    /// Current execution state.
    #[inline]
    pub fn state(&self) -> VmState {
        self.state
    }

    /// Read-only view of the operand stack.
    #[inline]
    pub fn stack(&self) -> &OperandStack {
        &self.stack
    }

    /// Read-only view of global memory.
    #[inline]
    pub fn globals(&self) -> &GlobalMemory {
        &self.globals
    }

    /// Current call-stack depth.
    #[inline]
    pub fn call_depth(&self) -> usize {
        self.frames.len()
    }
}
