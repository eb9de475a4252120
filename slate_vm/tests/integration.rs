//! End-to-end tests: whole programs, call mechanics, tracing, faults.

use slate_core::Opcode;
use slate_vm::{FaultKind, Vm, VmConfig, VmState};

const fn op(opcode: Opcode) -> i64 {
    opcode.encoding()
}

/// Run `code` from `start` with a captured output sink, asserting a clean
/// halt, and return the output.
fn run_capture(code: &[i64], start: usize, nglobals: usize, trace: bool) -> String {
    let mut buf = Vec::new();
    {
        let mut vm = Vm::with_output(code, nglobals, Box::new(&mut buf));
        vm.execute(start, trace).unwrap();
        assert_eq!(vm.state(), VmState::Halted);
    }
    String::from_utf8(buf).unwrap()
}

// =============================================================================
// Whole Programs
// =============================================================================

#[test]
fn hello_prints_constant() {
    let code = [
        op(Opcode::Iconst),
        1234,
        op(Opcode::Print),
        op(Opcode::Halt),
    ];
    assert_eq!(run_capture(&code, 0, 0, false), "1234\n");
}

#[test]
fn counting_loop_leaves_globals() {
    // i = 0; while i < 10: i += 1; copy i into a second global.
    #[rustfmt::skip]
    let code = [
        op(Opcode::Iconst), 0,          // 0000
        op(Opcode::Gstore), 0,          // 0002: i = 0
        op(Opcode::Gload), 0,           // 0004: loop head
        op(Opcode::Iconst), 10,         // 0006
        op(Opcode::Ilt),                // 0008
        op(Opcode::Brf), 20,            // 0009: exit loop
        op(Opcode::Gload), 0,           // 0011
        op(Opcode::Iconst), 1,          // 0013
        op(Opcode::Iadd),               // 0015
        op(Opcode::Gstore), 0,          // 0016
        op(Opcode::Br), 4,              // 0018: back to loop head
        op(Opcode::Gload), 0,           // 0020
        op(Opcode::Gstore), 1,          // 0022
        op(Opcode::Halt),               // 0024
    ];
    let mut vm = Vm::new(&code, 2);
    vm.execute(0, false).unwrap();
    assert_eq!(vm.state(), VmState::Halted);
    assert_eq!(vm.globals().slots(), &[10, 10]);
    assert!(vm.stack().is_empty());
}

#[test]
fn recursive_factorial() {
    // fact(n): if n < 2 return 1; return fact(n - 1) * n
    #[rustfmt::skip]
    let code = [
        // fact(n) at 0, local 0 = n
        op(Opcode::Load), 0,            // 0000
        op(Opcode::Iconst), 2,          // 0002
        op(Opcode::Ilt),                // 0004
        op(Opcode::Brf), 10,            // 0005
        op(Opcode::Iconst), 1,          // 0007
        op(Opcode::Ret),                // 0009
        op(Opcode::Load), 0,            // 0010
        op(Opcode::Load), 0,            // 0012
        op(Opcode::Iconst), 1,          // 0014
        op(Opcode::Isub),               // 0016
        op(Opcode::Call), 0, 1, 0,      // 0017: fact(n - 1)
        op(Opcode::Imul),               // 0021
        op(Opcode::Ret),                // 0022
        // main at 23
        op(Opcode::Iconst), 5,          // 0023
        op(Opcode::Call), 0, 1, 0,      // 0025
        op(Opcode::Print),              // 0029
        op(Opcode::Halt),               // 0030
    ];
    assert_eq!(run_capture(&code, 23, 0, false), "120\n");
}

#[test]
fn call_returns_value_on_shared_stack() {
    // double(x) = 2 * x; print double(10)
    #[rustfmt::skip]
    let code = [
        // double(x) at 0
        op(Opcode::Iconst), 2,          // 0000
        op(Opcode::Load), 0,            // 0002
        op(Opcode::Imul),               // 0004
        op(Opcode::Ret),                // 0005
        // main at 6
        op(Opcode::Iconst), 10,         // 0006
        op(Opcode::Call), 0, 1, 0,      // 0008
        op(Opcode::Print),              // 0012
        op(Opcode::Halt),               // 0013
    ];
    assert_eq!(run_capture(&code, 6, 0, false), "20\n");
}

// =============================================================================
// Call Mechanics
// =============================================================================

#[test]
fn arguments_bind_reversed_from_stack() {
    // f(a, b, c) pushed as 1, 2, 3: slot 0 holds the stack top (3).
    #[rustfmt::skip]
    let code = [
        // f at 0: print locals 0, 1, 2
        op(Opcode::Load), 0,            // 0000
        op(Opcode::Print),              // 0002
        op(Opcode::Load), 1,            // 0003
        op(Opcode::Print),              // 0005
        op(Opcode::Load), 2,            // 0006
        op(Opcode::Print),              // 0008
        op(Opcode::Ret),                // 0009
        // main at 10
        op(Opcode::Iconst), 1,          // 0010
        op(Opcode::Iconst), 2,          // 0012
        op(Opcode::Iconst), 3,          // 0014
        op(Opcode::Call), 0, 3, 0,      // 0016
        op(Opcode::Halt),               // 0020
    ];
    assert_eq!(run_capture(&code, 10, 0, false), "3\n2\n1\n");
}

#[test]
fn scratch_locals_are_zero_initialized() {
    #[rustfmt::skip]
    let code = [
        // f() at 0, one scratch local
        op(Opcode::Load), 0,            // 0000
        op(Opcode::Print),              // 0002
        op(Opcode::Ret),                // 0003
        // main at 4
        op(Opcode::Call), 0, 0, 1,      // 0004
        op(Opcode::Halt),               // 0008
    ];
    assert_eq!(run_capture(&code, 4, 0, false), "0\n");
}

#[test]
fn locals_are_frame_private() {
    // f stores 99 into its own slot 0; the caller's slot 0 is untouched.
    #[rustfmt::skip]
    let code = [
        // f(x) at 0
        op(Opcode::Iconst), 99,         // 0000
        op(Opcode::Store), 0,           // 0002
        op(Opcode::Ret),                // 0004
        // main at 5, called with one arg holding slot 0
        op(Opcode::Iconst), 7,          // 0005
        op(Opcode::Call), 0, 1, 0,      // 0007
        op(Opcode::Load), 0,            // 0011
        op(Opcode::Print),              // 0013
        op(Opcode::Ret),                // 0014
        // entry at 15
        op(Opcode::Iconst), 1,          // 0015
        op(Opcode::Call), 5, 1, 0,      // 0017
        op(Opcode::Halt),               // 0021
    ];
    assert_eq!(run_capture(&code, 15, 0, false), "1\n");
}

// =============================================================================
// Faults
// =============================================================================

#[test]
fn underflow_fault_names_opcode_and_address() {
    let code = [op(Opcode::Iconst), 1, op(Opcode::Iadd), op(Opcode::Halt)];
    let mut vm = Vm::new(&code, 0);
    let err = vm.execute(0, false).unwrap_err();
    assert_eq!(err.kind, FaultKind::StackUnderflow);
    assert_eq!(err.addr, 2);
    assert_eq!(err.opcode, Some(Opcode::Iadd));
    assert_eq!(
        err.to_string(),
        "fault at 0002 (iadd): operand stack underflow"
    );
}

#[test]
fn global_access_out_of_range_faults() {
    let code = [op(Opcode::Gload), 3, op(Opcode::Halt)];
    let mut vm = Vm::new(&code, 2);
    let err = vm.execute(0, false).unwrap_err();
    assert_eq!(err.kind, FaultKind::GlobalAddressOutOfRange { addr: 3, len: 2 });
}

#[test]
fn negative_global_address_faults() {
    let code = [op(Opcode::Iconst), 1, op(Opcode::Gstore), -1];
    let mut vm = Vm::new(&code, 2);
    let err = vm.execute(0, false).unwrap_err();
    assert_eq!(
        err.kind,
        FaultKind::GlobalAddressOutOfRange { addr: -1, len: 2 }
    );
}

#[test]
fn local_access_outside_frame_faults() {
    #[rustfmt::skip]
    let code = [
        // f(x) at 0 reads slot 1, which does not exist
        op(Opcode::Load), 1,            // 0000
        op(Opcode::Ret),                // 0002
        // main at 3
        op(Opcode::Iconst), 7,          // 0003
        op(Opcode::Call), 0, 1, 0,      // 0005
        op(Opcode::Halt),               // 0009
    ];
    let mut vm = Vm::new(&code, 0);
    let err = vm.execute(3, false).unwrap_err();
    assert_eq!(err.kind, FaultKind::LocalSlotOutOfRange { slot: 1, limit: 1 });
    assert_eq!(err.opcode, Some(Opcode::Load));
}

#[test]
fn load_outside_any_frame_faults() {
    let code = [op(Opcode::Load), 0, op(Opcode::Halt)];
    let mut vm = Vm::new(&code, 0);
    let err = vm.execute(0, false).unwrap_err();
    assert_eq!(err.kind, FaultKind::NoActiveFrame);
}

#[test]
fn wrapping_arithmetic_does_not_fault() {
    let code = [
        op(Opcode::Iconst),
        i64::MAX,
        op(Opcode::Iconst),
        1,
        op(Opcode::Iadd),
        op(Opcode::Halt),
    ];
    let mut vm = Vm::new(&code, 0);
    vm.execute(0, false).unwrap();
    assert_eq!(vm.stack().contents(), &[i64::MIN]);
}

#[test]
fn deep_recursion_is_bounded() {
    // fact with an argument large enough to exhaust a shallow call stack.
    #[rustfmt::skip]
    let code = [
        op(Opcode::Load), 0,
        op(Opcode::Iconst), 2,
        op(Opcode::Ilt),
        op(Opcode::Brf), 10,
        op(Opcode::Iconst), 1,
        op(Opcode::Ret),
        op(Opcode::Load), 0,
        op(Opcode::Load), 0,
        op(Opcode::Iconst), 1,
        op(Opcode::Isub),
        op(Opcode::Call), 0, 1, 0,
        op(Opcode::Imul),
        op(Opcode::Ret),
        op(Opcode::Iconst), 100,
        op(Opcode::Call), 0, 1, 0,
        op(Opcode::Print),
        op(Opcode::Halt),
    ];
    let mut vm = Vm::with_config(&code, VmConfig::new(0).max_call_depth(16));
    let err = vm.execute(23, false).unwrap_err();
    assert_eq!(err.kind, FaultKind::CallStackOverflow { depth: 16 });
}

// =============================================================================
// Tracing
// =============================================================================

#[test]
fn trace_renders_instructions_stack_and_globals() {
    #[rustfmt::skip]
    let code = [
        op(Opcode::Iconst), 99,         // 0000
        op(Opcode::Gstore), 0,          // 0002
        op(Opcode::Halt),               // 0004
    ];
    let out = run_capture(&code, 0, 1, true);
    let expected = "\
0000:  iconst    99
stack=[ 99 ]
0002:  gstore    0
stack=[ ]
0004:  halt
stack=[ ]
Data memory:
0000: 99
";
    assert_eq!(out, expected);
}

#[test]
fn trace_call_shows_all_immediates() {
    #[rustfmt::skip]
    let code = [
        // f() at 0
        op(Opcode::Ret),                // 0000
        // main at 1
        op(Opcode::Call), 0, 0, 0,      // 0001
        op(Opcode::Halt),               // 0005
    ];
    let out = run_capture(&code, 1, 0, true);
    assert!(out.contains("0001:  call      0, 0, 0\n"));
    assert!(out.contains("0000:  ret\n"));
}

#[test]
fn untraced_run_emits_only_printed_values() {
    let code = [
        op(Opcode::Iconst),
        42,
        op(Opcode::Print),
        op(Opcode::Halt),
    ];
    assert_eq!(run_capture(&code, 0, 0, false), "42\n");
}
