//! Embedded demonstration programs.
//!
//! Each program is a flat `i64` image with a named entry point and a fixed
//! global-memory size. Addresses in the comments are slot indices into the
//! image; multi-slot instructions occupy one slot per immediate after the
//! opcode.

use slate_core::Opcode;

/// A runnable program image.
pub struct Program {
    /// Name used to select the program on the command line.
    pub name: &'static str,
    /// One-line description for listings.
    pub description: &'static str,
    /// The bytecode image.
    pub code: &'static [i64],
    /// Entry address.
    pub start: usize,
    /// Global memory slots to allocate.
    pub nglobals: usize,
}

const fn op(opcode: Opcode) -> i64 {
    opcode.encoding()
}

#[rustfmt::skip]
const HELLO: &[i64] = &[
    op(Opcode::Iconst), 1234,       // 0000
    op(Opcode::Print),              // 0002
    op(Opcode::Halt),               // 0003
];

// i = 0; while i < 10: i += 1; copy the counter into a second global.
#[rustfmt::skip]
const LOOP: &[i64] = &[
    op(Opcode::Iconst), 0,          // 0000
    op(Opcode::Gstore), 0,          // 0002
    op(Opcode::Gload), 0,           // 0004: loop head
    op(Opcode::Iconst), 10,         // 0006
    op(Opcode::Ilt),                // 0008
    op(Opcode::Brf), 20,            // 0009
    op(Opcode::Gload), 0,           // 0011
    op(Opcode::Iconst), 1,          // 0013
    op(Opcode::Iadd),               // 0015
    op(Opcode::Gstore), 0,          // 0016
    op(Opcode::Br), 4,              // 0018
    op(Opcode::Gload), 0,           // 0020
    op(Opcode::Gstore), 1,          // 0022
    op(Opcode::Halt),               // 0024
];

// fact(n): if n < 2 return 1; return fact(n - 1) * n — prints fact(5).
#[rustfmt::skip]
const FACTORIAL: &[i64] = &[
    op(Opcode::Load), 0,            // 0000: fact(n)
    op(Opcode::Iconst), 2,          // 0002
    op(Opcode::Ilt),                // 0004
    op(Opcode::Brf), 10,            // 0005
    op(Opcode::Iconst), 1,          // 0007
    op(Opcode::Ret),                // 0009
    op(Opcode::Load), 0,            // 0010
    op(Opcode::Load), 0,            // 0012
    op(Opcode::Iconst), 1,          // 0014
    op(Opcode::Isub),               // 0016
    op(Opcode::Call), 0, 1, 0,      // 0017
    op(Opcode::Imul),               // 0021
    op(Opcode::Ret),                // 0022
    op(Opcode::Iconst), 5,          // 0023: main
    op(Opcode::Call), 0, 1, 0,      // 0025
    op(Opcode::Print),              // 0029
    op(Opcode::Halt),               // 0030
];

// double(x) = 2 * x — prints double(10).
#[rustfmt::skip]
const DOUBLE: &[i64] = &[
    op(Opcode::Iconst), 2,          // 0000: double(x)
    op(Opcode::Load), 0,            // 0002
    op(Opcode::Imul),               // 0004
    op(Opcode::Ret),                // 0005
    op(Opcode::Iconst), 10,         // 0006: main
    op(Opcode::Call), 0, 1, 0,      // 0008
    op(Opcode::Print),              // 0012
    op(Opcode::Halt),               // 0013
];

/// All embedded programs, in listing order.
pub const PROGRAMS: &[Program] = &[
    Program {
        name: "hello",
        description: "print a constant",
        code: HELLO,
        start: 0,
        nglobals: 0,
    },
    Program {
        name: "loop",
        description: "count to 10 in global memory",
        code: LOOP,
        start: 0,
        nglobals: 2,
    },
    Program {
        name: "factorial",
        description: "recursive factorial of 5",
        code: FACTORIAL,
        start: 23,
        nglobals: 0,
    },
    Program {
        name: "double",
        description: "call a one-argument function",
        code: DOUBLE,
        start: 6,
        nglobals: 0,
    },
];

/// Look up a program by name.
pub fn find(name: &str) -> Option<&'static Program> {
    PROGRAMS.iter().find(|p| p.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slate_vm::{Vm, VmState};

    fn run(program: &Program) -> (String, Vec<i64>) {
        let mut buf = Vec::new();
        let globals;
        {
            let mut vm = Vm::with_output(program.code, program.nglobals, Box::new(&mut buf));
            vm.execute(program.start, false).unwrap();
            assert_eq!(vm.state(), VmState::Halted);
            globals = vm.globals().slots().to_vec();
        }
        (String::from_utf8(buf).unwrap(), globals)
    }

    #[test]
    fn every_program_halts_cleanly() {
        for program in PROGRAMS {
            run(program);
        }
    }

    #[test]
    fn expected_outputs() {
        assert_eq!(run(find("hello").unwrap()).0, "1234\n");
        assert_eq!(run(find("factorial").unwrap()).0, "120\n");
        assert_eq!(run(find("double").unwrap()).0, "20\n");
        assert_eq!(run(find("loop").unwrap()).1, vec![10, 10]);
    }

    #[test]
    fn unknown_name_is_none() {
        assert!(find("no-such-program").is_none());
    }
}
