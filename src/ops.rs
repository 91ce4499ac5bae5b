//! The fixed MAL instruction set: opcode mnemonics, the per-opcode operand
//! rule table, and the operand classifier predicates.
//!
//! Each opcode's requirements live in one [`OpcodeDescriptor`] row of the
//! static [`OPCODES`] table, so the arity validator iterates the row instead
//! of branching per opcode, and each row can be audited and tested on its own.

use std::fmt::{Display, Formatter};

/// A MAL opcode mnemonic. Case-sensitive; `move` is not an opcode.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Opcode {
    Move,
    Movei,
    Add,
    Sub,
    Mul,
    Div,
    Inc,
    Dec,
    Beq,
    Blt,
    Bgt,
    Br,
    /// Pseudo-opcode marking the end of the program.
    End,
}

use Opcode::*;

impl Opcode {
    pub fn parse(src: &str) -> Option<Opcode> {
        match src {
            "MOVE" => Some(Move),
            "MOVEI" => Some(Movei),
            "ADD" => Some(Add),
            "SUB" => Some(Sub),
            "MUL" => Some(Mul),
            "DIV" => Some(Div),
            "INC" => Some(Inc),
            "DEC" => Some(Dec),
            "BEQ" => Some(Beq),
            "BLT" => Some(Blt),
            "BGT" => Some(Bgt),
            "BR" => Some(Br),
            "END" => Some(End),
            _ => None,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Move => "MOVE",
            Movei => "MOVEI",
            Add => "ADD",
            Sub => "SUB",
            Mul => "MUL",
            Div => "DIV",
            Inc => "INC",
            Dec => "DEC",
            Beq => "BEQ",
            Blt => "BLT",
            Bgt => "BGT",
            Br => "BR",
            End => "END",
        }
    }

    /// This opcode's row in the [`OPCODES`] table.
    pub fn descriptor(self) -> &'static OpcodeDescriptor {
        // OPCODES is ordered to match the enum.
        &OPCODES[self as usize]
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// What one operand position of an opcode accepts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperandConstraint {
    /// A register or an identifier.
    SrcOrDest,
    /// A number with only octal digits.
    OctalImmediate,
    /// A label name, with or without a trailing `:`.
    BranchLabel,
}

use OperandConstraint::*;

impl OperandConstraint {
    pub fn check(self, operand: &str) -> bool {
        match self {
            SrcOrDest => is_src_or_dest(operand),
            OctalImmediate => is_octal(operand),
            BranchLabel => is_label_operand(operand),
        }
    }
}

impl Display for OperandConstraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SrcOrDest => write!(f, "a valid source or destination"),
            OctalImmediate => write!(f, "a number in octal form"),
            BranchLabel => write!(f, "a valid label"),
        }
    }
}

/// One row of the instruction rule table: which operands an opcode takes, and
/// where its branch target sits if it has one.
#[derive(Debug)]
pub struct OpcodeDescriptor {
    pub opcode: Opcode,
    pub operands: &'static [OperandConstraint],
    /// Index into `operands` of the branch-target position.
    pub branch_target: Option<usize>,
}

impl OpcodeDescriptor {
    pub fn arity(&self) -> usize {
        self.operands.len()
    }
}

/// The complete rule set, one row per opcode, in [`Opcode`] declaration order.
pub static OPCODES: [OpcodeDescriptor; 13] = [
    OpcodeDescriptor { opcode: Move, operands: &[SrcOrDest, SrcOrDest], branch_target: None },
    OpcodeDescriptor { opcode: Movei, operands: &[OctalImmediate, SrcOrDest], branch_target: None },
    OpcodeDescriptor { opcode: Add, operands: &[SrcOrDest, SrcOrDest, SrcOrDest], branch_target: None },
    OpcodeDescriptor { opcode: Sub, operands: &[SrcOrDest, SrcOrDest, SrcOrDest], branch_target: None },
    OpcodeDescriptor { opcode: Mul, operands: &[SrcOrDest, SrcOrDest, SrcOrDest], branch_target: None },
    OpcodeDescriptor { opcode: Div, operands: &[SrcOrDest, SrcOrDest, SrcOrDest], branch_target: None },
    OpcodeDescriptor { opcode: Inc, operands: &[SrcOrDest], branch_target: None },
    OpcodeDescriptor { opcode: Dec, operands: &[SrcOrDest], branch_target: None },
    OpcodeDescriptor { opcode: Beq, operands: &[SrcOrDest, SrcOrDest, BranchLabel], branch_target: Some(2) },
    OpcodeDescriptor { opcode: Blt, operands: &[SrcOrDest, SrcOrDest, BranchLabel], branch_target: Some(2) },
    OpcodeDescriptor { opcode: Bgt, operands: &[SrcOrDest, SrcOrDest, BranchLabel], branch_target: Some(2) },
    OpcodeDescriptor { opcode: Br, operands: &[BranchLabel], branch_target: Some(0) },
    OpcodeDescriptor { opcode: End, operands: &[], branch_target: None },
];

/// The three basic operand shapes. Classification is by independent predicate;
/// a token may satisfy more than one kind (`17` is octal, but never also an
/// identifier, since identifiers are alphabetic-only).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperandKind {
    Register,
    OctalImmediate,
    Identifier,
}

impl OperandKind {
    pub const ALL: [OperandKind; 3] =
        [OperandKind::Register, OperandKind::OctalImmediate, OperandKind::Identifier];

    pub fn matches(self, operand: &str) -> bool {
        match self {
            OperandKind::Register => is_register(operand),
            OperandKind::OctalImmediate => is_octal(operand),
            OperandKind::Identifier => is_identifier(operand),
        }
    }
}

/// Whether the token satisfies at least one of the three operand kinds.
pub fn well_formed(operand: &str) -> bool {
    OperandKind::ALL.iter().any(|kind| kind.matches(operand))
}

/// Exactly `R0` through `R7`; case-sensitive.
pub fn is_register(operand: &str) -> bool {
    matches!(operand, "R0" | "R1" | "R2" | "R3" | "R4" | "R5" | "R6" | "R7")
}

/// Every character a digit, none of them `8` or `9`.
pub fn is_octal(operand: &str) -> bool {
    !operand.is_empty()
        && operand.chars().all(|c| c.is_ascii_digit() && c != '8' && c != '9')
}

/// Letters only, at most 5 of them.
pub fn is_identifier(operand: &str) -> bool {
    !operand.is_empty()
        && operand.chars().count() <= 5
        && operand.chars().all(char::is_alphabetic)
}

pub fn is_src_or_dest(operand: &str) -> bool {
    is_register(operand) || is_identifier(operand)
}

/// Identifier rule, with one optional trailing `:` allowed on the operand form.
pub fn is_label_operand(operand: &str) -> bool {
    let name = operand.strip_suffix(':').unwrap_or(operand);
    is_identifier(name)
}
