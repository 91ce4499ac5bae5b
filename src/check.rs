//! The per-line checks: label formation, opcode spelling, operand shape, and
//! operand count/type against the instruction rule table.
//!
//! Each check takes one [`Line`] and returns its findings as data. The checks
//! are independent of each other and of every other line; the
//! [whole-program passes](crate::analyze) handle anything that needs to see
//! more than one line.

use crate::error::{Diagnostic, DiagnosticKind, LabelFault};
use crate::lexer::Line;
use crate::ops::{self, Opcode};
use crate::suggest::{suggest, OPCODE_ALPHABET};

/// Validate the line's label declaration, if a `:` appears anywhere on it.
///
/// The candidate is the text before the first colon. Whitespace in the
/// candidate means the colon-terminated word was not the line's first token,
/// which is the only place a declaration may sit.
pub fn check_label(line: &Line) -> Option<Diagnostic> {
    let colon = line.src.find(':')?;
    let candidate = &line.src[..colon];

    let fault = if candidate.chars().any(char::is_whitespace) {
        Some(LabelFault::NotFirstToken)
    } else if candidate.chars().count() > 5 {
        Some(LabelFault::TooLong)
    } else if !candidate.chars().all(char::is_alphabetic) {
        Some(LabelFault::NotAlphabetic)
    } else {
        None
    };

    fault.map(|fault| {
        Diagnostic::on_line(DiagnosticKind::IllFormedLabel { fault }, line.number, Some((0, colon)))
    })
}

/// Validate the line's opcode token, suggesting a repair for near-misses.
pub fn check_opcode(line: &Line) -> Option<Diagnostic> {
    let token = line.opcode?;
    if Opcode::parse(token.src).is_some() {
        return None;
    }
    let suggestion = suggest(token.src, &OPCODE_ALPHABET, |candidate| {
        Opcode::parse(candidate).is_some()
    });
    Some(Diagnostic::on_line(
        DiagnosticKind::InvalidOpcode { opcode: token.src.to_string(), suggestion },
        line.number,
        Some((token.start, token.end)),
    ))
}

/// Report the first operand token that is no register, octal number, or
/// identifier.
pub fn check_operand_form(line: &Line) -> Option<Diagnostic> {
    let token = line
        .operands
        .iter()
        .find(|token| !ops::well_formed(token.src))?;
    Some(Diagnostic::on_line(
        DiagnosticKind::IllFormedOperand { operand: token.src.to_string() },
        line.number,
        Some((token.start, token.end)),
    ))
}

/// Check the operand list against the opcode's rule-table row: first the
/// count, then each position's constraint.
///
/// A line whose opcode is not recognized gets nothing here; [`check_opcode`]
/// already covers it, and there is no row to compare against.
pub fn check_operand_arity(line: &Line) -> Option<Diagnostic> {
    let opcode = line.opcode()?;
    let descriptor = opcode.descriptor();
    let expected = descriptor.arity();
    let actual = line.operands.len();

    let span = match (line.operands.first(), line.operands.last()) {
        (Some(first), Some(last)) => Some((first.start, last.end)),
        _ => line.opcode.map(|token| (token.start, token.end)),
    };

    let kind = if actual > expected {
        DiagnosticKind::TooManyOperands { opcode, expected, actual }
    } else if actual < expected {
        DiagnosticKind::TooFewOperands { opcode, expected, actual }
    } else if itertools::zip(descriptor.operands, &line.operands)
        .any(|(constraint, token)| !constraint.check(token.src))
    {
        // One diagnostic for the whole list; the message names every position.
        DiagnosticKind::InvalidOperandType { opcode }
    } else {
        return None;
    };
    Some(Diagnostic::on_line(kind, line.number, span))
}

/// The identifier operands of a non-branch line, for the report's inventory.
///
/// Branch lines contribute nothing: their identifier-shaped operands are label
/// references, not variables.
pub fn extract_identifiers<'input>(line: &Line<'input>) -> Vec<&'input str> {
    if line.opcode().map_or(false, |opcode| opcode.descriptor().branch_target.is_some()) {
        return Vec::new();
    }
    line.operands
        .iter()
        .map(|token| token.src)
        .filter(|operand| ops::is_identifier(operand))
        .collect()
}

/// Run every per-line check on one line.
pub fn check_line(line: &Line) -> Vec<Diagnostic> {
    vec![
        check_label(line),
        check_opcode(line),
        check_operand_form(line),
        check_operand_arity(line),
    ]
    .into_iter()
    .flatten()
    .collect()
}
