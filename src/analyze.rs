//! The whole-program passes: label/branch wiring and END placement.
//!
//! These run only once every line of the program has been read, since a
//! branch may legally point forward to a label declared later. Both passes
//! walk the program's lines as a flat stream of opcode/operand tokens, with
//! each token still carrying its line number and span.

use std::collections::HashSet;

use itertools::Itertools;

use crate::check;
use crate::error::{Diagnostic, DiagnosticKind};
use crate::lexer::Program;
use crate::ops;

fn strip_colon(token: &str) -> &str {
    token.strip_suffix(':').unwrap_or(token)
}

/// Match declared labels against the program's references.
///
/// Pass 1 flags declared labels nothing ever branches to (a warning; the
/// program still runs). Pass 2 flags branch targets with no matching
/// declaration (an error; there is nowhere to go). A reference matches when an
/// opcode/operand token equals the label name, one optional trailing `:`
/// stripped. Malformed declarations and targets are skipped here; the per-line
/// checks already report them.
pub fn check_label_wiring(program: &Program) -> Vec<Diagnostic> {
    let declarations: Vec<_> = program
        .lines
        .iter()
        .filter_map(|line| {
            line.label.map(|token| (token.src, line.number, (token.start, token.end)))
        })
        .collect();
    let declared: HashSet<&str> = declarations.iter().map(|(name, _, _)| *name).collect();

    let referenced = |name: &str| {
        program.lines.iter().any(|line| {
            line.instruction_tokens().any(|token| strip_colon(token.src) == name)
        })
    };

    let mut diagnostics = Vec::new();

    for (name, number, span) in declarations.iter().copied().unique_by(|(name, _, _)| *name) {
        if ops::is_identifier(name) && !referenced(name) {
            diagnostics.push(Diagnostic::on_line(
                DiagnosticKind::UnreferencedLabel { label: name.to_string() },
                number,
                Some(span),
            ));
        }
    }

    for line in &program.lines {
        let target = line
            .opcode()
            .and_then(|opcode| opcode.descriptor().branch_target)
            .and_then(|position| line.operands.get(position));
        if let Some(token) = target {
            let name = strip_colon(token.src);
            if ops::is_identifier(name) && !declared.contains(name) {
                diagnostics.push(Diagnostic::on_line(
                    DiagnosticKind::DanglingBranchTarget { label: name.to_string() },
                    line.number,
                    Some((token.start, token.end)),
                ));
            }
        }
    }

    diagnostics
}

/// Check that `END` appears exactly once, as the program's last token.
///
/// An occurrence is any opcode or operand token spelled `END`, so a stray
/// `END` in operand position still counts. The first occurrence anchors the
/// not-last warning; every further occurrence gets its own duplicate warning.
pub fn check_end_placement(program: &Program) -> Vec<Diagnostic> {
    let tokens: Vec<_> = program
        .lines
        .iter()
        .flat_map(|line| line.instruction_tokens().map(move |token| (line.number, token)))
        .collect();

    let mut occurrences = tokens
        .iter()
        .enumerate()
        .filter(|(_, (_, token))| token.src == "END");

    let first = match occurrences.next() {
        Some(first) => first,
        None => return vec![Diagnostic::global(DiagnosticKind::EndMissing)],
    };

    let mut diagnostics = Vec::new();
    let (index, (number, token)) = first;
    if index + 1 < tokens.len() {
        diagnostics.push(Diagnostic::on_line(
            DiagnosticKind::EndNotLast,
            *number,
            Some((token.start, token.end)),
        ));
    }
    for (_, (number, token)) in occurrences {
        diagnostics.push(Diagnostic::on_line(
            DiagnosticKind::EndDuplicated,
            *number,
            Some((token.start, token.end)),
        ));
    }
    diagnostics
}

/// Run every check, per-line and whole-program, over one parsed program.
pub fn validate(program: &Program) -> Vec<Diagnostic> {
    itertools::concat(vec![
        program.lines.iter().flat_map(check::check_line).collect(),
        check_label_wiring(program),
        check_end_placement(program),
    ])
}
