//! Diagnostic values produced by the checks, and their console rendering.
//!
//! A [`Diagnostic`] is plain data: what went wrong ([`DiagnosticKind`]), and
//! where (an optional line number and byte span). Checks produce them and
//! never mutate them; the reporting layer decides how they are shown.

use std::fmt::{Display, Formatter};

use annotate_snippets::display_list::{DisplayList, FormatOptions};
use annotate_snippets::snippet::{Annotation, AnnotationType, Slice, Snippet, SourceAnnotation};
use itertools::Itertools;

use crate::ops::Opcode;
use crate::Span;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// The fixed diagnostic categories, used for tallying by the report layer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Category {
    IllFormedLabel,
    InvalidOpcode,
    IllFormedOperand,
    InvalidOperandType,
    TooManyOperands,
    TooFewOperands,
    UnreferencedLabel,
    DanglingBranchTarget,
    EndMissing,
    EndNotLast,
    EndDuplicated,
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::IllFormedLabel => "ill-formed label",
            Category::InvalidOpcode => "invalid opcode",
            Category::IllFormedOperand => "ill-formed operand",
            Category::InvalidOperandType => "invalid operand type",
            Category::TooManyOperands => "too many operands",
            Category::TooFewOperands => "too few operands",
            Category::UnreferencedLabel => "unreferenced label",
            Category::DanglingBranchTarget => "dangling branch target",
            Category::EndMissing => "END missing",
            Category::EndNotLast => "END not last",
            Category::EndDuplicated => "END duplicated",
        };
        write!(f, "{}", name)
    }
}

/// Which label-formation rule a declaration broke.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LabelFault {
    /// Whitespace before the colon: the label was not the line's first token.
    NotFirstToken,
    /// More than 5 characters.
    TooLong,
    /// A character other than a letter.
    NotAlphabetic,
}

use DiagnosticKind::*;

#[derive(Clone, Debug, PartialEq)]
pub enum DiagnosticKind {
    IllFormedLabel { fault: LabelFault },
    InvalidOpcode { opcode: String, suggestion: Option<String> },
    IllFormedOperand { operand: String },
    InvalidOperandType { opcode: Opcode },
    TooManyOperands { opcode: Opcode, expected: usize, actual: usize },
    TooFewOperands { opcode: Opcode, expected: usize, actual: usize },
    UnreferencedLabel { label: String },
    DanglingBranchTarget { label: String },
    EndMissing,
    EndNotLast,
    EndDuplicated,
}

impl DiagnosticKind {
    pub fn category(&self) -> Category {
        match self {
            IllFormedLabel { .. } => Category::IllFormedLabel,
            InvalidOpcode { .. } => Category::InvalidOpcode,
            IllFormedOperand { .. } => Category::IllFormedOperand,
            InvalidOperandType { .. } => Category::InvalidOperandType,
            TooManyOperands { .. } => Category::TooManyOperands,
            TooFewOperands { .. } => Category::TooFewOperands,
            UnreferencedLabel { .. } => Category::UnreferencedLabel,
            DanglingBranchTarget { .. } => Category::DanglingBranchTarget,
            EndMissing => Category::EndMissing,
            EndNotLast => Category::EndNotLast,
            EndDuplicated => Category::EndDuplicated,
        }
    }

    pub fn severity(&self) -> Severity {
        match self.category() {
            Category::UnreferencedLabel
            | Category::EndMissing
            | Category::EndNotLast
            | Category::EndDuplicated => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            IllFormedLabel { fault: LabelFault::NotFirstToken } =>
                String::from("ill-formed label - a label cannot contain spaces and must be the first token on the line"),
            IllFormedLabel { fault: LabelFault::TooLong } =>
                String::from("ill-formed label - a label is more than 5 characters long"),
            IllFormedLabel { fault: LabelFault::NotAlphabetic } =>
                String::from("ill-formed label - a label must be composed of letters only"),
            InvalidOpcode { opcode, suggestion: Some(suggestion) } =>
                format!("invalid opcode {} - did you mean '{}'?", opcode, suggestion),
            InvalidOpcode { opcode, suggestion: None } =>
                format!("invalid opcode {}", opcode),
            IllFormedOperand { operand } =>
                format!("ill-formed operand {} - an operand has to be a valid register, valid octal number, or valid identifier", operand),
            InvalidOperandType { opcode } =>
                format!("invalid operand type - {} requires {}", opcode, requirements(*opcode)),
            TooManyOperands { opcode, expected, actual } =>
                format!("too many operands - {} requires {} operand{}, found {}",
                        opcode, expected, plural(*expected), actual),
            TooFewOperands { opcode, expected, actual } =>
                format!("too few operands - {} requires {} operand{}, found {}",
                        opcode, expected, plural(*expected), actual),
            UnreferencedLabel { label } =>
                format!("the label '{}' is not being branched to", label),
            DanglingBranchTarget { label } =>
                format!("the branch target '{}' has no label to branch to", label),
            EndMissing =>
                String::from("this program does not contain the END instruction"),
            EndNotLast =>
                String::from("the END opcode is not the last instruction in this program"),
            EndDuplicated =>
                String::from("the END opcode appears more than once"),
        }
    }
}

// "operand 1 to be a number in octal form and operand 2 to be a valid source
// or destination", generated from the opcode's table row.
fn requirements(opcode: Opcode) -> String {
    opcode
        .descriptor()
        .operands
        .iter()
        .enumerate()
        .map(|(position, constraint)| format!("operand {} to be {}", position + 1, constraint))
        .join(" and ")
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

/// One problem found in a MAL program.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// 1-based number of the offending line; `None` for program-wide findings.
    pub line: Option<usize>,
    /// Byte range of the offending text within its normalized line.
    pub span: Option<Span>,
}

impl Diagnostic {
    pub fn on_line(kind: DiagnosticKind, line: usize, span: Option<Span>) -> Diagnostic {
        Diagnostic { kind, line: Some(line), span }
    }

    pub fn global(kind: DiagnosticKind) -> Diagnostic {
        Diagnostic { kind, line: None, span: None }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn message(&self) -> String {
        self.kind.message()
    }
}

/// Render a diagnostic for the console, annotating the offending line when one
/// is available.
pub fn render(diagnostic: &Diagnostic, source: Option<&str>, origin: Option<&str>) -> String {
    let message = diagnostic.message();
    let annotation_type = match diagnostic.severity() {
        Severity::Error => AnnotationType::Error,
        Severity::Warning => AnnotationType::Warning,
    };
    let inline = format!("{} here", diagnostic.category());

    let mut slices = Vec::new();
    if let Some(source) = source {
        let (start, end) = diagnostic.span.unwrap_or((0, source.len()));
        slices.push(Slice {
            source,
            line_start: diagnostic.line.unwrap_or(1),
            origin,
            fold: false,
            annotations: vec![SourceAnnotation {
                range: (start, end),
                label: &inline,
                annotation_type,
            }],
        });
    }

    let snippet = Snippet {
        title: Some(Annotation {
            id: None,
            label: Some(&message),
            annotation_type,
        }),
        footer: vec![],
        slices,
        opt: FormatOptions { color: true, ..Default::default() },
    };
    DisplayList::from(snippet).to_string()
}
