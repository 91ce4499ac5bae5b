//! The report layer: the formatted `.log` listing and the per-category tally.
//!
//! The log interleaves the program listing with the diagnostics found on each
//! line, then summarizes: warning and error counts by category, the identifier
//! inventory, and the final verdict.

use std::io::{self, Write};

use itertools::Itertools;

use crate::check;
use crate::error::{Category, Diagnostic};
use crate::lexer::Program;

/// Diagnostic counts bucketed the way the log's summary reports them.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Tally {
    pub ill_formed_labels: usize,
    pub invalid_opcodes: usize,
    pub ill_formed_operands: usize,
    pub invalid_operand_types: usize,
    pub too_many_operands: usize,
    pub too_few_operands: usize,
    pub unreferenced_labels: usize,
    pub dangling_branch_targets: usize,
    pub end_problems: usize,
}

impl Tally {
    pub fn count(diagnostics: &[Diagnostic]) -> Tally {
        let mut tally = Tally::default();
        for diagnostic in diagnostics {
            tally.record(diagnostic);
        }
        tally
    }

    fn record(&mut self, diagnostic: &Diagnostic) {
        match diagnostic.category() {
            Category::IllFormedLabel => self.ill_formed_labels += 1,
            Category::InvalidOpcode => self.invalid_opcodes += 1,
            Category::IllFormedOperand => self.ill_formed_operands += 1,
            Category::InvalidOperandType => self.invalid_operand_types += 1,
            Category::TooManyOperands => self.too_many_operands += 1,
            Category::TooFewOperands => self.too_few_operands += 1,
            Category::UnreferencedLabel => self.unreferenced_labels += 1,
            Category::DanglingBranchTarget => self.dangling_branch_targets += 1,
            Category::EndMissing | Category::EndNotLast | Category::EndDuplicated => {
                self.end_problems += 1
            }
        }
    }

    pub fn total_errors(&self) -> usize {
        self.ill_formed_labels
            + self.invalid_opcodes
            + self.ill_formed_operands
            + self.invalid_operand_types
            + self.too_many_operands
            + self.too_few_operands
            + self.dangling_branch_targets
    }

    pub fn total_warnings(&self) -> usize {
        self.unreferenced_labels + self.end_problems
    }
}

/// Every identifier operand in the program, first-appearance order, no
/// duplicates.
pub fn identifier_inventory<'input>(program: &Program<'input>) -> Vec<&'input str> {
    program
        .lines
        .iter()
        .flat_map(check::extract_identifiers)
        .unique()
        .collect()
}

/// Write the full log for one checked program and return the tally.
pub fn write_report<W: Write>(
    mut out: W,
    program: &Program,
    diagnostics: &[Diagnostic],
    identifiers: &[&str],
    input_name: &str,
    output_name: &str,
) -> io::Result<Tally> {
    let tally = Tally::count(diagnostics);

    writeln!(out, "MAL Syntax Checker Results")?;
    writeln!(out, "Input file: {}", input_name)?;
    writeln!(out, "Output file: {}", output_name)?;
    writeln!(out, "----------")?;
    writeln!(out)?;

    writeln!(out, "MAL Program Listing:")?;
    for line in &program.lines {
        writeln!(out, "{}. {}", line.number, line.src)?;
        for diagnostic in diagnostics {
            if diagnostic.line == Some(line.number) {
                writeln!(out, "   ** {}: {}", diagnostic.severity(), diagnostic.message())?;
            }
        }
    }
    for diagnostic in diagnostics.iter().filter(|d| d.line.is_none()) {
        writeln!(out, "** {}: {}", diagnostic.severity(), diagnostic.message())?;
    }
    writeln!(out)?;

    writeln!(out, "Total Lines of Code: {}", program.lines.len())?;
    writeln!(out)?;

    if tally.total_warnings() == 0 {
        writeln!(out, "No Warnings!")?;
    } else {
        writeln!(out, "Total Warnings = {}", tally.total_warnings())?;
        if tally.unreferenced_labels > 0 {
            writeln!(out, "{} label problem warning(s)", tally.unreferenced_labels)?;
        }
        if tally.end_problems > 0 {
            writeln!(out, "{} problem(s) with END opcode", tally.end_problems)?;
        }
    }
    writeln!(out)?;

    if tally.total_errors() == 0 {
        writeln!(out, "No Errors Found!")?;
    } else {
        writeln!(out, "Total Errors = {}", tally.total_errors())?;
        let label_errors = tally.ill_formed_labels + tally.dangling_branch_targets;
        if label_errors > 0 {
            writeln!(out, "{} label problem error(s)", label_errors)?;
        }
        if tally.invalid_opcodes > 0 {
            writeln!(out, "{} invalid opcode error(s)", tally.invalid_opcodes)?;
        }
        if tally.ill_formed_operands > 0 {
            writeln!(out, "{} ill-formed operand error(s)", tally.ill_formed_operands)?;
        }
        if tally.invalid_operand_types > 0 {
            writeln!(out, "{} invalid operand type error(s)", tally.invalid_operand_types)?;
        }
        if tally.too_many_operands > 0 {
            writeln!(out, "{} too many operands error(s)", tally.too_many_operands)?;
        }
        if tally.too_few_operands > 0 {
            writeln!(out, "{} too few operands error(s)", tally.too_few_operands)?;
        }
    }
    writeln!(out)?;

    writeln!(out, "Identifiers:")?;
    for identifier in identifiers {
        writeln!(out, "{}", identifier)?;
    }
    writeln!(out)?;

    if tally.total_errors() == 0 {
        writeln!(out, "Processing Complete - MAL Program is valid")?;
    } else {
        writeln!(out, "Processing Complete - MAL Program is not valid")?;
    }

    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::analyze::validate;
    use crate::error::Severity;

    fn report(source: &str) -> (String, Tally) {
        let program = Program::parse(source);
        let diagnostics = validate(&program);
        let identifiers = identifier_inventory(&program);
        let mut buffer = Vec::new();
        let tally = write_report(
            &mut buffer, &program, &diagnostics, &identifiers, "test.mal", "test.log")
            .unwrap();
        (String::from_utf8(buffer).unwrap(), tally)
    }

    #[test]
    fn inventory_is_deduplicated_in_first_appearance_order() {
        let program = Program::parse("MOVEI 10, X\nADD X, Y, Z\nMOVE Z, X\nEND");
        assert_eq!(vec!["X", "Y", "Z"], identifier_inventory(&program));
    }

    #[test]
    fn branch_targets_stay_out_of_the_inventory() {
        let program = Program::parse("LOOP: INC X\nBEQ R1, R2, LOOP\nEND");
        assert_eq!(vec!["X"], identifier_inventory(&program));
    }

    #[test]
    fn clean_program_report() {
        let (log, tally) = report("MOVEI 10, X\nINC X\nEND");
        assert_eq!(0, tally.total_errors());
        assert_eq!(0, tally.total_warnings());
        assert!(log.contains("Total Lines of Code: 3"));
        assert!(log.contains("No Warnings!"));
        assert!(log.contains("No Errors Found!"));
        assert!(log.contains("Processing Complete - MAL Program is valid"));
    }

    #[test]
    fn diagnostics_are_printed_under_their_line() {
        let (log, tally) = report("MVE R1, R2\nEND");
        assert_eq!(1, tally.invalid_opcodes);
        let listing_line = log.lines().position(|l| l == "1. MVE R1, R2").unwrap();
        assert_eq!(
            "   ** error: invalid opcode MVE - did you mean 'MOVE'?",
            log.lines().nth(listing_line + 1).unwrap());
        assert!(log.contains("Total Errors = 1"));
        assert!(log.contains("1 invalid opcode error(s)"));
        assert!(log.contains("Processing Complete - MAL Program is not valid"));
    }

    #[test]
    fn missing_end_is_reported_program_wide() {
        let (log, tally) = report("MOVE R1, R2");
        assert_eq!(1, tally.end_problems);
        assert!(log.contains("** warning: this program does not contain the END instruction"));
        assert!(log.contains("Total Warnings = 1"));
        assert!(log.contains("1 problem(s) with END opcode"));
        // END problems are warnings; the program is still valid.
        assert!(log.contains("Processing Complete - MAL Program is valid"));
    }

    #[test]
    fn tally_splits_errors_and_warnings() {
        let diagnostics = validate(&Program::parse("LOOP: MVE R1, R2\nBR GONE\nEND"));
        let tally = Tally::count(&diagnostics);
        assert_eq!(1, tally.invalid_opcodes);
        assert_eq!(1, tally.dangling_branch_targets);
        assert_eq!(1, tally.unreferenced_labels);
        assert_eq!(2, tally.total_errors());
        assert_eq!(1, tally.total_warnings());
    }

    #[test]
    fn severity_totals_match_the_severity_of_each_diagnostic() {
        let diagnostics = validate(&Program::parse("LOOP2: ADD R1, R2\nEND\nEND"));
        let tally = Tally::count(&diagnostics);
        let errors = diagnostics.iter().filter(|d| d.severity() == Severity::Error).count();
        let warnings = diagnostics.iter().filter(|d| d.severity() == Severity::Warning).count();
        assert_eq!(errors, tally.total_errors());
        assert_eq!(warnings, tally.total_warnings());
    }
}
