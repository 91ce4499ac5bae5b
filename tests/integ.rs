extern crate mal_checker;

use mal_checker::report::{identifier_inventory, write_report, Tally};
use mal_checker::{validate, Category, Diagnostic, Program, Severity};

#[test]
fn valid_program() {
    let source = include_str!("inputs/valid.mal");
    let program = Program::parse(source);
    assert!(validate(&program).is_empty());
    assert_eq!(vec!["X", "Y"], identifier_inventory(&program));
}

#[test]
fn misspelled_opcodes_get_suggestions() {
    let diagnostics = check(include_str!("inputs/misspelled.mal"));
    let messages: Vec<String> = diagnostics.iter().map(Diagnostic::message).collect();
    assert_eq!(
        vec![
            "invalid opcode MVE - did you mean 'MOVE'?",
            "invalid opcode ADDD - did you mean 'ADD'?",
            "invalid opcode BRR - did you mean 'BR'?",
        ],
        messages);
    assert_eq!(vec![Some(1), Some(2), Some(3)],
               diagnostics.iter().map(|d| d.line).collect::<Vec<_>>());
}

#[test]
fn label_wiring() {
    let diagnostics = check(include_str!("inputs/wiring.mal"));
    assert_eq!(
        vec![Category::UnreferencedLabel, Category::DanglingBranchTarget],
        categories(&diagnostics));
    // The unused declaration is a warning; the missing one is an error.
    assert_eq!(Severity::Warning, diagnostics[0].severity());
    assert_eq!(Severity::Error, diagnostics[1].severity());
    assert!(diagnostics[0].message().contains("'START'"));
    assert!(diagnostics[1].message().contains("'EXIT'"));
}

#[test]
fn end_placement() {
    let diagnostics = check(include_str!("inputs/end_placement.mal"));
    assert_eq!(
        vec![Category::EndNotLast, Category::EndDuplicated],
        categories(&diagnostics));
    assert_eq!(Some(2), diagnostics[0].line);
    assert_eq!(Some(4), diagnostics[1].line);
}

#[test]
fn one_of_everything() {
    let diagnostics = check(include_str!("inputs/kitchen_sink.mal"));
    let tally = Tally::count(&diagnostics);
    assert_eq!(1, tally.ill_formed_labels);
    assert_eq!(1, tally.invalid_opcodes);
    assert_eq!(1, tally.too_many_operands);
    assert_eq!(1, tally.too_few_operands);
    assert_eq!(1, tally.invalid_operand_types);
    assert_eq!(1, tally.dangling_branch_targets);
    assert_eq!(6, tally.total_errors());
    assert_eq!(0, tally.total_warnings());
}

#[test]
fn accepted_single_lines() {
    for line in &[
        "MOVE R1, R2",
        "MOVE A, B",
        "MOVEI 777, R3",
        "ADD R1, R2, R3",
        "SUB A, B, C",
        "MUL R1, TEMP, R2",
        "DIV R1, R2, R3",
        "INC COUNT",
        "DEC R7",
    ] {
        let diagnostics = check(&format!("{}\nEND", line));
        assert!(diagnostics.is_empty(), "unexpected diagnostics for {:?}: {:?}", line, diagnostics);
    }
}

#[test]
fn rejected_single_lines() {
    for (line, expected) in &[
        ("MOVE R8, R2", Category::IllFormedOperand),
        ("MOVEI 18, R1", Category::IllFormedOperand),
        ("MOVEI 17, 17", Category::InvalidOperandType),
        ("ADD R1, R2", Category::TooFewOperands),
        ("END R1", Category::TooManyOperands),
        ("movei 10, R1", Category::InvalidOpcode),
        ("LONGLABEL: INC R1", Category::IllFormedLabel),
        ("MUL FORTY, R2, R8", Category::IllFormedOperand),
    ] {
        let diagnostics = check(&format!("{}\nEND", line));
        assert!(
            categories(&diagnostics).contains(expected),
            "expected {:?} for {:?}, got {:?}", expected, line, diagnostics);
    }
}

#[test]
fn arity_is_enforced_for_every_opcode() {
    use mal_checker::ops::{OperandConstraint, OPCODES};

    fn sample(constraint: OperandConstraint) -> &'static str {
        match constraint {
            OperandConstraint::SrcOrDest => "R1",
            OperandConstraint::OctalImmediate => "7",
            OperandConstraint::BranchLabel => "LOOP",
        }
    }

    for descriptor in OPCODES.iter() {
        let mnemonic = descriptor.opcode.mnemonic();
        let operands: Vec<&str> = descriptor.operands.iter().map(|c| sample(*c)).collect();

        let crowded = if descriptor.arity() == 0 {
            format!("{} R1", mnemonic)
        } else {
            format!("{} {}, R1", mnemonic, operands.join(", "))
        };
        assert!(
            categories(&check(&crowded)).contains(&Category::TooManyOperands),
            "no too-many diagnostic for {:?}", crowded);

        if descriptor.arity() > 0 {
            let starved = format!("{} {}", mnemonic, operands[..operands.len() - 1].join(", "));
            assert!(
                categories(&check(&starved)).contains(&Category::TooFewOperands),
                "no too-few diagnostic for {:?}", starved);
        }
    }
}

#[test]
fn report_verdict_follows_the_error_count() {
    let clean = report(include_str!("inputs/valid.mal"));
    assert!(clean.contains("No Errors Found!"));
    assert!(clean.contains("Processing Complete - MAL Program is valid"));

    let broken = report(include_str!("inputs/kitchen_sink.mal"));
    assert!(broken.contains("Total Errors = 6"));
    assert!(broken.contains("Processing Complete - MAL Program is not valid"));
}

#[test]
fn report_lists_every_line_with_its_findings() {
    let log = report(include_str!("inputs/misspelled.mal"));
    assert!(log.contains("1. MVE R1, R2"));
    assert!(log.contains("   ** error: invalid opcode MVE - did you mean 'MOVE'?"));
    assert!(log.contains("Total Lines of Code: 4"));
}

fn check(source: &str) -> Vec<Diagnostic> {
    validate(&Program::parse(source))
}

fn categories(diagnostics: &[Diagnostic]) -> Vec<Category> {
    diagnostics.iter().map(|d| d.category()).collect()
}

fn report(source: &str) -> String {
    let program = Program::parse(source);
    let diagnostics = validate(&program);
    let identifiers = identifier_inventory(&program);
    let mut buffer = Vec::new();
    write_report(&mut buffer, &program, &diagnostics, &identifiers, "input.mal", "input.log")
        .unwrap();
    String::from_utf8(buffer).unwrap()
}
