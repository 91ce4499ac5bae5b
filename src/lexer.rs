//! Functions and data structures for splitting MAL source into tokens and
//! typed line records.
//!
//! A MAL program is strictly line-oriented: every instruction lives on its own
//! line, and a line is at most a label declaration, an opcode, and a
//! comma-or-space-separated operand list. Instead of re-scanning raw strings,
//! the checker works over [`Line`] records in which those three parts have
//! already been identified. Here's an example:
//!
//! ```
//! use mal_checker::lexer::Program;
//!
//! let program = Program::parse("; doubles R1\nLOOP: ADD R1, R1, R1 ; comment\n\nBR LOOP");
//! let line = &program.lines[0];
//! assert_eq!(1, line.number);
//! assert_eq!("LOOP", line.label.unwrap().src);
//! assert_eq!("ADD", line.opcode.unwrap().src);
//! assert_eq!(vec!["R1", "R1", "R1"],
//!            line.operands.iter().map(|t| t.src).collect::<Vec<_>>());
//! ```
//!
//! Comment-only and blank lines are dropped, and the remaining lines are
//! numbered from 1 in the order they were kept. Splitting makes no judgement
//! about whether the pieces are valid; `ADD` could just as well have been
//! `AD%D` and it would still land in the opcode slot, for the
//! [per-line checks](crate::check) to complain about.

use regex::Regex;

use crate::ops::Opcode;

/// Strip the trailing comment (everything from the first `;`) and surrounding
/// whitespace from one raw source line.
///
/// Returns a subslice of the input. Idempotent: normalizing a normalized line
/// changes nothing.
pub fn normalize(line: &str) -> &str {
    let line = match line.find(';') {
        Some(comment) => &line[..comment],
        None => line,
    };
    line.trim()
}

/// One word of MAL source: a contiguous run of non-whitespace, non-comma
/// characters, with its byte span within the normalized line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'input> {
    pub src: &'input str,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TokenKind {
    Whitespace,
    Comma,
    Word,
}

use TokenKind::*;

/// Splits normalized lines into [`Token`]s.
///
/// Whitespace and commas separate tokens and are not reported. Built once and
/// reused for every line of a program.
pub struct Tokenizer {
    patterns: Vec<(Regex, TokenKind)>,
}

impl Tokenizer {
    // The tokenizer tries these patterns in this order, always anchored to the
    // start of the remaining slice.
    const PATTERNS: [(&'static str, TokenKind); 3] = [
        (r"\s+", Whitespace),
        (r",", Comma),
        (r"[^\s,]+", Word),
    ];

    pub fn new() -> Tokenizer {
        let mut this = Tokenizer { patterns: Vec::new() };
        for (pattern, kind) in Self::PATTERNS.iter() {
            this.register_pattern(pattern, *kind);
        }
        this
    }

    fn register_pattern(&mut self, pattern: &str, kind: TokenKind) {
        assert!(!pattern.starts_with('^'));
        let pattern = format!("^{}", pattern);
        let regex = Regex::new(pattern.as_str()).expect("invalid token pattern");
        self.patterns.push((regex, kind));
    }

    pub fn tokenize<'input>(&self, src: &'input str) -> Vec<Token<'input>> {
        let mut tokens = Vec::new();
        let mut cur_pos = 0;
        'scan: while cur_pos < src.len() {
            for (pattern, kind) in &self.patterns {
                if let Some(found) = pattern.find(&src[cur_pos..]) {
                    let start = cur_pos;
                    cur_pos += found.end();
                    if let Word = *kind {
                        tokens.push(Token { src: found.as_str(), start, end: cur_pos });
                    }
                    continue 'scan;
                }
            }
            // The three patterns cover every character.
            unreachable!("no token pattern matched at byte {} of {:?}", cur_pos, src);
        }
        tokens
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Tokenizer::new()
    }
}

/// One normalized, non-blank line of MAL source, split into its parts.
///
/// `label` is set only when the line's first token contains a `:`; the token
/// stores the name without the colon. Any text after the colon in the same
/// word is re-split, so `A:B` yields label `A` and opcode `B`. A colon
/// appearing in a later token never produces a label declaration (the
/// [label validator](crate::check::check_label) reports it instead).
#[derive(Debug, Clone, PartialEq)]
pub struct Line<'input> {
    /// 1-based position among the kept (non-blank) lines.
    pub number: usize,
    /// The normalized line text the spans of the tokens refer to.
    pub src: &'input str,
    pub label: Option<Token<'input>>,
    pub opcode: Option<Token<'input>>,
    pub operands: Vec<Token<'input>>,
}

impl<'input> Line<'input> {
    pub fn parse(tokenizer: &Tokenizer, number: usize, src: &'input str) -> Line<'input> {
        let mut words = tokenizer.tokenize(src);

        let mut label = None;
        if let Some(first) = words.first().copied() {
            if let Some(colon) = first.src.find(':') {
                words.remove(0);
                label = Some(Token {
                    src: &first.src[..colon],
                    start: first.start,
                    end: first.start + colon,
                });
                let rest = &first.src[colon + 1..];
                if !rest.is_empty() {
                    words.insert(0, Token {
                        src: rest,
                        start: first.start + colon + 1,
                        end: first.end,
                    });
                }
            }
        }

        let mut words = words.into_iter();
        let opcode = words.next();
        let operands = words.collect();
        Line { number, src, label, opcode, operands }
    }

    /// The line's opcode, when the opcode token is one of the 13 known
    /// mnemonics.
    pub fn opcode(&self) -> Option<Opcode> {
        self.opcode.as_ref().and_then(|token| Opcode::parse(token.src))
    }

    /// The opcode and operand tokens in order, label declaration excluded.
    pub fn instruction_tokens(&self) -> impl Iterator<Item = Token<'input>> + '_ {
        self.opcode.iter().copied().chain(self.operands.iter().copied())
    }
}

/// An ordered sequence of normalized, non-blank, 1-based-numbered [`Line`]s.
///
/// The whole-program passes in [`analyze`](crate::analyze) treat this as a
/// flat token stream with the line boundaries kept in each token's record.
#[derive(Debug, Clone, PartialEq)]
pub struct Program<'input> {
    pub lines: Vec<Line<'input>>,
}

impl<'input> Program<'input> {
    pub fn parse(source: &'input str) -> Program<'input> {
        let tokenizer = Tokenizer::new();
        let mut lines = Vec::new();
        let mut number = 1;
        for raw in source.lines() {
            let src = normalize(raw);
            if src.is_empty() {
                continue;
            }
            lines.push(Line::parse(&tokenizer, number, src));
            number += 1;
        }
        Program { lines }
    }
}
