//! A static syntax checker for MAL, a small register-based teaching assembly
//! language. The checker inspects source text and reports syntax and wiring
//! problems without ever executing the program.
//!
//! Checking happens in two stages. Each line is [normalized](lexer::normalize)
//! and split into a typed [`Line`](lexer::Line) record, and the per-line checks
//! in [`check`] look at labels, opcodes, and operands in isolation. Once the
//! whole [`Program`](lexer::Program) has been read, the passes in [`analyze`]
//! get global visibility: they wire branch targets up to label declarations and
//! make sure `END` appears exactly once, at the end.
//!
//! All checks return [`Diagnostic`]s as plain data; an empty result means a
//! clean program. Nothing in the core reads or writes files.
//!
//! ```
//! use mal_checker::{validate, Program};
//!
//! let program = Program::parse("START: MOVEI 10, X\nBR START\nEND");
//! assert!(validate(&program).is_empty());
//!
//! let program = Program::parse("MVE R1, R2\nEND");
//! let diagnostics = validate(&program);
//! assert_eq!(1, diagnostics.len());
//! assert_eq!("invalid opcode MVE - did you mean 'MOVE'?", diagnostics[0].message());
//! ```

pub mod analyze;
pub mod check;
pub mod error;
pub mod lexer;
pub mod ops;
pub mod report;
pub mod suggest;

/// A byte range within one normalized source line.
pub type Span = (usize, usize);

pub use analyze::validate;
pub use error::{Category, Diagnostic, Severity};
pub use lexer::{normalize, Line, Program};
