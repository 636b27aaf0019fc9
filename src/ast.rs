//! # KaQL - Abstract Syntax Tree
//!
//! This module defines the tokens and the Abstract Syntax Tree (AST) of KaQL,
//! a small boolean filter language for picking objects by their properties.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical token kinds produced by the lexer, with precedence
//! - **[operators]** - Binary and unary operators stored in the tree
//! - **[expressions]** - Expression nodes (identifiers, literals, operations)
//! - **[query]** - The parsed filter handed to an evaluator
//!
//! ## Quick Start
//!
//! ```text
//! status == "active" && owner.age >= 18
//! ```
//!
//! This filter keeps objects whose `status` is `"active"` and whose nested
//! `owner.age` is at least 18.
//!
//! ## Core Concepts
//!
//! ### Property Paths
//!
//! Identifiers may contain dots, so `owner.age` is a single identifier. There
//! is no separate path syntax.
//!
//! ### Precedence
//!
//! From loosest to tightest: `||`, `&&`, then all comparisons. Unary `-`
//! binds tighter than any binary operator. Operators of equal precedence
//! group left to right, and parentheses override everything:
//!
//! ```text
//! a == 1 || b == 2 && c == 3     // (a == 1) || ((b == 2) && (c == 3))
//! (a == 1 || b == 2) && c == 3   // ((a == 1) || (b == 2)) && (c == 3)
//! ```
//!
//! ### Reserved Words
//!
//! `true`, `false` and `null` parse as plain identifiers; giving them meaning
//! is up to the evaluator.
pub mod expressions;
pub mod operators;
pub mod query;
pub mod tokens;

pub use expressions::{LiteralKind, Node};
pub use operators::{BinOp, UnaryOp};
pub use query::Query;
pub use tokens::Token;
