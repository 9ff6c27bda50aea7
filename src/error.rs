//! Crate-wide error taxonomy.
//!
//! Each layer (parsing, logic lookup, engine, model, configuration) owns a
//! `thiserror`-derived enum; [`Error`] aggregates them behind `#[from]` so
//! callers crossing layer boundaries can use `?` without manual mapping.

use text_size::TextSize;
use thiserror::Error;

use crate::proof::Target;

/// Errors produced while tokenizing or reading a surface string into a
/// [`crate::lexicals::Sentence`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected character {found:?} at position {pos:?}")]
    UnexpectedChar { found: char, pos: TextSize },

    #[error("unexpected end of input at position {pos:?}")]
    UnexpectedEOF { pos: TextSize },

    #[error("variable already bound by an ancestor quantifier at position {pos:?}")]
    BoundVariable { pos: TextSize },

    #[error("variable used outside any binding quantifier at position {pos:?}")]
    UnboundVariable { pos: TextSize },

    #[error("unterminated parenthesis opened at position {pos:?}")]
    UnterminatedParen { pos: TextSize },
}

impl ParseError {
    pub fn pos(&self) -> TextSize {
        match *self {
            ParseError::UnexpectedChar { pos, .. }
            | ParseError::UnexpectedEOF { pos }
            | ParseError::BoundVariable { pos }
            | ParseError::UnboundVariable { pos }
            | ParseError::UnterminatedParen { pos } => pos,
        }
    }
}

/// Errors produced when resolving a logic name to its registered bundle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogicError {
    #[error("unknown logic {0:?}")]
    UnknownLogic(String),
}

/// Errors produced by the tableau engine while building or stepping.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("illegal state: {0}")]
    IllegalState(&'static str),

    #[error("build timed out after {0}ms")]
    Timeout(u64),

    #[error("max_steps exhausted after {0} steps")]
    StepsExhausted(usize),

    #[error("rule {rule} failed to apply to target {target:?}")]
    RuleApplicationFailed { rule: String, target: Box<Target> },
}

/// Errors produced while reading a branch into a model or checking it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("no denotation for term in domain: {0}")]
    DenotationError(String),

    #[error("invalid model value: {0}")]
    ModelValueError(String),
}

/// Errors produced while building configuration (predicate stores, options,
/// logic registration).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("missing value for: {0}")]
    MissingValue(String),

    #[error("value conflict for {key}: {old} != {new}")]
    ValueConflict {
        key: String,
        old: String,
        new: String,
    },
}

/// Top-level crate error, aggregating every layer's taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Logic(#[from] LogicError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
