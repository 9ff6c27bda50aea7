//! `logos`-generated token kinds for the two notations, plus the shared
//! position-tracking wrapper the recursive-descent readers scan over.
//!
//! Both notations tokenize eagerly into a `Vec<Scanned<_>>` rather than
//! streaming, since Standard's paren-scanning (§4.2) needs unbounded
//! lookahead to find the depth-one binary operator before it can decide
//! how to split the lhs/rhs — materializing the token list makes that a
//! plain index scan instead of a lexer checkpoint/restore dance.

use logos::Logos;
use text_size::TextSize;

/// A scanned token: its kind, source slice, and byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scanned<K> {
    pub kind: K,
    pub offset: TextSize,
}

/// Tokenize `input` with logos token kind `K`, recording byte offsets.
/// Any byte the lexer can't classify surfaces as `K::ERROR` via logos's
/// `Result::Err(())`, mapped by the caller.
pub fn scan<'a, K>(input: &'a str) -> Vec<(Result<K, ()>, &'a str, TextSize)>
where
    K: Logos<'a, Source = str> + Copy,
{
    let mut lexer = K::lexer(input);
    let mut out = Vec::new();
    while let Some(tok) = lexer.next() {
        let span = lexer.span();
        out.push((tok, lexer.slice(), TextSize::new(span.start as u32)));
    }
    out
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolishToken {
    #[token("a")]
    #[token("b")]
    #[token("c")]
    #[token("d")]
    #[token("e")]
    Atomic,

    #[token("N")]
    #[token("K")]
    #[token("A")]
    #[token("C")]
    #[token("E")]
    #[token("U")]
    #[token("B")]
    #[token("T")]
    #[token("M")]
    #[token("L")]
    Operator,

    #[token("V")]
    #[token("S")]
    Quantifier,

    #[token("x")]
    #[token("y")]
    #[token("z")]
    #[token("v")]
    Variable,

    #[token("m")]
    #[token("n")]
    #[token("o")]
    #[token("s")]
    Constant,

    #[token("F")]
    #[token("G")]
    #[token("H")]
    #[token("O")]
    UserPredicate,

    #[token("I")]
    SystemIdentity,

    #[token("J")]
    SystemExistence,

    #[regex(r"[0-9]+")]
    Digits,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardToken {
    #[token("A")]
    #[token("B")]
    #[token("C")]
    #[token("D")]
    #[token("E")]
    Atomic,

    #[token("~")]
    NegationPrefix,
    #[token("*")]
    AssertionPrefix,
    #[token("P")]
    PossibilityPrefix,
    #[token("N")]
    NecessityPrefix,

    #[token("&")]
    Conjunction,
    #[token("V")]
    Disjunction,
    #[token(">")]
    MaterialConditional,
    #[token("<")]
    MaterialBiconditional,
    #[token("$")]
    Conditional,
    #[token("%")]
    Biconditional,

    #[token("L")]
    Universal,
    #[token("X")]
    Existential,

    #[token("x")]
    #[token("y")]
    #[token("z")]
    #[token("v")]
    Variable,

    #[token("a")]
    #[token("b")]
    #[token("c")]
    #[token("d")]
    Constant,

    #[token("F")]
    #[token("G")]
    #[token("H")]
    #[token("O")]
    UserPredicate,

    #[token("=")]
    Identity,
    #[token("!")]
    Existence,

    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,

    #[regex(r"[0-9]+")]
    Digits,

    #[regex(r"[ \t\r\n]+", logos::skip)]
    Whitespace,
}
