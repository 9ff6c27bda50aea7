//! Polish (prefix) notation (§4.2).

use text_size::TextSize;

use super::tokens::{scan, PolishToken as Tok};
use super::BoundScope;
use crate::error::{ConfigError, Error, ParseError};
use crate::lexicals::{Operator, Predicate, PredicateStore, Quantifier, Sentence, Symbol, Term};

const ATOMIC: [char; 5] = ['a', 'b', 'c', 'd', 'e'];
const VARIABLE: [char; 4] = ['x', 'y', 'z', 'v'];
const CONSTANT: [char; 4] = ['m', 'n', 'o', 's'];
const USER_PREDICATE: [char; 4] = ['F', 'G', 'H', 'O'];

fn operator_of(c: char) -> Operator {
    use Operator::*;
    match c {
        'N' => Negation,
        'K' => Conjunction,
        'A' => Disjunction,
        'C' => MaterialConditional,
        'E' => MaterialBiconditional,
        'U' => Conditional,
        'B' => Biconditional,
        'T' => Assertion,
        'M' => Possibility,
        'L' => Necessity,
        _ => unreachable!("logos only emits Operator for these chars"),
    }
}

fn operator_char(op: Operator) -> char {
    use Operator::*;
    match op {
        Negation => 'N',
        Conjunction => 'K',
        Disjunction => 'A',
        MaterialConditional => 'C',
        MaterialBiconditional => 'E',
        Conditional => 'U',
        Biconditional => 'B',
        Assertion => 'T',
        Possibility => 'M',
        Necessity => 'L',
    }
}

fn index_of(alphabet: &[char], c: char) -> u8 {
    alphabet.iter().position(|&a| a == c).unwrap() as u8
}

struct Reader<'a> {
    input: &'a str,
    toks: Vec<(Result<Tok, ()>, &'a str, TextSize)>,
    pos: usize,
    bound: BoundScope,
}

impl<'a> Reader<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            toks: scan::<Tok>(input),
            pos: 0,
            bound: BoundScope::default(),
        }
    }

    fn eof_pos(&self) -> TextSize {
        TextSize::new(self.input.len() as u32)
    }

    fn current(&self) -> Result<(Tok, &'a str, TextSize), ParseError> {
        match self.toks.get(self.pos) {
            Some((Ok(k), s, p)) => Ok((*k, s, *p)),
            Some((Err(()), s, p)) => Err(ParseError::UnexpectedChar {
                found: s.chars().next().unwrap(),
                pos: *p,
            }),
            None => Err(ParseError::UnexpectedEOF { pos: self.eof_pos() }),
        }
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Read an optional run of digits immediately following the current
    /// position, returning 0 if absent.
    fn read_subscript(&mut self) -> u32 {
        if let Some((Ok(Tok::Digits), s, _)) = self.toks.get(self.pos) {
            let n: u32 = s.parse().unwrap_or(0);
            self.advance();
            n
        } else {
            0
        }
    }

}

/// Read a predicate symbol (user or system) plus its subscript, consulting
/// `predicates` for the declared arity. User predicates must already be
/// declared in `predicates` (spec.md §3: "user predicates are declared per
/// parse session") — arity can't be inferred from Polish prefix notation
/// alone, since nothing marks where a predicate's parameter list ends.
fn read_predicate(
    r: &mut Reader<'_>,
    predicates: &mut PredicateStore,
) -> Result<Predicate, Error> {
    let (kind, text, pos) = r.current()?;
    let c = text.chars().next().unwrap();
    r.advance();
    match kind {
        Tok::SystemIdentity => {
            let subscript = r.read_subscript();
            let _ = subscript; // system predicates are subscript-0 singletons
            Ok(predicates.declare(crate::lexicals::IDENTITY_INDEX, 0, 2, "Identity")?)
        }
        Tok::SystemExistence => {
            let subscript = r.read_subscript();
            let _ = subscript;
            Ok(predicates.declare(crate::lexicals::EXISTENCE_INDEX, 0, 1, "Existence")?)
        }
        Tok::UserPredicate => {
            let index = index_of(&USER_PREDICATE, c) as i32;
            let subscript = r.read_subscript();
            predicates
                .get(index, subscript)
                .cloned()
                .ok_or_else(|| {
                    Error::Config(ConfigError::MissingValue(format!(
                        "undeclared predicate {c}{subscript}"
                    )))
                })
        }
        _ => Err(ParseError::UnexpectedChar { found: c, pos }.into()),
    }
}

fn read_parameter(r: &mut Reader<'_>) -> Result<Term, Error> {
    let (kind, text, pos) = r.current()?;
    let c = text.chars().next().unwrap();
    match kind {
        Tok::Constant => {
            r.advance();
            let subscript = r.read_subscript();
            Ok(Term::Constant(Symbol::new(index_of(&CONSTANT, c), subscript)))
        }
        Tok::Variable => {
            r.advance();
            let subscript = r.read_subscript();
            let sym = Symbol::new(index_of(&VARIABLE, c), subscript);
            r.bound.require_bound(sym, pos)?;
            Ok(Term::Variable(sym))
        }
        _ => Err(ParseError::UnexpectedChar { found: c, pos }.into()),
    }
}

fn read_predicated(
    r: &mut Reader<'_>,
    predicates: &mut PredicateStore,
) -> Result<Sentence, Error> {
    let predicate = read_predicate(r, predicates)?;
    let mut params = Vec::with_capacity(predicate.arity as usize);
    for _ in 0..predicate.arity {
        params.push(read_parameter(r)?);
    }
    Ok(Sentence::predicated(predicate, params))
}

/// Entry point driving the recursive descent, dispatching predicate reads
/// (which need `predicates`) separately from the rest of `Reader::read`.
fn read_sentence(
    r: &mut Reader<'_>,
    predicates: &mut PredicateStore,
) -> Result<Sentence, Error> {
    let (kind, _, _) = r.current()?;
    match kind {
        Tok::UserPredicate | Tok::SystemIdentity | Tok::SystemExistence => {
            read_predicated(r, predicates)
        }
        Tok::Operator => {
            let (_, text, _) = r.current()?;
            let c = text.chars().next().unwrap();
            r.advance();
            let op = operator_of(c);
            let mut operands = Vec::with_capacity(op.arity() as usize);
            for _ in 0..op.arity() {
                operands.push(read_sentence(r, predicates)?);
            }
            Ok(Sentence::operated(op, operands))
        }
        Tok::Quantifier => {
            let (_, text, _) = r.current()?;
            let c = text.chars().next().unwrap();
            r.advance();
            let quantifier = if c == 'V' {
                Quantifier::Universal
            } else {
                Quantifier::Existential
            };
            let (vkind, vtext, vpos) = r.current()?;
            if vkind != Tok::Variable {
                return Err(ParseError::UnexpectedChar {
                    found: vtext.chars().next().unwrap(),
                    pos: vpos,
                }
                .into());
            }
            r.advance();
            let vchar = vtext.chars().next().unwrap();
            let subscript = r.read_subscript();
            let variable = Symbol::new(index_of(&VARIABLE, vchar), subscript);
            r.bound.enter(variable, vpos)?;
            let body = read_sentence(r, predicates)?;
            r.bound.exit(variable);
            Ok(Sentence::quantified(quantifier, variable, body))
        }
        Tok::Atomic => {
            let (_, text, _) = r.current()?;
            let c = text.chars().next().unwrap();
            r.advance();
            let subscript = r.read_subscript();
            Ok(Sentence::atomic(index_of(&ATOMIC, c), subscript))
        }
        _ => {
            let (_, text, pos) = r.current()?;
            Err(ParseError::UnexpectedChar {
                found: text.chars().next().unwrap(),
                pos,
            }
            .into())
        }
    }
}

pub struct Polish;

impl Polish {
    pub fn parse(predicates: &mut PredicateStore, text: &str) -> Result<Sentence, Error> {
        let trimmed = text.trim_end();
        let mut r = Reader::new(trimmed);
        let sentence = read_sentence(&mut r, predicates)?;
        if r.pos != r.toks.len() {
            let (_, tok_text, pos) = r.current()?;
            return Err(ParseError::UnexpectedChar {
                found: tok_text.chars().next().unwrap(),
                pos,
            }
            .into());
        }
        Ok(sentence)
    }

    pub fn write(sentence: &Sentence) -> String {
        let mut out = String::new();
        write_into(sentence, &mut out);
        out
    }
}

fn write_symbol(out: &mut String, c: char, subscript: u32) {
    out.push(c);
    if subscript > 0 {
        out.push_str(&subscript.to_string());
    }
}

fn write_into(s: &Sentence, out: &mut String) {
    match s {
        Sentence::Atomic(sym) => write_symbol(out, ATOMIC[sym.index as usize], sym.subscript),
        Sentence::Predicated(p) => {
            if p.predicate.index == crate::lexicals::IDENTITY_INDEX {
                out.push('I');
            } else if p.predicate.index == crate::lexicals::EXISTENCE_INDEX {
                out.push('J');
            } else {
                write_symbol(
                    out,
                    USER_PREDICATE[p.predicate.index as usize],
                    p.predicate.subscript,
                );
            }
            for param in &p.parameters {
                match param {
                    Term::Constant(sym) => write_symbol(out, CONSTANT[sym.index as usize], sym.subscript),
                    Term::Variable(sym) => write_symbol(out, VARIABLE[sym.index as usize], sym.subscript),
                }
            }
        }
        Sentence::Quantified(q) => {
            out.push(if q.quantifier == Quantifier::Universal { 'V' } else { 'S' });
            write_symbol(out, VARIABLE[q.variable.index as usize], q.variable.subscript);
            write_into(&q.body, out);
        }
        Sentence::Operated(o) => {
            out.push(operator_char(o.operator));
            for operand in &o.operands {
                write_into(operand, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_disjunctive_syllogism_premises() {
        let mut preds = PredicateStore::new();
        let a = Polish::parse(&mut preds, "Aab").unwrap();
        assert!(a.is_operated());
        let b = Polish::parse(&mut preds, "Nb").unwrap();
        assert!(b.is_negated());
    }

    #[test]
    fn rebinding_bound_variable_is_an_error() {
        let mut preds = PredicateStore::new();
        preds.declare(0, 0, 1, "F").unwrap();
        let err = Polish::parse(&mut preds, "VxVxFx").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::BoundVariable { .. })));
    }

    #[test]
    fn round_trip_write_then_parse() {
        let mut preds = PredicateStore::new();
        preds.declare(0, 0, 1, "F").unwrap();
        for text in ["Aab", "NAab", "KaNb", "VxFx"] {
            let s = Polish::parse(&mut preds, text).unwrap();
            let written = Polish::write(&s);
            let s2 = Polish::parse(&mut preds, &written).unwrap();
            assert_eq!(s, s2);
        }
    }

    #[test]
    fn undeclared_predicate_is_a_config_error() {
        let mut preds = PredicateStore::new();
        let err = Polish::parse(&mut preds, "Fa").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
