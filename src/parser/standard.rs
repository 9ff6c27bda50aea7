//! Standard (infix) notation (§4.2): binary operators infix, unary operators
//! prefix, outer parens optional (retried once on failure), infix
//! predication for arity ≥ 2.

use text_size::TextSize;

use super::tokens::{scan, StandardToken as Tok};
use super::BoundScope;
use crate::error::{ConfigError, Error, ParseError};
use crate::lexicals::{
    Operator, Predicate, PredicateStore, Quantifier, Sentence, Symbol, Term, EXISTENCE_INDEX,
    IDENTITY_INDEX,
};

const ATOMIC: [char; 5] = ['A', 'B', 'C', 'D', 'E'];
const VARIABLE: [char; 4] = ['x', 'y', 'z', 'v'];
const CONSTANT: [char; 4] = ['a', 'b', 'c', 'd'];
const USER_PREDICATE: [char; 4] = ['F', 'G', 'H', 'O'];

fn index_of(alphabet: &[char], c: char) -> u8 {
    alphabet.iter().position(|&a| a == c).unwrap() as u8
}

fn binary_operator(kind: Tok) -> Option<Operator> {
    use Operator::*;
    Some(match kind {
        Tok::Conjunction => Conjunction,
        Tok::Disjunction => Disjunction,
        Tok::MaterialConditional => MaterialConditional,
        Tok::MaterialBiconditional => MaterialBiconditional,
        Tok::Conditional => Conditional,
        Tok::Biconditional => Biconditional,
        _ => return None,
    })
}

fn binary_operator_char(op: Operator) -> char {
    use Operator::*;
    match op {
        Conjunction => '&',
        Disjunction => 'V',
        MaterialConditional => '>',
        MaterialBiconditional => '<',
        Conditional => '$',
        Biconditional => '%',
        _ => unreachable!("not a binary operator"),
    }
}

fn unary_operator(kind: Tok) -> Option<Operator> {
    use Operator::*;
    Some(match kind {
        Tok::NegationPrefix => Negation,
        Tok::AssertionPrefix => Assertion,
        Tok::PossibilityPrefix => Possibility,
        Tok::NecessityPrefix => Necessity,
        _ => return None,
    })
}

fn unary_operator_char(op: Operator) -> char {
    use Operator::*;
    match op {
        Negation => '~',
        Assertion => '*',
        Possibility => 'P',
        Necessity => 'N',
        _ => unreachable!("not a unary operator"),
    }
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

    fn at(&self, idx: usize) -> Result<(Tok, &'a str, TextSize), ParseError> {
        match self.toks.get(idx) {
            Some((Ok(k), s, p)) => Ok((*k, s, *p)),
            Some((Err(()), s, p)) => Err(ParseError::UnexpectedChar {
                found: s.chars().next().unwrap(),
                pos: *p,
            }),
            None => Err(ParseError::UnexpectedEOF { pos: self.eof_pos() }),
        }
    }

    fn current(&self) -> Result<(Tok, &'a str, TextSize), ParseError> {
        self.at(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

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

fn lookup_predicate(
    predicates: &mut PredicateStore,
    kind: Tok,
    index: i32,
    subscript: u32,
    char_for_error: char,
) -> Result<Predicate, Error> {
    match kind {
        Tok::Identity => Ok(predicates.declare(IDENTITY_INDEX, 0, 2, "Identity")?),
        Tok::Existence => Ok(predicates.declare(EXISTENCE_INDEX, 0, 1, "Existence")?),
        Tok::UserPredicate => predicates.get(index, subscript).cloned().ok_or_else(|| {
            Error::Config(ConfigError::MissingValue(format!(
                "undeclared predicate {char_for_error}{subscript}"
            )))
        }),
        _ => unreachable!("lookup_predicate called with a non-predicate token"),
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

/// Prefix predication: the predicate symbol is read first, then exactly
/// `arity` parameters. Only valid when the predicate's declared arity is 1
/// (spec.md §4.2: "prefix predication is used for arity 1").
fn read_prefix_predicate_sentence(
    r: &mut Reader<'_>,
    predicates: &mut PredicateStore,
) -> Result<Sentence, Error> {
    let (kind, text, pos) = r.current()?;
    let c = text.chars().next().unwrap();
    let index = if kind == Tok::UserPredicate {
        index_of(&USER_PREDICATE, c) as i32
    } else {
        0
    };
    r.advance();
    let subscript = r.read_subscript();
    let predicate = lookup_predicate(predicates, kind, index, subscript, c)?;
    if predicate.arity != 1 {
        return Err(ParseError::UnexpectedChar { found: c, pos }.into());
    }
    let param = read_parameter(r)?;
    Ok(Sentence::predicated(predicate, vec![param]))
}

/// Infix predication: a parameter precedes a predicate of arity ≥ 2, e.g.
/// `a = b` or `a F b c`.
fn read_infix_predicate_sentence(
    r: &mut Reader<'_>,
    predicates: &mut PredicateStore,
) -> Result<Sentence, Error> {
    let first = read_parameter(r)?;
    let (kind, text, ppos) = r.current()?;
    if !matches!(kind, Tok::UserPredicate | Tok::Identity) {
        let c = text.chars().next().unwrap();
        return Err(ParseError::UnexpectedChar { found: c, pos: ppos }.into());
    }
    let c = text.chars().next().unwrap();
    let index = if kind == Tok::UserPredicate {
        index_of(&USER_PREDICATE, c) as i32
    } else {
        0
    };
    r.advance();
    let subscript = r.read_subscript();
    let predicate = lookup_predicate(predicates, kind, index, subscript, c)?;
    if predicate.arity < 2 {
        return Err(ParseError::UnexpectedChar { found: c, pos: ppos }.into());
    }
    let mut params = vec![first];
    for _ in 0..(predicate.arity - 1) {
        params.push(read_parameter(r)?);
    }
    Ok(Sentence::predicated(predicate, params))
}

/// Scan ahead from an open paren (at `r.pos`) to find the matching close
/// paren and the single depth-one binary operator between them, without
/// consuming tokens (§4.2's left-to-right depth-one scan). Returns
/// `(close_paren_token_idx, operator_token_idx, operator)`.
fn scan_parenthetical(r: &Reader<'_>) -> Result<(usize, usize, Operator), Error> {
    let open_pos = r.toks[r.pos].2;
    let mut depth = 1i32;
    let mut idx = r.pos + 1;
    let mut operator: Option<(usize, Operator)> = None;
    loop {
        let (kind, text, pos) = r.at(idx).map_err(|e| match e {
            ParseError::UnexpectedEOF { .. } => {
                Error::Parse(ParseError::UnterminatedParen { pos: open_pos })
            }
            other => other.into(),
        })?;
        match kind {
            Tok::ParenClose => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Tok::ParenOpen => depth += 1,
            _ => {
                if depth == 1 {
                    if let Some(op) = binary_operator(kind) {
                        if operator.is_some() {
                            return Err(ParseError::UnexpectedChar {
                                found: text.chars().next().unwrap(),
                                pos,
                            }
                            .into());
                        }
                        operator = Some((idx, op));
                    }
                }
            }
        }
        idx += 1;
    }
    let close_idx = idx;
    if close_idx == r.pos + 1 {
        return Err(ParseError::UnterminatedParen { pos: open_pos }.into());
    }
    match operator {
        Some((op_idx, op)) => Ok((close_idx, op_idx, op)),
        None => Err(ParseError::UnexpectedChar {
            found: ')',
            pos: r.toks[close_idx].2,
        }
        .into()),
    }
}

fn read_from_open_paren(
    r: &mut Reader<'_>,
    predicates: &mut PredicateStore,
) -> Result<Sentence, Error> {
    let (close_idx, operator_idx, operator) = scan_parenthetical(r)?;
    r.advance(); // past '('
    let lhs = read_sentence(r, predicates)?;
    if r.pos != operator_idx {
        let (_, text, pos) = r.current()?;
        return Err(ParseError::UnexpectedChar {
            found: text.chars().next().unwrap(),
            pos,
        }
        .into());
    }
    r.advance(); // past operator
    let rhs = read_sentence(r, predicates)?;
    let (kind, text, pos) = r.current()?;
    if kind != Tok::ParenClose || r.pos != close_idx {
        return Err(ParseError::UnexpectedChar {
            found: text.chars().next().unwrap(),
            pos,
        }
        .into());
    }
    r.advance(); // past ')'
    Ok(Sentence::operated(operator, vec![lhs, rhs]))
}

fn read_sentence(r: &mut Reader<'_>, predicates: &mut PredicateStore) -> Result<Sentence, Error> {
    let (kind, text, pos) = r.current()?;
    let c = text.chars().next().unwrap();
    if let Some(op) = unary_operator(kind) {
        r.advance();
        let operand = read_sentence(r, predicates)?;
        return Ok(Sentence::operated(op, vec![operand]));
    }
    match kind {
        Tok::ParenOpen => read_from_open_paren(r, predicates),
        Tok::Variable | Tok::Constant => read_infix_predicate_sentence(r, predicates),
        Tok::UserPredicate | Tok::Identity | Tok::Existence => {
            read_prefix_predicate_sentence(r, predicates)
        }
        Tok::Atomic => {
            r.advance();
            let subscript = r.read_subscript();
            Ok(Sentence::atomic(index_of(&ATOMIC, c), subscript))
        }
        Tok::Universal | Tok::Existential => {
            r.advance();
            let quantifier = if kind == Tok::Universal {
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
        _ => Err(ParseError::UnexpectedChar { found: c, pos }.into()),
    }
}

pub struct Standard;

impl Standard {
    pub fn parse(predicates: &mut PredicateStore, text: &str) -> Result<Sentence, Error> {
        match Self::parse_once(predicates, text) {
            Ok(s) => Ok(s),
            Err(first_err) => {
                let wrapped = format!("({text})");
                match Self::parse_once(predicates, &wrapped) {
                    Ok(s) => Ok(s),
                    Err(_) => Err(first_err),
                }
            }
        }
    }

    fn parse_once(predicates: &mut PredicateStore, text: &str) -> Result<Sentence, Error> {
        let mut r = Reader::new(text);
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
            let is_identity = p.predicate.index == IDENTITY_INDEX;
            let is_existence = p.predicate.index == EXISTENCE_INDEX;
            if p.predicate.arity < 2 {
                if is_existence {
                    out.push('!');
                } else {
                    write_symbol(out, USER_PREDICATE[p.predicate.index as usize], p.predicate.subscript);
                }
                write_term(out, &p.parameters[0]);
            } else {
                write_term(out, &p.parameters[0]);
                if is_identity {
                    out.push('=');
                } else {
                    write_symbol(out, USER_PREDICATE[p.predicate.index as usize], p.predicate.subscript);
                }
                for param in &p.parameters[1..] {
                    write_term(out, param);
                }
            }
        }
        Sentence::Quantified(q) => {
            out.push(if q.quantifier == Quantifier::Universal { 'L' } else { 'X' });
            write_symbol(out, VARIABLE[q.variable.index as usize], q.variable.subscript);
            write_into(&q.body, out);
        }
        Sentence::Operated(o) if o.operator.arity() == 1 => {
            out.push(unary_operator_char(o.operator));
            write_into(&o.operands[0], out);
        }
        Sentence::Operated(o) => {
            out.push('(');
            write_into(&o.operands[0], out);
            out.push(binary_operator_char(o.operator));
            write_into(&o.operands[1], out);
            out.push(')');
        }
    }
}

fn write_term(out: &mut String, t: &Term) {
    match t {
        Term::Constant(sym) => write_symbol(out, CONSTANT[sym.index as usize], sym.subscript),
        Term::Variable(sym) => write_symbol(out, VARIABLE[sym.index as usize], sym.subscript),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_identity_and_quantifier_example() {
        let mut preds = PredicateStore::new();
        let s = Standard::parse(&mut preds, "((A & B) V LxLy(x=y > !a))").unwrap();
        assert!(s.is_operated());
        let o = match &s {
            Sentence::Operated(o) => o,
            _ => unreachable!(),
        };
        assert_eq!(o.operator, Operator::Disjunction);
        let rhs = &o.operands[1];
        assert!(rhs.is_quantified());
    }

    #[test]
    fn outer_parens_are_optional() {
        let mut preds = PredicateStore::new();
        let a = Standard::parse(&mut preds, "A & B").unwrap();
        let b = Standard::parse(&mut preds, "(A & B)").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rebinding_bound_variable_is_an_error() {
        let mut preds = PredicateStore::new();
        let err = Standard::parse(&mut preds, "LxLxFx").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::BoundVariable { .. })));
    }

    #[test]
    fn round_trip_write_then_parse() {
        let mut preds = PredicateStore::new();
        preds.declare(0, 0, 1, "F").unwrap();
        for text in ["(A & B)", "~A", "(A V ~B)"] {
            let s = Standard::parse(&mut preds, text).unwrap();
            let written = Standard::write(&s);
            let s2 = Standard::parse(&mut preds, &written).unwrap();
            assert_eq!(s, s2);
        }
    }

    #[test]
    fn two_depth_one_binary_operators_is_an_error() {
        let mut preds = PredicateStore::new();
        let err = Standard::parse(&mut preds, "(A & B & C)").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::UnexpectedChar { .. })));
    }
}
