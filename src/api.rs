//! External API (§6): the three entry points library consumers call —
//! `Parse`, `ParseArgument`, `BuildTableau` — plus the stats/tree shapes
//! are already exposed straight off [`crate::proof::Tableau`].

use crate::error::Error;
use crate::lexicals::{Argument, PredicateStore, Sentence};
use crate::logic::registry;
use crate::parser::{self, Notation};
use crate::proof::{Options, Tableau};

/// Parse a single surface string into a [`Sentence`] (spec.md §6 `Parse`).
pub fn parse(notation: Notation, predicates: &mut PredicateStore, text: &str) -> Result<Sentence, Error> {
    parser::parse(notation, predicates, text)
}

/// Parse premises and a conclusion into an [`Argument`] (spec.md §6
/// `ParseArgument`). Premises are parsed in order before the conclusion so
/// that user predicates declared by an earlier premise are already in
/// `predicates` when a later sentence reuses them.
pub fn parse_argument(
    notation: Notation,
    predicates: &mut PredicateStore,
    conclusion: &str,
    premises: &[&str],
    title: Option<&str>,
) -> Result<Argument, Error> {
    let premises = premises
        .iter()
        .map(|p| parser::parse(notation, predicates, p))
        .collect::<Result<Vec<_>, _>>()?;
    let conclusion = parser::parse(notation, predicates, conclusion)?;
    let mut argument = Argument::new(premises, conclusion);
    if let Some(title) = title {
        argument = argument.with_title(title);
    }
    Ok(argument)
}

/// Resolve `logic_name` and open a fresh [`Tableau`] over `argument`
/// (spec.md §6 `BuildTableau`). Does not itself call `build()`/`step()` —
/// callers drive the tableau's own lifecycle from the returned `New` state.
pub fn build_tableau(logic_name: &str, argument: Argument, options: Options) -> Result<Tableau, Error> {
    let bundle = registry::lookup(logic_name)?;
    Ok(Tableau::open(bundle, argument, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_argument_then_build_tableau_end_to_end() {
        let mut predicates = PredicateStore::new();
        let argument = parse_argument(
            Notation::Polish,
            &mut predicates,
            "a",
            &["Aab", "Nb"],
            Some("Disjunctive Syllogism"),
        )
        .unwrap();
        let mut tableau = build_tableau("CPL", argument, Options::default()).unwrap();
        tableau.build().unwrap();
        assert_eq!(tableau.open_branches().count(), 0);
    }

    #[test]
    fn unknown_logic_name_surfaces_as_error() {
        let mut predicates = PredicateStore::new();
        let argument = parse_argument(Notation::Polish, &mut predicates, "a", &[], None).unwrap();
        let err = build_tableau("NOT-A-LOGIC", argument, Options::default()).unwrap_err();
        assert!(matches!(err, Error::Logic(_)));
    }
}
