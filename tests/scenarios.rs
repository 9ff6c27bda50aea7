//! End-to-end scenarios from spec.md §8 "Concrete end-to-end scenarios",
//! run through the public API rather than any internal engine type.

use rstest::rstest;

use tableaux::lexicals::Operator;
use tableaux::logic::registry::lookup;
use tableaux::model::value::Value;
use tableaux::proof::{Options, StatResult, TabFlag};
use tableaux::{parse_argument, Argument, Notation, PredicateStore, Sentence};

fn polish_argument(conclusion: &str, premises: &[&str]) -> Argument {
    let mut predicates = PredicateStore::new();
    parse_argument(Notation::Polish, &mut predicates, conclusion, premises, None).unwrap()
}

#[test]
fn disjunctive_syllogism_cpl_is_valid_with_two_closed_branches() {
    let argument = polish_argument("a", &["Aab", "Nb"]);
    let bundle = lookup("CPL").unwrap();
    let mut tableau = tableaux::proof::Tableau::open(bundle, argument, Options::default());
    tableau.build().unwrap();
    assert_eq!(tableau.stats().result, StatResult::Valid);
    assert_eq!(tableau.open_branches().count(), 0);
    assert_eq!(tableau.closed_branches().count(), 2);
}

#[test]
fn law_of_excluded_middle_is_invalid_in_k3_with_a_neither_countermodel() {
    let argument = polish_argument("AaNa", &[]);
    let mut tableau = tableaux::build_tableau("K3", argument, Options::default()).unwrap();
    tableau.build().unwrap();
    assert_eq!(tableau.stats().result, StatResult::Invalid);
    let a = Sentence::atomic(0, 0);
    let has_neither_model = tableau
        .models()
        .iter()
        .any(|(_, m)| m.value_of(&a).ok() == Some(Value::N));
    assert!(has_neither_model, "expected at least one countermodel with a = N");
}

#[test]
fn addition_is_valid_in_fde() {
    let argument = polish_argument("Aab", &["a"]);
    let mut tableau = tableaux::build_tableau("FDE", argument, Options::default()).unwrap();
    tableau.build().unwrap();
    assert_eq!(tableau.stats().result, StatResult::Valid);
}

#[test]
fn affirming_a_disjunct_is_invalid_in_cpl_with_a_true_b_false_countermodel() {
    let argument = polish_argument("b", &["Aab", "a"]);
    let mut tableau = tableaux::build_tableau("CPL", argument, Options::default()).unwrap();
    tableau.build().unwrap();
    assert_eq!(tableau.stats().result, StatResult::Invalid);
    let a = Sentence::atomic(0, 0);
    let b = Sentence::atomic(1, 0);
    let matches = tableau.models().iter().any(|(_, m)| {
        m.value_of(&a).ok() == Some(Value::T) && m.value_of(&b).ok() == Some(Value::F)
    });
    assert!(matches, "expected a countermodel assigning a=T, b=F");
}

#[test]
fn necessity_elimination_is_valid_in_t_and_seeds_world_zero() {
    let argument = polish_argument("a", &["La"]);
    let mut tableau = tableaux::build_tableau("T", argument, Options::default()).unwrap();
    tableau.build_trunk().unwrap();
    let trunk_branch = tableau.branches().next().unwrap();
    assert!(trunk_branch.nodes().iter().count() >= 2);
    tableau.build().unwrap();
    assert_eq!(tableau.stats().result, StatResult::Valid);
    assert!(tableau.flags().is_trunk_built());
}

#[test]
fn standard_notation_parses_conjunction_disjunction_universal_identity() {
    let mut predicates = PredicateStore::new();
    // spec.md §8 writes this scenario's identity atom as prefix "=xy", but
    // §4.2's own infix-predication rule reserves infix for arity >= 2 and
    // prefix for arity 1 only — Identity is arity 2, so the grammar it
    // defines requires "x=y" here; see DESIGN.md.
    let sentence = tableaux::parse(
        Notation::Standard,
        &mut predicates,
        "((A & B) V LxLy(x=y > !a))",
    )
    .unwrap();
    assert_eq!(sentence.operator(), Some(Operator::Disjunction));
    let Sentence::Operated(disjunction) = &sentence else {
        panic!("expected a disjunction");
    };
    let right = &disjunction.operands[1];
    assert_eq!(right.quantifier(), Some(tableaux::lexicals::Quantifier::Universal));
    let Sentence::Quantified(outer) = right.as_ref() else {
        panic!("expected a universal quantifier");
    };
    assert_eq!(
        outer.body.quantifier(),
        Some(tableaux::lexicals::Quantifier::Universal)
    );
    let Sentence::Quantified(inner) = outer.body.as_ref() else {
        panic!("expected a nested universal quantifier");
    };
    assert_eq!(inner.body.operator(), Some(Operator::MaterialConditional));
    let Sentence::Operated(conditional) = inner.body.as_ref() else {
        panic!("expected a material conditional");
    };
    assert!(conditional.operands[0].is_predicated());
    assert_eq!(
        conditional.operands[0].predicate().unwrap().index,
        tableaux::lexicals::IDENTITY_INDEX
    );
}

#[test]
fn bound_variable_rebinding_fails_in_both_notations() {
    let mut predicates = PredicateStore::new();
    predicates.declare(0, 0, 1, "F").unwrap();
    let polish_err = tableaux::parse(Notation::Polish, &mut predicates, "VxVxFx").unwrap_err();
    assert!(matches!(
        polish_err,
        tableaux::Error::Parse(tableaux::error::ParseError::BoundVariable { .. })
    ));

    let mut predicates = PredicateStore::new();
    predicates.declare(0, 0, 1, "F").unwrap();
    let standard_err =
        tableaux::parse(Notation::Standard, &mut predicates, "LxLx(Fx)").unwrap_err();
    assert!(matches!(
        standard_err,
        tableaux::Error::Parse(tableaux::error::ParseError::BoundVariable { .. })
    ));
}

#[rstest]
#[case::cpl("CPL")]
#[case::fde("FDE")]
#[case::k3("K3")]
#[case::lp("LP")]
#[case::k3w("K3W")]
#[case::b3e("B3E")]
#[case::rm3("RM3")]
fn every_many_valued_logic_resolves_and_builds(#[case] name: &str) {
    let argument = polish_argument("a", &[]);
    let mut tableau = tableaux::build_tableau(name, argument, Options::default()).unwrap();
    tableau.build().unwrap();
    assert!(tableau.flags().contains(TabFlag::Finished));
}

/// `La ⊢ a` ("Necessity Elimination" without reflexivity) is invalid in the
/// non-reflexive logics (K, D) and valid in the reflexive ones (T, S4, S5).
/// Asserting the actual `StatResult` rather than just `TabFlag::Finished`
/// matters here: a serial-but-not-reflexive logic like D can "finish" by
/// running out of `max_steps` without ever deciding, which would pass a
/// weaker assertion while still being wrong.
#[rstest]
#[case::k("K", StatResult::Invalid)]
#[case::d("D", StatResult::Invalid)]
#[case::t("T", StatResult::Valid)]
#[case::s4("S4", StatResult::Valid)]
#[case::s5("S5", StatResult::Valid)]
fn every_modal_logic_resolves_and_builds(#[case] name: &str, #[case] expected: StatResult) {
    let argument = polish_argument("a", &["La"]);
    let mut tableau = tableaux::build_tableau(name, argument, Options::default()).unwrap();
    tableau.build().unwrap();
    assert!(tableau.flags().contains(TabFlag::Finished));
    assert_eq!(tableau.stats().result, expected);
}

/// Regression for the serial-frame access rule: D is serial but not
/// reflexive, so a naive "always mint a new world" implementation of
/// seriality never stops expanding and this would time out against
/// `max_steps` instead of deciding Invalid.
#[test]
fn serial_access_terminates_without_exhausting_max_steps() {
    let argument = polish_argument("a", &["La"]);
    let options = Options {
        max_steps: Some(200),
        ..Options::default()
    };
    let mut tableau = tableaux::build_tableau("D", argument, options).unwrap();
    tableau.build().unwrap();
    assert_eq!(tableau.stats().result, StatResult::Invalid);
    assert!(!tableau.flags().contains(TabFlag::Premature));
}

#[test]
fn cfol_handles_a_quantified_syllogism() {
    let argument = polish_argument("VxCFxHx", &["VxCFxGx", "VxCGxHx"]);
    let mut tableau = tableaux::build_tableau("CFOL", argument, Options::default()).unwrap();
    tableau.build().unwrap();
    assert_eq!(tableau.stats().result, StatResult::Valid);
}

#[test]
fn corpus_lookup_feeds_a_buildable_tableau() {
    let argument = tableaux::corpus::argument("DeMorgan 1").expect("corpus entry exists");
    let mut tableau =
        tableaux::build_tableau("CPL", argument.clone(), Options::default()).unwrap();
    tableau.build().unwrap();
    assert_eq!(tableau.stats().result, StatResult::Valid);
}
