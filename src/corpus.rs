//! The named example-argument corpus (SPEC_FULL.md §2, from
//! `original_source/src/examples.py`): roughly ninety arguments, addressable
//! by title or by any of a handful of conventional aliases, looked up
//! case-insensitively with whitespace stripped (spec.md §6 "Argument source
//! for library users").
//!
//! Every sentence is Polish notation parsed against a predicate store that
//! pre-declares the three user predicates the corpus actually uses (`F`,
//! `G`, `H`, all arity 1) so a lookup never hits `ConfigError::MissingValue`.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use crate::lexicals::{Argument, PredicateStore};
use crate::parser::{self, Notation};

/// `(title, premises, conclusion)`. A title with no premises is an
/// argument from the empty set (a validity, not an inference).
type Entry = (&'static str, &'static [&'static str], &'static str);

const ENTRIES: &[Entry] = &[
    ("Addition", &["a"], "Aab"),
    ("Affirming a Disjunct 1", &["Aab", "a"], "b"),
    ("Affirming a Disjunct 2", &["Aab", "a"], "Nb"),
    ("Affirming the Consequent", &["Cab", "b"], "a"),
    ("Assertion Elimination 1", &["Ta"], "a"),
    ("Assertion Elimination 2", &["NTa"], "Na"),
    ("Biconditional Elimination 1", &["Bab", "a"], "b"),
    ("Biconditional Elimination 2", &["Bab", "Na"], "Nb"),
    ("Biconditional Elimination 3", &["NBab", "a"], "Nb"),
    ("Biconditional Identity", &[], "Baa"),
    ("Biconditional Introduction 1", &["a", "b"], "Bab"),
    ("Biconditional Introduction 2", &["Na", "Nb"], "Bab"),
    ("Biconditional Introduction 3", &["a", "Nb"], "NBab"),
    ("Conditional Contraction", &["UaUab"], "Uab"),
    ("Conditional Contraposition 1", &["Uab"], "UNbNa"),
    ("Conditional Contraposition 2", &["UNbNa"], "Uab"),
    ("Conditional Equivalence", &["Uab"], "Uba"),
    ("Conditional Identity", &[], "Uaa"),
    ("Conditional Modus Ponens", &["Uab", "a"], "b"),
    ("Conditional Modus Tollens", &["Uab", "Nb"], "Na"),
    ("Conditional Pseudo Contraction", &[], "UUaUabUab"),
    ("Conditional Pseudo Contraposition", &[], "BUabUNbNa"),
    ("Conjunction Commutativity", &["Kab"], "Kba"),
    ("Conjunction Elimination", &["Kab"], "a"),
    ("Conjunction Introduction", &["a", "b"], "Kab"),
    ("Conjunction Pseudo Commutativity", &[], "BKabKba"),
    ("DeMorgan 1", &["NAab"], "KNaNb"),
    ("DeMorgan 2", &["NKab"], "ANaNb"),
    ("DeMorgan 3", &["KNaNb"], "NAab"),
    ("DeMorgan 4", &["ANaNb"], "NKab"),
    ("DeMorgan 5", &["Aab"], "NKNaNb"),
    ("DeMorgan 6", &["Kab"], "NANaNb"),
    ("DeMorgan 7", &["NKNaNb"], "Aab"),
    ("DeMorgan 8", &["NANaNb"], "Kab"),
    ("Denying the Antecedent", &["Cab", "Na"], "b"),
    ("Disjunction Commutativity", &["Aab"], "Aba"),
    ("Disjunction Pseudo Commutativity", &[], "BAabAba"),
    ("Disjunctive Syllogism", &["Aab", "Nb"], "a"),
    ("Disjunctive Syllogism 2", &["ANab", "Nb"], "Na"),
    ("Existential from Universal", &["SxFx"], "VxFx"),
    ("Existential Syllogism", &["VxCFxGx", "Fn"], "Gn"),
    ("Explosion", &["KaNa"], "b"),
    ("Extracting a Disjunct 1", &["Aab"], "b"),
    ("Extracting a Disjunct 2", &["AaNb"], "Na"),
    ("Extracting the Antecedent", &["Cab"], "a"),
    ("Extracting the Consequent", &["Cab"], "b"),
    ("Identity Indiscernability 1", &["Fm", "Imn"], "Fn"),
    ("Identity Indiscernability 2", &["Fm", "Inm"], "Fn"),
    ("Law of Excluded Middle", &[], "AaNa"),
    ("Law of Non-contradiction", &["KaNa"], "b"),
    ("Material Biconditional Elimination 1", &["Eab", "a"], "b"),
    ("Material Biconditional Elimination 2", &["Eab", "Na"], "Nb"),
    ("Material Biconditional Elimination 3", &["NEab", "a"], "Nb"),
    ("Material Biconditional Identity", &[], "Eaa"),
    ("Material Biconditional Introduction 1", &["a", "b"], "Eab"),
    ("Material Contraction", &["CaCab"], "Cab"),
    ("Material Contraposition 1", &["Cab"], "CNbNa"),
    ("Material Contraposition 2", &["CNbNa"], "Cab"),
    ("Material Identity", &[], "Caa"),
    ("Material Modus Ponens", &["Cab", "a"], "b"),
    ("Material Modus Tollens", &["Cab", "Nb"], "Na"),
    ("Material Pseudo Contraction", &[], "CCaCabCab"),
    ("Material Pseudo Contraposition", &[], "ECabCNbNa"),
    ("Modal Platitude 1", &["Ma"], "Ma"),
    ("Modal Platitude 2", &["La"], "La"),
    ("Modal Platitude 3", &["LMa"], "LMa"),
    ("Modal Transformation 1", &["La"], "NMNa"),
    ("Modal Transformation 2", &["NMNa"], "La"),
    ("Modal Transformation 3", &["NLa"], "MNa"),
    ("Modal Transformation 4", &["MNa"], "NLa"),
    ("Necessity Distribution 1", &[], "ULUabULaLb"),
    ("Necessity Distribution 2", &["LUab"], "ULaLb"),
    ("Necessity Elimination", &["La"], "a"),
    ("NP Collapse 1", &["LMa"], "Ma"),
    ("Possibility Addition", &["a"], "Ma"),
    ("Possibility Distribution", &["KMaMb"], "MKab"),
    ("Quantifier Interdefinability 1", &["VxFx"], "NSxNFx"),
    ("Quantifier Interdefinability 2", &["NVxFx"], "SxNFx"),
    ("Quantifier Interdefinability 3", &["SxFx"], "NVxNFx"),
    ("Quantifier Interdefinability 4", &["NSxFx"], "VxNFx"),
    ("Reflexive Inference 1", &[], "CLaa"),
    ("S4 Conditional Inference 1", &[], "ULaLLa"),
    ("S4 Conditional Inference 2", &["LUaMNb", "Ma"], "MNb"),
    ("S4 Material Inference 1", &[], "CLaLLa"),
    ("S4 Material Inference 2", &["LCaMNb", "Ma"], "MNb"),
    ("S5 Conditional Inference 1", &[], "UaLMa"),
    ("S5 Material Inference 1", &[], "CaLMa"),
    ("Self Identity 1", &[], "Imm"),
    ("Self Identity 2", &[], "VxIxx"),
    ("Serial Inference 1", &[], "ULaMa"),
    ("Serial Inference 2", &["La"], "Ma"),
    ("Simplification", &["Kab"], "a"),
    ("Syllogism", &["VxCFxGx", "VxCGxHx"], "VxCFxHx"),
    ("Triviality 1", &[], "a"),
    ("Triviality 2", &["a"], "b"),
    ("Universal Predicate Syllogism", &["VxVyCFxFy", "Fm"], "Fn"),
    ("Universal from Existential", &["SxFx"], "VxFx"),
];

/// `title -> extra aliases`. Titles are always indexed under themselves
/// (verbatim and whitespace-stripped) regardless of whether they appear
/// here.
const ALIASES: &[(&str, &[&str])] = &[
    ("Triviality 1", &["TRIV", "TRIV1"]),
    ("Triviality 2", &["TRIV2"]),
    ("Law of Excluded Middle", &["LEM"]),
    ("Law of Non-contradiction", &["LNC"]),
    ("Explosion", &["EFQ"]),
    ("Conditional Modus Ponens", &["MP", "Modus Ponens"]),
    ("Conditional Modus Tollens", &["MT", "Modus Tollens"]),
    ("Material Modus Ponens", &["MMP"]),
    ("Material Modus Tollens", &["MMT"]),
    ("Conditional Identity", &["Identity", "ID"]),
    ("Conditional Contraction", &["Contraction"]),
    ("Disjunctive Syllogism", &["DS"]),
    ("DeMorgan 1", &["DM", "DM1", "DEM", "DEM1", "DeMorgan"]),
    ("DeMorgan 2", &["DM2", "DEM2"]),
    ("DeMorgan 3", &["DM3", "DEM3"]),
    ("DeMorgan 4", &["DM4", "DEM4"]),
    ("DeMorgan 5", &["DM5", "DEM5"]),
    ("DeMorgan 6", &["DM6", "DEM6"]),
    ("DeMorgan 7", &["DM7", "DEM7"]),
    ("DeMorgan 8", &["DM8", "DEM8"]),
    ("Syllogism", &["SYL", "SYLL"]),
    ("Quantifier Interdefinability 1", &["Q1"]),
    ("Quantifier Interdefinability 2", &["Q2"]),
    ("Quantifier Interdefinability 3", &["Q3"]),
    ("Quantifier Interdefinability 4", &["Q4"]),
    ("Modal Transformation 1", &["Modal 1"]),
    ("Modal Transformation 2", &["Modal 2"]),
    ("Modal Transformation 3", &["Modal 3"]),
    ("Modal Transformation 4", &["Modal 4"]),
    ("Serial Inference 1", &["SER", "SER1", "Serial", "Serial 1", "D"]),
    ("Serial Inference 2", &["SER2", "Serial 2"]),
    ("Reflexive Inference 1", &["T", "Reflexive", "Reflexivity"]),
    (
        "S4 Material Inference 1",
        &["S4", "S41", "Transitive", "RT", "Transitivity"],
    ),
    ("S4 Material Inference 2", &["S42"]),
    ("S5 Material Inference 1", &["S5", "S51", "RST"]),
];

fn normalize(key: &str) -> String {
    key.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

struct Store {
    arguments: FxHashMap<&'static str, Argument>,
    index: FxHashMap<String, &'static str>,
}

fn build() -> Store {
    let mut predicates = PredicateStore::new();
    predicates.declare(0, 0, 1, "F").expect("corpus predicate F");
    predicates.declare(1, 0, 1, "G").expect("corpus predicate G");
    predicates.declare(2, 0, 1, "H").expect("corpus predicate H");

    let mut arguments = FxHashMap::default();
    let mut index = FxHashMap::default();
    for &(title, premises, conclusion) in ENTRIES {
        let premise_sentences = premises
            .iter()
            .map(|p| parser::parse(Notation::Polish, &mut predicates, p).expect("corpus premise parses"))
            .collect();
        let conclusion_sentence = parser::parse(Notation::Polish, &mut predicates, conclusion)
            .expect("corpus conclusion parses");
        let argument = Argument::new(premise_sentences, conclusion_sentence).with_title(title);
        arguments.insert(title, argument);
        index.insert(normalize(title), title);
    }
    for &(title, aliases) in ALIASES {
        for alias in aliases {
            index.insert(normalize(alias), title);
        }
    }
    Store { arguments, index }
}

fn store() -> &'static Store {
    static STORE: OnceLock<Store> = OnceLock::new();
    STORE.get_or_init(build)
}

/// All titles in the corpus, in declaration order. Matches `ENTRIES`
/// rather than being alphabetized, so callers iterating "every argument"
/// get a stable, documented order.
pub fn titles() -> impl Iterator<Item = &'static str> {
    ENTRIES.iter().map(|&(title, ..)| title)
}

/// Look up an argument by title or alias, case-insensitive and
/// whitespace-stripped (spec.md §6 "Consumers look up by any alias
/// (case-insensitive, whitespace-stripped)").
pub fn argument(key: &str) -> Option<&'static Argument> {
    let store = store();
    let title = store.index.get(&normalize(key))?;
    store.arguments.get(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_by_canonical_title() {
        assert!(argument("Disjunctive Syllogism").is_some());
    }

    #[test]
    fn looks_up_case_insensitively_and_whitespace_stripped() {
        assert!(argument("disjunctivesyllogism").is_some());
        assert!(argument(" DISJUNCTIVE syllogism ").is_some());
    }

    #[test]
    fn looks_up_by_alias() {
        let canonical = argument("Conditional Modus Ponens").unwrap();
        let via_alias = argument("MP").unwrap();
        assert_eq!(canonical.conclusion, via_alias.conclusion);
    }

    #[test]
    fn unknown_key_is_none() {
        assert!(argument("not a real argument").is_none());
    }

    #[test]
    fn every_title_is_reachable_via_titles_iterator() {
        for title in titles() {
            assert!(argument(title).is_some(), "{title} should resolve");
        }
    }
}
