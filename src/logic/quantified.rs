//! `CFOL`: classical first-order logic. Reuses the classical bivalent
//! propositional rule family for its connectives and adds
//! [`crate::rules::quantifier`]'s constant-domain quantifier rules in
//! their own later rule group, so the scheduler always prefers a
//! non-branching/propositional step over a quantifier instantiation when
//! both are available (the standard free-variable tableau fairness
//! heuristic, spec.md §4.4).

use crate::lexicals::Argument;
use crate::logic::propositional::cpl_semantics;
use crate::logic::{LogicBundle, Meta};
use crate::model::quantified::QuantModel;
use crate::model::Model;
use crate::proof::{Branch, NodeArena};
use crate::rules::propositional::{operator_rules, DesignationClosure, GapClosure, GlutClosure};
use crate::rules::quantifier::quantifier_rules;
use crate::rules::RuleGroup;

fn cfol_trunk(arena: &mut NodeArena, branch: &mut Branch, argument: &Argument) {
    use crate::proof::Node;
    for premise in &argument.premises {
        let node = Node::new().sentence(premise.clone()).designated(true);
        let id = arena.alloc(node.clone());
        branch.append(id, &node);
    }
    let node = Node::new().sentence(argument.conclusion.clone()).designated(false);
    let id = arena.alloc(node.clone());
    branch.append(id, &node);
}

pub fn cfol() -> LogicBundle {
    LogicBundle {
        name: "CFOL",
        meta: Meta {
            category: "Bivalent",
            description: "Classical first-order logic",
            tags: &["classical", "bivalent", "quantified"],
        },
        closure_rules: vec![Box::new(DesignationClosure), Box::new(GlutClosure), Box::new(GapClosure)],
        rule_groups: vec![
            RuleGroup::new("operators", operator_rules("CFOL", cpl_semantics())),
            RuleGroup::new("quantifiers", quantifier_rules()),
        ],
        build_trunk: cfol_trunk,
        new_model: || Box::new(QuantModel::new()) as Box<dyn Model>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cfol_has_two_rule_groups_operators_before_quantifiers() {
        let b = cfol();
        assert_eq!(b.rule_groups.len(), 2);
        assert_eq!(b.rule_groups[0].name, "operators");
        assert_eq!(b.rule_groups[1].name, "quantifiers");
    }
}
