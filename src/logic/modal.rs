//! Modal roster: `K`, `D`, `T`, `S4`, `S5`. Each bundle differs only in
//! which [`FrameProperty`] set its access-rule group enforces (spec.md
//! §4.6's "serial/reflexive/transitive/symmetric closures are applied per
//! logic") — the propositional and Possibility/Necessity rule groups are
//! shared verbatim across the whole family.

use crate::lexicals::Argument;
use crate::logic::{LogicBundle, Meta};
use crate::model::modal::ModalModel;
use crate::model::Model;
use crate::proof::{Branch, NodeArena};
use crate::rules::modal::{
    access_rules, modal_frame_operator_rules, operator_rules, FrameProperty, ModalDesignationClosure,
};
use crate::rules::RuleGroup;

fn modal_trunk(arena: &mut NodeArena, branch: &mut Branch, argument: &Argument) {
    use crate::proof::Node;
    let w0 = branch.new_world();
    for premise in &argument.premises {
        let node = Node::new().sentence(premise.clone()).designated(true).world(w0);
        let id = arena.alloc(node.clone());
        branch.append(id, &node);
    }
    let node = Node::new()
        .sentence(argument.conclusion.clone())
        .designated(false)
        .world(w0);
    let id = arena.alloc(node.clone());
    branch.append(id, &node);
}

fn bundle(name: &'static str, meta: Meta, properties: &'static [FrameProperty]) -> LogicBundle {
    let mut rule_groups = Vec::new();
    if !properties.is_empty() {
        rule_groups.push(RuleGroup::new("access", access_rules(name, properties)));
    }
    rule_groups.push(RuleGroup::new("operators", operator_rules(name)));
    rule_groups.push(RuleGroup::new("modal", modal_frame_operator_rules()));

    LogicBundle {
        name,
        meta,
        closure_rules: vec![Box::new(ModalDesignationClosure)],
        rule_groups,
        build_trunk: modal_trunk,
        new_model: || Box::new(ModalModel::new()) as Box<dyn Model>,
    }
}

pub fn k() -> LogicBundle {
    bundle(
        "K",
        Meta {
            category: "Modal",
            description: "Modal logic K (no frame constraints)",
            tags: &["modal"],
        },
        &[],
    )
}

pub fn d() -> LogicBundle {
    bundle(
        "D",
        Meta {
            category: "Modal",
            description: "Modal logic D (serial frame)",
            tags: &["modal", "serial"],
        },
        &[FrameProperty::Serial],
    )
}

pub fn t() -> LogicBundle {
    bundle(
        "T",
        Meta {
            category: "Modal",
            description: "Modal logic T (reflexive frame)",
            tags: &["modal", "reflexive"],
        },
        &[FrameProperty::Reflexive],
    )
}

pub fn s4() -> LogicBundle {
    bundle(
        "S4",
        Meta {
            category: "Modal",
            description: "Modal logic S4 (reflexive, transitive frame)",
            tags: &["modal", "reflexive", "transitive"],
        },
        &[FrameProperty::Reflexive, FrameProperty::Transitive],
    )
}

pub fn s5() -> LogicBundle {
    bundle(
        "S5",
        Meta {
            category: "Modal",
            description: "Modal logic S5 (equivalence frame)",
            tags: &["modal", "reflexive", "transitive", "symmetric"],
        },
        &[
            FrameProperty::Reflexive,
            FrameProperty::Transitive,
            FrameProperty::Symmetric,
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn k_has_no_access_rule_group() {
        let b = k();
        assert_eq!(b.rule_groups.len(), 2);
    }

    #[test]
    fn s5_has_all_three_frame_properties() {
        let b = s5();
        assert_eq!(b.rule_groups[0].rules.len(), 3);
    }
}
