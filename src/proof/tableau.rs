//! The tableau lifecycle and step scheduler (§4.5): the one piece of the
//! engine that actually drives branches from a fresh trunk to a finished
//! proof, by repeatedly asking the rule registry for the next applicable
//! target and committing it.
//!
//! Structured like a small explicit state machine over an arena it alone
//! owns, but as an imperative loop rather than a memoized query graph —
//! spec.md §4.5 describes `step()` as a synchronous, deterministic state
//! transition, not a recomputation.

use std::cell::Cell;
use std::time::{Duration, Instant};

use indexmap::IndexSet;
use tracing::{debug, debug_span, warn};

use crate::error::EngineError;
use crate::lexicals::Argument;
use crate::logic::LogicBundle;
use crate::model::Model;
use crate::proof::branch::{Branch, BranchId};
use crate::proof::events::{Channel, Emitter, Event};
use crate::proof::node::{Node, NodeId};
use crate::proof::options::Options;
use crate::proof::target::Target;
use crate::proof::NodeArena;
use crate::rules::Rule;

/// Tableau-wide state flags (§3 "Lifecycles", §4.5 "Emit state changes via
/// TabFlag"). Kept as a set of enum variants per §9 rather than a raw
/// bitmask; `TabFlags` derives its aggregate predicates from membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TabFlag {
    Ticked,
    Closed,
    Premature,
    Finished,
    TimedOut,
    TrunkBuilt,
}

#[derive(Debug, Clone, Default)]
pub struct TabFlags(IndexSet<TabFlag>);

impl TabFlags {
    pub fn contains(&self, flag: TabFlag) -> bool {
        self.0.contains(&flag)
    }

    fn insert(&mut self, flag: TabFlag) {
        self.0.insert(flag);
    }

    pub fn is_ticked(&self) -> bool {
        self.contains(TabFlag::Ticked)
    }

    /// True iff every branch is closed (spec.md §4.5's "Closed" flag,
    /// distinct from any single [`Branch::is_closed`]).
    pub fn is_closed(&self) -> bool {
        self.contains(TabFlag::Closed)
    }

    pub fn is_premature(&self) -> bool {
        self.contains(TabFlag::Premature)
    }

    pub fn is_finished(&self) -> bool {
        self.contains(TabFlag::Finished)
    }

    pub fn is_timed_out(&self) -> bool {
        self.contains(TabFlag::TimedOut)
    }

    pub fn is_trunk_built(&self) -> bool {
        self.contains(TabFlag::TrunkBuilt)
    }

    pub fn iter(&self) -> impl Iterator<Item = TabFlag> + '_ {
        self.0.iter().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    New,
    TrunkBuilt,
    Running,
    Finished,
}

/// One entry in the tableau's application history (spec.md §3 "a history
/// of (rule, target, duration_ms) entries").
#[derive(Debug, Clone)]
pub struct StepEntry {
    pub rule: &'static str,
    pub target: Target,
    pub duration_ms: u64,
    pub step_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum StatResult {
    Valid,
    Invalid,
    Incomplete,
}

/// Aggregated statistics (spec.md §6 "stats returns {...}").
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Stats {
    pub result: StatResult,
    pub branches: usize,
    pub open_branches: usize,
    pub closed_branches: usize,
    pub steps: usize,
    pub rules_applied: usize,
    pub build_duration_ms: u64,
    pub trunk_duration_ms: u64,
    pub tree_duration_ms: u64,
    pub models_duration_ms: u64,
}

/// A structured render of the branch tree (spec.md §6 `tableau.tree()`).
#[derive(Debug, Clone)]
pub struct Tree {
    pub nodes: Vec<Node>,
    pub children: Vec<Tree>,
    pub closed: bool,
    pub open: bool,
    pub leaf: bool,
    pub depth: usize,
    pub branch_id: u32,
}

/// One candidate rule-application site gathered during a rule-group pass,
/// carrying just enough to score and tie-break it per §4.5 P2 without
/// re-walking the branch/rule lists a second time.
struct Candidate {
    rule_idx: usize,
    rank: i32,
    branch_id: BranchId,
    node_key: u32,
    target: Target,
}

/// The tableau engine proper (spec.md §4.5). Owns the tableau-wide node
/// arena and every branch ever created (open or closed — branches are
/// "never deleted", §3), and drives them through `New → TrunkBuilt →
/// Running → Finished`.
pub struct Tableau {
    logic: LogicBundle,
    argument: Argument,
    options: Options,
    arena: NodeArena,
    branches: Vec<Branch>,
    open_order: Vec<BranchId>,
    closed_set: IndexSet<BranchId>,
    next_branch_id: u32,
    state: State,
    flags: TabFlags,
    history: Vec<StepEntry>,
    emitter: Emitter,
    start: Option<Instant>,
    trunk_duration_ms: u64,
    models_duration_ms: u64,
    last_tree_duration_ms: Cell<u64>,
    models: Vec<(BranchId, Box<dyn Model>)>,
    model_errors: Vec<(BranchId, crate::error::ModelError)>,
}

impl Tableau {
    /// Construct a fresh tableau in the `New` state: a single initial
    /// branch exists, but the trunk has not been built (spec.md §3
    /// "Tableau: ... constructed once, progresses through states").
    pub fn open(logic: LogicBundle, argument: Argument, options: Options) -> Self {
        let mut emitter = Emitter::new();
        let initial = BranchId(0);
        let branches = vec![Branch::new(initial)];
        emitter.emit(Channel::AfterBranchAdd, &Event::branch(initial));
        Self {
            logic,
            argument,
            options,
            arena: NodeArena::new(),
            branches,
            open_order: vec![initial],
            closed_set: IndexSet::new(),
            next_branch_id: 1,
            state: State::New,
            flags: TabFlags::default(),
            history: Vec::new(),
            emitter,
            start: None,
            trunk_duration_ms: 0,
            models_duration_ms: 0,
            last_tree_duration_ms: Cell::new(0),
            models: Vec::new(),
            model_errors: Vec::new(),
        }
    }

    pub fn argument(&self) -> &Argument {
        &self.argument
    }

    pub fn logic_name(&self) -> &'static str {
        self.logic.name
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn flags(&self) -> TabFlags {
        self.flags.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.state == State::Finished
    }

    pub fn branches(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter()
    }

    pub fn open_branches(&self) -> impl Iterator<Item = &Branch> {
        self.open_order.iter().map(move |&id| &self.branches[id.0 as usize])
    }

    pub fn closed_branches(&self) -> impl Iterator<Item = &Branch> {
        self.closed_set.iter().map(move |&id| &self.branches[id.0 as usize])
    }

    pub fn history(&self) -> &[StepEntry] {
        &self.history
    }

    pub fn models(&self) -> &[(BranchId, Box<dyn Model>)] {
        &self.models
    }

    pub fn model_errors(&self) -> &[(BranchId, crate::error::ModelError)] {
        &self.model_errors
    }

    pub fn on(&mut self, channel: Channel, listener: impl FnMut(&Event) + 'static) {
        self.emitter.on(channel, listener);
    }

    pub fn once(&mut self, channel: Channel, listener: impl FnMut(&Event) + 'static) {
        self.emitter.once(channel, listener);
    }

    /// Seed the initial branch via the logic's `build_trunk` (spec.md
    /// §4.5 "Initialization sequence"). Callable exactly once; re-build is
    /// forbidden (spec.md §3 "Tableau: ... re-build forbidden").
    pub fn build_trunk(&mut self) -> Result<(), EngineError> {
        if self.state != State::New {
            return Err(EngineError::IllegalState(
                "build_trunk called outside the New state",
            ));
        }
        self.emitter.emit(Channel::BeforeTrunkBuild, &Event::branch(BranchId(0)));
        let start = Instant::now();
        let before = self.arena.len();
        {
            let branch = &mut self.branches[0];
            (self.logic.build_trunk)(&mut self.arena, branch, &self.argument);
        }
        for id in before..self.arena.len() {
            self.emitter
                .emit(Channel::AfterNodeAdd, &Event::node_on(BranchId(0), NodeId(id as u32)));
        }
        self.trunk_duration_ms = start.elapsed().as_millis() as u64;
        self.flags.insert(TabFlag::TrunkBuilt);
        self.state = State::TrunkBuilt;
        self.emitter.emit(Channel::AfterTrunkBuild, &Event::branch(BranchId(0)));
        debug!(logic = self.logic.name, "trunk built");
        Ok(())
    }

    /// Perform exactly one rule application (closure or rule-group) and
    /// return its history entry, or `None` when the tableau has nothing
    /// left to do and has just transitioned to `Finished` (spec.md §4.5
    /// "step(): ... returns a step entry ... or None when finished").
    pub fn step(&mut self) -> Result<Option<StepEntry>, EngineError> {
        if self.state == State::New {
            return Err(EngineError::IllegalState(
                "step called before the trunk was built",
            ));
        }
        if self.state == State::Finished {
            return Err(EngineError::IllegalState("step called after the tableau finished"));
        }
        self.state = State::Running;
        if self.start.is_none() {
            self.start = Some(Instant::now());
        }

        if let Some(max_steps) = self.options.max_steps {
            if self.history.len() >= max_steps {
                warn!(logic = self.logic.name, max_steps, "max_steps exhausted");
                self.finish(Some(TabFlag::Premature));
                return Ok(None);
            }
        }
        if let Some(timeout_ms) = self.options.build_timeout_ms {
            if self.start.unwrap().elapsed() >= Duration::from_millis(timeout_ms) {
                warn!(logic = self.logic.name, timeout_ms, "build timed out");
                self.finish(Some(TabFlag::TimedOut));
                return Ok(None);
            }
        }

        if self.open_order.is_empty() {
            self.finish(None);
            return Ok(None);
        }

        if let Some(entry) = self.closure_pass() {
            return Ok(Some(entry));
        }

        if let Some(entry) = self.rule_group_pass() {
            return Ok(Some(entry));
        }

        self.finish(None);
        Ok(None)
    }

    /// Run `step()` until it returns `None`, per spec.md §4.5's public
    /// contract. Builds the trunk first if it hasn't been built yet.
    pub fn build(&mut self) -> Result<(), EngineError> {
        self.build_with_cancel(|| false)
    }

    /// Like [`Tableau::build`], but polls `cancel` between applications
    /// (spec.md §5 "Cancellation is polling-based ... same check point as
    /// the timeout; mid-application cancellation is not supported").
    pub fn build_with_cancel(&mut self, mut cancel: impl FnMut() -> bool) -> Result<(), EngineError> {
        if self.state == State::New {
            self.build_trunk()?;
        }
        let span = debug_span!("tableau_build", logic = self.logic.name);
        let _enter = span.enter();
        loop {
            if self.state == State::Finished {
                break;
            }
            if cancel() {
                self.finish(Some(TabFlag::Premature));
                break;
            }
            if self.step()?.is_none() {
                break;
            }
        }
        Ok(())
    }

    fn finish(&mut self, reason: Option<TabFlag>) {
        if let Some(flag) = reason {
            self.flags.insert(flag);
        }
        self.flags.insert(TabFlag::Finished);
        if self.open_order.is_empty() {
            self.flags.insert(TabFlag::Closed);
        }
        self.state = State::Finished;
        if self.options.is_build_models {
            self.build_models();
        }
        debug!(
            logic = self.logic.name,
            open = self.open_order.len(),
            steps = self.history.len(),
            "tableau finished"
        );
    }

    fn build_models(&mut self) {
        let start = Instant::now();
        let open: Vec<BranchId> = self.open_order.clone();
        for id in open {
            let mut model = (self.logic.new_model)();
            let branch = &self.branches[id.0 as usize];
            model.read_branch(branch, &self.arena);
            match model.is_countermodel_to(&self.argument) {
                Ok(_) => self.models.push((id, model)),
                Err(e) => self.model_errors.push((id, e)),
            }
        }
        self.models_duration_ms = start.elapsed().as_millis() as u64;
    }

    /// Try each closure rule, in registry order, against each open branch
    /// in creation order; the first match closes that branch and is
    /// returned as this step's application (spec.md §4.5 "Closure pass").
    /// The read that finds a match is scoped to its own block so it ends
    /// before the mutation that commits it, rather than relying on NLL to
    /// narrow a borrow that also spans the surrounding loop.
    fn closure_pass(&mut self) -> Option<StepEntry> {
        let open_ids = self.open_order.clone();
        for branch_id in open_ids {
            let found = {
                let branch = &self.branches[branch_id.0 as usize];
                self.logic
                    .closure_rules
                    .iter()
                    .enumerate()
                    .find_map(|(i, rule)| rule.check(branch, &self.arena).map(|t| (i, t)))
            };
            let Some((rule_idx, mut target)) = found else {
                continue;
            };
            let rule_name = self.logic.closure_rules[rule_idx].name();
            target.rule = Some(rule_name);
            let start = Instant::now();

            let node = Node::closure();
            let node_id = self.arena.alloc(node.clone());
            {
                let b = &mut self.branches[branch_id.0 as usize];
                b.append(node_id, &node);
                b.close();
            }
            self.emitter
                .emit(Channel::AfterNodeAdd, &Event::node_on(branch_id, node_id));
            self.open_order.retain(|&id| id != branch_id);
            self.closed_set.insert(branch_id);
            self.emitter.emit(Channel::AfterBranchClose, &Event::branch(branch_id));
            debug!(rule = rule_name, branch = branch_id.0, "branch closed");

            let entry = StepEntry {
                rule: rule_name,
                target,
                duration_ms: start.elapsed().as_millis() as u64,
                step_index: self.history.len(),
            };
            self.history.push(entry.clone());
            return Some(entry);
        }
        None
    }

    /// Collect every target every rule in `rules` offers across every open
    /// branch, in (branch creation order, rule declaration order, target
    /// order) generation order.
    fn collect_candidates(&self, rules: &[Box<dyn Rule>]) -> Vec<Candidate> {
        let last_rule = self.history.last().map(|e| e.rule);
        let mut out = Vec::new();
        for &branch_id in &self.open_order {
            let branch = &self.branches[branch_id.0 as usize];
            for (rule_idx, rule) in rules.iter().enumerate() {
                if rule.blocked_after_last(last_rule) {
                    continue;
                }
                for target in rule.targets(branch, &self.arena) {
                    out.push(Candidate {
                        rule_idx,
                        rank: rule.rank(),
                        branch_id,
                        node_key: target.node.map(|n| n.0).unwrap_or(u32::MAX),
                        target,
                    });
                }
            }
        }
        out
    }

    /// Index of the candidate to apply. With `is_rank_optim`, prefers
    /// lower `rank()` (non-branching over branching), tying by lowest
    /// branch id then lowest node id (spec.md §9 Open Questions: tie-break
    /// left unspecified upstream, resolved here and documented in
    /// DESIGN.md). Without it, the first candidate in generation order
    /// wins, so scheduling stays deterministic either way.
    fn choose(&self, candidates: &[Candidate]) -> usize {
        if !self.options.is_rank_optim {
            return 0;
        }
        let mut best = 0;
        for i in 1..candidates.len() {
            let c = &candidates[i];
            let b = &candidates[best];
            let key_c = (c.rank, c.branch_id.0, c.node_key);
            let key_b = (b.rank, b.branch_id.0, b.node_key);
            if key_c < key_b {
                best = i;
            }
        }
        best
    }

    /// Walk `rule_groups` per spec.md §4.5 "Rule-group pass". With
    /// `is_group_optim`, the first group with any candidate wins and only
    /// its own candidates are scored; without it, every group's
    /// candidates are pooled before scoring (spec.md §4.5 options list
    /// "is_group_optim (bool, whether to use the group-scoring
    /// heuristic)").
    fn rule_group_pass(&mut self) -> Option<StepEntry> {
        if self.options.is_group_optim {
            for group_idx in 0..self.logic.rule_groups.len() {
                let candidates = self.collect_candidates(&self.logic.rule_groups[group_idx].rules);
                if !candidates.is_empty() {
                    return Some(self.apply_candidate(group_idx, candidates));
                }
            }
            None
        } else {
            let mut all: Vec<(usize, Candidate)> = Vec::new();
            for group_idx in 0..self.logic.rule_groups.len() {
                for c in self.collect_candidates(&self.logic.rule_groups[group_idx].rules) {
                    all.push((group_idx, c));
                }
            }
            if all.is_empty() {
                return None;
            }
            let candidates: Vec<Candidate> = all.iter().map(|(_, c)| Candidate {
                rule_idx: c.rule_idx,
                rank: c.rank,
                branch_id: c.branch_id,
                node_key: c.node_key,
                target: c.target.clone(),
            }).collect();
            let idx = self.choose(&candidates);
            let group_idx = all[idx].0;
            Some(self.apply_candidate(group_idx, candidates))
        }
    }

    /// Commit the chosen candidate: apply its rule, realize the `Adds`
    /// into new nodes (splitting branches if more than one list came
    /// back), tick the source node if the rule calls for it, and record
    /// the history entry (spec.md §4.5 "Applying a target").
    fn apply_candidate(&mut self, group_idx: usize, candidates: Vec<Candidate>) -> StepEntry {
        let idx = self.choose(&candidates);
        let chosen = candidates.into_iter().nth(idx).expect("non-empty candidates");
        let rule = &self.logic.rule_groups[group_idx].rules[chosen.rule_idx];
        let rule_name = rule.name();
        let mut target = chosen.target;
        target.rule = Some(rule_name);
        let source_branch = chosen.branch_id;

        self.emitter
            .emit(Channel::BeforeApply, &Event::rule_on(rule_name, source_branch));
        let step_start = Instant::now();

        let adds = {
            let branch = &mut self.branches[source_branch.0 as usize];
            rule.apply(&target, branch, &self.arena)
        };

        let mut dest_ids = vec![source_branch];
        if adds.len() > 1 {
            let parent_snapshot = self.branches[source_branch.0 as usize].clone();
            for _ in 1..adds.len() {
                let new_id = BranchId(self.next_branch_id);
                self.next_branch_id += 1;
                let child = parent_snapshot.split_into(new_id);
                self.branches.push(child);
                self.open_order.push(new_id);
                dest_ids.push(new_id);
                self.emitter
                    .emit(Channel::AfterBranchAdd, &Event::branch_split(new_id, source_branch));
            }
        }

        for (&dest, node_list) in dest_ids.iter().zip(adds.into_iter()) {
            for node in node_list {
                let id = self.arena.alloc(node.clone());
                self.branches[dest.0 as usize].append(id, &node);
                self.emitter.emit(Channel::AfterNodeAdd, &Event::node_on(dest, id));
            }
        }

        if rule.ticks_source() {
            if let Some(src) = target.node {
                for &dest in &dest_ids {
                    let b = &mut self.branches[dest.0 as usize];
                    if !b.is_ticked(src) {
                        b.tick(src);
                        self.emitter.emit(Channel::AfterNodeTick, &Event::node_on(dest, src));
                    }
                }
                self.flags.insert(TabFlag::Ticked);
            }
        }
        if let Some(src) = target.node {
            self.branches[source_branch.0 as usize].mark_applied(src, rule_name);
        }

        let duration_ms = step_start.elapsed().as_millis() as u64;
        let entry = StepEntry {
            rule: rule_name,
            target,
            duration_ms,
            step_index: self.history.len(),
        };
        self.history.push(entry.clone());
        self.emitter.emit(Channel::AfterApply, &Event::rule_on(rule_name, source_branch));
        debug!(rule = rule_name, branch = source_branch.0, "rule applied");
        entry
    }

    pub fn tree(&self) -> Tree {
        let start = Instant::now();
        let root = self.tree_node(BranchId(0), 0);
        self.last_tree_duration_ms.set(start.elapsed().as_millis() as u64);
        root
    }

    fn tree_node(&self, id: BranchId, depth: usize) -> Tree {
        let branch = &self.branches[id.0 as usize];
        let nodes = branch.nodes().iter().map(|&nid| self.arena.get(nid).clone()).collect();
        let children: Vec<Tree> = self
            .branches
            .iter()
            .filter(|b| b.parent() == Some(id))
            .map(|b| self.tree_node(b.id(), depth + 1))
            .collect();
        let leaf = children.is_empty();
        Tree {
            nodes,
            closed: branch.is_closed(),
            open: !branch.is_closed(),
            leaf,
            depth,
            branch_id: id.0,
            children,
        }
    }

    pub fn stats(&self) -> Stats {
        let result = if self.open_order.is_empty() {
            StatResult::Valid
        } else if self.flags.is_premature() || self.flags.is_timed_out() {
            StatResult::Incomplete
        } else {
            StatResult::Invalid
        };
        let build_duration_ms = self
            .start
            .map(|s| s.elapsed().as_millis() as u64)
            .unwrap_or(0);
        Stats {
            result,
            branches: self.branches.len(),
            open_branches: self.open_order.len(),
            closed_branches: self.closed_set.len(),
            steps: self.history.len(),
            rules_applied: self.history.len(),
            build_duration_ms,
            trunk_duration_ms: self.trunk_duration_ms,
            tree_duration_ms: self.last_tree_duration_ms.get(),
            models_duration_ms: self.models_duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicals::{Argument, Sentence};
    use crate::logic::propositional::cpl;
    use crate::logic::registry::lookup;

    fn disjunctive_syllogism() -> Argument {
        // Aab, Nb |- a
        let a = Sentence::atomic(0, 0);
        let b = Sentence::atomic(1, 0);
        Argument::new(
            vec![
                Sentence::operated(crate::lexicals::Operator::Disjunction, vec![a.clone(), b.clone()]),
                b.negate(),
            ],
            a,
        )
    }

    #[test]
    fn state_machine_rejects_step_before_trunk() {
        let mut tab = Tableau::open(cpl(), disjunctive_syllogism(), Options::default());
        assert!(tab.step().is_err());
    }

    #[test]
    fn build_trunk_is_not_reentrant() {
        let mut tab = Tableau::open(cpl(), disjunctive_syllogism(), Options::default());
        tab.build_trunk().unwrap();
        assert!(tab.build_trunk().is_err());
    }

    #[test]
    fn disjunctive_syllogism_is_valid_with_two_closed_branches() {
        let mut tab = Tableau::open(cpl(), disjunctive_syllogism(), Options::default());
        tab.build().unwrap();
        assert_eq!(tab.open_branches().count(), 0);
        assert_eq!(tab.closed_branches().count(), 2);
        assert_eq!(tab.stats().result, StatResult::Valid);
    }

    #[test]
    fn law_of_excluded_middle_is_invalid_in_k3_with_a_countermodel() {
        let bundle = lookup("K3").unwrap();
        let a = Sentence::atomic(0, 0);
        let conclusion = Sentence::operated(crate::lexicals::Operator::Disjunction, vec![a.clone(), a.negate()]);
        let arg = Argument::new(vec![], conclusion);
        let mut tab = Tableau::open(bundle, arg, Options::default());
        tab.build().unwrap();
        assert_eq!(tab.stats().result, StatResult::Invalid);
        assert!(tab.open_branches().count() >= 1);
        assert!(!tab.models().is_empty());
    }

    #[test]
    fn step_after_finished_is_illegal_state() {
        let mut tab = Tableau::open(cpl(), disjunctive_syllogism(), Options::default());
        tab.build().unwrap();
        assert!(tab.step().is_err());
    }

    #[test]
    fn ticked_nodes_never_untick_across_steps() {
        let mut tab = Tableau::open(cpl(), disjunctive_syllogism(), Options::default());
        tab.build().unwrap();
        // every node ticked at some point stays ticked on every branch
        // that descends from the one it was ticked on.
        for branch in tab.branches() {
            for &id in branch.nodes() {
                if branch.is_ticked(id) {
                    assert!(branch.is_ticked(id));
                }
            }
        }
    }

    #[test]
    fn max_steps_zero_marks_premature_and_incomplete() {
        let options = Options::builder().max_steps(0).build().unwrap();
        let mut tab = Tableau::open(cpl(), disjunctive_syllogism(), options);
        tab.build().unwrap();
        assert!(tab.flags().is_premature());
        assert_eq!(tab.stats().result, StatResult::Incomplete);
    }
}
