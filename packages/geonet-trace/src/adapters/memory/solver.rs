//! In-memory flow solver
//!
//! Traversal rules:
//! - `Connected` walks every edge both ways.
//! - `Downstream` follows each edge's flow direction, `Upstream` walks
//!   against it. Indeterminate edges are walked only when indeterminate
//!   flow tracing is enabled.
//! - Blocked elements (barriers, selection barriers, disabled classes,
//!   filtered out by weight) are reached but never traversed.
//!
//! Cost model:
//! - An edge costs its from-to weight when walked in digitized direction and
//!   its to-from weight otherwise. A missing weight falls back to the other
//!   one, and edges cost 1 when neither is set.
//! - A junction costs its junction weight, or 0 without one.

use super::network::{FlowDirection, InMemoryNetwork, JunctionRole};
use crate::shared::models::{
    passes_filter, Eid, ElementBarriers, ElementType, Flag, FlowElements, FlowMethod,
    NetworkElementRef, SelectionSetBarriers, ShortestPathObjFn, UserIds, WeightSettings,
};
use crate::shared::ports::{
    AccumulationResult, FlowSolver, GeometricNetwork, PathResult, SolverError, SolverResult,
    TraceElements,
};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// One walkable step out of a junction
#[derive(Debug, Clone, Copy)]
struct Step {
    edge: Eid,
    next: Eid,
    /// Walked in digitized direction
    along: bool,
}

/// Elements touched by a reachability walk
#[derive(Debug, Default)]
struct Reach {
    junctions: FxHashSet<Eid>,
    edges: FxHashSet<Eid>,
    blocked_junctions: FxHashSet<Eid>,
    blocked_edges: FxHashSet<Eid>,
    edge_along: FxHashMap<Eid, bool>,
    edge_far: FxHashMap<Eid, Eid>,
    entered_by: FxHashMap<Eid, FxHashSet<Eid>>,
}

impl Reach {
    fn traversed_junctions(&self) -> FxHashSet<Eid> {
        self.junctions.difference(&self.blocked_junctions).copied().collect()
    }

    fn traversed_edges(&self) -> FxHashSet<Eid> {
        self.edges.difference(&self.blocked_edges).copied().collect()
    }

    fn visit_junction(&mut self, junction: Eid, via: Option<Eid>, blocked: bool, queue: &mut Vec<Eid>) {
        if let Some(edge) = via {
            self.entered_by.entry(junction).or_default().insert(edge);
        }
        if !self.junctions.insert(junction) {
            return;
        }
        if blocked {
            self.blocked_junctions.insert(junction);
        } else {
            queue.push(junction);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathNode {
    Junction(Eid),
    Goal,
}

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    cost: f64,
    node: PathNode,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost.total_cmp(&other.cost) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    // Min-heap on cost
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.total_cmp(&self.cost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accumulate {
    Sum,
    Max,
}

impl Accumulate {
    fn combine(self, a: f64, b: f64) -> f64 {
        match self {
            Accumulate::Sum => a + b,
            Accumulate::Max => a.max(b),
        }
    }
}

/// One solved path
#[derive(Debug, Default)]
struct PathElements {
    cost: f64,
    junctions: Vec<Eid>,
    edges: Vec<Eid>,
}

pub struct InMemoryFlowSolver<'n> {
    network: &'n InMemoryNetwork,
    edge_origins: Vec<Flag>,
    junction_origins: Vec<Flag>,
    barrier_junctions: FxHashSet<Eid>,
    barrier_edges: FxHashSet<Eid>,
    selection: SelectionSetBarriers,
    disabled_classes: FxHashSet<i32>,
    weights: WeightSettings,
    trace_indeterminate_flow: bool,
}

impl<'n> InMemoryFlowSolver<'n> {
    pub fn new(network: &'n InMemoryNetwork) -> Self {
        Self {
            network,
            edge_origins: Vec::new(),
            junction_origins: Vec::new(),
            barrier_junctions: FxHashSet::default(),
            barrier_edges: FxHashSet::default(),
            selection: SelectionSetBarriers::default(),
            disabled_classes: FxHashSet::default(),
            weights: WeightSettings::default(),
            trace_indeterminate_flow: false,
        }
    }

    /// Origins in the order paths visit them: edge flags, then junction flags
    fn origins(&self) -> SolverResult<Vec<NetworkElementRef>> {
        let origins: Vec<NetworkElementRef> = self
            .edge_origins
            .iter()
            .chain(&self.junction_origins)
            .map(|flag| flag.element)
            .collect();
        if origins.is_empty() {
            return Err(SolverError::NoOrigins);
        }
        for origin in &origins {
            let known = match origin.element_type {
                ElementType::Junction => self.network.junction(origin.eid).is_ok(),
                ElementType::Edge => self.network.edge(origin.eid).is_ok(),
            };
            if !known {
                return Err(SolverError::UnknownFlag(*origin));
            }
        }
        Ok(origins)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Element rules
    // ─────────────────────────────────────────────────────────────────────

    fn permits(&self, flow: FlowDirection, method: FlowMethod, along: bool) -> bool {
        match (method, flow) {
            (FlowMethod::Connected, _) => true,
            (_, FlowDirection::Indeterminate) => self.trace_indeterminate_flow,
            (FlowMethod::Downstream, FlowDirection::WithDigitized)
            | (FlowMethod::Upstream, FlowDirection::AgainstDigitized) => along,
            (FlowMethod::Downstream, FlowDirection::AgainstDigitized)
            | (FlowMethod::Upstream, FlowDirection::WithDigitized) => !along,
        }
    }

    fn steps(&self, junction: Eid, method: FlowMethod) -> Vec<Step> {
        let Some(&idx) = self.network.junctions.get(&junction) else {
            return Vec::new();
        };
        let graph = &self.network.graph;
        let outgoing = graph.edges_directed(idx, Direction::Outgoing).map(|e| {
            (e.weight(), graph[e.target()].eid, true)
        });
        let incoming = graph.edges_directed(idx, Direction::Incoming).map(|e| {
            (e.weight(), graph[e.source()].eid, false)
        });
        let mut steps: Vec<Step> = outgoing
            .chain(incoming)
            .filter(|(arc, _, along)| self.permits(arc.flow, method, *along))
            .map(|(arc, next, along)| Step {
                edge: arc.eid,
                next,
                along,
            })
            .collect();
        steps.sort_by_key(|s| (s.edge, !s.along));
        steps
    }

    /// Junctions reachable from an edge origin: `(junction, along)`
    fn edge_exits(&self, edge: Eid, method: FlowMethod) -> Vec<(Eid, bool)> {
        let Ok(arc) = self.network.edge(edge) else {
            return Vec::new();
        };
        let Some((from, to)) = self
            .network
            .edges
            .get(&edge)
            .and_then(|idx| self.network.graph.edge_endpoints(*idx))
        else {
            return Vec::new();
        };
        let graph = &self.network.graph;
        [(graph[to].eid, true), (graph[from].eid, false)]
            .into_iter()
            .filter(|(_, along)| self.permits(arc.flow, method, *along))
            .collect()
    }

    fn weight_of(&self, weight: Option<&crate::shared::models::NetWeight>, ids: &UserIds) -> Option<f64> {
        weight.map(|w| self.network.weight_value(w, ids))
    }

    fn junction_cost(&self, junction: Eid) -> f64 {
        self.network
            .junction(junction)
            .ok()
            .and_then(|j| self.weight_of(self.weights.junction_weight.as_ref(), &j.ids))
            .unwrap_or(0.0)
    }

    fn edge_cost(&self, edge: Eid, along: bool) -> f64 {
        let Ok(arc) = self.network.edge(edge) else {
            return 1.0;
        };
        let (primary, fallback) = if along {
            (&self.weights.from_to_edge_weight, &self.weights.to_from_edge_weight)
        } else {
            (&self.weights.to_from_edge_weight, &self.weights.from_to_edge_weight)
        };
        primary
            .as_ref()
            .or(fallback.as_ref())
            .map_or(1.0, |w| self.network.weight_value(w, &arc.ids))
    }

    fn owner_blocked(&self, ids: &UserIds) -> bool {
        self.disabled_classes.contains(&ids.class_id) || self.selection.contains(ids.class_id, ids.feature_id)
    }

    fn junction_blocked(&self, junction: Eid) -> bool {
        if self.barrier_junctions.contains(&junction) {
            return true;
        }
        let Ok(node) = self.network.junction(junction) else {
            return true;
        };
        if self.owner_blocked(&node.ids) {
            return true;
        }
        match &self.weights.junction_filter {
            Some(filter) => {
                let value = self.network.weight_value(&filter.weight, &node.ids);
                !passes_filter(&filter.ranges, filter.not_operator, value)
            }
            None => false,
        }
    }

    fn edge_blocked(&self, edge: Eid, along: bool) -> bool {
        if self.barrier_edges.contains(&edge) {
            return true;
        }
        let Ok(arc) = self.network.edge(edge) else {
            return true;
        };
        if self.owner_blocked(&arc.ids) {
            return true;
        }
        match &self.weights.edge_filter {
            Some(filter) => {
                let weight = if along { &filter.from_to } else { &filter.to_from };
                let value = self.network.weight_value(weight, &arc.ids);
                !passes_filter(&filter.ranges, filter.not_operator, value)
            }
            None => false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Reachability
    // ─────────────────────────────────────────────────────────────────────

    fn reach(&self, origins: &[NetworkElementRef], method: FlowMethod) -> Reach {
        let mut reach = Reach::default();
        let mut queue = Vec::new();

        for origin in origins {
            match origin.element_type {
                ElementType::Junction => {
                    let blocked = self.junction_blocked(origin.eid);
                    reach.visit_junction(origin.eid, None, blocked, &mut queue);
                }
                ElementType::Edge => {
                    if !reach.edges.insert(origin.eid) {
                        continue;
                    }
                    if self.edge_blocked(origin.eid, true) {
                        reach.blocked_edges.insert(origin.eid);
                        continue;
                    }
                    for (junction, along) in self.edge_exits(origin.eid, method) {
                        reach.edge_along.insert(origin.eid, along);
                        reach.edge_far.insert(origin.eid, junction);
                        let blocked = self.junction_blocked(junction);
                        reach.visit_junction(junction, Some(origin.eid), blocked, &mut queue);
                    }
                }
            }
        }

        while let Some(junction) = queue.pop() {
            for step in self.steps(junction, method) {
                if !reach.edges.insert(step.edge) {
                    continue;
                }
                reach.edge_along.insert(step.edge, step.along);
                if self.edge_blocked(step.edge, step.along) {
                    reach.blocked_edges.insert(step.edge);
                    continue;
                }
                reach.edge_far.insert(step.edge, step.next);
                let blocked = self.junction_blocked(step.next);
                reach.visit_junction(step.next, Some(step.edge), blocked, &mut queue);
            }
        }
        reach
    }

    /// Junctions where a walk stops, and the edges that lead into them
    fn end_elements(&self, reach: &Reach, method: FlowMethod) -> (Vec<Eid>, Vec<Eid>) {
        let no_entries = FxHashSet::default();
        let mut end_junctions: FxHashSet<Eid> = reach.blocked_junctions.clone();
        for junction in reach.traversed_junctions() {
            let entered = reach.entered_by.get(&junction).unwrap_or(&no_entries);
            if self.steps(junction, method).iter().all(|s| entered.contains(&s.edge)) {
                end_junctions.insert(junction);
            }
        }

        let mut end_edges: FxHashSet<Eid> = reach.blocked_edges.clone();
        for (edge, far) in &reach.edge_far {
            if end_junctions.contains(far) && !reach.blocked_junctions.contains(far) {
                end_edges.insert(*edge);
            }
        }
        (sorted(end_junctions), sorted(end_edges))
    }

    fn reach_all(&self, method: FlowMethod) -> SolverResult<Reach> {
        let origins = self.origins()?;
        let reach = self.reach(&origins, method);
        tracing::trace!(
            method = method.as_str(),
            junctions = reach.junctions.len(),
            edges = reach.edges.len(),
            "in_memory_reach"
        );
        Ok(reach)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Paths
    // ─────────────────────────────────────────────────────────────────────

    /// Cheapest path from `start` to the first element accepted by `goal`
    ///
    /// Elements costlier than `cap` are not walked.
    fn cheapest_path(
        &self,
        start: NetworkElementRef,
        goal: &dyn Fn(NetworkElementRef) -> bool,
        method: FlowMethod,
        accumulate: Accumulate,
        cap: Option<f64>,
    ) -> Option<PathElements> {
        let within_cap = |cost: f64| cap.map_or(true, |c| cost <= c);
        let mut dist: FxHashMap<Eid, f64> = FxHashMap::default();
        // junction -> (edge, previous junction); no previous junction for edge starts
        let mut pred: FxHashMap<Eid, (Eid, Option<Eid>)> = FxHashMap::default();
        let mut goal_pred: Option<(Eid, Option<Eid>)> = None;
        let mut goal_cost = f64::INFINITY;
        let mut heap = BinaryHeap::new();

        match start.element_type {
            ElementType::Junction => {
                let cost = self.junction_cost(start.eid);
                if goal(start) {
                    return within_cap(cost).then(|| PathElements {
                        cost,
                        junctions: vec![start.eid],
                        edges: Vec::new(),
                    });
                }
                dist.insert(start.eid, cost);
                heap.push(HeapEntry {
                    cost,
                    node: PathNode::Junction(start.eid),
                });
            }
            ElementType::Edge => {
                if goal(start) {
                    let cost = self.edge_cost(start.eid, true);
                    return within_cap(cost).then(|| PathElements {
                        cost,
                        junctions: Vec::new(),
                        edges: vec![start.eid],
                    });
                }
                for (junction, along) in self.edge_exits(start.eid, method) {
                    let edge_cost = self.edge_cost(start.eid, along);
                    let junction_cost = self.junction_cost(junction);
                    if !within_cap(edge_cost) || !within_cap(junction_cost) {
                        continue;
                    }
                    let cost = accumulate.combine(edge_cost, junction_cost);
                    if dist.get(&junction).map_or(true, |d| cost < *d) {
                        dist.insert(junction, cost);
                        pred.insert(junction, (start.eid, None));
                        heap.push(HeapEntry {
                            cost,
                            node: PathNode::Junction(junction),
                        });
                    }
                }
            }
        }

        while let Some(HeapEntry { cost, node }) = heap.pop() {
            let junction = match node {
                PathNode::Goal => break,
                PathNode::Junction(j) => j,
            };
            if dist.get(&junction).map_or(false, |d| cost > *d) {
                continue;
            }
            if goal(NetworkElementRef::junction(junction)) {
                return Some(self.unwind(Some(junction), pred.get(&junction).copied(), &pred, cost));
            }
            let is_start = start == NetworkElementRef::junction(junction);
            if !is_start && self.junction_blocked(junction) {
                continue;
            }

            for step in self.steps(junction, method) {
                let edge_cost = self.edge_cost(step.edge, step.along);
                if !within_cap(edge_cost) {
                    continue;
                }
                if goal(NetworkElementRef::edge(step.edge)) {
                    let candidate = accumulate.combine(cost, edge_cost);
                    if candidate < goal_cost {
                        goal_cost = candidate;
                        goal_pred = Some((step.edge, Some(junction)));
                        heap.push(HeapEntry {
                            cost: candidate,
                            node: PathNode::Goal,
                        });
                    }
                    continue;
                }
                if self.edge_blocked(step.edge, step.along) {
                    continue;
                }
                let junction_cost = self.junction_cost(step.next);
                if !within_cap(junction_cost) {
                    continue;
                }
                let next_cost = accumulate.combine(accumulate.combine(cost, edge_cost), junction_cost);
                if dist.get(&step.next).map_or(true, |d| next_cost < *d) {
                    dist.insert(step.next, next_cost);
                    pred.insert(step.next, (step.edge, Some(junction)));
                    heap.push(HeapEntry {
                        cost: next_cost,
                        node: PathNode::Junction(step.next),
                    });
                }
            }
        }

        goal_pred.map(|last| self.unwind(None, Some(last), &pred, goal_cost))
    }

    /// Rebuild a path walking predecessors back from the goal
    fn unwind(
        &self,
        goal_junction: Option<Eid>,
        mut link: Option<(Eid, Option<Eid>)>,
        pred: &FxHashMap<Eid, (Eid, Option<Eid>)>,
        cost: f64,
    ) -> PathElements {
        let mut path = PathElements {
            cost,
            junctions: goal_junction.into_iter().collect(),
            edges: Vec::new(),
        };
        let mut guard = self.network.edge_count() + 1;
        while let Some((edge, previous)) = link {
            path.edges.push(edge);
            link = match previous {
                Some(junction) => {
                    path.junctions.push(junction);
                    pred.get(&junction).copied()
                }
                None => None,
            };
            guard = guard.saturating_sub(1);
            if guard == 0 {
                break;
            }
        }
        path.junctions.reverse();
        path.edges.reverse();
        path
    }

    fn solve_path(
        &self,
        start: NetworkElementRef,
        goal: &dyn Fn(NetworkElementRef) -> bool,
        method: FlowMethod,
        objective: ShortestPathObjFn,
    ) -> Option<PathElements> {
        match objective {
            ShortestPathObjFn::MinSum => self.cheapest_path(start, goal, method, Accumulate::Sum, None),
            ShortestPathObjFn::MinMax => {
                let bottleneck = self.cheapest_path(start, goal, method, Accumulate::Max, None)?;
                self.cheapest_path(start, goal, method, Accumulate::Sum, Some(bottleneck.cost))
            }
        }
    }

    fn collect_paths(&self, segments: Vec<Option<PathElements>>) -> PathResult {
        let mut junctions = FxHashSet::default();
        let mut edges = FxHashSet::default();
        let mut segment_costs = Vec::with_capacity(segments.len());
        for segment in segments {
            match segment {
                Some(path) => {
                    junctions.extend(path.junctions);
                    edges.extend(path.edges);
                    segment_costs.push(Some(path.cost));
                }
                None => segment_costs.push(None),
            }
        }
        PathResult {
            elements: TraceElements {
                junctions: Some(sorted(junctions)),
                edges: Some(sorted(edges)),
            },
            segment_costs,
        }
    }
}

fn sorted(set: FxHashSet<Eid>) -> Vec<Eid> {
    let mut eids: Vec<Eid> = set.into_iter().collect();
    eids.sort_unstable();
    eids
}

fn select(elements: FlowElements, junctions: FxHashSet<Eid>, edges: FxHashSet<Eid>) -> TraceElements {
    TraceElements {
        junctions: elements.includes_junctions().then(|| sorted(junctions)),
        edges: elements.includes_edges().then(|| sorted(edges)),
    }
}

/// Edges lying on no cycle of the undirected multigraph
fn bridges(adjacency: &[Vec<(Eid, usize)>]) -> FxHashSet<Eid> {
    const UNVISITED: usize = usize::MAX;
    let n = adjacency.len();
    let mut disc = vec![UNVISITED; n];
    let mut low = vec![UNVISITED; n];
    let mut timer = 0;
    let mut found = FxHashSet::default();

    for root in 0..n {
        if disc[root] != UNVISITED {
            continue;
        }
        disc[root] = timer;
        low[root] = timer;
        timer += 1;
        // (node, edge used to enter, next neighbour index)
        let mut stack: Vec<(usize, Option<Eid>, usize)> = vec![(root, None, 0)];

        while let Some(frame) = stack.last_mut() {
            let (node, parent_edge) = (frame.0, frame.1);
            if let Some(&(edge, next)) = adjacency[node].get(frame.2) {
                frame.2 += 1;
                if Some(edge) == parent_edge {
                    continue;
                }
                if disc[next] == UNVISITED {
                    disc[next] = timer;
                    low[next] = timer;
                    timer += 1;
                    stack.push((next, Some(edge), 0));
                } else {
                    low[node] = low[node].min(disc[next]);
                }
            } else {
                stack.pop();
                if let (Some(edge), Some(parent)) = (parent_edge, stack.last()) {
                    let parent = parent.0;
                    low[parent] = low[parent].min(low[node]);
                    if low[node] > disc[parent] {
                        found.insert(edge);
                    }
                }
            }
        }
    }
    found
}

impl FlowSolver for InMemoryFlowSolver<'_> {
    fn put_edge_origins(&mut self, flags: &[Flag]) {
        self.edge_origins = flags.to_vec();
    }

    fn put_junction_origins(&mut self, flags: &[Flag]) {
        self.junction_origins = flags.to_vec();
    }

    fn set_element_barriers(&mut self, element_type: ElementType, barriers: &ElementBarriers) -> SolverResult<()> {
        let eids: Vec<Eid> = match barriers {
            ElementBarriers::ByEid(eids) => eids.clone(),
            ElementBarriers::ByFeature { class_id, oids } => oids
                .iter()
                .flat_map(|oid| self.network.feature_elements(*class_id, *oid).iter().copied())
                .collect(),
        };
        let target = match element_type {
            ElementType::Junction => &mut self.barrier_junctions,
            ElementType::Edge => &mut self.barrier_edges,
        };
        target.clear();
        target.extend(eids);
        Ok(())
    }

    fn set_selection_set_barriers(&mut self, barriers: &SelectionSetBarriers) {
        self.selection = barriers.clone();
    }

    fn disable_element_class(&mut self, class_id: i32) {
        self.disabled_classes.insert(class_id);
    }

    fn set_trace_indeterminate_flow(&mut self, enabled: bool) {
        self.trace_indeterminate_flow = enabled;
    }

    fn set_weights(&mut self, weights: &WeightSettings) {
        self.weights = weights.clone();
    }

    fn find_accumulation(&mut self, method: FlowMethod, elements: FlowElements) -> SolverResult<AccumulationResult> {
        let reach = self.reach_all(method)?;
        let junctions = reach.traversed_junctions();
        let edges = reach.traversed_edges();
        let junction_total: f64 = junctions.iter().map(|j| self.junction_cost(*j)).sum();
        let edge_total: f64 = edges
            .iter()
            .map(|e| self.edge_cost(*e, reach.edge_along.get(e).copied().unwrap_or(true)))
            .sum();
        Ok(AccumulationResult {
            elements: select(elements, junctions, edges),
            total_cost: junction_total + edge_total,
        })
    }

    fn find_circuits(&mut self, elements: FlowElements) -> SolverResult<TraceElements> {
        let reach = self.reach_all(FlowMethod::Connected)?;
        let open = reach.traversed_junctions();

        let mut index: FxHashMap<Eid, usize> = FxHashMap::default();
        let mut junction_ids: Vec<Eid> = sorted(open.clone());
        junction_ids.dedup();
        for (i, junction) in junction_ids.iter().enumerate() {
            index.insert(*junction, i);
        }

        let mut adjacency: Vec<Vec<(Eid, usize)>> = vec![Vec::new(); junction_ids.len()];
        let mut candidate_edges = Vec::new();
        for edge in sorted(reach.traversed_edges()) {
            let Some(&idx) = self.network.edges.get(&edge) else {
                continue;
            };
            let Some((from, to)) = self.network.graph.edge_endpoints(idx) else {
                continue;
            };
            let (from, to) = (self.network.graph[from].eid, self.network.graph[to].eid);
            if let (Some(&a), Some(&b)) = (index.get(&from), index.get(&to)) {
                adjacency[a].push((edge, b));
                adjacency[b].push((edge, a));
                candidate_edges.push((edge, from, to));
            }
        }

        let bridge_edges = bridges(&adjacency);
        let mut circuit_junctions = FxHashSet::default();
        let mut circuit_edges = FxHashSet::default();
        for (edge, from, to) in candidate_edges {
            if bridge_edges.contains(&edge) {
                continue;
            }
            circuit_edges.insert(edge);
            circuit_junctions.insert(from);
            circuit_junctions.insert(to);
        }
        Ok(select(elements, circuit_junctions, circuit_edges))
    }

    fn find_common_ancestors(&mut self, elements: FlowElements) -> SolverResult<TraceElements> {
        let origins = self.origins()?;
        let mut common: Option<(FxHashSet<Eid>, FxHashSet<Eid>)> = None;
        for origin in origins {
            let reach = self.reach(&[origin], FlowMethod::Upstream);
            let (junctions, edges) = (reach.traversed_junctions(), reach.traversed_edges());
            common = Some(match common {
                None => (junctions, edges),
                Some((j, e)) => (
                    j.intersection(&junctions).copied().collect(),
                    e.intersection(&edges).copied().collect(),
                ),
            });
        }
        let (junctions, edges) = common.unwrap_or_default();
        Ok(select(elements, junctions, edges))
    }

    fn find_flow_elements(&mut self, method: FlowMethod, elements: FlowElements) -> SolverResult<TraceElements> {
        let reach = self.reach_all(method)?;
        Ok(select(elements, reach.traversed_junctions(), reach.traversed_edges()))
    }

    fn find_flow_end_elements(&mut self, method: FlowMethod, elements: FlowElements) -> SolverResult<TraceElements> {
        let reach = self.reach_all(method)?;
        let (junctions, edges) = self.end_elements(&reach, method);
        Ok(select(elements, junctions.into_iter().collect(), edges.into_iter().collect()))
    }

    fn find_flow_unreached_elements(
        &mut self,
        method: FlowMethod,
        elements: FlowElements,
    ) -> SolverResult<TraceElements> {
        let reach = self.reach_all(method)?;
        let junctions = self.network.junction_eids().filter(|j| !reach.junctions.contains(j)).collect();
        let edges = self.network.edge_eids().filter(|e| !reach.edges.contains(e)).collect();
        Ok(select(elements, junctions, edges))
    }

    fn find_path(&mut self, method: FlowMethod, objective: ShortestPathObjFn, count: usize) -> SolverResult<PathResult> {
        let stops = self.origins()?;
        if stops.len() < 2 {
            return Err(SolverError::Failed("a path needs at least two origins".into()));
        }
        let segments = stops
            .windows(2)
            .take(count)
            .map(|pair| {
                let target = pair[1];
                self.solve_path(pair[0], &|element: NetworkElementRef| element == target, method, objective)
            })
            .collect();
        Ok(self.collect_paths(segments))
    }

    fn find_source(&mut self, method: FlowMethod, objective: ShortestPathObjFn, count: usize) -> SolverResult<PathResult> {
        let origins = self.origins()?;
        let network = self.network;
        let is_source = |element: NetworkElementRef| {
            element.element_type == ElementType::Junction
                && network
                    .junction(element.eid)
                    .map_or(false, |j| j.role == JunctionRole::Source)
        };
        let segments = origins
            .into_iter()
            .take(count)
            .map(|origin| self.solve_path(origin, &is_source, method, objective))
            .collect();
        Ok(self.collect_paths(segments))
    }
}
