//! Static detection of feedback loops that are not broken by a cyclic pin.

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::DiGraph;

use crate::circuit::Circuit;
use crate::ids::ChipId;
use crate::pin::PinKind;

impl Circuit {
    /// Finds groups of chips joined in a loop with no cyclic input on the way.
    ///
    /// Builds the chip-level graph with an edge for every wire into a
    /// non-cyclic input and returns each strongly connected component that
    /// holds more than one chip, or a single chip feeding itself. Any such
    /// loop will recurse until the depth guard trips once driven.
    pub fn unflagged_feedback_loops(&self) -> Vec<Vec<ChipId>> {
        let mut graph: DiGraph<ChipId, ()> = DiGraph::new();
        let nodes: HashMap<ChipId, _> = self.chips.ids().map(|id| (id, graph.add_node(id))).collect();

        for (_, pin) in self.pins.iter() {
            if pin.kind != PinKind::ChipInput || pin.cyclic {
                continue;
            }
            if let Some(src) = pin.parent {
                let from = nodes[&self.pins[src].chip];
                let to = nodes[&pin.chip];
                graph.update_edge(from, to, ());
            }
        }

        let mut loops: Vec<Vec<ChipId>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut chips: Vec<ChipId> = scc.into_iter().map(|n| graph[n]).collect();
                chips.sort();
                chips
            })
            .collect();
        loops.sort();
        loops
    }
}
