//! Deterministic depth-first spanning trees.
//!
//! The traversal starts at a chosen vertex and visits neighbors in ascending
//! `(neighbor, edge)` order, adding an edge the first time it reaches an
//! unvisited vertex. The order edges are added in is part of the result:
//! scenes grow trees edge by edge in exactly this order.

use std::collections::BTreeSet;

use serde::Serialize;

use super::dual::DualGraph;
use crate::error::{Error, Result};
use crate::graph::{EdgeId, Topology, VertexId};

/// A spanning tree of a [`Topology`], rooted at its start vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpanningTree {
    root: VertexId,
    /// Tree edges in addition order.
    edges: Vec<EdgeId>,
    /// `(parent, child)` for each entry of `edges`.
    pairs: Vec<(VertexId, VertexId)>,
    parent: Vec<Option<VertexId>>,
    /// Children in addition order.
    children: Vec<Vec<VertexId>>,
    /// Membership by edge index over the whole graph.
    member: Vec<bool>,
}

/// Raw traversal result before connectivity is checked.
struct Growth {
    edges: Vec<EdgeId>,
    pairs: Vec<(VertexId, VertexId)>,
    reached: usize,
}

impl SpanningTree {
    /// Depth-first spanning tree from `start`.
    ///
    /// Fails with [`Error::VertexOutOfRange`] for a bad start vertex and
    /// [`Error::DisconnectedGraph`] when some vertex is unreachable.
    pub fn depth_first<T: Topology + ?Sized>(topology: &T, start: VertexId) -> Result<Self> {
        check_vertex(topology, start)?;
        let growth = grow(topology, start, |_| true);
        let tree = Self::finish(topology, start, growth)?;
        tracing::debug!(
            root = start.0,
            edges = tree.edges.len(),
            "generated depth-first spanning tree"
        );
        Ok(tree)
    }

    /// Interpret an arbitrary edge subset as a spanning tree rooted at `root`.
    ///
    /// The parent/child relation and the edge order are derived by the same
    /// depth-first traversal, restricted to `edges`. Fails with
    /// [`Error::NotATree`] when the subset has the wrong size and with
    /// [`Error::DisconnectedGraph`] when it does not reach every vertex.
    pub fn from_edges<T: Topology + ?Sized>(
        topology: &T,
        root: VertexId,
        edges: &[EdgeId],
    ) -> Result<Self> {
        check_vertex(topology, root)?;
        if let Some(&missing) = edges.iter().find(|&&e| topology.endpoints(e).is_none()) {
            return Err(Error::invalid_graph(format!("{missing} is not in the graph")));
        }

        let subset: BTreeSet<EdgeId> = edges.iter().copied().collect();
        let vertex_count = topology.vertex_count();
        if subset.len() + 1 != vertex_count {
            return Err(Error::NotATree {
                edges: subset.len(),
                vertices: vertex_count,
            });
        }

        let growth = grow(topology, root, |e| subset.contains(&e));
        Self::finish(topology, root, growth)
    }

    /// The dual spanning tree formed by the edges this (primal) tree leaves out.
    ///
    /// For a planar embedding the complement of any spanning tree, mapped
    /// through the dual, is a spanning tree of the dual graph.
    pub fn dual_complement(&self, dual: &DualGraph, root: VertexId) -> Result<Self> {
        let complement: Vec<EdgeId> = self
            .non_tree_edges()
            .into_iter()
            .filter_map(|e| dual.dual_edge(e))
            .collect();
        let tree = Self::from_edges(dual, root, &complement)?;
        tracing::debug!(
            root = root.0,
            edges = tree.edges.len(),
            "derived dual spanning tree from complement"
        );
        Ok(tree)
    }

    fn finish<T: Topology + ?Sized>(topology: &T, root: VertexId, growth: Growth) -> Result<Self> {
        let vertex_count = topology.vertex_count();
        if growth.reached != vertex_count {
            tracing::warn!(
                reached = growth.reached,
                total = vertex_count,
                "spanning tree traversal did not reach every vertex"
            );
            return Err(Error::DisconnectedGraph {
                reached: growth.reached,
                total: vertex_count,
            });
        }

        let mut parent = vec![None; vertex_count];
        let mut children = vec![Vec::new(); vertex_count];
        let mut member = vec![false; topology.edge_count()];
        for (&edge, &(p, c)) in growth.edges.iter().zip(&growth.pairs) {
            parent[c.index()] = Some(p);
            children[p.index()].push(c);
            member[edge.index()] = true;
        }

        Ok(Self {
            root,
            edges: growth.edges,
            pairs: growth.pairs,
            parent,
            children,
            member,
        })
    }

    pub fn root(&self) -> VertexId {
        self.root
    }

    pub fn vertex_count(&self) -> usize {
        self.parent.len()
    }

    /// Tree edges in the order they were added.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// `(parent, child)` pairs in addition order.
    pub fn edge_pairs(&self) -> &[(VertexId, VertexId)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, edge: EdgeId) -> bool {
        self.member.get(edge.index()).copied().unwrap_or(false)
    }

    /// Edges of the underlying graph not in the tree, ascending.
    pub fn non_tree_edges(&self) -> Vec<EdgeId> {
        self.member
            .iter()
            .enumerate()
            .filter(|&(_, &m)| !m)
            .map(|(i, _)| EdgeId(i as u32))
            .collect()
    }

    pub fn parent(&self, v: VertexId) -> Option<VertexId> {
        self.parent.get(v.index()).copied().flatten()
    }

    /// Children of `v` in addition order.
    pub fn children(&self, v: VertexId) -> &[VertexId] {
        self.children.get(v.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_leaf(&self, v: VertexId) -> bool {
        self.children(v).is_empty()
    }

    /// Number of leaves in the subtree of every vertex, indexed by vertex.
    pub fn leaf_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.vertex_count()];
        // Pairs are in preorder, so walking them backwards finishes every
        // subtree before its parent's pair is reached.
        for &(parent, child) in self.pairs.iter().rev() {
            if self.is_leaf(child) {
                counts[child.index()] = 1;
            }
            counts[parent.index()] += counts[child.index()];
        }
        if self.is_empty() {
            if let Some(root) = counts.get_mut(self.root.index()) {
                *root = 1;
            }
        }
        counts
    }

    /// Number of leaves in the subtree of `v`.
    pub fn leaf_count(&self, v: VertexId) -> usize {
        self.leaf_counts().get(v.index()).copied().unwrap_or(0)
    }
}

fn check_vertex<T: Topology + ?Sized>(topology: &T, v: VertexId) -> Result<()> {
    if topology.contains_vertex(v) {
        Ok(())
    } else {
        Err(Error::VertexOutOfRange {
            vertex: v.0,
            count: topology.vertex_count(),
        })
    }
}

/// Depth-first traversal from `root` over the edges `allow` accepts.
fn grow<T, F>(topology: &T, root: VertexId, allow: F) -> Growth
where
    T: Topology + ?Sized,
    F: Fn(EdgeId) -> bool,
{
    let mut visited = vec![false; topology.vertex_count()];
    visited[root.index()] = true;
    let mut growth = Growth {
        edges: Vec::new(),
        pairs: Vec::new(),
        reached: 1,
    };

    // Each frame is (vertex, its incidence list, cursor into the list).
    let mut stack = vec![(root, topology.incident_edges(root), 0usize)];
    while let Some(frame) = stack.last_mut() {
        let Some(&(edge, next)) = frame.1.get(frame.2) else {
            stack.pop();
            continue;
        };
        frame.2 += 1;
        let from = frame.0;

        if visited[next.index()] || !allow(edge) {
            continue;
        }
        visited[next.index()] = true;
        growth.reached += 1;
        growth.edges.push(edge);
        growth.pairs.push((from, next));
        stack.push((next, topology.incident_edges(next), 0));
    }

    growth
}
