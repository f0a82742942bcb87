//! Path and cycle classification for vertex sequences.
//!
//! Checks never fail: every input, however malformed, produces a
//! [`WalkReport`] whose `violation` says what went wrong.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use super::faces::{FaceId, FaceSet};
use crate::graph::{EdgeId, EmbeddedGraph, Topology, VertexId};

/// What a vertex sequence amounts to, from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum WalkKind {
    NotAWalk,
    /// Every consecutive pair is joined by an edge.
    Walk,
    /// A walk that never revisits a vertex.
    Path,
    /// A closed walk through at least three distinct vertices, otherwise distinct.
    Cycle,
    /// A cycle tracing exactly one face boundary.
    RegionCycle,
}

/// The first reason a sequence falls short of a path or cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum WalkViolation {
    Empty,
    VertexOutOfRange { vertex: VertexId },
    MissingEdge { from: VertexId, to: VertexId },
    RepeatedVertex { vertex: VertexId },
    /// Edge id with no edge behind it.
    EdgeOutOfRange { edge: EdgeId },
    /// An edge walk uses the same edge twice.
    RepeatedEdge { edge: EdgeId },
    /// Segment `at` shares no endpoint with where the walk has got to.
    Disjoint { at: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalkReport {
    pub kind: WalkKind,
    /// Set for `NotAWalk`, and for a `Walk` that repeats a vertex.
    pub violation: Option<WalkViolation>,
    /// Edges traversed, in order. Empty unless the sequence is a walk.
    pub edges: Vec<EdgeId>,
    /// The face traced by a `RegionCycle`.
    pub face: Option<FaceId>,
}

impl WalkReport {
    fn rejected(violation: WalkViolation) -> Self {
        Self {
            kind: WalkKind::NotAWalk,
            violation: Some(violation),
            edges: Vec::new(),
            face: None,
        }
    }

    pub fn is_walk(&self) -> bool {
        self.kind != WalkKind::NotAWalk
    }

    pub fn is_path(&self) -> bool {
        self.kind == WalkKind::Path
    }

    /// True for both plain and region cycles.
    pub fn is_cycle(&self) -> bool {
        matches!(self.kind, WalkKind::Cycle | WalkKind::RegionCycle)
    }
}

/// Validator over one embedded graph, optionally aware of its faces.
#[derive(Debug, Clone, Copy)]
pub struct WalkCheck<'a> {
    graph: &'a EmbeddedGraph,
    faces: Option<&'a FaceSet>,
}

impl<'a> WalkCheck<'a> {
    pub fn new(graph: &'a EmbeddedGraph) -> Self {
        Self { graph, faces: None }
    }

    /// Also recognize cycles that bound a single face.
    pub fn faces(mut self, faces: &'a FaceSet) -> Self {
        self.faces = Some(faces);
        self
    }

    /// Classify a vertex sequence.
    pub fn of(graph: &EmbeddedGraph, sequence: &[VertexId]) -> WalkReport {
        WalkCheck::new(graph).check(sequence)
    }

    /// Classify a vertex sequence, reporting `RegionCycle` for face boundaries.
    pub fn with_faces(graph: &EmbeddedGraph, faces: &FaceSet, sequence: &[VertexId]) -> WalkReport {
        WalkCheck::new(graph).faces(faces).check(sequence)
    }

    /// Classify a list of segments read as one ordered walk.
    ///
    /// A segment may be given in either direction; it only has to share an
    /// endpoint with where the walk has got to.
    pub fn edge_sequence(graph: &EmbeddedGraph, pairs: &[(VertexId, VertexId)]) -> WalkReport {
        WalkCheck::new(graph).check_pairs(pairs)
    }

    pub fn check_pairs(&self, pairs: &[(VertexId, VertexId)]) -> WalkReport {
        if pairs.is_empty() {
            return WalkReport::rejected(WalkViolation::Empty);
        }
        match chain(pairs) {
            Ok(sequence) => self.check(&sequence),
            Err(at) => WalkReport::rejected(WalkViolation::Disjoint { at }),
        }
    }

    /// Classify a walk given as edge ids, on any [`Topology`].
    ///
    /// Edge ids tell parallel edges and loops apart, so this is how walks in a
    /// [`DualGraph`](super::DualGraph) are checked. A closed walk is a `Cycle`
    /// when it repeats neither an edge nor a vertex, so one loop or two
    /// parallel edges already make a cycle. Region cycles are not recognized.
    pub fn edge_walk<T: Topology + ?Sized>(topology: &T, edges: &[EdgeId]) -> WalkReport {
        if edges.is_empty() {
            return WalkReport::rejected(WalkViolation::Empty);
        }
        let mut pairs = Vec::with_capacity(edges.len());
        for &edge in edges {
            match topology.endpoints(edge) {
                Some(pair) => pairs.push(pair),
                None => return WalkReport::rejected(WalkViolation::EdgeOutOfRange { edge }),
            }
        }
        let sequence = match chain(&pairs) {
            Ok(sequence) => sequence,
            Err(at) => return WalkReport::rejected(WalkViolation::Disjoint { at }),
        };

        let closed = sequence.first() == sequence.last();
        let body = if closed {
            &sequence[..sequence.len() - 1]
        } else {
            &sequence[..]
        };

        let mut report = WalkReport {
            kind: WalkKind::Walk,
            violation: None,
            edges: edges.to_vec(),
            face: None,
        };
        if let Some(edge) = first_repeat(edges) {
            report.violation = Some(WalkViolation::RepeatedEdge { edge });
        } else if let Some(vertex) = first_repeat(body) {
            report.violation = Some(WalkViolation::RepeatedVertex { vertex });
        } else if closed {
            report.kind = WalkKind::Cycle;
        } else {
            report.kind = WalkKind::Path;
        }
        report
    }

    pub fn check(&self, sequence: &[VertexId]) -> WalkReport {
        if sequence.is_empty() {
            return WalkReport::rejected(WalkViolation::Empty);
        }
        if let Some(&vertex) = sequence
            .iter()
            .find(|v| v.index() >= self.graph.vertex_count())
        {
            return WalkReport::rejected(WalkViolation::VertexOutOfRange { vertex });
        }

        let mut edges = Vec::with_capacity(sequence.len().saturating_sub(1));
        for w in sequence.windows(2) {
            match self.graph.edge_id(w[0], w[1]) {
                Some(edge) => edges.push(edge),
                None => {
                    return WalkReport::rejected(WalkViolation::MissingEdge {
                        from: w[0],
                        to: w[1],
                    });
                }
            }
        }

        let closed = sequence.len() > 1 && sequence.first() == sequence.last();
        let body = if closed {
            &sequence[..sequence.len() - 1]
        } else {
            sequence
        };

        let mut report = WalkReport {
            kind: WalkKind::Walk,
            violation: None,
            edges,
            face: None,
        };

        if let Some(vertex) = first_repeat(body) {
            report.violation = Some(WalkViolation::RepeatedVertex { vertex });
        } else if !closed {
            report.kind = WalkKind::Path;
        } else if body.len() < 3 {
            // Closed but only back and forth along one edge.
            report.violation = Some(WalkViolation::RepeatedVertex {
                vertex: sequence[0],
            });
        } else {
            report.kind = WalkKind::Cycle;
            if let Some(faces) = self.faces {
                let edge_set: BTreeSet<EdgeId> = report.edges.iter().copied().collect();
                if let Some(face) = faces.find_by_edges(&edge_set) {
                    report.kind = WalkKind::RegionCycle;
                    report.face = Some(face);
                }
            }
        }

        report
    }
}

fn first_repeat<T: Copy + Eq + std::hash::Hash>(items: &[T]) -> Option<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().copied().find(|&item| !seen.insert(item))
}

/// Vertex sequence of a chain of unordered segments, or the index of the first
/// segment that does not connect.
///
/// The first segment is read in whichever direction reaches the second one,
/// preferring the direction it was given in.
fn chain(pairs: &[(VertexId, VertexId)]) -> Result<Vec<VertexId>, usize> {
    let Some(&(a, b)) = pairs.first() else {
        return Ok(Vec::new());
    };
    let (start, mut current) = match pairs.get(1) {
        Some(&(c, d)) if b == c || b == d => (a, b),
        Some(&(c, d)) if a == c || a == d => (b, a),
        Some(_) => return Err(1),
        None => (a, b),
    };

    let mut sequence = Vec::with_capacity(pairs.len() + 1);
    sequence.push(start);
    sequence.push(current);
    for (at, &(from, to)) in pairs.iter().enumerate().skip(1) {
        current = if from == current {
            to
        } else if to == current {
            from
        } else {
            return Err(at);
        };
        sequence.push(current);
    }
    Ok(sequence)
}
