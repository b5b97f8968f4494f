//! Beach line: arena-backed binary tree of arcs (leaves) and breakpoints (internal nodes).
//!
//! Invariants:
//! - Every internal node is a breakpoint with exactly two children; every leaf is an arc.
//! - In-order traversal alternates arc, breakpoint, arc, ... from left to right.
//! - A breakpoint's `left`/`right` sites are the arcs immediately to its left/right.
//!
//! Detached nodes stay in the arena; only nodes reachable from `root` are live.

use crate::dcel::EdgeId;
use crate::geom::{breakpoint_x, Site};

use super::events::EventHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Arc {
        site: Site,
        circle_event: Option<EventHandle>,
    },
    Breakpoint {
        left: Site,
        right: Site,
        /// Half-edge traced by this breakpoint.
        edge: EdgeId,
    },
}

#[derive(Clone, Debug)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub kind: NodeKind,
}

/// Leaves produced by `split_arc`, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitArcs {
    pub left: NodeId,
    pub middle: NodeId,
    pub right: NodeId,
}

#[derive(Clone, Debug, Default)]
pub struct BeachLine {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl BeachLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            left: None,
            right: None,
            kind,
        });
        id
    }

    fn arc(&mut self, site: Site) -> NodeId {
        self.alloc(NodeKind::Arc {
            site,
            circle_event: None,
        })
    }

    fn link(&mut self, parent: NodeId, left: NodeId, right: NodeId) {
        self.nodes[parent.0].left = Some(left);
        self.nodes[parent.0].right = Some(right);
        self.nodes[left.0].parent = Some(parent);
        self.nodes[right.0].parent = Some(parent);
    }

    /// Put `new` where `old` hangs below `parent` (or at the root).
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: NodeId) {
        self.nodes[new.0].parent = parent;
        match parent {
            None => self.root = Some(new),
            Some(p) => {
                let node = &mut self.nodes[p.0];
                if node.left == Some(old) {
                    node.left = Some(new);
                } else {
                    node.right = Some(new);
                }
            }
        }
    }

    /// Start the beach line with a single arc.
    pub fn insert_root(&mut self, site: Site) -> NodeId {
        let id = self.arc(site);
        self.root = Some(id);
        id
    }

    /// Start the beach line with two level sites side by side.
    ///
    /// `edge` is the half-edge traced by the breakpoint `(left, right)`.
    pub fn seed_pair(&mut self, left: Site, right: Site, edge: EdgeId) -> Option<(NodeId, NodeId)> {
        let root = self.insert_root(left);
        self.split_arc_level(root, right, edge)
    }

    /// Site of an arc leaf.
    pub fn site(&self, arc: NodeId) -> Option<Site> {
        match self.nodes.get(arc.0)?.kind {
            NodeKind::Arc { site, .. } => Some(site),
            NodeKind::Breakpoint { .. } => None,
        }
    }

    /// Sites `(left, right)` of a breakpoint.
    pub fn breakpoint_sites(&self, bp: NodeId) -> Option<(Site, Site)> {
        match self.nodes.get(bp.0)?.kind {
            NodeKind::Breakpoint { left, right, .. } => Some((left, right)),
            NodeKind::Arc { .. } => None,
        }
    }

    pub fn breakpoint_edge(&self, bp: NodeId) -> Option<EdgeId> {
        match self.nodes.get(bp.0)?.kind {
            NodeKind::Breakpoint { edge, .. } => Some(edge),
            NodeKind::Arc { .. } => None,
        }
    }

    pub fn set_breakpoint_edge(&mut self, bp: NodeId, new_edge: EdgeId) {
        if let NodeKind::Breakpoint { edge, .. } = &mut self.nodes[bp.0].kind {
            *edge = new_edge;
        }
    }

    pub fn circle_event(&self, arc: NodeId) -> Option<EventHandle> {
        match self.nodes.get(arc.0)?.kind {
            NodeKind::Arc { circle_event, .. } => circle_event,
            NodeKind::Breakpoint { .. } => None,
        }
    }

    /// Replace the arc's pending circle event, returning the previous one.
    pub fn set_circle_event(
        &mut self,
        arc: NodeId,
        handle: Option<EventHandle>,
    ) -> Option<EventHandle> {
        match &mut self.nodes[arc.0].kind {
            NodeKind::Arc { circle_event, .. } => std::mem::replace(circle_event, handle),
            NodeKind::Breakpoint { .. } => None,
        }
    }

    /// Arc directly above `x` when the sweep line is at `directrix`.
    pub fn find_arc(&self, x: f64, directrix: f64) -> Option<NodeId> {
        let mut cur = self.root?;
        loop {
            let node = &self.nodes[cur.0];
            match node.kind {
                NodeKind::Arc { .. } => return Some(cur),
                NodeKind::Breakpoint { left, right, .. } => {
                    let bx = breakpoint_x(left.at, right.at, directrix);
                    cur = if x < bx { node.left? } else { node.right? };
                }
            }
        }
    }

    /// Split `arc` by a new site strictly below its focus.
    ///
    /// The leaf is replaced by
    /// `bp(old, new) -> [old, bp(new, old) -> [new, old]]`, where the two
    /// breakpoints trace `left_edge` and `right_edge` respectively.
    pub fn split_arc(
        &mut self,
        arc: NodeId,
        new: Site,
        left_edge: EdgeId,
        right_edge: EdgeId,
    ) -> Option<SplitArcs> {
        let old = self.site(arc)?;
        let parent = self.nodes[arc.0].parent;

        let left_bp = self.alloc(NodeKind::Breakpoint {
            left: old,
            right: new,
            edge: left_edge,
        });
        let right_bp = self.alloc(NodeKind::Breakpoint {
            left: new,
            right: old,
            edge: right_edge,
        });
        let left = self.arc(old);
        let middle = self.arc(new);
        let right = self.arc(old);

        self.link(right_bp, middle, right);
        self.link(left_bp, left, right_bp);
        self.replace_child(parent, arc, left_bp);
        Some(SplitArcs {
            left,
            middle,
            right,
        })
    }

    /// Split `arc` by a site on the same horizontal line.
    ///
    /// The leaf becomes one breakpoint with two arcs ordered by x. Returns the
    /// `(left, right)` arcs. Only valid when the new arc lands on a side of
    /// `arc` that has no neighbour.
    pub fn split_arc_level(
        &mut self,
        arc: NodeId,
        new: Site,
        edge: EdgeId,
    ) -> Option<(NodeId, NodeId)> {
        let old = self.site(arc)?;
        let parent = self.nodes[arc.0].parent;
        let (l, r) = if new.at.x >= old.at.x {
            (old, new)
        } else {
            (new, old)
        };

        let bp = self.alloc(NodeKind::Breakpoint {
            left: l,
            right: r,
            edge,
        });
        let left = self.arc(l);
        let right = self.arc(r);
        self.link(bp, left, right);
        self.replace_child(parent, arc, bp);
        Some((left, right))
    }

    /// Remove a vanishing arc.
    ///
    /// The arc's sibling takes its parent's place, and the surviving adjacent
    /// breakpoint now separates the predecessor and successor arcs. Returns that
    /// breakpoint; its edge is left for the caller to replace.
    pub fn remove_arc(&mut self, arc: NodeId) -> Option<NodeId> {
        let parent = self.nodes[arc.0].parent?;
        let pred = self.predecessor_node(arc)?;
        let succ = self.successor_node(arc)?;
        let (left_site, _) = self.breakpoint_sites(pred)?;
        let (_, right_site) = self.breakpoint_sites(succ)?;

        let p = &self.nodes[parent.0];
        let sibling = if p.left == Some(arc) {
            p.right?
        } else {
            p.left?
        };
        let grand = p.parent;
        self.replace_child(grand, parent, sibling);

        let remaining = if parent == succ { pred } else { succ };
        if let NodeKind::Breakpoint { left, right, .. } = &mut self.nodes[remaining.0].kind {
            *left = left_site;
            *right = right_site;
        }
        self.nodes[arc.0].parent = None;
        self.nodes[parent.0].parent = None;
        Some(remaining)
    }

    fn min_node(&self, mut id: NodeId) -> NodeId {
        while let Some(l) = self.nodes[id.0].left {
            id = l;
        }
        id
    }

    fn max_node(&self, mut id: NodeId) -> NodeId {
        while let Some(r) = self.nodes[id.0].right {
            id = r;
        }
        id
    }

    /// In-order predecessor (for a leaf: the breakpoint on its left).
    pub fn predecessor_node(&self, id: NodeId) -> Option<NodeId> {
        if let Some(l) = self.nodes[id.0].left {
            return Some(self.max_node(l));
        }
        let mut child = id;
        let mut cur = self.nodes[id.0].parent;
        while let Some(p) = cur {
            if self.nodes[p.0].right == Some(child) {
                return Some(p);
            }
            child = p;
            cur = self.nodes[p.0].parent;
        }
        None
    }

    /// In-order successor (for a leaf: the breakpoint on its right).
    pub fn successor_node(&self, id: NodeId) -> Option<NodeId> {
        if let Some(r) = self.nodes[id.0].right {
            return Some(self.min_node(r));
        }
        let mut child = id;
        let mut cur = self.nodes[id.0].parent;
        while let Some(p) = cur {
            if self.nodes[p.0].left == Some(child) {
                return Some(p);
            }
            child = p;
            cur = self.nodes[p.0].parent;
        }
        None
    }

    /// Arc immediately left of `arc`.
    pub fn predecessor_leaf(&self, arc: NodeId) -> Option<NodeId> {
        let bp = self.predecessor_node(arc)?;
        Some(self.max_node(self.nodes[bp.0].left?))
    }

    /// Arc immediately right of `arc`.
    pub fn successor_leaf(&self, arc: NodeId) -> Option<NodeId> {
        let bp = self.successor_node(arc)?;
        Some(self.min_node(self.nodes[bp.0].right?))
    }

    /// Live arcs from left to right.
    pub fn arcs(&self) -> Arcs<'_> {
        Arcs {
            beach: self,
            next: self.root.map(|r| self.min_node(r)),
        }
    }
}

/// In-order iterator over the arc leaves of a `BeachLine`.
pub struct Arcs<'a> {
    beach: &'a BeachLine,
    next: Option<NodeId>,
}

impl Iterator for Arcs<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let cur = self.next?;
        self.next = self.beach.successor_leaf(cur);
        Some(cur)
    }
}
