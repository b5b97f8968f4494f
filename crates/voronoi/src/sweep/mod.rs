//! Fortune sweep: event queue, beach line, and the driver that ties them together.
//!
//! Purpose
//! - Produce the half-edges of the Voronoi diagram of a site set; clipping and
//!   polygon assembly happen afterwards in `dcel`.
//!
//! Why this design
//! - Beach-line nodes and half-edges live in arenas addressed by integer ids, so
//!   the tree, the queue, and the edge records can refer to each other without
//!   shared ownership.
//! - Queue handles resolve through a side table; cancelling a circle event is
//!   a handle lookup plus one heap repair.

mod beachline;
mod driver;
mod events;

pub use beachline::{Arcs, BeachLine, Node, NodeId, NodeKind, SplitArcs};
pub use driver::{Sweep, SweepOutput, SweepStats};
pub use events::{Event, EventHandle, EventQueue};
