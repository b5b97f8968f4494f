//! Partial DCEL: half-edges traced by the sweep and the finisher that closes
//! them into polygons.
//!
//! Code cross-refs: `sweep::Sweep` (producer), `diagram::build_diagram` (consumer).

mod finish;
mod half_edge;
mod weld;

pub use finish::{
    assign_polygons, boundary_points, clip_to_bounds, construct_polygons, edge_map, finish,
    prune_edges, Finished, CORNERS,
};
pub use half_edge::{EdgeId, HalfEdge, HalfEdges};
pub use weld::VertexIndex;
