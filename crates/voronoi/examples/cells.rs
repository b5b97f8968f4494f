//! Print the cells of a small random diagram.
//!
//! Usage:
//!   cargo run -p voronoi --example cells -- [count] [seed]

use voronoi::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let count: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(8);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(2025);

    let sites = random_lattice_sites(count, 20, seed);
    let diagram = match build_diagram(&sites, Bounds::square(20.0), GeomCfg::default()) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    for cell in &diagram.cells {
        let ring: Vec<String> = cell
            .polygon
            .iter()
            .map(|p| format!("({:.3}, {:.3})", p.x, p.y))
            .collect();
        let (id, at) = (cell.site.0, cell.at);
        println!("site {id} at ({}, {}): {}", at.x, at.y, ring.join(" "));
    }
    let (cells, edges) = (diagram.cells.len(), diagram.edges.len());
    println!("{cells} cells, {edges} edges");
}
