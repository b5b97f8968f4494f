//! Output shapes for the subcommands.

use serde::Serialize;
use voronoi::sample::random_lattice_sites;
use voronoi::{Diagram, Point};

#[derive(Serialize)]
pub struct CellOut {
    pub site: [f64; 2],
    pub polygon: Vec<[f64; 2]>,
}

#[derive(Serialize)]
pub struct DiagramOut {
    pub half_extent: f64,
    pub cells: Vec<CellOut>,
}

fn pair(p: Point) -> [f64; 2] {
    [p.x, p.y]
}

pub fn diagram_out(half_extent: f64, diagram: &Diagram) -> DiagramOut {
    DiagramOut {
        half_extent,
        cells: diagram
            .cells
            .iter()
            .map(|c| CellOut {
                site: pair(c.at),
                polygon: c.polygon.iter().copied().map(pair).collect(),
            })
            .collect(),
    }
}

/// One line per cell: `x y: (x0, y0) (x1, y1) ...`.
pub fn diagram_text(diagram: &Diagram) -> String {
    let mut out = String::new();
    for cell in &diagram.cells {
        out.push_str(&format!("{} {}:", cell.at.x, cell.at.y));
        for v in &cell.polygon {
            out.push_str(&format!(" ({}, {})", v.x, v.y));
        }
        out.push('\n');
    }
    out
}

/// Site whose cell contains the most queries; ties keep the earlier site.
///
/// A query on a shared boundary counts for every cell that contains it.
pub fn busiest(diagram: &Diagram, sites: &[Point], queries: &[Point]) -> Option<Point> {
    let mut hits = vec![0usize; sites.len()];
    for &q in queries {
        for cell in diagram.containing(q) {
            if let Some(h) = hits.get_mut(cell.site.0) {
                *h += 1;
            }
        }
    }
    let mut best: Option<(usize, usize)> = None;
    for (i, &h) in hits.iter().enumerate() {
        if h > best.map_or(0, |(count, _)| count) {
            best = Some((h, i));
        }
    }
    best.map(|(_, i)| sites[i])
}

pub fn busiest_line(site: Option<Point>) -> String {
    match site {
        Some(p) => format!("{} {}", p.x, p.y),
        None => "-1 -1".to_string(),
    }
}

/// Reproducible input text for `diagram`, or for `busiest` when `queries` is set.
pub fn sample_text(count: usize, seed: u64, half_extent: i64, queries: Option<usize>) -> String {
    let sites = random_lattice_sites(count, half_extent, seed);
    let mut out = format!("{}\n", half_extent.saturating_abs());
    let query_seed = seed.wrapping_add(1);
    let queries = queries.map(|p| random_lattice_sites(p, half_extent, query_seed));
    match &queries {
        Some(q) => out.push_str(&format!("{} {}\n", sites.len(), q.len())),
        None => out.push_str(&format!("{}\n", sites.len())),
    }
    for p in sites.iter().chain(queries.iter().flatten()) {
        out.push_str(&format!("{} {}\n", p.x, p.y));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{parse_challenge, parse_diagram};
    use voronoi::{build_diagram, Bounds, GeomCfg};

    fn build(sites: &[Point], n: f64) -> Diagram {
        build_diagram(sites, Bounds::square(n), GeomCfg::default()).unwrap()
    }

    #[test]
    fn json_lists_every_cell() {
        let input = parse_diagram("5\n2\n0 0\n2 0\n").unwrap();
        let d = build(&input.sites, input.half_extent);
        let json = serde_json::to_value(diagram_out(input.half_extent, &d)).unwrap();
        assert_eq!(json["half_extent"], 5.0);
        let cells = json["cells"].as_array().unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[1]["site"], serde_json::json!([2.0, 0.0]));
        assert_eq!(cells[0]["polygon"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn text_has_one_line_per_cell() {
        let d = build(&[Point::new(0.0, 0.0), Point::new(2.0, 0.0)], 5.0);
        let text = diagram_text(&d);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("0 0:"));
        assert!(lines[1].contains("(1, 5)") || lines[1].contains("(1, -5)"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn text_lists_polygon_vertices_in_order() {
        let d = build(&[Point::new(0.0, 0.0), Point::new(2.0, 0.0)], 5.0);
        let cell = d.cell_of(voronoi::SiteId(1)).unwrap();
        let mut expected = String::from("2 0:");
        for v in &cell.polygon {
            expected.push_str(&format!(" ({}, {})", v.x, v.y));
        }
        let text = diagram_text(&d);
        assert_eq!(text.lines().nth(1), Some(expected.as_str()));
        assert_eq!(cell.polygon.len(), 4);
    }

    #[test]
    fn busiest_counts_queries_per_cell() {
        let input = parse_challenge("5\n2 3\n0 0\n4 0\n3 3\n4 -4\n-1 1\n").unwrap();
        let d = build(&input.sites, input.half_extent);
        let best = busiest(&d, &input.sites, &input.queries);
        assert_eq!(busiest_line(best), "4 0");
    }

    #[test]
    fn busiest_ties_keep_the_first_site() {
        let sites = [Point::new(0.0, 0.0), Point::new(4.0, 0.0)];
        let d = build(&sites, 5.0);
        // One query each, plus one on the shared edge x = 2 that counts for both.
        let queries = [
            Point::new(4.0, 1.0),
            Point::new(-1.0, 0.0),
            Point::new(2.0, 3.0),
        ];
        assert_eq!(busiest(&d, &sites, &queries), Some(sites[0]));
    }

    #[test]
    fn busiest_without_hits_is_minus_one() {
        let sites = [Point::new(0.0, 0.0), Point::new(4.0, 0.0)];
        let d = build(&sites, 5.0);
        assert_eq!(busiest_line(busiest(&d, &sites, &[])), "-1 -1");
        let outside = [Point::new(9.0, 9.0)];
        assert_eq!(busiest_line(busiest(&d, &sites, &outside)), "-1 -1");
    }

    #[test]
    fn sample_text_parses_back() {
        let text = sample_text(12, 5, 20, None);
        let input = parse_diagram(&text).unwrap();
        assert_eq!(input.half_extent, 20.0);
        assert_eq!(input.sites.len(), 12);
        assert_eq!(text, sample_text(12, 5, 20, None));

        let text = sample_text(6, 5, 20, Some(4));
        assert_eq!(text.lines().nth(1), Some("6 4"));
        let input = parse_challenge(&text).unwrap();
        assert_eq!((input.sites.len(), input.queries.len()), (6, 4));
    }
}
