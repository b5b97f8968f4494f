//! Whitespace-token readers for the two text input shapes.
//!
//! Diagram input: `n`, `f`, then `f` site pairs `x y`.
//! Challenge input: `n`, `f p`, `f` site pairs, then `p` query pairs.
//! Line breaks carry no meaning; only the token order does.

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};
use tracing::warn;
use voronoi::Point;

#[derive(Clone, Debug, PartialEq)]
pub struct DiagramInput {
    pub half_extent: f64,
    pub sites: Vec<Point>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChallengeInput {
    pub half_extent: f64,
    pub sites: Vec<Point>,
    pub queries: Vec<Point>,
}

/// Read the whole input from `path`, or stdin when absent.
pub fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => fs::read_to_string(p).with_context(|| format!("reading {}", p.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok(text)
        }
    }
}

struct Tokens<'a> {
    iter: SplitWhitespace<'a>,
    consumed: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            iter: text.split_whitespace(),
            consumed: 0,
        }
    }

    fn next<T>(&mut self, what: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let Some(tok) = self.iter.next() else {
            let at = self.consumed + 1;
            bail!("unexpected end of input: expected {what} (token {at})");
        };
        self.consumed += 1;
        let at = self.consumed;
        tok.parse::<T>()
            .with_context(|| format!("parsing {what} from {tok:?} (token {at})"))
    }

    fn point(&mut self, what: &str) -> Result<Point> {
        let x: f64 = self.next(what)?;
        let y: f64 = self.next(what)?;
        Ok(Point::new(x, y))
    }

    fn points(&mut self, count: usize, what: &str) -> Result<Vec<Point>> {
        (0..count).map(|_| self.point(what)).collect()
    }

    fn finish(mut self) {
        let extra = self.iter.by_ref().count();
        if extra > 0 {
            warn!(extra, "ignoring trailing tokens");
        }
    }
}

fn half_extent(tokens: &mut Tokens<'_>) -> Result<f64> {
    let n: f64 = tokens.next("half extent n")?;
    if !(n.is_finite() && n > 0.0) {
        bail!("half extent must be positive and finite, got {n}");
    }
    Ok(n)
}

pub fn parse_diagram(text: &str) -> Result<DiagramInput> {
    let mut tokens = Tokens::new(text);
    let half_extent = half_extent(&mut tokens)?;
    let f: usize = tokens.next("site count f")?;
    let sites = tokens.points(f, "site coordinate")?;
    tokens.finish();
    Ok(DiagramInput {
        half_extent,
        sites: dedup_sites(sites),
    })
}

pub fn parse_challenge(text: &str) -> Result<ChallengeInput> {
    let mut tokens = Tokens::new(text);
    let half_extent = half_extent(&mut tokens)?;
    let f: usize = tokens.next("site count f")?;
    let p: usize = tokens.next("query count p")?;
    let sites = tokens.points(f, "site coordinate")?;
    let queries = tokens.points(p, "query coordinate")?;
    tokens.finish();
    Ok(ChallengeInput {
        half_extent,
        sites: dedup_sites(sites),
        queries,
    })
}

/// Drop repeated sites, keeping the first occurrence.
pub fn dedup_sites(sites: Vec<Point>) -> Vec<Point> {
    let mut seen = HashSet::with_capacity(sites.len());
    let mut kept = Vec::with_capacity(sites.len());
    for (index, p) in sites.into_iter().enumerate() {
        // `+ 0.0` folds -0.0 onto 0.0.
        let key = ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits());
        if seen.insert(key) {
            kept.push(p);
        } else {
            warn!(index, x = p.x, y = p.y, "duplicate site dropped");
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn diagram_input_ignores_line_layout() {
        let parsed = parse_diagram("5\n3\n0 0\n2 0   1\n-1\n").unwrap();
        assert_eq!(parsed.half_extent, 5.0);
        let expected = vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(1.0, -1.0),
        ];
        assert_eq!(parsed.sites, expected);
    }

    #[test]
    fn challenge_input_reads_sites_then_queries() {
        let text = "10\n2 3\n1 1\n-2 4\n0 0\n5 5\n-9 9\n";
        let parsed = parse_challenge(text).unwrap();
        assert_eq!(parsed.half_extent, 10.0);
        assert_eq!(parsed.sites.len(), 2);
        let expected = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(-9.0, 9.0),
        ];
        assert_eq!(parsed.queries, expected);
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let parsed = parse_diagram("4 4  1 1  0 0  1 1  -0 0").unwrap();
        let expected = vec![Point::new(1.0, 1.0), Point::new(0.0, 0.0)];
        assert_eq!(parsed.sites, expected);
    }

    #[test]
    fn malformed_input_reports_the_token() {
        let err = parse_diagram("5\n2\n0 0\n1").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("unexpected end of input"), "{err:#}");
        let err = parse_diagram("5\n1\n0 x").unwrap_err();
        assert!(format!("{err:#}").contains("\"x\""), "{err:#}");
        assert!(parse_diagram("-3\n0").is_err());
        assert!(parse_challenge("5\n1\n0 0").is_err());
    }

    #[test]
    fn read_source_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sites.txt");
        fs::write(&path, "3\n2\n0 0\n1 1\n").unwrap();
        let text = read_source(Some(&path)).unwrap();
        assert_eq!(parse_diagram(&text).unwrap().sites.len(), 2);
        let missing = dir.path().join("missing.txt");
        let err = read_source(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("missing.txt"));
    }
}
