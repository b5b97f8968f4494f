use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;
use voronoi::{build_diagram, Bounds, GeomCfg};

mod input;
mod render;

#[derive(Parser)]
#[command(name = "voronoi-cli")]
#[command(about = "Voronoi diagrams of sites in a square box")]
struct Cmd {
    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Relative distance below which vertices are merged
    #[arg(long, global = true)]
    eps_weld: Option<f64>,

    /// Relative slack for point-in-cell tests
    #[arg(long, global = true)]
    eps_inside: Option<f64>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print the cell polygon of every site (input: n, f, f sites)
    Diagram {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Print the site whose cell holds the most queries (input: n, f p, f sites, p queries)
    Busiest {
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Print a reproducible random input on integer coordinates
    Sample {
        #[arg(long, default_value_t = 20)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(
            long,
            default_value_t = 100,
            value_parser = clap::value_parser!(i64).range(1..)
        )]
        half_extent: i64,
        /// Also emit this many query points (`busiest` input)
        #[arg(long)]
        queries: Option<usize>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = match cmd.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let cfg = geom_cfg(cmd.eps_weld, cmd.eps_inside)?;

    match cmd.action {
        Action::Diagram { input, format } => diagram(input.as_deref(), format, cfg),
        Action::Busiest { input } => busiest(input.as_deref(), cfg),
        Action::Sample {
            count,
            seed,
            half_extent,
            queries,
        } => {
            tracing::info!(count, seed, half_extent, queries = ?queries, "sample");
            print!("{}", render::sample_text(count, seed, half_extent, queries));
            Ok(())
        }
    }
}

/// Tolerances with the command-line overrides applied.
fn geom_cfg(eps_weld: Option<f64>, eps_inside: Option<f64>) -> Result<GeomCfg> {
    let mut cfg = GeomCfg::default();
    for (flag, value, slot) in [
        ("--eps-weld", eps_weld, &mut cfg.eps_weld),
        ("--eps-inside", eps_inside, &mut cfg.eps_inside),
    ] {
        if let Some(eps) = value {
            if !(eps.is_finite() && eps >= 0.0) {
                bail!("{flag} must be finite and non-negative, got {eps}");
            }
            *slot = eps;
        }
    }
    Ok(cfg)
}

fn diagram(path: Option<&Path>, format: Format, cfg: GeomCfg) -> Result<()> {
    let text = input::read_source(path)?;
    let parsed = input::parse_diagram(&text)?;
    tracing::info!(
        sites = parsed.sites.len(),
        n = parsed.half_extent,
        "diagram"
    );
    let diagram = build_diagram(&parsed.sites, Bounds::square(parsed.half_extent), cfg)
        .context("building diagram")?;
    match format {
        Format::Json => {
            let out = render::diagram_out(parsed.half_extent, &diagram);
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Text => print!("{}", render::diagram_text(&diagram)),
    }
    Ok(())
}

fn busiest(path: Option<&Path>, cfg: GeomCfg) -> Result<()> {
    let text = input::read_source(path)?;
    let parsed = input::parse_challenge(&text)?;
    tracing::info!(
        sites = parsed.sites.len(),
        queries = parsed.queries.len(),
        n = parsed.half_extent,
        "busiest"
    );
    let diagram = build_diagram(&parsed.sites, Bounds::square(parsed.half_extent), cfg)
        .context("building diagram")?;
    let best = render::busiest(&diagram, &parsed.sites, &parsed.queries);
    println!("{}", render::busiest_line(best));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerances_default_without_overrides() {
        let cfg = geom_cfg(None, None).unwrap();
        assert_eq!(cfg.eps_weld, GeomCfg::default().eps_weld);
        assert_eq!(cfg.eps_inside, GeomCfg::default().eps_inside);
    }

    #[test]
    fn tolerance_overrides_are_applied() {
        let cfg = geom_cfg(Some(1e-6), Some(0.0)).unwrap();
        assert_eq!(cfg.eps_weld, 1e-6);
        assert_eq!(cfg.eps_inside, 0.0);
        assert_eq!(cfg.eps_event, GeomCfg::default().eps_event);
    }

    #[test]
    fn bad_tolerances_are_rejected() {
        for bad in [f64::NAN, f64::INFINITY, -1e-9] {
            let err = geom_cfg(Some(bad), None).unwrap_err();
            assert!(err.to_string().contains("--eps-weld"), "{err}");
            let err = geom_cfg(None, Some(bad)).unwrap_err();
            assert!(err.to_string().contains("--eps-inside"), "{err}");
        }
    }

    #[test]
    fn command_line_parses_global_tolerances() {
        let args = ["voronoi-cli", "diagram", "--eps-weld", "1e-7", "-vv"];
        let cmd = Cmd::try_parse_from(args).unwrap();
        assert_eq!(cmd.eps_weld, Some(1e-7));
        assert_eq!(cmd.verbose, 2);
        assert!(matches!(cmd.action, Action::Diagram { .. }));
    }
}
