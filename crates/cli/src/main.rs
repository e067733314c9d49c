use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;
use voronoi::geom::rand::{sample_sites, GridCfg, ReplayToken};
use voronoi::input::prepare_sites;
use voronoi::{build, Bounds, VoronoiCfg};

mod io;
mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Divide-and-conquer Voronoi diagrams: sample sites, build, export")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Draw distinct random sites on an integer grid and write them as CSV
    Sample {
        #[arg(long, default_value_t = 1000)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 1250)]
        width: i64,
        #[arg(long, default_value_t = 1250)]
        height: i64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Build a diagram and write its edges clipped to the canvas
    Build(BuildArgs),
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Clone, Debug)]
struct BuildArgs {
    /// CSV with integer `x`,`y` columns
    #[arg(long, conflicts_with = "random", required_unless_present = "random")]
    input: Option<PathBuf>,
    /// Draw this many random sites instead of reading a file
    #[arg(long)]
    random: Option<usize>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 1250)]
    width: i64,
    #[arg(long, default_value_t = 1250)]
    height: i64,
    /// Relative tolerance of the sweep
    #[arg(long, default_value_t = 1e-9)]
    eps: f64,
    /// Output table: .json, .csv or .parquet
    #[arg(long)]
    out: PathBuf,
    /// Run the invariant checker before writing
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Sample {
            count,
            seed,
            width,
            height,
            out,
        } => sample(count, seed, width, height, out),
        Action::Build(args) => run_build(args),
        Action::Report => report(),
    }
}

fn sample(count: usize, seed: u64, width: i64, height: i64, out: PathBuf) -> Result<()> {
    tracing::info!(count, seed, width, height, out = %out.display(), "sample");
    let grid = GridCfg {
        count,
        width,
        height,
    };
    let Some(sites) = sample_sites(grid, ReplayToken::new(seed)) else {
        bail!("cannot draw {count} distinct sites on a {width}x{height} grid");
    };
    io::write_sites(&out, &sites)?;
    provenance::write_sidecar(
        &out,
        provenance::Payload::new(json!({
            "command": "sample",
            "count": count,
            "seed": seed,
            "width": width,
            "height": height
        })),
    )?;
    Ok(())
}

fn run_build(args: BuildArgs) -> Result<()> {
    tracing::info!(?args, "build");
    let raw = match (&args.input, args.random) {
        (Some(path), _) => io::read_sites(path)?,
        (None, Some(count)) => {
            let grid = GridCfg {
                count,
                width: args.width,
                height: args.height,
            };
            sample_sites(grid, ReplayToken::new(args.seed)).with_context(|| {
                format!(
                    "cannot draw {count} distinct sites on a {}x{} grid",
                    args.width, args.height
                )
            })?
        }
        (None, None) => bail!("either --input or --random is required"),
    };
    let sites = prepare_sites(raw).context("invalid site set")?;
    let cfg = VoronoiCfg {
        eps: args.eps,
        ..VoronoiCfg::default()
    };
    let bounds = Bounds::from_size(args.width as f64, args.height as f64);
    let diagram = build(&sites, bounds, &cfg).context("building the diagram")?;
    tracing::info!(
        sites = diagram.len(),
        edges = diagram.edges().len(),
        hull = diagram.hull().len(),
        "diagram"
    );
    if args.check {
        diagram.check().context("invariant check failed")?;
        tracing::info!("invariants hold");
    }

    let records = io::edge_records(&diagram);
    io::write_edges(&args.out, &records)?;
    provenance::write_sidecar(
        &args.out,
        provenance::Payload::new(json!({
            "command": "build",
            "input": args.input.as_ref().map(|p| p.to_string_lossy().into_owned()),
            "random": args.random,
            "seed": args.seed,
            "width": args.width,
            "height": args.height,
            "eps": args.eps,
            "checked": args.check,
            "sites": diagram.len(),
            "edges": diagram.edges().len(),
            "written": records.len()
        })),
    )?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "version": voronoi::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args(out: PathBuf) -> BuildArgs {
        BuildArgs {
            input: None,
            random: Some(200),
            seed: 5,
            width: 500,
            height: 400,
            eps: 1e-9,
            out,
            check: true,
        }
    }

    #[test]
    fn sample_then_build_from_csv() {
        let dir = tempdir().unwrap();
        let sites = dir.path().join("sites.csv");
        sample(50, 3, 100, 100, sites.clone()).unwrap();
        assert!(dir.path().join("sites.provenance.json").exists());

        let out = dir.path().join("edges.json");
        run_build(BuildArgs {
            input: Some(sites),
            random: None,
            ..args(out.clone())
        })
        .unwrap();
        let edges: serde_json::Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert!(!edges.as_array().unwrap().is_empty());
        let prov: serde_json::Value =
            serde_json::from_slice(&fs::read(dir.path().join("edges.provenance.json")).unwrap())
                .unwrap();
        assert_eq!(prov["params"]["sites"], 50);
    }

    #[test]
    fn random_build_writes_parquet() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out/edges.parquet");
        run_build(args(out.clone())).unwrap();
        assert!(out.exists());
    }

    #[test]
    fn overfull_grid_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(sample(11, 0, 5, 2, dir.path().join("s.csv")).is_err());
        let mut a = args(dir.path().join("e.csv"));
        a.random = Some(10);
        a.width = 3;
        a.height = 3;
        assert!(run_build(a).is_err());
    }

    #[test]
    fn cli_parses_build_flags() {
        let cmd = Cmd::try_parse_from([
            "cli", "build", "--random", "20", "--seed", "9", "--out", "x.csv", "--check",
        ])
        .unwrap();
        match cmd.action {
            Action::Build(a) => {
                assert_eq!(a.random, Some(20));
                assert_eq!(a.seed, 9);
                assert!(a.check);
                assert_eq!(a.width, 1250);
            }
            _ => panic!("expected build"),
        }
        assert!(Cmd::try_parse_from(["cli", "build", "--out", "x.csv"]).is_err());
    }
}
