//! Site and edge tables on disk (polars CSV/Parquet, serde_json).

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use serde::Serialize;
use std::fs::{self, File};
use std::path::Path;
use voronoi::{Diagram, Point};

/// One clipped edge as written to disk.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct EdgeRecord {
    pub edge: u64,
    pub site_a: u64,
    pub site_b: u64,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    /// The edge runs to infinity beyond `(x0, y0)`.
    pub open_start: bool,
    /// The edge runs to infinity beyond `(x1, y1)`.
    pub open_end: bool,
}

/// Edge table of a finished diagram; edges missing the bounds are skipped.
pub fn edge_records(d: &Diagram) -> Vec<EdgeRecord> {
    d.segments()
        .into_iter()
        .map(|s| {
            let e = d.edge(s.edge);
            EdgeRecord {
                edge: s.edge.0 as u64,
                site_a: s.sites.0 .0 as u64,
                site_b: s.sites.1 .0 as u64,
                x0: s.from.x,
                y0: s.from.y,
                x1: s.to.x,
                y1: s.to.y,
                open_start: !e.t_start.is_finite(),
                open_end: !e.t_end.is_finite(),
            }
        })
        .collect()
}

/// Read `x`,`y` integer columns from a CSV with header.
pub fn read_sites(path: &Path) -> Result<Vec<Point>> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .select([
            col("x").cast(DataType::Int64),
            col("y").cast(DataType::Int64),
        ])
        .collect()
        .with_context(|| format!("reading x,y from {}", path.display()))?;
    let xs = df.column("x")?.i64()?;
    let ys = df.column("y")?.i64()?;
    let mut out = Vec::with_capacity(df.height());
    for (row, (x, y)) in xs.into_iter().zip(ys.into_iter()).enumerate() {
        match (x, y) {
            (Some(x), Some(y)) => out.push(Point::new(x, y)),
            _ => bail!("{}: row {row} has a missing coordinate", path.display()),
        }
    }
    Ok(out)
}

pub fn write_sites(path: &Path, sites: &[Point]) -> Result<()> {
    let xs: Vec<i64> = sites.iter().map(|p| p.x).collect();
    let ys: Vec<i64> = sites.iter().map(|p| p.y).collect();
    let mut df = df!("x" => xs, "y" => ys)?;
    let mut file = create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Write the edge table; the format follows the extension (`json`, `csv`,
/// `parquet`).
pub fn write_edges(path: &Path, edges: &[EdgeRecord]) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match ext.as_str() {
        "json" => {
            let file = create(path)?;
            serde_json::to_writer_pretty(file, edges)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        "csv" => {
            let mut df = edge_frame(edges)?;
            let mut file = create(path)?;
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(&mut df)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        "parquet" => {
            let mut df = edge_frame(edges)?;
            let mut file = create(path)?;
            ParquetWriter::new(&mut file)
                .finish(&mut df)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        other => bail!("unsupported output format {other:?} (use .json, .csv or .parquet)"),
    }
    Ok(())
}

fn edge_frame(edges: &[EdgeRecord]) -> Result<DataFrame> {
    let col_u = |f: fn(&EdgeRecord) -> u64| edges.iter().map(f).collect::<Vec<u64>>();
    let col_f = |f: fn(&EdgeRecord) -> f64| edges.iter().map(f).collect::<Vec<f64>>();
    let col_b = |f: fn(&EdgeRecord) -> bool| edges.iter().map(f).collect::<Vec<bool>>();
    let df = df!(
        "edge" => col_u(|r| r.edge),
        "site_a" => col_u(|r| r.site_a),
        "site_b" => col_u(|r| r.site_b),
        "x0" => col_f(|r| r.x0),
        "y0" => col_f(|r| r.y0),
        "x1" => col_f(|r| r.x1),
        "y1" => col_f(|r| r.y1),
        "open_start" => col_b(|r| r.open_start),
        "open_end" => col_b(|r| r.open_end)
    )?;
    Ok(df)
}

fn create(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    File::create(path).with_context(|| format!("creating {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use voronoi::input::prepare_sites;
    use voronoi::{build, Bounds, VoronoiCfg};

    fn square() -> Diagram {
        let sites = prepare_sites([
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(0, 10),
            Point::new(10, 10),
        ])
        .unwrap();
        build(&sites, Bounds::from_size(10.0, 10.0), &VoronoiCfg::default()).unwrap()
    }

    #[test]
    fn sites_csv_is_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/sites.csv");
        let sites = vec![Point::new(-3, 4), Point::new(0, 0), Point::new(7, 1)];
        write_sites(&path, &sites).unwrap();
        assert_eq!(read_sites(&path).unwrap(), sites);
    }

    #[test]
    fn edge_records_mark_open_ends() {
        let d = square();
        let recs = edge_records(&d);
        assert_eq!(recs.len(), 4);
        // every square edge runs from the centre to infinity
        for r in &recs {
            assert!(r.open_start != r.open_end);
        }
    }

    #[test]
    fn edges_in_every_format() {
        let dir = tempdir().unwrap();
        let recs = edge_records(&square());
        for name in ["e.json", "e.csv", "e.parquet"] {
            let path = dir.path().join(name);
            write_edges(&path, &recs).unwrap();
            assert!(fs::metadata(&path).unwrap().len() > 0, "{name}");
        }
        let parsed: serde_json::Value =
            serde_json::from_slice(&fs::read(dir.path().join("e.json")).unwrap()).unwrap();
        assert_eq!(parsed.as_array().map(|a| a.len()), Some(4));
        assert!(write_edges(&dir.path().join("e.txt"), &recs).is_err());
    }
}
