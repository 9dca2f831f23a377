//! Drives a `finsler2::session::Session` over line-oriented I/O.

use anyhow::{Context, Result};
use finsler2::plot::{Scene, SvgStyle};
use finsler2::session::{Phase, Reply, Session};
use finsler2::BuildCfg;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::provenance::Record;

/// Counters reported when the session ends.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub queries: usize,
    pub failures: usize,
    pub figures: Vec<PathBuf>,
}

/// Run the session until `quit` or end of input.
///
/// With `svg_dir`, every successful query writes `query-<k>.svg` (plus
/// provenance) and the built ball is written as `ball.svg`.
pub fn run<R: BufRead, W: Write>(
    input: R,
    mut out: W,
    cfg: BuildCfg,
    svg_dir: Option<&Path>,
) -> Result<Summary> {
    let mut session = Session::new(cfg);
    let mut summary = Summary::default();
    let style = SvgStyle::default();
    writeln!(out, "> {}", session.prompt())?;
    for line in input.lines() {
        let line = line.context("reading session input")?;
        let reply = session.feed(&line);
        match &reply {
            Reply::Ignored => continue,
            Reply::PointAdded { count } => writeln!(out, "point {count} added")?,
            Reply::BallReady { vertices, convex } => {
                writeln!(out, "ball ready: {vertices} vertices, convex: {convex}")?;
                if let (Some(dir), Some(ball)) = (svg_dir, session.ball()) {
                    let path = dir.join("ball.svg");
                    let svg = Scene::unit_ball(ball).to_svg(&style);
                    write_figure(&path, &svg, Record::new("session", ball, cfg))?;
                    summary.figures.push(path);
                }
            }
            Reply::AwaitingTarget { from } => {
                writeln!(out, "start point ({}, {})", from.x, from.y)?
            }
            Reply::Measured(m) => {
                summary.queries += 1;
                writeln!(
                    out,
                    "d(({}, {}), ({}, {})) = {:.12}",
                    m.from.x, m.from.y, m.to.x, m.to.y, m.distance
                )?;
                if let (Some(dir), Some(ball)) = (svg_dir, session.ball()) {
                    let path = dir.join(format!("query-{}.svg", summary.queries));
                    let svg = Scene::from_measurement(ball, m).to_svg(&style);
                    let record = Record::new("session", ball, cfg).with_query(m);
                    write_figure(&path, &svg, record)?;
                    summary.figures.push(path);
                }
            }
            Reply::Finished => {
                writeln!(out, "bye")?;
                break;
            }
            Reply::Failed(e) => {
                summary.failures += 1;
                tracing::warn!(error = %e, "line rejected");
                writeln!(out, "error: {e}")?;
            }
        }
        if session.phase() != Phase::Done {
            writeln!(out, "> {}", session.prompt())?;
        }
    }
    tracing::info!(
        queries = summary.queries,
        failures = summary.failures,
        "session finished"
    );
    Ok(summary)
}

/// Write `svg` to `path`, creating parent directories, and its provenance
/// record beside it.
pub fn write_figure(path: &Path, svg: &str, record: Record) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
    record.write_next_to(path)?;
    tracing::info!(path = %path.display(), "figure written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    const TRANSCRIPT: &str = "1 0\n0 1\n-1 0\n0 -1\ndone\n0 0 1 1\n1 0\n2 1\n0 0 x\nquit\n";

    #[test]
    fn transcript_without_figures() {
        let mut out = Vec::new();
        let summary = run(Cursor::new(TRANSCRIPT), &mut out, BuildCfg::validated(), None).unwrap();
        assert_eq!(summary.queries, 2);
        assert_eq!(summary.failures, 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("ball ready: 4 vertices, convex: true"));
        assert!(text.contains("d((0, 0), (1, 1)) = 2.000000000000"));
        assert!(text.contains("error: cannot parse"));
        assert!(text.trim_end().ends_with("bye"));
    }

    #[test]
    fn transcript_with_figures() {
        let dir = tempdir().unwrap();
        let mut out = Vec::new();
        let summary = run(
            Cursor::new(TRANSCRIPT),
            &mut out,
            BuildCfg::validated(),
            Some(dir.path()),
        )
        .unwrap();
        assert_eq!(summary.figures.len(), 3);
        assert!(dir.path().join("ball.svg").exists());
        assert!(dir.path().join("query-2.svg").exists());
        let sidecar = std::fs::read(dir.path().join("query-2.provenance.json")).unwrap();
        let record: Record = serde_json::from_slice(&sidecar).unwrap();
        assert_eq!(record.ball.len(), 4);
        assert!(record.settings.validate);
        assert_eq!(record.query.unwrap().from, [1.0, 0.0]);
    }

    #[test]
    fn end_of_input_without_quit() {
        let mut out = Vec::new();
        let summary = run(Cursor::new("1 0\n0 1\n"), &mut out, BuildCfg::default(), None).unwrap();
        assert_eq!(summary, Summary::default());
    }
}
