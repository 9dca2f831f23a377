//! `<figure>.provenance.json` records: which build drew a figure, from which
//! ball, under which settings, and for which query.

use anyhow::{Context, Result};
use finsler2::ball::{BuildCfg, Polygon};
use finsler2::gauge::Measurement;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Construction and solver settings in effect for a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub validate: bool,
    pub eps_angle: f64,
    pub eps_det: f64,
    pub eps_turn: f64,
}

impl From<BuildCfg> for Settings {
    fn from(cfg: BuildCfg) -> Self {
        Self {
            validate: cfg.validate,
            eps_angle: cfg.geom.eps_angle,
            eps_det: cfg.geom.eps_det,
            eps_turn: cfg.geom.eps_turn,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub from: [f64; 2],
    pub to: [f64; 2],
    pub distance: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub code_rev: String,
    pub version: String,
    pub command: String,
    pub ball: Vec<[f64; 2]>,
    pub settings: Settings,
    pub query: Option<Query>,
    /// Figure this record describes; filled in by [`Record::write_next_to`].
    pub output: Option<PathBuf>,
}

impl Record {
    pub fn new(command: &str, ball: &Polygon, cfg: BuildCfg) -> Self {
        Self {
            code_rev: code_rev(),
            version: finsler2::VERSION.to_string(),
            command: command.to_string(),
            ball: ball.vertices().iter().map(|v| [v.x, v.y]).collect(),
            settings: cfg.into(),
            query: None,
            output: None,
        }
    }

    pub fn with_query(mut self, m: &Measurement) -> Self {
        self.query = Some(Query {
            from: [m.from.x, m.from.y],
            to: [m.to.x, m.to.y],
            distance: m.distance,
        });
        self
    }

    /// Write the record beside `figure` and return the record's path.
    pub fn write_next_to(mut self, figure: &Path) -> Result<PathBuf> {
        let path = sidecar_path(figure);
        self.output = Some(figure.to_path_buf());
        let bytes = serde_json::to_vec_pretty(&self)?;
        fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!(path = %path.display(), "provenance written");
        Ok(path)
    }
}

/// `dir/query-3.svg` → `dir/query-3.provenance.json`.
pub fn sidecar_path(figure: &Path) -> PathBuf {
    figure.with_extension("provenance.json")
}

/// Commit of the running build: `GIT_COMMIT` (runtime, then compile time),
/// else `git rev-parse --short HEAD`, else `"unknown"`.
pub fn code_rev() -> String {
    let pinned = std::env::var("GIT_COMMIT")
        .ok()
        .or_else(|| option_env!("GIT_COMMIT").map(str::to_owned))
        .filter(|rev| !rev.is_empty());
    if let Some(rev) = pinned {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|rev| rev.trim().to_owned())
        .filter(|rev| !rev.is_empty())
        .unwrap_or_else(|| "unknown".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsler2::gauge::measure;
    use finsler2::Point;
    use tempfile::tempdir;

    fn triangle() -> Polygon {
        Polygon::build(&[
            Point::new(2.0, 0.0),
            Point::new(-1.0, 1.0),
            Point::new(-1.0, -1.0),
        ])
        .unwrap()
    }

    #[test]
    fn sidecar_sits_beside_the_figure() {
        assert_eq!(
            sidecar_path(Path::new("out/query-3.svg")),
            Path::new("out/query-3.provenance.json")
        );
        assert_eq!(
            sidecar_path(Path::new("ball")),
            Path::new("ball.provenance.json")
        );
    }

    #[test]
    fn settings_follow_the_build_config() {
        let mut cfg = BuildCfg::validated();
        cfg.geom.eps_det = 1e-9;
        let s = Settings::from(cfg);
        assert!(s.validate);
        assert_eq!(s.eps_det, 1e-9);
        assert_eq!(s.eps_angle, cfg.geom.eps_angle);
    }

    #[test]
    fn record_round_trips_through_the_sidecar() {
        let dir = tempdir().unwrap();
        let figure = dir.path().join("query-1.svg");
        fs::write(&figure, "<svg/>").unwrap();
        let ball = triangle();
        let cfg = BuildCfg::validated();
        let m = measure(&ball, Point::new(0.0, 0.0), Point::new(-2.0, 0.0), &cfg.geom).unwrap();
        let path = Record::new("session", &ball, cfg)
            .with_query(&m)
            .write_next_to(&figure)
            .unwrap();
        assert_eq!(path, dir.path().join("query-1.provenance.json"));

        let back: Record = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(back.command, "session");
        assert_eq!(back.ball.len(), 3);
        assert_eq!(back.settings, Settings::from(cfg));
        assert_eq!(back.output.as_deref(), Some(figure.as_path()));
        let q = back.query.unwrap();
        assert_eq!(q.to, [-2.0, 0.0]);
        assert!((q.distance - 2.0).abs() < 1e-12);
    }

    #[test]
    fn code_rev_is_never_empty() {
        assert!(!code_rev().is_empty());
    }
}
