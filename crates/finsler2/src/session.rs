//! Line-driven interactive session, independent of any console.
//!
//! Phases: `CollectingPoints` → (`done`) → `CollectingQueries` → (`quit`) → `Done`.
//!
//! - Points: one `x y` per line. `done` builds the ball; if that fails the
//!   collected points are dropped and collection starts over.
//! - Queries: `px py qx qy` on one line, or `px py` followed by `qx qy`.
//!   A failing query is reported and leaves the ball untouched.
//! - Blank lines and `#` comments are ignored everywhere; commas count as spaces.
//! - Coordinates must be finite; `inf` and `nan` are parse errors.

use thiserror::Error;

use crate::ball::{BuildCfg, Polygon};
use crate::error::FinslerError;
use crate::gauge::{measure, Measurement};
use crate::Point;

pub const POINTS_SENTINEL: &str = "done";
pub const QUERIES_SENTINEL: &str = "quit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    CollectingPoints,
    CollectingQueries,
    Done,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("cannot parse {line:?}: expected {expected}")]
    Parse { line: String, expected: &'static str },
    #[error(transparent)]
    Core(#[from] FinslerError),
    #[error("session is finished")]
    Finished,
}

/// Outcome of feeding one line.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Ignored,
    PointAdded { count: usize },
    BallReady { vertices: usize, convex: bool },
    AwaitingTarget { from: Point },
    Measured(Measurement),
    Finished,
    Failed(SessionError),
}

#[derive(Debug)]
pub struct Session {
    cfg: BuildCfg,
    phase: Phase,
    points: Vec<Point>,
    ball: Option<Polygon>,
    pending: Option<Point>,
}

impl Session {
    pub fn new(cfg: BuildCfg) -> Self {
        Self {
            cfg,
            phase: Phase::CollectingPoints,
            points: Vec::new(),
            ball: None,
            pending: None,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn ball(&self) -> Option<&Polygon> {
        self.ball.as_ref()
    }

    pub fn prompt(&self) -> &'static str {
        match (self.phase, self.pending) {
            (Phase::CollectingPoints, _) => "boundary point `x y` (or `done`)",
            (Phase::CollectingQueries, None) => "query `px py qx qy` or start point `px py` (or `quit`)",
            (Phase::CollectingQueries, Some(_)) => "end point `qx qy`",
            (Phase::Done, _) => "",
        }
    }

    pub fn feed(&mut self, line: &str) -> Reply {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Reply::Ignored;
        }
        match self.phase {
            Phase::CollectingPoints => self.feed_point(line),
            Phase::CollectingQueries => self.feed_query(line),
            Phase::Done => Reply::Failed(SessionError::Finished),
        }
    }

    fn feed_point(&mut self, line: &str) -> Reply {
        if line.eq_ignore_ascii_case(POINTS_SENTINEL) {
            return match Polygon::build_with(&self.points, self.cfg) {
                Ok(ball) => {
                    let reply = Reply::BallReady {
                        vertices: ball.len(),
                        convex: ball.is_convex(),
                    };
                    self.ball = Some(ball);
                    self.phase = Phase::CollectingQueries;
                    reply
                }
                Err(e) => {
                    tracing::warn!(error = %e, "ball rejected; collecting points again");
                    self.points.clear();
                    Reply::Failed(e.into())
                }
            };
        }
        if line.eq_ignore_ascii_case(QUERIES_SENTINEL) {
            self.phase = Phase::Done;
            return Reply::Finished;
        }
        match numbers(line).as_deref() {
            Some(&[x, y]) => {
                self.points.push(Point::new(x, y));
                Reply::PointAdded {
                    count: self.points.len(),
                }
            }
            _ => parse_error(line, "`x y` or `done`"),
        }
    }

    fn feed_query(&mut self, line: &str) -> Reply {
        if line.eq_ignore_ascii_case(QUERIES_SENTINEL) {
            self.phase = Phase::Done;
            self.pending = None;
            return Reply::Finished;
        }
        match (numbers(line).as_deref(), self.pending.take()) {
            (Some(&[px, py, qx, qy]), None) => self.query(Point::new(px, py), Point::new(qx, qy)),
            (Some(&[x, y]), None) => {
                let from = Point::new(x, y);
                self.pending = Some(from);
                Reply::AwaitingTarget { from }
            }
            (Some(&[x, y]), Some(from)) => self.query(from, Point::new(x, y)),
            (_, pending) => {
                self.pending = pending;
                if pending.is_some() {
                    parse_error(line, "`qx qy`")
                } else {
                    parse_error(line, "`px py qx qy`, `px py` or `quit`")
                }
            }
        }
    }

    fn query(&mut self, p: Point, q: Point) -> Reply {
        let Some(ball) = self.ball.as_ref() else {
            return Reply::Failed(SessionError::Finished);
        };
        match measure(ball, p, q, &self.cfg.geom) {
            Ok(m) => Reply::Measured(m),
            Err(e) => Reply::Failed(e.into()),
        }
    }
}

fn numbers(line: &str) -> Option<Vec<f64>> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(|t| t.parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect()
}

fn parse_error(line: &str, expected: &'static str) -> Reply {
    Reply::Failed(SessionError::Parse {
        line: line.to_string(),
        expected,
    })
}
