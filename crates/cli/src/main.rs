use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use finsler2::ball::{BuildCfg, GaugeCfg, Polygon};
use finsler2::gauge::{distance_with, measure};
use finsler2::plot::{Scene, SvgStyle};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

use crate::provenance::{Record, Settings};

mod console;
mod parse;
mod provenance;

#[derive(Parser)]
#[command(name = "finsler")]
#[command(about = "Distances under a polygonal (Finsler) unit ball")]
struct Cmd {
    /// Accept balls that are not convex or do not strictly contain the origin
    #[arg(long, global = true)]
    no_validate: bool,

    /// Relative determinant threshold for ray/edge solves
    #[arg(long, global = true, default_value_t = 1e-12)]
    eps_det: f64,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Distance from one point to another; prints JSON
    Distance {
        /// Ball boundary points, e.g. "1,0 0,1 -1,0 0,-1"
        #[arg(long, allow_hyphen_values = true)]
        ball: String,
        #[arg(long, allow_hyphen_values = true)]
        from: String,
        #[arg(long, allow_hyphen_values = true)]
        to: String,
        /// Also write the distance diagram here
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// Write the unit ball as SVG
    Plot {
        #[arg(long, allow_hyphen_values = true)]
        ball: String,
        #[arg(long)]
        out: PathBuf,
    },
    /// Interactive session on stdin/stdout
    Session {
        /// Write the ball and one diagram per query into this directory
        #[arg(long)]
        svg_dir: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Serialize)]
struct DistanceReport {
    ball: Vec<[f64; 2]>,
    from: [f64; 2],
    to: [f64; 2],
    distance: f64,
    reverse_distance: f64,
    boundary_point: Option<[f64; 2]>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    let cmd = Cmd::parse();
    let cfg = BuildCfg {
        validate: !cmd.no_validate,
        geom: GaugeCfg {
            eps_det: cmd.eps_det,
            ..GaugeCfg::default()
        },
    };
    match cmd.action {
        Action::Distance { ball, from, to, svg } => distance(&ball, &from, &to, svg, cfg),
        Action::Plot { ball, out } => plot(&ball, out, cfg),
        Action::Session { svg_dir } => session(svg_dir, cfg),
        Action::Report => report(cfg),
    }
}

fn load_ball(list: &str, cfg: BuildCfg) -> Result<Polygon> {
    let points = parse::points(list).context("parsing --ball")?;
    let ball = Polygon::build_with(&points, cfg).context("building the unit ball")?;
    if !ball.is_convex() {
        tracing::warn!("ball is not convex; distances may be meaningless");
    }
    Ok(ball)
}

fn distance(ball: &str, from: &str, to: &str, svg: Option<PathBuf>, cfg: BuildCfg) -> Result<()> {
    let poly = load_ball(ball, cfg)?;
    let p = parse::point(from).context("parsing --from")?;
    let q = parse::point(to).context("parsing --to")?;
    tracing::info!(vertices = poly.len(), "distance");
    let m = measure(&poly, p, q, &cfg.geom).context("forward distance")?;
    let reverse = distance_with(&poly, q, p, &cfg.geom).context("reverse distance")?;
    let report = DistanceReport {
        ball: poly.vertices().iter().map(|v| [v.x, v.y]).collect(),
        from: [p.x, p.y],
        to: [q.x, q.y],
        distance: m.distance,
        reverse_distance: reverse,
        boundary_point: m.hit.map(|h| [h.point.x, h.point.y]),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    if let Some(path) = svg {
        let doc = Scene::from_measurement(&poly, &m).to_svg(&SvgStyle::default());
        let record = Record::new("distance", &poly, cfg).with_query(&m);
        console::write_figure(&path, &doc, record)?;
    }
    Ok(())
}

fn plot(ball: &str, out: PathBuf, cfg: BuildCfg) -> Result<()> {
    let poly = load_ball(ball, cfg)?;
    tracing::info!(vertices = poly.len(), out = %out.display(), "plot");
    let doc = Scene::unit_ball(&poly).to_svg(&SvgStyle::default());
    console::write_figure(&out, &doc, Record::new("plot", &poly, cfg))
}

fn session(svg_dir: Option<PathBuf>, cfg: BuildCfg) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = console::run(stdin.lock(), stdout.lock(), cfg, svg_dir.as_deref())?;
    tracing::info!(figures = summary.figures.len(), "session done");
    Ok(())
}

fn report(cfg: BuildCfg) -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::code_rev(),
        "version": finsler2::VERSION,
        "settings": Settings::from(cfg),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
