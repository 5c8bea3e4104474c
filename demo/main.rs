//! Terminal maze generator and solver.
//!
//! Run: cargo run -- --size 21 --algorithm bfs --animate

use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use mazer_core::{Algorithm, Grid, MazeConfig};
use mazer_paths::Search;
use mazer_session::{Session, SolveReport, base_delay};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mazer")]
#[command(about = "Generate a random maze and solve it", long_about = None)]
struct Args {
    /// Side length of the square maze
    #[arg(long, default_value_t = 15)]
    size: i32,

    /// Wall density in percent; higher keeps more walls
    #[arg(long, default_value_t = 30)]
    density: u8,

    /// Search algorithm: astar, dijkstra, bfs or dfs
    #[arg(short, long, default_value_t = Algorithm::AStar)]
    algorithm: Algorithm,

    /// Replay speed, 1 (slowest) to 100 (fastest)
    #[arg(long, default_value_t = 50)]
    speed: u8,

    /// Seed for a reproducible maze
    #[arg(long)]
    seed: Option<u64>,

    /// Run every algorithm on the same maze and compare
    #[arg(long)]
    compare: bool,

    /// Replay the search in the terminal
    #[arg(long, conflicts_with_all = ["json", "compare"])]
    animate: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> MazeConfig {
        MazeConfig {
            size: self.size,
            wall_density: self.density,
            algorithm: self.algorithm,
            speed: self.speed,
            seed: self.seed,
        }
    }
}

#[derive(Serialize)]
struct Solved<'a> {
    config: &'a MazeConfig,
    grid: &'a Grid,
    report: SolveReport,
    search: Option<&'a Search>,
}

#[derive(Serialize)]
struct Compared<'a> {
    config: &'a MazeConfig,
    grid: &'a Grid,
    reports: Vec<SolveReport>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = args.config().validated().context("invalid settings")?;
    log::debug!("{config:?}");

    let mut session = Session::new(config)?;
    session.generate_configured();

    if args.compare {
        compare(&mut session, args.json)
    } else {
        solve(&mut session, args.animate, args.json)
    }
}

fn solve(session: &mut Session, animate: bool, json: bool) -> anyhow::Result<()> {
    let report = session.solve();
    if animate {
        play(session)?;
    } else {
        session.finish();
    }

    if json {
        let out = Solved {
            config: session.config(),
            grid: session.grid(),
            report,
            search: session.last_search(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}\n", session.grid());
    print_report(&report);
    Ok(())
}

fn compare(session: &mut Session, json: bool) -> anyhow::Result<()> {
    let reports: Vec<SolveReport> = Algorithm::ALL
        .into_iter()
        .map(|algorithm| {
            session.set_algorithm(algorithm);
            let report = session.solve();
            session.finish();
            report
        })
        .collect();
    session.reset_marks();

    if json {
        let out = Compared {
            config: session.config(),
            grid: session.grid(),
            reports,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}\n", session.grid());
    for report in &reports {
        print_report(report);
    }
    Ok(())
}

/// Replay in real time, redrawing whenever a step lands.
fn play(session: &mut Session) -> anyhow::Result<()> {
    let frame = base_delay(session.config().speed).max(Duration::from_millis(5));
    let mut out = std::io::stdout().lock();
    while session.is_replaying() {
        thread::sleep(frame);
        if session.tick(frame).is_empty() {
            continue;
        }
        writeln!(out, "\x1b[2J\x1b[H{}", session.grid())?;
        out.flush()?;
    }
    Ok(())
}

fn print_report(report: &SolveReport) {
    if report.found {
        println!(
            "{:<9} path {:>3} cells, explored {:>3}",
            report.algorithm.name(),
            report.path_len,
            report.explored
        );
    } else {
        println!(
            "{:<9} no path, explored {:>3}",
            report.algorithm.name(),
            report.explored
        );
    }
}
