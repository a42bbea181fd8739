//! Classroom Simulation Binary
//!
//! Runs a simulated lawsuit negotiation class against the in-memory store.
//! Every student is an async task running the poll-and-rerun loop; the
//! admin advances rounds and prints the report after each reveal.
//!
//! Options: --players, --rounds, --interval, --agent, --seed, --table

use clap::Parser;
use clap::ValueEnum;
use colored::Colorize;
use lawsuit::classroom::*;
use lawsuit::game::*;
use lawsuit::players::*;
use lawsuit::store::*;
use lawsuit::*;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    /// Uniform over the legal menu.
    Coin,
    /// Mixes at the benchmark rates.
    Nash,
}

#[derive(Debug, Parser)]
#[command(about = "Simulate a classroom lawsuit negotiation")]
struct Args {
    /// Expected class size (positive, even).
    #[arg(long, default_value_t = 20)]
    players: usize,
    /// Number of rounds to play.
    #[arg(long, default_value_t = 1)]
    rounds: u32,
    /// Poll interval in milliseconds.
    #[arg(long, default_value_t = POLL_INTERVAL.as_millis() as u64)]
    interval: u64,
    /// How simulated students choose their moves.
    #[arg(long, value_enum, default_value_t = Kind::Nash)]
    agent: Kind,
    /// Seed for type draws and agents; random if omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// JSON payoff table replacing the canonical one.
    #[arg(long)]
    table: Option<std::path::PathBuf>,
}

impl Args {
    fn student(&self, i: usize, seed: u64) -> Student {
        let seed = seed.wrapping_add(i as u64 + 1);
        let agent: Box<dyn Agent> = match self.agent {
            Kind::Coin => Box::new(Coin::new(seed)),
            Kind::Nash => Box::new(Nash::new(seed)),
        };
        Student::new(
            &format!("Student{:02}", i + 1),
            agent,
            Duration::from_millis(self.interval),
        )
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log();
    kys();
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let table = match args.table {
        Some(ref path) => PayoffTable::load(path)?,
        None => PayoffTable::default(),
    };
    println!("{}", table);
    let classroom = Arc::new(Classroom::seeded(Memory::default(), seed).with_table(table));
    classroom.configure(args.players).await?;
    log::info!("seed {}", seed);

    let mut students = (0..args.players)
        .map(|i| args.student(i, seed))
        .collect::<Vec<_>>();
    for _ in 0..args.rounds {
        let handles = students
            .drain(..)
            .map(|student| student.spawn(classroom.clone()))
            .collect::<Vec<_>>();
        for (student, status) in futures::future::join_all(handles)
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?
        {
            match status {
                Ok(status) => log::debug!("{}: {}", student.name(), status),
                Err(ref e) => log::warn!("{}: {}", student.name(), e),
            }
            students.push(student);
        }
        log::info!("{}", classroom.overview().await?);
        let round = classroom.advance().await?;
        println!("{}", format!("=== {} ===", round).bold());
        println!("{}", classroom.report(Scope::Live).await?);
        classroom.advance().await?;
    }
    if args.rounds > 1 {
        println!("{}", "=== all rounds ===".bold());
        println!("{}", classroom.report(Scope::All).await?);
    }
    Ok(())
}
