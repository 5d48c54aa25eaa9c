//! Delve Headless Balance Simulator
//!
//! Plays whole sessions with an autopilot instead of a human, using the same
//! `Session` loop as the real game and the offline riddle bank.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --runs N         Sessions to play with incrementing seeds (default: 100)
//!   --seed N         First RNG seed (default: 42)
//!   --rooms N        Rooms to survive before the exit (default: 10)
//!   --endless        No exit: play until death or the room cap
//!   --max-rooms N    Autopilot withdraws after N rooms (default: 10000)
//!   --flee N         Percent chance the autopilot runs instead of attacking (default: 0)
//!   --solve N        Percent chance the autopilot knows a riddle's answer (default: 50)
//!   --quiet          Only the final summary

use delve::console::{Console, Prompt, Tone};
use delve::riddle::{answer_key, RiddleBank};
use delve::{Dice, GameConfig, RngDice, Session, SessionOutcome, SessionSummary};
use std::io;

// ── CLI Configuration ────────────────────────────────────────────────

/// Endless runs with a strong autopilot can outheal every enemy forever.
const DEFAULT_MAX_ROOMS: u32 = 10_000;

struct SimConfig {
    runs: u32,
    seed: u64,
    exit_after_rooms: Option<u32>,
    max_rooms: u32,
    flee_percent: u32,
    solve_percent: u32,
    quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            runs: 100,
            seed: 42,
            exit_after_rooms: Some(10),
            max_rooms: DEFAULT_MAX_ROOMS,
            flee_percent: 0,
            solve_percent: 50,
            quiet: false,
        }
    }
}

fn parse_number<T: std::str::FromStr>(args: &[String], i: &mut usize) -> Result<T, String> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| format!("{flag} requires a number"))
}

fn parse_positive(args: &[String], i: &mut usize) -> Result<u32, String> {
    let flag = args[*i].clone();
    match parse_number::<u32>(args, i)? {
        0 => Err(format!("{flag} must be at least 1")),
        n => Ok(n),
    }
}

fn parse_args() -> Result<SimConfig, String> {
    let args: Vec<String> = std::env::args().collect();
    let mut config = SimConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => config.runs = parse_number(&args, &mut i)?,
            "--seed" => config.seed = parse_number(&args, &mut i)?,
            "--rooms" => config.exit_after_rooms = Some(parse_positive(&args, &mut i)?),
            "--endless" => config.exit_after_rooms = None,
            "--max-rooms" => config.max_rooms = parse_positive(&args, &mut i)?,
            "--flee" => config.flee_percent = parse_number::<u32>(&args, &mut i)?.min(100),
            "--solve" => config.solve_percent = parse_number::<u32>(&args, &mut i)?.min(100),
            "--quiet" => config.quiet = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
        i += 1;
    }
    Ok(config)
}

fn print_usage() {
    eprintln!(
        "Delve Headless Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --runs N      Sessions to play (default: 100)\n\
         \x20 --seed N      First RNG seed (default: 42)\n\
         \x20 --rooms N     Rooms to survive before the exit (default: 10)\n\
         \x20 --endless     No exit: play until death or the room cap\n\
         \x20 --max-rooms N Withdraw after N rooms (default: 10000)\n\
         \x20 --flee N      Percent chance to run instead of attacking (default: 0)\n\
         \x20 --solve N     Percent chance to know a riddle's answer (default: 50)\n\
         \x20 --quiet       Only the final summary\n\
         \x20 --help, -h    Show this help"
    );
}

// ── Autopilot ────────────────────────────────────────────────────────

/// Answers every prompt without a human. Riddles are checked against the
/// bank's answer key so the autopilot can be right or wrong on purpose.
struct Autopilot {
    dice: RngDice<rand_chacha::ChaCha8Rng>,
    flee_percent: u32,
    solve_percent: u32,
    max_rooms: u32,
    rooms_cleared: u32,
    lines_shown: u64,
}

impl Autopilot {
    fn chance(&mut self, percent: u32) -> bool {
        percent > 0 && self.dice.roll(1, 100) <= percent
    }
}

impl Console for Autopilot {
    fn ask(&mut self, prompt: &Prompt) -> io::Result<Option<String>> {
        let answer = match prompt {
            Prompt::PlayerName => "Autopilot".to_string(),
            Prompt::BattleAction { .. } => {
                if self.chance(self.flee_percent) {
                    "run".to_string()
                } else {
                    "attack".to_string()
                }
            }
            Prompt::RiddleAnswer { question } => {
                let truth = answer_key(question).unwrap_or(true);
                let answer = if self.chance(self.solve_percent) {
                    truth
                } else {
                    !truth
                };
                answer.to_string()
            }
            Prompt::NextRoom => {
                self.rooms_cleared += 1;
                if self.rooms_cleared >= self.max_rooms {
                    "n".to_string()
                } else {
                    "y".to_string()
                }
            }
        };
        Ok(Some(answer))
    }

    fn show(&mut self, _text: &str, _tone: Tone) {
        self.lines_shown += 1;
    }
}

// ── Simulation ───────────────────────────────────────────────────────

fn run_session(config: &SimConfig, seed: u64) -> io::Result<SessionSummary> {
    let game = GameConfig {
        exit_after_rooms: config.exit_after_rooms,
        offline: true,
        seed: Some(seed),
        ..GameConfig::default()
    };
    let mut dice = RngDice::seeded(seed);
    let mut riddles = RiddleBank::new(RngDice::seeded(seed.wrapping_add(1)));
    let mut autopilot = Autopilot {
        dice: RngDice::seeded(seed.wrapping_add(2)),
        flee_percent: config.flee_percent,
        solve_percent: config.solve_percent,
        max_rooms: config.max_rooms,
        rooms_cleared: 0,
        lines_shown: 0,
    };

    let summary = Session::new(game, &mut dice, &mut riddles, &mut autopilot).run()?;
    tracing::debug!(seed, lines = autopilot.lines_shown, "run complete");
    Ok(summary)
}

fn avg(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| *v as f64).sum::<f64>() / values.len() as f64
}

fn column(all: &[SessionSummary], field: fn(&SessionSummary) -> u32) -> Vec<u32> {
    all.iter().map(field).collect()
}

fn print_summary(all: &[SessionSummary]) {
    let runs = all.len().max(1) as f64;
    let pct = |outcome: SessionOutcome| {
        all.iter().filter(|s| s.outcome == outcome).count() as f64 * 100.0 / runs
    };

    println!("=== {} runs ===", all.len());
    println!("Victory     {:>6.1}%", pct(SessionOutcome::Victory));
    println!("Defeat      {:>6.1}%", pct(SessionOutcome::Defeat));
    println!("Withdrawal  {:>6.1}%", pct(SessionOutcome::Withdrawal));
    println!();
    println!("{:<20} {:>10}", "Metric", "Avg");
    println!("{:<20} {:>10.1}", "Rooms", avg(&column(all, |s| s.rooms_explored)));
    println!("{:<20} {:>10.1}", "Final Health", avg(&column(all, |s| s.final_health)));
    println!("{:<20} {:>10.1}", "Battles Won", avg(&column(all, |s| s.battles_won)));
    println!("{:<20} {:>10.1}", "Escapes", avg(&column(all, |s| s.escapes)));
    println!("{:<20} {:>10.1}", "Riddles Solved", avg(&column(all, |s| s.riddles_solved)));
    println!("{:<20} {:>10.1}", "Riddles Failed", avg(&column(all, |s| s.riddles_failed)));
    println!("{:<20} {:>10.1}", "Treasures", avg(&column(all, |s| s.treasures_found)));
}

// ── Main ─────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "delve=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("{msg}");
            print_usage();
            std::process::exit(1);
        }
    };

    if !config.quiet {
        eprintln!(
            "Delve Simulator: {} run(s), seed={}, exit={:?}, cap={}, flee={}%, solve={}%",
            config.runs,
            config.seed,
            config.exit_after_rooms,
            config.max_rooms,
            config.flee_percent,
            config.solve_percent,
        );
    }

    let mut all = Vec::with_capacity(config.runs as usize);
    for run in 0..config.runs {
        let seed = config.seed + run as u64;
        match run_session(&config, seed) {
            Ok(summary) => {
                if !config.quiet {
                    println!(
                        "  Run {}: {} after {} rooms, health={} won={} fled={}",
                        run + 1,
                        summary.outcome,
                        summary.rooms_explored,
                        summary.final_health,
                        summary.battles_won,
                        summary.escapes,
                    );
                }
                all.push(summary);
            }
            Err(err) => {
                eprintln!("Run {} failed: {err}", run + 1);
                std::process::exit(1);
            }
        }
    }

    println!();
    print_summary(&all);
}
