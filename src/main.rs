use anyhow::{bail, Context};
use delve::console::TerminalConsole;
use delve::core::constants::{EXIT_FAILURE, HISTORY_CAPACITY};
use delve::history::RunHistory;
use delve::riddle::{OpenTriviaProvider, RiddleBank, RiddleProvider};
use delve::utils::build_info::version_line;
use delve::{Dice, GameConfig, RngDice, Session, SessionOutcome};

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "delve=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    println!("Delve - Turn-Based Dungeon Adventure\n");
    println!("Usage: delve [command] [options]\n");
    println!("Commands:");
    println!("  history        Show recorded runs");
    println!("  --version      Show version information");
    println!("  --help         Show this help message\n");
    println!("Options:");
    println!("  --seed N       Replay the dungeon from a seed");
    println!("  --rooms N      Rooms to survive before the exit appears");
    println!("  --endless      No exit: play until death or withdrawal");
    println!("  --health N     Starting health");
    println!("  --timeout SECS Riddle service timeout");
    println!("  --offline      Use built-in riddles instead of the trivia service");
    println!("  --no-color     Plain output");
}

fn print_history() {
    let history = RunHistory::load();
    if history.runs.is_empty() {
        println!("No runs recorded yet.");
        return;
    }
    println!("Last {} runs (newest first):", HISTORY_CAPACITY.min(history.runs.len()));
    for line in history.lines() {
        println!("  {}", line);
    }
    println!(
        "\nVictories: {}  Defeats: {}  Withdrawals: {}",
        history.count(SessionOutcome::Victory),
        history.count(SessionOutcome::Defeat),
        history.count(SessionOutcome::Withdrawal)
    );
    if let Some(best) = history.deepest_run() {
        println!(
            "Deepest run: {} with {} rooms",
            best.player_name, best.rooms_explored
        );
    }
}

fn play(args: &[String]) -> anyhow::Result<SessionOutcome> {
    let mut config = GameConfig::load();
    if let Err(msg) = config.apply_args(args) {
        bail!("{}\nRun 'delve --help' for usage.", msg);
    }

    let mut dice: Box<dyn Dice> = match config.seed {
        Some(seed) => Box::new(RngDice::seeded(seed)),
        None => Box::new(RngDice::from_entropy()),
    };
    let mut riddles: Box<dyn RiddleProvider> = if config.offline {
        match config.seed {
            Some(seed) => Box::new(RiddleBank::new(RngDice::seeded(seed.wrapping_add(1)))),
            None => Box::new(RiddleBank::new(RngDice::from_entropy())),
        }
    } else {
        Box::new(OpenTriviaProvider::new(config.riddle_timeout()))
    };
    let mut console = TerminalConsole::new(config.color);

    let summary = Session::new(config, &mut *dice, &mut *riddles, &mut console)
        .run()
        .context("console failure")?;

    let outcome = summary.outcome;
    let mut history = RunHistory::load();
    history.record(summary);
    if let Err(err) = history.save() {
        tracing::warn!(%err, "could not save run history");
    }
    Ok(outcome)
}

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("history") => {
            print_history();
            std::process::exit(0);
        }
        Some("--version") | Some("-v") => {
            println!("{}", version_line());
            std::process::exit(0);
        }
        Some("--help") | Some("-h") => {
            print_usage();
            std::process::exit(0);
        }
        _ => {}
    }

    let code = match play(&args) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("{:#}", err);
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}
