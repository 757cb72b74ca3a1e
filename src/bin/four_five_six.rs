//! Terminal front-end for the 4-5-6 table.
//!
//! Usage:
//!   four-five-six                      # interactive
//!   four-five-six --auto 20 --json     # play 20 rounds, one JSON summary per line

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use four_five_six::core::{GameConfig, GameError, GamePhase, RollerKind};
use four_five_six::game::RollReport;
use four_five_six::session::Session;

/// Rolls shown in the recent-history panel.
const RECENT_ROLLS: usize = 5;

#[derive(Parser, Debug)]
#[command(name = "four-five-six")]
#[command(about = "Play 4-5-6 dice against the house banker")]
struct Args {
    /// JSON config file (missing fields take defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the dice (default: OS entropy)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Dice roller: physics or synthetic
    #[arg(long)]
    roller: Option<RollerKind>,

    /// Initial wager
    #[arg(short, long)]
    bet: Option<i64>,

    /// Pause between banker rolls in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Play this many rounds automatically instead of reading commands
    #[arg(long)]
    auto: Option<u32>,

    /// With --auto, print each round summary as a JSON line
    #[arg(long, requires = "auto")]
    json: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("four-five-six failed: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let config = build_config(&args)?;
    let mut session = Session::new(config).context("failed to set up the table")?;
    info!(roller = session.roller_name(), "table ready");

    match args.auto {
        Some(rounds) => autoplay(&mut session, rounds, args.json),
        None => interactive(&mut session),
    }
}

fn init_tracing(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn build_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };

    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(roller) = args.roller {
        config = config.with_roller(roller);
    }
    if let Some(bet) = args.bet {
        config = config.with_default_bet(bet);
    }
    if let Some(delay) = args.delay_ms {
        config = config.with_banker_roll_delay_ms(delay);
    } else if args.auto.is_some() {
        config = config.with_banker_roll_delay_ms(0);
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

// =============================================================================
// Automatic play
// =============================================================================

fn autoplay(session: &mut Session, rounds: u32, json: bool) -> Result<()> {
    for round in 1..=rounds {
        if !session.game().can_bet() {
            println!("Table closed: one side is out of money.");
            break;
        }

        let bet = session.game().wager();
        let summary = match session.play_round(bet) {
            Ok(summary) => summary,
            Err(err) if err.is_recoverable() => {
                println!("{err}");
                break;
            }
            Err(err) => return Err(err.into()),
        };
        if json {
            println!("{}", serde_json::to_string(&summary)?);
        } else {
            println!(
                "Round {round}: bet ${bet}, {} ({} rolls). Player ${}, Banker ${}",
                session.game().message(),
                summary.records.len(),
                summary.ledger.player_money,
                summary.ledger.banker_money,
            );
        }
        session.new_game()?;
    }
    Ok(())
}

// =============================================================================
// Interactive play
// =============================================================================

fn interactive(session: &mut Session) -> Result<()> {
    println!("4-5-6 DICE  (dice: {})", session.roller_name());
    print_help();
    render(session);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else { continue };

        match command {
            "quit" | "q" | "exit" => break,
            "help" | "h" | "?" => print_help(),
            "history" => print_history(session),
            "bet" => match words.next().map(str::parse::<i64>) {
                Some(Ok(amount)) => adjust_bet(session, |s| s.game_mut().set_bet(amount))?,
                _ => println!("Usage: bet <amount>"),
            },
            "+" => adjust_bet(session, |s| s.game_mut().raise_bet())?,
            "-" => adjust_bet(session, |s| s.game_mut().lower_bet())?,
            "start" | "s" => start(session)?,
            "roll" | "r" => roll(session)?,
            "new" | "n" => new_game(session)?,
            other => println!("Unknown command '{other}'. Type 'help'."),
        }
    }
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  bet <n> | + | -   set, raise or lower the wager");
    println!("  start             start the round (the banker rolls first)");
    println!("  roll              roll the dice on your turn");
    println!("  new               new game after a round is over");
    println!("  history           all rolls this round");
    println!("  quit");
}

fn adjust_bet(
    session: &mut Session,
    change: impl FnOnce(&mut Session) -> Result<i64, GameError>,
) -> Result<()> {
    if session.game().phase() != GamePhase::Betting {
        println!("The wager can only change before the round starts.");
        return Ok(());
    }
    let wager = change(session)?;
    println!("Bet: ${wager} (max ${})", session.game().max_bet());
    Ok(())
}

fn start(session: &mut Session) -> Result<()> {
    if session.game().phase() != GamePhase::Betting {
        println!("A round is already under way.");
        return Ok(());
    }

    match session.start_round() {
        Ok(()) => {}
        Err(err) if err.is_recoverable() => {
            println!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    }

    println!("{}", session.game().message());
    session.roll_banker_with(print_roll)?;
    render(session);
    Ok(())
}

fn roll(session: &mut Session) -> Result<()> {
    if session.game().phase() != GamePhase::PlayerRolling {
        println!("It is not your turn to roll.");
        return Ok(());
    }
    let report = session.roll_player()?;
    print_roll(&report);
    render(session);
    Ok(())
}

fn new_game(session: &mut Session) -> Result<()> {
    if session.game().phase() != GamePhase::GameOver {
        println!("Finish the current round first.");
        return Ok(());
    }
    session.new_game()?;
    if !session.game().can_bet() {
        println!("Table closed: one side is out of money.");
    }
    render(session);
    Ok(())
}

fn print_roll(report: &RollReport) {
    println!("  [{}] {}", report.record.dice, report.message);
}

fn print_history(session: &Session) {
    let history = &session.game().round().history;
    if history.is_empty() {
        println!("No rolls yet this round.");
    }
    for (i, record) in history.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, record);
    }
}

fn render(session: &Session) {
    let game = session.game();
    let ledger = game.ledger();
    println!();
    println!("  Player ${:<6} Banker ${}", ledger.player_money, ledger.banker_money);
    println!("  Dice   {}", game.current_roll());
    if let Some(point) = game.round().banker_point {
        println!("  Banker point: {point}");
    }
    if game.phase() == GamePhase::Betting {
        println!("  Bet    ${} (max ${})", game.wager(), game.max_bet());
    }
    println!("  {}", game.message());

    let recent: Vec<_> = game.recent_history(RECENT_ROLLS).collect();
    if !recent.is_empty() {
        println!("  Recent rolls:");
        for record in recent {
            println!("    {record}");
        }
    }
    println!();
}
