use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use td_app::control;
use td_app::game_loop::LoopSession;
use td_app::replication::{ChannelSink, NullSink, ReplicationPublisher};
use td_app::state::{AppState, LoopCommand};
use td_core::commands::PlayerCommand;
use td_core::config::GameConfig;
use td_core::constants::*;
use td_core::stats::Stat;

#[derive(Parser, Debug)]
#[command(name = "td")]
#[command(about = "Tower defense battle engine")]
struct Args {
    /// Board width in pixels
    #[arg(long, default_value_t = DEFAULT_BOARD_WIDTH)]
    width: i32,

    /// Board height in pixels
    #[arg(long, default_value_t = DEFAULT_BOARD_HEIGHT)]
    height: i32,

    /// Simulation passes per second (0 pauses, max 60)
    #[arg(long, default_value_t = MAX_SIM_SPEED)]
    speed: u32,

    /// Tower levels credited at battle start
    #[arg(long, default_value_t = 0)]
    level: u32,

    /// Debug overlay and debug logging
    #[arg(long)]
    debug: bool,

    /// Let the computer play
    #[arg(long)]
    computer: bool,

    /// Computer speed, 1 to 5
    #[arg(long, default_value_t = DEFAULT_COMPUTER_LEVEL)]
    complevel: u32,

    /// Start with sound cues off
    #[arg(long)]
    nosound: bool,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Lifetime statistics file
    #[arg(long, default_value = "score/stats.txt")]
    stats_file: String,

    /// Run this many engine ticks without a frontend, then print a summary
    #[arg(long)]
    headless_ticks: Option<u64>,
}

impl Args {
    fn config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            speed: self.speed,
            starting_level: self.level,
            debug: self.debug,
            sound: !self.nosound,
            computer: self.computer,
            computer_level: self.complevel,
            seed: self.seed,
            stats_path: self.stats_file.clone(),
            ..Default::default()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = args.config();
    match args.headless_ticks {
        Some(ticks) => run_headless(config, ticks),
        None => run_interactive(config),
    }
}

/// Run a battle to completion or `ticks`, whichever comes first.
fn run_headless(config: GameConfig, ticks: u64) -> Result<(), Box<dyn std::error::Error>> {
    info!(ticks, seed = config.seed, "headless run");
    let mut session = LoopSession::new(config, ReplicationPublisher::new(Box::new(NullSink)));
    session.handle(LoopCommand::Player(PlayerCommand::StartBattle));

    let mut last = None;
    for _ in 0..ticks {
        let snapshot = session.step();
        let over = snapshot.battle.game_over;
        last = Some(snapshot);
        if over {
            break;
        }
    }
    let stats = session.engine().session_stats().clone();
    session.shutdown();

    let Some(snapshot) = last else {
        return Ok(());
    };
    let mut out = io::stdout().lock();
    writeln!(out, "ticks:        {}", snapshot.time.tick)?;
    writeln!(out, "game over:    {}", snapshot.battle.game_over)?;
    writeln!(out, "score:        {}", snapshot.player.score)?;
    writeln!(out, "money:        {}", snapshot.player.money)?;
    writeln!(out, "base health:  {}", snapshot.player.health)?;
    writeln!(out, "creep level:  {}", snapshot.player.creep_level)?;
    for stat in [Stat::CreepsKilled, Stat::CreepWaves, Stat::TowersBuilt, Stat::TowerUpgrades] {
        writeln!(out, "{:<13} {}", format!("{}:", stat.display_name()), stats.get(stat))?;
    }

    writeln!(out, "\nlifetime:")?;
    for (label, value) in session.lifetime_stats().display_rows() {
        writeln!(out, "  {label:<24} {value}")?;
    }
    Ok(())
}

/// Read JSON player commands from stdin, one per line, and write
/// replication payloads to stdout until stdin closes.
fn run_interactive(config: GameConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new();
    let (sink, payloads) = ChannelSink::pair();
    control::start_session(&state, config, ReplicationPublisher::new(Box::new(sink)))?;

    // Ends when the loop drops its sink.
    let printer = std::thread::Builder::new()
        .name("td-replication-out".into())
        .spawn(move || {
            let mut out = io::stdout().lock();
            for payload in payloads {
                if writeln!(out, "{payload}").is_err() {
                    break;
                }
            }
        })?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<PlayerCommand>(&line) {
            Ok(command) => control::send_command(&state, command)?,
            Err(err) => warn!(%err, %line, "ignoring unparseable command"),
        }
    }

    control::stop_session(&state)?;
    let _ = printer.join();
    Ok(())
}
