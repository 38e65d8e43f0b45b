use td_sim::core::commands::PlayerCommand;
use td_sim::core::config::GameConfig;
use td_sim::core::enums::{EntityKind, GamePhase};
use td_sim::core::stats::{GameStats, Stat};
use td_sim::BattleEngine;

fn config(seed: u64) -> GameConfig {
    GameConfig {
        seed,
        computer: true,
        computer_level: 5,
        ..Default::default()
    }
}

fn run_battle(seed: u64, ticks: u32) -> Vec<String> {
    let mut engine = BattleEngine::new(config(seed), GameStats::default());
    engine.queue_command(PlayerCommand::StartBattle);

    (0..ticks)
        .map(|_| serde_json::to_string(&engine.tick()).unwrap())
        .collect()
}

#[test]
fn identical_seeds_produce_identical_snapshots() {
    let run1 = run_battle(12345, 900);
    let run2 = run_battle(12345, 900);

    assert_eq!(run1.len(), run2.len());
    for (tick, (a, b)) in run1.iter().zip(&run2).enumerate() {
        assert_eq!(a, b, "snapshots diverged at tick {tick}");
    }
}

#[test]
fn different_seeds_diverge() {
    let run1 = run_battle(111, 900);
    let run2 = run_battle(222, 900);
    assert_ne!(
        run1.last(),
        run2.last(),
        "different seeds should roll different waves"
    );
}

#[test]
fn battle_actually_plays_out() {
    let mut engine = BattleEngine::new(config(7), GameStats::default());
    engine.queue_command(PlayerCommand::StartBattle);
    let mut saw_creep = false;
    for _ in 0..900 {
        let snap = engine.tick();
        saw_creep |= snap.count(EntityKind::Creep) > 0;
    }
    assert!(saw_creep, "no wave spawned in 900 ticks");
}

#[test]
fn reset_returns_to_initial_battle_state() {
    let config = GameConfig {
        seed: 99,
        ..Default::default()
    };
    let mut engine = BattleEngine::new(config, GameStats::default());
    engine.queue_command(PlayerCommand::StartBattle);
    let initial = engine.tick();
    for _ in 0..600 {
        engine.tick();
    }

    engine.queue_command(PlayerCommand::Reset);
    let after_reset = engine.tick();

    assert_eq!(after_reset.phase, GamePhase::Running);
    assert_eq!(after_reset.time, initial.time);
    assert_eq!(after_reset.player, initial.player);
    assert_eq!(after_reset.count(EntityKind::Player), 1);
    assert_eq!(after_reset.entities.len(), 1);
    assert_eq!(after_reset.session_stats, GameStats::default());
}

#[test]
fn finished_sessions_accumulate_across_resets() {
    let mut engine = BattleEngine::new(config(5), GameStats::default());
    engine.queue_command(PlayerCommand::StartBattle);
    for _ in 0..3 {
        for _ in 0..300 {
            engine.tick();
        }
        engine.queue_command(PlayerCommand::Reset);
        engine.tick();
    }

    let sessions = engine.take_finished_sessions();
    assert_eq!(sessions.len(), 3);
    let built: u64 = sessions
        .iter()
        .map(|s| s.get(Stat::TowersBuilt))
        .sum();
    assert_eq!(
        engine.lifetime_stats().get(Stat::TowersBuilt),
        built
    );
    assert!(engine.take_finished_sessions().is_empty());
}
