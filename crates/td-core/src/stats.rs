//! Gameplay statistics: per-session counters and the persisted aggregate.
//!
//! The text form is one `key=value` pair per line. Parsing is lenient:
//! unknown keys and malformed values are logged and skipped so a damaged
//! stats file never blocks play.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Named counter tracked across battles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stat {
    CreepsSpawned,
    CreepsKilled,
    CreepWaves,
    TowersBuilt,
    TowersKilled,
    TowersAmmoOut,
    TowerUpgrades,
    TowerHeals,
    TowerBulletsFired,
    CreepBulletsFired,
    BulletsExpired,
    PlayerDeaths,
    SuperCreepsSpawned,
    SuperCreepsSent,
}

impl Stat {
    /// Every counter, in file order.
    pub const ALL: [Stat; 14] = [
        Stat::CreepsSpawned,
        Stat::CreepsKilled,
        Stat::CreepWaves,
        Stat::TowersBuilt,
        Stat::TowersKilled,
        Stat::TowersAmmoOut,
        Stat::TowerUpgrades,
        Stat::TowerHeals,
        Stat::TowerBulletsFired,
        Stat::CreepBulletsFired,
        Stat::BulletsExpired,
        Stat::PlayerDeaths,
        Stat::SuperCreepsSpawned,
        Stat::SuperCreepsSent,
    ];

    /// Key used in the stats file.
    pub fn key(&self) -> &'static str {
        match self {
            Stat::CreepsSpawned => "creepsSpawned",
            Stat::CreepsKilled => "creepsKilled",
            Stat::CreepWaves => "creepWaves",
            Stat::TowersBuilt => "towersBuilt",
            Stat::TowersKilled => "towersKilled",
            Stat::TowersAmmoOut => "towersAmmoOut",
            Stat::TowerUpgrades => "towerUpgrades",
            Stat::TowerHeals => "towerHeals",
            Stat::TowerBulletsFired => "towerBulletsFired",
            Stat::CreepBulletsFired => "creepBulletsFired",
            Stat::BulletsExpired => "bulletsExpired",
            Stat::PlayerDeaths => "playerDeaths",
            Stat::SuperCreepsSpawned => "superCreepsSpawned",
            Stat::SuperCreepsSent => "superCreepsSent",
        }
    }

    pub fn from_key(key: &str) -> Option<Stat> {
        Stat::ALL.into_iter().find(|s| s.key() == key)
    }

    /// Human-readable label, e.g. "Towers Built".
    pub fn display_name(&self) -> String {
        display_name(self.key())
    }
}

/// Split a camelCase key into capitalized words.
pub fn display_name(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.push(c);
        } else {
            out.push(c);
        }
    }
    out
}

/// Counter accumulator plus high-water marks and play time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub high_score: i64,
    pub high_creep_level: u32,
    pub high_tower_level: u32,
    pub counters: BTreeMap<Stat, u64>,
    /// Accumulated battle time in seconds.
    pub game_time_secs: f64,
}

impl GameStats {
    pub fn get(&self, stat: Stat) -> u64 {
        self.counters.get(&stat).copied().unwrap_or(0)
    }

    pub fn incr(&mut self, stat: Stat) {
        self.add(stat, 1);
    }

    pub fn add(&mut self, stat: Stat, amount: u64) {
        *self.counters.entry(stat).or_insert(0) += amount;
    }

    /// Raise high-water marks to the given values where larger.
    pub fn record_highs(&mut self, score: i64, creep_level: u32, tower_level: u32) {
        self.high_score = self.high_score.max(score);
        self.high_creep_level = self.high_creep_level.max(creep_level);
        self.high_tower_level = self.high_tower_level.max(tower_level);
    }

    /// Fold a finished session into this aggregate.
    pub fn merge(&mut self, session: &GameStats) {
        for (stat, count) in &session.counters {
            self.add(*stat, *count);
        }
        self.record_highs(
            session.high_score,
            session.high_creep_level,
            session.high_tower_level,
        );
        self.game_time_secs += session.game_time_secs;
    }

    /// Parse the `key=value` text form.
    pub fn parse(text: &str) -> GameStats {
        let mut stats = GameStats::default();
        for (lineno, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                warn!(line = lineno + 1, text = line, "stats line missing '='");
                continue;
            };
            let key = key.trim();
            let value = value.trim();
            match key {
                "score" => stats.high_score = parse_value(key, value),
                "creepLevel" => stats.high_creep_level = parse_value(key, value),
                "towerLevel" => stats.high_tower_level = parse_value(key, value),
                "gameTime" => {
                    stats.game_time_secs = parse_value(key, value.trim_end_matches('s'))
                }
                _ => match Stat::from_key(key) {
                    Some(stat) => {
                        let count: u64 = parse_value(key, value);
                        stats.counters.insert(stat, count);
                    }
                    None => warn!(key, "unknown stats key, skipping"),
                },
            }
        }
        stats
    }

    /// Render the `key=value` text form. Every counter is written, even at zero.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "score={}", self.high_score);
        let _ = writeln!(out, "creepLevel={}", self.high_creep_level);
        let _ = writeln!(out, "towerLevel={}", self.high_tower_level);
        for stat in Stat::ALL {
            let _ = writeln!(out, "{}={}", stat.key(), self.get(stat));
        }
        let _ = writeln!(out, "gameTime={:.1}s", self.game_time_secs);
        out
    }

    /// Labelled rows for a stats panel.
    pub fn display_rows(&self) -> Vec<(String, String)> {
        let mut rows = vec![
            (display_name("highScore"), self.high_score.to_string()),
            (display_name("highCreepLevel"), self.high_creep_level.to_string()),
            (display_name("highTowerLevel"), self.high_tower_level.to_string()),
        ];
        rows.extend(
            Stat::ALL
                .into_iter()
                .map(|s| (s.display_name(), self.get(s).to_string())),
        );
        rows.push((display_name("gameTime"), format!("{:.0}s", self.game_time_secs)));
        rows
    }
}

fn parse_value<T: std::str::FromStr + Default>(key: &str, value: &str) -> T {
    match value.parse() {
        Ok(v) => v,
        Err(_) => {
            warn!(key, value, "malformed stats value, using 0");
            T::default()
        }
    }
}
