//! Storage boundary: where saved cities, offline actions, the player roster
//! and friend assists live.
//!
//! Loads never fail hard. Missing or unreadable city data is logged and
//! reported as `None` so the caller can start a fresh city.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use simulation::game_actions::QueuedAction;

use crate::atomic_write::atomic_write;
use crate::save_error::SaveError;
use crate::serialization::{decode_city, serialize_city, CitySave, LoadedCity};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode,
)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub friends: Vec<PlayerId>,
    /// Cities this player has saved.
    #[serde(default)]
    pub cities: Vec<u64>,
}

/// A player together with the roster entries of their friends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerAndFriends {
    pub player: Player,
    pub friends: Vec<Player>,
}

/// Help sent from one player to a friend's city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assist {
    pub from: PlayerId,
    pub to: PlayerId,
    pub city_id: u64,
    pub amount: f64,
}

pub trait CityStorage: Send + Sync {
    fn load_city(&self, player: PlayerId, city_id: u64) -> Option<LoadedCity>;
    fn save_city(&mut self, player: PlayerId, save: &CitySave) -> Result<(), SaveError>;
    fn queue_action(&mut self, action: QueuedAction) -> Result<(), SaveError>;
    fn queued_actions(&self) -> Vec<QueuedAction>;
    fn clear_queued_actions(&mut self) -> Result<(), SaveError>;
    fn player_and_friends(&self, player: PlayerId) -> Option<PlayerAndFriends>;
    fn send_assist(&mut self, assist: Assist) -> Result<(), SaveError>;
}

fn decode_or_warn(player: PlayerId, city_id: u64, bytes: &[u8]) -> Option<LoadedCity> {
    match decode_city(bytes) {
        Ok(loaded) => Some(loaded),
        Err(e) => {
            warn!("Discarding unreadable city {city_id} of {player}: {e}");
            None
        }
    }
}

fn validate_assist(assist: &Assist) -> Result<(), SaveError> {
    if !assist.amount.is_finite() || assist.amount <= 0.0 {
        return Err(SaveError::Encode(format!(
            "assist amount must be positive, got {}",
            assist.amount
        )));
    }
    Ok(())
}

fn resolve_friends(roster: &BTreeMap<PlayerId, Player>, player: PlayerId) -> Option<PlayerAndFriends> {
    let player = roster.get(&player)?.clone();
    let friends = player
        .friends
        .iter()
        .filter_map(|id| roster.get(id).cloned())
        .collect();
    Some(PlayerAndFriends { player, friends })
}

fn record_city(roster: &mut BTreeMap<PlayerId, Player>, player: PlayerId, city_id: u64) {
    let entry = roster.entry(player).or_insert_with(|| Player {
        id: player,
        name: player.to_string(),
        friends: Vec::new(),
        cities: Vec::new(),
    });
    if !entry.cities.contains(&city_id) {
        entry.cities.push(city_id);
    }
}

// ---------------------------------------------------------------------------
// MemoryStorage
// ---------------------------------------------------------------------------

/// Keeps encoded saves in memory. Used by tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    cities: BTreeMap<(PlayerId, u64), Vec<u8>>,
    actions: Vec<QueuedAction>,
    players: BTreeMap<PlayerId, Player>,
    assists: Vec<Assist>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_player(&mut self, player: Player) {
        self.players.insert(player.id, player);
    }

    pub fn assists(&self) -> &[Assist] {
        &self.assists
    }

    /// Raw encoded bytes of a save, for tests that tamper with them.
    pub fn raw_save_mut(&mut self, player: PlayerId, city_id: u64) -> Option<&mut Vec<u8>> {
        self.cities.get_mut(&(player, city_id))
    }
}

impl CityStorage for MemoryStorage {
    fn load_city(&self, player: PlayerId, city_id: u64) -> Option<LoadedCity> {
        let bytes = self.cities.get(&(player, city_id))?;
        decode_or_warn(player, city_id, bytes)
    }

    fn save_city(&mut self, player: PlayerId, save: &CitySave) -> Result<(), SaveError> {
        let bytes = serialize_city(save)?;
        self.cities.insert((player, save.id), bytes);
        record_city(&mut self.players, player, save.id);
        Ok(())
    }

    fn queue_action(&mut self, action: QueuedAction) -> Result<(), SaveError> {
        self.actions.push(action);
        Ok(())
    }

    fn queued_actions(&self) -> Vec<QueuedAction> {
        self.actions.clone()
    }

    fn clear_queued_actions(&mut self) -> Result<(), SaveError> {
        self.actions.clear();
        Ok(())
    }

    fn player_and_friends(&self, player: PlayerId) -> Option<PlayerAndFriends> {
        resolve_friends(&self.players, player)
    }

    fn send_assist(&mut self, assist: Assist) -> Result<(), SaveError> {
        validate_assist(&assist)?;
        self.assists.push(assist);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStorage
// ---------------------------------------------------------------------------

const ACTIONS_FILE: &str = "actions.bin";
const PLAYERS_FILE: &str = "players.json";
const ASSISTS_FILE: &str = "assists.json";

/// Directory-backed storage. Layout:
///
/// ```text
/// {root}/players.json
/// {root}/assists.json
/// {root}/actions.bin            bitcode Vec<QueuedAction>
/// {root}/cities/{player}/{city}.tile
/// ```
///
/// Every write goes through [`atomic_write`].
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn city_path(&self, player: PlayerId, city_id: u64) -> PathBuf {
        self.root
            .join("cities")
            .join(player.0.to_string())
            .join(format!("{city_id}.tile"))
    }

    pub fn add_player(&mut self, player: Player) -> Result<(), SaveError> {
        let mut roster = self.read_players();
        roster.insert(player.id, player);
        self.write_players(&roster)
    }

    pub fn assists(&self) -> Vec<Assist> {
        self.read_json(ASSISTS_FILE).unwrap_or_default()
    }

    /// Missing files read as `None`; unreadable ones are logged first.
    fn read_optional(&self, name: &str) -> Option<Vec<u8>> {
        match fs::read(self.root.join(name)) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read {name}: {e}");
                None
            }
        }
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, name: &str) -> Option<T> {
        let bytes = self.read_optional(name)?;
        serde_json::from_slice(&bytes)
            .inspect_err(|e| warn!("Ignoring malformed {name}: {e}"))
            .ok()
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<(), SaveError> {
        let bytes = serde_json::to_vec_pretty(value).map_err(|e| SaveError::Encode(e.to_string()))?;
        atomic_write(&self.root.join(name), &bytes)?;
        Ok(())
    }

    fn read_players(&self) -> BTreeMap<PlayerId, Player> {
        self.read_json::<Vec<Player>>(PLAYERS_FILE)
            .unwrap_or_default()
            .into_iter()
            .map(|p| (p.id, p))
            .collect()
    }

    fn write_players(&self, roster: &BTreeMap<PlayerId, Player>) -> Result<(), SaveError> {
        let players: Vec<&Player> = roster.values().collect();
        self.write_json(PLAYERS_FILE, &players)
    }

    fn write_actions(&self, actions: Vec<QueuedAction>) -> Result<(), SaveError> {
        atomic_write(&self.root.join(ACTIONS_FILE), &bitcode::encode(&actions))?;
        Ok(())
    }
}

impl CityStorage for FileStorage {
    fn load_city(&self, player: PlayerId, city_id: u64) -> Option<LoadedCity> {
        let path = self.city_path(player, city_id);
        match fs::read(&path) {
            Ok(bytes) => decode_or_warn(player, city_id, &bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read {}: {e}", path.display());
                None
            }
        }
    }

    fn save_city(&mut self, player: PlayerId, save: &CitySave) -> Result<(), SaveError> {
        let bytes = serialize_city(save)?;
        atomic_write(&self.city_path(player, save.id), &bytes)?;
        let mut roster = self.read_players();
        record_city(&mut roster, player, save.id);
        self.write_players(&roster)?;
        info!(
            "Saved city {} ({} bytes) for {player}",
            save.id,
            bytes.len()
        );
        Ok(())
    }

    fn queue_action(&mut self, action: QueuedAction) -> Result<(), SaveError> {
        let mut actions = self.queued_actions();
        actions.push(action);
        self.write_actions(actions)
    }

    fn queued_actions(&self) -> Vec<QueuedAction> {
        let Some(bytes) = self.read_optional(ACTIONS_FILE) else {
            return Vec::new();
        };
        bitcode::decode(&bytes)
            .inspect_err(|e| warn!("Dropping unreadable action queue: {e}"))
            .unwrap_or_default()
    }

    fn clear_queued_actions(&mut self) -> Result<(), SaveError> {
        match fs::remove_file(self.root.join(ACTIONS_FILE)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn player_and_friends(&self, player: PlayerId) -> Option<PlayerAndFriends> {
        resolve_friends(&self.read_players(), player)
    }

    fn send_assist(&mut self, assist: Assist) -> Result<(), SaveError> {
        validate_assist(&assist)?;
        let mut assists = self.assists();
        assists.push(assist);
        self.write_json(ASSISTS_FILE, &assists)
    }
}
