//! Personal Invaders - a Space Invaders style arcade shooter
//!
//! Core modules:
//! - `sim`: Gameplay field (entities, input intent, collisions, per-frame pipeline)
//! - `game`: Screen state machine around the field (start, play, pause, lose)
//! - `highscores`: Persisted alias:score table
//! - `settings`: JSON settings file
//! - `audio`, `render`: Collaborator boundaries for sound and drawing
//! - `assets`: Asset manifest verification

pub mod assets;
pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::{AssetError, PersistenceError, SettingsError};
pub use game::{Game, MenuAction, Screen};
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Window dimensions (the playing field fills the window)
    pub const WINDOW_WIDTH: f32 = 1024.0;
    pub const WINDOW_HEIGHT: f32 = 768.0;

    /// Horizontal limits for the player and for enemy border detection
    pub const LEFT_BORDER: f32 = 95.0;
    pub const RIGHT_BORDER: f32 = 890.0;

    /// Projectiles past this line (or above y=0) are culled
    pub const PROJECTILE_CULL_Y: f32 = 800.0;

    /// Player
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    /// Pixels per second at walking pace
    pub const PLAYER_SPEED: f32 = 250.0;
    /// Speed multiplier while running with energy left
    pub const RUN_MULTIPLIER: f32 = 2.0;
    pub const MAX_ENERGY: f32 = 50.0;
    /// One point of energy comes back every interval while not running
    pub const ENERGY_REGEN_INTERVAL: f32 = 0.5;
    /// Energy drained per second of running (one point per frame at 60 Hz)
    pub const ENERGY_DRAIN_RATE: f32 = 60.0;
    pub const PLAYER_SHOT_COOLDOWN: f32 = 1.0;
    /// Hit feedback window: no movement, no further damage
    pub const PLAYER_STUN_SECS: f32 = 2.0;

    /// Grid enemies
    pub const ENEMY_WIDTH: f32 = 40.0;
    pub const ENEMY_HEIGHT: f32 = 30.0;
    /// Enemies start this far above their entry row
    pub const ENEMY_ENTRY_OFFSET: f32 = 200.0;
    pub const ENEMY_ENTRY_TICK: f32 = 0.03;
    pub const ENEMY_ENTRY_STEP: f32 = 5.0;
    pub const ENEMY_PATROL_TICK: f32 = 0.5;
    pub const ENEMY_PATROL_STEP: f32 = 10.0;
    pub const ENEMY_TURN_COOLDOWN: f32 = 3.0;
    pub const ENEMY_DROP_ON_TURN: f32 = 30.0;
    pub const ENEMY_SHOT_COOLDOWN: f32 = 1.0;
    /// One in N chance of firing when a shot is due
    pub const ENEMY_FIRE_ODDS: u32 = 10;
    pub const ENEMY_POINTS: u64 = 50;

    /// Swarm formation
    pub const GRID_COLUMNS: usize = 12;
    pub const GRID_ROWS: usize = 4;
    pub const GRID_COLUMN_SPACING: f32 = 50.0;
    pub const GRID_X_OFFSET: f32 = 40.0;
    pub const GRID_TOP: f32 = 100.0;
    pub const GRID_ROW_SPACING: f32 = 75.0;

    /// Boss (texture extent before scaling)
    pub const BOSS_TEXTURE_WIDTH: f32 = 150.0;
    pub const BOSS_TEXTURE_HEIGHT: f32 = 80.0;
    pub const BOSS_SCALE: f32 = 0.7;
    pub const BOSS_DAMAGED_SCALE: f32 = 0.5;
    pub const BOSS_START_X: f32 = -105.0;
    pub const BOSS_START_Y: f32 = 50.0;
    /// Seconds of boss-cycle time before a crossing starts
    pub const BOSS_INTERVAL: f32 = 30.0;
    pub const BOSS_SPEED: f32 = 250.0 / 1.5;
    pub const BOSS_HEALTH: u8 = 2;
    pub const BOSS_POINTS: u64 = 250;

    /// Crates
    pub const BLOCK_SIZE: f32 = 30.0;
    pub const BLOCK_HEALTH: u8 = 3;
    pub const BLOCK_BATCHES: usize = 3;
    pub const BLOCK_COLUMNS: usize = 4;
    pub const BLOCK_ROWS: usize = 3;
    pub const BLOCK_START_X: f32 = 160.0;
    pub const BLOCK_TOP: f32 = 550.0;

    /// Projectiles
    pub const PROJECTILE_WIDTH: f32 = 6.0;
    pub const PROJECTILE_HEIGHT: f32 = 16.0;
    pub const PLAYER_PROJECTILE_SPEED: f32 = 250.0 / 0.6;
    pub const ENEMY_PROJECTILE_SPEED: f32 = 250.0 / 0.4;
    /// Vertical gap between shooter and spawned projectile
    pub const PROJECTILE_SPAWN_OFFSET: f32 = 40.0;

    /// Lives
    pub const STARTING_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 3;
}
