//! Screen state machine around the field
//!
//! Start -> Playing <-> Paused, Playing -> Lost. Restart from Paused or Lost
//! builds a fresh field and goes back to Start. The current score is written
//! to the high score table whenever play pauses and when the round is lost.

use serde::{Deserialize, Serialize};

use crate::audio::{AudioManager, SoundEffect};
use crate::error::PersistenceError;
use crate::highscores::HighScores;
use crate::sim::{Field, FieldEvent, FieldStatus, InputIntent, Key};

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Alias entry, high score table, start/quit buttons
    Start,
    Playing,
    Paused,
    /// High score table, restart/quit buttons
    Lost,
}

/// Menu buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuAction {
    Start,
    Resume,
    Restart,
    Quit,
}

/// Backspace as delivered by text input
const BACKSPACE: char = '\u{8}';

pub struct Game {
    screen: Screen,
    field: Field,
    input: InputIntent,
    highscores: HighScores,
    alias: String,
    audio: AudioManager,
    seed: u64,
    /// Fields built so far; varies the seed across restarts
    rounds: u64,
    quit: bool,
}

impl Game {
    pub fn new(seed: u64, highscores: HighScores, audio: AudioManager) -> Self {
        let mut game = Self {
            screen: Screen::Start,
            field: Field::new(seed),
            input: InputIntent::default(),
            highscores,
            alias: String::new(),
            audio,
            seed,
            rounds: 1,
            quit: false,
        };
        game.audio.play(SoundEffect::BackgroundMusic);
        game
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn highscores(&self) -> &HighScores {
        &self.highscores
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn set_alias(&mut self, alias: &str) {
        self.alias = alias.to_string();
    }

    pub fn input(&self) -> &InputIntent {
        &self.input
    }

    /// Replace the held-key state wholesale (used by the autopilot)
    pub fn set_input(&mut self, input: InputIntent) {
        self.input = input;
    }

    pub fn is_quit(&self) -> bool {
        self.quit
    }

    /// Text typed on the start screen edits the alias.
    /// Backspace removes a character; other control characters are ignored.
    pub fn type_char(&mut self, c: char) {
        if self.screen != Screen::Start {
            return;
        }
        if c == BACKSPACE {
            self.alias.pop();
        } else if !c.is_control() {
            self.alias.push(c);
        }
    }

    /// Key down (`pressed`) or key up while a screen is active.
    ///
    /// While playing, releasing P pauses (and records the score); on the
    /// pause screen it resumes. Every other key feeds the held-key state.
    pub fn handle_key(&mut self, pressed: bool, key: Key) {
        match (self.screen, key) {
            (Screen::Playing, Key::Pause) if !pressed => {
                self.commit_score();
                self.set_screen(Screen::Paused);
            }
            (Screen::Paused, Key::Pause) if !pressed => {
                self.input.clear();
                self.set_screen(Screen::Playing);
            }
            (Screen::Playing, _) => self.input.handle_key(pressed, key),
            _ => {}
        }
    }

    /// Apply a menu button. Returns false when the button does nothing on
    /// the current screen.
    pub fn menu(&mut self, action: MenuAction) -> bool {
        match (action, self.screen) {
            (MenuAction::Quit, _) => {
                log::info!("Quit requested");
                self.quit = true;
                true
            }
            (MenuAction::Start, Screen::Start) => {
                if self.alias.is_empty() {
                    log::warn!("An alias is needed before starting");
                    return false;
                }
                self.input.clear();
                self.set_screen(Screen::Playing);
                true
            }
            (MenuAction::Resume, Screen::Paused) => {
                self.input.clear();
                self.set_screen(Screen::Playing);
                true
            }
            (MenuAction::Restart, Screen::Paused | Screen::Lost) => {
                self.restart();
                true
            }
            _ => false,
        }
    }

    /// Advance the field while playing. Returns the frame's events.
    pub fn update(&mut self, dt: f32) -> Vec<FieldEvent> {
        if self.screen != Screen::Playing {
            return Vec::new();
        }

        let report = self.field.update(dt, &self.input);
        self.audio.handle_events(&report.events);

        if report.status == FieldStatus::Lost {
            self.commit_score();
            self.audio.play(SoundEffect::GameOver);
            self.set_screen(Screen::Lost);
        }
        report.events
    }

    /// Record the current score under the alias
    pub fn commit_score(&mut self) {
        let score = self.field.score();
        log::info!("Recording {} for {:?}", score, self.alias);
        self.highscores.insert(&self.alias, score);
    }

    pub fn save_highscores(&self) -> Result<(), PersistenceError> {
        self.highscores.save()
    }

    /// Fresh field, back to the start screen
    fn restart(&mut self) {
        let seed = self.seed.wrapping_add(self.rounds);
        self.rounds += 1;
        self.field = Field::new(seed);
        self.input.clear();
        self.set_screen(Screen::Start);
    }

    fn set_screen(&mut self, screen: Screen) {
        if screen != self.screen {
            log::info!("Screen {:?} -> {:?}", self.screen, screen);
            self.screen = screen;
        }
    }
}
