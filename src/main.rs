//! Personal Invaders entry point
//!
//! Headless driver: loads settings and the high score table, plays one
//! autopilot round at a fixed frame rate, records the result and prints the
//! table. Usage: `personal-invaders [settings.json]`

use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};

use personal_invaders::audio::AudioManager;
use personal_invaders::highscores::TABLE_ROWS;
use personal_invaders::render::{build_draw_list, build_hud};
use personal_invaders::sim::Autopilot;
use personal_invaders::{Game, HighScores, MenuAction, Screen, Settings, assets};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("settings.json"));
    let settings = Settings::load(&settings_path)
        .with_context(|| format!("Failed to load {}", settings_path.display()))?;

    if let Some(dir) = &settings.asset_dir {
        assets::verify(dir).context("Asset check failed")?;
    }

    let highscores = HighScores::load(&settings.highscore_path).unwrap_or_else(|e| {
        log::warn!("{e}; continuing with an empty table");
        HighScores::new(&settings.highscore_path)
    });

    let mut audio = AudioManager::new();
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_muted(settings.muted);

    let seed = settings.seed.unwrap_or_else(wall_clock_seed);
    log::info!("Personal Invaders starting (seed {seed})");

    let mut game = Game::new(seed, highscores, audio);
    game.set_alias(&settings.alias);
    if !game.menu(MenuAction::Start) {
        bail!("Settings must provide a non-empty alias");
    }

    let pilot = Autopilot::new();
    let dt = settings.demo_dt();
    let frames = (settings.demo_seconds.max(0.0) * settings.demo_fps as f32) as u64;

    for _ in 0..frames {
        let field = game.field();
        let player_x = field.player().map(|p| p.body.pos.x).unwrap_or_default();
        game.set_input(pilot.intent(player_x, field.autopilot_target()));

        game.update(dt);
        if game.screen() == Screen::Lost {
            break;
        }
    }
    if game.screen() == Screen::Playing {
        game.commit_score();
    }

    let field = game.field();
    log::debug!("Final frame: {} draw items", build_draw_list(field).len());
    let hud = build_hud(field, settings.show_fps);
    println!(
        "{}  {}  (waves: {}, {:.1}s{})",
        hud.score_text,
        hud.lives_text,
        field.waves,
        field.time,
        if game.screen() == Screen::Lost { ", lost" } else { "" }
    );
    if let Some(fps) = hud.fps_text {
        println!("{fps}");
    }
    println!("\nHIGHSCORE\n\n{}", game.highscores().to_table(TABLE_ROWS));

    match game.save_highscores() {
        Ok(()) => println!("Saved to {}", game.highscores().path().display()),
        Err(e) => log::warn!("{e}"),
    }
    game.menu(MenuAction::Quit);
    Ok(())
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
