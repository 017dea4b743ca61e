//! Asset manifest
//!
//! Every sprite, sound and font a renderer or audio backend will ask for.
//! A missing file is fatal at startup rather than at first use.

use std::path::{Path, PathBuf};

use crate::error::AssetError;

pub const SPRITES: &[&str] = &[
    "sprites/player.png",
    "sprites/enemy1.png",
    "sprites/enemy2.png",
    "sprites/enemy3.png",
    "sprites/enemy4.png",
    "sprites/boss_enemy.png",
    "sprites/crate.png",
    "sprites/crate_broken.png",
    "sprites/crate_broken2.png",
    "sprites/player_projectile.gif",
    "sprites/enemy_projectile.gif",
    "sprites/heart.png",
    "sprites/startbg.png",
    "sprites/mbacken.png",
];

pub const SOUNDS: &[&str] = &[
    "sounds/no.wav",
    "sounds/paper_toss.wav",
    "sounds/wilhelm.wav",
    "sounds/background.wav",
];

pub const FONTS: &[&str] = &["fonts/LCD_Solid.ttf"];

/// Every manifest entry, relative to the asset root
pub fn manifest() -> impl Iterator<Item = &'static str> {
    SPRITES.iter().chain(SOUNDS).chain(FONTS).copied()
}

/// Manifest entries not present under `root`
pub fn missing(root: &Path) -> Vec<PathBuf> {
    manifest()
        .map(|rel| root.join(rel))
        .filter(|path| !path.is_file())
        .collect()
}

/// Check that every manifest entry exists under `root`.
/// Reports the first missing file.
pub fn verify(root: &Path) -> Result<(), AssetError> {
    let missing = missing(root);
    if let Some(path) = missing.into_iter().next() {
        return Err(AssetError::Missing { path });
    }
    log::info!("All assets present under {}", root.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("personal_invaders_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_empty_root_reports_first_sprite() {
        let root = temp_root("no_assets");
        let err = verify(&root).unwrap_err();
        let AssetError::Missing { path } = err;
        assert_eq!(path, root.join("sprites/player.png"));
        assert_eq!(missing(&root).len(), manifest().count());
    }

    #[test]
    fn test_complete_root_verifies() {
        let root = temp_root("all_assets");
        for rel in manifest() {
            let path = root.join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, b"").unwrap();
        }

        let result = verify(&root);
        std::fs::remove_file(root.join("fonts/LCD_Solid.ttf")).unwrap();
        let after = missing(&root);
        std::fs::remove_dir_all(&root).ok();

        assert!(result.is_ok());
        assert_eq!(after, vec![root.join("fonts/LCD_Solid.ttf")]);
    }
}
