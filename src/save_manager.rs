//! Checksummed binary persistence for [`SaveData`].

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use directories::ProjectDirs;
use sha2::{Digest, Sha256};

use crate::constants::{SAVE_FILE_NAME, SAVE_VERSION_MAGIC};
use crate::save_state::SaveData;

/// Manages saving and loading the game save with checksum verification.
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Creates a new SaveManager rooted at the platform config directory.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "elemental-legend").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine config directory")
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            save_path: config_dir.join(SAVE_FILE_NAME),
        })
    }

    /// Creates a SaveManager writing to an explicit path (used by tests).
    pub fn with_path(save_path: PathBuf) -> Self {
        Self { save_path }
    }

    pub fn save_path(&self) -> &PathBuf {
        &self.save_path
    }

    /// Saves the blob to disk.
    ///
    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - Serialized save data (variable length)
    /// - SHA256 checksum (32 bytes)
    pub fn save(&self, data: &SaveData) -> io::Result<()> {
        let payload =
            bincode::serialize(data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let payload_len = payload.len() as u32;

        // Checksum covers version + length + payload
        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(payload_len.to_le_bytes());
        hasher.update(&payload);
        let checksum = hasher.finalize();

        let mut file = fs::File::create(&self.save_path)?;
        file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&payload_len.to_le_bytes())?;
        file.write_all(&payload)?;
        file.write_all(&checksum)?;

        Ok(())
    }

    /// Loads the blob from disk, verifying magic and checksum.
    pub fn load(&self) -> io::Result<SaveData> {
        let mut file = fs::File::open(&self.save_path)?;

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);
        if version != SAVE_VERSION_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid save version: expected 0x{:016X}, got 0x{:016X}",
                    SAVE_VERSION_MAGIC, version
                ),
            ));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let payload_len = u32::from_le_bytes(length_bytes);

        let mut payload = vec![0u8; payload_len as usize];
        file.read_exact(&mut payload)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(version_bytes);
        hasher.update(length_bytes);
        hasher.update(&payload);
        let computed_checksum = hasher.finalize();

        if stored_checksum[..] != computed_checksum[..] {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum verification failed",
            ));
        }

        bincode::deserialize(&payload).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Checks if a save file exists.
    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::GameState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn temp_manager(name: &str) -> SaveManager {
        let path = std::env::temp_dir().join(format!("elemental-legend-{}.dat", name));
        fs::remove_file(&path).ok();
        SaveManager::with_path(path)
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let manager = temp_manager("roundtrip");
        let mut rng = StdRng::seed_from_u64(21);
        let mut state = GameState::new(&mut rng);
        state.combat.current_level = 4;
        state.currency.coins = 240;

        let data = SaveData::capture(&state, 1_700_000_000);
        manager.save(&data).expect("save should succeed");
        assert!(manager.save_exists());

        let loaded = manager.load().expect("load should succeed");
        assert_eq!(loaded, data);

        fs::remove_file(manager.save_path()).ok();
    }

    #[test]
    fn test_load_nonexistent_fails() {
        let manager = temp_manager("missing");
        let result = manager.load();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_load_detects_corruption() {
        let manager = temp_manager("corrupt");
        let mut rng = StdRng::seed_from_u64(22);
        let state = GameState::new(&mut rng);

        manager
            .save(&SaveData::capture(&state, 0))
            .expect("save should succeed");

        // Flip one payload byte
        let mut bytes = fs::read(manager.save_path()).unwrap();
        let mid = bytes.len() / 2;
        bytes[mid] ^= 0xFF;
        fs::write(manager.save_path(), &bytes).unwrap();

        let result = manager.load();
        assert!(result.is_err());

        fs::remove_file(manager.save_path()).ok();
    }

    #[test]
    fn test_load_rejects_wrong_magic() {
        let manager = temp_manager("magic");
        let mut rng = StdRng::seed_from_u64(23);
        let state = GameState::new(&mut rng);

        manager
            .save(&SaveData::capture(&state, 0))
            .expect("save should succeed");

        let mut bytes = fs::read(manager.save_path()).unwrap();
        bytes[0] ^= 0xFF;
        fs::write(manager.save_path(), &bytes).unwrap();

        let result = manager.load();
        assert!(result.is_err());

        fs::remove_file(manager.save_path()).ok();
    }

    #[test]
    fn test_load_rejects_truncated_file() {
        let manager = temp_manager("truncated");
        let mut rng = StdRng::seed_from_u64(24);
        let state = GameState::new(&mut rng);

        manager
            .save(&SaveData::capture(&state, 0))
            .expect("save should succeed");

        let bytes = fs::read(manager.save_path()).unwrap();
        fs::write(manager.save_path(), &bytes[..bytes.len() - 10]).unwrap();

        let result = manager.load();
        assert!(result.is_err());

        fs::remove_file(manager.save_path()).ok();
    }
}
