// Board constants
pub const BOARD_ROWS: usize = 7;
pub const BOARD_COLS: usize = 7;
pub const MIN_MATCH_RUN: usize = 3;

// Player starting values
pub const PLAYER_STARTING_MAX_HP: u32 = 100;
pub const PLAYER_STARTING_ATTACK: u32 = 10;
pub const STARTING_EXP_TO_NEXT_LEVEL: u64 = 100;

// Monster scaling per encounter
pub const MONSTER_STARTING_MAX_HP: i64 = 1000;
pub const MONSTER_HP_PER_ENCOUNTER: i64 = 500;
pub const MONSTER_BASE_ATTACK: u32 = 15;
pub const MONSTER_ATTACK_PER_ENCOUNTER: u32 = 5;

// Elemental effects
pub const THUNDER_MULTIPLIER_STEP: f64 = 0.05;
pub const POISON_DEFENSE_DOWN_STEP: u32 = 2;
pub const BURN_DURATION_TURNS: u32 = 3;
pub const FIRE_EXPLOSION_MIN_LEVEL: u32 = 5;
pub const FIRE_EXPLOSION_MIN_TILES: u32 = 5;
pub const FIRE_EXPLOSION_POWER_MULT: u32 = 5;

// Progression and rewards
pub const EXP_CURVE_GROWTH: f64 = 1.2;
pub const MAX_HP_PER_LEVEL: u32 = 20;
pub const ATTACK_PER_LEVEL: u32 = 2;
pub const ENCOUNTER_EXP_BASE: u64 = 50;
pub const ENCOUNTER_EXP_PER_LEVEL: u64 = 10;
pub const ENCOUNTER_COIN_BASE: u64 = 50;
pub const ENCOUNTER_COIN_PER_LEVEL: u64 = 10;
pub const REVIVE_HP_RATIO: f64 = 0.5;

// Save system constants
pub const SAVE_VERSION_MAGIC: u64 = 0x454C454D4C474400; // "ELEMLGD\0" in hex
pub const SAVE_FILE_NAME: &str = "save.dat";
