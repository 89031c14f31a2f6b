//! Tuning constants shared by the controllers

/// Deepest segment a kraken can grow (head is depth 0)
pub const MAX_KRAKEN_LENGTH: u32 = 15;

/// How far a kraken segment looks for prey
pub const KRAKEN_SIGHT_RADIUS: i32 = 10;

/// How far a shopkeeper looks for absent debtors
pub const SHOP_SEARCH_RADIUS: i32 = 30;

/// Nags an absent debtor receives before being called a thief
pub const THIEF_NAG_LIMIT: u32 = 4;

/// Health a rolling boulder loses on every successful step
pub const BOULDER_EROSION: f64 = 0.2;

/// Damage and defense of both boulder kinds
pub const BOULDER_STRENGTH: i32 = 250;

/// Default sight range for creatures without night vision in the dark
pub const DEFAULT_VISION_RADIUS: i32 = 20;

/// Default cap on retained messages
pub const DEFAULT_MESSAGE_LIMIT: usize = 500;
