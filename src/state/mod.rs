/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The in-memory tool and loan store (inventory.rs)
/// - Seed records loaded at startup (seed.rs)
/// - The per-scan workflow state machine (scan.rs)

pub mod data;
pub mod inventory;
pub mod scan;
pub mod seed;
