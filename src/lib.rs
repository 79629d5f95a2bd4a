/// Bank clients and the account directory that keys them by name.
pub mod client;

/// Banknote denominations, note bundles, and the dispenser's physical stock
/// with its greedy decomposition of withdrawal amounts into notes.
pub mod inventory;

/// The dispenser engine: a two-state session machine over one bank, with
/// deposit and withdrawal against the served client.
pub mod dispenser;

/// Loosely shaped operation rows turned into typed operations.
pub mod operation;

/// Operation processor interface, plus the single-ATM implementation.
/// Coordinates parsing and execution against one dispenser.
pub mod processor;

/// Ideally, this module should exist in its own crate, as a way to
/// bootstrap the core logic. However, I want to use it for the integration
/// test so I put it here.
pub mod bin_utils;
