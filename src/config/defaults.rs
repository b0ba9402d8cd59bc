// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for container and toast settings.
//!
//! These are the last layer of option resolution: a per-call option wins,
//! then the container's configured value, then the constant here.

// ==========================================================================
// Auto-close Defaults
// ==========================================================================

/// Default auto-close delay (in milliseconds).
pub const DEFAULT_AUTO_CLOSE_MS: u64 = 5_000;

/// Shortest auto-close delay accepted from a config file (in milliseconds).
pub const MIN_AUTO_CLOSE_MS: u64 = 100;

/// Longest auto-close delay accepted from a config file (in milliseconds).
pub const MAX_AUTO_CLOSE_MS: u64 = 600_000;

// ==========================================================================
// Drag Defaults
// ==========================================================================

/// Share of the toast width a drag must cover to dismiss it (in percent).
pub const DEFAULT_DRAGGABLE_PERCENT: f64 = 80.0;

pub const MIN_DRAGGABLE_PERCENT: f64 = 0.0;

pub const MAX_DRAGGABLE_PERCENT: f64 = 100.0;

// ==========================================================================
// Accessibility Defaults
// ==========================================================================

/// ARIA role handed to the view layer.
pub const DEFAULT_ROLE: &str = "alert";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_AUTO_CLOSE_MS > 0);
    assert!(MAX_AUTO_CLOSE_MS >= MIN_AUTO_CLOSE_MS);
    assert!(DEFAULT_AUTO_CLOSE_MS >= MIN_AUTO_CLOSE_MS);
    assert!(DEFAULT_AUTO_CLOSE_MS <= MAX_AUTO_CLOSE_MS);

    assert!(MIN_DRAGGABLE_PERCENT >= 0.0);
    assert!(MAX_DRAGGABLE_PERCENT > MIN_DRAGGABLE_PERCENT);
    assert!(DEFAULT_DRAGGABLE_PERCENT >= MIN_DRAGGABLE_PERCENT);
    assert!(DEFAULT_DRAGGABLE_PERCENT <= MAX_DRAGGABLE_PERCENT);
};
