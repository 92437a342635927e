//! Tolerance defaults for anchor-pair placement (internal).
//!
//! Policy
//! - Defaults are fixed constants. Placement must be a pure function of its
//!   inputs, so nothing here is read from the environment.

/// Baseline anchor distance below which the pair is treated as degenerate
/// and the solved scale falls back to `1.0`.
pub const DEGENERATE_DIST_EPS: f64 = 1e-9;
