//! Central Configuration Constants
//!
//! Single source of truth for agent defaults.
//! To change the default evaluator, only edit this file.

/// Default evaluator base URL
///
/// Fallback when neither the embed config nor the environment sets one.
/// For development: http://localhost:8080
pub const DEFAULT_API_BASE_URL: &str = "https://api.pitchguard.jp";

/// Default evaluation endpoint path
pub const DEFAULT_EVALUATE_PATH: &str = "/api/v1/evaluate";

/// Default form selector (all forms)
pub const DEFAULT_SELECTOR: &str = "form";

/// Default bound on one evaluator call (milliseconds)
pub const DEFAULT_EVALUATE_TIMEOUT_MS: u64 = 10_000;

/// Default lifetime of the discovery polling loop (milliseconds)
pub const DEFAULT_DISCOVERY_TIMEOUT_MS: u64 = 30_000;

/// One animation frame; mutation rescans are coalesced to this window
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Agent version
pub const AGENT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Evaluator base URL from environment or default
pub fn get_api_base_url() -> String {
    std::env::var("PITCHGUARD_API_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
}

/// Evaluator timeout from environment or default
pub fn get_evaluate_timeout_ms() -> u64 {
    std::env::var("PITCHGUARD_EVALUATE_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_EVALUATE_TIMEOUT_MS)
}
