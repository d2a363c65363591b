// =============================================================================
// config.rs — THE GRAND CONFIGURATION CATHEDRAL
// =============================================================================
//
// Every tunable parameter in the engine lives here. All values can be
// overridden via environment variables prefixed with PRAIRIE_LEAD_, because
// hardcoding configuration is how you end up re-compiling a lead scraper at
// 11pm to change a sleep interval.
//
// Default values were chosen through a rigorous process of "that seems
// about right" and "the directories will probably rate-limit us if we go
// faster than this."
// =============================================================================

use std::env;
use std::time::Duration;

/// The Grand Configuration Struct. Think of it as the cockpit of a crop
/// duster: not many dials, but you want every one of them within reach.
#[derive(Debug, Clone)]
pub struct Config {
    // =========================================================================
    // JURISDICTION
    // This is an Illinois tool. These fields exist so that exactly one
    // place in the codebase knows that.
    // =========================================================================
    /// Human-readable state name, used in search queries and the CSV.
    pub state_name: String,

    /// Two-letter state code, for directories that think in postal codes.
    pub state_code: String,

    // =========================================================================
    // COURTESY DELAY
    // A random pause before every network call. Not a correctness
    // mechanism — a manners mechanism.
    // =========================================================================
    /// Lower bound of the courtesy delay.
    pub delay_min: Duration,

    /// Upper bound of the courtesy delay.
    pub delay_max: Duration,

    // =========================================================================
    // HTTP
    // =========================================================================
    /// Per-request timeout. Directories that take longer than this to
    /// serve a search page get to keep their leads.
    pub request_timeout: Duration,

    /// The User-Agent we announce ourselves with. Fixed and descriptive;
    /// we are not in the disguise business.
    pub user_agent: String,

    // =========================================================================
    // SEARCH ENDPOINTS
    // Base URLs for each directory's search page. Overridable mostly so
    // tests and the occasional mirror can point elsewhere.
    // =========================================================================
    pub yellow_pages_base_url: String,
    pub manta_base_url: String,
    pub superpages_base_url: String,
    pub yelp_base_url: String,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    /// "Sensible" meaning "works out of the box, respects your wishes if
    /// you set something."
    pub fn from_env() -> Self {
        // Load .env if present. Fail silently if not, because not everyone
        // has their life together enough to create a .env file.
        let _ = dotenvy::dotenv();

        Config {
            state_name: env_or_default("PRAIRIE_LEAD_STATE_NAME", "Illinois"),
            state_code: env_or_default("PRAIRIE_LEAD_STATE_CODE", "IL"),

            delay_min: Duration::from_secs(
                env_or_default("PRAIRIE_LEAD_DELAY_MIN_SECS", "2").parse().unwrap_or(2),
            ),
            delay_max: Duration::from_secs(
                env_or_default("PRAIRIE_LEAD_DELAY_MAX_SECS", "5").parse().unwrap_or(5),
            ),

            request_timeout: Duration::from_secs(
                env_or_default("PRAIRIE_LEAD_TIMEOUT_SECS", "15").parse().unwrap_or(15),
            ),
            user_agent: env_or_default(
                "PRAIRIE_LEAD_USER_AGENT",
                "PrairieLeadEngine/0.1 (lead-research; contact: leads@prairie-lead.dev)",
            ),

            yellow_pages_base_url: env_or_default(
                "PRAIRIE_LEAD_YELLOWPAGES_URL",
                "https://www.yellowpages.com/search",
            ),
            manta_base_url: env_or_default(
                "PRAIRIE_LEAD_MANTA_URL",
                "https://www.manta.com/search",
            ),
            superpages_base_url: env_or_default(
                "PRAIRIE_LEAD_SUPERPAGES_URL",
                "https://www.superpages.com/search",
            ),
            yelp_base_url: env_or_default(
                "PRAIRIE_LEAD_YELP_URL",
                "https://www.yelp.com/search",
            ),
        }
    }

    /// The default prospect categories: verticals that traditionally have
    /// an office, a phone line, a fax machine they still defend, and no
    /// website. Used when the operator just presses Enter.
    pub fn default_categories() -> Vec<String> {
        [
            "medical offices",
            "law firms",
            "accounting firms",
            "dental offices",
            "insurance agencies",
            "financial advisors",
            "real estate offices",
            "manufacturing companies",
            "retail stores",
            "restaurants",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}

/// Helper to read an environment variable with a default fallback.
/// Because unwrap_or on env::var is ugly and we have standards.
fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
