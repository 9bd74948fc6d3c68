use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory for the JSON-file backed stores
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_data_dir() -> String {
    "data".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

/// Engine tunables. Every scoring constant is exposed here rather than
/// hard-coded so deployments can adjust them without a rebuild.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EngineConfig {
    /// Weight delta applied per like/dislike event
    #[serde(default = "default_feedback_increment")]
    pub feedback_increment: f64,

    /// Maximum absolute weight adjustment feedback may contribute per
    /// category, so feedback cannot override declared preference
    #[serde(default = "default_feedback_ceiling")]
    pub feedback_ceiling: f64,

    /// Feedback events older than this contribute nothing
    #[serde(default = "default_recency_horizon_days")]
    pub recency_horizon_days: i64,

    /// Share of the final score taken from the item's scraped relevance hint
    #[serde(default = "default_hint_mix")]
    pub hint_mix: f64,

    /// Fraction of `max_recommendations` that may share one dominant category
    #[serde(default = "default_diversity_cap_fraction")]
    pub diversity_cap_fraction: f64,

    /// Match value for vocabulary-adjacent (non-exact) tag matches
    #[serde(default = "default_partial_match_value")]
    pub partial_match_value: f64,

    /// Base weight for declared style tokens missing from the vocabulary
    #[serde(default = "default_unknown_token_weight")]
    pub unknown_token_weight: f64,

    /// Additive weight bonus per body-shape boosted category
    #[serde(default = "default_body_shape_bonus")]
    pub body_shape_bonus: f64,
}

fn default_feedback_increment() -> f64 {
    0.05
}

fn default_feedback_ceiling() -> f64 {
    0.5
}

fn default_recency_horizon_days() -> i64 {
    30
}

fn default_hint_mix() -> f64 {
    0.2
}

fn default_diversity_cap_fraction() -> f64 {
    0.4
}

fn default_partial_match_value() -> f64 {
    0.5
}

fn default_unknown_token_weight() -> f64 {
    0.3
}

fn default_body_shape_bonus() -> f64 {
    0.15
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            feedback_increment: default_feedback_increment(),
            feedback_ceiling: default_feedback_ceiling(),
            recency_horizon_days: default_recency_horizon_days(),
            hint_mix: default_hint_mix(),
            diversity_cap_fraction: default_diversity_cap_fraction(),
            partial_match_value: default_partial_match_value(),
            unknown_token_weight: default_unknown_token_weight(),
            body_shape_bonus: default_body_shape_bonus(),
        }
    }
}

impl EngineConfig {
    /// Load engine tunables from `ENGINE_`-prefixed environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::prefixed("ENGINE_")
            .from_env::<EngineConfig>()
            .map_err(|e| anyhow::anyhow!("Failed to load engine config: {}", e))
    }
}
