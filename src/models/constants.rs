/// Probability assigned to a new deal when the form leaves it untouched.
pub const DEFAULT_PROBABILITY: u8 = 10;

/// Upper bound of the probability percentage.
pub const MAX_PROBABILITY: u8 = 100;

/// At or above this probability a deal is considered likely to close.
pub const PROBABILITY_HIGH_THRESHOLD: u8 = 80;

/// At or above this probability a deal is considered uncertain rather than unlikely.
pub const PROBABILITY_MEDIUM_THRESHOLD: u8 = 50;

/// Value-range options offered by the filter bar, in display order.
pub const VALUE_RANGE_PRESETS: &[&str] = &["0-10000", "10000-50000", "50000-100000", "100000+"];

/// Placeholder shown on a card whose contact cannot be resolved.
pub const NO_CONTACT_LABEL: &str = "No contact";

/// Default directory (relative to the current directory) for the file store.
pub const DEFAULT_DATA_DIR: &str = ".dealboard";

/// Config file looked up in the current directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "dealboard.toml";
