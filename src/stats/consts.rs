pub const STATS_CMD: &str = "stats";

// per-flash-state full report keys
pub const KEY_ALIGNED: &str = "11";
pub const KEY_CAPTURE: &str = "11b";
pub const KEY_CAPTURE_REPORTER: &str = "11c";
pub const KEY_NO_CAPTURE: &str = "11d";
pub const KEY_SINGLE_CAPTURE: &str = "11f";
pub const KEY_DEDUPLICATED: &str = "16";

pub const FLASH_REPORT_KEYS: [&str; 6] = [
    KEY_ALIGNED,
    KEY_CAPTURE,
    KEY_CAPTURE_REPORTER,
    KEY_NO_CAPTURE,
    KEY_SINGLE_CAPTURE,
    KEY_DEDUPLICATED,
];

// combined report keys
pub const KEY_TOTAL_DEDUPLICATED: &str = "16";
pub const KEY_CONTACT_COUNTS: &str = "16bb";

pub const COMBINED_REPORT_KEYS: [&str; 2] = [KEY_TOTAL_DEDUPLICATED, KEY_CONTACT_COUNTS];

// markers inside 16bb contact-count lines
pub const TWO_WAY_MARKER: &str = "having 1";
pub const THREE_WAY_MARKER: &str = "having 2";
