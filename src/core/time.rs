//! Sortable filename prefixes for generated migrations and seeders.

use std::time::{SystemTime, UNIX_EPOCH};

/// Unix-epoch seconds with a `Z` suffix (e.g. `1771220592Z`), used for
/// ledger timestamps.
pub fn now_epoch_z() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{}Z", secs)
}

/// Milliseconds since the unix epoch.
pub fn epoch_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// Prefix for migration filenames, e.g. `m1771220592000`. Lexicographic
/// order matches creation order, which is what the migration runner sorts by.
pub fn migration_prefix() -> String {
    format!("m{}", epoch_millis())
}

/// Prefix for seeder filenames.
pub fn seeder_prefix() -> String {
    format!("s{}", epoch_millis())
}
