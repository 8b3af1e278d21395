//! Where the ledger file lives on disk.

use std::{env, path::PathBuf};

/// Overrides the data directory when set.
pub const DATA_DIR_ENV: &str = "CASHBOOK_HOME";

const DEFAULT_DIR_NAME: &str = ".cashbook";
const LEDGER_FILE: &str = "ledger.jsonl";

/// Directory holding cashbook data files: `$CASHBOOK_HOME` when set,
/// otherwise `~/.cashbook` (falling back to the working directory when
/// no home directory is known).
pub fn data_dir() -> PathBuf {
    if let Some(dir) = env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// The ledger file used when no path is given on the command line.
pub fn default_ledger_path() -> PathBuf {
    data_dir().join(LEDGER_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_override_wins_then_default_returns() {
        env::set_var(DATA_DIR_ENV, "/tmp/cashbook-test-home");
        assert_eq!(data_dir(), PathBuf::from("/tmp/cashbook-test-home"));
        assert_eq!(
            default_ledger_path(),
            PathBuf::from("/tmp/cashbook-test-home").join("ledger.jsonl")
        );

        env::remove_var(DATA_DIR_ENV);
        let fallback = data_dir();
        assert!(fallback.ends_with(DEFAULT_DIR_NAME));
    }
}
