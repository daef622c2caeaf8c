//! Store config validation tests for personas-config.
// crates/personas-config/tests/store_validation.rs
// =============================================================================
// Module: Store Config Validation Tests
// Description: Validate store backend selection and sqlite settings.
// Purpose: Ensure store configuration is consistent before startup.
// =============================================================================

use personas_config::ConfigError;
use personas_config::PersonasConfig;
use personas_config::StoreType;
use personas_store_sqlite::SqliteStoreMode;
use personas_store_sqlite::SqliteSyncMode;

type TestResult = Result<(), String>;

fn assert_invalid(result: Result<PersonasConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}

#[test]
fn store_memory_rejects_path() -> TestResult {
    assert_invalid(
        PersonasConfig::parse("[store]\ntype = \"memory\"\npath = \"personas.sqlite\"\n"),
        "memory store must not set path",
    )?;
    Ok(())
}

#[test]
fn store_sqlite_requires_path() -> TestResult {
    assert_invalid(
        PersonasConfig::parse("[store]\ntype = \"sqlite\"\n"),
        "sqlite store requires path",
    )?;
    Ok(())
}

#[test]
fn store_sqlite_rejects_blank_path() -> TestResult {
    assert_invalid(
        PersonasConfig::parse("[store]\ntype = \"sqlite\"\npath = \" \"\n"),
        "store path must be non-empty",
    )?;
    Ok(())
}

#[test]
fn store_sqlite_rejects_long_component() -> TestResult {
    let toml = format!("[store]\ntype = \"sqlite\"\npath = \"{}\"\n", "a".repeat(300));
    assert_invalid(PersonasConfig::parse(&toml), "store path component too long")?;
    Ok(())
}

#[test]
fn store_sqlite_rejects_unknown_journal_mode() -> TestResult {
    assert_invalid(
        PersonasConfig::parse(
            "[store]\ntype = \"sqlite\"\npath = \"p.sqlite\"\njournal_mode = \"memory\"\n",
        ),
        "config parse error",
    )?;
    Ok(())
}

#[test]
fn store_sqlite_defaults_to_wal_and_full_sync() -> TestResult {
    let config = PersonasConfig::parse("[store]\ntype = \"sqlite\"\npath = \"p.sqlite\"\n")
        .map_err(|err| err.to_string())?;
    if config.store.store_type != StoreType::Sqlite {
        return Err("expected sqlite store".to_string());
    }
    let sqlite = config.store.sqlite_config().ok_or("expected sqlite config")?;
    if sqlite.journal_mode != SqliteStoreMode::Wal {
        return Err("expected wal journal mode".to_string());
    }
    if sqlite.sync_mode != SqliteSyncMode::Full {
        return Err("expected full sync mode".to_string());
    }
    if sqlite.busy_timeout_ms != 5_000 {
        return Err("expected default busy timeout".to_string());
    }
    Ok(())
}

#[test]
fn store_type_labels_are_stable() -> TestResult {
    if StoreType::Memory.as_str() != "memory" || StoreType::Sqlite.as_str() != "sqlite" {
        return Err("unexpected store type labels".to_string());
    }
    Ok(())
}
