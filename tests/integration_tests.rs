//! Integration tests for the larder CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to get a larder command
fn larder() -> Command {
    Command::cargo_bin("larder").unwrap()
}

/// Helper to create an initialized household in a temp directory
fn setup_home() -> TempDir {
    let tmp = TempDir::new().unwrap();
    larder()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success();
    tmp
}

/// Helper to stock a pantry item with a pinned expiration date
fn stock(tmp: &TempDir, name: &str, qty: &str, category: &str, expires: &str) {
    larder()
        .current_dir(tmp.path())
        .args([
            "pantry", "add", "--name", name, "--qty", qty, "--category", category,
            "--shelf-life", "7", "--expires", expires,
        ])
        .assert()
        .success();
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    larder()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pantry"));
}

#[test]
fn test_version_displays() {
    larder()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("larder"));
}

#[test]
fn test_unknown_command_fails() {
    larder()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_completions_generate() {
    larder()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("larder"));
}

// ============================================================================
// Init Command Tests
// ============================================================================

#[test]
fn test_init_creates_household() {
    let tmp = TempDir::new().unwrap();

    larder()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized household"));

    assert!(tmp.path().join(".larder").is_dir());
    assert!(tmp.path().join(".larder/larder.db").is_file());
    assert!(tmp.path().join(".larder/prefs.yaml").is_file());
}

#[test]
fn test_init_twice_is_noticed() {
    let tmp = setup_home();
    larder()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_commands_fail_outside_household() {
    let tmp = TempDir::new().unwrap();
    larder()
        .current_dir(tmp.path())
        .args(["pantry", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("larder init"));
}

// ============================================================================
// Item Command Tests
// ============================================================================

#[test]
fn test_item_new_and_list() {
    let tmp = setup_home();

    larder()
        .current_dir(tmp.path())
        .args(["item", "new", "--name", "milk", "--category", "Dairy", "--shelf-life", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Milk"));

    larder()
        .current_dir(tmp.path())
        .args(["item", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Milk").and(predicate::str::contains("Dairy")));
}

#[test]
fn test_item_names_are_canonicalized() {
    let tmp = setup_home();

    larder()
        .current_dir(tmp.path())
        .args(["item", "new", "--name", "GROUND BEEF", "--category", "Meat", "--shelf-life", "5"])
        .assert()
        .success();

    larder()
        .current_dir(tmp.path())
        .args(["item", "list", "--format", "name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ground beef"));
}

#[test]
fn test_duplicate_item_rejected() {
    let tmp = setup_home();

    larder()
        .current_dir(tmp.path())
        .args(["item", "new", "--name", "milk", "--category", "Dairy", "--shelf-life", "10"])
        .assert()
        .success();

    // Same canonical name, different casing.
    larder()
        .current_dir(tmp.path())
        .args(["item", "new", "--name", "MILK", "--category", "Dairy", "--shelf-life", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_item_set_shelf_life_and_rm() {
    let tmp = setup_home();

    larder()
        .current_dir(tmp.path())
        .args(["item", "new", "--name", "rice", "--category", "Grain", "--shelf-life", "90"])
        .assert()
        .success();

    larder()
        .current_dir(tmp.path())
        .args(["item", "set-shelf-life", "rice", "120"])
        .assert()
        .success()
        .stdout(predicate::str::contains("120"));

    larder()
        .current_dir(tmp.path())
        .args(["item", "rm", "rice", "--yes"])
        .assert()
        .success();

    larder()
        .current_dir(tmp.path())
        .args(["item", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0"));
}

#[test]
fn test_item_rm_refuses_while_stocked() {
    let tmp = setup_home();
    stock(&tmp, "bread", "2", "Misc", "2024-06-01");

    larder()
        .current_dir(tmp.path())
        .args(["item", "rm", "bread", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("referenced"));
}

#[test]
fn test_item_categories() {
    let tmp = setup_home();
    stock(&tmp, "milk", "1", "Dairy", "2024-06-01");
    stock(&tmp, "lettuce", "1", "Vegetable", "2024-06-01");

    larder()
        .current_dir(tmp.path())
        .args(["item", "categories"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dairy").and(predicate::str::contains("Vegetable")));
}

// ============================================================================
// Pantry Command Tests
// ============================================================================

#[test]
fn test_pantry_add_and_list() {
    let tmp = setup_home();
    stock(&tmp, "milk", "2", "Dairy", "2024-06-01");

    larder()
        .current_dir(tmp.path())
        .args(["pantry", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Milk")
                .and(predicate::str::contains("2"))
                .and(predicate::str::contains("2024-06-01")),
        );
}

#[test]
fn test_pantry_add_requires_profile_flags_for_new_item() {
    let tmp = setup_home();

    larder()
        .current_dir(tmp.path())
        .args(["pantry", "add", "--name", "mystery"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--category"));
}

#[test]
fn test_pantry_add_twice_is_skipped() {
    let tmp = setup_home();
    stock(&tmp, "milk", "2", "Dairy", "2024-06-01");

    larder()
        .current_dir(tmp.path())
        .args(["pantry", "add", "--name", "milk", "--qty", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already stocked"));

    // Quantity unchanged.
    larder()
        .current_dir(tmp.path())
        .args(["pantry", "list", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Milk\tDairy\t2"));
}

#[test]
fn test_pantry_inc_dec_floor() {
    let tmp = setup_home();
    stock(&tmp, "milk", "1", "Dairy", "2024-06-01");

    larder()
        .current_dir(tmp.path())
        .args(["pantry", "inc", "milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("x2"));

    larder().current_dir(tmp.path()).args(["pantry", "dec", "milk"]).assert().success();
    larder().current_dir(tmp.path()).args(["pantry", "dec", "milk"]).assert().success();

    // Floors at zero instead of going negative.
    larder()
        .current_dir(tmp.path())
        .args(["pantry", "dec", "milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("x0"));
}

#[test]
fn test_pantry_set_date_and_expiring() {
    let tmp = setup_home();
    stock(&tmp, "milk", "1", "Dairy", "2024-06-01");

    larder()
        .current_dir(tmp.path())
        .args(["pantry", "set-date", "milk", "2024-07-04"])
        .assert()
        .success();

    larder()
        .current_dir(tmp.path())
        .args(["pantry", "expiring", "--on", "2024-07-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Milk"));

    larder()
        .current_dir(tmp.path())
        .args(["pantry", "expiring", "--on", "2024-06-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing expires"));
}

#[test]
fn test_pantry_set_date_rejects_bad_format() {
    let tmp = setup_home();
    stock(&tmp, "milk", "1", "Dairy", "2024-06-01");

    larder()
        .current_dir(tmp.path())
        .args(["pantry", "set-date", "milk", "06/01/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn test_pantry_use_moves_to_shopping() {
    let tmp = setup_home();
    stock(&tmp, "milk", "3", "Dairy", "2024-06-01");

    larder()
        .current_dir(tmp.path())
        .args(["pantry", "use", "milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shopping list"));

    larder()
        .current_dir(tmp.path())
        .args(["pantry", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pantry is empty"));

    larder()
        .current_dir(tmp.path())
        .args(["shop", "list", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Milk\tDairy\t3"));
}

// ============================================================================
// Shop Command Tests
// ============================================================================

#[test]
fn test_shop_add_creates_profile_when_flags_given() {
    let tmp = setup_home();

    larder()
        .current_dir(tmp.path())
        .args([
            "shop", "add", "--name", "apple", "--qty", "6", "--category", "Fruit",
            "--shelf-life", "7",
        ])
        .assert()
        .success();

    larder()
        .current_dir(tmp.path())
        .args(["shop", "list", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Apple\tFruit\t6"));
}

#[test]
fn test_shop_add_without_profile_fails() {
    let tmp = setup_home();

    larder()
        .current_dir(tmp.path())
        .args(["shop", "add", "--name", "mystery"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--category"));
}

#[test]
fn test_shop_buy_merges_into_existing_pantry_row() {
    let tmp = setup_home();
    stock(&tmp, "milk", "1", "Dairy", "2024-06-01");

    larder()
        .current_dir(tmp.path())
        .args(["shop", "add", "--name", "milk", "--qty", "2"])
        .assert()
        .success();

    larder()
        .current_dir(tmp.path())
        .args(["shop", "buy", "milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bought"));

    larder()
        .current_dir(tmp.path())
        .args(["pantry", "list", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Milk\tDairy\t3"));

    larder()
        .current_dir(tmp.path())
        .args(["shop", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shopping list is empty"));
}

#[test]
fn test_shop_buy_creates_pantry_row_when_absent() {
    let tmp = setup_home();

    larder()
        .current_dir(tmp.path())
        .args([
            "shop", "add", "--name", "bread", "--qty", "2", "--category", "Misc",
            "--shelf-life", "15",
        ])
        .assert()
        .success();

    larder()
        .current_dir(tmp.path())
        .args(["shop", "buy", "bread"])
        .assert()
        .success();

    larder()
        .current_dir(tmp.path())
        .args(["pantry", "list", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bread\tMisc\t2"));
}

// ============================================================================
// Notify Settings Tests
// ============================================================================

#[test]
fn test_notify_show_defaults() {
    let tmp = setup_home();

    larder()
        .current_dir(tmp.path())
        .args(["notify", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("12:00")
                .and(predicate::str::contains("One Day"))
                .and(predicate::str::contains("off")),
        );
}

#[test]
fn test_notify_time_persists() {
    let tmp = setup_home();

    larder()
        .current_dir(tmp.path())
        .args(["notify", "time", "07:30"])
        .assert()
        .success();

    larder()
        .current_dir(tmp.path())
        .args(["notify", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("07:30"));
}

#[test]
fn test_notify_time_rejects_garbage() {
    let tmp = setup_home();

    larder()
        .current_dir(tmp.path())
        .args(["notify", "time", "25:99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HH:MM"));
}

#[test]
fn test_notify_lookback_persists() {
    let tmp = setup_home();

    larder()
        .current_dir(tmp.path())
        .args(["notify", "lookback", "one-week"])
        .assert()
        .success()
        .stdout(predicate::str::contains("one week"));

    larder()
        .current_dir(tmp.path())
        .args(["notify", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("One Week").and(predicate::str::contains("7 day(s)")));
}

// ============================================================================
// Tick Tests (expiration reminder + auto-replenishment)
// ============================================================================

#[test]
fn test_tick_single_item_notification() {
    let tmp = setup_home();
    stock(&tmp, "milk", "1", "Dairy", "2024-01-02");

    larder()
        .current_dir(tmp.path())
        .args(["tick", "--date", "2024-01-01"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("An Item will expire soon")
                .and(predicate::str::contains("Milk will expire in one day.")),
        );
}

#[test]
fn test_tick_multiple_items_notification() {
    let tmp = setup_home();
    stock(&tmp, "milk", "1", "Dairy", "2024-01-08");
    stock(&tmp, "eggs", "12", "Dairy", "2024-01-08");

    larder()
        .current_dir(tmp.path())
        .args(["tick", "--date", "2024-01-01", "--lookback", "one-week"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Items are about to expire")
                .and(predicate::str::contains("Eggs Milk will all expire in one week.")),
        );
}

#[test]
fn test_tick_no_matches_no_notification() {
    let tmp = setup_home();
    stock(&tmp, "milk", "1", "Dairy", "2024-03-01");

    larder()
        .current_dir(tmp.path())
        .args(["tick", "--date", "2024-01-01"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Nothing expires")
                .and(predicate::str::contains("expire soon").not()),
        );
}

#[test]
fn test_tick_uses_persisted_lookback() {
    let tmp = setup_home();
    stock(&tmp, "milk", "1", "Dairy", "2024-01-08");

    larder()
        .current_dir(tmp.path())
        .args(["notify", "lookback", "one-week"])
        .assert()
        .success();

    larder()
        .current_dir(tmp.path())
        .args(["tick", "--date", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Milk will expire in one week."));
}

#[test]
fn test_tick_replenish_disabled_by_default() {
    let tmp = setup_home();
    stock(&tmp, "bread", "3", "Misc", "2024-01-01");

    larder()
        .current_dir(tmp.path())
        .args(["tick", "--date", "2024-01-01"])
        .assert()
        .success();

    larder()
        .current_dir(tmp.path())
        .args(["shop", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shopping list is empty"));

    // Pantry untouched.
    larder()
        .current_dir(tmp.path())
        .args(["pantry", "list", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bread\tMisc\t3"));
}

#[test]
fn test_tick_replenish_moves_expired_items() {
    let tmp = setup_home();
    stock(&tmp, "bread", "3", "Misc", "2024-01-01");

    larder()
        .current_dir(tmp.path())
        .args(["notify", "auto", "on"])
        .assert()
        .success();

    larder()
        .current_dir(tmp.path())
        .args(["tick", "--date", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("moved to the shopping list"));

    larder()
        .current_dir(tmp.path())
        .args(["shop", "list", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bread\tMisc\t3"));

    // Pantry row retained at zero.
    larder()
        .current_dir(tmp.path())
        .args(["pantry", "list", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bread\tMisc\t0"));
}

#[test]
fn test_tick_replenish_twice_duplicates_entry() {
    // Documented gap: a second tick on the same day duplicates the
    // shopping entry instead of merging, and warns about it.
    let tmp = setup_home();
    stock(&tmp, "bread", "3", "Misc", "2024-01-01");

    larder()
        .current_dir(tmp.path())
        .args(["notify", "auto", "on"])
        .assert()
        .success();

    larder()
        .current_dir(tmp.path())
        .args(["tick", "--date", "2024-01-01"])
        .assert()
        .success();

    larder()
        .current_dir(tmp.path())
        .args(["tick", "--date", "2024-01-01"])
        .assert()
        .success()
        .stderr(predicate::str::contains("duplicate"));

    larder()
        .current_dir(tmp.path())
        .args(["shop", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2"));
}

// ============================================================================
// Store Command Tests
// ============================================================================

#[test]
fn test_store_seed_and_status() {
    let tmp = setup_home();

    larder()
        .current_dir(tmp.path())
        .args(["store", "seed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded"));

    larder()
        .current_dir(tmp.path())
        .args(["store", "status"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Item profiles:    10")
                .and(predicate::str::contains("Shopping entries: 2")),
        );
}

#[test]
fn test_store_query() {
    let tmp = setup_home();
    stock(&tmp, "milk", "1", "Dairy", "2024-06-01");

    larder()
        .current_dir(tmp.path())
        .args(["store", "query", "SELECT name FROM items ORDER BY name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Milk"));
}

#[test]
fn test_store_reset_clears_everything() {
    let tmp = setup_home();
    larder()
        .current_dir(tmp.path())
        .args(["store", "seed"])
        .assert()
        .success();

    larder()
        .current_dir(tmp.path())
        .args(["store", "reset", "--yes"])
        .assert()
        .success();

    larder()
        .current_dir(tmp.path())
        .args(["pantry", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pantry is empty"));

    larder()
        .current_dir(tmp.path())
        .args(["item", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0"));
}

// ============================================================================
// Output Format Tests
// ============================================================================

#[test]
fn test_pantry_list_json() {
    let tmp = setup_home();
    stock(&tmp, "milk", "2", "Dairy", "2024-06-01");

    let output = larder()
        .current_dir(tmp.path())
        .args(["pantry", "list", "--format", "json"])
        .output()
        .unwrap();

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid json output");
    assert_eq!(parsed[0]["name"], "Milk");
    assert_eq!(parsed[0]["quantity"], 2);
}

#[test]
fn test_pantry_list_name_format() {
    let tmp = setup_home();
    stock(&tmp, "milk", "1", "Dairy", "2024-06-01");
    stock(&tmp, "eggs", "12", "Dairy", "2024-06-02");

    larder()
        .current_dir(tmp.path())
        .args(["pantry", "list", "--format", "name"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Eggs\nMilk\n"));
}

#[test]
fn test_home_flag_overrides_discovery() {
    let home_dir = setup_home();
    stock(&home_dir, "milk", "1", "Dairy", "2024-06-01");
    let elsewhere = TempDir::new().unwrap();

    larder()
        .current_dir(elsewhere.path())
        .args(["--home", home_dir.path().to_str().unwrap(), "pantry", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Milk"));
}
