//! CLI integration tests
//!
//! Each test gets its own HOME and a local mock of the SWAPI endpoints.

use assert_cmd::Command;
use mockito::{Matcher, Mock, Server, ServerGuard};
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command for the holocron binary, isolated in `home`
fn holocron(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("holocron").unwrap();
    cmd.env("HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("HOLOCRON_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

/// Same as `holocron`, pointed at a mock server
fn holocron_against(home: &TempDir, server: &ServerGuard) -> Command {
    let mut cmd = holocron(home);
    cmd.env("HOLOCRON_API_URL", server.url());
    cmd
}

fn mock_luke(server: &mut ServerGuard, hits: usize) -> Mock {
    let body = serde_json::json!({
        "count": 1,
        "results": [{
            "name": "Luke Skywalker",
            "height": "172",
            "mass": "77",
            "birth_year": "19BBY",
            "homeworld": format!("{}/planets/1/", server.url()),
        }]
    });

    server
        .mock("GET", "/people/")
        .match_query(Matcher::UrlEncoded(
            "search".into(),
            "Luke Skywalker".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .expect(hits)
        .create()
}

fn mock_tatooine(server: &mut ServerGuard, hits: usize) -> Mock {
    server
        .mock("GET", "/planets/1/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"name": "Tatooine", "population": "200000",
                "orbital_period": "304", "rotation_period": "23"}"#,
        )
        .expect(hits)
        .create()
}

fn mock_no_results(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", "/people/")
        .match_query(Matcher::UrlEncoded(
            "search".into(),
            "NoSuchCharacter123".into(),
        ))
        .with_status(200)
        .with_body(r#"{"count": 0, "results": []}"#)
        .create()
}

fn history_json(home: &TempDir) -> serde_json::Value {
    let output = holocron(home)
        .args(["--output", "json", "cache", "--history"])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Help and Argument Validation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help() {
    let home = TempDir::new().unwrap();
    holocron(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Look up Star Wars characters"));
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    holocron(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("holocron"));
}

#[test]
fn test_search_help() {
    let home = TempDir::new().unwrap();
    holocron(&home)
        .args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Search for a character"))
        .stdout(predicate::str::contains("--world"));
}

#[test]
fn test_cache_help() {
    let home = TempDir::new().unwrap();
    holocron(&home)
        .args(["cache", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--clean"))
        .stdout(predicate::str::contains("--history"))
        .stdout(predicate::str::contains("--status"));
}

#[test]
fn test_invalid_command() {
    let home = TempDir::new().unwrap();
    holocron(&home)
        .arg("invalid-command")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_search_requires_name() {
    let home = TempDir::new().unwrap();
    holocron(&home).arg("search").assert().failure().code(2);
    assert!(!home.path().join(".holocron").join("cache.json").exists());
}

#[test]
fn test_blank_name_is_rejected_before_any_side_effect() {
    let home = TempDir::new().unwrap();
    holocron(&home)
        .args(["search", "''"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("cannot be empty"));
    assert!(!home.path().join(".holocron").exists());
}

#[test]
fn test_cache_requires_action() {
    let home = TempDir::new().unwrap();
    holocron(&home).arg("cache").assert().failure().code(2);
}

#[test]
fn test_verbose_and_quiet_conflict() {
    let home = TempDir::new().unwrap();
    holocron(&home)
        .args(["--quiet", "--verbose", "cache", "--status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Search
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_search_then_cached_search() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let people = mock_luke(&mut server, 1);

    holocron_against(&home, &server)
        .args(["search", "Luke", "Skywalker"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: Luke Skywalker"))
        .stdout(predicate::str::contains("Height: 172"))
        .stdout(predicate::str::contains("Mass: 77"))
        .stdout(predicate::str::contains("Birth Year: 19BBY"))
        .stdout(predicate::str::contains("Cached at").not());

    holocron_against(&home, &server)
        .args(["search", "Luke Skywalker"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Using cached data for 'Luke Skywalker'...",
        ))
        .stdout(predicate::str::contains("Height: 172"))
        .stdout(predicate::str::contains("Cached at:"));

    people.assert();
}

#[test]
fn test_cached_at_is_first_recorded_time() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let _people = mock_luke(&mut server, 1);

    holocron_against(&home, &server)
        .args(["search", "Luke Skywalker"])
        .assert()
        .success();

    let output = holocron_against(&home, &server)
        .args(["--output", "json", "search", "Luke Skywalker"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(report["source"], "cache");
    assert_eq!(report["character"]["height"], "172");
    assert_eq!(report["cached_at"], history_json(&home)[0]["timestamp"]);
}

#[test]
fn test_world_flag_fetches_homeworld_once() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let people = mock_luke(&mut server, 1);
    let planet = mock_tatooine(&mut server, 1);

    holocron_against(&home, &server)
        .args(["search", "Luke Skywalker"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tatooine").not());

    holocron_against(&home, &server)
        .args(["search", "Luke Skywalker", "--world"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Homeworld"))
        .stdout(predicate::str::contains("Population: 200000"))
        .stdout(predicate::str::contains(
            "On Tatooine, 1 year on Earth is 0.83 years and 1 day is 0.96 days.",
        ));

    holocron_against(&home, &server)
        .args(["search", "Luke Skywalker", "-w"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Using cached data for 'Luke Skywalker' with homeworld...",
        ));

    people.assert();
    planet.assert();
}

#[test]
fn test_search_not_found() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let _missing = mock_no_results(&mut server);

    holocron_against(&home, &server)
        .args(["search", "NoSuchCharacter123"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("No data found"))
        .stderr(predicate::str::contains("No data found").not());

    let history = history_json(&home);
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["character_name"], "NoSuchCharacter123");
    assert_eq!(history[0]["result"], "Failure");

    let cache = std::fs::read_to_string(home.path().join(".holocron").join("cache.json")).unwrap();
    let cache: serde_json::Value = serde_json::from_str(&cache).unwrap();
    assert!(cache["entries"].as_object().unwrap().is_empty());
}

#[test]
fn test_search_server_error_is_failure() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let _broken = server
        .mock("GET", "/people/")
        .match_query(Matcher::Any)
        .with_status(500)
        .create();

    holocron_against(&home, &server)
        .args(["search", "Luke Skywalker"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Failed to retrieve character data"));

    assert_eq!(history_json(&home)[0]["result"], "Failure");
}

#[test]
fn test_search_failure_renders_json_report() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let _missing = mock_no_results(&mut server);

    let assert = holocron_against(&home, &server)
        .args(["--output", "json", "search", "NoSuchCharacter123"])
        .assert()
        .failure()
        .code(1);

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["term"], "NoSuchCharacter123");
    assert_eq!(report["outcome"], "Failure");
    assert!(report["failure"]
        .as_str()
        .unwrap()
        .contains("No data found"));
    assert!(report.get("character").is_none());
}

#[test]
fn test_status_on_invalid_utf8_cache() {
    let home = TempDir::new().unwrap();
    let holocron_dir = home.path().join(".holocron");
    std::fs::create_dir_all(&holocron_dir).unwrap();
    std::fs::write(holocron_dir.join("cache.json"), [0xff, 0xfe, 0x00, 0x7b]).unwrap();

    holocron(&home)
        .args(["cache", "--history"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("cache --clean"));

    holocron(&home)
        .args(["cache", "--status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Corrupt"));
}

#[test]
fn test_history_counts_every_search() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let _people = mock_luke(&mut server, 1);
    let _missing = mock_no_results(&mut server);

    for term in ["Luke Skywalker", "NoSuchCharacter123", "Luke Skywalker"] {
        let _ = holocron_against(&home, &server)
            .args(["search", term])
            .output()
            .unwrap();
    }

    let history = history_json(&home);
    let results: Vec<_> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["result"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(results, ["Success", "Failure", "Success"]);

    holocron(&home)
        .args(["cache", "--history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Search Term"))
        .stdout(predicate::str::contains("NoSuchCharacter123"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Cache Management
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_clean_without_cache() {
    let home = TempDir::new().unwrap();
    holocron(&home)
        .args(["cache", "--clean"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No cache file found."));
}

#[test]
fn test_history_without_cache() {
    let home = TempDir::new().unwrap();
    holocron(&home)
        .args(["cache", "--history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No search history available."));
}

#[test]
fn test_clean_then_search_is_first_run() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let people = mock_luke(&mut server, 2);

    holocron_against(&home, &server)
        .args(["search", "Luke Skywalker"])
        .assert()
        .success();

    holocron(&home)
        .args(["cache", "--clean"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache has been removed."));

    holocron_against(&home, &server)
        .args(["search", "Luke Skywalker"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Using cached data").not());

    assert_eq!(history_json(&home).as_array().unwrap().len(), 1);
    people.assert();
}

#[test]
fn test_corrupt_cache_is_reported() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".holocron");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("cache.json"), "{ \"entries\": ").unwrap();

    holocron(&home)
        .args(["cache", "--history"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("cache --clean"));

    holocron(&home)
        .args(["cache", "--status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Corrupt"));

    holocron(&home).args(["cache", "--clean"]).assert().success();
    holocron(&home).args(["cache", "--history"]).assert().success();
}

#[test]
fn test_cache_status() {
    let home = TempDir::new().unwrap();
    holocron(&home)
        .args(["cache", "--status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache Status"))
        .stdout(predicate::str::contains("Not cached"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_path() {
    let home = TempDir::new().unwrap();
    holocron(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".holocron/config.toml"));
}

#[test]
fn test_config_set_and_show() {
    let home = TempDir::new().unwrap();
    holocron(&home)
        .args(["config", "set", "search.partial_hit", "refetch"])
        .assert()
        .success();

    holocron(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("partial_hit = refetch"));

    holocron(&home)
        .args(["config", "set", "search.partial_hit", "never"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_configured_base_url_is_used() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let people = mock_luke(&mut server, 1);

    holocron(&home)
        .args(["config", "set", "api.base_url", &server.url()])
        .assert()
        .success();

    holocron(&home)
        .args(["search", "Luke Skywalker"])
        .assert()
        .success()
        .stdout(predicate::str::contains("19BBY"));

    people.assert();
}

#[test]
fn test_output_format_options() {
    let home = TempDir::new().unwrap();
    holocron(&home)
        .args(["--output", "json", "config", "path"])
        .assert()
        .success();

    holocron(&home)
        .args(["--output", "invalid", "config", "path"])
        .assert()
        .failure();
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();
    holocron(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("holocron"));
}
