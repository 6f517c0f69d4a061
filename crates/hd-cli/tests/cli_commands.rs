//! End-to-end tests for the CLI subcommands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SCENARIO: &str = r#"{
    "item": {
        "id": "ms", "name": "Martial Strike", "xmlid": "MARTIALSTRIKE",
        "maneuver": {"dc_bonus": 2, "martial": true}
    },
    "context": {
        "name": "Fist",
        "strength": 20,
        "extra_dc": [{"name": "+1 Martial DC", "dc": 1}],
        "effect_bonuses": [{"name": "Aid STR", "dc": 4}]
    }
}"#;

/// Create a temp directory with a scenario and a rules file.
fn scenario_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("strike.json"), SCENARIO).unwrap();
    fs::write(
        dir.path().join("rules.json"),
        r#"{"double_damage_limit": true}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("sweep.json"),
        r#"{"item": {"id": "sw", "name": "Weapon Sweep", "xmlid": "SWEEP",
                     "maneuver": {"requires_weapon": true}}}"#,
    )
    .unwrap();
    dir
}

fn hd() -> Command {
    let mut cmd = Command::cargo_bin("hd").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

// ---------------------------------------------------------------------------
// formula
// ---------------------------------------------------------------------------

#[test]
fn formula_normal_damage() {
    hd().args(["formula", "--dc", "10"])
        .assert()
        .success()
        .stdout("10d6\n");
}

#[test]
fn formula_killing_damage() {
    hd().args(["formula", "--dc", "5", "--killing"])
        .assert()
        .success()
        .stdout("1½d6K\n");
}

#[test]
fn formula_die_minus_one() {
    hd().args(["formula", "--dc", "5", "--killing", "--die-minus-one"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2d6-1"));
}

#[test]
fn formula_negative_dc() {
    hd().args(["formula", "--dc", "-2"])
        .assert()
        .success()
        .stdout("-2d6\n");
}

#[test]
fn formula_explicit_tier() {
    hd().args(["formula", "--dc", "2", "--tier", "10"])
        .assert()
        .success()
        .stdout("1d6\n");
}

#[test]
fn formula_rejects_absurd_dc() {
    hd().args(["formula", "--dc", "1e300"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn formula_unknown_tier() {
    hd().args(["formula", "--dc", "2", "--tier", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported attack cost"));
}

// ---------------------------------------------------------------------------
// roll
// ---------------------------------------------------------------------------

#[test]
fn roll_table_output() {
    hd().args(["roll", "--dc", "3", "--seed", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Normal 3d6"))
        .stdout(predicate::str::contains("STUN"))
        .stdout(predicate::str::contains("BODY"));
}

#[test]
fn roll_json_is_reproducible() {
    let first = hd()
        .args(["roll", "--dc", "6", "--seed", "7", "--json"])
        .output()
        .unwrap();
    let second = hd()
        .args(["roll", "--dc", "6", "--seed", "7", "--json"])
        .output()
        .unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let json: serde_json::Value = serde_json::from_slice(&first.stdout).unwrap();
    assert_eq!(json["roll_type"], "Normal");
    assert_eq!(json["formula"], "6d6");
}

#[test]
fn roll_standard_effect() {
    hd().args(["roll", "--dc", "4", "--standard-effect", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"base_total\": 12"))
        .stdout(predicate::str::contains("\"calculated_total\": 4"));
}

#[test]
fn roll_killing_with_hit_location() {
    hd().args([
        "roll",
        "--dc",
        "3",
        "--kind",
        "killing",
        "--hit-location",
        "--seed",
        "9",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Killing 1d6"))
    .stdout(predicate::str::contains("Hit location"));
}

#[test]
fn roll_rejects_absurd_dc() {
    hd().args(["roll", "--dc", "-1e12", "--seed", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn roll_success_kind() {
    hd().args(["roll", "--dc", "3", "--kind", "success", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total"));
}

// ---------------------------------------------------------------------------
// damage
// ---------------------------------------------------------------------------

#[test]
fn damage_shows_tags() {
    let dir = scenario_dir();
    hd().args(["damage"])
        .arg(dir.path().join("strike.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Martial Strike"))
        .stdout(predicate::str::contains("+1 Martial DC"))
        .stdout(predicate::str::contains("Aid STR"))
        // 4 STR + 1 + 2 + 4 = 11 DC.
        .stdout(predicate::str::contains("11d6"));
}

#[test]
fn damage_with_rules_file() {
    let dir = scenario_dir();
    hd().args(["damage"])
        .arg(dir.path().join("strike.json"))
        .arg("--rules")
        .arg(dir.path().join("rules.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Doubling limit"))
        .stdout(predicate::str::contains("8d6"));
}

#[test]
fn damage_json_with_roll() {
    let dir = scenario_dir();
    let output = hd()
        .args(["damage", "--roll", "--seed", "3", "--json"])
        .arg(dir.path().join("strike.json"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["formula"], "11d6");
    assert_eq!(json["bundle"]["tags"][0]["name"], "Strength");
    assert_eq!(json["roll"]["roll_type"], "Normal");
}

#[test]
fn damage_called_shot() {
    let dir = scenario_dir();
    hd().args(["damage", "--roll", "--seed", "5", "--called", "head"])
        .arg(dir.path().join("strike.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Hit location Head"));
}

#[test]
fn damage_missing_weapon_fails() {
    let dir = scenario_dir();
    hd().args(["damage"])
        .arg(dir.path().join("sweep.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no base attack"));
}

#[test]
fn damage_unknown_location_fails() {
    let dir = scenario_dir();
    hd().args(["damage", "--called", "elbow"])
        .arg(dir.path().join("strike.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown hit location"));
}

#[test]
fn damage_missing_file_fails() {
    hd().args(["damage", "no-such-scenario.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}
