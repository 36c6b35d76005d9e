#![forbid(unsafe_code)]
use assert_cmd::Command;
use escala::{JsonStorage, ScheduleStore};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const PEOPLE: &str = "Ana,Bia,Caio,Davi,Edu,Fabi,Gabi,Hugo,Iris,João,Kaio,Lia,Malu,Nina,Otto";

fn cli() -> Command {
    Command::cargo_bin("escala-cli").unwrap()
}

#[test]
fn dates_lists_fridays() {
    cli()
        .args(["dates", "--start", "2026-02-20", "--end", "2026-03-06"])
        .assert()
        .success()
        .stdout("2026-02-20\n2026-02-27\n2026-03-06\n");
}

#[test]
fn generate_seeds_store_once_then_checks_clean() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("schedule.json");
    let store = store.to_str().unwrap();

    let generate = [
        "--store", store, "generate", "--start", "2026-02-20", "--end", "2026-07-03",
        "--people", PEOPLE, "--seed", "7",
    ];
    cli()
        .args(generate)
        .assert()
        .success()
        .stdout(predicate::str::contains("20 inserted, 0 skipped"));

    cli()
        .args(generate)
        .assert()
        .success()
        .stdout(predicate::str::contains("already stored"));

    cli()
        .args(["--store", store, "check", "--people", PEOPLE])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: no violations"));

    cli()
        .args(["--store", store, "current", "--today", "2026-02-21"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("27 de fevereiro (Faltam 6 dias)"));

    cli()
        .args(["--store", store, "list", "--month", "2026-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6 de março"))
        .stdout(predicate::str::contains("27 de março"))
        .stdout(predicate::str::contains("fevereiro").not());
}

#[test]
fn check_reports_roster_mismatch() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("schedule.json");
    let store = store.to_str().unwrap();

    cli()
        .args([
            "--store", store, "generate", "--start", "2026-02-20", "--end", "2026-03-06",
            "--people", PEOPLE, "--seed", "1",
        ])
        .assert()
        .success();

    cli()
        .args(["--store", store, "check", "--people", "Ana,Bia,Zeca"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("violation(s)"));
}

#[test]
fn generate_refuses_quota_mismatch() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("schedule.json");

    cli()
        .args([
            "--store",
            store.to_str().unwrap(),
            "generate",
            "--start",
            "2026-02-20",
            "--end",
            "2026-03-06",
            "--people",
            PEOPLE,
            "--food",
            "6",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("quotas sum to 14"));
    assert!(!store.exists());
}

#[test]
fn force_fills_only_missing_dates() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("schedule.json");
    let store = path.to_str().unwrap();

    cli()
        .args([
            "--store", store, "generate", "--start", "2026-02-20", "--end", "2026-03-06",
            "--people", PEOPLE, "--seed", "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 inserted, 0 skipped"));
    let before = JsonStorage::open(&path).unwrap().load().unwrap();

    cli()
        .args([
            "--store", store, "generate", "--start", "2026-02-20", "--end", "2026-03-20",
            "--people", PEOPLE, "--seed", "2", "--force",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 inserted, 3 skipped"));

    let after = JsonStorage::open(&path).unwrap().load().unwrap();
    assert_eq!(after.len(), 5);
    assert_eq!(&after[..3], &before[..]);
}

#[test]
fn config_file_sets_quotas_and_rejects_bad_tuning() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("schedule.json");
    let store = store.to_str().unwrap();
    let config = dir.path().join("engine.json");
    fs::write(&config, r#"{"quotas": {"food": 6, "drink": 4, "free": 5}}"#).unwrap();
    let config = config.to_str().unwrap();

    cli()
        .args([
            "--store", store, "generate", "--start", "2026-02-20", "--end", "2026-03-06",
            "--people", PEOPLE, "--seed", "3", "--config", config,
        ])
        .assert()
        .success();

    cli()
        .args(["--store", store, "check", "--people", PEOPLE, "--config", config])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: no violations"));

    // quotas par défaut (7, 3, 5) : les équipes stockées ne collent plus
    cli()
        .args(["--store", store, "check", "--people", PEOPLE])
        .assert()
        .code(2);

    let bad = dir.path().join("bad.json");
    fs::write(&bad, r#"{"tuning": {"deficit_weight": 4.0, "jitter": 3.5}}"#).unwrap();
    let other_store = dir.path().join("other.json");
    cli()
        .args([
            "--store",
            other_store.to_str().unwrap(),
            "generate",
            "--start",
            "2026-02-20",
            "--end",
            "2026-03-06",
            "--people",
            PEOPLE,
            "--config",
            bad.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid tuning"));
    assert!(!other_store.exists());
}

#[test]
fn hill_climb_strategy_from_command_line() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("schedule.json");
    let store = store.to_str().unwrap();

    cli()
        .args([
            "--store", store, "generate", "--start", "2026-02-20", "--end", "2026-07-03",
            "--people", PEOPLE, "--seed", "4", "--strategy", "hill-climb", "--iterations",
            "2000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("20 inserted, 0 skipped"));

    cli()
        .args(["--store", store, "check", "--people", PEOPLE])
        .assert()
        .success();

    cli()
        .args([
            "--store", store, "generate", "--start", "2026-02-20", "--end", "2026-03-06",
            "--people", PEOPLE, "--strategy", "simulated-annealing",
        ])
        .assert()
        .failure();
}

#[test]
fn notify_writes_reminder_file() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("schedule.json");
    let store = store.to_str().unwrap();
    let out = dir.path().join("ana.txt");

    cli()
        .args([
            "--store", store, "generate", "--start", "2026-02-20", "--end", "2026-03-06",
            "--people", PEOPLE, "--seed", "5",
        ])
        .assert()
        .success();

    cli()
        .args([
            "--store",
            store,
            "notify",
            "--person",
            "Ana",
            "--today",
            "2026-02-18",
            "--out",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reminder generated for Ana"));

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("Olá Ana,"));
    assert!(content.contains("20 de fevereiro"));
}
