use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ghostsaver(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ghostsaver").unwrap();
    cmd.current_dir(workdir)
        .env_remove("GHOSTSAVER_SAVE_DIR")
        .env_remove("GHOSTSAVER_BACKUP_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn setup() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
    let temp = TempDir::new().unwrap();
    let saves = temp.path().join("saves");
    let backups = temp.path().join("backups");
    fs::create_dir(&saves).unwrap();
    (temp, saves, backups)
}

fn backup_folders(root: &Path) -> Vec<std::path::PathBuf> {
    fs::read_dir(root)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.is_dir())
        .collect()
}

#[test]
fn missing_save_location_is_fatal() {
    let (temp, _saves, backups) = setup();

    ghostsaver(temp.path())
        .arg("--backup-dir")
        .arg(&backups)
        .arg("snapshot")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SaveGameLocation is not set"));
}

#[test]
fn malformed_settings_file_is_fatal() {
    let (temp, _saves, backups) = setup();
    fs::write(temp.path().join("appsettings.json"), "{ nope").unwrap();

    ghostsaver(temp.path())
        .arg("--backup-dir")
        .arg(&backups)
        .arg("snapshot")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse settings file"));
}

#[test]
fn snapshot_reads_location_from_settings_file() {
    let (temp, saves, backups) = setup();
    fs::write(saves.join("save1.dat"), b"one").unwrap();
    let settings = serde_json::json!({ "SaveGameLocation": saves });
    fs::write(temp.path().join("appsettings.json"), settings.to_string()).unwrap();

    ghostsaver(temp.path())
        .arg("--backup-dir")
        .arg(&backups)
        .arg("snapshot")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backed up 1 file(s)"));

    let folders = backup_folders(&backups);
    assert_eq!(folders.len(), 1);
    assert_eq!(fs::read(folders[0].join("save1.dat")).unwrap(), b"one");
}

#[test]
fn snapshot_for_existing_minute_is_skipped() {
    let (temp, saves, backups) = setup();
    fs::write(saves.join("save1.dat"), b"one").unwrap();

    // Cover this minute and the next so the run cannot land on a fresh one
    let now = chrono::Local::now().naive_local();
    for taken in [now, now + chrono::Duration::minutes(1)] {
        let folder = backups.join(taken.format("%Y%m%d%H%M").to_string());
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join("save1.dat"), b"earlier").unwrap();
    }

    ghostsaver(temp.path())
        .arg("--save-dir")
        .arg(&saves)
        .arg("--backup-dir")
        .arg(&backups)
        .arg("snapshot")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists, skipped"));

    let folders = backup_folders(&backups);
    assert_eq!(folders.len(), 2);
    for folder in folders {
        assert_eq!(fs::read(folder.join("save1.dat")).unwrap(), b"earlier");
    }
}

#[test]
fn restore_with_no_backups_reports_and_succeeds() {
    let (temp, saves, backups) = setup();

    ghostsaver(temp.path())
        .arg("--save-dir")
        .arg(&saves)
        .arg("--backup-dir")
        .arg(&backups)
        .arg("restore")
        .assert()
        .success()
        .stdout(predicate::str::contains("No backup to restore"));
}

#[test]
fn snapshot_then_restore_brings_back_deleted_save() {
    let (temp, saves, backups) = setup();
    fs::write(saves.join("save1.dat"), b"one").unwrap();
    fs::write(saves.join("save2.dat"), b"two").unwrap();

    ghostsaver(temp.path())
        .env("GHOSTSAVER_SAVE_DIR", &saves)
        .arg("--backup-dir")
        .arg(&backups)
        .arg("snapshot")
        .assert()
        .success();

    fs::remove_file(saves.join("save1.dat")).unwrap();

    ghostsaver(temp.path())
        .env("GHOSTSAVER_SAVE_DIR", &saves)
        .arg("--backup-dir")
        .arg(&backups)
        .arg("restore")
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored backup"));

    assert_eq!(fs::read(saves.join("save1.dat")).unwrap(), b"one");
    assert_eq!(fs::read(saves.join("save2.dat")).unwrap(), b"two");
}

#[test]
fn watch_handles_commands_from_stdin() {
    let (temp, saves, backups) = setup();
    fs::write(saves.join("save1.dat"), b"one").unwrap();

    ghostsaver(temp.path())
        .arg("--save-dir")
        .arg(&saves)
        .arg("--backup-dir")
        .arg(&backups)
        .arg("watch")
        .write_stdin("q\nx\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid key"))
        .stdout(predicate::str::contains("Exiting..."));
}

#[test]
fn list_shows_backups() {
    let (temp, saves, backups) = setup();
    fs::write(saves.join("save1.dat"), b"one").unwrap();
    fs::create_dir_all(backups.join("202401010000")).unwrap();
    fs::write(backups.join("202401010000").join("save1.dat"), b"one").unwrap();

    ghostsaver(temp.path())
        .arg("--save-dir")
        .arg(&saves)
        .arg("--backup-dir")
        .arg(&backups)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("202401010000"))
        .stdout(predicate::str::contains("Total: 1 backup(s)"));
}

#[test]
fn config_works_without_save_location() {
    let (temp, _saves, backups) = setup();

    ghostsaver(temp.path())
        .arg("--backup-dir")
        .arg(&backups)
        .arg("--retention")
        .arg("7")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("<not set>"))
        .stdout(predicate::str::contains("Retention count:    7"));
}

#[test]
fn config_save_writes_effective_settings() {
    let (temp, saves, backups) = setup();
    let settings_file = temp.path().join("appsettings.json");
    let original = serde_json::json!({ "SaveGameLocation": saves, "BackupIntervalSeconds": 30 });
    fs::write(&settings_file, original.to_string()).unwrap();

    ghostsaver(temp.path())
        .arg("--backup-dir")
        .arg(&backups)
        .arg("--retention")
        .arg("3")
        .arg("config")
        .arg("--save")
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings saved to"));

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&settings_file).unwrap()).unwrap();
    assert_eq!(written["SaveGameLocation"], serde_json::json!(saves));
    assert_eq!(written["BackupIntervalSeconds"], 30);
    assert_eq!(written["RetentionCount"], 3);
    assert_eq!(written["RestoreSelection"], "Oldest");

    // The written file is picked up on the next run
    ghostsaver(temp.path())
        .arg("--backup-dir")
        .arg(&backups)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Retention count:    3"));
}

#[test]
fn config_without_save_leaves_settings_file_alone() {
    let (temp, _saves, backups) = setup();

    ghostsaver(temp.path())
        .arg("--backup-dir")
        .arg(&backups)
        .arg("--retention")
        .arg("3")
        .arg("config")
        .assert()
        .success();

    assert!(!temp.path().join("appsettings.json").exists());
}
