//! File-backed sessions built from configuration.

use super::test_utils::host;
use multilog::config::MultiLogConfig;
use multilog::{FilePolicy, SessionLog, SessionState};
use std::fs;
use tempfile::TempDir;

fn config_for(path: std::path::PathBuf, policy: FilePolicy) -> MultiLogConfig {
    let mut config = MultiLogConfig::default();
    config.session.file = path;
    config.session.file_policy = policy;
    config
}

#[test]
fn session_writes_framed_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("logs").join("multi.log");
    let mut log = SessionLog::from_config(&config_for(path.clone(), FilePolicy::PerProcess), None);

    log.start(&host());
    log.stop();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("Multiplayer Log - Opened "));
    assert!(content.contains("~   Multiplayer version: 23.2.1\n"));
    assert!(content.contains("~   Protocol version: 52\n"));
    assert!(content.contains("\n----\n----\n----\nMultiplayer Log - Closing "));
    assert!(content.ends_with('\n'));
}

#[test]
fn per_process_policy_appends_sessions() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("multi.log");
    let mut log = SessionLog::from_config(&config_for(path.clone(), FilePolicy::PerProcess), None);

    log.start(&host());
    log.stop();
    log.start(&host());
    log.stop();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.matches("Log - Opened").count(), 2);
    assert_eq!(content.matches("Log - Closing").count(), 2);
}

#[test]
fn per_session_policy_writes_separate_files() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("multi.log");
    let mut log = SessionLog::from_config(&config_for(path, FilePolicy::PerSession), None);

    log.start(&host());
    let id = log.session_id().unwrap().to_string();
    log.stop();

    let expected = temp.path().join(format!("multi-{id}.log"));
    let content = fs::read_to_string(expected).unwrap();
    assert_eq!(content.matches("Log - Opened").count(), 1);
}

#[test]
fn unopenable_path_disables_session() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not-a-dir");
    fs::write(&blocker, "x").unwrap();
    let path = blocker.join("multi.log");
    let mut log = SessionLog::from_config(&config_for(path.clone(), FilePolicy::PerProcess), None);

    log.start(&host());
    assert_eq!(log.state(), &SessionState::Disabled);
    assert!(!log.poll_now());
    log.stop();

    assert!(!path.exists());
}
