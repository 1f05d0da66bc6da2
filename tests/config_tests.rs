// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use spendlens::config::{Settings, ENV_API_BASE, ENV_TIMEOUT};
use spendlens::session::SessionStore;
use tempfile::tempdir;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |k| map.get(k).cloned()
}

#[test]
fn defaults_without_sources() {
    let s = Settings::from_sources(None, env_of(&[]), None).unwrap();
    assert_eq!(s, Settings::default());
    assert_eq!(s.api_base, "http://localhost:3000");
    assert_eq!(s.page_size, 10);
}

#[test]
fn file_then_env_then_flag() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "api_base": "https://file.example/", "page_size": 25 }"#,
    )
    .unwrap();

    let s = Settings::from_sources(Some(&path), env_of(&[]), None).unwrap();
    assert_eq!(s.api_base, "https://file.example");
    assert_eq!(s.page_size, 25);
    assert_eq!(s.timeout_secs, 15);

    let env = env_of(&[(ENV_API_BASE, "https://env.example"), (ENV_TIMEOUT, "3")]);
    let s = Settings::from_sources(Some(&path), env, None).unwrap();
    assert_eq!(s.api_base, "https://env.example");
    assert_eq!(s.timeout_secs, 3);
    assert_eq!(s.page_size, 25);

    let env = env_of(&[(ENV_API_BASE, "https://env.example")]);
    let s = Settings::from_sources(Some(&path), env, Some("http://flag:9000")).unwrap();
    assert_eq!(s.api_base, "http://flag:9000");
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.json");
    let s = Settings::from_sources(Some(&path), env_of(&[]), None).unwrap();
    assert_eq!(s, Settings::default());
}

#[test]
fn bad_config_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(Settings::from_sources(Some(&path), env_of(&[]), None).is_err());

    let env = env_of(&[(ENV_TIMEOUT, "soon")]);
    assert!(Settings::from_sources(None, env, None).is_err());
}

#[test]
fn session_store_round_trip() {
    let dir = tempdir().unwrap();
    let store = SessionStore::at(dir.path().join("nested").join("session"));
    assert_eq!(store.load().unwrap(), None);

    store.save("token=abc123").unwrap();
    assert_eq!(store.load().unwrap().as_deref(), Some("token=abc123"));
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
    // Clearing twice is fine
    store.clear().unwrap();
}

#[test]
fn blank_session_file_is_no_session() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session");
    std::fs::write(&path, "\n").unwrap();
    assert_eq!(SessionStore::at(&path).load().unwrap(), None);
}

#[cfg(unix)]
#[test]
fn existing_session_file_is_made_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let path = dir.path().join("session");
    std::fs::write(&path, "old").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

    let store = SessionStore::at(&path);
    store.save("token=new").unwrap();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    assert_eq!(store.load().unwrap().as_deref(), Some("token=new"));
}
