use super::load::{default_config_path, default_data_dir, resolve_config_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_setlist_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("SETLIST_CONFIG_PATH", "/tmp/setlist-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/setlist-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        PathBuf::from("/tmp/xdg-config-home")
            .join("setlist")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("setlist")
            .join("config.toml")
    );
}

#[test]
fn data_dir_prefers_storage_override_then_xdg_data_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_DATA_HOME", "/tmp/xdg-data");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_data_dir().unwrap(),
        PathBuf::from("/tmp/xdg-data").join("setlist")
    );

    let mut s = Settings::default();
    assert_eq!(s.data_dir().unwrap(), PathBuf::from("/tmp/xdg-data/setlist"));
    s.storage.dir = Some(PathBuf::from("/srv/playlists"));
    assert_eq!(s.data_dir().unwrap(), PathBuf::from("/srv/playlists"));
}

#[test]
fn default_data_dir_falls_back_to_home_local_share() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_DATA_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_data_dir().unwrap(),
        PathBuf::from("/tmp/home-dir/.local/share/setlist")
    );
}

#[test]
fn settings_load_from_config_file_and_parse_loop_mode_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[storage]
dir = "/tmp/setlist-data"

[playback]
shuffle = true
loop_mode = "repeat-one"
volume = 0.5
poll_interval_ms = 50

[display]
track_fields = ["title", "album"]
separator = " • "

[library]
extensions = ["mp3"]
recursive = false
include_hidden = false
follow_links = false
clean_titles = false
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SETLIST_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("SETLIST__PLAYBACK__VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.storage.dir, Some(PathBuf::from("/tmp/setlist-data")));
    assert!(s.playback.shuffle);
    assert_eq!(s.playback.loop_mode, LoopModeSetting::LoopOne);
    assert_eq!(s.playback.volume, 0.5);
    assert_eq!(s.playback.poll_interval_ms, 50);
    assert_eq!(
        s.display.track_fields,
        vec![TrackDisplayField::Title, TrackDisplayField::Album]
    );
    assert_eq!(s.display.separator, " • ");
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(!s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert!(!s.library.clean_titles);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
poll_interval_ms = 250
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SETLIST_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("SETLIST__PLAYBACK__POLL_INTERVAL_MS", "75");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.poll_interval_ms, 75);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.playback.volume = 1.5;
    assert!(s.validate().unwrap_err().contains("volume"));

    s.playback.volume = 0.3;
    s.playback.poll_interval_ms = 0;
    assert!(s.validate().unwrap_err().contains("poll_interval_ms"));

    s.playback.poll_interval_ms = 10;
    s.library.extensions = vec!["  ".into()];
    assert!(s.validate().unwrap_err().contains("extensions"));
}
