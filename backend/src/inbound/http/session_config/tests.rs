//! Environment handling for cookie session settings.

use super::*;
use mockable::MockEnv;
use rstest::{fixture, rstest};
use std::collections::HashMap;
use uuid::Uuid;

/// Key file removed again on drop.
struct KeyFile(PathBuf);

impl KeyFile {
    fn with_len(len: usize) -> Self {
        let path = std::env::temp_dir().join(format!("jokes-session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'k'; len]).expect("write key file");
        Self(path)
    }

    fn path(&self) -> String {
        self.0.to_string_lossy().into_owned()
    }
}

impl Drop for KeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn env_with(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |name| vars.get(name).cloned());
    env
}

#[fixture]
fn key_file() -> KeyFile {
    KeyFile::with_len(SESSION_KEY_MIN_LEN)
}

fn release_vars(key_file: &KeyFile) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key_file.path()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn release_error(vars: HashMap<&'static str, String>) -> SessionConfigError {
    match session_settings_from_env(&env_with(vars), BuildMode::Release) {
        Ok(_) => panic!("release settings should be rejected"),
        Err(error) => error,
    }
}

#[rstest]
fn release_accepts_a_complete_configuration(key_file: KeyFile) {
    let env = env_with(release_vars(&key_file));
    let settings = session_settings_from_env(&env, BuildMode::Release).expect("valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(key_file: KeyFile, #[case] missing: &'static str) {
    let mut vars = release_vars(&key_file);
    vars.remove(missing);
    let error = release_error(vars);
    assert!(matches!(error, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(ALLOW_EPHEMERAL_ENV, "")]
#[case(SAMESITE_ENV, "sometimes")]
fn release_rejects_malformed_toggles(
    key_file: KeyFile,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let mut vars = release_vars(&key_file);
    vars.insert(name, value.to_owned());
    let error = release_error(vars);
    assert!(matches!(error, SessionConfigError::InvalidEnv { name: n, .. } if n == name));
}

#[rstest]
fn release_refuses_ephemeral_keys(key_file: KeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::EphemeralNotAllowed
    ));
}

#[rstest]
fn release_refuses_same_site_none_without_secure(key_file: KeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn release_needs_a_readable_key(key_file: KeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(KEY_FILE_ENV, format!("{}-missing", key_file.path()));
    assert!(matches!(
        release_error(vars),
        SessionConfigError::KeyRead { .. }
    ));
}

#[rstest]
fn release_rejects_short_keys() {
    let short = KeyFile::with_len(SESSION_KEY_MIN_LEN - 1);
    let error = release_error(release_vars(&short));
    assert!(matches!(
        error,
        SessionConfigError::KeyTooShort { length, min_len, .. }
            if length == SESSION_KEY_MIN_LEN - 1 && min_len == SESSION_KEY_MIN_LEN
    ));
}

#[rstest]
fn debug_fills_in_defaults() {
    let env = env_with(HashMap::from([(
        KEY_FILE_ENV,
        "/nonexistent/jokes-session-key".to_owned(),
    )]));
    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_tolerates_bad_values_and_short_keys() {
    let short = KeyFile::with_len(8);
    let env = env_with(HashMap::from([
        (KEY_FILE_ENV, short.path()),
        (COOKIE_SECURE_ENV, "perhaps".to_owned()),
        (SAMESITE_ENV, "unexpected".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "1".to_owned()),
    ]));
    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("lenient in debug");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case("1", Some(true))]
#[case("TRUE", Some(true))]
#[case(" y ", Some(true))]
#[case("no", Some(false))]
#[case("0", Some(false))]
#[case("2", None)]
fn booleans_accept_common_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}
