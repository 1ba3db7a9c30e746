//! Unit tests for session configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::{fixture, rstest};
use std::collections::HashMap;
use uuid::Uuid;

struct TempKeyFile {
    path: PathBuf,
}

impl TempKeyFile {
    fn new(len: usize) -> Self {
        let path = std::env::temp_dir().join(format!("prunk-session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'k'; len]).expect("write temporary key");
        Self { path }
    }

    fn path_str(&self) -> String {
        self.path.to_str().expect("utf-8 temp path").to_owned()
    }
}

impl Drop for TempKeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

#[fixture]
fn key_file() -> TempKeyFile {
    TempKeyFile::new(SESSION_KEY_MIN_LEN)
}

fn release_vars(key: &TempKeyFile) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key.path_str()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

#[rstest]
fn release_accepts_complete_configuration(key_file: TempKeyFile) {
    let env = mock_env(release_vars(&key_file));
    let settings =
        session_settings_from_env(&env, BuildMode::Release).expect("valid release config");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_rejects_missing_toggles(key_file: TempKeyFile, #[case] missing: &'static str) {
    let mut vars = release_vars(&key_file);
    vars.remove(missing);
    let err = session_settings_from_env(&mock_env(vars), BuildMode::Release)
        .err()
        .expect("missing toggle should fail");
    assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(SAMESITE_ENV, "sideways")]
#[case(ALLOW_EPHEMERAL_ENV, "")]
fn release_rejects_malformed_toggles(
    key_file: TempKeyFile,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let mut vars = release_vars(&key_file);
    vars.insert(name, value.to_owned());
    let err = session_settings_from_env(&mock_env(vars), BuildMode::Release)
        .err()
        .expect("malformed toggle should fail");
    assert!(matches!(err, SessionConfigError::InvalidEnv { name: got, .. } if got == name));
}

#[rstest]
fn release_rejects_same_site_none_without_secure(key_file: TempKeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());
    let err = session_settings_from_env(&mock_env(vars), BuildMode::Release)
        .err()
        .expect("insecure SameSite=None should fail");
    assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn release_rejects_ephemeral_keys(key_file: TempKeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());
    let err = session_settings_from_env(&mock_env(vars), BuildMode::Release)
        .err()
        .expect("ephemeral keys should fail in release");
    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_short_keys() {
    let short = TempKeyFile::new(SESSION_KEY_MIN_LEN - 1);
    let err = session_settings_from_env(&mock_env(release_vars(&short)), BuildMode::Release)
        .err()
        .expect("short key should fail");
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length, min_len, .. }
            if length == SESSION_KEY_MIN_LEN - 1 && min_len == SESSION_KEY_MIN_LEN
    ));
}

#[rstest]
fn release_rejects_unreadable_key_file(key_file: TempKeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(
        KEY_FILE_ENV,
        std::env::temp_dir()
            .join(format!("prunk-missing-{}", Uuid::new_v4()))
            .to_string_lossy()
            .into_owned(),
    );
    let err = session_settings_from_env(&mock_env(vars), BuildMode::Release)
        .err()
        .expect("missing key file should fail");
    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn debug_falls_back_to_defaults() {
    let settings = session_settings_from_env(&mock_env(HashMap::new()), BuildMode::Debug)
        .expect("debug defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case("none", SameSite::None)]
#[case("LAX", SameSite::Lax)]
#[case("strict", SameSite::Strict)]
#[case("bogus", SameSite::Lax)]
fn debug_same_site_parsing(#[case] raw: &str, #[case] expected: SameSite) {
    let vars = HashMap::from([(SAMESITE_ENV, raw.to_owned())]);
    let settings =
        session_settings_from_env(&mock_env(vars), BuildMode::Debug).expect("debug config");
    assert_eq!(settings.same_site, expected);
}

#[rstest]
fn debug_tolerates_short_key_files() {
    let tiny = TempKeyFile::new(8);
    let vars = HashMap::from([(KEY_FILE_ENV, tiny.path_str())]);
    assert!(session_settings_from_env(&mock_env(vars), BuildMode::Debug).is_ok());
}

#[rstest]
#[case("1", Some(true))]
#[case("Yes", Some(true))]
#[case("n", Some(false))]
#[case("FALSE", Some(false))]
#[case("2", None)]
fn parse_bool_accepts_common_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}
