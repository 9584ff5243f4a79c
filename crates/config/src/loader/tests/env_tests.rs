//! Environment layer tests for the configuration loader.
//!
//! Responsibilities:
//! - Test that environment variables override every other layer.
//! - Test `__` section normalization in the environment layer.
//! - Test local-mode detection from `IsLocal`.

use serial_test::serial;
use tempfile::TempDir;

use super::{RecordingSources, block_on, env_lock, no_secret_vars, with_overrides, write_settings};
use crate::loader::builder::ConfigLoader;
use crate::tree::LayerSource;

#[test]
#[serial]
fn test_env_var_overrides_settings_file() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    write_settings(
        temp_dir.path(),
        "appsettings.json",
        r#"{"ConfstrapEnv": {"Region": "eu-west"}}"#,
    );

    temp_env::with_vars(
        with_overrides(&[("ConfstrapEnv__Region", Some("us-east"))]),
        || {
            let tree = block_on(
                ConfigLoader::new()
                    .with_content_root(temp_dir.path())
                    .load(&RecordingSources::default()),
            )
            .unwrap();

            assert_eq!(tree.get("ConfstrapEnv:Region"), Some("us-east"));
            assert_eq!(tree.get("confstrapenv:region"), Some("us-east"));
            assert_eq!(
                tree.source_of("ConfstrapEnv:Region"),
                Some(&LayerSource::Environment)
            );
        },
    );
}

#[test]
#[serial]
fn test_empty_env_var_still_overrides() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    write_settings(
        temp_dir.path(),
        "appsettings.json",
        r#"{"ConfstrapEnv": {"Blank": "from-file"}}"#,
    );

    temp_env::with_vars(
        with_overrides(&[("ConfstrapEnv__Blank", Some(""))]),
        || {
            let tree = block_on(
                ConfigLoader::new()
                    .with_content_root(temp_dir.path())
                    .load(&RecordingSources::default()),
            )
            .unwrap();

            // The last layer to define a key wins, even with a blank value.
            assert_eq!(tree.get("ConfstrapEnv:Blank"), Some(""));
        },
    );
}

#[test]
#[serial]
fn test_env_values_are_not_placeholder_expanded() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();

    temp_env::with_vars(
        with_overrides(&[
            ("CONFSTRAP_ENV_RAW", Some("%CONFSTRAP_ENV_TARGET%")),
            ("CONFSTRAP_ENV_TARGET", Some("expanded")),
        ]),
        || {
            let tree = block_on(
                ConfigLoader::new()
                    .with_content_root(temp_dir.path())
                    .load(&RecordingSources::default()),
            )
            .unwrap();

            assert_eq!(tree.get("CONFSTRAP_ENV_RAW"), Some("%CONFSTRAP_ENV_TARGET%"));
        },
    );
}

#[test]
#[serial]
fn test_is_local_detection() {
    let _lock = env_lock().lock().unwrap();

    for (value, expected) in [
        (Some("true"), true),
        (Some("TRUE"), true),
        (Some("True"), true),
        (Some("false"), false),
        (Some("1"), false),
        (Some(""), false),
        (None, false),
    ] {
        temp_env::with_vars(with_overrides(&[("IsLocal", value)]), || {
            assert_eq!(
                ConfigLoader::new().is_local(),
                expected,
                "IsLocal={value:?}"
            );
        });
    }

    temp_env::with_vars(no_secret_vars(), || {
        assert!(ConfigLoader::new().local(true).is_local());
    });
}

#[test]
#[serial]
fn test_environment_file_path() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(no_secret_vars(), || {
        let loader = ConfigLoader::new().with_content_root("/srv/app");
        assert_eq!(loader.environment_file(), None);

        let loader = loader.with_environment_name("Production");
        assert_eq!(
            loader.environment_file(),
            Some(std::path::PathBuf::from("/srv/app/appsettings.Production.json"))
        );
    });
}
