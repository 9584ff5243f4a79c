//! `%NAME%` placeholder expansion.
//!
//! Responsibilities:
//! - Substitute `%NAME%` tokens with process environment values.
//! - Rewrite file-layer values once after loading, honoring the `ENV_VARIABLES` allow-list.
//!
//! Does NOT handle:
//! - Secret or environment layers; those are taken as already resolved.
//! - Escaping, defaults, or nested expressions; this is not a template language.
//!
//! Invariants:
//! - Placeholders naming unset variables are kept as literal text.
//! - Values without the `%` delimiter are never touched.
//! - The allow-list filter is a substring test on the raw value, not a token match.

use tracing::debug;

use crate::constants::{ENV_VARIABLES_ALLOW_LIST, PLACEHOLDER_DELIMITER};
use crate::tree::{ConfigurationTree, SettingsSource};

/// The narrow view of a configuration the expander works on.
pub trait ExpandableSource: SettingsSource {
    /// Visit every entry that came from a settings file, with mutable access to its value.
    fn for_each_file_entry(&mut self, visit: &mut dyn FnMut(&str, &mut String));
}

impl ExpandableSource for ConfigurationTree {
    fn for_each_file_entry(&mut self, visit: &mut dyn FnMut(&str, &mut String)) {
        for layer in self.layers_mut() {
            if !layer.source().is_file() {
                continue;
            }
            for (key, value) in layer.iter_mut() {
                visit(key, value);
            }
        }
    }
}

/// Expand `%NAME%` tokens in `value` using the process environment.
pub fn expand_env_placeholders(value: &str) -> String {
    expand_with(value, |name| std::env::var(name).ok())
}

/// Expand `%NAME%` tokens in `value` using `lookup`.
///
/// When a name does not resolve, the opening `%` and the name are emitted
/// verbatim and scanning restarts at the closing `%`, so `%A%B%` can still
/// expand `%B%` when `A` is unset.
pub fn expand_with<F>(value: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(open) = rest.find(PLACEHOLDER_DELIMITER) {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let Some(close) = after_open.find(PLACEHOLDER_DELIMITER) else {
            // Unterminated token.
            out.push_str(&rest[open..]);
            return out;
        };

        let name = &after_open[..close];
        match (!name.is_empty()).then(|| lookup(name)).flatten() {
            Some(resolved) => {
                out.push_str(&resolved);
                rest = &after_open[close + 1..];
            }
            None => {
                out.push(PLACEHOLDER_DELIMITER);
                out.push_str(name);
                rest = &after_open[close..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Parse the `ENV_VARIABLES` allow-list value.
pub fn parse_allow_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether a value should be rewritten under the given allow-list.
fn in_scope(value: &str, allow_list: Option<&[String]>) -> bool {
    if !value.contains(PLACEHOLDER_DELIMITER) {
        return false;
    }
    match allow_list {
        Some(names) => names.iter().any(|name| value.contains(name.as_str())),
        None => true,
    }
}

/// Rewrite placeholders in every file-backed entry of `source`.
///
/// Returns the number of values that changed.
pub fn expand_source<S>(source: &mut S) -> usize
where
    S: ExpandableSource + ?Sized,
{
    let allow_list = source
        .setting(ENV_VARIABLES_ALLOW_LIST)
        .map(parse_allow_list)
        .filter(|names| !names.is_empty());

    let mut rewritten = 0usize;
    source.for_each_file_entry(&mut |key, value| {
        if !in_scope(value, allow_list.as_deref()) {
            return;
        }
        let expanded = expand_env_placeholders(value);
        if expanded != *value {
            tracing::trace!(key, "Expanded placeholders");
            *value = expanded;
            rewritten += 1;
        }
    });

    debug!(
        rewritten,
        allow_list = allow_list.as_ref().map(Vec::len),
        "Placeholder expansion finished"
    );
    rewritten
}

/// Expand placeholders in a loaded tree, returning it for chaining.
///
/// A missing tree is a no-op.
pub fn expand_placeholders(
    tree: Option<&mut ConfigurationTree>,
) -> Option<&mut ConfigurationTree> {
    let tree = tree?;
    expand_source(&mut *tree);
    Some(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Layer, LayerSource};
    use serial_test::serial;
    use std::path::PathBuf;

    fn lookup_table(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    fn file_tree(pairs: &[(&str, &str)]) -> ConfigurationTree {
        ConfigurationTree::new().with_layer(Layer::from_pairs(
            LayerSource::File {
                path: PathBuf::from("appsettings.json"),
            },
            pairs.iter().copied(),
        ))
    }

    #[test]
    fn test_expand_known_variable() {
        let lookup = lookup_table(&[("FOO", "baz")]);
        assert_eq!(expand_with("%FOO%/bar", lookup), "baz/bar");
    }

    #[test]
    fn test_unknown_variable_is_preserved() {
        let lookup = lookup_table(&[]);
        assert_eq!(expand_with("%FOO%/bar", lookup), "%FOO%/bar");
    }

    #[test]
    fn test_unknown_then_known_shares_delimiter() {
        let lookup = lookup_table(&[("B", "x")]);
        assert_eq!(expand_with("%A%B%", lookup), "%Ax");
    }

    #[test]
    fn test_multiple_and_adjacent_placeholders() {
        let lookup = lookup_table(&[("HOST", "db"), ("PORT", "5432")]);
        assert_eq!(
            expand_with("tcp://%HOST%:%PORT%/%HOST%%PORT%", lookup),
            "tcp://db:5432/db5432"
        );
    }

    #[test]
    fn test_unterminated_and_empty_tokens() {
        let lookup = lookup_table(&[("A", "1")]);
        assert_eq!(expand_with("50%", &lookup), "50%");
        assert_eq!(expand_with("%%", &lookup), "%%");
        assert_eq!(expand_with("%A% is 100%", &lookup), "1 is 100%");
    }

    #[test]
    fn test_parse_allow_list_trims_and_skips_blanks() {
        assert_eq!(parse_allow_list(" FOO, ,BAR ,"), vec!["FOO", "BAR"]);
        assert!(parse_allow_list(" , ").is_empty());
    }

    #[test]
    #[serial]
    fn test_expand_source_rewrites_file_values() {
        temp_env::with_vars([("CONFSTRAP_EXP_FOO", Some("baz"))], || {
            let mut tree = file_tree(&[
                ("Path", "%CONFSTRAP_EXP_FOO%/bar"),
                ("Plain", "no placeholders"),
            ]);

            assert_eq!(expand_source(&mut tree), 1);
            assert_eq!(tree.get("Path"), Some("baz/bar"));
            assert_eq!(tree.get("Plain"), Some("no placeholders"));
        });
    }

    #[test]
    #[serial]
    fn test_expand_source_skips_non_file_layers() {
        temp_env::with_vars([("CONFSTRAP_EXP_FOO", Some("baz"))], || {
            let mut tree = ConfigurationTree::new().with_layer(Layer::from_pairs(
                LayerSource::Memory {
                    name: "overrides".to_string(),
                },
                [("Path", "%CONFSTRAP_EXP_FOO%")],
            ));

            assert_eq!(expand_source(&mut tree), 0);
            assert_eq!(tree.get("Path"), Some("%CONFSTRAP_EXP_FOO%"));
        });
    }

    #[test]
    #[serial]
    fn test_allow_list_blocks_unlisted_names() {
        temp_env::with_vars(
            [
                ("CONFSTRAP_EXP_FOO", Some("foo")),
                ("CONFSTRAP_EXP_BAR", Some("bar")),
            ],
            || {
                let mut tree = file_tree(&[
                    ("ENV_VARIABLES", "CONFSTRAP_EXP_FOO"),
                    ("Listed", "%CONFSTRAP_EXP_FOO%"),
                    ("Unlisted", "%CONFSTRAP_EXP_BAR%"),
                ]);

                expand_source(&mut tree);
                assert_eq!(tree.get("Listed"), Some("foo"));
                assert_eq!(tree.get("Unlisted"), Some("%CONFSTRAP_EXP_BAR%"));
            },
        );
    }

    #[test]
    #[serial]
    fn test_allow_list_match_expands_whole_value() {
        temp_env::with_vars(
            [
                ("CONFSTRAP_EXP_FOO", Some("foo")),
                ("CONFSTRAP_EXP_BAR", Some("bar")),
            ],
            || {
                let mut tree = file_tree(&[
                    ("ENV_VARIABLES", "CONFSTRAP_EXP_FOO"),
                    ("Mixed", "%CONFSTRAP_EXP_FOO%-%CONFSTRAP_EXP_BAR%"),
                ]);

                expand_source(&mut tree);
                assert_eq!(tree.get("Mixed"), Some("foo-bar"));
            },
        );
    }

    #[test]
    fn test_expand_placeholders_none_is_noop() {
        assert!(expand_placeholders(None).is_none());
    }

    #[test]
    fn test_expand_placeholders_returns_same_tree() {
        let mut tree = file_tree(&[("A", "plain")]);
        let returned = expand_placeholders(Some(&mut tree)).expect("tree should be returned");
        assert_eq!(returned.get("A"), Some("plain"));
    }
}
