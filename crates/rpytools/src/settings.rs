//! Rendering settings and the process-global store they are read from.

use std::sync::{LazyLock, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::errors::SettingsError;

/// Rewrites a dotted namespace access into the target's member operator.
///
/// When a rendered literal starts with `prefix`, every occurrence of `from`
/// in it is replaced by `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRule {
    pub prefix: String,
    #[serde(default = "default_rule_from")]
    pub from: String,
    #[serde(default = "default_rule_to")]
    pub to: String,
}

impl RewriteRule {
    pub fn new(prefix: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// Dots to `$` for everything under `prefix`.
    pub fn namespace(prefix: impl Into<String>) -> Self {
        Self::new(prefix, default_rule_from(), default_rule_to())
    }

    pub fn matches(&self, rendered: &str) -> bool {
        rendered.starts_with(&self.prefix)
    }

    pub fn apply(&self, rendered: &str) -> String {
        rendered.replace(&self.from, &self.to)
    }
}

fn default_rule_from() -> String {
    ".".to_string()
}

fn default_rule_to() -> String {
    "$".to_string()
}

/// Target-language spellings and behaviour knobs for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Namespace rewrites; the first matching rule wins.
    pub rules: Vec<RewriteRule>,
    pub null_literal: String,
    pub true_literal: String,
    pub false_literal: String,
    /// Appended to integer literals.
    pub integer_suffix: String,
    /// Implicit first parameter of methods.
    pub receiver: String,
    /// Longest chain of transparent wrappers followed before giving up.
    pub max_unwrap_depth: usize,
    /// Emit keyword-only parameters in rendered signatures.
    pub keyword_only: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            rules: vec![RewriteRule::namespace("tf.")],
            null_literal: "NULL".to_string(),
            true_literal: "TRUE".to_string(),
            false_literal: "FALSE".to_string(),
            integer_suffix: "L".to_string(),
            receiver: "self".to_string(),
            max_unwrap_depth: 16,
            keyword_only: false,
        }
    }
}

impl RenderSettings {
    /// Parse settings from JSON; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.prefix.is_empty() {
                return Err(SettingsError::InvalidRule {
                    index,
                    reason: "prefix must not be empty".to_string(),
                });
            }
            if rule.from.is_empty() {
                return Err(SettingsError::InvalidRule {
                    index,
                    reason: "`from` must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn with_rule(mut self, rule: RewriteRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Apply the first matching rewrite rule, if any.
    pub fn rewrite(&self, rendered: String) -> String {
        match self.rules.iter().find(|rule| rule.matches(&rendered)) {
            Some(rule) => rule.apply(&rendered),
            None => rendered,
        }
    }
}

pub static SETTINGS: LazyLock<RwLock<RenderSettings>> =
    LazyLock::new(|| RwLock::new(RenderSettings::default()));

/// Snapshot of the process-global settings.
pub fn settings() -> RenderSettings {
    SETTINGS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replace the process-global settings.
pub fn configure_settings(settings: RenderSettings) {
    *SETTINGS.write().unwrap_or_else(PoisonError::into_inner) = settings;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rewrites_tf_namespace() {
        let settings = RenderSettings::default();
        assert_eq!(settings.rewrite("tf.nn.relu".into()), "tf$nn$relu");
        assert_eq!(settings.rewrite("np.float32".into()), "np.float32");
        assert_eq!(settings.rewrite("\"tf.x\"".into()), "\"tf.x\"");
    }

    #[test]
    fn first_matching_rule_wins() {
        let settings = RenderSettings {
            rules: vec![
                RewriteRule::new("keras.", ".", "::"),
                RewriteRule::namespace("keras."),
            ],
            ..RenderSettings::default()
        };
        assert_eq!(settings.rewrite("keras.layers.Dense".into()), "keras::layers::Dense");
    }

    #[test]
    fn from_json_fills_defaults() {
        let settings = RenderSettings::from_json_str(
            r#"{"rules": [{"prefix": "np."}], "keyword_only": true}"#,
        )
        .unwrap();

        assert_eq!(settings.rules, vec![RewriteRule::namespace("np.")]);
        assert!(settings.keyword_only);
        assert_eq!(settings.null_literal, "NULL");
        assert_eq!(settings.max_unwrap_depth, 16);
    }

    #[test]
    fn from_json_rejects_empty_prefix() {
        let err = RenderSettings::from_json_str(r#"{"rules": [{"prefix": ""}]}"#).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidRule { index: 0, .. }));
    }

    #[test]
    fn from_json_reports_parse_errors() {
        let err = RenderSettings::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
