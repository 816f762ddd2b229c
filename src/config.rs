use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::platform::terraform::DEFAULT_API_URL;
use crate::platform::types::WorkspaceRef;
use crate::workflow::converge::DEFAULT_POLL_INTERVAL;
use crate::workflow::WaitOptions;

#[derive(Deserialize, Clone)]
pub struct AppConfig {
    pub organization: String,
    /// Comma-separated workspace names.
    pub workspaces: String,
    pub token: String,
    #[serde(default)]
    pub wait_for_apply: bool,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

// Manual Debug impl to avoid leaking the API token
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("organization", &self.organization)
            .field("workspaces", &self.workspaces)
            .field("token", &"[REDACTED]")
            .field("wait_for_apply", &self.wait_for_apply)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Values given on the command line; these win over every other source.
#[derive(Default, Clone)]
pub struct ConfigOverrides {
    pub organization: Option<String>,
    pub workspaces: Option<String>,
    pub token: Option<String>,
    pub wait_for_apply: Option<bool>,
    pub poll_interval_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub api_url: Option<String>,
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

/// Map GitHub Actions step inputs (`INPUT_<NAME>`) onto config keys.
///
/// Inputs declared without a default arrive as empty strings and are left
/// out. `waitForApply` is on only for the exact value `true`.
fn action_inputs(env: &HashMap<String, String>) -> HashMap<String, String> {
    let mut inputs = HashMap::new();

    for (var, key) in [
        ("INPUT_ORGANIZATION", "organization"),
        ("INPUT_WORKSPACES", "workspaces"),
        ("INPUT_TOKEN", "token"),
    ] {
        if let Some(value) = env.get(var).filter(|v| !v.is_empty()) {
            inputs.insert(key.to_string(), value.clone());
        }
    }

    if let Some(value) = env.get("INPUT_WAITFORAPPLY").filter(|v| !v.is_empty()) {
        inputs.insert("wait_for_apply".to_string(), (value == "true").to_string());
    }

    inputs
}

impl AppConfig {
    pub fn load(config_path: Option<&str>, overrides: ConfigOverrides) -> Result<Self> {
        Self::load_with_env(config_path, overrides, std::env::vars().collect())
    }

    /// Load against an explicit environment instead of the process one.
    pub fn load_with_env(
        config_path: Option<&str>,
        overrides: ConfigOverrides,
        env: HashMap<String, String>,
    ) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Load from file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            builder = builder.add_source(config::File::with_name("tfwait").required(false));
        }

        builder = builder.add_source(
            config::Environment::default()
                .source(Some(action_inputs(&env)))
                .try_parsing(true),
        );

        builder = builder.add_source(
            config::Environment::with_prefix("TFWAIT")
                .prefix_separator("_")
                .try_parsing(true)
                .ignore_empty(true)
                .source(Some(env)),
        );

        builder = builder
            .set_override_option("organization", overrides.organization)?
            .set_override_option("workspaces", overrides.workspaces)?
            .set_override_option("token", overrides.token)?
            .set_override_option("wait_for_apply", overrides.wait_for_apply)?
            .set_override_option("poll_interval_ms", overrides.poll_interval_ms)?
            .set_override_option("timeout_secs", overrides.timeout_secs)?
            .set_override_option("api_url", overrides.api_url)?;

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.organization.trim().is_empty() {
            return Err(AppError::Config("organization must not be empty".to_string()));
        }
        if self.token.trim().is_empty() {
            return Err(AppError::Config("token must not be empty".to_string()));
        }
        if self.workspace_refs().is_empty() {
            return Err(AppError::Config(format!(
                "no workspace names in '{}'",
                self.workspaces
            )));
        }
        if self.poll_interval_ms == 0 {
            return Err(AppError::Config(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn workspace_refs(&self) -> Vec<WorkspaceRef> {
        WorkspaceRef::parse_list(self.organization.trim(), &self.workspaces)
    }

    pub fn wait_options(&self) -> WaitOptions {
        WaitOptions {
            wait_for_apply: self.wait_for_apply,
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn env(vars: &[(&str, &str)]) -> HashMap<String, String> {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn action_env(wait_for_apply: &str) -> HashMap<String, String> {
        env(&[
            ("INPUT_ORGANIZATION", "acme"),
            ("INPUT_WORKSPACES", "network, compute"),
            ("INPUT_TOKEN", "secret"),
            ("INPUT_WAITFORAPPLY", wait_for_apply),
        ])
    }

    fn sample() -> AppConfig {
        AppConfig {
            organization: "acme".to_string(),
            workspaces: "network, compute".to_string(),
            token: "secret".to_string(),
            wait_for_apply: false,
            poll_interval_ms: default_poll_interval_ms(),
            timeout_secs: None,
            api_url: default_api_url(),
        }
    }

    #[test]
    fn test_load_from_file_with_defaults() {
        let file = config_file(
            r#"
            organization = "acme"
            workspaces = "network , compute"
            token = "secret"
            "#,
        );

        let config = AppConfig::load_with_env(
            file.path().to_str(),
            ConfigOverrides::default(),
            HashMap::new(),
        )
        .unwrap();
        assert_eq!(config.organization, "acme");
        assert!(!config.wait_for_apply);
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.wait_options().poll_interval, DEFAULT_POLL_INTERVAL);
        assert_eq!(config.timeout_secs, None);
        assert_eq!(config.api_url, DEFAULT_API_URL);

        let names: Vec<_> = config
            .workspace_refs()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["network", "compute"]);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = config_file(
            r#"
            organization = "acme"
            workspaces = "network"
            token = "from-file"
            poll_interval_ms = 5000
            "#,
        );

        let overrides = ConfigOverrides {
            token: Some("from-cli".to_string()),
            wait_for_apply: Some(true),
            poll_interval_ms: Some(250),
            timeout_secs: Some(600),
            ..ConfigOverrides::default()
        };

        let config =
            AppConfig::load_with_env(file.path().to_str(), overrides, HashMap::new()).unwrap();
        assert_eq!(config.token, "from-cli");
        assert!(config.wait_for_apply);

        let options = config.wait_options();
        assert!(options.wait_for_apply);
        assert_eq!(options.poll_interval, Duration::from_millis(250));
        assert_eq!(options.timeout, Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_missing_required_field_is_config_error() {
        let file = config_file(r#"organization = "acme""#);
        let overrides = ConfigOverrides {
            token: Some("secret".to_string()),
            ..ConfigOverrides::default()
        };
        let err = AppConfig::load_with_env(file.path().to_str(), overrides, HashMap::new())
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_blank_values() {
        let mut config = sample();
        config.workspaces = " , ".to_string();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let mut config = sample();
        config.token = String::new();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let mut config = sample();
        config.poll_interval_ms = 0;
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", sample());
        assert!(!debug.contains("secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_action_inputs_with_empty_wait_for_apply() {
        let file = config_file("");
        let config = AppConfig::load_with_env(
            file.path().to_str(),
            ConfigOverrides::default(),
            action_env(""),
        )
        .unwrap();

        assert_eq!(config.organization, "acme");
        assert_eq!(config.token, "secret");
        assert_eq!(config.workspace_refs().len(), 2);
        assert!(!config.wait_for_apply);
    }

    #[test]
    fn test_action_wait_for_apply_is_true_only_for_exact_true() {
        for (raw, expected) in [("true", true), ("false", false), ("yes", false), ("TRUE", false)] {
            let file = config_file("");
            let config = AppConfig::load_with_env(
                file.path().to_str(),
                ConfigOverrides::default(),
                action_env(raw),
            )
            .unwrap();
            assert_eq!(config.wait_for_apply, expected, "INPUT_WAITFORAPPLY={raw}");
        }
    }

    #[test]
    fn test_cli_flag_overrides_action_input() {
        let file = config_file("");
        let overrides = ConfigOverrides {
            wait_for_apply: Some(true),
            ..ConfigOverrides::default()
        };
        let config =
            AppConfig::load_with_env(file.path().to_str(), overrides, action_env("false")).unwrap();
        assert!(config.wait_for_apply);
    }

    #[test]
    fn test_prefixed_env_overrides_action_inputs() {
        let file = config_file("");
        let mut vars = action_env("false");
        vars.extend(env(&[
            ("TFWAIT_TOKEN", "from-env"),
            ("TFWAIT_WAIT_FOR_APPLY", "true"),
            ("TFWAIT_POLL_INTERVAL_MS", "250"),
            ("TFWAIT_API_URL", ""),
        ]));

        let config =
            AppConfig::load_with_env(file.path().to_str(), ConfigOverrides::default(), vars)
                .unwrap();
        assert_eq!(config.token, "from-env");
        assert!(config.wait_for_apply);
        assert_eq!(config.poll_interval_ms, 250);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_prefixed_env_overrides_file() {
        let file = config_file(
            r#"
            organization = "acme"
            workspaces = "network"
            token = "from-file"
            "#,
        );
        let config = AppConfig::load_with_env(
            file.path().to_str(),
            ConfigOverrides::default(),
            env(&[("TFWAIT_WORKSPACES", "dns,cdn")]),
        )
        .unwrap();
        assert_eq!(config.token, "from-file");
        assert_eq!(config.workspaces, "dns,cdn");
    }
}
