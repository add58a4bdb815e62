use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;

pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Sources are layered in order of increasing precedence:
/// compiled-in defaults, `config/default`, `config/{RUN_ENV}`, then
/// `APP_`-prefixed environment variables (`APP_BACKEND__BASE_URL` and
/// friends). All sections have defaults, so a missing config directory
/// still yields a usable configuration.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "APP".to_string());

    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", run_env)).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    let config: AppConfig = builder.build()?.try_deserialize()?;
    tracing::debug!(
        users = config.users.len(),
        topic = %config.messaging.topic,
        "configuration loaded"
    );
    Ok(config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures the dotenv file is loaded into the environment exactly once.
pub fn ensure_dotenv_loaded() {
    INIT_DOTENV.get_or_init(|| {
        let _ = dotenv::dotenv();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_the_demo_roster() {
        let config = AppConfig::default();
        assert_eq!(config.users.len(), 2);
        assert_eq!(config.users[0].name, "Jackson Kasi");
        assert_eq!(
            config.users[0].user_id.to_string(),
            "530709cf-d57d-47ed-ba9a-79212bc9df87"
        );
        assert_eq!(config.messaging.topic, "MyNews");
    }

    #[test]
    fn find_user_matches_on_id() {
        let config = AppConfig::default();
        let id = "9e74e2a1-b4f4-444c-9646-cd8c020eb8d4".parse().unwrap();
        let user = config.find_user(&id).expect("roster user");
        assert_eq!(user.name, "EmonDas");

        let unknown = uuid::Uuid::new_v4();
        assert!(config.find_user(&unknown).is_none());
    }

    // Uses a prefix no other test touches so parallel tests cannot race
    // on the process environment.
    #[test]
    fn environment_variables_override_defaults() {
        env::set_var("PREFIX", "PUSHLINK_TEST");
        env::set_var("PUSHLINK_TEST_BACKEND__BASE_URL", "http://localhost:9000/api/v1");
        env::set_var("PUSHLINK_TEST_MESSAGING__TOPIC", "Overridden");

        let config = load_config().expect("configuration loads from the environment");
        assert_eq!(config.backend.base_url, "http://localhost:9000/api/v1");
        assert_eq!(config.messaging.topic, "Overridden");
        // Untouched sections keep their compiled-in defaults.
        assert_eq!(config.messaging.step_timeout_secs, 30);
        assert_eq!(config.users.len(), 2);

        env::remove_var("PREFIX");
        env::remove_var("PUSHLINK_TEST_BACKEND__BASE_URL");
        env::remove_var("PUSHLINK_TEST_MESSAGING__TOPIC");
    }

    #[test]
    fn sections_deserialize_with_partial_input() {
        let config: AppConfig = serde_json::from_str(
            r#"{"messaging": {"topic": "Alerts", "project_id": "demo-project"}}"#,
        )
        .unwrap();
        assert_eq!(config.messaging.topic, "Alerts");
        assert_eq!(config.messaging.step_timeout_secs, 30);
        assert_eq!(config.backend.base_url, "https://vomoz.up.railway.app/api/v1");
        assert_eq!(config.users.len(), 2);
    }
}
