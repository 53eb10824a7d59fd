use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub gateway: GatewayConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub export: ExportConfig,
    pub payments: PaymentsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory with the built frontend (trunk `dist`)
    pub static_dir: String,
}

/// Hosted auth/database service
#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    pub url: String,
    pub anon_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Public origin of the dashboard, used in e-mail links
    pub site_origin: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    pub page_size: usize,
    pub max_rows: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            page_size: 1000,
            max_rows: 100_000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaymentsConfig {
    pub api_url: String,
    pub secret_key: String,
    /// Origin for the success/cancel pages of a checkout
    pub domain: String,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000
static_dir = "dist"

[gateway]
url = "http://127.0.0.1:54321"
anon_key = ""
timeout_secs = 30

[auth]
site_origin = "http://127.0.0.1:3000"

[export]
page_size = 1000
max_rows = 100000

[payments]
api_url = "https://api.stripe.com"
secret_key = ""
domain = "http://127.0.0.1:3000"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// Secrets may be overridden from the environment afterwards.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = read_config_file()?;
    apply_overrides(&mut config, |key| std::env::var(key).ok());

    if config.gateway.anon_key.is_empty() {
        tracing::warn!("gateway.anon_key is empty, gateway calls will be rejected");
    }

    Ok(config)
}

fn read_config_file() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Environment overrides: GATEWAY_URL, GATEWAY_ANON_KEY, PAYMENTS_SECRET_KEY
fn apply_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup("GATEWAY_URL").filter(|v| !v.is_empty()) {
        config.gateway.url = url;
    }
    if let Some(key) = lookup("GATEWAY_ANON_KEY").filter(|v| !v.is_empty()) {
        config.gateway.anon_key = key;
    }
    if let Some(key) = lookup("PAYMENTS_SECRET_KEY").filter(|v| !v.is_empty()) {
        config.payments.secret_key = key;
    }
}

#[cfg(test)]
pub fn test_config() -> Config {
    toml::from_str(DEFAULT_CONFIG).expect("embedded config is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.export.page_size, 1000);
        assert_eq!(config.gateway.timeout_secs, 30);
    }

    #[test]
    fn test_export_section_is_optional() {
        let without_export = DEFAULT_CONFIG.replace("[export]\npage_size = 1000\nmax_rows = 100000\n", "");
        let config: Config = toml::from_str(&without_export).unwrap();
        assert_eq!(config.export.max_rows, 100_000);
    }

    #[test]
    fn test_env_overrides_replace_secrets_only_when_set() {
        let mut config = test_config();
        apply_overrides(&mut config, |key| match key {
            "GATEWAY_ANON_KEY" => Some("anon".to_string()),
            "GATEWAY_URL" => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.gateway.anon_key, "anon");
        assert_eq!(config.gateway.url, "http://127.0.0.1:54321");
        assert_eq!(config.payments.secret_key, "");
    }
}
