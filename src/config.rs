use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub resend: ResendConfig,
    #[serde(default)]
    pub otp: OtpConfig,
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdminConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expires_in: i64,  // seconds
    pub refresh_token_expires_in: i64, // seconds
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResendConfig {
    pub api_key: String,
    pub from_email: String,
    #[serde(default = "default_resend_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpConfig {
    /// Minimum age in seconds of the newest unused code before a
    /// re-issue for the same email is accepted.
    #[serde(default = "default_resend_window_secs")]
    pub resend_window_secs: i64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            resend_window_secs: default_resend_window_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapAdminConfig {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

fn default_resend_base_url() -> String {
    "https://api.resend.com".to_string()
}

fn default_resend_window_secs() -> i64 {
    60
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // Try the config file first; without one, run entirely from env vars.
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str).map_err(|e| format!("Failed to parse config: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // The database URL has no sensible default.
                let database_url = get_env("DATABASE_URL")
                    .ok_or("DATABASE_URL is not set and no config.toml was found")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                        access_token_expires_in: get_env_parse("JWT_ACCESS_EXPIRES_IN", 7200i64),
                        refresh_token_expires_in: get_env_parse(
                            "JWT_REFRESH_EXPIRES_IN",
                            2_592_000i64,
                        ),
                    },
                    resend: ResendConfig {
                        api_key: get_env("RESEND_API_KEY").unwrap_or_default(),
                        from_email: get_env("RESEND_FROM_EMAIL").unwrap_or_default(),
                        base_url: get_env("RESEND_BASE_URL")
                            .unwrap_or_else(default_resend_base_url),
                    },
                    otp: OtpConfig {
                        resend_window_secs: get_env_parse(
                            "OTP_RESEND_WINDOW_SECS",
                            default_resend_window_secs(),
                        ),
                    },
                    bootstrap_admin: None,
                }
            }
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        // Env vars override file values unconditionally.
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            config.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_ACCESS_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            config.jwt.access_token_expires_in = n;
        }
        if let Ok(v) = env::var("JWT_REFRESH_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            config.jwt.refresh_token_expires_in = n;
        }
        if let Ok(v) = env::var("RESEND_API_KEY") {
            config.resend.api_key = v;
        }
        if let Ok(v) = env::var("RESEND_FROM_EMAIL") {
            config.resend.from_email = v;
        }
        if let Ok(v) = env::var("RESEND_BASE_URL") {
            config.resend.base_url = v;
        }
        if let Ok(v) = env::var("OTP_RESEND_WINDOW_SECS")
            && let Ok(n) = v.parse()
        {
            config.otp.resend_window_secs = n;
        }
        if let Ok(email) = env::var("BOOTSTRAP_ADMIN_EMAIL")
            && let Ok(password) = env::var("BOOTSTRAP_ADMIN_PASSWORD")
        {
            let full_name = env::var("BOOTSTRAP_ADMIN_FULL_NAME")
                .unwrap_or_else(|_| "Electoral Committee".to_string());
            config.bootstrap_admin = Some(BootstrapAdminConfig {
                email,
                password,
                full_name,
            });
        }

        Ok(config)
    }
}
