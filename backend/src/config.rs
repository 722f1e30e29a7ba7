use std::env;

/// Server configuration pulled from the environment, with defaults that
/// match local development.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
}

impl Config {
    pub fn from_env() -> Config {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(1337);
        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "database.sqlite".to_string());

        Config {
            host,
            port,
            database_path,
        }
    }
}
