use crate::network::NetworkId;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub node_url: String,
    pub service_name: String,
    pub network: NetworkId,
    pub prefetch_count: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;

        let node_url = env_map
            .get("NODE_URL")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("NODE_URL".to_string()))?;

        let service_name = env_map
            .get("SERVICE_NAME")
            .cloned()
            .unwrap_or_else(|| "nem".to_string());

        let network_name = env_map
            .get("NETWORK")
            .map(|s| s.as_str())
            .unwrap_or("testnet");
        let network = NetworkId::from_name(network_name).ok_or_else(|| {
            ConfigError::InvalidValue(
                "NETWORK".to_string(),
                format!("must be mainnet, testnet, or mijin, got {}", network_name),
            )
        })?;

        let prefetch_count = env_map
            .get("PREFETCH_COUNT")
            .map(|s| s.as_str())
            .unwrap_or("2")
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "PREFETCH_COUNT".to_string(),
                    "must be a positive integer".to_string(),
                )
            })?;

        Ok(Config {
            port,
            database_path,
            node_url,
            service_name,
            network,
            prefetch_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_required_env() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("DATABASE_PATH".to_string(), "/tmp/test.db".to_string());
        map.insert("NODE_URL".to_string(), "http://localhost:7890".to_string());
        map
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(setup_required_env()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.service_name, "nem");
        assert_eq!(config.network, NetworkId::Testnet);
        assert_eq!(config.prefetch_count, 2);
    }

    #[test]
    fn test_missing_database_path() {
        let mut env_map = setup_required_env();
        env_map.remove("DATABASE_PATH");
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "DATABASE_PATH"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_missing_node_url() {
        let mut env_map = setup_required_env();
        env_map.remove("NODE_URL");
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "NODE_URL"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_invalid_port() {
        let mut env_map = setup_required_env();
        env_map.insert("PORT".to_string(), "not_a_number".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PORT"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_network() {
        let mut env_map = setup_required_env();
        env_map.insert("NETWORK".to_string(), "devnet".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "NETWORK"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_zero_prefetch_rejected() {
        let mut env_map = setup_required_env();
        env_map.insert("PREFETCH_COUNT".to_string(), "0".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PREFETCH_COUNT"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_explicit_values() {
        let mut env_map = setup_required_env();
        env_map.insert("PORT".to_string(), "9090".to_string());
        env_map.insert("SERVICE_NAME".to_string(), "chrono".to_string());
        env_map.insert("NETWORK".to_string(), "mainnet".to_string());
        env_map.insert("PREFETCH_COUNT".to_string(), "4".to_string());
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.service_name, "chrono");
        assert_eq!(config.network, NetworkId::Mainnet);
        assert_eq!(config.prefetch_count, 4);
    }
}
