use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::errors::ConfigError;

/// Connection settings for the Neo4j store.
#[derive(Deserialize, Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

/// Settings for the OpenAI-compatible text-generation endpoint.
///
/// A missing API key is not a configuration error; the dashboard still
/// serves everything except the narrative summary.
#[derive(Deserialize, Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub graph: GraphConfig,
    pub llm: LlmConfig,
    pub server: ServerConfig,
}

/// Partial configuration as read from an optional TOML file. Every field is
/// optional; the environment overrides whatever the file provides.
#[derive(Deserialize, Debug, Default)]
pub struct PartialAppConfig {
    pub graph: Option<PartialGraphConfig>,
    pub llm: Option<PartialLlmConfig>,
    pub server: Option<PartialServerConfig>,
}

#[derive(Deserialize, Debug, Default)]
pub struct PartialGraphConfig {
    pub uri: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct PartialLlmConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct PartialServerConfig {
    pub bind_addr: Option<String>,
}

impl AppConfig {
    /// Load configuration from an optional TOML file merged with the process
    /// environment. A `None` path (or an absent file) is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file_config = match path {
            Some(path) if path.exists() => {
                let display = path.display().to_string();
                let raw = std::fs::read_to_string(path)
                    .map_err(|e| ConfigError::FileRead(display.clone(), e))?;
                Some(toml::from_str(&raw).map_err(|e| ConfigError::TomlParse(display, e))?)
            }
            _ => None,
        };
        let env_map: HashMap<String, String> = std::env::vars().collect();
        Ok(Self::from_env_or_file(file_config, &env_map))
    }

    /// Merge environment variables over file values over built-in defaults.
    pub fn from_env_or_file(
        file_config: Option<PartialAppConfig>,
        env_map: &HashMap<String, String>,
    ) -> Self {
        let file_config = file_config.unwrap_or_default();
        let graph = file_config.graph.unwrap_or_default();
        let llm = file_config.llm.unwrap_or_default();
        let server = file_config.server.unwrap_or_default();

        AppConfig {
            graph: GraphConfig {
                uri: pick(env_map, "NEO4J_URI", graph.uri, default_graph_uri),
                user: pick(env_map, "NEO4J_USER", graph.user, default_graph_user),
                password: pick(env_map, "NEO4J_PASSWORD", graph.password, String::new),
                database: pick(env_map, "NEO4J_DATABASE", graph.database, default_graph_database),
            },
            llm: LlmConfig {
                api_key: env_map
                    .get("OPENROUTER_API_KEY")
                    .cloned()
                    .or(llm.api_key),
                base_url: pick(env_map, "OPENROUTER_BASE_URL", llm.base_url, default_llm_base_url),
                model: pick(env_map, "LLM_MODEL", llm.model, default_llm_model),
            },
            server: ServerConfig {
                bind_addr: pick(env_map, "BIND_ADDR", server.bind_addr, default_bind_addr),
            },
        }
    }
}

fn pick(
    env_map: &HashMap<String, String>,
    key: &str,
    file_value: Option<String>,
    default: fn() -> String,
) -> String {
    env_map
        .get(key)
        .cloned()
        .or(file_value)
        .unwrap_or_else(default)
}

// Default functions
fn default_graph_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_graph_user() -> String {
    "neo4j".to_string()
}

fn default_graph_database() -> String {
    "neo4j".to_string()
}

fn default_llm_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_llm_model() -> String {
    "openai/gpt-4.1-nano".to_string()
}

fn default_bind_addr() -> String {
    "127.0.0.1:8000".to_string()
}
