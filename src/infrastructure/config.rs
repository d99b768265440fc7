use serde::Deserialize;

const ENV_PREFIX: &str = "MESSAGE_API";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub graphql: GraphqlConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GraphqlConfig {
    #[serde(default = "default_graphql_path")]
    pub path: String,
    /// Serve the GraphiQL page on GET requests without a query.
    #[serde(default)]
    pub graphiql: bool,
    #[serde(default)]
    pub depth_limit: Option<usize>,
    #[serde(default)]
    pub complexity_limit: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_store_provider")]
    pub provider: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl Default for GraphqlConfig {
    fn default() -> Self {
        Self {
            path: default_graphql_path(),
            graphiql: false,
            depth_limit: None,
            complexity_limit: None,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_store_provider(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load("config")
    }

    /// Layers `MESSAGE_API__*` environment variables over an optional config file.
    pub fn load(file: &str) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));
        let mut config: Config = builder.build()?.try_deserialize()?;

        if !config.graphql.path.starts_with('/') {
            config.graphql.path = format!("/{}", config.graphql.path);
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_graphql_path() -> String {
    "/graphql".to_string()
}

fn default_store_provider() -> String {
    "memory".to_string()
}
