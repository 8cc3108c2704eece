#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Base URL of the hosted data service, e.g. `https://xyz.supabase.co`.
    pub remote_url: String,
    /// Service API key sent with every request.
    pub api_key: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Products per catalog page.
    pub page_size: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("remote_url", &self.remote_url)
            .field("api_key", &"[redacted]")
            .field("user_agent", &self.user_agent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("page_size", &self.page_size)
            .finish()
    }
}
