#[cfg(test)]
use std::collections::HashMap;
use std::env;

/// Source of named, read-only settings consulted per invocation.
pub trait ConfigProvider: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }
}

/// Reads the process environment each time a key is requested.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvConfig;

impl ConfigProvider for EnvConfig {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

/// Fixed in-memory settings.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct StaticConfig {
    values: HashMap<String, String>,
}

#[cfg(test)]
impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
impl ConfigProvider for StaticConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
