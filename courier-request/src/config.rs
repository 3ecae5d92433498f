//! Request assembler configuration.

use serde::Deserialize;

/// Request assembler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AssemblerConfig {
    /// User agent applied when the request does not set one.
    pub user_agent: String,
    /// Headers applied, in order, when the request does not set them.
    pub default_headers: Vec<(String, String)>,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("courier/{}", env!("CARGO_PKG_VERSION")),
            default_headers: Vec::new(),
        }
    }
}

impl AssemblerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AssemblerConfigBuilder {
        AssemblerConfigBuilder::default()
    }
}

/// Builder for request assembler configuration.
#[derive(Debug, Default)]
pub struct AssemblerConfigBuilder {
    config: AssemblerConfig,
}

impl AssemblerConfigBuilder {
    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Add a default header.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.push((name.into(), value.into()));
        self
    }

    /// Build the configuration.
    pub fn build(self) -> AssemblerConfig {
        self.config
    }
}
