//! Route derivation settings.

use serde::{Deserialize, Serialize};

/// Shared domain used when no routing configuration is given.
pub const DEFAULT_APP_DOMAIN: &str = "mybluemix.net";

/// Controls how the default route for a new application is derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Domain appended to the application name to form its route.
    #[serde(default = "default_app_domain")]
    pub app_domain: String,
}

impl RoutingConfig {
    pub fn new(app_domain: impl Into<String>) -> Self {
        Self {
            app_domain: app_domain.into(),
        }
    }

    /// Derives the single route a freshly created application answers on.
    pub fn default_route(&self, app_name: &str) -> String {
        format!("http://{}.{}/", app_name, self.app_domain)
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            app_domain: default_app_domain(),
        }
    }
}

fn default_app_domain() -> String {
    DEFAULT_APP_DOMAIN.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_route_uses_shared_domain() {
        let routing = RoutingConfig::default();
        assert_eq!(routing.default_route("demo"), "http://demo.mybluemix.net/");
    }

    #[test]
    fn test_custom_domain_changes_route() {
        let routing = RoutingConfig::new("eu-gb.mybluemix.net");
        assert_eq!(
            routing.default_route("demo"),
            "http://demo.eu-gb.mybluemix.net/"
        );
    }
}
