//! Account policy configuration: regions, roles, image cleanup, and route gates.

use serde::{Deserialize, Serialize};

/// Account policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountsConfig {
    /// Whether accounts carry a region tag. When enabled, registration requires one.
    #[serde(default = "default_true")]
    pub has_region: bool,
    /// Roles the service accepts. Matching is exact and case-sensitive.
    #[serde(default = "default_recognized_roles")]
    pub recognized_roles: Vec<String>,
    /// Role assigned at registration when none is supplied.
    #[serde(default = "default_role")]
    pub default_role: String,
    /// Whether deleting an account also removes its stored image content.
    #[serde(default = "default_true")]
    pub delete_image_with_account: bool,
    /// Required role sets per route.
    #[serde(default)]
    pub gates: GateConfig,
}

/// Required role sets for each gated route. An empty set means public.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// `POST /register`.
    #[serde(default)]
    pub register: Vec<String>,
    /// `GET /users` and `GET /users/{id}`.
    #[serde(default)]
    pub list: Vec<String>,
    /// `PUT /update/{id}`.
    #[serde(default = "default_admin_only")]
    pub update: Vec<String>,
    /// `DELETE /delete/{id}`.
    #[serde(default = "default_admin_only")]
    pub delete: Vec<String>,
}

impl GateConfig {
    /// Iterates over every role named by any gate.
    pub fn all_roles(&self) -> impl Iterator<Item = &String> {
        self.register
            .iter()
            .chain(self.list.iter())
            .chain(self.update.iter())
            .chain(self.delete.iter())
    }
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            has_region: true,
            recognized_roles: default_recognized_roles(),
            default_role: default_role(),
            delete_image_with_account: true,
            gates: GateConfig::default(),
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            register: Vec::new(),
            list: Vec::new(),
            update: default_admin_only(),
            delete: default_admin_only(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_recognized_roles() -> Vec<String> {
    vec!["user".to_string(), "admin".to_string(), "dev".to_string()]
}

fn default_role() -> String {
    "user".to_string()
}

fn default_admin_only() -> Vec<String> {
    vec!["admin".to_string()]
}
