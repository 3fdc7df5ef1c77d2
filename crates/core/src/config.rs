// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Deployment-owned bootstrap configuration.
///
/// Injected into site and department initialization; the engine itself
/// never hard-codes department names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Departments ensured to exist when a site is created.
    pub default_departments: Vec<String>,
    /// The department name reserved for civil team work. Excluded from
    /// department-work entry and default-rate assignment.
    pub civil_department: String,
}

impl BootstrapConfig {
    /// Whether a department name is the reserved civil department.
    #[must_use]
    pub fn is_civil(&self, name: &str) -> bool {
        name == self.civil_department
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            default_departments: [
                "Civil",
                "Electrical",
                "Carpenter",
                "Plumbing",
                "Painting",
                "Tiles",
                "Misc",
            ]
            .map(String::from)
            .to_vec(),
            civil_department: String::from("Civil"),
        }
    }
}
