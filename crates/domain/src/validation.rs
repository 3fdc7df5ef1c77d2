// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// The kind of entity a name belongs to, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Site,
    Team,
    Department,
}

/// Validates a master-data entity name.
///
/// Names must be non-empty after trimming.
///
/// # Errors
///
/// Returns the kind-specific invalid-name error when the trimmed name
/// is empty.
pub fn validate_entity_name(kind: NameKind, name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(match kind {
            NameKind::Site => DomainError::InvalidSiteName(String::from("name must not be empty")),
            NameKind::Team => DomainError::InvalidTeamName(String::from("name must not be empty")),
            NameKind::Department => {
                DomainError::InvalidDepartmentName(String::from("name must not be empty"))
            }
        });
    }
    Ok(())
}

/// Validates that a department may take department-work entries and a
/// default rate.
///
/// The configured civil department is reserved for team-based work.
///
/// # Errors
///
/// Returns `DomainError::ReservedDepartment` for the reserved name.
pub fn validate_workable_department(name: &str, civil_department: &str) -> Result<(), DomainError> {
    if name == civil_department {
        return Err(DomainError::ReservedDepartment {
            name: name.to_string(),
        });
    }
    Ok(())
}
