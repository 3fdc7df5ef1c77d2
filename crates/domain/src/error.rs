// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation and planning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Site name is empty or invalid.
    InvalidSiteName(String),
    /// Team name is empty or invalid.
    InvalidTeamName(String),
    /// Department name is empty or invalid.
    InvalidDepartmentName(String),
    /// The department is reserved for civil work and cannot take
    /// department-work entries or a default rate.
    ReservedDepartment {
        /// The reserved department name.
        name: String,
    },
    /// A team cannot be deleted while work or rate rows reference it.
    TeamInUse {
        /// The team identifier.
        team_id: i64,
    },
    /// A department cannot be deleted while work rows reference it.
    DepartmentInUse {
        /// The department identifier.
        department_id: i64,
    },
    /// Department work was submitted for a department with no
    /// configured default rate.
    RateNotConfigured {
        /// The department identifier.
        department_id: i64,
    },
    /// Site does not exist.
    SiteNotFound(i64),
    /// Team does not exist.
    TeamNotFound(i64),
    /// Department does not exist.
    DepartmentNotFound(i64),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSiteName(msg) => write!(f, "Invalid site name: {msg}"),
            Self::InvalidTeamName(msg) => write!(f, "Invalid team name: {msg}"),
            Self::InvalidDepartmentName(msg) => {
                write!(f, "Invalid department name: {msg}")
            }
            Self::ReservedDepartment { name } => {
                write!(f, "Department '{name}' is reserved for civil team work")
            }
            Self::TeamInUse { team_id } => {
                write!(f, "Team {team_id} cannot be deleted: work or rate rows exist")
            }
            Self::DepartmentInUse { department_id } => {
                write!(
                    f,
                    "Department {department_id} cannot be deleted: work rows exist"
                )
            }
            Self::RateNotConfigured { department_id } => {
                write!(
                    f,
                    "No default rate configured for department {department_id}"
                )
            }
            Self::SiteNotFound(id) => write!(f, "Site {id} not found"),
            Self::TeamNotFound(id) => write!(f, "Team {id} not found"),
            Self::DepartmentNotFound(id) => write!(f, "Department {id} not found"),
        }
    }
}

impl std::error::Error for DomainError {}
