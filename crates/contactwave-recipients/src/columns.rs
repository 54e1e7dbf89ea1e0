// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Column roles and their header-name aliases.

use contactwave_core::HeaderSet;
use strum::{Display, EnumIter, IntoEnumIterator};

/// Semantic field a column can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ColumnRole {
    Phone,
    FirstName,
    MiddleName,
    LastName,
    Email,
    UniqueId,
}

impl ColumnRole {
    /// Accepted header names, highest priority first. Matching is exact:
    /// case and spacing matter.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Phone => &[
                "Mobile Number",
                "Mobile",
                "Phone Number",
                "Phone",
                "Contact Number",
                "WhatsApp Number",
                "mobile",
                "phone",
            ],
            Self::FirstName => &["First Name", "FirstName", "first_name", "firstName", "Name"],
            Self::MiddleName => &["Middle Name", "MiddleName", "middle_name", "middleName"],
            Self::LastName => &["Surname", "Last Name", "LastName", "last_name", "lastName"],
            Self::Email => &["Email Address", "Email", "E-mail", "email"],
            Self::UniqueId => &["Unique ID", "UniqueID", "Unique Id", "uniqueId", "ID", "id"],
        }
    }
}

/// Index of the first alias of `role` present in `headers`.
///
/// Aliases are tried in priority order; within one alias the first matching
/// column wins. `None` means the source has no such column, which callers
/// treat as an empty value rather than an error.
pub fn resolve(role: ColumnRole, headers: &HeaderSet) -> Option<usize> {
    role.aliases()
        .iter()
        .find_map(|alias| headers.position(alias))
}

/// Resolved positions of every role for one header set.
///
/// Resolving once per batch keeps normalization linear in the row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub phone: Option<usize>,
    pub first_name: Option<usize>,
    pub middle_name: Option<usize>,
    pub last_name: Option<usize>,
    pub email: Option<usize>,
    pub unique_id: Option<usize>,
}

impl ColumnLayout {
    pub fn resolve(headers: &HeaderSet) -> Self {
        Self {
            phone: resolve(ColumnRole::Phone, headers),
            first_name: resolve(ColumnRole::FirstName, headers),
            middle_name: resolve(ColumnRole::MiddleName, headers),
            last_name: resolve(ColumnRole::LastName, headers),
            email: resolve(ColumnRole::Email, headers),
            unique_id: resolve(ColumnRole::UniqueId, headers),
        }
    }

    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        match role {
            ColumnRole::Phone => self.phone,
            ColumnRole::FirstName => self.first_name,
            ColumnRole::MiddleName => self.middle_name,
            ColumnRole::LastName => self.last_name,
            ColumnRole::Email => self.email,
            ColumnRole::UniqueId => self.unique_id,
        }
    }

    /// Roles the header set has no column for.
    pub fn unresolved(&self) -> Vec<ColumnRole> {
        ColumnRole::iter().filter(|r| self.get(*r).is_none()).collect()
    }
}
