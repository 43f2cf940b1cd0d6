//! Closed enumerations and record identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Generate a fresh record identifier.
///
/// Identifiers are random (UUID v4), not content-addressed: issuing the
/// same stamp twice yields two distinct records.
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// The kind of organization an entity account represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Company,
    Municipality,
    Firm,
}

impl EntityType {
    pub const ALL: [EntityType; 3] = [EntityType::Company, EntityType::Municipality, EntityType::Firm];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Company => "company",
            EntityType::Municipality => "municipality",
            EntityType::Firm => "firm",
        }
    }
}

impl FromStr for EntityType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "company" => Ok(EntityType::Company),
            "municipality" => Ok(EntityType::Municipality),
            "firm" => Ok(EntityType::Firm),
            other => Err(ValidationError::InvalidEntityType(other.to_string())),
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A member's role within an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Viewer,
    Editor,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Viewer, Role::Editor, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Editor => "editor",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "viewer" => Ok(Role::Viewer),
            "editor" => Ok(Role::Editor),
            "admin" => Ok(Role::Admin),
            other => Err(ValidationError::InvalidRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
