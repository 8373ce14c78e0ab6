use serde::{Deserialize, Serialize};
use typedecl_codegen::TypeScript;
use uuid::Uuid;

/// An account holder.
#[derive(Debug, Clone, Serialize, Deserialize, TypeScript)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub display_name: String,
    pub email: Option<String>,
    pub role: Role,
    #[ts(inline)]
    pub status: Status,
    pub tags: Vec<String>,
    /// Free-form profile fields.
    ///
    /// @var array<string, string|int>
    pub profile: serde_json::Value,
    #[serde(skip)]
    pub session: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TypeScript)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TypeScript)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Suspended,
}
