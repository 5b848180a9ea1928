use serde::{Deserialize, Serialize};

/// A support directory entry (hotline, therapist, article, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: i64,
    pub name: String,
    /// Free-form category tag, e.g. `Hotline`, `Therapist`, `Article`
    pub resource_type: String,
    pub contact_info: Option<String>,
    pub website_url: Option<String>,
    pub description: Option<String>,
    pub is_verified: bool,
}

/// Insert payload for `resources`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewResource {
    pub name: String,
    pub resource_type: String,
    #[serde(default)]
    pub contact_info: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

impl NewResource {
    pub fn new(name: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_type: resource_type.into(),
            ..Self::default()
        }
    }
}
