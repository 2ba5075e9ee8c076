use std::fmt;

use serde::{Deserialize, Serialize};

/// Every single-resource response from the provider is wrapped in a `data` field.
#[derive(Debug, Deserialize)]
pub struct ReqresEnvelope<T> {
    pub data: T,
}

/// The provider sends numeric ids, but some mirrors of the API send them as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReqresUserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ReqresUserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReqresUser {
    pub id: ReqresUserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub avatar: String,
}
