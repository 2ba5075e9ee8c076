use super::UserId;

/// A user profile as reported by the remote profile provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteProfile {
    /// The provider's own identifier, normalized to a string.
    pub id: UserId,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: String,
}
