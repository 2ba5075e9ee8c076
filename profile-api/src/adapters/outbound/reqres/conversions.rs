use crate::domain::{
    models::{RemoteProfile, UserId},
    RemoteProfileError,
};

/// Convert a reqres user to a domain RemoteProfile, normalizing its id to a string.
pub fn to_domain_profile(user: reqres::ReqresUser) -> Result<RemoteProfile, RemoteProfileError> {
    let id = UserId::parse(user.id.to_string()).map_err(|_| {
        RemoteProfileError::Unavailable("provider returned a blank user id".to_string())
    })?;

    Ok(RemoteProfile {
        id,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        avatar_url: user.avatar,
    })
}

pub fn map_reqres_error(err: reqres::ReqresError) -> RemoteProfileError {
    match err {
        reqres::ReqresError::UserNotFound(id) => RemoteProfileError::NotFound(id),
        other => {
            tracing::warn!(error = %other, "profile provider request failed");
            RemoteProfileError::Unavailable(other.to_string())
        }
    }
}
