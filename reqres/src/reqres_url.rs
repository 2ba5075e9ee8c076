use url::Url;

use crate::ReqresError;

#[derive(Debug, Clone)]
pub struct ReqresURL(Url);

impl AsRef<str> for ReqresURL {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl ReqresURL {
    pub fn parse(base_url: &str) -> Result<Self, ReqresError> {
        let url = Url::parse(base_url).map_err(|e| ReqresError::InvalidUrl(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(ReqresError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self(url))
    }

    /// Append the given segments to the URL. Each segment is percent-encoded, so
    /// caller-supplied ids cannot escape their path position.
    pub fn append_segments<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Self {
        let mut url = self.0.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        Self(url)
    }

    /// `{base}/api/users/{user_id}`
    pub fn user(&self, user_id: &str) -> Self {
        self.append_segments(["api", "users", user_id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_url_appends_api_path() {
        let base = ReqresURL::parse("https://reqres.in").unwrap();
        assert_eq!(base.user("1").as_ref(), "https://reqres.in/api/users/1");
    }

    #[test]
    fn user_url_keeps_base_path_and_trailing_slash() {
        let base = ReqresURL::parse("http://localhost:8080/mirror/").unwrap();
        assert_eq!(
            base.user("42").as_ref(),
            "http://localhost:8080/mirror/api/users/42"
        );
    }

    #[test]
    fn user_url_encodes_id_segment() {
        let base = ReqresURL::parse("https://reqres.in").unwrap();
        assert_eq!(
            base.user("../admin").as_ref(),
            "https://reqres.in/api/users/..%2Fadmin"
        );
    }

    #[test]
    fn parse_rejects_invalid_base() {
        assert!(matches!(
            ReqresURL::parse("not a url"),
            Err(ReqresError::InvalidUrl(_))
        ));
        assert!(matches!(
            ReqresURL::parse("mailto:someone@example.com"),
            Err(ReqresError::InvalidUrl(_))
        ));
    }
}
