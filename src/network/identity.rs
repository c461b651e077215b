use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};

// * RequestIdentity defines the headers every upstream request carries.
#[derive(Debug, Clone)]
pub struct RequestIdentity {
    pub user_agent: String,
    pub accept_language: &'static str,
}

impl RequestIdentity {
    // * The listing is Portuguese; ask for it explicitly so labels stay stable.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            accept_language: "pt-BR,pt;q=0.9,en;q=0.5",
        }
    }

    // * Builds the default header set for the client.
    pub fn headers(&self) -> Result<HeaderMap, InvalidHeaderValue> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&self.user_agent)?);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(self.accept_language));
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_carry_user_agent() {
        let identity = RequestIdentity::new("ship-lineup-test/1.0");
        let headers = identity.headers().unwrap();

        assert_eq!(headers.get(USER_AGENT).unwrap(), "ship-lineup-test/1.0");
        assert!(headers.get(ACCEPT_LANGUAGE).unwrap().to_str().unwrap().starts_with("pt-BR"));
    }

    #[test]
    fn test_invalid_user_agent_is_rejected() {
        let identity = RequestIdentity::new("bad\nagent");
        assert!(identity.headers().is_err());
    }
}
