/// Access and refresh token, always carried together.
///
/// Fields are private so a pair can only be built whole; a session is never
/// represented by one half.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    access_token: String,
    refresh_token: String,
}

impl TokenPair {
    /// Returns `None` unless both halves are non-empty.
    pub fn new(access_token: String, refresh_token: String) -> Option<Self> {
        match access_token.is_empty() || refresh_token.is_empty() {
            true => None,
            false => Some(Self {
                access_token,
                refresh_token,
            }),
        }
    }
    pub fn access(&self) -> &str {
        &self.access_token
    }
    pub fn refresh(&self) -> &str {
        &self.refresh_token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_are_rejected() {
        assert!(TokenPair::new(String::from("a"), String::new()).is_none());
        assert!(TokenPair::new(String::new(), String::from("r")).is_none());
        let pair = TokenPair::new(String::from("a"), String::from("r")).unwrap();
        assert!(pair.access() == "a");
        assert!(pair.refresh() == "r");
    }
}
