#[derive(Debug, Clone)]
pub struct SearchUrl(String);

impl AsRef<str> for SearchUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SearchUrl {
    /// Creates a new SearchUrl from an endpoint root.
    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    /// Append an already-encoded query string.
    pub fn with_query(&self, query: &str) -> Self {
        if query.is_empty() {
            Self(self.0.clone())
        } else if self.0.contains('?') {
            Self(format!("{}&{}", self.0, query))
        } else {
            Self(format!("{}?{}", self.0, query))
        }
    }
}
