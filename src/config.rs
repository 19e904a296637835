use std::fmt;

pub const DEFAULT_API_URL: &str = "https://dev.lunchmoney.app/v1";

/// Connection settings for the ledger service, fixed for the lifetime of a run.
#[derive(Clone)]
pub struct LedgerConfig {
    base_url: String,
    token: String,
}

impl LedgerConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> LedgerConfig {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        LedgerConfig {
            base_url,
            token: token.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl fmt::Debug for LedgerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}
