use std::fmt;

/// Logical navigation target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`: credential step.
    Credentials,
    /// `/otp`: code step.
    Otp,
    /// Any other destination, e.g. a configured post-login screen.
    Other(String),
}

impl Route {
    /// Parses a route path. Empty and trailing-slash variants are normalized.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = trimmed.trim_end_matches('/');
        match normalized {
            "" => Route::Credentials,
            "/otp" | "otp" => Route::Otp,
            _ if normalized.starts_with('/') => Route::Other(normalized.to_string()),
            _ => Route::Other(format!("/{normalized}")),
        }
    }

    pub fn as_path(&self) -> &str {
        match self {
            Route::Credentials => "/",
            Route::Otp => "/otp",
            Route::Other(path) => path,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}
