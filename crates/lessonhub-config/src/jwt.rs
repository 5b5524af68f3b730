use std::env;

/// Used when `JWT_SECRET` is unset. Tokens signed with it are forgeable by
/// anyone who has read this source.
pub const INSECURE_DEFAULT_SECRET: &str = "default-secret-key-change-in-production";

/// Default token lifetime: 24 hours.
pub const DEFAULT_TOKEN_EXPIRY: i64 = 86_400;

/// Longest accepted `JWT_EXPIRY_SECONDS`: one year.
pub const MAX_TOKEN_EXPIRY: i64 = 365 * 86_400;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds.
    pub token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!(
                    "JWT_SECRET is not set; falling back to an insecure development secret"
                );
                INSECURE_DEFAULT_SECRET.to_string()
            }
        };

        Self {
            secret,
            token_expiry: parse_expiry(env::var("JWT_EXPIRY_SECONDS").ok().as_deref()),
        }
    }

    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_expiry: DEFAULT_TOKEN_EXPIRY,
        }
    }
}

/// Unset, unparsable or non-positive values fall back to the default; larger
/// values are capped at [`MAX_TOKEN_EXPIRY`].
fn parse_expiry(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
        .map_or(DEFAULT_TOKEN_EXPIRY, |v| v.min(MAX_TOKEN_EXPIRY))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_day_long_expiry() {
        let config = JwtConfig::new("secret");
        assert_eq!(config.token_expiry, 86_400);
        assert_eq!(config.secret, "secret");
    }

    #[test]
    fn test_parse_expiry() {
        assert_eq!(parse_expiry(None), DEFAULT_TOKEN_EXPIRY);
        assert_eq!(parse_expiry(Some("3600")), 3_600);
        assert_eq!(parse_expiry(Some("0")), DEFAULT_TOKEN_EXPIRY);
        assert_eq!(parse_expiry(Some("-5")), DEFAULT_TOKEN_EXPIRY);
        assert_eq!(parse_expiry(Some("soon")), DEFAULT_TOKEN_EXPIRY);
        assert_eq!(parse_expiry(Some("9223372036854775807")), MAX_TOKEN_EXPIRY);
    }
}
