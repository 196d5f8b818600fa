//! Bearer credential extraction from the raw authorization header.

use crate::errors::GateError;

/// Scheme prefix accepted on the authorization header, matched
/// case-insensitively.
const BEARER_PREFIX: &str = "bearer ";

/// Extract the bearer token from a raw authorization header.
///
/// The header must start with `"bearer "` (any case). The token is the
/// second whitespace-delimited segment, returned verbatim with no further
/// shape validation: an empty or garbage token value is the verifier's
/// problem, and the verifier rejects it.
///
/// # Errors
///
/// - `GateError::MissingHeader` when the header is absent.
/// - `GateError::MalformedHeader` when the scheme is wrong or no token
///   segment follows it.
pub fn extract_token(header: Option<&str>) -> Result<&str, GateError> {
    let header = header.ok_or(GateError::MissingHeader)?;

    let has_scheme = header
        .get(..BEARER_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(BEARER_PREFIX));
    if !has_scheme {
        return Err(GateError::MalformedHeader);
    }

    header
        .split_whitespace()
        .nth(1)
        .ok_or(GateError::MalformedHeader)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token_missing_header() {
        assert!(matches!(
            extract_token(None),
            Err(GateError::MissingHeader)
        ));
    }

    #[test]
    fn test_extract_token_wrong_scheme() {
        assert!(matches!(
            extract_token(Some("Basic abc123")),
            Err(GateError::MalformedHeader)
        ));
    }

    #[test]
    fn test_extract_token_empty_header() {
        assert!(matches!(
            extract_token(Some("")),
            Err(GateError::MalformedHeader)
        ));
    }

    #[test]
    fn test_extract_token_scheme_without_token() {
        assert!(matches!(
            extract_token(Some("Bearer ")),
            Err(GateError::MalformedHeader)
        ));
    }

    #[test]
    fn test_extract_token_bare_scheme() {
        // No trailing space, so the prefix check itself fails
        assert!(matches!(
            extract_token(Some("Bearer")),
            Err(GateError::MalformedHeader)
        ));
    }

    #[test]
    fn test_extract_token_case_insensitive_prefix() {
        assert_eq!(extract_token(Some("bearer tok")).unwrap(), "tok");
        assert_eq!(extract_token(Some("Bearer tok")).unwrap(), "tok");
        assert_eq!(extract_token(Some("BEARER tok")).unwrap(), "tok");
        assert_eq!(extract_token(Some("BeArEr tok")).unwrap(), "tok");
    }

    #[test]
    fn test_extract_token_returns_second_segment_verbatim() {
        assert_eq!(
            extract_token(Some("Bearer eyJhbGciOi.xx.yy")).unwrap(),
            "eyJhbGciOi.xx.yy"
        );
    }

    #[test]
    fn test_extract_token_ignores_trailing_segments() {
        assert_eq!(extract_token(Some("Bearer tok extra")).unwrap(), "tok");
    }

    #[test]
    fn test_extract_token_token_not_shape_checked() {
        // Garbage after the scheme is passed through; the verifier rejects it
        assert_eq!(extract_token(Some("Bearer !!!")).unwrap(), "!!!");
    }
}
