use md5::{Digest, Md5};

/// Derive the request token: lowercase hex MD5 of `secret` immediately
/// followed by the canonical query.
pub fn derive_token(secret: &str, query: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(secret.as_bytes());
    hasher.update(query.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        // md5("") and md5("abc")
        assert_eq!(derive_token("", ""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(derive_token("a", "bc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_no_separator_between_secret_and_query() {
        assert_eq!(derive_token("ab", "c"), derive_token("a", "bc"));
    }

    #[test]
    fn test_deterministic() {
        let query = "url=example.com&width=1920";
        assert_eq!(derive_token("test_secret", query), derive_token("test_secret", query));
    }

    #[test]
    fn test_single_character_change() {
        let query = "url=example.com&width=1920";
        let base = derive_token("test_secret", query);
        assert_ne!(base, derive_token("test_secreT", query));
        assert_ne!(base, derive_token("test_secret", "url=example.com&width=1921"));
    }

    #[test]
    fn test_token_shape() {
        let token = derive_token("secret", "url=https%3A%2F%2Fexample.com");
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
