use rand::Rng;
use rand::rngs::OsRng;

/// Number of characters in a generated salt.
pub const SALT_LENGTH: usize = 10;

const SALT_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A single-use salt and token pair for Subsonic token authentication.
///
/// Every request carries a fresh challenge: `t` is the lowercase hex MD5 of
/// `password + salt` and `s` is the salt itself. Challenges are never cached
/// or reused across requests.
///
/// # Example
///
/// ```
/// use sonicrs::AuthChallenge;
///
/// let challenge = AuthChallenge::generate("sesame");
/// assert_eq!(challenge.salt.len(), 10);
/// assert_eq!(challenge.token, sonicrs::derive_token("sesame", &challenge.salt));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthChallenge {
    /// Random salt sent as the `s` parameter
    pub salt: String,
    /// `md5(password + salt)` sent as the `t` parameter
    pub token: String,
}

impl AuthChallenge {
    /// Build a challenge from an explicit salt and token.
    pub fn new(salt: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            salt: salt.into(),
            token: token.into(),
        }
    }

    /// Generate a fresh salt and derive the matching token for `password`.
    pub fn generate(password: &str) -> Self {
        let salt = generate_salt();
        let token = derive_token(password, &salt);
        Self { salt, token }
    }
}

/// Generate a random salt of [`SALT_LENGTH`] characters from `[A-Z0-9]`.
///
/// Draws from the operating system's CSPRNG so salts cannot be predicted.
pub fn generate_salt() -> String {
    let mut rng = OsRng;
    (0..SALT_LENGTH)
        .map(|_| SALT_CHARSET[rng.gen_range(0..SALT_CHARSET.len())] as char)
        .collect()
}

/// Lowercase hexadecimal MD5 digest of `password` immediately followed by `salt`.
pub fn derive_token(password: &str, salt: &str) -> String {
    let mut input = String::with_capacity(password.len() + salt.len());
    input.push_str(password);
    input.push_str(salt);
    format!("{:x}", md5::compute(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_md5_of_password_then_salt() {
        // md5("passwordfoobar")
        assert_eq!(
            derive_token("password", "foobar"),
            format!("{:x}", md5::compute(b"passwordfoobar"))
        );
        // Known vector: md5("password")
        assert_eq!(derive_token("pass", "word"), "5f4dcc3b5aa765d61d8327deb882cf99");
    }

    #[test]
    fn token_is_lowercase_hex() {
        let token = derive_token("sesame", "ABC123");
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn concatenation_order_matters() {
        assert_ne!(derive_token("ab", "cd"), derive_token("cd", "ab"));
    }

    #[test]
    fn salt_shape() {
        for _ in 0..100 {
            let salt = generate_salt();
            assert_eq!(salt.len(), SALT_LENGTH);
            assert!(salt.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn consecutive_salts_differ() {
        assert_ne!(generate_salt(), generate_salt());
    }

    #[test]
    fn generated_challenge_is_consistent() {
        let challenge = AuthChallenge::generate("password");
        assert_eq!(challenge.token, derive_token("password", &challenge.salt));

        let other = AuthChallenge::generate("password");
        assert_ne!(challenge.salt, other.salt);
    }
}
