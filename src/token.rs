use ulid::Ulid;

const SECRET_ENV: &str = "RUANG_APPROVE_SECRET";
const DEFAULT_SECRET: &str = "ruang-booking-secret-key-2026";

/// Matched generate/verify pair for no-login approval links.
///
/// The token is a keyed, deterministic 32-bit rolling hash of the booking id
/// — not a MAC, guessable by construction. Kept for link compatibility; the
/// secret is injectable so a stronger signer can replace this behind the
/// same surface.
#[derive(Debug, Clone)]
pub struct ApproveTokens {
    secret: String,
}

impl ApproveTokens {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Secret from `RUANG_APPROVE_SECRET`, falling back to the built-in
    /// development key.
    pub fn from_env() -> Self {
        Self::new(std::env::var(SECRET_ENV).unwrap_or_else(|_| DEFAULT_SECRET.into()))
    }

    /// 32 lower-case hex chars derived from `booking_id` + secret.
    pub fn generate(&self, booking_id: Ulid) -> String {
        let input = format!("{booking_id}{}", self.secret);
        let mut hash: i32 = 0;
        // UTF-16 code units, 32-bit wrapping arithmetic.
        for unit in input.encode_utf16() {
            hash = hash
                .wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(unit as i32);
        }
        format!("{:032x}", hash.unsigned_abs())
    }

    /// True iff `token` is exactly what [`generate`](Self::generate) yields
    /// for this id — identical derivation on both sides.
    pub fn verify(&self, booking_id: Ulid, token: &str) -> bool {
        self.generate(booking_id) == token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_is_deterministic() {
        let tokens = ApproveTokens::new("secret");
        let id = Ulid::new();
        assert_eq!(tokens.generate(id), tokens.generate(id));
    }

    #[test]
    fn token_shape() {
        let tokens = ApproveTokens::new("secret");
        let token = tokens.generate(Ulid::new());
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        // 32-bit hash: only the last 8 chars carry entropy
        assert!(token.starts_with("000000000000000000000000"));
    }

    #[test]
    fn verify_matches_generate() {
        let tokens = ApproveTokens::new("secret");
        let id = Ulid::new();
        let token = tokens.generate(id);
        assert!(tokens.verify(id, &token));
        assert!(!tokens.verify(Ulid::new(), &token));
        assert!(!tokens.verify(id, "00000000000000000000000000000000"));
    }

    #[test]
    fn secret_changes_token() {
        let id = Ulid::new();
        let a = ApproveTokens::new("one").generate(id);
        let b = ApproveTokens::new("two").generate(id);
        assert_ne!(a, b);
    }
}
