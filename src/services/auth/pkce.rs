//! PKCE (RFC 7636) S256 헬퍼
//!
//! Twitter(X) OAuth 2.0은 기밀 클라이언트에도 PKCE를 요구합니다.

use base64::engine::{general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{distributions::Alphanumeric, Rng};
use sha2::{Digest, Sha256};

pub const CHALLENGE_METHOD: &str = "S256";

/// verifier 길이 (RFC 7636: 43~128자)
const CODE_VERIFIER_LENGTH: usize = 64;

/// 영숫자 64자 verifier
pub fn generate_code_verifier() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_VERIFIER_LENGTH)
        .map(char::from)
        .collect()
}

/// `BASE64URL(SHA256(verifier))`, 패딩 없음
pub fn generate_code_challenge(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc7636_appendix_b_vector() {
        let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
        assert_eq!(
            generate_code_challenge(verifier),
            "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
        );
    }

    #[test]
    fn test_verifier_is_within_rfc_length_and_charset() {
        let verifier = generate_code_verifier();
        assert_eq!(verifier.len(), CODE_VERIFIER_LENGTH);
        assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(verifier, generate_code_verifier());
    }
}
