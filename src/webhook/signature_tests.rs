//! Tests for webhook signature verification.

use super::SignatureVerifier;

const KEY: &str = "whsec_test";
const BODY: &[u8] = br#"{"id":"log_123","event":"billing.paid","devMode":false}"#;

mod verify {
    use super::*;

    #[test]
    fn accepts_own_base64_signature() {
        let verifier = SignatureVerifier::new(KEY);
        let signature = verifier.sign(BODY);

        assert!(verifier.verify(BODY, Some(&signature)));
    }

    #[test]
    fn accepts_hex_signature_with_and_without_prefix() {
        let verifier = SignatureVerifier::new(KEY);
        let hex = verifier.sign_hex(BODY);

        assert_eq!(hex.len(), 64);
        assert!(verifier.verify(BODY, Some(&hex)));
        assert!(verifier.verify(BODY, Some(&format!("sha256={hex}"))));
    }

    #[test]
    fn rejects_uppercase_hex_signature() {
        let verifier = SignatureVerifier::new(KEY);
        let hex = verifier.sign_hex(BODY);

        assert!(!verifier.verify(BODY, Some(&hex.to_uppercase())));
        assert!(!verifier.verify(BODY, Some(&format!("sha256={}", hex.to_uppercase()))));
    }

    #[test]
    fn rejects_missing_signature() {
        let verifier = SignatureVerifier::new(KEY);

        assert!(!verifier.verify(BODY, None));
        assert!(!verifier.verify(BODY, Some("")));
    }

    #[test]
    fn rejects_undecodable_signature() {
        let verifier = SignatureVerifier::new(KEY);

        assert!(!verifier.verify(BODY, Some("not base64 !!")));
        assert!(!verifier.verify(BODY, Some("sha256=zz")));
    }

    #[test]
    fn rejects_signature_from_other_key() {
        let signature = SignatureVerifier::new("other").sign(BODY);

        assert!(!SignatureVerifier::new(KEY).verify(BODY, Some(&signature)));
    }

    #[test]
    fn rejects_modified_body() {
        let verifier = SignatureVerifier::new(KEY);
        let signature = verifier.sign(BODY);
        let mut tampered = BODY.to_vec();
        tampered.push(b' ');

        assert!(!verifier.verify(&tampered, Some(&signature)));
    }

    #[test]
    fn rejects_truncated_digest() {
        let verifier = SignatureVerifier::new(KEY);
        let hex = verifier.sign_hex(BODY);

        assert!(!verifier.verify(BODY, Some(&hex[..62])));
    }

    #[test]
    fn empty_key_never_verifies() {
        let verifier = SignatureVerifier::new("");

        assert_eq!(verifier.sign(BODY), "");
        assert!(!verifier.verify(BODY, Some(&verifier.sign(BODY))));
    }
}

mod single_bit_changes {
    use super::*;

    /// Every variant of `bytes` with exactly one bit flipped.
    fn flips(bytes: &[u8]) -> impl Iterator<Item = Vec<u8>> + '_ {
        (0..bytes.len() * 8).map(move |bit| {
            let mut flipped = bytes.to_vec();
            flipped[bit / 8] ^= 1 << (bit % 8);
            flipped
        })
    }

    fn assert_no_flip_verifies(verifier: &SignatureVerifier, signature: &str) {
        for flipped in flips(signature.as_bytes()) {
            // Header values are text; non-UTF-8 flips cannot reach `verify`.
            let Ok(flipped) = String::from_utf8(flipped) else {
                continue;
            };
            assert!(
                !verifier.verify(BODY, Some(&flipped)),
                "{flipped:?} verified in place of {signature:?}"
            );
        }
    }

    #[test]
    fn any_body_bit_flip_is_rejected() {
        let verifier = SignatureVerifier::new(KEY);
        let signature = verifier.sign(BODY);

        for flipped in flips(BODY) {
            assert!(!verifier.verify(&flipped, Some(&signature)));
        }
    }

    #[test]
    fn any_base64_signature_bit_flip_is_rejected() {
        let verifier = SignatureVerifier::new(KEY);

        assert_no_flip_verifies(&verifier, &verifier.sign(BODY));
    }

    #[test]
    fn any_hex_signature_bit_flip_is_rejected() {
        let verifier = SignatureVerifier::new(KEY);
        let hex = verifier.sign_hex(BODY);

        assert_no_flip_verifies(&verifier, &hex);
        assert_no_flip_verifies(&verifier, &format!("sha256={hex}"));
    }
}

mod sign {
    use super::*;

    #[test]
    fn matches_known_vector() {
        // HMAC-SHA256("key", "The quick brown fox jumps over the lazy dog")
        let verifier = SignatureVerifier::new("key");

        assert_eq!(
            verifier.sign_hex(b"The quick brown fox jumps over the lazy dog"),
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
    }

    #[test]
    fn debug_redacts_key() {
        let debug = format!("{:?}", SignatureVerifier::new("super-secret"));

        assert!(!debug.contains("super-secret"));
    }
}
