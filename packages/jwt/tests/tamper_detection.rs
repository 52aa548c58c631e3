//! Property tests: any single-character change to a valid token is rejected

use jwtseal::{
    Claims, Config, Engine, ErrorReason, Header, ParseOptions, SignatureAlgorithm,
    SignatureEncoding,
};
use proptest::prelude::*;
use proptest::sample::{select, Index};

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_.=+/";

fn engine(alg: SignatureAlgorithm, encoding: SignatureEncoding) -> Engine {
    let config = Config::builder("tamper-test-secret")
        .header(Header::new(alg).with_key_id("k1"))
        .claims(Claims::builder().issuer("tester").subject("Access").build())
        .token_lifetime_secs(3600)
        .signature_encoding(encoding)
        .build()
        .expect("config should build");
    Engine::new(config).expect("engine should build")
}

fn sample_token(engine: &Engine) -> String {
    let claims = Claims::builder()
        .token_id("id2")
        .audience("api")
        .data(b"dataset2".to_vec())
        .build();
    engine.create(&claims, None).expect("create should succeed")
}

fn assert_rejected(
    engine: &Engine,
    valid: &str,
    at: Index,
    replacement: u8,
) -> Result<(), TestCaseError> {
    let mut bytes = valid.as_bytes().to_vec();
    let position = at.index(bytes.len());
    prop_assume!(bytes[position] != replacement);
    bytes[position] = replacement;
    let tampered = String::from_utf8(bytes).expect("alphabet is ascii");

    let reason = engine
        .parse(&tampered, None)
        .map(|_| ())
        .map_err(|e| e.reason());
    prop_assert!(
        matches!(
            reason,
            Err(ErrorReason::Malformed
                | ErrorReason::HeadersMalformed
                | ErrorReason::ClaimsMalformed
                | ErrorReason::Unverifiable
                | ErrorReason::SignatureInvalid)
        ),
        "tampered token {tampered} gave {reason:?}"
    );
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_tampered_hs256_token_is_rejected(at in any::<Index>(), replacement in select(ALPHABET)) {
        let engine = engine(SignatureAlgorithm::Hs256, SignatureEncoding::Base64Url);
        let token = sample_token(&engine);
        assert_rejected(&engine, &token, at, replacement)?;
    }

    #[test]
    fn test_tampered_hs512_hex_token_is_rejected(at in any::<Index>(), replacement in select(ALPHABET)) {
        let engine = engine(SignatureAlgorithm::Hs512, SignatureEncoding::Hex);
        let token = sample_token(&engine);
        assert_rejected(&engine, &token, at, replacement)?;
    }

    #[test]
    fn test_fully_specified_claims_round_trip(
        iss in "[a-z]{1,12}",
        sub in "[A-Za-z0-9]{1,12}",
        aud in proptest::option::of("[a-z]{1,8}"),
        jti in "[a-f0-9-]{1,36}",
        data in proptest::collection::vec(any::<u8>(), 1..64),
        lifetime in 60i64..86_400,
    ) {
        let engine = engine(SignatureAlgorithm::Hs256, SignatureEncoding::Base64Url);
        let iat = chrono::Utc::now().timestamp();
        let claims = Claims {
            issuer: Some(iss),
            subject: Some(sub),
            audience: aud,
            expiration_time: iat + lifetime,
            not_before: Some(iat),
            issued_at: iat,
            token_id: Some(jti),
            data: Some(data),
        };

        let token = engine.create(&claims, None).expect("create should succeed");
        let options = ParseOptions::default().skip_claims_validation(true);
        let parsed = engine.parse(&token, Some(&options)).expect("parse should succeed");
        prop_assert_eq!(parsed.claims, claims);
    }
}
