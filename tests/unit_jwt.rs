use slateboard::config::jwt::JwtConfig;
use slateboard::utils::jwt::{TokenError, decode_token, issue_token};

fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn round_trip_preserves_subject_and_timestamps() {
    let config = test_jwt_config();

    let token = issue_token("alice", &config).unwrap();
    let claims = decode_token(&token, &config).unwrap();

    assert_eq!(claims.sub, "alice");
    assert_eq!(claims.exp, claims.iat + config.access_token_expiry);
}

#[test]
fn token_is_rejected_from_the_expiry_instant() {
    // A zero lifetime puts exp exactly at issuance time; `now >= exp` must
    // already hold when we decode.
    let config = JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 0,
    };

    let token = issue_token("alice", &config).unwrap();
    assert_eq!(decode_token(&token, &config), Err(TokenError::Expired));
}

#[test]
fn expired_token_is_never_a_stale_success() {
    let config = JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: -120,
    };

    let token = issue_token("alice", &config).unwrap();
    assert_eq!(decode_token(&token, &config), Err(TokenError::Expired));
}

#[test]
fn tampered_signature_is_rejected() {
    let config = test_jwt_config();
    let token = issue_token("alice", &config).unwrap();

    // Flip one character of the signature segment only.
    let (payload, signature) = token.rsplit_once('.').unwrap();
    let mut sig: Vec<char> = signature.chars().collect();
    sig[0] = if sig[0] == 'A' { 'B' } else { 'A' };
    let tampered = format!("{}.{}", payload, sig.into_iter().collect::<String>());

    assert_eq!(
        decode_token(&tampered, &config),
        Err(TokenError::SignatureInvalid)
    );
}

#[test]
fn token_signed_with_another_key_is_rejected() {
    let config = test_jwt_config();
    let other = JwtConfig {
        secret: "a_completely_different_secret".to_string(),
        access_token_expiry: 3600,
    };

    let token = issue_token("alice", &other).unwrap();
    assert_eq!(
        decode_token(&token, &config),
        Err(TokenError::SignatureInvalid)
    );
}

#[test]
fn structurally_invalid_tokens_are_malformed() {
    let config = test_jwt_config();

    assert_eq!(decode_token("", &config), Err(TokenError::Malformed));
    assert_eq!(
        decode_token("not-a-token", &config),
        Err(TokenError::Malformed)
    );
    assert_eq!(
        decode_token("aaa.bbb.ccc", &config),
        Err(TokenError::Malformed)
    );
}

#[test]
fn distinct_subjects_yield_distinct_tokens() {
    let config = test_jwt_config();

    let a = issue_token("alice", &config).unwrap();
    let b = issue_token("bob", &config).unwrap();

    assert_eq!(decode_token(&a, &config).unwrap().sub, "alice");
    assert_eq!(decode_token(&b, &config).unwrap().sub, "bob");
}
