use slateboard::utils::password::{hash_password, verify_password};

#[test]
fn hash_then_verify_round_trip() {
    let hash = hash_password("correct horse battery staple").unwrap();
    assert!(verify_password("correct horse battery staple", &hash).unwrap());
}

#[test]
fn wrong_password_is_false_not_error() {
    let hash = hash_password("secret-one").unwrap();
    assert!(!verify_password("secret-two", &hash).unwrap());
}

#[test]
fn hashes_are_salted() {
    let a = hash_password("same-password").unwrap();
    let b = hash_password("same-password").unwrap();
    assert_ne!(a, b);
}

#[test]
fn corrupt_stored_hash_is_an_error() {
    assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
}

#[test]
fn hash_never_contains_plaintext() {
    let hash = hash_password("visible-secret").unwrap();
    assert!(!hash.contains("visible-secret"));
}
