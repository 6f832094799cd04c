//! 密码哈希功能单元测试
//!
//! 测试 Argon2id 密码哈希和验证功能

use jwt_auth_service::auth::password::PasswordHasher;
use proptest::prelude::*;

#[test]
fn test_password_hash_and_verify() {
    let hasher = PasswordHasher::new();
    let password = "secret1";

    let hash = hasher.hash(password).expect("Hashing should succeed");

    // 哈希值应该包含 argon2 标识
    assert!(hash.contains("$argon2"));

    // 验证正确密码
    hasher.verify(password, &hash).expect("Verification should succeed");
}

#[test]
fn test_password_verify_with_wrong_password() {
    let hasher = PasswordHasher::new();
    let password = "secret1";

    let hash = hasher.hash(password).expect("Hashing should succeed");

    // 验证错误密码应该失败
    let result = hasher.verify("wrong-password", &hash);
    assert!(result.is_err(), "Wrong password should fail verification");
}

#[test]
fn test_password_hash_different_each_time() {
    let hasher = PasswordHasher::new();
    let password = "secret1";

    let hash1 = hasher.hash(password).expect("First hash should succeed");
    let hash2 = hasher.hash(password).expect("Second hash should succeed");

    // 由于随机盐，每次生成的哈希应该不同
    assert_ne!(hash1, hash2, "Hashes should be different due to salt");

    // 但两个哈希都应该能验证同一个密码
    hasher.verify(password, &hash1).expect("First hash should verify");
    hasher.verify(password, &hash2).expect("Second hash should verify");
}

#[test]
fn test_password_hash_unicode() {
    let hasher = PasswordHasher::new();
    let password = "密码测试Test123!🔒";

    let hash = hasher.hash(password).expect("Unicode password should hash");

    hasher.verify(password, &hash).expect("Unicode password should verify");

    // 稍有不同的 Unicode 密码应该失败
    assert!(hasher.verify("密码测试Test123🔒", &hash).is_err());
}

#[test]
fn test_password_verify_malformed_hash() {
    let hasher = PasswordHasher::new();

    // 非 PHC 格式的存量数据不应 panic，而是返回错误
    let result = hasher.verify("secret1", "not-a-valid-hash");
    assert!(result.is_err());
}

proptest! {
    // Argon2id 较慢，控制用例数量
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn prop_hash_never_equals_plaintext_and_verifies(password in "[a-zA-Z0-9!@#]{6,24}") {
        let hasher = PasswordHasher::new();

        let hash = hasher.hash(&password).expect("Hashing should succeed");

        prop_assert_ne!(&hash, &password);
        prop_assert!(hasher.verify(&password, &hash).is_ok());
    }
}
