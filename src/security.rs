use cfg_if::cfg_if;

cfg_if! { if #[cfg(feature = "ssr")] {
    use argon2::{
        password_hash::{self, PasswordVerifier, SaltString},
        Argon2, PasswordHash, PasswordHasher,
    };
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use rand::{rngs::StdRng, RngCore, SeedableRng};
    use secrecy::{ExposeSecret, SecretString};
    use thiserror::Error as ThisError;
}}

#[cfg(feature = "ssr")]
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum HashError {
    #[error("could not hash password: {0}")]
    Hash(password_hash::Error),
    #[error("stored password hash is malformed: {0}")]
    Malformed(password_hash::Error),
    #[error("password does not match")]
    Mismatch,
}

/// 128 random bits, URL-safe base64 without padding. Used for session tokens.
#[cfg(feature = "ssr")]
pub fn gen_128bit_base64() -> String {
    let mut rng = StdRng::from_entropy();
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Salted argon2 hash of `input` in PHC string form.
#[cfg(feature = "ssr")]
pub fn gen_hash(input: &SecretString) -> Result<SecretString, HashError> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    Argon2::default()
        .hash_password(input.expose_secret().as_bytes(), &salt)
        .map(|hash| SecretString::from(hash.to_string()))
        .map_err(|e| {
            log::trace!("failed to produce hash of password in gen_hash: {e}");
            HashError::Hash(e)
        })
}

#[cfg(feature = "ssr")]
pub fn verify_hash(
    stored_password_hash: &SecretString,
    password_candidate: &SecretString,
) -> Result<(), HashError> {
    let expected_password_hash =
        PasswordHash::new(stored_password_hash.expose_secret()).map_err(HashError::Malformed)?;
    Argon2::default()
        .verify_password(
            password_candidate.expose_secret().as_bytes(),
            &expected_password_hash,
        )
        .map_err(|e| match e {
            password_hash::Error::Password => HashError::Mismatch,
            other => HashError::Malformed(other),
        })
}
