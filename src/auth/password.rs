use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

/// Argon2id hashing for stored credentials.
#[derive(Clone, Default)]
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService {
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    pub fn hash(&self, password: &str) -> Result<String, Error> {
        let salt = SaltString::generate(&mut OsRng);

        Ok(self
            .argon2
            .hash_password(password.as_bytes(), &salt)?
            .to_string())
    }

    /// False for a wrong password and for a digest that does not parse.
    pub fn verify(&self, password: &str, hashed: &str) -> bool {
        let parsed = match PasswordHash::new(hashed) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is malformed");
                return false;
            }
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Always false, after spending the same Argon2 work as [`Self::verify`].
    /// Used when there is no stored digest to check against.
    pub fn verify_absent(&self, password: &str) -> bool {
        let salt = SaltString::generate(&mut OsRng);
        let _ = self.argon2.hash_password(password.as_bytes(), &salt);
        false
    }
}

#[cfg(test)]
pub(crate) fn fast_password_service() -> PasswordService {
    PasswordService::with_params(Params::new(8, 1, 1, None).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_only_the_original_password() {
        let passwords = fast_password_service();
        let digest = passwords.hash("hunter22").unwrap();

        assert!(digest.starts_with("$argon2id$"));
        assert!(passwords.verify("hunter22", &digest));
        assert!(!passwords.verify("hunter23", &digest));
    }

    #[test]
    fn absent_digest_never_verifies() {
        assert!(!fast_password_service().verify_absent("hunter22"));
    }

    #[test]
    fn malformed_digest_never_verifies() {
        assert!(!fast_password_service().verify("anything", "not-a-phc-string"));
    }
}
