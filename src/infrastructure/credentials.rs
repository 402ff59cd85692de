use crate::domain::ports::CredentialVerifier;
use std::collections::HashMap;

/// An in-memory username/password table.
#[derive(Debug, Default, Clone)]
pub struct StaticCredentials {
    admins: HashMap<String, String>,
}

impl StaticCredentials {
    pub fn new(admins: HashMap<String, String>) -> Self {
        Self { admins }
    }

    /// Table with a single admin pair.
    pub fn single(username: impl Into<String>, password: impl Into<String>) -> Self {
        let mut admins = HashMap::new();
        admins.insert(username.into(), password.into());
        Self { admins }
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        self.admins
            .get(username)
            .is_some_and(|expected| expected == password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify() {
        let creds = StaticCredentials::single("admin", "1234");
        assert!(creds.verify("admin", "1234"));
        assert!(!creds.verify("admin", "4321"));
        assert!(!creds.verify("nobody", "1234"));
    }
}
