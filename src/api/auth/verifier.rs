use async_trait::async_trait;

/// Decides whether a login attempt is accepted
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, email: &str, password: &str) -> bool;
}

/// Accepts exactly one configured email/password pair
pub struct StaticCredentialVerifier {
    email: String,
    password: String,
}

impl StaticCredentialVerifier {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentialVerifier {
    async fn verify(&self, email: &str, password: &str) -> bool {
        email.eq_ignore_ascii_case(&self.email) && password == self.password
    }
}
