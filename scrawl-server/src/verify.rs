use anyhow::Context;
use async_trait::async_trait;
use scrawl_api::IdentityClaim;

use crate::Error;

/// Boundary to the external token-issuing service.
#[async_trait]
pub trait VerifyToken: Send + Sync {
    /// Turn an opaque bearer token into an identity claim. Fails with
    /// `InvalidToken` when the service rejects the token as malformed,
    /// expired or signature-invalid.
    async fn verify(&self, token: &str) -> Result<IdentityClaim, Error>;
}

pub struct HttpVerifier {
    client: reqwest::Client,
    url: String,
    key: String,
}

impl HttpVerifier {
    pub fn new(url: String, key: String) -> HttpVerifier {
        HttpVerifier {
            client: reqwest::Client::new(),
            url,
            key,
        }
    }
}

#[async_trait]
impl VerifyToken for HttpVerifier {
    async fn verify(&self, token: &str) -> Result<IdentityClaim, Error> {
        let resp = self
            .client
            .post(&self.url)
            .query(&[("key", &self.key)])
            .json(&serde_json::json!({ "token": token }))
            .send()
            .await
            .context("reaching identity verifier")?;
        if resp.status().is_client_error() {
            return Err(Error::invalid_token());
        }
        let resp = resp
            .error_for_status()
            .context("identity verifier returned an error")?;
        Ok(resp
            .json::<IdentityClaim>()
            .await
            .context("parsing identity verifier response")?)
    }
}
