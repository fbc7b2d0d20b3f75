use anyhow::Context as _;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::repository::IdentityProvider;
use crate::domain::types::{CreateIdentityOutcome, Identity};
use crate::error::AdminServiceError;

/// Client for the identity provider's admin API. Every request carries the
/// elevated service-role credential supplied at construction; resolving that
/// credential (or failing without it) happens in config, before any backend
/// call.
#[derive(Clone)]
pub struct HttpIdentityProvider {
    client: Client,
    base_url: String,
    service_role_key: String,
}

impl HttpIdentityProvider {
    pub fn new(base_url: &str, service_role_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            service_role_key: service_role_key.to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Identity record as the provider serializes it.
#[derive(Deserialize)]
struct IdentityPayload {
    id: Uuid,
    email: String,
    email_confirmed_at: Option<DateTime<Utc>>,
    last_sign_in_at: Option<DateTime<Utc>>,
}

impl From<IdentityPayload> for Identity {
    fn from(payload: IdentityPayload) -> Self {
        Identity {
            id: payload.id,
            email: payload.email,
            email_confirmed: payload.email_confirmed_at.is_some(),
            last_sign_in_at: payload.last_sign_in_at,
        }
    }
}

#[derive(Deserialize)]
struct ListPayload {
    users: Vec<IdentityPayload>,
}

impl IdentityProvider for HttpIdentityProvider {
    async fn create(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CreateIdentityOutcome, AdminServiceError> {
        let response = self
            .client
            .post(self.url("/admin/users"))
            .bearer_auth(&self.service_role_key)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "email_confirm": true,
            }))
            .send()
            .await
            .context("create identity request")?;

        let status = response.status();
        if status.is_success() {
            let payload: IdentityPayload = response
                .json()
                .await
                .context("decode create identity response")?;
            return Ok(CreateIdentityOutcome::Created(payload.into()));
        }

        let body = response.text().await.unwrap_or_default();
        // Conflict classification lives here, once; use cases never look at
        // provider error text.
        if matches!(
            status,
            StatusCode::UNPROCESSABLE_ENTITY | StatusCode::CONFLICT
        ) && body.contains("already")
        {
            return Ok(CreateIdentityOutcome::AlreadyExists);
        }

        Err(anyhow::anyhow!("identity provider rejected create ({status}): {body}").into())
    }

    async fn list(&self) -> Result<Vec<Identity>, AdminServiceError> {
        let response = self
            .client
            .get(self.url("/admin/users"))
            .bearer_auth(&self.service_role_key)
            .send()
            .await
            .context("list identities request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("identity listing failed ({status}): {body}").into());
        }

        let payload: ListPayload = response
            .json()
            .await
            .context("decode identity listing response")?;
        Ok(payload.users.into_iter().map(Identity::from).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AdminServiceError> {
        let response = self
            .client
            .delete(self.url(&format!("/admin/users/{id}")))
            .bearer_auth(&self.service_role_key)
            .send()
            .await
            .context("delete identity request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("identity delete failed ({status}): {body}").into());
        }
        Ok(())
    }
}
