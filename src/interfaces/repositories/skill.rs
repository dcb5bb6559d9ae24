use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    constants::{SKILLS_PATH, SUMMARY_PATH},
    entities::{
        skill::{SkillId, SkillPayload, SkillRecord},
        summary::SummaryView,
    },
    errors::AppError,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// `GET /skills`, in backend order
    async fn list_skills(&self) -> Result<Vec<SkillRecord>, AppError>;

    /// `GET /summary`
    async fn get_summary(&self) -> Result<SummaryView, AppError>;

    /// `POST /skills`, returns the stored record with its new id
    async fn create_skill(&self, payload: &SkillPayload) -> Result<SkillRecord, AppError>;

    /// `PUT /skills/{id}`
    async fn update_skill(&self, id: SkillId, payload: &SkillPayload) -> Result<SkillRecord, AppError>;

    /// `DELETE /skills/{id}`; the response body is ignored
    async fn delete_skill(&self, id: SkillId) -> Result<(), AppError>;
}

/// REST client for the SkillStack backend.
#[derive(Clone)]
pub struct HttpSkillRepo {
    client: Client,
    base_url: String,
}

impl HttpSkillRepo {
    pub fn new(client: Client, base_url: &str) -> Self {
        HttpSkillRepo {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn skill_url(&self, id: SkillId) -> String {
        format!("{}/{}/{}", self.base_url, SKILLS_PATH, id)
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, AppError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus(status.as_u16()));
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AppError> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))
    }
}

#[async_trait]
impl SkillRepository for HttpSkillRepo {
    async fn list_skills(&self) -> Result<Vec<SkillRecord>, AppError> {
        let url = self.url(SKILLS_PATH);
        debug!(method = "GET", %url, "fetching skills");
        self.send_json(self.client.get(&url)).await
    }

    async fn get_summary(&self) -> Result<SummaryView, AppError> {
        let url = self.url(SUMMARY_PATH);
        debug!(method = "GET", %url, "fetching summary");
        self.send_json(self.client.get(&url)).await
    }

    async fn create_skill(&self, payload: &SkillPayload) -> Result<SkillRecord, AppError> {
        let url = self.url(SKILLS_PATH);
        debug!(method = "POST", %url, name = %payload.name, "creating skill");
        self.send_json(self.client.post(&url).json(payload)).await
    }

    async fn update_skill(&self, id: SkillId, payload: &SkillPayload) -> Result<SkillRecord, AppError> {
        let url = self.skill_url(id);
        debug!(method = "PUT", %url, "updating skill");
        self.send_json(self.client.put(&url).json(payload)).await
    }

    async fn delete_skill(&self, id: SkillId) -> Result<(), AppError> {
        let url = self.skill_url(id);
        debug!(method = "DELETE", %url, "deleting skill");
        self.send(self.client.delete(&url)).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalised() {
        let repo = HttpSkillRepo::new(Client::new(), " http://127.0.0.1:8000/ ");

        assert_eq!(repo.base_url(), "http://127.0.0.1:8000");
        assert_eq!(repo.url(SKILLS_PATH), "http://127.0.0.1:8000/skills");
        assert_eq!(repo.skill_url(SkillId(12)), "http://127.0.0.1:8000/skills/12");
    }
}
