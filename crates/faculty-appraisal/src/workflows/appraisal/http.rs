use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::documents::{AppraisalDocument, PartDocument};
use super::domain::{FacultyId, RecordVersion, StatusSnapshot};
use super::store::{AppraisalStore, StoreError};

/// Authenticated backend session. The token is sent as a bearer header.
#[derive(Clone, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Deserialize)]
struct VersionReceipt {
    version: RecordVersion,
}

/// REST client for the appraisal backend.
#[derive(Debug, Clone)]
pub struct HttpAppraisalStore {
    client: Client,
    base_url: Url,
    session: Session,
    timeout: Duration,
}

impl HttpAppraisalStore {
    pub fn new(base_url: Url, session: Session, timeout: Duration) -> Result<Self, StoreError> {
        if base_url.cannot_be_a_base() {
            return Err(StoreError::Unavailable(format!(
                "backend url '{base_url}' cannot carry a path"
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        Ok(Self {
            client,
            base_url,
            session,
            timeout,
        })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.session.authorize(self.client.request(method, self.url(segments)))
    }

    async fn send(
        &self,
        operation: &'static str,
        faculty_id: &FacultyId,
        request: RequestBuilder,
    ) -> Result<Response, StoreError> {
        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                StoreError::Timeout {
                    operation,
                    after_ms: self.timeout.as_millis() as u64,
                }
            } else {
                StoreError::Unavailable(err.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(faculty_id.clone()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        let body = response
            .bytes()
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        serde_json::from_slice(&body).map_err(|err| StoreError::Decode(err.to_string()))
    }

    async fn put_part(
        &self,
        operation: &'static str,
        faculty_id: &FacultyId,
        document: PartDocument,
        review: bool,
    ) -> Result<RecordVersion, StoreError> {
        let key = document.part().document_key();
        let mut segments = vec!["appraisals", faculty_id.0.as_str(), key];
        if review {
            segments.push("review");
        }
        let request = self.request(Method::PUT, &segments).json(&document);
        let response = self.send(operation, faculty_id, request).await?;
        let receipt: VersionReceipt = Self::decode(response).await?;
        Ok(receipt.version)
    }
}

#[async_trait]
impl AppraisalStore for HttpAppraisalStore {
    async fn read_appraisal(&self, faculty_id: &FacultyId) -> Result<AppraisalDocument, StoreError> {
        let request = self.request(Method::GET, &["appraisals", faculty_id.0.as_str()]);
        let response = self.send("read_appraisal", faculty_id, request).await?;
        Self::decode(response).await
    }

    async fn read_status(&self, faculty_id: &FacultyId) -> Result<StatusSnapshot, StoreError> {
        let request = self.request(Method::GET, &["appraisals", faculty_id.0.as_str(), "status"]);
        let response = self.send("read_status", faculty_id, request).await?;
        Self::decode(response).await
    }

    async fn write_part(
        &self,
        faculty_id: &FacultyId,
        document: PartDocument,
    ) -> Result<RecordVersion, StoreError> {
        self.put_part("write_part", faculty_id, document, false).await
    }

    async fn write_review(
        &self,
        faculty_id: &FacultyId,
        document: PartDocument,
    ) -> Result<RecordVersion, StoreError> {
        self.put_part("write_review", faculty_id, document, true).await
    }

    async fn submit(&self, faculty_id: &FacultyId) -> Result<StatusSnapshot, StoreError> {
        let request = self.request(Method::POST, &["appraisals", faculty_id.0.as_str(), "submit"]);
        let response = self.send("submit", faculty_id, request).await?;
        Self::decode(response).await
    }
}
