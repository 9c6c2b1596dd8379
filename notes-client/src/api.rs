use std::time::Duration;

use crate::dto::{ErrorResponse, NewNote, Note, NoteUpdate};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to notes server failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("notes server responded with {status}: {message}")]
    Status { status: u16, message: String },
}

/// The operations the notes UI needs from the server.
pub trait NotesApi {
    async fn list_notes(&self) -> Result<Vec<Note>, ApiError>;

    async fn create_note(&self, note: &NewNote) -> Result<Note, ApiError>;

    async fn update_note(&self, note: &NoteUpdate) -> Result<Note, ApiError>;

    async fn delete_note(&self, id: &str) -> Result<(), ApiError>;
}

pub struct HttpNotesApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpNotesApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn notes_url(&self) -> String {
        format!("{}/notes", self.base_url)
    }

    fn delete_request(&self, id: &str) -> reqwest::RequestBuilder {
        self.client.delete(self.notes_url()).query(&[("id", id)])
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or(body);

        tracing::debug!("Notes server returned {}: {}", status, message);
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

impl NotesApi for HttpNotesApi {
    async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        let response = self.client.get(self.notes_url()).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn create_note(&self, note: &NewNote) -> Result<Note, ApiError> {
        let response = self.client.post(self.notes_url()).json(note).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn update_note(&self, note: &NoteUpdate) -> Result<Note, ApiError> {
        let response = self.client.put(self.notes_url()).json(note).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete_note(&self, id: &str) -> Result<(), ApiError> {
        let response = self.delete_request(id).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
