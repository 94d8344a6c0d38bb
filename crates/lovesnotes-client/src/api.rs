//! HTTP access to the LovesNotes service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use lovesnotes_core::{
    Error, GenerateRequest, GenerateResponse, Note, NoteInput, NoteUpdate, Result,
};

use crate::config::ClientConfig;

/// The service operations the controller depends on.
#[async_trait]
pub trait NotesApi: Send + Sync {
    async fn list_notes(&self) -> Result<Vec<Note>>;

    async fn create_note(&self, input: &NoteInput) -> Result<Note>;

    async fn update_note(&self, id: Uuid, update: &NoteUpdate) -> Result<Note>;

    async fn delete_note(&self, id: Uuid) -> Result<()>;

    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

/// Which service surface a failed call belongs to.
#[derive(Clone, Copy)]
enum Surface {
    Notes,
    Generation,
}

/// reqwest-backed [`NotesApi`].
#[derive(Clone)]
pub struct HttpNotesApi {
    client: Client,
    base_url: String,
}

impl HttpNotesApi {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(&ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn notes_url(&self) -> String {
        format!("{}/notes", self.base_url)
    }

    fn note_url(&self, id: Uuid) -> String {
        format!("{}/notes/{}", self.base_url, id)
    }

    /// Turn a non-success response into an error carrying the server's message.
    async fn check(response: Response, surface: Surface) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<MessageBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string(),
        };
        debug!(
            subsystem = "client",
            component = "http",
            http_status = status.as_u16(),
            "Request failed: {}",
            message
        );

        Err(match (status, surface) {
            (StatusCode::NOT_FOUND, Surface::Notes) => Error::NoteNotFound(message),
            (StatusCode::BAD_REQUEST, _) => Error::InvalidInput(message),
            (s, Surface::Generation) if s.is_server_error() => Error::Inference(message),
            (s, _) => Error::Request(format!("{}: {}", s, message)),
        })
    }

    async fn parse<T: DeserializeOwned>(response: Response, surface: Surface) -> Result<T> {
        let response = Self::check(response, surface).await?;
        response
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Invalid response body: {}", e)))
    }
}

#[async_trait]
impl NotesApi for HttpNotesApi {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        let response = self.client.get(self.notes_url()).send().await?;
        Self::parse(response, Surface::Notes).await
    }

    async fn create_note(&self, input: &NoteInput) -> Result<Note> {
        let response = self.client.post(self.notes_url()).json(input).send().await?;
        Self::parse(response, Surface::Notes).await
    }

    async fn update_note(&self, id: Uuid, update: &NoteUpdate) -> Result<Note> {
        let response = self
            .client
            .put(self.note_url(id))
            .json(update)
            .send()
            .await?;
        Self::parse(response, Surface::Notes).await
    }

    async fn delete_note(&self, id: Uuid) -> Result<()> {
        let response = self.client.delete(self.note_url(id)).send().await?;
        Self::check(response, Surface::Notes).await?;
        Ok(())
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            prompt: prompt.to_string(),
        };
        let response = self
            .client
            .post(format!("{}/generate", self.base_url))
            .json(&request)
            .send()
            .await?;
        let body: GenerateResponse = Self::parse(response, Surface::Generation).await?;
        Ok(body.generated_text)
    }
}
