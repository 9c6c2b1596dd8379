use crate::{
    dto::{CreateNoteRequest, NoteResponse, UpdateNoteRequest},
    repository::Repository,
};

use std::sync::Arc;

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<tokio::sync::Mutex<Repository>>,
}

impl NoteService {
    pub const fn new(repo: Arc<tokio::sync::Mutex<Repository>>) -> Self {
        Self { repo }
    }

    pub async fn create_note(&self, request: CreateNoteRequest) -> NoteResponse {
        self.repo
            .lock()
            .await
            .create_note(
                request.title,
                request.content,
                request.tags.unwrap_or_default(),
            )
            .into()
    }

    /// Replaces title, content and tags of an existing note.
    /// Returns `None` if no note has the requested id.
    pub async fn update_note(&self, request: UpdateNoteRequest) -> Option<NoteResponse> {
        self.repo
            .lock()
            .await
            .update_note(
                &request.id,
                request.title,
                request.content,
                request.tags.unwrap_or_default(),
            )
            .map(NoteResponse::from)
    }

    pub async fn delete_note(&self, id: &str) -> bool {
        self.repo.lock().await.delete_note(id)
    }

    pub async fn get_all_notes(&self) -> Vec<NoteResponse> {
        self.repo
            .lock()
            .await
            .get_all_notes()
            .into_iter()
            .map(NoteResponse::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> NoteService {
        NoteService::new(Arc::new(tokio::sync::Mutex::new(Repository::new())))
    }

    #[tokio::test]
    async fn missing_tags_become_empty() {
        let service = service();

        let created = service
            .create_note(CreateNoteRequest {
                title: "A".into(),
                content: "B".into(),
                tags: None,
            })
            .await;
        assert!(created.tags.is_empty());

        let updated = service
            .update_note(UpdateNoteRequest {
                id: created.id.clone(),
                title: "A".into(),
                content: "B".into(),
                tags: None,
            })
            .await
            .unwrap();
        assert!(updated.tags.is_empty());
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn clones_share_one_store() {
        let service = service();
        let other = service.clone();

        let created = service
            .create_note(CreateNoteRequest {
                title: "shared".into(),
                ..Default::default()
            })
            .await;

        let listed = other.get_all_notes().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);

        assert!(other.delete_note(&created.id).await);
        assert!(service.get_all_notes().await.is_empty());
    }

    #[tokio::test]
    async fn concurrent_creates_are_all_kept() {
        let service = service();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .create_note(CreateNoteRequest {
                            title: format!("note {i}"),
                            ..Default::default()
                        })
                        .await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        let mut ids: Vec<String> = service
            .get_all_notes()
            .await
            .into_iter()
            .map(|note| note.id)
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }
}
