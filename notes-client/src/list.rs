use crate::{
    api::{ApiError, NotesApi},
    dto::Note,
};

/// Orders notes newest first. The server keeps insertion order, which the
/// list does not rely on.
pub fn sort_newest_first(notes: &mut [Note]) {
    notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[derive(Debug, Default)]
pub struct NotesList {
    notes: Vec<Note>,
    loading: bool,
    error: Option<String>,
    seen_trigger: Option<u64>,
}

impl NotesList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetches on first display and whenever `trigger` differs from the
    /// last value seen.
    pub async fn sync<A: NotesApi>(&mut self, api: &A, trigger: u64) {
        if self.seen_trigger == Some(trigger) {
            return;
        }
        self.seen_trigger = Some(trigger);
        self.refresh(api).await;
    }

    pub async fn refresh<A: NotesApi>(&mut self, api: &A) {
        self.loading = true;
        self.error = None;

        match api.list_notes().await {
            Ok(mut notes) => {
                sort_newest_first(&mut notes);
                tracing::debug!("Fetched {} notes", notes.len());
                self.notes = notes;
            }
            Err(e) => {
                tracing::error!("Failed to fetch notes: {e}");
                self.error = Some("Failed to load notes".to_string());
            }
        }

        self.loading = false;
    }

    /// Drops a note the server has acknowledged as deleted, without refetching.
    pub fn remove(&mut self, id: &str) {
        self.notes.retain(|note| note.id != id);
    }

    /// Delete action of a single note card.
    pub async fn delete<A: NotesApi>(&mut self, api: &A, id: &str) -> Result<(), ApiError> {
        if let Err(e) = api.delete_note(id).await {
            tracing::error!("Error deleting note {id}: {e}");
            return Err(e);
        }

        self.remove(id);
        Ok(())
    }
}
