use crate::{
    api::{ApiError, NotesApi},
    dto::{NewNote, Note, NoteUpdate},
};

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Content is required")]
    MissingContent,

    #[error("Failed to save note: {0}")]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Created(Note),
    Updated(Note),
}

/// Splits a comma separated tag line into trimmed, non-empty tags.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToString::to_string)
        .collect()
}

pub fn format_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Create/edit form state. Bound to a note it edits, unbound it creates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub title: String,
    pub content: String,
    pub tags: String,
    editing_id: Option<String>,
    alert: Option<String>,
}

impl NoteForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, note: Option<&Note>) {
        match note {
            Some(note) => {
                self.title.clone_from(&note.title);
                self.content.clone_from(&note.content);
                self.tags = format_tags(&note.tags);
                self.editing_id = Some(note.id.clone());
                self.alert = None;
            }
            None => self.clear(),
        }
    }

    pub const fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub async fn submit<A: NotesApi>(&mut self, api: &A) -> Result<Submitted, FormError> {
        let result = self.send(api).await;

        match &result {
            Ok(_) => self.clear(),
            Err(e) => {
                tracing::error!("Failed to submit note form: {e}");
                self.alert = Some(e.to_string());
            }
        }

        result
    }

    async fn send<A: NotesApi>(&self, api: &A) -> Result<Submitted, FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::MissingTitle);
        }
        if self.content.trim().is_empty() {
            return Err(FormError::MissingContent);
        }

        let tags = parse_tags(&self.tags);

        match &self.editing_id {
            Some(id) => {
                let update = NoteUpdate {
                    id: id.clone(),
                    title: self.title.clone(),
                    content: self.content.clone(),
                    tags,
                };
                Ok(Submitted::Updated(api.update_note(&update).await?))
            }
            None => {
                let new = NewNote {
                    title: self.title.clone(),
                    content: self.content.clone(),
                    tags,
                };
                Ok(Submitted::Created(api.create_note(&new).await?))
            }
        }
    }
}
