use crate::{
    api::{ApiError, NotesApi},
    dto::Note,
    form::{FormError, NoteForm, Submitted},
    list::NotesList,
};

/// Ties the form and the list together: which note is being edited and
/// when the list has to refetch.
#[derive(Debug, Default)]
pub struct NotesPage {
    pub form: NoteForm,
    pub list: NotesList,
    editing: Option<Note>,
    refresh_trigger: u64,
}

impl NotesPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn editing(&self) -> Option<&Note> {
        self.editing.as_ref()
    }

    pub async fn open<A: NotesApi>(&mut self, api: &A) {
        self.list.sync(api, self.refresh_trigger).await;
    }

    pub fn edit(&mut self, note: &Note) {
        self.form.bind(Some(note));
        self.editing = Some(note.clone());
    }

    pub fn cancel_edit(&mut self) {
        self.form.bind(None);
        self.editing = None;
    }

    pub async fn submit_form<A: NotesApi>(&mut self, api: &A) -> Result<Submitted, FormError> {
        let submitted = self.form.submit(api).await?;

        if matches!(submitted, Submitted::Updated(_)) {
            self.editing = None;
        }

        self.refresh_trigger += 1;
        self.list.sync(api, self.refresh_trigger).await;

        Ok(submitted)
    }

    pub async fn delete<A: NotesApi>(&mut self, api: &A, id: &str) -> Result<(), ApiError> {
        self.list.delete(api, id).await?;

        if self.editing.as_ref().is_some_and(|note| note.id == id) {
            self.cancel_edit();
        }
        Ok(())
    }
}
