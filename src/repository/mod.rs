use chrono::{DateTime, Utc};

use crate::models::Note;

/// Process-local note store. Everything is lost when the process exits.
#[derive(Debug, Default)]
pub struct Repository {
    notes: Vec<Note>,
    last_id: i64,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_note(&mut self, title: String, content: String, tags: Vec<String>) -> Note {
        self.create_note_at(title, content, tags, Utc::now())
    }

    fn create_note_at(
        &mut self,
        title: String,
        content: String,
        tags: Vec<String>,
        now: DateTime<Utc>,
    ) -> Note {
        let note = Note {
            id: self.next_id(now),
            title,
            content,
            tags,
            created_at: now,
            updated_at: None,
        };

        self.notes.push(note.clone());
        tracing::debug!("Stored note {} ({} total)", note.id, self.notes.len());

        note
    }

    pub fn update_note(
        &mut self,
        id: &str,
        title: String,
        content: String,
        tags: Vec<String>,
    ) -> Option<Note> {
        let note = self.notes.iter_mut().find(|note| note.id == id)?;

        note.title = title;
        note.content = content;
        note.tags = tags;
        note.updated_at = Some(Utc::now());

        Some(note.clone())
    }

    pub fn delete_note(&mut self, id: &str) -> bool {
        let Some(idx) = self.notes.iter().position(|note| note.id == id) else {
            return false;
        };

        self.notes.remove(idx);
        true
    }

    pub fn get_all_notes(&self) -> Vec<Note> {
        self.notes.clone()
    }

    // Ids are creation timestamps in milliseconds; two notes created within
    // the same millisecond get consecutive values instead of colliding.
    fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis();
        self.last_id = if millis > self.last_id {
            millis
        } else {
            self.last_id + 1
        };
        self.last_id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn create_note_defaults() {
        let mut repo = Repository::new();

        let note = repo.create_note("A".to_string(), "B".to_string(), Vec::new());

        assert!(!note.id.is_empty());
        assert_eq!(note.title, "A");
        assert_eq!(note.content, "B");
        assert!(note.tags.is_empty());
        assert!(note.updated_at.is_none());
        assert_eq!(repo.get_all_notes(), vec![note]);
    }

    #[test]
    fn ids_stay_unique_within_one_millisecond() {
        let mut repo = Repository::new();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let first = repo.create_note_at("one".into(), String::new(), Vec::new(), now);
        let second = repo.create_note_at("two".into(), String::new(), Vec::new(), now);

        assert_eq!(first.id, now.timestamp_millis().to_string());
        assert_eq!(second.id, (now.timestamp_millis() + 1).to_string());
    }

    #[test]
    fn ids_follow_the_creation_clock() {
        let mut repo = Repository::new();
        let earlier = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 1).unwrap();

        repo.create_note_at("one".into(), String::new(), Vec::new(), earlier);
        let second = repo.create_note_at("two".into(), String::new(), Vec::new(), later);

        assert_eq!(second.id, later.timestamp_millis().to_string());
        assert_eq!(second.created_at, later);
    }

    #[test]
    fn update_replaces_fields_and_keeps_identity() {
        let mut repo = Repository::new();
        let created = repo.create_note("A".into(), "B".into(), tags(&["x"]));

        let updated = repo
            .update_note(&created.id, "C".into(), "D".into(), tags(&["y", "z"]))
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.title, "C");
        assert_eq!(updated.content, "D");
        assert_eq!(updated.tags, tags(&["y", "z"]));
        assert!(updated.updated_at.is_some());
        assert_eq!(repo.get_all_notes(), vec![updated]);
    }

    #[test]
    fn update_unknown_id_leaves_store_untouched() {
        let mut repo = Repository::new();
        let created = repo.create_note("A".into(), "B".into(), Vec::new());

        let result = repo.update_note("missing", "C".into(), "D".into(), Vec::new());

        assert!(result.is_none());
        assert_eq!(repo.get_all_notes(), vec![created]);
    }

    #[test]
    fn delete_is_permanent() {
        let mut repo = Repository::new();
        let keep = repo.create_note("keep".into(), String::new(), Vec::new());
        let drop = repo.create_note("drop".into(), String::new(), Vec::new());

        assert!(repo.delete_note(&drop.id));
        assert!(!repo.delete_note(&drop.id));
        assert_eq!(repo.get_all_notes(), vec![keep]);
    }

    #[test]
    fn list_keeps_insertion_order() {
        let mut repo = Repository::new();
        let first = repo.create_note("1".into(), String::new(), Vec::new());
        let second = repo.create_note("2".into(), String::new(), Vec::new());
        let third = repo.create_note("3".into(), String::new(), Vec::new());

        let ids: Vec<String> = repo.get_all_notes().into_iter().map(|n| n.id).collect();

        assert_eq!(ids, vec![first.id, second.id, third.id]);
    }
}
