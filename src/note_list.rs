use crate::note_core::{make_notes, Note, NoteRecord, NoteView};

/// Source of titles for new notes. The browser implementation blocks on
/// `window.prompt`.
pub trait TitlePrompt {
    /// `None` when the user cancelled.
    fn ask(&mut self, message: &str) -> Option<String>;
}

/// The notes mounted under one container, in display order.
#[derive(Debug)]
pub struct NoteList<C, V> {
    container: C,
    notes: Vec<Note<C, V>>,
}

impl<C: Clone, V: NoteView> NoteList<C, V> {
    pub fn new(container: C) -> Self {
        Self {
            container,
            notes: Vec::new(),
        }
    }

    pub fn from_records(data: &[NoteRecord], container: C, new_view: impl FnMut() -> V) -> Self {
        let notes = make_notes(data, &container, new_view);
        Self { container, notes }
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn notes(&self) -> &[Note<C, V>] {
        &self.notes
    }

    pub fn get(&self, index: usize) -> Option<&Note<C, V>> {
        self.notes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Note<C, V>> {
        self.notes.get_mut(index)
    }

    /// Appends a rendered note and returns its index.
    pub fn push(&mut self, data: &NoteRecord, view: V) -> usize {
        let mut note = Note::new(data, self.container.clone());
        note.render(view);
        self.notes.push(note);
        self.notes.len() - 1
    }

    /// Asks for a title and, if one is given, appends a note with
    /// `placeholder` content already open for editing. Cancelled or empty
    /// answers add nothing.
    pub fn create_from_prompt(
        &mut self,
        prompt: &mut impl TitlePrompt,
        message: &str,
        placeholder: &str,
        new_view: impl FnOnce() -> V,
    ) -> Option<usize> {
        let Some(title) = prompt.ask(message).filter(|title| !title.is_empty()) else {
            log::debug!("note creation cancelled");
            return None;
        };
        let index = self.push(&NoteRecord::new(title, placeholder), new_view());
        if let Some(note) = self.notes.get_mut(index) {
            note.edit();
            log::info!("created note {:?}", note.title);
        }
        Some(index)
    }
}
