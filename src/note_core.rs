use crate::fmt::note_markup;
use serde::{Deserialize, Serialize};

/// Construction-time shape of a note.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct NoteRecord {
    pub title: String,
    pub content: String,
}

impl NoteRecord {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Everything a note needs from the surface it is drawn on.
pub trait NoteView {
    fn set_header_text(&mut self, title: &str);
    fn set_display_markup(&mut self, markup: &str);
    fn set_display_visible(&mut self, visible: bool);
    fn set_editor_visible(&mut self, visible: bool);
    fn set_editor_value(&mut self, value: &str);
    fn editor_value(&self) -> String;
    fn set_expanded(&mut self, expanded: bool);
    fn focus_editor(&mut self);
}

/// Expand/collapse state of a header-controlled section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Zippy {
    expanded: bool,
}

impl Zippy {
    pub fn is_expanded(self) -> bool {
        self.expanded
    }

    pub fn expand(&mut self) {
        self.expanded = true;
    }

    pub fn collapse(&mut self) {
        self.expanded = false;
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoteMode {
    #[default]
    Display,
    Editing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteState {
    CollapsedDisplay,
    ExpandedDisplay,
    ExpandedEditing,
    /// Section collapsed over an editor that is still open.
    CollapsedEditing,
}

/// A single note: its data, the container it belongs to, and the view it
/// paints into once rendered.
#[derive(Debug)]
pub struct Note<C, V> {
    pub title: String,
    pub content: String,
    parent: C,
    zippy: Zippy,
    mode: NoteMode,
    view: Option<V>,
}

impl<C, V: NoteView> Note<C, V> {
    pub fn new(data: &NoteRecord, container: C) -> Self {
        Self {
            title: data.title.clone(),
            content: data.content.clone(),
            parent: container,
            zippy: Zippy::default(),
            mode: NoteMode::Display,
            view: None,
        }
    }

    pub fn container(&self) -> &C {
        &self.parent
    }

    pub fn view(&self) -> Option<&V> {
        self.view.as_ref()
    }

    pub fn mode(&self) -> NoteMode {
        self.mode
    }

    pub fn is_expanded(&self) -> bool {
        self.zippy.is_expanded()
    }

    pub fn state(&self) -> NoteState {
        match (self.zippy.is_expanded(), self.mode) {
            (false, NoteMode::Display) => NoteState::CollapsedDisplay,
            (true, NoteMode::Display) => NoteState::ExpandedDisplay,
            (true, NoteMode::Editing) => NoteState::ExpandedEditing,
            (false, NoteMode::Editing) => NoteState::CollapsedEditing,
        }
    }

    /// Paints the initial structure: header, formatted content, editor
    /// hidden, section collapsed.
    pub fn render(&mut self, mut view: V) {
        view.set_header_text(&self.title);
        view.set_display_markup(&note_markup(&self.content));
        view.set_expanded(self.zippy.is_expanded());
        self.view = Some(view);
        self.paint_mode();
    }

    pub fn toggle(&mut self) {
        self.zippy.toggle();
        self.paint_expanded();
    }

    /// Content clicks only open the editor on a visible, non-editing note.
    pub fn click_content(&mut self) {
        if self.state() == NoteState::ExpandedDisplay {
            self.open_editor();
        }
    }

    pub fn open_editor(&mut self) {
        if let Some(view) = self.view.as_mut() {
            view.set_editor_value(&self.content);
        }
        self.mode = NoteMode::Editing;
        self.paint_mode();
    }

    pub fn save(&mut self) {
        if let Some(view) = self.view.as_ref() {
            self.content = view.editor_value();
        }
        log::debug!("saved note {:?}", self.title);
        self.close_editor();
    }

    pub fn close_editor(&mut self) {
        if let Some(view) = self.view.as_mut() {
            view.set_display_markup(&note_markup(&self.content));
        }
        self.mode = NoteMode::Display;
        self.paint_mode();
    }

    /// Expands the section, opens the editor and moves focus into it.
    pub fn edit(&mut self) {
        self.zippy.expand();
        self.paint_expanded();
        self.open_editor();
        if let Some(view) = self.view.as_mut() {
            view.focus_editor();
        }
    }

    fn paint_expanded(&mut self) {
        let expanded = self.zippy.is_expanded();
        if let Some(view) = self.view.as_mut() {
            view.set_expanded(expanded);
        }
    }

    fn paint_mode(&mut self) {
        let editing = self.mode == NoteMode::Editing;
        if let Some(view) = self.view.as_mut() {
            view.set_display_visible(!editing);
            view.set_editor_visible(editing);
        }
    }
}

/// Builds and renders one note per record, in order.
pub fn make_notes<C: Clone, V: NoteView>(
    data: &[NoteRecord],
    container: &C,
    mut new_view: impl FnMut() -> V,
) -> Vec<Note<C, V>> {
    let mut notes = Vec::with_capacity(data.len());
    for record in data {
        let mut note = Note::new(record, container.clone());
        note.render(new_view());
        notes.push(note);
    }
    notes
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::rc::Rc;

    /// Records every call so tests can inspect what a browser would show.
    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    pub(crate) struct RecordingView {
        pub header: String,
        pub markup: String,
        pub display_visible: bool,
        pub editor_visible: bool,
        pub editor_value: String,
        pub expanded: bool,
        pub focus_count: usize,
    }

    impl NoteView for RecordingView {
        fn set_header_text(&mut self, title: &str) {
            self.header = title.to_string();
        }
        fn set_display_markup(&mut self, markup: &str) {
            self.markup = markup.to_string();
        }
        fn set_display_visible(&mut self, visible: bool) {
            self.display_visible = visible;
        }
        fn set_editor_visible(&mut self, visible: bool) {
            self.editor_visible = visible;
        }
        fn set_editor_value(&mut self, value: &str) {
            self.editor_value = value.to_string();
        }
        fn editor_value(&self) -> String {
            self.editor_value.clone()
        }
        fn set_expanded(&mut self, expanded: bool) {
            self.expanded = expanded;
        }
        fn focus_editor(&mut self) {
            self.focus_count += 1;
        }
    }

    impl<C> Note<C, RecordingView> {
        fn view_mut(&mut self) -> &mut RecordingView {
            self.view.as_mut().expect("note was rendered")
        }
    }

    fn rendered(title: &str, content: &str) -> Note<(), RecordingView> {
        let mut note = Note::new(&NoteRecord::new(title, content), ());
        note.render(RecordingView::default());
        note
    }

    fn shown(note: &Note<(), RecordingView>) -> &RecordingView {
        note.view().expect("note was rendered")
    }

    #[test]
    fn render_paints_collapsed_display() {
        let note = rendered("Note 1", "Content of Note 1");
        let view = shown(&note);
        assert_eq!(view.header, "Note 1");
        assert_eq!(view.markup, "Content of Note 1");
        assert!(view.display_visible);
        assert!(!view.editor_visible);
        assert!(!view.expanded);
        assert_eq!(note.state(), NoteState::CollapsedDisplay);
    }

    #[test]
    fn unchanged_edit_round_trips() {
        let mut note = rendered("t", "original");
        note.toggle();
        note.open_editor();
        assert_eq!(shown(&note).editor_value, "original");
        note.save();
        assert_eq!(note.content, "original");
        assert_eq!(note.state(), NoteState::ExpandedDisplay);
    }

    #[test]
    fn save_takes_editor_value_and_closes() {
        let mut note = rendered("t", "before");
        note.toggle();
        note.click_content();
        assert_eq!(note.state(), NoteState::ExpandedEditing);

        note.view_mut().editor_value = "X".to_string();
        note.save();

        assert_eq!(note.content, "X");
        let view = shown(&note);
        assert_eq!(view.markup, "X");
        assert!(view.display_visible);
        assert!(!view.editor_visible);
    }

    #[test]
    fn exactly_one_of_display_and_editor_is_visible() {
        let mut note = rendered("t", "c");
        let steps: [fn(&mut Note<(), RecordingView>); 6] = [
            Note::toggle,
            Note::open_editor,
            Note::open_editor,
            Note::close_editor,
            Note::edit,
            Note::save,
        ];
        for step in steps {
            step(&mut note);
            let view = shown(&note);
            assert_ne!(view.display_visible, view.editor_visible);
        }
    }

    #[test]
    fn content_click_is_ignored_while_collapsed() {
        let mut note = rendered("t", "c");
        note.click_content();
        assert_eq!(note.state(), NoteState::CollapsedDisplay);
        assert!(!shown(&note).editor_visible);
    }

    #[test]
    fn collapsing_keeps_open_editor() {
        let mut note = rendered("t", "c");
        note.edit();
        note.toggle();
        assert_eq!(note.state(), NoteState::CollapsedEditing);
        note.toggle();
        assert_eq!(note.state(), NoteState::ExpandedEditing);
    }

    #[test]
    fn zippy_expand_collapse_and_toggle() {
        let mut zippy = Zippy::default();
        assert!(!zippy.is_expanded());
        zippy.expand();
        zippy.expand();
        assert!(zippy.is_expanded());
        zippy.collapse();
        assert!(!zippy.is_expanded());
        zippy.toggle();
        assert!(zippy.is_expanded());
    }

    #[test]
    fn edit_expands_opens_and_focuses() {
        let mut note = rendered("t", "c");
        assert!(!note.is_expanded());
        assert_eq!(note.mode(), NoteMode::Display);
        note.edit();
        assert!(note.is_expanded());
        assert_eq!(note.mode(), NoteMode::Editing);
        assert_eq!(note.state(), NoteState::ExpandedEditing);
        let view = shown(&note);
        assert!(view.expanded);
        assert_eq!(view.editor_value, "c");
        assert_eq!(view.focus_count, 1);
    }

    #[test]
    fn saved_content_is_escaped_and_formatted() {
        let mut note = rendered("t", "c");
        note.edit();
        note.view_mut().editor_value = "<b>see</b>\nhttps://example.org".to_string();
        note.save();
        assert_eq!(
            shown(&note).markup,
            r#"&lt;b&gt;see&lt;/b&gt;<br><a href="https://example.org" target="_blank" rel="nofollow">example.org</a>"#
        );
    }

    #[test]
    fn unrendered_note_tracks_state_without_view() {
        let mut note: Note<(), RecordingView> = Note::new(&NoteRecord::new("t", "c"), ());
        note.edit();
        note.save();
        assert_eq!(note.content, "c");
        assert_eq!(note.state(), NoteState::ExpandedDisplay);
    }

    #[test]
    fn make_notes_renders_in_order() {
        let data = vec![
            NoteRecord::new("Note 1", "Content of Note 1"),
            NoteRecord::new("Note 2", "Content of Note 2"),
        ];
        let container = Rc::new("notes");
        let notes = make_notes(&data, &container, RecordingView::default);

        let titles: Vec<_> = notes.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["Note 1", "Note 2"]);
        for note in &notes {
            assert!(Rc::ptr_eq(note.container(), &container));
            assert_eq!(note.view().map(|v| v.header.as_str()), Some(note.title.as_str()));
        }
    }

    proptest! {
        #[test]
        fn construction_keeps_record_and_container(title in ".*", content in ".*") {
            let record = NoteRecord::new(title, content);
            let container = Rc::new(());
            let note: Note<Rc<()>, RecordingView> = Note::new(&record, Rc::clone(&container));
            prop_assert_eq!(&note.title, &record.title);
            prop_assert_eq!(&note.content, &record.content);
            prop_assert!(Rc::ptr_eq(note.container(), &container));
        }

        #[test]
        fn double_toggle_restores_expand_state(start_expanded in any::<bool>()) {
            let mut note = rendered("t", "c");
            if start_expanded {
                note.toggle();
            }
            let before = note.state();
            note.toggle();
            note.toggle();
            prop_assert_eq!(note.state(), before);
            prop_assert_eq!(shown(&note).expanded, start_expanded);
        }
    }
}
