use crate::config::NotepadConfig;
use crate::error::NotepadError;
use crate::note_core::{Note, NoteRecord, NoteView};
use crate::note_list::{NoteList, TitlePrompt};
use leptos::html;
use leptos::mount::mount_to;
use leptos::prelude::*;
use log::Level;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

type DomNote = Note<HtmlElement, SignalNoteView>;
type DomNotes = StoredValue<NoteList<HtmlElement, SignalNoteView>, LocalStorage>;

/// `NoteView` backed by signals; the `NoteCard` markup reads them.
#[derive(Clone, Copy)]
pub struct SignalNoteView {
    header: RwSignal<String>,
    markup: RwSignal<String>,
    display_visible: RwSignal<bool>,
    editor_visible: RwSignal<bool>,
    editor_value: RwSignal<String>,
    expanded: RwSignal<bool>,
    editor_ref: NodeRef<html::Textarea>,
}

impl SignalNoteView {
    pub fn new() -> Self {
        Self {
            header: RwSignal::new(String::new()),
            markup: RwSignal::new(String::new()),
            display_visible: RwSignal::new(true),
            editor_visible: RwSignal::new(false),
            editor_value: RwSignal::new(String::new()),
            expanded: RwSignal::new(false),
            editor_ref: NodeRef::new(),
        }
    }
}

impl Default for SignalNoteView {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteView for SignalNoteView {
    fn set_header_text(&mut self, title: &str) {
        self.header.set(title.to_string());
    }

    fn set_display_markup(&mut self, markup: &str) {
        self.markup.set(markup.to_string());
    }

    fn set_display_visible(&mut self, visible: bool) {
        self.display_visible.set(visible);
    }

    fn set_editor_visible(&mut self, visible: bool) {
        self.editor_visible.set(visible);
    }

    fn set_editor_value(&mut self, value: &str) {
        self.editor_value.set(value.to_string());
    }

    fn editor_value(&self) -> String {
        self.editor_value.get_untracked()
    }

    fn set_expanded(&mut self, expanded: bool) {
        self.expanded.set(expanded);
    }

    fn focus_editor(&mut self) {
        // The textarea is still display:none until the pending style update lands.
        let editor_ref = self.editor_ref;
        request_animation_frame(move || {
            if let Some(editor) = editor_ref.get_untracked() {
                let _ = editor.focus();
            }
        });
    }
}

struct WindowPrompt;

impl TitlePrompt for WindowPrompt {
    fn ask(&mut self, message: &str) -> Option<String> {
        window().prompt_with_message(message).ok().flatten()
    }
}

fn display_value(visible: bool, shown_as: &'static str) -> &'static str {
    if visible {
        shown_as
    } else {
        "none"
    }
}

fn is_action_key(key: &str) -> bool {
    key == "Enter" || key == " "
}

/// Clicks, plus Enter or Space while the button has focus.
fn is_button_action(ev: &web_sys::Event) -> bool {
    match ev.dyn_ref::<web_sys::KeyboardEvent>() {
        Some(key_ev) => is_action_key(&key_ev.key()),
        None => true,
    }
}

#[component]
pub fn CustomButton(#[prop(into)] caption: String, on_action: Callback<()>) -> impl IntoView {
    view! {
        <div
            class="notepad-button"
            role="button"
            tabindex="0"
            on:click=move |_| on_action.run(())
            on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                if is_action_key(&ev.key()) {
                    ev.prevent_default();
                    on_action.run(());
                }
            }
        >
            {caption}
        </div>
    }
}

#[component]
fn NoteCard(notes: DomNotes, index: usize, surface: SignalNoteView) -> impl IntoView {
    let act = move |action: fn(&mut DomNote)| {
        notes.update_value(|list| {
            if let Some(note) = list.get_mut(index) {
                action(note);
            }
        });
    };

    view! {
        <div class="note">
            <div
                class="note-header"
                class:expanded=move || surface.expanded.get()
                style="cursor: pointer; font-weight: 600;"
                on:click=move |_| act(Note::toggle)
            >
                {move || surface.header.get()}
            </div>
            <div class="note-body" style:display=move || display_value(surface.expanded.get(), "block")>
                <div
                    class="note-content"
                    style:display=move || display_value(surface.display_visible.get(), "inline")
                    inner_html=move || surface.markup.get()
                    on:click=move |_| act(Note::click_content)
                ></div>
                <div class="note-editor" style:display=move || display_value(surface.editor_visible.get(), "inline")>
                    <textarea
                        node_ref=surface.editor_ref
                        prop:value=move || surface.editor_value.get()
                        on:input=move |ev| surface.editor_value.set(event_target_value(&ev))
                    ></textarea>
                    <CustomButton caption="Save" on_action=Callback::new(move |_: ()| act(Note::save)) />
                </div>
            </div>
        </div>
    }
}

fn mount_note(notes: DomNotes, index: usize) {
    let mounted = notes
        .try_with_value(|list| {
            list.get(index)
                .and_then(|note| note.view().copied())
                .map(|surface| (list.container().clone(), surface))
        })
        .flatten();
    let Some((container, surface)) = mounted else {
        log::warn!("note {index} has no rendered view to mount");
        return;
    };
    mount_to(container, move || view! { <NoteCard notes index surface /> }).forget();
}

fn browser_document() -> Result<Document, NotepadError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or(NotepadError::NoDocument)
}

fn html_element_by_id(document: &Document, id: &str) -> Result<HtmlElement, NotepadError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| NotepadError::MissingElement(id.to_string()))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| NotepadError::NotHtmlElement(id.to_string()))
}

pub fn init_logging(level: Level) {
    // A second init (bin plus JS entry point) is harmless.
    let _ = console_log::init_with_level(level);
}

/// Mounts the configured notes and wires the "new note" button.
pub fn start(config: NotepadConfig) -> Result<(), NotepadError> {
    let document = browser_document()?;
    let container = html_element_by_id(&document, &config.container_id)?;
    let button = html_element_by_id(&document, &config.new_note_button_id)?;

    let owner = Owner::new();
    let notes: DomNotes = owner.with(|| {
        StoredValue::new_local(NoteList::from_records(
            &config.notes,
            container,
            SignalNoteView::new,
        ))
    });
    let count = notes.try_with_value(NoteList::len).unwrap_or_default();
    for index in 0..count {
        mount_note(notes, index);
    }
    log::info!("mounted {count} notes under #{}", config.container_id);

    button
        .class_list()
        .add_1("notepad-button")
        .map_err(|err| NotepadError::dom("decorate new-note button", &err))?;
    let NotepadConfig {
        prompt_message,
        new_note_content,
        ..
    } = config;
    let on_action = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        if !is_button_action(&ev) {
            return;
        }
        ev.prevent_default();
        let created = owner.with(|| {
            notes
                .try_update_value(|list| {
                    list.create_from_prompt(
                        &mut WindowPrompt,
                        &prompt_message,
                        &new_note_content,
                        SignalNoteView::new,
                    )
                })
                .flatten()
        });
        if let Some(index) = created {
            mount_note(notes, index);
        }
    });
    for event in ["click", "keydown"] {
        button
            .add_event_listener_with_callback(event, on_action.as_ref().unchecked_ref())
            .map_err(|err| NotepadError::dom("listen on new-note button", &err))?;
    }
    on_action.forget();
    Ok(())
}

/// Entry point of the binary: config from the page, console logging, start.
pub fn run() {
    console_error_panic_hook::set_once();

    let config = browser_document().and_then(|document| NotepadConfig::from_document(&document));
    let config = match config {
        Ok(config) => {
            init_logging(config.log_level);
            config
        }
        Err(err) => {
            init_logging(Level::Info);
            log::warn!("falling back to default config: {err}");
            NotepadConfig::default()
        }
    };

    if let Err(err) = start(config) {
        log::error!("notepad failed to start: {err}");
    }
}

#[wasm_bindgen(js_name = start)]
pub fn start_notepad(container_id: String, new_note_button_id: String) -> Result<(), JsValue> {
    start_with_notes_inner(container_id, new_note_button_id, None)
}

#[wasm_bindgen(js_name = startWithNotes)]
pub fn start_with_notes(
    container_id: String,
    new_note_button_id: String,
    notes: JsValue,
) -> Result<(), JsValue> {
    let notes: Vec<NoteRecord> = serde_wasm_bindgen::from_value(notes).map_err(NotepadError::from)?;
    start_with_notes_inner(container_id, new_note_button_id, Some(notes))
}

fn start_with_notes_inner(
    container_id: String,
    new_note_button_id: String,
    notes: Option<Vec<NoteRecord>>,
) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let defaults = NotepadConfig::default();
    init_logging(defaults.log_level);
    let config = NotepadConfig {
        container_id,
        new_note_button_id,
        notes: notes.unwrap_or(defaults.notes),
        ..defaults
    };
    start(config).map_err(|err| {
        log::error!("notepad failed to start: {err}");
        err.into()
    })
}
