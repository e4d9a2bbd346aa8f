use tokio::sync::mpsc::UnboundedSender;

use crate::wizard::InputEvent;

/// The fixed suggestion-chip catalog shown under the prompt field.
pub const SUGGESTIONS: [&str; 20] = [
    "happy cat",
    "coffee lover",
    "pizza time",
    "sleepy panda",
    "party emoji",
    "thumbs up",
    "heart eyes",
    "mind blown",
    "cool sunglasses",
    "crying laughing",
    "facepalm",
    "chef kiss",
    "fire emoji",
    "rainbow",
    "unicorn",
    "rocket ship",
    "dancing",
    "music notes",
    "birthday cake",
    "graduation cap",
];

/// Text prompt capture. Typed text and chip selection share one field, and a
/// chip toggle always rewrites the field from the selected chips joined with
/// " + " (chip-driven overwrite takes precedence over typed text).
pub struct TextPromptInput {
    prompt: String,
    selected: Vec<String>,
    events: UnboundedSender<InputEvent>,
}

impl TextPromptInput {
    pub fn new(events: UnboundedSender<InputEvent>) -> Self {
        Self {
            prompt: String::new(),
            selected: Vec::new(),
            events,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, suggestion: &str) -> bool {
        self.selected.iter().any(|s| s == suggestion)
    }

    /// Direct typing into the field.
    pub fn set_text(&mut self, value: &str) {
        self.prompt = value.to_string();
        self.emit();
    }

    /// Toggles a chip in or out of the ordered selection and recomposes the
    /// prompt from it.
    pub fn toggle_suggestion(&mut self, suggestion: &str) {
        if let Some(index) = self.selected.iter().position(|s| s == suggestion) {
            self.selected.remove(index);
        } else {
            self.selected.push(suggestion.to_string());
        }
        self.prompt = self.selected.join(" + ");
        self.emit();
    }

    pub fn clear_all(&mut self) {
        self.prompt.clear();
        self.selected.clear();
        self.emit();
    }

    fn emit(&self) {
        let _ = self
            .events
            .send(InputEvent::PayloadChanged(Some(self.prompt.clone())));
    }
}
