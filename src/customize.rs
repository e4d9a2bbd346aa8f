use tokio::sync::mpsc::UnboundedSender;

use crate::models::{Customization, Mood, SkinTone, Theme, Variant};

/// Preset swatches offered by the color picker.
pub const PRESET_COLORS: [&str; 8] = [
    "#FF6B6B", "#4ECDC4", "#FFE66D", "#339AF0", "#51CF66", "#FF8CC8", "#845EC2", "#FFC75F",
];

pub const SKIN_TONES: [(SkinTone, &str, &str); 3] = [
    (SkinTone::Light, "Light", "#F7D3BA"),
    (SkinTone::Medium, "Medium", "#E6A573"),
    (SkinTone::Dark, "Dark", "#A0634D"),
];

pub const THEMES: [(Theme, &str, &str); 6] = [
    (Theme::General, "General", "🙂"),
    (Theme::Food, "Food", "🍕"),
    (Theme::Animals, "Animals", "🐱"),
    (Theme::Nature, "Nature", "🌿"),
    (Theme::Tech, "Tech", "💻"),
    (Theme::People, "People", "👤"),
];

#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// Live-preview update while editing.
    Changed(Customization),
    /// Committed apply.
    Applied(Customization),
}

/// In-progress customization record for the selected variant, with a dirty
/// flag distinguishing live edits from applied state.
pub struct CustomizationPanel {
    customizations: Customization,
    baseline: Customization,
    has_changes: bool,
    events: UnboundedSender<PanelEvent>,
}

impl CustomizationPanel {
    pub fn new(variant: &Variant, events: UnboundedSender<PanelEvent>) -> Self {
        let baseline = Customization::from_variant(variant);
        Self {
            customizations: baseline.clone(),
            baseline,
            has_changes: false,
            events,
        }
    }

    pub fn customizations(&self) -> &Customization {
        &self.customizations
    }

    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    pub fn set_primary_color(&mut self, color: &str) {
        self.customizations.primary_color = color.to_string();
        self.mark_changed();
    }

    pub fn set_mood(&mut self, mood: Mood) {
        self.customizations.mood = mood;
        self.mark_changed();
    }

    pub fn set_skin_tone(&mut self, skin_tone: SkinTone) {
        self.customizations.skin_tone = skin_tone;
        self.mark_changed();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.customizations.theme = theme;
        self.mark_changed();
    }

    fn mark_changed(&mut self) {
        self.has_changes = true;
        let _ = self
            .events
            .send(PanelEvent::Changed(self.customizations.clone()));
    }

    /// Commits the current record upward and clears the dirty flag.
    pub fn apply(&mut self) -> Customization {
        self.has_changes = false;
        let _ = self
            .events
            .send(PanelEvent::Applied(self.customizations.clone()));
        self.customizations.clone()
    }

    /// Returns to the defaults derived from the variant.
    pub fn reset(&mut self) {
        self.customizations = self.baseline.clone();
        self.has_changes = false;
        let _ = self
            .events
            .send(PanelEvent::Changed(self.customizations.clone()));
    }
}
