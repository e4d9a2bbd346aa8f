use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::sleep;
use tracing::info;

use crate::canvas::DrawingCanvas;
use crate::customize::{CustomizationPanel, PanelEvent};
use crate::error::ServiceError;
use crate::export::{action_message, ExportModal};
use crate::models::{
    Customization, ExportAction, InputMode, NewProject, Notification, Project, Variant,
};
use crate::photo::PhotoUploader;
use crate::projects::{preview, ProjectService};
use crate::prompt::TextPromptInput;

const APPLY_DELAY: Duration = Duration::from_millis(500);
const RECENT_LIMIT: usize = 5;

/// Message sent upward by an input-capture component when its payload
/// changes. `None` means the input was cleared.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PayloadChanged(Option<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    ModeSelect,
    Input,
    Customize,
}

/// The active input-capture component for the selected mode.
pub enum InputCapture {
    Draw(DrawingCanvas),
    Photo(PhotoUploader),
    Text(TextPromptInput),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    pub step: WizardStep,
    pub mode: Option<InputMode>,
    pub input_data: Option<String>,
    pub variants: Vec<Variant>,
    pub selected_variant: usize,
    pub customizations: Customization,
    pub can_generate: bool,
    pub generating: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub export_open: bool,
    pub recent_projects: Vec<Project>,
}

/// The creation-flow coordinator: owns the step state machine, all
/// transitional data, the active input component and customization panel,
/// and the notification queue. State flows up from components only through
/// their event channels; everything else is owned here.
pub struct Wizard {
    projects: Arc<ProjectService>,
    step: WizardStep,
    mode: Option<InputMode>,
    input: Option<InputCapture>,
    input_rx: Option<UnboundedReceiver<InputEvent>>,
    panel: Option<CustomizationPanel>,
    panel_rx: Option<UnboundedReceiver<PanelEvent>>,
    input_data: Option<String>,
    variants: Vec<Variant>,
    selected_variant: usize,
    customizations: Customization,
    export_modal: Option<ExportModal>,
    recent_projects: Vec<Project>,
    loading: bool,
    generating: bool,
    error: Option<String>,
    notifications: VecDeque<Notification>,
}

impl Wizard {
    pub fn new(projects: Arc<ProjectService>) -> Self {
        Self {
            projects,
            step: WizardStep::ModeSelect,
            mode: None,
            input: None,
            input_rx: None,
            panel: None,
            panel_rx: None,
            input_data: None,
            variants: Vec::new(),
            selected_variant: 0,
            customizations: Customization::default(),
            export_modal: None,
            recent_projects: Vec::new(),
            loading: false,
            generating: false,
            error: None,
            notifications: VecDeque::new(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn mode(&self) -> Option<InputMode> {
        self.mode
    }

    pub fn input_data(&self) -> Option<&str> {
        self.input_data.as_deref()
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn selected_variant_index(&self) -> usize {
        self.selected_variant
    }

    pub fn selected_variant(&self) -> Option<&Variant> {
        self.variants.get(self.selected_variant)
    }

    pub fn customizations(&self) -> &Customization {
        &self.customizations
    }

    pub fn recent_projects(&self) -> &[Project] {
        &self.recent_projects
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn is_export_open(&self) -> bool {
        self.export_modal.is_some()
    }

    pub fn canvas_mut(&mut self) -> Option<&mut DrawingCanvas> {
        match self.input.as_mut() {
            Some(InputCapture::Draw(canvas)) => Some(canvas),
            _ => None,
        }
    }

    pub fn photo_mut(&mut self) -> Option<&mut PhotoUploader> {
        match self.input.as_mut() {
            Some(InputCapture::Photo(uploader)) => Some(uploader),
            _ => None,
        }
    }

    pub fn prompt_mut(&mut self) -> Option<&mut TextPromptInput> {
        match self.input.as_mut() {
            Some(InputCapture::Text(prompt)) => Some(prompt),
            _ => None,
        }
    }

    pub fn export_modal_mut(&mut self) -> Option<&mut ExportModal> {
        self.export_modal.as_mut()
    }

    pub fn panel_mut(&mut self) -> Option<&mut CustomizationPanel> {
        self.panel.as_mut()
    }

    /// Drains component event channels into wizard state. Call after driving
    /// a component directly.
    pub fn pump(&mut self) {
        if let Some(rx) = &mut self.input_rx {
            while let Ok(InputEvent::PayloadChanged(payload)) = rx.try_recv() {
                self.input_data = payload;
            }
        }
        if let Some(rx) = &mut self.panel_rx {
            while let Ok(event) = rx.try_recv() {
                match event {
                    PanelEvent::Changed(c) | PanelEvent::Applied(c) => {
                        self.customizations = c;
                    }
                }
            }
        }
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
    }

    /// Startup (and post-export) refresh of the recent-creations list.
    pub async fn load_recent_projects(&mut self) {
        self.loading = true;
        self.error = None;
        let projects = self.projects.get_all().await;
        self.recent_projects = projects.into_iter().take(RECENT_LIMIT).collect();
        self.loading = false;
    }

    /// mode-select -> input.
    pub fn select_mode(&mut self, mode: InputMode) {
        let (tx, rx) = mpsc::unbounded_channel();
        self.input = Some(match mode {
            InputMode::Draw => InputCapture::Draw(DrawingCanvas::new(tx)),
            InputMode::Photo => InputCapture::Photo(PhotoUploader::new(tx)),
            InputMode::Text => InputCapture::Text(TextPromptInput::new(tx)),
        });
        self.input_rx = Some(rx);
        self.input_data = None;
        self.mode = Some(mode);
        self.step = WizardStep::Input;
        self.error = None;
        info!("➡️ Entered input step ({})", mode.as_str());
    }

    /// Direct payload injection, for callers that bypass the capture
    /// components (e.g. the HTTP facade for draw payloads).
    pub fn set_input(&mut self, payload: Option<String>) {
        self.input_data = payload;
    }

    pub fn can_generate(&self) -> bool {
        let Some(data) = &self.input_data else {
            return false;
        };
        if data.is_empty() {
            return false;
        }
        if self.mode == Some(InputMode::Text) && data.trim().len() < 3 {
            return false;
        }
        true
    }

    /// input -> customize, guarded by `can_generate`. On failure the wizard
    /// stays on the input step with a transient notification.
    pub async fn generate(&mut self) -> Result<(), ServiceError> {
        self.pump();
        if self.step != WizardStep::Input {
            return Err(ServiceError::InvalidInput("not on the input step".into()));
        }
        if !self.can_generate() {
            // A present-but-too-short prompt gets its own message; the
            // generic toast is for missing input only.
            if self.input_data.as_deref().map_or(true, |d| d.trim().is_empty()) {
                self.notify(Notification::error("Please provide input data first"));
            } else {
                self.notify(Notification::error("Please enter a longer prompt"));
            }
            return Err(ServiceError::InvalidInput(
                "input payload is missing or too short".into(),
            ));
        }

        self.generating = true;
        self.error = None;
        let data = self.input_data.clone().unwrap_or_default();
        let mode = self.mode.expect("mode set on the input step");
        info!("✨ Generating from {} input: {}", mode.as_str(), preview(&data));

        let variants = self.projects.generate_variants(&data, mode).await;
        let count = variants.len();
        self.variants = variants;
        self.select_index(0);
        self.step = WizardStep::Customize;
        self.generating = false;
        self.notify(Notification::success(format!(
            "Generated {} amazing emoji variants!",
            count
        )));
        Ok(())
    }

    /// input -> mode-select. Discards all transitional state.
    pub fn back(&mut self) {
        self.start_over();
    }

    /// Full reset to mode-select from anywhere.
    pub fn start_over(&mut self) {
        self.step = WizardStep::ModeSelect;
        self.mode = None;
        self.input = None;
        self.input_rx = None;
        self.panel = None;
        self.panel_rx = None;
        self.input_data = None;
        self.variants.clear();
        self.selected_variant = 0;
        self.customizations = Customization::default();
        self.export_modal = None;
        self.generating = false;
        self.error = None;
    }

    /// Variant selection on the customize step; re-derives the panel
    /// defaults for the newly selected variant.
    pub fn select_variant(&mut self, index: usize) -> Result<(), ServiceError> {
        if self.step != WizardStep::Customize {
            return Err(ServiceError::InvalidInput("not on the customize step".into()));
        }
        if index >= self.variants.len() {
            return Err(ServiceError::InvalidInput(format!(
                "variant index {} out of range ({} variants)",
                index,
                self.variants.len()
            )));
        }
        self.select_index(index);
        let mood = self.variants[index].mood;
        self.notify(Notification::success(format!("Selected {} variant!", mood.as_str())));
        Ok(())
    }

    fn select_index(&mut self, index: usize) {
        self.selected_variant = index;
        if let Some(variant) = self.variants.get(index) {
            let (tx, rx) = mpsc::unbounded_channel();
            let panel = CustomizationPanel::new(variant, tx);
            self.customizations = panel.customizations().clone();
            self.panel = Some(panel);
            self.panel_rx = Some(rx);
        }
    }

    /// Commits the panel's in-progress record after the simulated apply
    /// latency.
    pub async fn apply_customizations(&mut self) -> Result<Customization, ServiceError> {
        if self.step != WizardStep::Customize {
            return Err(ServiceError::InvalidInput("not on the customize step".into()));
        }
        let Some(panel) = self.panel.as_mut() else {
            return Err(ServiceError::InvalidInput("no variant selected".into()));
        };
        self.loading = true;
        sleep(APPLY_DELAY).await;
        let applied = panel.apply();
        self.customizations = applied.clone();
        self.notify(Notification::success("Customizations applied!"));
        self.loading = false;
        Ok(applied)
    }

    /// Opens the export overlay; only reachable from customize with a
    /// selected variant.
    pub fn open_export(&mut self) -> Result<(), ServiceError> {
        if self.step != WizardStep::Customize {
            return Err(ServiceError::InvalidInput("not on the customize step".into()));
        }
        let Some(variant) = self.selected_variant() else {
            return Err(ServiceError::InvalidInput("no variant selected".into()));
        };
        self.export_modal = Some(ExportModal::new(variant));
        Ok(())
    }

    /// Closes the overlay back to customize without exporting.
    pub fn close_export(&mut self) {
        self.export_modal = None;
    }

    /// Runs the export, persists a project, refreshes the recent list and
    /// resets to mode-select (an implicit start-over).
    pub async fn export(&mut self, action: ExportAction) -> Result<Project, ServiceError> {
        self.pump();
        let Some(modal) = self.export_modal.as_mut() else {
            return Err(ServiceError::InvalidInput("export overlay is not open".into()));
        };
        let mode = self.mode.ok_or_else(|| {
            ServiceError::InvalidInput("no input mode selected".into())
        })?;

        let request = modal.run(action).await;

        let project = self
            .projects
            .create(NewProject {
                input_type: mode,
                input_data: self.input_data.clone().unwrap_or_default(),
                variants: self.variants.clone(),
                selected_variant: self.selected_variant,
                customizations: self.customizations.clone(),
            })
            .await;

        self.load_recent_projects().await;
        self.notify(Notification::success(action_message(request.action)));
        self.notify(Notification::success("Project saved and exported successfully!"));
        self.start_over();
        Ok(project)
    }

    /// mode-select -> customize, rehydrating from a stored project and
    /// bypassing generation. Returns false when the id is unknown (absence
    /// is not an error) or the stored record has nothing to select.
    pub async fn load_project(&mut self, id: &str) -> bool {
        self.loading = true;
        let project = self.projects.get_by_id(id).await;
        let loaded = match project {
            Some(project) if !project.variants.is_empty() => {
                // Stored index is trusted when valid, clamped to the first
                // variant otherwise.
                let index = if project.selected_variant < project.variants.len() {
                    project.selected_variant
                } else {
                    0
                };
                self.mode = Some(project.input_type);
                self.input_data = Some(project.input_data.clone());
                self.variants = project.variants.clone();
                self.select_index(index);
                self.customizations = project.customizations.clone();
                self.step = WizardStep::Customize;
                self.notify(Notification::success("Project loaded successfully!"));
                true
            }
            Some(_) => {
                self.notify(Notification::error("Failed to load project"));
                false
            }
            None => false,
        };
        self.loading = false;
        loaded
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            step: self.step,
            mode: self.mode,
            input_data: self.input_data.clone(),
            variants: self.variants.clone(),
            selected_variant: self.selected_variant,
            customizations: self.customizations.clone(),
            can_generate: self.can_generate(),
            generating: self.generating,
            loading: self.loading,
            error: self.error.clone(),
            export_open: self.export_modal.is_some(),
            recent_projects: self.recent_projects.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExportFormat, ExportSize, Mood, Severity, SkinTone, VariantColors};
    use crate::projects::MOCK_IMAGE_DATA;
    use pretty_assertions::assert_eq;

    fn wizard() -> Wizard {
        Wizard::new(Arc::new(ProjectService::new()))
    }

    fn stored_variant(id: &str, mood: Mood) -> Variant {
        Variant {
            id: id.into(),
            mood,
            colors: VariantColors { primary: "#339AF0".into(), secondary: "#4ECDC4".into() },
            is_animated: false,
            image_data: MOCK_IMAGE_DATA.into(),
            skin_tone: None,
            theme: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn starts_on_mode_select_with_recent_projects() {
        let mut wizard = wizard();
        wizard.load_recent_projects().await;
        assert_eq!(wizard.step(), WizardStep::ModeSelect);
        assert!(!wizard.recent_projects().is_empty());
        assert!(wizard.recent_projects().len() <= 5);
    }

    #[tokio::test(start_paused = true)]
    async fn select_mode_moves_to_input_and_clears_errors() {
        let mut wizard = wizard();
        wizard.select_mode(InputMode::Text);
        assert_eq!(wizard.step(), WizardStep::Input);
        assert_eq!(wizard.mode(), Some(InputMode::Text));
        assert!(wizard.error().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn can_generate_enforces_the_text_length_guard() {
        let mut wizard = wizard();
        wizard.select_mode(InputMode::Text);
        assert!(!wizard.can_generate());

        wizard.prompt_mut().unwrap().set_text("hi");
        wizard.pump();
        assert!(!wizard.can_generate());

        wizard.prompt_mut().unwrap().set_text("cat");
        wizard.pump();
        assert!(wizard.can_generate());

        wizard.prompt_mut().unwrap().set_text("   ");
        wizard.pump();
        assert!(!wizard.can_generate());
    }

    #[tokio::test(start_paused = true)]
    async fn generate_without_input_stays_on_input_with_a_toast() {
        let mut wizard = wizard();
        wizard.select_mode(InputMode::Text);
        assert!(wizard.generate().await.is_err());
        assert_eq!(wizard.step(), WizardStep::Input);
        let notes = wizard.take_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].severity, Severity::Error);
        assert_eq!(notes[0].message, "Please provide input data first");
    }

    #[tokio::test(start_paused = true)]
    async fn short_prompt_gets_its_own_guard_toast() {
        let mut wizard = wizard();
        wizard.select_mode(InputMode::Text);
        wizard.prompt_mut().unwrap().set_text("hi");
        assert!(wizard.generate().await.is_err());
        assert_eq!(wizard.step(), WizardStep::Input);
        let notes = wizard.take_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].severity, Severity::Error);
        assert_eq!(notes[0].message, "Please enter a longer prompt");
    }

    #[tokio::test(start_paused = true)]
    async fn generate_handles_long_multibyte_prompts() {
        let mut wizard = wizard();
        wizard.select_mode(InputMode::Text);
        wizard.prompt_mut().unwrap().set_text(&"日本の絵文字".repeat(12));
        wizard.generate().await.unwrap();
        assert_eq!(wizard.step(), WizardStep::Customize);
    }

    #[tokio::test(start_paused = true)]
    async fn generate_populates_variants_and_selects_the_first() {
        let mut wizard = wizard();
        wizard.select_mode(InputMode::Text);
        wizard.prompt_mut().unwrap().toggle_suggestion("happy cat");
        wizard.generate().await.unwrap();

        assert_eq!(wizard.step(), WizardStep::Customize);
        assert!((4..=6).contains(&wizard.variants().len()));
        assert_eq!(wizard.selected_variant_index(), 0);
        assert!(!wizard.is_generating());
        // Panel defaults derive from the first variant.
        assert_eq!(wizard.customizations().mood, wizard.variants()[0].mood);
    }

    #[tokio::test(start_paused = true)]
    async fn draw_mode_payload_flows_from_the_canvas() {
        let mut wizard = wizard();
        wizard.select_mode(InputMode::Draw);
        let canvas = wizard.canvas_mut().unwrap();
        assert_eq!(canvas.tool(), crate::canvas::Tool::Pen);
        canvas.pointer_down(10.0, 10.0);
        canvas.pointer_move(30.0, 30.0);
        canvas.pointer_up();
        wizard.pump();
        assert!(wizard.can_generate());
        assert!(wizard
            .input_data()
            .unwrap()
            .starts_with("data:image/png;base64,"));

        wizard.canvas_mut().unwrap().clear();
        wizard.pump();
        assert!(!wizard.can_generate());
    }

    #[tokio::test(start_paused = true)]
    async fn back_from_input_is_a_full_reset() {
        let mut wizard = wizard();
        wizard.select_mode(InputMode::Text);
        wizard.prompt_mut().unwrap().set_text("rocket ship");
        wizard.pump();
        wizard.back();
        assert_eq!(wizard.step(), WizardStep::ModeSelect);
        assert_eq!(wizard.mode(), None);
        assert_eq!(wizard.input_data(), None);
        assert!(wizard.variants().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn selecting_a_variant_rederives_customization_defaults() {
        let mut wizard = wizard();
        wizard.select_mode(InputMode::Text);
        wizard.prompt_mut().unwrap().set_text("sleepy panda");
        wizard.generate().await.unwrap();

        wizard.select_variant(1).unwrap();
        assert_eq!(wizard.selected_variant_index(), 1);
        assert_eq!(wizard.customizations().mood, Mood::Excited);
        assert_eq!(wizard.customizations().primary_color, "#4ECDC4");

        assert!(wizard.select_variant(99).is_err());
        assert_eq!(wizard.selected_variant_index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn panel_edits_flow_up_through_the_channel() {
        let mut wizard = wizard();
        wizard.select_mode(InputMode::Text);
        wizard.prompt_mut().unwrap().set_text("chef kiss");
        wizard.generate().await.unwrap();

        wizard.panel_mut().unwrap().set_skin_tone(SkinTone::Dark);
        wizard.pump();
        assert_eq!(wizard.customizations().skin_tone, SkinTone::Dark);

        let applied = wizard.apply_customizations().await.unwrap();
        assert_eq!(applied.skin_tone, SkinTone::Dark);
        assert!(!wizard.panel_mut().unwrap().has_changes());
    }

    #[tokio::test(start_paused = true)]
    async fn export_overlay_only_opens_from_customize() {
        let mut wizard = wizard();
        assert!(wizard.open_export().is_err());

        wizard.select_mode(InputMode::Text);
        wizard.prompt_mut().unwrap().set_text("mind blown");
        assert!(wizard.open_export().is_err());

        wizard.generate().await.unwrap();
        wizard.open_export().unwrap();
        assert!(wizard.is_export_open());

        wizard.close_export();
        assert!(!wizard.is_export_open());
        assert_eq!(wizard.step(), WizardStep::Customize);
    }

    #[tokio::test(start_paused = true)]
    async fn end_to_end_text_flow_persists_one_project_and_resets() {
        let projects = Arc::new(ProjectService::new());
        let before = projects.get_all().await.len();

        let mut wizard = Wizard::new(projects.clone());
        wizard.select_mode(InputMode::Text);
        wizard.prompt_mut().unwrap().set_text("happy cat");
        wizard.generate().await.unwrap();
        wizard.select_variant(0).unwrap();
        wizard.apply_customizations().await.unwrap();
        wizard.open_export().unwrap();

        let modal = wizard.export_modal_mut().unwrap();
        modal.set_format(ExportFormat::Png).unwrap();
        modal.set_size(ExportSize::Standard);
        let project = wizard.export(ExportAction::Download).await.unwrap();

        assert_eq!(project.input_type, InputMode::Text);
        assert_eq!(project.input_data, "happy cat");
        assert_eq!(project.selected_variant, 0);

        let all = projects.get_all().await;
        assert_eq!(all.len(), before + 1);
        assert_eq!(all[0].id, project.id);

        assert_eq!(wizard.step(), WizardStep::ModeSelect);
        assert!(wizard.variants().is_empty());
        assert!(!wizard.is_export_open());
        // Recent list was refreshed with the new project on top.
        assert_eq!(wizard.recent_projects()[0].id, project.id);
    }

    #[tokio::test(start_paused = true)]
    async fn load_project_rehydrates_directly_into_customize() {
        let mut wizard = wizard();
        wizard.load_recent_projects().await;
        let id = wizard.recent_projects()[0].id.clone();

        assert!(wizard.load_project(&id).await);
        assert_eq!(wizard.step(), WizardStep::Customize);
        assert_eq!(wizard.mode(), Some(InputMode::Text));
        assert!(!wizard.variants().is_empty());
        // Stored customizations win over panel defaults.
        assert_eq!(wizard.customizations().theme, crate::models::Theme::Animals);
    }

    #[tokio::test(start_paused = true)]
    async fn load_project_refuses_a_record_with_no_variants() {
        let projects = Arc::new(ProjectService::new());
        let stored = projects
            .create(NewProject {
                input_type: InputMode::Text,
                input_data: "ghost".into(),
                variants: Vec::new(),
                selected_variant: 0,
                customizations: Customization::default(),
            })
            .await;

        let mut wizard = Wizard::new(projects);
        assert!(!wizard.load_project(&stored.id).await);
        assert_eq!(wizard.step(), WizardStep::ModeSelect);
        assert!(wizard.variants().is_empty());
        let notes = wizard.take_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].severity, Severity::Error);
        assert_eq!(notes[0].message, "Failed to load project");
    }

    #[tokio::test(start_paused = true)]
    async fn load_project_clamps_a_stale_selected_index() {
        let projects = Arc::new(ProjectService::new());
        let stored = projects
            .create(NewProject {
                input_type: InputMode::Draw,
                input_data: "data:image/png;base64,AAAA".into(),
                variants: vec![stored_variant("variant_1", Mood::Cool)],
                selected_variant: 7,
                customizations: Customization::default(),
            })
            .await;

        let mut wizard = Wizard::new(projects);
        assert!(wizard.load_project(&stored.id).await);
        assert_eq!(wizard.step(), WizardStep::Customize);
        assert_eq!(wizard.selected_variant_index(), 0);
        assert_eq!(wizard.selected_variant().unwrap().mood, Mood::Cool);
    }

    #[tokio::test(start_paused = true)]
    async fn load_project_with_unknown_id_changes_nothing() {
        let mut wizard = wizard();
        assert!(!wizard.load_project("missing").await);
        assert_eq!(wizard.step(), WizardStep::ModeSelect);
        assert!(wizard.take_notifications().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn gif_export_is_rejected_for_still_variants() {
        let mut wizard = wizard();
        wizard.select_mode(InputMode::Text);
        wizard.prompt_mut().unwrap().set_text("cool sunglasses");
        wizard.generate().await.unwrap();
        // First catalog variant is the still happy one.
        wizard.select_variant(0).unwrap();
        wizard.open_export().unwrap();
        assert!(wizard
            .export_modal_mut()
            .unwrap()
            .set_format(ExportFormat::Gif)
            .is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn snapshot_reflects_wizard_state() {
        let mut wizard = wizard();
        wizard.select_mode(InputMode::Draw);
        let snapshot = wizard.snapshot();
        assert_eq!(snapshot.step, WizardStep::Input);
        assert_eq!(snapshot.mode, Some(InputMode::Draw));
        assert!(!snapshot.can_generate);
        assert!(!snapshot.export_open);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["step"], "input");
    }
}
