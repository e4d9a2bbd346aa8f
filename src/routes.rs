use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;

use crate::customize::{PRESET_COLORS, SKIN_TONES, THEMES};
use crate::error::ServiceError;
use crate::export::{FORMATS, SIZES};
use crate::models::{
    CustomizeRequest, ExportAction, ExportFormat, ExportSize, GenerateRequest, InputMode, Mood,
    NewProject, Notification, Project, ProjectPatch, SkinTone, Theme, Variant, VariantPatch,
};
use crate::projects::ProjectService;
use crate::prompt::SUGGESTIONS;
use crate::variants::{NewVariant, VariantService};
use crate::wizard::{Wizard, WizardSnapshot};

#[derive(Clone)]
pub struct AppState {
    pub projects: Arc<ProjectService>,
    pub variants: Arc<VariantService>,
    pub wizard: Arc<Mutex<Wizard>>,
}

// ---- project service ----

pub async fn list_projects(State(state): State<AppState>) -> Json<Vec<Project>> {
    Json(state.projects.get_all().await)
}

pub async fn get_project(Path(id): Path<String>, State(state): State<AppState>) -> Response {
    if let Some(project) = state.projects.get_by_id(&id).await {
        Json(project).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

pub async fn create_project(
    State(state): State<AppState>,
    Json(body): Json<NewProject>,
) -> (StatusCode, Json<Project>) {
    (StatusCode::CREATED, Json(state.projects.create(body).await))
}

pub async fn update_project(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<ProjectPatch>,
) -> Result<Json<Project>, ServiceError> {
    Ok(Json(state.projects.update(&id, body).await?))
}

pub async fn delete_project(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ServiceError> {
    state.projects.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn generate_variants(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Json<Vec<Variant>> {
    Json(
        state
            .projects
            .generate_variants(&body.input_data, body.input_type)
            .await,
    )
}

// ---- variant service ----

pub async fn list_variants(State(state): State<AppState>) -> Json<Vec<Variant>> {
    Json(state.variants.get_all().await)
}

pub async fn get_variant(Path(id): Path<String>, State(state): State<AppState>) -> Response {
    if let Some(variant) = state.variants.get_by_id(&id).await {
        Json(variant).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

pub async fn create_variant(
    State(state): State<AppState>,
    Json(body): Json<NewVariant>,
) -> (StatusCode, Json<Variant>) {
    (StatusCode::CREATED, Json(state.variants.create(body).await))
}

pub async fn update_variant(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<VariantPatch>,
) -> Result<Json<Variant>, ServiceError> {
    Ok(Json(state.variants.update(&id, body).await?))
}

pub async fn delete_variant(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ServiceError> {
    state.variants.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn customize_variant(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<CustomizeRequest>,
) -> Result<Json<Variant>, ServiceError> {
    Ok(Json(state.variants.customize_variant(&id, body).await?))
}

// ---- wizard ----

#[derive(Debug, Deserialize)]
pub struct SelectModeBody {
    pub mode: InputMode,
}

#[derive(Debug, Deserialize)]
pub struct InputBody {
    pub payload: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PromptTextBody {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct PromptToggleBody {
    pub suggestion: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoBody {
    pub file_name: String,
    pub mime_type: String,
    /// Raw file bytes, base64-encoded.
    pub data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelBody {
    #[serde(default)]
    pub primary_color: Option<String>,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub skin_tone: Option<SkinTone>,
    #[serde(default)]
    pub theme: Option<Theme>,
}

#[derive(Debug, Deserialize)]
pub struct ExportConfigBody {
    #[serde(default)]
    pub format: Option<ExportFormat>,
    #[serde(default)]
    pub size: Option<ExportSize>,
}

#[derive(Debug, Deserialize)]
pub struct ExportRunBody {
    pub action: ExportAction,
}

pub async fn wizard_state(State(state): State<AppState>) -> Json<WizardSnapshot> {
    Json(state.wizard.lock().await.snapshot())
}

pub async fn wizard_select_mode(
    State(state): State<AppState>,
    Json(body): Json<SelectModeBody>,
) -> Json<WizardSnapshot> {
    let mut wizard = state.wizard.lock().await;
    wizard.select_mode(body.mode);
    Json(wizard.snapshot())
}

pub async fn wizard_input(
    State(state): State<AppState>,
    Json(body): Json<InputBody>,
) -> Json<WizardSnapshot> {
    let mut wizard = state.wizard.lock().await;
    wizard.set_input(body.payload);
    Json(wizard.snapshot())
}

pub async fn wizard_prompt_text(
    State(state): State<AppState>,
    Json(body): Json<PromptTextBody>,
) -> Result<Json<WizardSnapshot>, ServiceError> {
    let mut wizard = state.wizard.lock().await;
    wizard
        .prompt_mut()
        .ok_or_else(|| ServiceError::InvalidInput("text mode is not active".into()))?
        .set_text(&body.text);
    wizard.pump();
    Ok(Json(wizard.snapshot()))
}

pub async fn wizard_prompt_toggle(
    State(state): State<AppState>,
    Json(body): Json<PromptToggleBody>,
) -> Result<Json<WizardSnapshot>, ServiceError> {
    let mut wizard = state.wizard.lock().await;
    wizard
        .prompt_mut()
        .ok_or_else(|| ServiceError::InvalidInput("text mode is not active".into()))?
        .toggle_suggestion(&body.suggestion);
    wizard.pump();
    Ok(Json(wizard.snapshot()))
}

pub async fn wizard_prompt_clear(
    State(state): State<AppState>,
) -> Result<Json<WizardSnapshot>, ServiceError> {
    let mut wizard = state.wizard.lock().await;
    wizard
        .prompt_mut()
        .ok_or_else(|| ServiceError::InvalidInput("text mode is not active".into()))?
        .clear_all();
    wizard.pump();
    Ok(Json(wizard.snapshot()))
}

pub async fn wizard_photo(
    State(state): State<AppState>,
    Json(body): Json<PhotoBody>,
) -> Result<Json<WizardSnapshot>, ServiceError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&body.data)
        .map_err(|e| ServiceError::InvalidInput(format!("invalid base64 payload: {}", e)))?;
    let mut wizard = state.wizard.lock().await;
    wizard
        .photo_mut()
        .ok_or_else(|| ServiceError::InvalidInput("photo mode is not active".into()))?
        .accept_file(&body.file_name, &body.mime_type, &bytes)
        .map_err(|e| ServiceError::InvalidInput(e.to_string()))?;
    wizard.pump();
    Ok(Json(wizard.snapshot()))
}

pub async fn wizard_photo_remove(
    State(state): State<AppState>,
) -> Result<Json<WizardSnapshot>, ServiceError> {
    let mut wizard = state.wizard.lock().await;
    wizard
        .photo_mut()
        .ok_or_else(|| ServiceError::InvalidInput("photo mode is not active".into()))?
        .remove();
    wizard.pump();
    Ok(Json(wizard.snapshot()))
}

pub async fn wizard_generate(
    State(state): State<AppState>,
) -> Result<Json<WizardSnapshot>, ServiceError> {
    let mut wizard = state.wizard.lock().await;
    wizard.generate().await?;
    Ok(Json(wizard.snapshot()))
}

pub async fn wizard_back(State(state): State<AppState>) -> Json<WizardSnapshot> {
    let mut wizard = state.wizard.lock().await;
    wizard.back();
    Json(wizard.snapshot())
}

pub async fn wizard_start_over(State(state): State<AppState>) -> Json<WizardSnapshot> {
    let mut wizard = state.wizard.lock().await;
    wizard.start_over();
    Json(wizard.snapshot())
}

pub async fn wizard_select_variant(
    Path(index): Path<usize>,
    State(state): State<AppState>,
) -> Result<Json<WizardSnapshot>, ServiceError> {
    let mut wizard = state.wizard.lock().await;
    wizard.select_variant(index)?;
    Ok(Json(wizard.snapshot()))
}

pub async fn wizard_customize(
    State(state): State<AppState>,
    Json(body): Json<PanelBody>,
) -> Result<Json<WizardSnapshot>, ServiceError> {
    let mut wizard = state.wizard.lock().await;
    let panel = wizard
        .panel_mut()
        .ok_or_else(|| ServiceError::InvalidInput("no variant selected".into()))?;
    if let Some(color) = body.primary_color {
        panel.set_primary_color(&color);
    }
    if let Some(mood) = body.mood {
        panel.set_mood(mood);
    }
    if let Some(skin_tone) = body.skin_tone {
        panel.set_skin_tone(skin_tone);
    }
    if let Some(theme) = body.theme {
        panel.set_theme(theme);
    }
    wizard.pump();
    Ok(Json(wizard.snapshot()))
}

pub async fn wizard_customize_reset(
    State(state): State<AppState>,
) -> Result<Json<WizardSnapshot>, ServiceError> {
    let mut wizard = state.wizard.lock().await;
    wizard
        .panel_mut()
        .ok_or_else(|| ServiceError::InvalidInput("no variant selected".into()))?
        .reset();
    wizard.pump();
    Ok(Json(wizard.snapshot()))
}

pub async fn wizard_apply(
    State(state): State<AppState>,
) -> Result<Json<WizardSnapshot>, ServiceError> {
    let mut wizard = state.wizard.lock().await;
    wizard.apply_customizations().await?;
    Ok(Json(wizard.snapshot()))
}

pub async fn wizard_export_open(
    State(state): State<AppState>,
) -> Result<Json<WizardSnapshot>, ServiceError> {
    let mut wizard = state.wizard.lock().await;
    wizard.open_export()?;
    Ok(Json(wizard.snapshot()))
}

pub async fn wizard_export_close(State(state): State<AppState>) -> Json<WizardSnapshot> {
    let mut wizard = state.wizard.lock().await;
    wizard.close_export();
    Json(wizard.snapshot())
}

pub async fn wizard_export_config(
    State(state): State<AppState>,
    Json(body): Json<ExportConfigBody>,
) -> Result<Json<WizardSnapshot>, ServiceError> {
    let mut wizard = state.wizard.lock().await;
    let modal = wizard
        .export_modal_mut()
        .ok_or_else(|| ServiceError::InvalidInput("export overlay is not open".into()))?;
    if let Some(format) = body.format {
        modal.set_format(format)?;
    }
    if let Some(size) = body.size {
        modal.set_size(size);
    }
    Ok(Json(wizard.snapshot()))
}

pub async fn wizard_export_run(
    State(state): State<AppState>,
    Json(body): Json<ExportRunBody>,
) -> Result<Json<Project>, ServiceError> {
    let mut wizard = state.wizard.lock().await;
    let project = wizard.export(body.action).await?;
    Ok(Json(project))
}

pub async fn wizard_load_project(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Response {
    let mut wizard = state.wizard.lock().await;
    if wizard.load_project(&id).await {
        Json(wizard.snapshot()).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

pub async fn wizard_notifications(State(state): State<AppState>) -> Json<Vec<Notification>> {
    Json(state.wizard.lock().await.take_notifications())
}

/// Static catalogs the UI renders: suggestion chips, preset colors, skin
/// tones, themes, export formats and sizes.
pub async fn catalog() -> Json<serde_json::Value> {
    Json(json!({
        "suggestions": SUGGESTIONS,
        "presetColors": PRESET_COLORS,
        "skinTones": SKIN_TONES
            .iter()
            .map(|(tone, label, color)| json!({ "id": tone, "label": label, "color": color }))
            .collect::<Vec<_>>(),
        "themes": THEMES
            .iter()
            .map(|(theme, label, icon)| json!({ "id": theme, "label": label, "icon": icon }))
            .collect::<Vec<_>>(),
        "formats": FORMATS
            .iter()
            .map(|(format, label, description)| {
                json!({ "id": format, "label": label, "description": description })
            })
            .collect::<Vec<_>>(),
        "sizes": SIZES
            .iter()
            .map(|(size, label, description)| {
                json!({ "id": size, "label": label, "description": description })
            })
            .collect::<Vec<_>>(),
    }))
}
