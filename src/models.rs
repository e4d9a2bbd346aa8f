use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    Draw,
    Photo,
    Text,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Draw => "draw",
            InputMode::Photo => "photo",
            InputMode::Text => "text",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Excited,
    Cool,
    Love,
    Surprised,
    Chill,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Excited,
        Mood::Cool,
        Mood::Love,
        Mood::Surprised,
        Mood::Chill,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Excited => "excited",
            Mood::Cool => "cool",
            Mood::Love => "love",
            Mood::Surprised => "surprised",
            Mood::Chill => "chill",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SkinTone {
    Light,
    Medium,
    Dark,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    General,
    Food,
    Animals,
    Nature,
    Tech,
    People,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VariantColors {
    pub primary: String,
    pub secondary: String,
}

/// One generated candidate emoji image plus its mood/color metadata.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: String,
    pub mood: Mood,
    pub colors: VariantColors,
    pub is_animated: bool,
    pub image_data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_tone: Option<SkinTone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

/// The color/mood/skin-tone/theme selection applied to a variant before export.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    pub primary_color: String,
    pub mood: Mood,
    pub skin_tone: SkinTone,
    pub theme: Theme,
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            primary_color: "#FF6B6B".into(),
            mood: Mood::Happy,
            skin_tone: SkinTone::Medium,
            theme: Theme::General,
        }
    }
}

impl Customization {
    /// Defaults derived from a variant, falling back to the stock values for
    /// anything the variant does not carry.
    pub fn from_variant(variant: &Variant) -> Self {
        Self {
            primary_color: variant.colors.primary.clone(),
            mood: variant.mood,
            skin_tone: variant.skin_tone.unwrap_or(SkinTone::Medium),
            theme: variant.theme.unwrap_or(Theme::General),
        }
    }
}

/// A persisted, exported creation bundling the chosen variant and its final
/// customizations. `selected_variant` is an index into `variants`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub input_type: InputMode,
    pub input_data: String,
    pub variants: Vec<Variant>,
    pub selected_variant: usize,
    pub customizations: Customization,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub input_type: InputMode,
    pub input_data: String,
    pub variants: Vec<Variant>,
    pub selected_variant: usize,
    pub customizations: Customization,
}

/// Partial update merged into an existing project, field by field.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(default)]
    pub input_type: Option<InputMode>,
    #[serde(default)]
    pub input_data: Option<String>,
    #[serde(default)]
    pub variants: Option<Vec<Variant>>,
    #[serde(default)]
    pub selected_variant: Option<usize>,
    #[serde(default)]
    pub customizations: Option<Customization>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct VariantPatch {
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub colors: Option<VariantColors>,
    #[serde(default)]
    pub is_animated: Option<bool>,
    #[serde(default)]
    pub image_data: Option<String>,
    #[serde(default)]
    pub skin_tone: Option<SkinTone>,
    #[serde(default)]
    pub theme: Option<Theme>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ColorOverrides {
    #[serde(default)]
    pub primary: Option<String>,
    #[serde(default)]
    pub secondary: Option<String>,
}

/// Partial customization applied to a stored variant: color keys win
/// individually, everything else only replaces when supplied.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CustomizeRequest {
    #[serde(default)]
    pub colors: Option<ColorOverrides>,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub skin_tone: Option<SkinTone>,
    #[serde(default)]
    pub theme: Option<Theme>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub input_data: String,
    pub input_type: InputMode,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Svg,
    Gif,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ExportSize {
    #[serde(rename = "64")]
    Small,
    #[serde(rename = "128")]
    Standard,
    #[serde(rename = "256")]
    Large,
    #[serde(rename = "512")]
    ExtraLarge,
}

impl ExportSize {
    pub fn pixels(&self) -> u32 {
        match self {
            ExportSize::Small => 64,
            ExportSize::Standard => 128,
            ExportSize::Large => 256,
            ExportSize::ExtraLarge => 512,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportAction {
    Download,
    Copy,
    Share,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub size: ExportSize,
    pub action: ExportAction,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

/// Transient toast-style notification emitted by wizard transitions.
#[derive(Debug, Serialize, Clone)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { message: message.into(), severity: Severity::Success }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { message: message.into(), severity: Severity::Error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn enums_serialize_to_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&InputMode::Draw).unwrap(), "\"draw\"");
        assert_eq!(serde_json::to_string(&Mood::Surprised).unwrap(), "\"surprised\"");
        assert_eq!(serde_json::to_string(&Theme::Tech).unwrap(), "\"tech\"");
        assert_eq!(serde_json::to_string(&ExportSize::Standard).unwrap(), "\"128\"");
    }

    #[test]
    fn export_sizes_map_to_pixels() {
        assert_eq!(ExportSize::Small.pixels(), 64);
        assert_eq!(ExportSize::ExtraLarge.pixels(), 512);
    }

    #[test]
    fn customization_defaults_derive_from_variant() {
        let variant = Variant {
            id: "variant_1".into(),
            mood: Mood::Cool,
            colors: VariantColors { primary: "#339AF0".into(), secondary: "#4ECDC4".into() },
            is_animated: false,
            image_data: "data:image/svg+xml;base64,".into(),
            skin_tone: None,
            theme: Some(Theme::Animals),
        };
        let c = Customization::from_variant(&variant);
        assert_eq!(c.primary_color, "#339AF0");
        assert_eq!(c.mood, Mood::Cool);
        assert_eq!(c.skin_tone, SkinTone::Medium);
        assert_eq!(c.theme, Theme::Animals);
    }

    #[test]
    fn project_round_trips_with_camel_case_keys() {
        let json = serde_json::json!({
            "id": "1700000000000",
            "inputType": "text",
            "inputData": "happy cat + pizza time",
            "variants": [],
            "selectedVariant": 0,
            "customizations": {
                "primaryColor": "#FFE66D",
                "mood": "happy",
                "skinTone": "medium",
                "theme": "general"
            },
            "createdAt": "2024-01-01T00:00:00Z"
        });
        let project: Project = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(project.input_type, InputMode::Text);
        let back = serde_json::to_value(&project).unwrap();
        assert_eq!(back["inputType"], json["inputType"]);
        assert_eq!(back["customizations"]["skinTone"], "medium");
    }
}
