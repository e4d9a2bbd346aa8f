use std::time::Duration;

use chrono::Utc;
use parking_lot::RwLock;
use tokio::time::sleep;

use crate::error::ServiceError;
use crate::models::{CustomizeRequest, Variant, VariantPatch};

const SEED_VARIANTS: &str = include_str!("mockdata/emoji_variants.json");

const GET_ALL_DELAY: Duration = Duration::from_millis(200);
const GET_BY_ID_DELAY: Duration = Duration::from_millis(150);
const CREATE_DELAY: Duration = Duration::from_millis(300);
const UPDATE_DELAY: Duration = Duration::from_millis(250);
const DELETE_DELAY: Duration = Duration::from_millis(200);
const CUSTOMIZE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVariant {
    pub mood: crate::models::Mood,
    pub colors: crate::models::VariantColors,
    pub is_animated: bool,
    pub image_data: String,
    #[serde(default)]
    pub skin_tone: Option<crate::models::SkinTone>,
    #[serde(default)]
    pub theme: Option<crate::models::Theme>,
}

/// In-memory variant store, seeded with the canonical six. Same latency and
/// copy-at-the-boundary contract as the project service.
pub struct VariantService {
    data: RwLock<Vec<Variant>>,
}

impl VariantService {
    pub fn new() -> Self {
        let seeded: Vec<Variant> =
            serde_json::from_str(SEED_VARIANTS).expect("invalid emoji_variants.json seed");
        Self { data: RwLock::new(seeded) }
    }

    pub async fn get_all(&self) -> Vec<Variant> {
        sleep(GET_ALL_DELAY).await;
        self.data.read().clone()
    }

    pub async fn get_by_id(&self, id: &str) -> Option<Variant> {
        sleep(GET_BY_ID_DELAY).await;
        self.data.read().iter().find(|v| v.id == id).cloned()
    }

    /// Appends, unlike project creation which prepends.
    pub async fn create(&self, variant: NewVariant) -> Variant {
        sleep(CREATE_DELAY).await;
        let record = Variant {
            id: Utc::now().timestamp_millis().to_string(),
            mood: variant.mood,
            colors: variant.colors,
            is_animated: variant.is_animated,
            image_data: variant.image_data,
            skin_tone: variant.skin_tone,
            theme: variant.theme,
        };
        self.data.write().push(record.clone());
        record
    }

    pub async fn update(&self, id: &str, patch: VariantPatch) -> Result<Variant, ServiceError> {
        sleep(UPDATE_DELAY).await;
        let mut guard = self.data.write();
        let record = guard
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(ServiceError::VariantNotFound)?;
        if let Some(mood) = patch.mood {
            record.mood = mood;
        }
        if let Some(colors) = patch.colors {
            record.colors = colors;
        }
        if let Some(animated) = patch.is_animated {
            record.is_animated = animated;
        }
        if let Some(image_data) = patch.image_data {
            record.image_data = image_data;
        }
        if let Some(skin_tone) = patch.skin_tone {
            record.skin_tone = Some(skin_tone);
        }
        if let Some(theme) = patch.theme {
            record.theme = Some(theme);
        }
        Ok(record.clone())
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        sleep(DELETE_DELAY).await;
        let mut guard = self.data.write();
        let index = guard
            .iter()
            .position(|v| v.id == id)
            .ok_or(ServiceError::VariantNotFound)?;
        guard.remove(index);
        Ok(())
    }

    /// Returns a customized copy without touching the stored record. Color
    /// overrides win key by key; mood/skin-tone/theme only replace when the
    /// request supplies them.
    pub async fn customize_variant(
        &self,
        variant_id: &str,
        customizations: CustomizeRequest,
    ) -> Result<Variant, ServiceError> {
        sleep(CUSTOMIZE_DELAY).await;
        let guard = self.data.read();
        let variant = guard
            .iter()
            .find(|v| v.id == variant_id)
            .ok_or(ServiceError::VariantNotFound)?;

        let mut customized = variant.clone();
        if let Some(colors) = customizations.colors {
            if let Some(primary) = colors.primary {
                customized.colors.primary = primary;
            }
            if let Some(secondary) = colors.secondary {
                customized.colors.secondary = secondary;
            }
        }
        if let Some(mood) = customizations.mood {
            customized.mood = mood;
        }
        if let Some(skin_tone) = customizations.skin_tone {
            customized.skin_tone = Some(skin_tone);
        }
        if let Some(theme) = customizations.theme {
            customized.theme = Some(theme);
        }
        Ok(customized)
    }
}

impl Default for VariantService {
    fn default() -> Self {
        Self::new()
    }
}
