use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use rand::Rng;
use tokio::time::sleep;
use tracing::info;

use crate::error::ServiceError;
use crate::models::{
    InputMode, Mood, NewProject, Project, ProjectPatch, Variant, VariantColors,
};

const SEED_PROJECTS: &str = include_str!("mockdata/emoji_projects.json");

// Per-operation latency of the simulated backend, matching the mock API.
const GET_ALL_DELAY: Duration = Duration::from_millis(300);
const GET_BY_ID_DELAY: Duration = Duration::from_millis(200);
const CREATE_DELAY: Duration = Duration::from_millis(400);
const UPDATE_DELAY: Duration = Duration::from_millis(300);
const DELETE_DELAY: Duration = Duration::from_millis(250);
const GENERATE_DELAY: Duration = Duration::from_millis(2000);

/// Placeholder raster every mock variant carries. A real generation backend
/// would return per-variant image data here.
pub const MOCK_IMAGE_DATA: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iNjQiIGhlaWdodD0iNjQiIHZpZXdCb3g9IjAgMCA2NCA2NCIgZmlsbD0ibm9uZSIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj4KPGNpcmNsZSBjeD0iMzIiIGN5PSIzMiIgcj0iMzAiIGZpbGw9IiNGRkU2NkQiLz4KPGNpcmNsZSBjeD0iMjQiIGN5PSIyNCIgcj0iNCIgZmlsbD0iIzMzMzMzMyIvPgo8Y2lyY2xlIGN4PSI0MCIgY3k9IjI0IiByPSI0IiBmaWxsPSIjMzMzMzMzIi8+CjxwYXRoIGQ9Ik0yMCA0NEMyMCA0NCAyNCA0OCAzMiA0OEMzOCA0OCA0MiA0NCA0MiA0NCIgc3Ryb2tlPSIjMzMzMzMzIiBzdHJva2Utd2lkdGg9IjMiIHN0cm9rZS1saW5lY2FwPSJyb3VuZCIvPgo8L3N2Zz4K";

/// The six canonical mood/color pairings the mock generator draws from.
const VARIANT_CATALOG: [(Mood, &str, &str, bool); 6] = [
    (Mood::Happy, "#FFE66D", "#FF6B6B", false),
    (Mood::Excited, "#4ECDC4", "#FFE66D", true),
    (Mood::Cool, "#339AF0", "#4ECDC4", false),
    (Mood::Love, "#FF6B6B", "#FFE66D", true),
    (Mood::Surprised, "#FFD93D", "#FF6B6B", false),
    (Mood::Chill, "#51CF66", "#4ECDC4", false),
];

/// Seam for the "AI" step. The mock implementation below ignores the input
/// content on purpose; a real backend slots in behind this trait.
#[async_trait]
pub trait VariantGenerator: Send + Sync {
    async fn generate(&self, input_data: &str, input_type: InputMode) -> Vec<Variant>;
}

pub struct MockVariantGenerator;

#[async_trait]
impl VariantGenerator for MockVariantGenerator {
    async fn generate(&self, input_data: &str, input_type: InputMode) -> Vec<Variant> {
        sleep(GENERATE_DELAY).await;

        info!(
            "🎨 Generating variants for {} input: {}",
            input_type.as_str(),
            preview(input_data)
        );

        let batch = Utc::now().timestamp_millis();
        let all: Vec<Variant> = VARIANT_CATALOG
            .iter()
            .enumerate()
            .map(|(i, (mood, primary, secondary, animated))| Variant {
                id: format!("variant_{}_{}", batch, i + 1),
                mood: *mood,
                colors: VariantColors {
                    primary: (*primary).into(),
                    secondary: (*secondary).into(),
                },
                is_animated: *animated,
                image_data: mock_image_data(input_type, *mood),
                skin_tone: None,
                theme: None,
            })
            .collect();

        // Contract: a non-deterministic 4-6 element prefix, never the same
        // dependence on input content.
        let count = rand::thread_rng().gen_range(4..=6);
        all.into_iter().take(count).collect()
    }
}

fn mock_image_data(_input_type: InputMode, _mood: Mood) -> String {
    MOCK_IMAGE_DATA.into()
}

/// In-memory project store with simulated latency. Records are cloned at the
/// boundary in both directions so callers can mutate returned values freely.
pub struct ProjectService {
    data: RwLock<Vec<Project>>,
    generator: Arc<dyn VariantGenerator>,
    // Floor for time-derived ids so two creates in the same millisecond
    // still get distinct identities.
    id_floor: AtomicI64,
}

impl ProjectService {
    pub fn new() -> Self {
        Self::with_generator(Arc::new(MockVariantGenerator))
    }

    pub fn with_generator(generator: Arc<dyn VariantGenerator>) -> Self {
        let seeded: Vec<Project> =
            serde_json::from_str(SEED_PROJECTS).expect("invalid emoji_projects.json seed");
        Self {
            data: RwLock::new(seeded),
            generator,
            id_floor: AtomicI64::new(0),
        }
    }

    fn next_id(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let id = self
            .id_floor
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |floor| {
                Some(now.max(floor + 1))
            })
            .map(|floor| now.max(floor + 1))
            .unwrap_or(now);
        id.to_string()
    }

    pub async fn get_all(&self) -> Vec<Project> {
        sleep(GET_ALL_DELAY).await;
        self.data.read().clone()
    }

    /// Absence is not an error here; callers handle the `None` explicitly.
    pub async fn get_by_id(&self, id: &str) -> Option<Project> {
        sleep(GET_BY_ID_DELAY).await;
        self.data.read().iter().find(|p| p.id == id).cloned()
    }

    /// Cannot fail: assigns a time-derived id and timestamp and prepends.
    pub async fn create(&self, project: NewProject) -> Project {
        sleep(CREATE_DELAY).await;
        let record = Project {
            id: self.next_id(),
            input_type: project.input_type,
            input_data: project.input_data,
            variants: project.variants,
            selected_variant: project.selected_variant,
            customizations: project.customizations,
            created_at: Utc::now(),
        };
        info!(
            "💾 Created project {} ({} input, {} variants)",
            record.id,
            record.input_type.as_str(),
            record.variants.len()
        );
        self.data.write().insert(0, record.clone());
        record
    }

    pub async fn update(&self, id: &str, patch: ProjectPatch) -> Result<Project, ServiceError> {
        sleep(UPDATE_DELAY).await;
        let mut guard = self.data.write();
        let record = guard
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ServiceError::ProjectNotFound)?;
        if let Some(input_type) = patch.input_type {
            record.input_type = input_type;
        }
        if let Some(input_data) = patch.input_data {
            record.input_data = input_data;
        }
        if let Some(variants) = patch.variants {
            record.variants = variants;
        }
        if let Some(selected) = patch.selected_variant {
            record.selected_variant = selected;
        }
        if let Some(customizations) = patch.customizations {
            record.customizations = customizations;
        }
        Ok(record.clone())
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        sleep(DELETE_DELAY).await;
        let mut guard = self.data.write();
        let index = guard
            .iter()
            .position(|p| p.id == id)
            .ok_or(ServiceError::ProjectNotFound)?;
        guard.remove(index);
        Ok(())
    }

    /// The simulated "AI" step. Output length is a random 4-6 and the content
    /// is independent of the input; see `VariantGenerator`.
    pub async fn generate_variants(&self, input_data: &str, input_type: InputMode) -> Vec<Variant> {
        let variants = self.generator.generate(input_data, input_type).await;
        info!("✅ Generated {} variants", variants.len());
        variants
    }
}

impl Default for ProjectService {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncated preview of a payload for logging, keeping data URIs out of the
/// log stream.
pub fn preview(data: &str) -> String {
    // Cut on a character boundary; payloads can be arbitrary UTF-8 text.
    match data.char_indices().nth(50) {
        Some((cut, _)) => format!("{}...[{} chars]", &data[..cut], data.chars().count()),
        None => data.to_string(),
    }
}
