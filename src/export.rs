use std::time::Duration;

use tokio::time::sleep;
use tracing::info;

use crate::error::ServiceError;
use crate::models::{ExportAction, ExportFormat, ExportRequest, ExportSize, Variant};

const EXPORT_DELAY: Duration = Duration::from_millis(1500);

pub const FORMATS: [(ExportFormat, &str, &str); 3] = [
    (ExportFormat::Png, "PNG", "Best for transparency"),
    (ExportFormat::Svg, "SVG", "Vector format, scalable"),
    (ExportFormat::Gif, "GIF", "For animated emojis"),
];

pub const SIZES: [(ExportSize, &str, &str); 4] = [
    (ExportSize::Small, "64×64", "Small"),
    (ExportSize::Standard, "128×128", "Standard"),
    (ExportSize::Large, "256×256", "Large"),
    (ExportSize::ExtraLarge, "512×512", "Extra Large"),
];

/// Transient export configuration for the overlay. GIF is only offered for
/// animated variants.
pub struct ExportModal {
    format: ExportFormat,
    size: ExportSize,
    variant_is_animated: bool,
    exporting: bool,
}

impl ExportModal {
    pub fn new(variant: &Variant) -> Self {
        Self {
            format: ExportFormat::Png,
            size: ExportSize::Standard,
            variant_is_animated: variant.is_animated,
            exporting: false,
        }
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn size(&self) -> ExportSize {
        self.size
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    pub fn set_format(&mut self, format: ExportFormat) -> Result<(), ServiceError> {
        if format == ExportFormat::Gif && !self.variant_is_animated {
            return Err(ServiceError::InvalidInput(
                "GIF export is only available for animated variants".into(),
            ));
        }
        self.format = format;
        Ok(())
    }

    pub fn set_size(&mut self, size: ExportSize) {
        self.size = size;
    }

    /// Runs the simulated export and yields the configuration the wizard
    /// persists. The mock never fails; callers still guard it.
    pub async fn run(&mut self, action: ExportAction) -> ExportRequest {
        self.exporting = true;
        sleep(EXPORT_DELAY).await;
        self.exporting = false;
        info!(
            "📦 Exported as {:?} at {}px via {:?}",
            self.format,
            self.size.pixels(),
            action
        );
        ExportRequest { format: self.format, size: self.size, action }
    }
}

pub fn action_message(action: ExportAction) -> &'static str {
    match action {
        ExportAction::Download => "Emoji downloaded successfully!",
        ExportAction::Copy => "Emoji copied to clipboard!",
        ExportAction::Share => "Share link created!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Mood, VariantColors};
    use pretty_assertions::assert_eq;

    fn variant(animated: bool) -> Variant {
        Variant {
            id: "variant_1".into(),
            mood: Mood::Happy,
            colors: VariantColors { primary: "#FFE66D".into(), secondary: "#FF6B6B".into() },
            is_animated: animated,
            image_data: "data:image/svg+xml;base64,".into(),
            skin_tone: None,
            theme: None,
        }
    }

    #[test]
    fn defaults_to_png_at_128() {
        let modal = ExportModal::new(&variant(false));
        assert_eq!(modal.format(), ExportFormat::Png);
        assert_eq!(modal.size(), ExportSize::Standard);
    }

    #[test]
    fn gif_is_gated_on_animated_variants() {
        let mut modal = ExportModal::new(&variant(false));
        assert!(modal.set_format(ExportFormat::Gif).is_err());
        assert_eq!(modal.format(), ExportFormat::Png);

        let mut modal = ExportModal::new(&variant(true));
        assert!(modal.set_format(ExportFormat::Gif).is_ok());
        assert_eq!(modal.format(), ExportFormat::Gif);
    }

    #[tokio::test(start_paused = true)]
    async fn run_yields_the_configured_request() {
        let mut modal = ExportModal::new(&variant(false));
        modal.set_size(ExportSize::ExtraLarge);
        let request = modal.run(ExportAction::Copy).await;
        assert_eq!(request.format, ExportFormat::Png);
        assert_eq!(request.size.pixels(), 512);
        assert_eq!(request.action, ExportAction::Copy);
        assert!(!modal.is_exporting());
    }

    #[test]
    fn each_action_has_its_own_toast() {
        assert_eq!(action_message(ExportAction::Download), "Emoji downloaded successfully!");
        assert_eq!(action_message(ExportAction::Copy), "Emoji copied to clipboard!");
        assert_eq!(action_message(ExportAction::Share), "Share link created!");
    }
}
