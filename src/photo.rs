use base64::Engine;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

use crate::projects::preview;
use crate::wizard::InputEvent;

/// Upload validation failures surface synchronously, before anything is
/// reported upward (the original shows a blocking alert here).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Please upload an image file")]
    NotAnImage,
    #[error("Could not read image: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedPhoto {
    pub src: String,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

/// Photo input capture: accepts picked or dropped files, decodes them for
/// pixel dimensions, and reports the data URI upward only after a successful
/// decode.
pub struct PhotoUploader {
    uploaded: Option<UploadedPhoto>,
    events: UnboundedSender<InputEvent>,
}

impl PhotoUploader {
    pub fn new(events: UnboundedSender<InputEvent>) -> Self {
        Self { uploaded: None, events }
    }

    pub fn uploaded(&self) -> Option<&UploadedPhoto> {
        self.uploaded.as_ref()
    }

    pub fn accept_file(
        &mut self,
        file_name: &str,
        mime_type: &str,
        bytes: &[u8],
    ) -> Result<&UploadedPhoto, UploadError> {
        if !mime_type.starts_with("image/") {
            return Err(UploadError::NotAnImage);
        }

        let decoded =
            image::load_from_memory(bytes).map_err(|e| UploadError::Decode(e.to_string()))?;

        let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
        let src = format!("data:{};base64,{}", mime_type, b64);
        info!(
            "📷 Accepted photo {} ({}x{}): {}",
            file_name,
            decoded.width(),
            decoded.height(),
            preview(&src)
        );

        self.uploaded = Some(UploadedPhoto {
            src: src.clone(),
            file_name: file_name.to_string(),
            width: decoded.width(),
            height: decoded.height(),
        });
        let _ = self.events.send(InputEvent::PayloadChanged(Some(src)));
        Ok(self.uploaded.as_ref().expect("just set"))
    }

    /// Explicit removal, resetting the control and the payload.
    pub fn remove(&mut self) {
        self.uploaded = None;
        let _ = self.events.send(InputEvent::PayloadChanged(None));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use tokio::sync::mpsc;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png).unwrap();
        buf
    }

    fn uploader() -> (PhotoUploader, mpsc::UnboundedReceiver<InputEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (PhotoUploader::new(tx), rx)
    }

    #[test]
    fn rejects_non_image_mime_without_emitting() {
        let (mut uploader, mut rx) = uploader();
        let err = uploader.accept_file("notes.txt", "text/plain", b"hello").unwrap_err();
        assert_eq!(err, UploadError::NotAnImage);
        assert!(rx.try_recv().is_err());
        assert!(uploader.uploaded().is_none());
    }

    #[test]
    fn rejects_undecodable_bytes_without_emitting() {
        let (mut uploader, mut rx) = uploader();
        let err = uploader
            .accept_file("broken.png", "image/png", b"not a png")
            .unwrap_err();
        assert!(matches!(err, UploadError::Decode(_)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn accepts_a_real_image_and_reports_after_decode() {
        let (mut uploader, mut rx) = uploader();
        let bytes = png_bytes(32, 16);
        let photo = uploader.accept_file("selfie.png", "image/png", &bytes).unwrap();
        assert_eq!(photo.file_name, "selfie.png");
        assert_eq!(photo.width, 32);
        assert_eq!(photo.height, 16);
        assert!(photo.src.starts_with("data:image/png;base64,"));

        match rx.try_recv().unwrap() {
            InputEvent::PayloadChanged(Some(uri)) => {
                assert!(uri.starts_with("data:image/png;base64,"))
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn remove_resets_and_reports_null() {
        let (mut uploader, mut rx) = uploader();
        let bytes = png_bytes(8, 8);
        uploader.accept_file("a.png", "image/png", &bytes).unwrap();
        uploader.remove();
        assert!(uploader.uploaded().is_none());

        let mut last = None;
        while let Ok(InputEvent::PayloadChanged(p)) = rx.try_recv() {
            last = Some(p);
        }
        assert_eq!(last, Some(None));
    }
}
