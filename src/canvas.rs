use std::io::Cursor;

use base64::Engine;
use image::{ImageFormat, Rgba, RgbaImage};
use tokio::sync::mpsc::UnboundedSender;
use tracing::error;

use crate::wizard::InputEvent;

pub const CANVAS_WIDTH: u32 = 400;
pub const CANVAS_HEIGHT: u32 = 400;
pub const MIN_BRUSH_SIZE: u32 = 1;
pub const MAX_BRUSH_SIZE: u32 = 20;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Pen,
    Eraser,
}

/// Freehand drawing surface. Every stroke extension re-encodes the whole
/// raster to a PNG data URI and reports it upward, matching the original
/// per-move serialization (no batching).
pub struct DrawingCanvas {
    image: RgbaImage,
    tool: Tool,
    brush_size: u32,
    brush_color: Rgba<u8>,
    drawing: bool,
    has_drawn: bool,
    last: Option<(f32, f32)>,
    // On-screen bounding-box offset of the element; pointer coordinates
    // arrive in client space and are mapped relative to this.
    origin: (f32, f32),
    events: UnboundedSender<InputEvent>,
}

impl DrawingCanvas {
    pub fn new(events: UnboundedSender<InputEvent>) -> Self {
        Self {
            image: RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, WHITE),
            tool: Tool::Pen,
            brush_size: 5,
            brush_color: Rgba([0x33, 0x33, 0x33, 0xFF]),
            drawing: false,
            has_drawn: false,
            last: None,
            origin: (0.0, 0.0),
            events,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    pub fn set_brush_size(&mut self, size: u32) {
        self.brush_size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
    }

    /// Pen color as "#RRGGBB"; ignored while erasing.
    pub fn set_brush_color(&mut self, hex: &str) {
        if let Some(color) = parse_hex(hex) {
            self.brush_color = color;
        }
    }

    pub fn set_origin(&mut self, x: f32, y: f32) {
        self.origin = (x, y);
    }

    pub fn has_drawn(&self) -> bool {
        self.has_drawn
    }

    fn to_canvas(&self, client_x: f32, client_y: f32) -> (f32, f32) {
        (client_x - self.origin.0, client_y - self.origin.1)
    }

    pub fn pointer_down(&mut self, client_x: f32, client_y: f32) {
        let pos = self.to_canvas(client_x, client_y);
        self.drawing = true;
        self.last = Some(pos);
    }

    pub fn pointer_move(&mut self, client_x: f32, client_y: f32) {
        if !self.drawing {
            return;
        }
        let pos = self.to_canvas(client_x, client_y);
        let from = self.last.unwrap_or(pos);
        self.stroke(from, pos);
        self.last = Some(pos);
        self.has_drawn = true;
        self.emit_snapshot();
    }

    pub fn pointer_up(&mut self) {
        self.drawing = false;
        self.last = None;
    }

    /// Touch events use the first touch point only.
    pub fn touch_start(&mut self, touches: &[(f32, f32)]) {
        if let Some(&(x, y)) = touches.first() {
            self.pointer_down(x, y);
        }
    }

    pub fn touch_move(&mut self, touches: &[(f32, f32)]) {
        if let Some(&(x, y)) = touches.first() {
            self.pointer_move(x, y);
        }
    }

    pub fn touch_end(&mut self) {
        self.pointer_up();
    }

    /// Resets to a solid white fill and reports a null payload upward.
    pub fn clear(&mut self) {
        self.image = RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, WHITE);
        self.has_drawn = false;
        let _ = self.events.send(InputEvent::PayloadChanged(None));
    }

    fn stroke(&mut self, from: (f32, f32), to: (f32, f32)) {
        // Eraser works destructively at double the brush width.
        let (width, color) = match self.tool {
            Tool::Pen => (self.brush_size, self.brush_color),
            Tool::Eraser => (self.brush_size * 2, TRANSPARENT),
        };
        let radius = (width as f32 / 2.0).max(0.5);

        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stamp(from.0 + dx * t, from.1 + dy * t, radius, color);
        }
    }

    fn stamp(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
        let r = radius.ceil() as i32;
        let (cx_i, cy_i) = (cx.round() as i32, cy.round() as i32);
        for y in (cy_i - r)..=(cy_i + r) {
            for x in (cx_i - r)..=(cx_i + r) {
                if x < 0 || y < 0 || x >= CANVAS_WIDTH as i32 || y >= CANVAS_HEIGHT as i32 {
                    continue;
                }
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                if dx * dx + dy * dy <= radius * radius {
                    self.image.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }

    fn emit_snapshot(&self) {
        match self.to_data_uri() {
            Ok(uri) => {
                let _ = self.events.send(InputEvent::PayloadChanged(Some(uri)));
            }
            Err(e) => error!("❌ Failed to encode canvas snapshot: {}", e),
        }
    }

    pub fn to_data_uri(&self) -> Result<String, image::ImageError> {
        let mut buf = Vec::new();
        self.image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
        Ok(format!("data:image/png;base64,{}", b64))
    }

    #[cfg(test)]
    fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }
}

fn parse_hex(hex: &str) -> Option<Rgba<u8>> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Rgba([r, g, b, 0xFF]))
}
