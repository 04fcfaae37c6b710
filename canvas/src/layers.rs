//! Background templates and image layers.
//!
//! Templates are mutually exclusive: [`TemplateLayer`] stores at most one
//! visible template, so showing one hides the rest in the same write.
//! Images sit above the template and below strokes; erasing never touches
//! them.

#[cfg(test)]
#[path = "layers_test.rs"]
mod layers_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::consts::MIN_IMAGE_SIZE;

/// A background rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    /// Live camera passthrough.
    Webcam,
    Blank,
    Grid,
    DotGrid,
    Lined,
}

/// Single-selection background template state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateLayer {
    visible: Option<Template>,
}

impl Default for TemplateLayer {
    fn default() -> Self {
        Self { visible: Some(Template::Webcam) }
    }
}

impl TemplateLayer {
    /// Show `template`, hiding whichever one was visible.
    pub fn select(&mut self, template: Template) {
        self.visible = Some(template);
    }

    pub fn hide_all(&mut self) {
        self.visible = None;
    }

    #[must_use]
    pub fn visible(&self) -> Option<Template> {
        self.visible
    }

    #[must_use]
    pub fn is_visible(&self, template: Template) -> bool {
        self.visible == Some(template)
    }
}

/// An uploaded raster anchored in world space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageLayer {
    pub id: Uuid,
    /// Opaque reference to the pixels (URL or data URI).
    pub source: String,
    /// Top-left corner in world coordinates.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// `0.0` (transparent) to `1.0`.
    pub opacity: f64,
}

fn clamp_size(value: f64, current: f64) -> f64 {
    if value.is_finite() { value.max(MIN_IMAGE_SIZE) } else { current }
}

fn clamp_opacity(value: f64, current: f64) -> f64 {
    if value.is_finite() { value.clamp(0.0, 1.0) } else { current }
}

/// Image layers in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ImageStore {
    images: Vec<ImageLayer>,
}

impl ImageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image and return its id. Sizes and opacity are clamped.
    pub fn add(&mut self, source: impl Into<String>, position: Point, width: f64, height: f64, opacity: f64) -> Uuid {
        let id = Uuid::new_v4();
        self.images.push(ImageLayer {
            id,
            source: source.into(),
            position,
            width: clamp_size(width, MIN_IMAGE_SIZE),
            height: clamp_size(height, MIN_IMAGE_SIZE),
            opacity: clamp_opacity(opacity, 1.0),
        });
        id
    }

    #[must_use]
    pub fn get(&self, id: &Uuid) -> Option<&ImageLayer> {
        self.images.iter().find(|img| &img.id == id)
    }

    fn get_mut(&mut self, id: &Uuid) -> Option<&mut ImageLayer> {
        self.images.iter_mut().find(|img| &img.id == id)
    }

    /// Move an image's anchor. Returns `false` if the image doesn't exist.
    pub fn move_to(&mut self, id: &Uuid, position: Point) -> bool {
        let Some(img) = self.get_mut(id) else {
            return false;
        };
        img.position = position;
        true
    }

    /// Resize, keeping each edge at least one world unit.
    pub fn resize(&mut self, id: &Uuid, width: f64, height: f64) -> bool {
        let Some(img) = self.get_mut(id) else {
            return false;
        };
        img.width = clamp_size(width, img.width);
        img.height = clamp_size(height, img.height);
        true
    }

    pub fn set_opacity(&mut self, id: &Uuid, opacity: f64) -> bool {
        let Some(img) = self.get_mut(id) else {
            return false;
        };
        img.opacity = clamp_opacity(opacity, img.opacity);
        true
    }

    pub fn remove(&mut self, id: &Uuid) -> Option<ImageLayer> {
        let index = self.images.iter().position(|img| &img.id == id)?;
        Some(self.images.remove(index))
    }

    /// Images in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[ImageLayer] {
        &self.images
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
