//! Editor session: owned state, pointer interaction, transactional commits.
//!
//! The session owns the per-image state (original and current buffers, crop
//! state, adjustment settings) and the scoped history, and translates
//! pointer gestures into geometry-kernel calls. Drag handling is an explicit
//! state machine — `Idle | Dragging(DragState)` — so a move event can never
//! be processed without a prior start.
//!
//! Everything here is single-threaded and synchronous: each pointer-move
//! fully recomputes the crop state before the next event is handled, and a
//! crop commit plus its history push form one atomic unit.

use std::sync::Arc;

use crate::adjust::apply_adjustments;
use crate::buffer::ImageBuffer;
use crate::compose::commit_crop;
use crate::geometry::{
    enforce_circle, initial_crop, normalize_degrees, resize_free, resize_with_aspect,
    rotate::{pointer_angle, rotate_from_pointer},
    snap_to_aspect, translate, AspectRatio, CropShape, CropState, Handle,
};
use crate::history::{EditHistory, EditScope, EditSnapshot, HistoryEntry};
use crate::matte::{composite_matte, MatteError, MattingEngine};
use crate::AdjustmentSettings;

/// Transient state for an in-flight pointer gesture.
///
/// Created on pointer-down, destroyed on pointer-up. Geometry updates are
/// always computed against the gesture-start snapshot, not the live crop,
/// so a drag cannot feed its own output back into itself.
#[derive(Debug, Clone)]
pub struct DragState {
    /// Handle being manipulated.
    pub handle: Handle,
    /// Pointer position at gesture start, in image space.
    pub start_x: f64,
    pub start_y: f64,
    /// Crop state at gesture start.
    pub start_crop: CropState,
    /// Aspect lock at gesture start (`None` = free).
    pub aspect: Option<f64>,
    /// Pointer angle around the crop center at gesture start, radians.
    pub start_pointer_angle: f64,
    /// Rotation angle at gesture start, degrees.
    pub start_angle_deg: f64,
}

/// The drag state machine. Transitions only on explicit start/move/end.
#[derive(Debug, Clone, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging(DragState),
}

/// The owned, mutable editing state for one loaded image.
#[derive(Debug, Default)]
pub struct EditorState {
    /// Immutable per-load buffer; source of truth for the adjustment
    /// pipeline.
    original: Option<Arc<ImageBuffer>>,
    /// Latest committed buffer; source for crops and mattes.
    current: Option<Arc<ImageBuffer>>,
    /// Active crop region.
    pub crop: CropState,
    /// Whether a crop has been committed since load.
    pub cropped: bool,
    /// Non-destructive adjustment parameters.
    pub settings: AdjustmentSettings,
    /// Selected aspect-ratio preset.
    pub aspect: AspectRatio,
    drag: DragPhase,
}

impl EditorState {
    /// Dimensions of the current buffer, if an image is loaded.
    pub fn bounds(&self) -> Option<(u32, u32)> {
        self.current.as_ref().map(|b| (b.width, b.height))
    }

    pub fn current(&self) -> Option<&ImageBuffer> {
        self.current.as_deref()
    }

    pub fn original(&self) -> Option<&ImageBuffer> {
        self.original.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragPhase::Dragging(_))
    }

    fn snapshot_with(&self, buffer: Arc<ImageBuffer>) -> EditSnapshot {
        EditSnapshot {
            buffer,
            crop: self.crop.clone(),
            cropped: self.cropped,
        }
    }
}

/// History replay: restore the forwarded snapshot wholesale.
fn replay_snapshot(state: &mut EditorState, snapshot: &EditSnapshot) {
    state.current = Some(snapshot.buffer.clone());
    state.crop = snapshot.crop.clone();
    state.cropped = snapshot.cropped;
    state.drag = DragPhase::Idle;
}

/// Editing session tying the state, the interaction controller, and the
/// scoped history together.
pub struct EditorSession {
    state: EditorState,
    history: EditHistory<EditorState>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        let mut history = EditHistory::new();
        history.register(EditScope::Crop, replay_snapshot);
        history.register(EditScope::Matte, replay_snapshot);
        Self {
            state: EditorState::default(),
            history,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    // ===== Image lifecycle =====

    /// Load a new image, replacing any previous one.
    ///
    /// Captures the immutable original, resets the crop to the centered
    /// default for the active aspect ratio, resets adjustments, and clears
    /// every history scope so edits never leak across images.
    pub fn load_image(&mut self, image: ImageBuffer) {
        if image.is_empty() {
            self.unload();
            return;
        }
        let (w, h) = (image.width, image.height);
        let buffer = Arc::new(image);

        self.state.original = Some(buffer.clone());
        self.state.current = Some(buffer);
        self.state.crop = CropState {
            rect: initial_crop(w, h, self.state.aspect.ratio()),
            ..CropState::default()
        };
        self.state.cropped = false;
        self.state.settings = AdjustmentSettings::default();
        self.state.drag = DragPhase::Idle;
        self.history.clear_all();
    }

    /// Drop the loaded image and all per-image state.
    pub fn unload(&mut self) {
        self.state = EditorState {
            aspect: self.state.aspect,
            ..EditorState::default()
        };
        self.history.clear_all();
    }

    // ===== Interaction controller =====

    /// Begin a drag gesture on a handle.
    ///
    /// Ignored when no image is loaded, when a gesture is already active, or
    /// when the pointer coordinates are non-finite.
    pub fn pointer_down(&mut self, handle: Handle, x: f64, y: f64) {
        if self.state.current.is_none() || !x.is_finite() || !y.is_finite() {
            return;
        }
        if self.state.is_dragging() {
            return;
        }

        let (cx, cy) = self.state.crop.rect.center();
        self.state.drag = DragPhase::Dragging(DragState {
            handle,
            start_x: x,
            start_y: y,
            start_crop: self.state.crop.clone(),
            aspect: match self.state.crop.shape {
                CropShape::Circle => Some(1.0),
                _ => self.state.aspect.ratio(),
            },
            start_pointer_angle: pointer_angle(cx, cy, x, y),
            start_angle_deg: self.state.crop.angle_deg,
        });
    }

    /// Update the active drag gesture with a new pointer position.
    ///
    /// A no-op when idle (no move is ever processed without a prior start)
    /// or when the coordinates are non-finite.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        let Some((img_w, img_h)) = self.state.bounds() else {
            return;
        };
        let DragPhase::Dragging(drag) = self.state.drag.clone() else {
            return;
        };

        let dx = (x - drag.start_x).round() as i32;
        let dy = (y - drag.start_y).round() as i32;
        let start = drag.start_crop.rect;

        match drag.handle {
            Handle::Move => {
                self.state.crop.rect = translate(start, dx, dy, img_w, img_h);
            }
            Handle::Rotate => {
                // Rotation only means something for an ellipse and never
                // touches the bounding rectangle
                if self.state.crop.shape == CropShape::Ellipse {
                    let (cx, cy) = start.center();
                    self.state.crop.angle_deg = rotate_from_pointer(
                        pointer_angle(cx, cy, x, y),
                        drag.start_pointer_angle,
                        drag.start_angle_deg,
                    );
                }
            }
            handle => {
                let resized = match drag.aspect {
                    Some(aspect) => {
                        resize_with_aspect(start, handle, dx, dy, aspect, img_w, img_h)
                    }
                    None => resize_free(start, handle, dx, dy, img_w, img_h),
                };
                self.state.crop.rect = if self.state.crop.shape == CropShape::Circle {
                    enforce_circle(resized, img_w, img_h)
                } else {
                    resized
                };
            }
        }
    }

    /// End the active drag gesture, destroying its transient state.
    pub fn pointer_up(&mut self) {
        self.state.drag = DragPhase::Idle;
    }

    // ===== Shape / ratio / parameter selection =====

    /// Switch the crop shape. Selecting a circle forces the rectangle into
    /// its inscribed square.
    pub fn set_shape(&mut self, shape: CropShape) {
        self.state.crop.shape = shape;
        if shape == CropShape::Circle {
            if let Some((w, h)) = self.state.bounds() {
                self.state.crop.rect = enforce_circle(self.state.crop.rect, w, h);
            }
        }
    }

    /// Select an aspect-ratio preset, re-snapping the crop about its center.
    /// Circles stay square regardless of the selected ratio.
    pub fn set_aspect(&mut self, aspect: AspectRatio) {
        self.state.aspect = aspect;
        if self.state.crop.shape == CropShape::Circle {
            return;
        }
        if let (Some((w, h)), Some(ratio)) = (self.state.bounds(), aspect.ratio()) {
            self.state.crop.rect = snap_to_aspect(self.state.crop.rect, ratio, w, h);
        }
    }

    /// Set the feather radius in pixels. Non-finite or negative values floor
    /// to zero.
    pub fn set_feather(&mut self, feather_px: f64) {
        self.state.crop.feather_px = if feather_px.is_finite() {
            feather_px.max(0.0)
        } else {
            0.0
        };
    }

    /// Set the ellipse rotation directly (e.g. from a slider), normalized
    /// into [0, 360).
    pub fn set_angle(&mut self, angle_deg: f64) {
        if angle_deg.is_finite() {
            self.state.crop.angle_deg = normalize_degrees(angle_deg);
        }
    }

    /// Replace the adjustment parameters.
    pub fn set_settings(&mut self, settings: AdjustmentSettings) {
        self.state.settings = settings;
    }

    // ===== Commits =====

    /// Commit the active crop.
    ///
    /// Produces the cropped buffer, resets the crop state to the new full
    /// extent, and pushes the `(before, after)` pair onto the crop history
    /// scope — one atomic unit: no observer sees the commit without its
    /// history entry. Silent no-op (returns `false`) when no image is
    /// loaded.
    pub fn commit_crop(&mut self) -> bool {
        let Some(current) = self.state.current.clone() else {
            return false;
        };

        let before = self.state.snapshot_with(current.clone());
        let result = Arc::new(commit_crop(&current, &self.state.crop));

        self.state.crop = CropState::full_extent(result.width, result.height);
        self.state.cropped = true;
        self.state.drag = DragPhase::Idle;
        self.state.current = Some(result.clone());

        let after = self.state.snapshot_with(result);
        self.history.push(EditScope::Crop, HistoryEntry { before, after });
        true
    }

    /// Run the matting collaborator and composite its matte into the
    /// current buffer's alpha channel.
    ///
    /// A collaborator failure is returned to the caller and leaves the
    /// state and history untouched. With no image loaded this is a silent
    /// no-op returning `Ok(false)`.
    pub fn apply_matte(
        &mut self,
        engine: &dyn MattingEngine,
        target_size: u32,
    ) -> Result<bool, MatteError> {
        let Some(current) = self.state.current.clone() else {
            return Ok(false);
        };

        let matte = engine.infer_matte(&current, target_size)?;
        if matte.is_empty() {
            return Err(MatteError::EmptyMatte);
        }

        let before = self.state.snapshot_with(current.clone());
        let result = Arc::new(composite_matte(&current, &matte));
        self.state.current = Some(result.clone());
        let after = self.state.snapshot_with(result);

        self.history.push(EditScope::Matte, HistoryEntry { before, after });
        Ok(true)
    }

    // ===== Adjustments =====

    /// Apply the current adjustment settings to the preserved original.
    ///
    /// Always recomputed from the original so parameter changes never
    /// accumulate; returns `None` (a no-op, not an error) when no image is
    /// loaded.
    pub fn adjusted(&self) -> Option<ImageBuffer> {
        self.state
            .original
            .as_ref()
            .map(|original| apply_adjustments(original, &self.state.settings))
    }

    // ===== History =====

    pub fn undo(&mut self, scope: EditScope) -> bool {
        self.history.undo(scope, &mut self.state)
    }

    pub fn redo(&mut self, scope: EditScope) -> bool {
        self.history.redo(scope, &mut self.state)
    }

    pub fn can_undo(&self, scope: EditScope) -> bool {
        self.history.can_undo(scope)
    }

    pub fn can_redo(&self, scope: EditScope) -> bool {
        self.history.can_redo(scope)
    }
}
