//! Translation, resizing, and shape constraints for the crop rectangle.
//!
//! All functions are pure: they take the current rectangle plus the image
//! bounds and return a new rectangle. Any delta that would drive a dimension
//! below 1 is floored to 1 before clamping, and clamping to the image always
//! takes priority over aspect preservation at the edges.

use super::{CropRect, Handle};

/// Clamp a rectangle so it lies fully inside `[0, W] x [0, H]`.
///
/// Oversized rectangles are shrunk to the image first, then shifted into
/// bounds. Dimensions are floored at 1.
pub fn clamp_to_bounds(rect: CropRect, img_w: u32, img_h: u32) -> CropRect {
    let img_w = img_w.max(1);
    let img_h = img_h.max(1);

    let w = rect.w.clamp(1, img_w);
    let h = rect.h.clamp(1, img_h);
    let x = rect.x.clamp(0, (img_w - w) as i32);
    let y = rect.y.clamp(0, (img_h - h) as i32);

    CropRect::new(x, y, w, h)
}

/// Shift the rectangle by `(dx, dy)`, keeping it fully inside the image.
///
/// Dimensions are never altered by a translation.
pub fn translate(rect: CropRect, dx: i32, dy: i32, img_w: u32, img_h: u32) -> CropRect {
    clamp_to_bounds(
        CropRect::new(rect.x + dx, rect.y + dy, rect.w, rect.h),
        img_w,
        img_h,
    )
}

/// Resize by dragging a handle, each edge moving independently.
///
/// The edge(s) implied by `handle` move by the pointer delta; the opposite
/// edges stay fixed. Each moving edge is clamped so the rectangle keeps
/// `w, h >= 1` and stays inside the image.
pub fn resize_free(
    rect: CropRect,
    handle: Handle,
    dx: i32,
    dy: i32,
    img_w: u32,
    img_h: u32,
) -> CropRect {
    if !handle.is_resize() {
        return clamp_to_bounds(rect, img_w, img_h);
    }

    // Normalize the input so edge clamps below can never invert
    let rect = clamp_to_bounds(rect, img_w, img_h);

    let (left, right, top, bottom) = handle.edges();
    let mut new_x = rect.x;
    let mut new_y = rect.y;
    let mut new_right = rect.right();
    let mut new_bottom = rect.bottom();

    if left {
        new_x = (rect.x + dx).clamp(0, rect.right() - 1);
    }
    if right {
        new_right = (rect.right() + dx).clamp(rect.x + 1, img_w.max(1) as i32);
    }
    if top {
        new_y = (rect.y + dy).clamp(0, rect.bottom() - 1);
    }
    if bottom {
        new_bottom = (rect.bottom() + dy).clamp(rect.y + 1, img_h.max(1) as i32);
    }

    clamp_to_bounds(
        CropRect::new(
            new_x,
            new_y,
            (new_right - new_x).max(1) as u32,
            (new_bottom - new_y).max(1) as u32,
        ),
        img_w,
        img_h,
    )
}

/// Resize by dragging a handle while preserving `w / h == aspect`.
///
/// The anchor corner/edge opposite the dragged handle stays fixed. For
/// corner handles the axis with the dominant pointer delta drives and the
/// other follows the aspect; for edge handles the dragged axis drives and
/// the orthogonal one re-centers on the original midline. Degenerate deltas
/// (zero or sign-reversing) floor the driven dimension at 1 instead of
/// producing a negative size. At the image edge, clamping wins over the
/// exact aspect.
pub fn resize_with_aspect(
    rect: CropRect,
    handle: Handle,
    dx: i32,
    dy: i32,
    aspect: f64,
    img_w: u32,
    img_h: u32,
) -> CropRect {
    if !aspect.is_finite() || aspect <= 0.0 {
        return resize_free(rect, handle, dx, dy, img_w, img_h);
    }
    if !handle.is_resize() {
        return clamp_to_bounds(rect, img_w, img_h);
    }

    let img_w = img_w.max(1);
    let img_h = img_h.max(1);
    let rect = clamp_to_bounds(rect, img_w, img_h);
    let (left, right, top, bottom) = handle.edges();

    let is_corner = (left || right) && (top || bottom);
    if is_corner {
        resize_corner_aspect(rect, left, top, dx, dy, aspect, img_w, img_h)
    } else {
        resize_edge_aspect(rect, handle, dx, dy, aspect, img_w, img_h)
    }
}

fn resize_corner_aspect(
    rect: CropRect,
    grow_left: bool,
    grow_up: bool,
    dx: i32,
    dy: i32,
    aspect: f64,
    img_w: u32,
    img_h: u32,
) -> CropRect {
    // The corner opposite the dragged one stays fixed.
    let anchor_x = if grow_left { rect.right() } else { rect.x };
    let anchor_y = if grow_up { rect.bottom() } else { rect.y };
    let drag_x = (if grow_left { rect.x } else { rect.right() }) + dx;
    let drag_y = (if grow_up { rect.y } else { rect.bottom() }) + dy;

    let dw = (drag_x - anchor_x).abs().max(1) as f64;
    let dh = (drag_y - anchor_y).abs().max(1) as f64;

    // The axis with the dominant pointer delta drives, the other follows
    // the aspect.
    let (mut w, mut h) = if dx.abs() >= dy.abs() {
        (dw, dw / aspect)
    } else {
        (dh * aspect, dh)
    };

    // Clamp to the space available on the growth side of the anchor,
    // re-deriving the other axis so the aspect survives where possible.
    let avail_w = (if grow_left {
        anchor_x
    } else {
        img_w as i32 - anchor_x
    })
    .max(1) as f64;
    let avail_h = (if grow_up {
        anchor_y
    } else {
        img_h as i32 - anchor_y
    })
    .max(1) as f64;

    if w > avail_w {
        w = avail_w;
        h = (w / aspect).max(1.0);
    }
    if h > avail_h {
        h = avail_h;
        w = (h * aspect).max(1.0).min(avail_w);
    }

    let wi = (w.round() as u32).max(1);
    let hi = (h.round() as u32).max(1);
    let x = if grow_left { anchor_x - wi as i32 } else { anchor_x };
    let y = if grow_up { anchor_y - hi as i32 } else { anchor_y };

    clamp_to_bounds(CropRect::new(x, y, wi, hi), img_w, img_h)
}

fn resize_edge_aspect(
    rect: CropRect,
    handle: Handle,
    dx: i32,
    dy: i32,
    aspect: f64,
    img_w: u32,
    img_h: u32,
) -> CropRect {
    let (cx, cy) = rect.center();
    let driven = resize_free(rect, handle, dx, dy, img_w, img_h);

    match handle {
        Handle::East | Handle::West => {
            let w = driven.w;
            let h = ((w as f64 / aspect).round() as u32).max(1);
            let y = (cy - h as f64 / 2.0).round() as i32;
            clamp_to_bounds(CropRect::new(driven.x, y, w, h), img_w, img_h)
        }
        Handle::North | Handle::South => {
            let h = driven.h;
            let w = ((h as f64 * aspect).round() as u32).max(1);
            let x = (cx - w as f64 / 2.0).round() as i32;
            clamp_to_bounds(CropRect::new(x, driven.y, w, h), img_w, img_h)
        }
        _ => driven,
    }
}

/// Force the rectangle into the square that inscribes a circle.
///
/// The side is the smaller of the current dimensions, capped by the smaller
/// image dimension; the square re-centers on the original center and is then
/// clamped into bounds.
pub fn enforce_circle(rect: CropRect, img_w: u32, img_h: u32) -> CropRect {
    let (cx, cy) = rect.center();
    let side = rect.w.min(rect.h).clamp(1, img_w.min(img_h).max(1));
    let x = (cx - side as f64 / 2.0).round() as i32;
    let y = (cy - side as f64 / 2.0).round() as i32;

    clamp_to_bounds(CropRect::new(x, y, side, side), img_w, img_h)
}

/// Re-shape the rectangle to the given aspect ratio about its center.
///
/// Width is kept where possible; either dimension shrinks to fit the image,
/// and the result is clamped into bounds.
pub fn snap_to_aspect(rect: CropRect, aspect: f64, img_w: u32, img_h: u32) -> CropRect {
    if !aspect.is_finite() || aspect <= 0.0 {
        return clamp_to_bounds(rect, img_w, img_h);
    }

    let img_w = img_w.max(1);
    let img_h = img_h.max(1);
    let (cx, cy) = rect.center();

    // Try keeping width, adjust height
    let mut w = rect.w as f64;
    let mut h = w / aspect;

    if h > img_h as f64 {
        h = img_h as f64;
        w = h * aspect;
    }
    if w > img_w as f64 {
        w = img_w as f64;
        h = w / aspect;
    }

    let wi = (w.round() as u32).max(1);
    let hi = (h.round() as u32).max(1);
    let x = (cx - w / 2.0).round() as i32;
    let y = (cy - h / 2.0).round() as i32;

    clamp_to_bounds(CropRect::new(x, y, wi, hi), img_w, img_h)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const HANDLES: [Handle; 8] = [
        Handle::North,
        Handle::South,
        Handle::East,
        Handle::West,
        Handle::NorthEast,
        Handle::NorthWest,
        Handle::SouthEast,
        Handle::SouthWest,
    ];

    /// Strategy for image bounds.
    fn bounds_strategy() -> impl Strategy<Value = (u32, u32)> {
        (8u32..=400, 8u32..=400)
    }

    /// Strategy for a rectangle guaranteed to start inside the bounds.
    fn rect_strategy((img_w, img_h): (u32, u32)) -> impl Strategy<Value = CropRect> {
        (1..=img_w, 1..=img_h).prop_flat_map(move |(w, h)| {
            (0..=(img_w - w) as i32, 0..=(img_h - h) as i32)
                .prop_map(move |(x, y)| CropRect::new(x, y, w, h))
        })
    }

    fn handle_strategy() -> impl Strategy<Value = Handle> {
        (0usize..HANDLES.len()).prop_map(|i| HANDLES[i])
    }

    fn holds_invariants(r: CropRect, img_w: u32, img_h: u32) -> bool {
        r.x >= 0
            && r.y >= 0
            && r.w >= 1
            && r.h >= 1
            && r.right() <= img_w as i32
            && r.bottom() <= img_h as i32
    }

    proptest! {
        /// Property: translate keeps the rectangle inside the image.
        #[test]
        fn prop_translate_in_bounds(
            bounds in bounds_strategy().prop_flat_map(|b| (Just(b), rect_strategy(b))),
            dx in -500i32..=500,
            dy in -500i32..=500,
        ) {
            let ((img_w, img_h), rect) = bounds;
            let result = translate(rect, dx, dy, img_w, img_h);
            prop_assert!(holds_invariants(result, img_w, img_h), "{:?}", result);
            prop_assert_eq!((result.w, result.h), (rect.w, rect.h));
        }

        /// Property: free resize keeps the rectangle inside the image.
        #[test]
        fn prop_resize_free_in_bounds(
            bounds in bounds_strategy().prop_flat_map(|b| (Just(b), rect_strategy(b))),
            handle in handle_strategy(),
            dx in -500i32..=500,
            dy in -500i32..=500,
        ) {
            let ((img_w, img_h), rect) = bounds;
            let result = resize_free(rect, handle, dx, dy, img_w, img_h);
            prop_assert!(holds_invariants(result, img_w, img_h), "{:?}", result);
        }

        /// Property: aspect resize keeps the rectangle inside the image.
        #[test]
        fn prop_resize_aspect_in_bounds(
            bounds in bounds_strategy().prop_flat_map(|b| (Just(b), rect_strategy(b))),
            handle in handle_strategy(),
            dx in -500i32..=500,
            dy in -500i32..=500,
            aspect in 0.2f64..=5.0,
        ) {
            let ((img_w, img_h), rect) = bounds;
            let result = resize_with_aspect(rect, handle, dx, dy, aspect, img_w, img_h);
            prop_assert!(holds_invariants(result, img_w, img_h), "{:?}", result);
        }

        /// Property: when the result sits strictly inside the image, one axis
        /// was derived from the other by the aspect (within rounding).
        #[test]
        fn prop_resize_aspect_preserves_ratio(
            bounds in bounds_strategy().prop_flat_map(|b| (Just(b), rect_strategy(b))),
            handle in handle_strategy(),
            dx in -100i32..=100,
            dy in -100i32..=100,
            aspect in 0.25f64..=4.0,
        ) {
            let ((img_w, img_h), rect) = bounds;
            let r = resize_with_aspect(rect, handle, dx, dy, aspect, img_w, img_h);

            let touches_edge = r.x == 0
                || r.y == 0
                || r.right() == img_w as i32
                || r.bottom() == img_h as i32;
            if !touches_edge {
                let w = r.w as f64;
                let h = r.h as f64;
                let derived = (h - w / aspect).abs() <= 1.0 || (w - h * aspect).abs() <= 1.0;
                prop_assert!(derived, "aspect lost: {:?} for aspect {}", r, aspect);
            }
        }

        /// Property: enforce_circle produces an in-bounds square.
        #[test]
        fn prop_enforce_circle_square(
            bounds in bounds_strategy().prop_flat_map(|b| (Just(b), rect_strategy(b))),
        ) {
            let ((img_w, img_h), rect) = bounds;
            let r = enforce_circle(rect, img_w, img_h);
            prop_assert!(holds_invariants(r, img_w, img_h), "{:?}", r);
            prop_assert_eq!(r.w, r.h);
            prop_assert!(r.w <= rect.w.min(rect.h));
        }

        /// Property: snap_to_aspect stays in bounds.
        #[test]
        fn prop_snap_to_aspect_in_bounds(
            bounds in bounds_strategy().prop_flat_map(|b| (Just(b), rect_strategy(b))),
            aspect in 0.2f64..=5.0,
        ) {
            let ((img_w, img_h), rect) = bounds;
            let r = snap_to_aspect(rect, aspect, img_w, img_h);
            prop_assert!(holds_invariants(r, img_w, img_h), "{:?}", r);
        }
    }
}
