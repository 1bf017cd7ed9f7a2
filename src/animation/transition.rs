//! Spring-driven camera transitions.
//!
//! A transition never owns the transform: every frame it writes the springs'
//! current values into the [`Viewport`], so the viewport always holds the live
//! value and interrupting a transition leaves the camera exactly where it is.

use crate::animation::spring::{Spring, SpringConfig};
use crate::core::{
    geo::{GeoPoint, Point},
    viewport::{Viewport, ViewportTransform},
};

/// What a transition is animating towards
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionKind {
    /// Pan until `target` sits in the middle of the screen
    Center { target: GeoPoint },
    /// Zoom while keeping the plane point under `anchor` fixed on screen
    ZoomAt { anchor: Point },
}

/// A center transition only moves the pan; a zoom transition only moves the
/// zoom and derives the pan from its anchor
#[derive(Debug, Clone)]
enum Motion {
    Pan {
        target: GeoPoint,
        x: Spring,
        y: Spring,
    },
    Zoom {
        anchor: Point,
        zoom: Spring,
    },
}

#[derive(Debug, Clone)]
pub struct Transition {
    motion: Motion,
}

impl Transition {
    /// Starts panning from the viewport's live transform towards `target`
    pub fn center(viewport: &Viewport, target: GeoPoint, pan_config: SpringConfig) -> Self {
        let transform = viewport.transform();
        let goal = viewport.pan_for_center(&target);

        let mut x = Spring::new(transform.pan_x, pan_config);
        let mut y = Spring::new(transform.pan_y, pan_config);
        x.set_target(goal.x);
        y.set_target(goal.y);

        Self {
            motion: Motion::Pan { target, x, y },
        }
    }

    /// Starts zooming from the live zoom towards `target_zoom` (clamped) around `anchor`
    pub fn zoom_at(
        viewport: &Viewport,
        anchor: Point,
        target_zoom: f64,
        zoom_config: SpringConfig,
    ) -> Self {
        let mut zoom = Spring::new(viewport.zoom(), zoom_config);
        zoom.set_target(viewport.clamp_zoom(target_zoom));

        Self {
            motion: Motion::Zoom { anchor, zoom },
        }
    }

    pub fn kind(&self) -> TransitionKind {
        match &self.motion {
            Motion::Pan { target, .. } => TransitionKind::Center { target: *target },
            Motion::Zoom { anchor, .. } => TransitionKind::ZoomAt { anchor: *anchor },
        }
    }

    /// Zoom level this transition ends at; `None` for a center transition,
    /// which keeps the zoom it started with
    pub fn target_zoom(&self) -> Option<f64> {
        match &self.motion {
            Motion::Zoom { zoom, .. } => Some(zoom.target()),
            Motion::Pan { .. } => None,
        }
    }

    /// Points a center transition at a new target, or re-solves the pan goal
    /// for the same target after the screen changed. Velocity is kept.
    /// Zoom transitions ignore this.
    pub fn retarget_center(&mut self, viewport: &Viewport, new_target: GeoPoint) {
        if let Motion::Pan { target, x, y } = &mut self.motion {
            let goal = viewport.pan_for_center(&new_target);
            *target = new_target;
            x.set_target(goal.x);
            y.set_target(goal.y);
        }
    }

    /// Follows a pan the viewport took outside the transition, such as the
    /// re-centering on resize, so the next frame does not jump back
    pub fn shift_pan(&mut self, delta: Point) {
        if let Motion::Pan { x, y, .. } = &mut self.motion {
            x.shift(delta.x);
            y.shift(delta.y);
        }
    }

    /// Moves a zoom transition's target and anchor, keeping the zoom velocity.
    /// Center transitions ignore this.
    pub fn retarget_zoom(&mut self, viewport: &Viewport, new_anchor: Point, target_zoom: f64) {
        if let Motion::Zoom { anchor, zoom } = &mut self.motion {
            *anchor = new_anchor;
            zoom.set_target(viewport.clamp_zoom(target_zoom));
        }
    }

    /// Advances the springs by `dt_ms` and writes the result into `viewport`.
    /// Returns `true` once the transition has settled on its target.
    pub fn step(&mut self, viewport: &mut Viewport, dt_ms: f64) -> bool {
        match &mut self.motion {
            Motion::Pan { x, y, .. } => {
                let settled_x = x.step(dt_ms);
                let settled_y = y.step(dt_ms);
                viewport.set_transform(ViewportTransform::new(
                    x.value(),
                    y.value(),
                    viewport.zoom(),
                ));
                settled_x && settled_y
            }
            Motion::Zoom { anchor, zoom } => {
                let settled = zoom.step(dt_ms);
                viewport.zoom_at(*anchor, zoom.value());
                settled
            }
        }
    }
}
