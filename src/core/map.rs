//! The stateful map: owns the viewport, runs the interaction state machine
//! and tells subscribers what changed.
//!
//! ```text
//! Idle      ──start_drag──────────────▶ Dragging ──end_drag──▶ Idle
//! Idle      ──set_center / zoom_at───▶ Animating ──settled──▶ Idle
//! Animating ──start_drag──────────────▶ Dragging
//! ```
//! Starting a drag interrupts an animation in place.

use crate::animation::{Transition, TransitionKind};
use crate::core::{
    config::MapOptions,
    geo::{GeoBounds, GeoPoint, Point, TileCoord},
    viewport::{Viewport, ViewportTransform},
};
use crate::input::{
    events::{EventKind, InputEvent, MapEvent},
    handler::{Action, EventManager, InputHandler, ListenerId},
};
use crate::tiles::{
    range::TilePlacement,
    source::{OpenStreetMapSource, TileSource},
};

/// Two centers closer than this (degrees) count as the same notification
const CENTER_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    /// Transform follows raw gesture deltas
    Dragging,
    /// Transform follows a spring transition
    Animating,
}

pub struct Map {
    viewport: Viewport,
    options: MapOptions,
    state: InteractionState,
    transition: Option<Transition>,
    input_handler: InputHandler,
    event_manager: EventManager,
    tile_source: Box<dyn TileSource>,
    /// Last center reported through `CenterChanged`
    last_center: Option<GeoPoint>,
}

impl Map {
    pub fn new(center: GeoPoint, zoom: f64, size: Point) -> Self {
        let viewport = Viewport::new(center, zoom, size);
        Self::with_options(viewport, MapOptions::default(), Box::new(OpenStreetMapSource))
    }

    /// Builds a map around an existing viewport. Zoom limits from `options`
    /// are applied to the viewport.
    ///
    /// Invalid options degrade instead of failing: non-finite zoom limits keep
    /// the viewport's own limits and an invalid spring disables animation.
    /// Use [`MapBuilder`](crate::MapBuilder) to have them rejected.
    pub fn with_options(
        mut viewport: Viewport,
        mut options: MapOptions,
        tile_source: Box<dyn TileSource>,
    ) -> Self {
        if let Err(err) = options.validate() {
            log::warn!("map options are invalid, falling back where needed: {err}");
        }
        viewport.set_zoom_limits(options.min_zoom, options.max_zoom);
        options.min_zoom = viewport.min_zoom();
        options.max_zoom = viewport.max_zoom();
        Self {
            viewport,
            input_handler: InputHandler::new(options.interaction),
            options,
            state: InteractionState::Idle,
            transition: None,
            event_manager: EventManager::new(),
            tile_source,
            last_center: None,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn transform(&self) -> ViewportTransform {
        self.viewport.transform()
    }

    pub fn center(&self) -> GeoPoint {
        self.viewport.center()
    }

    pub fn zoom(&self) -> f64 {
        self.viewport.zoom()
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.state == InteractionState::Dragging
    }

    pub fn visible_tiles(&self) -> Vec<TileCoord> {
        self.viewport.visible_tiles()
    }

    pub fn tile_placements(&self) -> Vec<TilePlacement> {
        self.viewport.tile_placements()
    }

    /// URL of every visible tile, in the same order as `visible_tiles`
    pub fn tile_urls(&self) -> Vec<(TileCoord, String)> {
        self.visible_tiles()
            .into_iter()
            .map(|coord| (coord, self.tile_source.url(coord)))
            .collect()
    }

    pub fn tile_source(&self) -> &dyn TileSource {
        self.tile_source.as_ref()
    }

    pub fn set_tile_source(&mut self, source: Box<dyn TileSource>) {
        self.tile_source = source;
    }

    /// Register an event listener
    pub fn on<F>(&mut self, kind: EventKind, callback: F) -> ListenerId
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.event_manager.on(kind, callback)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.event_manager.off(id)
    }

    /// Moves the view so `center` is in the middle of the screen.
    ///
    /// Animated when enabled and the screen has been laid out; repeated calls
    /// with the same point converge on the same transform. Ignored while the
    /// user is dragging so an echoed `CenterChanged` cannot fight the gesture.
    pub fn set_center(&mut self, center: GeoPoint) {
        if !(center.lng.is_finite() && center.lat.is_finite()) {
            log::debug!("ignoring non-finite center {center:?}");
            return;
        }
        if self.is_dragging() {
            log::debug!("ignoring set_center during drag");
            return;
        }

        let spring = match self.options.pan_spring() {
            Some(spring) if self.viewport.is_laid_out() => spring,
            _ => return self.jump_to(center),
        };

        match self.transition_kind() {
            Some(TransitionKind::Center { .. }) => {
                if let Some(transition) = self.transition.as_mut() {
                    transition.retarget_center(&self.viewport, center);
                }
            }
            kind => {
                // A wheel zoom in flight finishes at its target before panning
                if let Some(zoom) = self.transition.as_ref().and_then(Transition::target_zoom) {
                    if let Some(TransitionKind::ZoomAt { anchor }) = kind {
                        self.viewport.zoom_at(anchor, zoom);
                        self.view_changed();
                    }
                }
                let goal = self.viewport.pan_for_center(&center);
                if kind.is_none()
                    && goal.distance_to(&self.viewport.transform().pan()) < spring.rest_delta
                {
                    return self.jump_to(center);
                }
                self.start_transition(Transition::center(&self.viewport, center, spring));
            }
        }
        self.flush();
    }

    /// Re-centers immediately, cancelling any animation
    pub fn jump_to(&mut self, center: GeoPoint) {
        self.interrupt_animation();
        self.viewport.set_center(center);
        self.view_changed();
        self.settle();
        self.flush();
    }

    /// The host resized the view; the geographic center stays put
    pub fn on_screen_resize(&mut self, width: f64, height: f64) {
        let before = self.viewport.transform().pan();
        self.viewport.on_screen_resize(width, height);
        let shift = self.viewport.transform().pan().subtract(&before);

        if let Some(transition) = self.transition.as_mut() {
            if let TransitionKind::Center { target } = transition.kind() {
                transition.shift_pan(shift);
                transition.retarget_center(&self.viewport, target);
            }
        }

        self.view_changed();
        self.settle();
        self.flush();
    }

    /// Programmatic pan by a screen-pixel delta, applied immediately
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if !self.is_dragging() {
            self.interrupt_animation();
        }
        self.viewport.pan(dx, dy);
        self.view_changed();
        self.settle();
        self.flush();
    }

    /// Zooms keeping the point under `screen_point` fixed. Animated when
    /// enabled, immediate otherwise and always immediate during a drag.
    pub fn zoom_at(&mut self, screen_point: Point, zoom: f64) {
        let animate = !self.is_dragging();
        self.apply_zoom(screen_point, zoom, animate);
        self.flush();
    }

    /// Zooms around the screen center
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom_at(self.viewport.screen_center(), zoom);
    }

    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.interrupt_animation();
        self.viewport.set_zoom_limits(min_zoom, max_zoom);
        self.options.min_zoom = self.viewport.min_zoom();
        self.options.max_zoom = self.viewport.max_zoom();
        self.view_changed();
        self.settle();
        self.flush();
    }

    pub fn fit_bounds(&mut self, bounds: &GeoBounds, padding: f64) {
        self.interrupt_animation();
        self.viewport.fit_bounds(bounds, padding);
        self.view_changed();
        self.settle();
        self.flush();
    }

    /// Enters Dragging. Any running animation stops where it is: the viewport
    /// already holds the live animated value, so nothing snaps back.
    pub fn start_drag(&mut self) {
        if self.is_dragging() {
            return;
        }
        self.interrupt_animation();
        self.state = InteractionState::Dragging;
        log::debug!("drag started at {:?}", self.viewport.transform());
        self.event_manager.emit(MapEvent::DragStart);
        self.flush();
    }

    /// Raw gesture delta; starts a drag if none is in progress
    pub fn drag(&mut self, dx: f64, dy: f64) {
        if !self.is_dragging() {
            self.start_drag();
        }
        self.viewport.pan(dx, dy);
        self.view_changed();
        self.flush();
    }

    pub fn end_drag(&mut self) {
        if !self.is_dragging() {
            return;
        }
        self.state = InteractionState::Idle;
        log::debug!("drag ended at {:?}", self.viewport.transform());
        self.event_manager.emit(MapEvent::DragEnd);
        self.settle();
        self.flush();
    }

    /// Routes a host gesture through the input handler
    pub fn handle_input(&mut self, event: InputEvent) {
        let base_zoom = self
            .transition
            .as_ref()
            .and_then(Transition::target_zoom)
            .unwrap_or_else(|| self.viewport.zoom());

        for action in self.input_handler.handle_event(&event, base_zoom) {
            self.execute_action(action);
        }
    }

    fn execute_action(&mut self, action: Action) {
        match action {
            Action::StartDrag => self.start_drag(),
            Action::Drag { delta } => self.drag(delta.x, delta.y),
            Action::EndDrag => self.end_drag(),
            Action::ZoomAt {
                anchor,
                zoom,
                animate,
            } => {
                self.apply_zoom(anchor, zoom, animate && !self.is_dragging());
                self.flush();
            }
            Action::Resize { size } => self.on_screen_resize(size.x, size.y),
        }
    }

    /// Advances the running animation by `dt_ms`. Returns whether it is
    /// still running afterwards.
    pub fn update(&mut self, dt_ms: f64) -> bool {
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };

        let settled = transition.step(&mut self.viewport, dt_ms);
        self.view_changed();

        if settled {
            self.transition = None;
            self.state = InteractionState::Idle;
            log::debug!("animation settled at {:?}", self.viewport.transform());
            self.event_manager.emit(MapEvent::AnimationEnd);
            self.settle();
        }

        self.flush();
        !settled
    }

    fn apply_zoom(&mut self, anchor: Point, zoom: f64, animate: bool) {
        if !zoom.is_finite() {
            log::debug!("ignoring non-finite zoom {zoom}");
            return;
        }

        let spring = match self.options.zoom_spring() {
            Some(spring) if animate && self.viewport.is_laid_out() => spring,
            _ => {
                if !self.is_dragging() {
                    self.interrupt_animation();
                }
                self.viewport.zoom_at(anchor, zoom);
                self.view_changed();
                self.settle();
                return;
            }
        };

        match self.transition_kind() {
            Some(TransitionKind::ZoomAt { .. }) => {
                if let Some(transition) = self.transition.as_mut() {
                    transition.retarget_zoom(&self.viewport, anchor, zoom);
                }
            }
            kind => {
                if kind.is_none() && self.viewport.clamp_zoom(zoom) == self.viewport.zoom() {
                    return;
                }
                self.start_transition(Transition::zoom_at(&self.viewport, anchor, zoom, spring));
            }
        }
    }

    fn transition_kind(&self) -> Option<TransitionKind> {
        self.transition.as_ref().map(Transition::kind)
    }

    fn start_transition(&mut self, transition: Transition) {
        let was_animating = self.transition.is_some();
        log::debug!("starting {:?} transition", transition.kind());
        self.transition = Some(transition);
        self.state = InteractionState::Animating;
        if !was_animating {
            self.event_manager.emit(MapEvent::AnimationStart);
        }
    }

    fn interrupt_animation(&mut self) {
        if self.transition.take().is_some() {
            log::debug!("animation interrupted at {:?}", self.viewport.transform());
            self.state = InteractionState::Idle;
            self.event_manager.emit(MapEvent::AnimationEnd);
        }
    }

    fn view_changed(&mut self) {
        self.event_manager.emit(MapEvent::ViewChanged {
            transform: self.viewport.transform(),
        });
    }

    /// Reports the center if the view is at rest and it moved since the last report
    fn settle(&mut self) {
        if self.state != InteractionState::Idle {
            return;
        }
        let center = self.viewport.center();
        if !(center.lng.is_finite() && center.lat.is_finite()) {
            return;
        }
        let moved = self
            .last_center
            .map_or(true, |last| last.max_abs_diff(&center) > CENTER_EPSILON);
        if moved {
            self.last_center = Some(center);
            self.event_manager.emit(MapEvent::CenterChanged {
                center,
                zoom: self.viewport.zoom(),
            });
        }
    }

    fn flush(&mut self) {
        self.event_manager.process_events();
    }
}
