use crate::core::{
    geo::{GeoPoint, Point},
    viewport::ViewportTransform,
};
use serde::{Deserialize, Serialize};

/// Gestures and layout changes delivered by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Pointer pressed and started moving
    DragStart { position: Point },
    /// Drag in progress; `delta` is in screen pixels
    Drag { delta: Point },
    /// Pointer released
    DragEnd,
    /// Scroll wheel; positive `delta` scrolls down (zooms out)
    Wheel { delta: f64, position: Point },
    DoubleClick { position: Point },
    /// Two-finger pinch; `scale` is relative to the previous pinch event
    Pinch { center: Point, scale: f64 },
    /// Viewport/window resize
    Resize { size: Point },
}

impl InputEvent {
    /// Gets the primary position associated with this event, if any
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::DragStart { position } => Some(*position),
            InputEvent::Wheel { position, .. } => Some(*position),
            InputEvent::DoubleClick { position } => Some(*position),
            InputEvent::Pinch { center, .. } => Some(*center),
            _ => None,
        }
    }

    /// Checks if this is a mouse/pointer event
    pub fn is_pointer_event(&self) -> bool {
        !matches!(self, InputEvent::Resize { .. })
    }
}

/// Notifications emitted by the map to its subscribers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapEvent {
    /// The transform changed; emitted on every frame and every drag step
    ViewChanged { transform: ViewportTransform },
    /// The view came to rest showing `center` (never emitted mid-drag)
    CenterChanged { center: GeoPoint, zoom: f64 },
    DragStart,
    DragEnd,
    AnimationStart,
    /// Animation settled or was interrupted
    AnimationEnd,
}

/// Discriminant used to register listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ViewChanged,
    CenterChanged,
    DragStart,
    DragEnd,
    AnimationStart,
    AnimationEnd,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::ViewChanged => "viewchanged",
            EventKind::CenterChanged => "centerchanged",
            EventKind::DragStart => "dragstart",
            EventKind::DragEnd => "dragend",
            EventKind::AnimationStart => "animationstart",
            EventKind::AnimationEnd => "animationend",
        }
    }
}

impl MapEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            MapEvent::ViewChanged { .. } => EventKind::ViewChanged,
            MapEvent::CenterChanged { .. } => EventKind::CenterChanged,
            MapEvent::DragStart => EventKind::DragStart,
            MapEvent::DragEnd => EventKind::DragEnd,
            MapEvent::AnimationStart => EventKind::AnimationStart,
            MapEvent::AnimationEnd => EventKind::AnimationEnd,
        }
    }
}
