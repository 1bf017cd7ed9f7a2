use crate::{
    core::{config::InteractionOptions, geo::Point},
    input::events::{EventKind, InputEvent, MapEvent},
};
use fxhash::FxHashMap as HashMap;
use std::collections::VecDeque;

/// What the map should do in response to an input event
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    StartDrag,
    Drag { delta: Point },
    EndDrag,
    /// Zoom keeping `anchor` fixed; `animate` asks for spring smoothing
    ZoomAt {
        anchor: Point,
        zoom: f64,
        animate: bool,
    },
    Resize { size: Point },
}

/// Translates raw gestures into map actions according to the interaction options
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    pub options: InteractionOptions,
}

impl InputHandler {
    pub fn new(options: InteractionOptions) -> Self {
        Self { options }
    }

    /// `base_zoom` is the zoom further changes build on: the target of an
    /// in-flight zoom animation, otherwise the live zoom. This lets quick
    /// successive wheel ticks accumulate instead of restarting from the
    /// half-animated value.
    pub fn handle_event(&self, event: &InputEvent, base_zoom: f64) -> Vec<Action> {
        match event {
            InputEvent::DragStart { .. } if self.options.pan_on_drag => vec![Action::StartDrag],
            InputEvent::Drag { delta } if self.options.pan_on_drag => {
                vec![Action::Drag { delta: *delta }]
            }
            InputEvent::DragEnd if self.options.pan_on_drag => vec![Action::EndDrag],
            InputEvent::Wheel { delta, position } if self.options.zoom_on_wheel => {
                if !delta.is_finite() || *delta == 0.0 {
                    return vec![];
                }
                vec![Action::ZoomAt {
                    anchor: *position,
                    zoom: base_zoom - delta / self.options.wheel_px_per_zoom_level,
                    animate: true,
                }]
            }
            InputEvent::DoubleClick { position } if self.options.zoom_on_double_click => {
                vec![Action::ZoomAt {
                    anchor: *position,
                    zoom: base_zoom.floor() + 1.0,
                    animate: true,
                }]
            }
            InputEvent::Pinch { center, scale } if self.options.zoom_on_pinch => {
                if !(scale.is_finite() && *scale > 0.0) {
                    return vec![];
                }
                vec![Action::ZoomAt {
                    anchor: *center,
                    zoom: base_zoom + scale.log2(),
                    animate: false,
                }]
            }
            InputEvent::Resize { size } => vec![Action::Resize { size: *size }],
            _ => {
                log::trace!("input ignored by interaction options: {event:?}");
                vec![]
            }
        }
    }
}

/// Handle returned by [`EventManager::on`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&MapEvent) + Send + Sync>;

/// Observer registry: events are queued while the map mutates and
/// delivered in order once the operation finishes.
#[derive(Default)]
pub struct EventManager {
    listeners: HashMap<EventKind, Vec<(ListenerId, EventCallback)>>,
    event_queue: VecDeque<MapEvent>,
    next_id: u64,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, kind: EventKind, callback: F) -> ListenerId
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Box::new(callback)));
        id
    }

    /// Remove a listener; returns whether it was registered
    pub fn off(&mut self, id: ListenerId) -> bool {
        let mut removed = false;
        for callbacks in self.listeners.values_mut() {
            let before = callbacks.len();
            callbacks.retain(|(listener, _)| *listener != id);
            removed |= callbacks.len() != before;
        }
        removed
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: MapEvent) {
        self.event_queue.push_back(event);
    }

    /// Deliver all queued events in emission order
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            if let Some(callbacks) = self.listeners.get(&event.kind()) {
                for (_, callback) in callbacks {
                    callback(event);
                }
            }
        }

        events
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }
}
