use glam::Vec2;
use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{MouseEvent, TouchEvent, Window};

use super::PointerTracker;

/// Window-level pointer, touch and resize listeners feeding a
/// [`PointerTracker`]. Dropping the handler unsubscribes every listener.
pub struct WasmInputHandler {
    listeners: Vec<EventListener>,
}

impl WasmInputHandler {
    pub fn attach<F>(window: &Window, tracker: PointerTracker, mut on_resize: F) -> Self
    where
        F: FnMut() + 'static,
    {
        let mut listeners = Vec::new();

        // Listen on the window so the whole page steers the torus, not just the canvas.
        {
            let tracker = tracker.clone();
            let target = window.clone();
            listeners.push(EventListener::new(window, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let position = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                tracker.pointer_moved(position, window_size(&target));
            }));
        }

        {
            let target = window.clone();
            listeners.push(EventListener::new_with_options(
                window,
                "touchmove",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    let Some(event) = event.dyn_ref::<TouchEvent>() else {
                        return;
                    };
                    let first = event
                        .touches()
                        .get(0)
                        .map(|touch| Vec2::new(touch.client_x() as f32, touch.client_y() as f32));
                    tracker.touch_moved(first, window_size(&target));
                },
            ));
        }

        listeners.push(EventListener::new(window, "resize", move |_| on_resize()));

        Self { listeners }
    }
}

impl Drop for WasmInputHandler {
    fn drop(&mut self) {
        self.listeners.clear();
    }
}

/// `innerWidth` x `innerHeight` of the window, zero when unavailable.
pub fn window_size(window: &Window) -> Vec2 {
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    Vec2::new(width as f32, height as f32)
}
