#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use glam::Vec2;
use log::{error, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlCanvasElement, Window};

use crate::animation::FrameScheduler;
use crate::input::wasm::{window_size, WasmInputHandler};
use crate::lifecycle::{Host, Widget};
use crate::render::Renderer;
use crate::scene::Scene;

#[wasm_bindgen(start)]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

/// Mounts the torus widget into the element with the given id.
///
/// A missing element is not an error: the returned view is simply inert.
#[wasm_bindgen]
pub async fn mount(container_id: String) -> Result<DonutView, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window not available"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("document not available"))?;
    let Some(container) = document.get_element_by_id(&container_id) else {
        info!("#{container_id} not found; donut not mounted");
        return Ok(DonutView { mounted: None });
    };

    let host = WebHost::create(window.clone(), container)
        .await
        .map_err(to_js_error)?;
    let Some(widget) = Widget::mount(host).map_err(to_js_error)? else {
        return Ok(DonutView { mounted: None });
    };
    let widget = Rc::new(RefCell::new(widget));

    let frame_target = Rc::downgrade(&widget);
    let callback = Closure::<dyn FnMut()>::new(move || {
        let Some(widget) = frame_target.upgrade() else {
            return;
        };
        let result = widget.borrow_mut().on_frame();
        if let Err(err) = result {
            error!("frame failed: {err:#}");
        }
    });
    widget.borrow_mut().host_mut().frame_callback = Some(callback);

    let resize_target = Rc::downgrade(&widget);
    let tracker = widget.borrow().tracker();
    let input = WasmInputHandler::attach(&window, tracker, move || {
        if let Some(widget) = resize_target.upgrade() {
            widget.borrow_mut().on_resize();
        }
    });

    // A failed start has already unmounted the widget and removed the canvas.
    let started = widget.borrow_mut().start();
    if let Err(err) = started {
        drop(input);
        error!("donut failed to start: {err:#}");
        return Err(to_js_error(err));
    }

    Ok(DonutView {
        mounted: Some(Mounted {
            widget,
            input: Some(input),
        }),
    })
}

/// Handle returned to JavaScript for a mounted widget.
#[wasm_bindgen]
pub struct DonutView {
    mounted: Option<Mounted>,
}

struct Mounted {
    widget: Rc<RefCell<Widget<WebHost>>>,
    input: Option<WasmInputHandler>,
}

#[wasm_bindgen]
impl DonutView {
    #[wasm_bindgen(getter, js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Removes the listeners, cancels the queued frame and takes the canvas
    /// out of the page. Calling it again does nothing.
    pub fn unmount(&mut self) {
        let Some(mut mounted) = self.mounted.take() else {
            return;
        };
        mounted.input.take();
        mounted.widget.borrow_mut().unmount();
    }
}

impl Drop for DonutView {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Browser host: a canvas inside the container element, sized in CSS
/// pixels, scheduled with `requestAnimationFrame`.
pub struct WebHost {
    window: Window,
    container: Element,
    canvas: HtmlCanvasElement,
    renderer: Option<Renderer>,
    frame_callback: Option<Closure<dyn FnMut()>>,
}

impl WebHost {
    async fn create(window: Window, container: Element) -> Result<Self> {
        let document = window
            .document()
            .ok_or_else(|| anyhow!("document not available"))?;
        let canvas = document
            .create_element("canvas")
            .map_err(|err| anyhow!("failed to create canvas: {err:?}"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| anyhow!("element is not a canvas"))?;

        let size = element_size(&container);
        size_canvas(&canvas, size);

        let renderer = Renderer::new(wgpu::SurfaceTarget::Canvas(canvas.clone()), size)
            .await
            .context("failed to initialize renderer")?;

        Ok(Self {
            window,
            container,
            canvas,
            renderer: Some(renderer),
            frame_callback: None,
        })
    }
}

impl FrameScheduler for WebHost {
    type Handle = i32;

    fn request_frame(&mut self) -> Result<i32> {
        let callback = self
            .frame_callback
            .as_ref()
            .ok_or_else(|| anyhow!("frame callback not installed"))?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref::<js_sys::Function>())
            .map_err(|err| anyhow!("requestAnimationFrame failed: {err:?}"))
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(err) = self.window.cancel_animation_frame(handle) {
            warn!("cancelAnimationFrame failed: {err:?}");
        }
    }
}

impl Host for WebHost {
    fn container_size(&self) -> Option<(u32, u32)> {
        Some(element_size(&self.container))
    }

    fn window_size(&self) -> Vec2 {
        window_size(&self.window)
    }

    fn attach_surface(&mut self, size: (u32, u32)) -> Result<()> {
        self.container
            .append_child(&self.canvas)
            .map_err(|err| anyhow!("failed to attach canvas: {err:?}"))?;
        self.resize_surface(size);
        Ok(())
    }

    fn resize_surface(&mut self, size: (u32, u32)) {
        size_canvas(&self.canvas, size);
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(size);
        }
    }

    fn draw(&mut self, scene: &Scene) -> Result<()> {
        match self.renderer.as_mut() {
            Some(renderer) => renderer.draw(scene).context("failed to draw frame"),
            None => Ok(()),
        }
    }

    fn detach_surface(&mut self) {
        self.canvas.remove();
        if let Some(renderer) = self.renderer.take() {
            renderer.dispose();
        }
        self.frame_callback = None;
    }
}

fn element_size(element: &Element) -> (u32, u32) {
    (
        element.client_width().max(0) as u32,
        element.client_height().max(0) as u32,
    )
}

fn size_canvas(canvas: &HtmlCanvasElement, size: (u32, u32)) {
    canvas.set_width(size.0.max(1));
    canvas.set_height(size.1.max(1));
    let style = canvas.style();
    let properties = [
        ("display", "block".to_owned()),
        ("width", format!("{}px", size.0)),
        ("height", format!("{}px", size.1)),
    ];
    for (name, value) in properties {
        if let Err(err) = style.set_property(name, &value) {
            warn!("failed to set canvas {name}: {err:?}");
        }
    }
}

fn to_js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{err:#}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_installs_console_logger() {
        init_logging();
        assert!(log::max_level() >= log::LevelFilter::Info);
        assert!(log::log_enabled!(log::Level::Warn));
    }
}
