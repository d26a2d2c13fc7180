//! Browser bindings: canvas lookup, animation frames, resize and pointer
//! events. Everything here is glue; the effects themselves live in `sim`.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, MouseEvent, Window};

use super::{CONSTELLATION_CANVAS_ID, PARTICLE_CANVAS_ID};
use crate::driver::{self, FrameScheduler, Stage, StopToken};
use crate::paint::CanvasSurface;
use crate::settings::Settings;
use crate::sim::{OrbConstellation, ParticleField, SharedPointer, Simulation};
use crate::viewport::Viewport;

/// `requestAnimationFrame` scheduler
pub struct AnimationFrames {
    window: Window,
}

impl AnimationFrames {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for AnimationFrames {
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) {
        // Frees itself once the browser has called it
        let closure = Closure::once_into_js(move |time: f64| {
            callback(time);
        });
        let _ = self.window.request_animation_frame(closure.unchecked_ref());
    }
}

/// Loops started on this page
pub struct Effects {
    pub particles: Option<StopToken>,
    pub constellation: Option<StopToken>,
}

/// Mount every effect whose canvas exists on the page
pub fn run() -> Effects {
    let Some(window) = web_sys::window() else {
        log::warn!("No window, effects disabled");
        return Effects {
            particles: None,
            constellation: None,
        };
    };
    let Some(document) = window.document() else {
        log::warn!("No document, effects disabled");
        return Effects {
            particles: None,
            constellation: None,
        };
    };

    let settings = Settings::load();
    let seed = js_sys::Date::now() as u64;
    log::info!("Mounting effects with seed: {}", seed);

    Effects {
        particles: mount_particle_field(&window, &document, &settings, seed),
        constellation: mount_constellation(&window, &document, &settings, seed.wrapping_add(1)),
    }
}

/// Hero background particles on `#hero-particles`
pub fn mount_particle_field(
    window: &Window,
    document: &Document,
    settings: &Settings,
    seed: u64,
) -> Option<StopToken> {
    let canvas = find_canvas(document, PARTICLE_CANVAS_ID)?;
    let viewport = viewport_of(window, &canvas);
    let field = ParticleField::new(settings.particles.clone(), viewport.css_size, seed);
    let token = mount(window, canvas, viewport, field)?;
    log::info!(
        "Particle field running ({} particles)",
        settings.particles.count
    );
    Some(token)
}

/// Skills constellation on `#skills-canvas`, following the pointer
pub fn mount_constellation(
    window: &Window,
    document: &Document,
    settings: &Settings,
    seed: u64,
) -> Option<StopToken> {
    let canvas = find_canvas(document, CONSTELLATION_CANVAS_ID)?;
    let viewport = viewport_of(window, &canvas);
    let pointer = SharedPointer::new();
    wire_pointer(&canvas, pointer.clone());

    let constellation = OrbConstellation::new(
        settings.constellation.clone(),
        pointer,
        viewport.css_size,
        seed,
    );
    let token = mount(window, canvas, viewport, constellation)?;
    log::info!(
        "Constellation running ({} orbs)",
        settings.constellation.skills.len()
    );
    Some(token)
}

fn mount<M: Simulation + 'static>(
    window: &Window,
    canvas: HtmlCanvasElement,
    viewport: Viewport,
    sim: M,
) -> Option<StopToken> {
    let Some(surface) = CanvasSurface::new(canvas.clone()) else {
        log::warn!("#{}: no 2d context", canvas.id());
        return None;
    };
    let stage = Rc::new(RefCell::new(Stage::new(surface, sim)));
    stage.borrow_mut().resize(&viewport);
    wire_resize(window, canvas, stage.clone());

    let scheduler = Rc::new(AnimationFrames::new(window.clone()));
    Some(driver::start(scheduler, stage))
}

/// Missing canvas means the effect is simply not on this page
fn find_canvas(document: &Document, id: &str) -> Option<HtmlCanvasElement> {
    let Some(element) = document.get_element_by_id(id) else {
        log::info!("#{} not found, effect disabled", id);
        return None;
    };
    match element.dyn_into::<HtmlCanvasElement>() {
        Ok(canvas) => Some(canvas),
        Err(_) => {
            log::warn!("#{} is not a canvas, effect disabled", id);
            None
        }
    }
}

fn viewport_of(window: &Window, canvas: &HtmlCanvasElement) -> Viewport {
    let rect = canvas.get_bounding_client_rect();
    Viewport::new(
        rect.width() as f32,
        rect.height() as f32,
        window.device_pixel_ratio(),
    )
}

fn wire_resize<M: Simulation + 'static>(
    window: &Window,
    canvas: HtmlCanvasElement,
    stage: Rc<RefCell<Stage<CanvasSurface, M>>>,
) {
    let win = window.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        let viewport = viewport_of(&win, &canvas);
        stage.borrow_mut().resize(&viewport);
    });
    let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointer(canvas: &HtmlCanvasElement, pointer: SharedPointer) {
    // Move: client coordinates -> surface-local CSS pixels
    {
        let pointer = pointer.clone();
        let target = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = target.get_bounding_client_rect();
            pointer.set(Vec2::new(
                (event.client_x() as f64 - rect.left()) as f32,
                (event.client_y() as f64 - rect.top()) as f32,
            ));
        });
        let _ = canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Leave: fall back to the surface center
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            pointer.clear();
        });
        let _ = canvas.add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
