//! Portfolio FX entry point
//!
//! On the web, mounts the particle field and skills constellation on their
//! canvases. Natively there is nothing to draw on, so a short recorded run
//! is logged instead.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("Portfolio FX starting...");

    let effects = portfolio_fx::platform::web::run();
    log::info!(
        "Effects running: particles={} constellation={}",
        effects.particles.is_some(),
        effects.constellation.is_some()
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Portfolio FX (native) starting...");
    log::info!("Native mode has no canvas - run with `trunk serve` for the web version");

    smoke_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive both effects against recording surfaces for two seconds of frames
#[cfg(not(target_arch = "wasm32"))]
fn smoke_run() {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use portfolio_fx::driver::{self, ManualScheduler, Stage};
    use portfolio_fx::{OrbConstellation, ParticleField, RecordingSurface, Settings, SharedPointer, Viewport};

    const FRAMES: usize = 120;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    let settings = Settings::load();
    let viewport = Viewport::new(1280.0, 720.0, 2.0);
    let scheduler = Rc::new(ManualScheduler::new());

    let field = ParticleField::new(settings.particles.clone(), viewport.css_size, 1);
    let particles = Rc::new(RefCell::new(Stage::new(RecordingSurface::new(), field)));
    particles.borrow_mut().resize(&viewport);

    let pointer = SharedPointer::new();
    let orbs = OrbConstellation::new(settings.constellation.clone(), pointer.clone(), viewport.css_size, 2);
    let constellation = Rc::new(RefCell::new(Stage::new(RecordingSurface::new(), orbs)));
    constellation.borrow_mut().resize(&viewport);

    let particle_loop = driver::start(scheduler.clone(), particles.clone());
    let constellation_loop = driver::start(scheduler.clone(), constellation.clone());

    for frame in 0..FRAMES {
        // Sweep the pointer across the surface for the first second
        if frame < FRAMES / 2 {
            pointer.set(Vec2::new(frame as f32 * 20.0, 360.0));
        } else {
            pointer.clear();
        }
        scheduler.run_frame(frame as f64 * FRAME_MS);
    }
    particle_loop.stop();
    constellation_loop.stop();
    scheduler.run_frame(FRAMES as f64 * FRAME_MS);

    let particle_draws = particles.borrow().surface().commands.len();
    let constellation = constellation.borrow();
    let links = constellation.surface().lines().count();
    let in_bounds = constellation.simulation().orbs().iter().all(|o| {
        o.pos.x >= o.radius
            && o.pos.x <= viewport.css_size.x - o.radius
            && o.pos.y >= o.radius
            && o.pos.y <= viewport.css_size.y - o.radius
    });

    log::info!("{} frames: {} particle draw calls, {} link lines", FRAMES, particle_draws, links);
    log::info!("Orbs within bounds: {}", in_bounds);
    println!("✓ Smoke run finished ({} frames)", FRAMES);
}
