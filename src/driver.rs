//! Render driver
//!
//! Each effect runs its own loop: on every display refresh the stage clears
//! its surface, ticks the simulation, then asks for the next frame. Loops run
//! until their `StopToken` is stopped; the page never stops them, tests do.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::paint::Surface;
use crate::sim::Simulation;
use crate::viewport::Viewport;

/// Source of display-refresh callbacks (`requestAnimationFrame` on the web)
pub trait FrameScheduler {
    /// Run `callback` once on the next refresh with its timestamp in ms
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>);
}

/// Stops a running loop before its next frame
#[derive(Debug, Clone, Default)]
pub struct StopToken(Rc<Cell<bool>>);

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

/// A surface paired with the simulation that paints it
pub struct Stage<S: Surface, M: Simulation> {
    surface: S,
    sim: M,
}

impl<S: Surface, M: Simulation> Stage<S, M> {
    pub fn new(surface: S, sim: M) -> Self {
        Self { surface, sim }
    }

    /// Resize the surface and tell the simulation its new bounds
    pub fn resize(&mut self, viewport: &Viewport) {
        viewport.apply(&mut self.surface);
        self.sim.resize(viewport.css_size);
    }

    /// Clear, then update and draw every entity
    pub fn frame(&mut self, now_ms: f64) {
        let bounds = self.sim.bounds();
        self.surface.clear(bounds.x, bounds.y);
        self.sim.tick(&mut self.surface, now_ms);
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn simulation(&self) -> &M {
        &self.sim
    }
}

/// Call `on_frame` on every refresh until the returned token is stopped
pub fn run_loop<F, T>(scheduler: Rc<F>, on_frame: T) -> StopToken
where
    F: FrameScheduler + ?Sized + 'static,
    T: FnMut(f64) + 'static,
{
    let token = StopToken::new();
    schedule(scheduler, Rc::new(RefCell::new(on_frame)), token.clone());
    token
}

/// Drive a stage from `scheduler`
pub fn start<F, S, M>(scheduler: Rc<F>, stage: Rc<RefCell<Stage<S, M>>>) -> StopToken
where
    F: FrameScheduler + ?Sized + 'static,
    S: Surface + 'static,
    M: Simulation + 'static,
{
    run_loop(scheduler, move |now_ms| stage.borrow_mut().frame(now_ms))
}

fn schedule<F, T>(scheduler: Rc<F>, on_frame: Rc<RefCell<T>>, token: StopToken)
where
    F: FrameScheduler + ?Sized + 'static,
    T: FnMut(f64) + 'static,
{
    let next = Rc::clone(&scheduler);
    scheduler.request_frame(Box::new(move |now_ms| {
        if token.is_stopped() {
            return;
        }
        (&mut *on_frame.borrow_mut())(now_ms);
        if !token.is_stopped() {
            schedule(next, on_frame, token);
        }
    }));
}

/// Scheduler that runs frames only when told to
#[derive(Default)]
pub struct ManualScheduler {
    pending: RefCell<VecDeque<Box<dyn FnOnce(f64)>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callbacks waiting for the next frame
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Run the callbacks queued so far. Returns how many ran.
    pub fn run_frame(&self, now_ms: f64) -> usize {
        let due = std::mem::take(&mut *self.pending.borrow_mut());
        let count = due.len();
        for callback in due {
            callback(now_ms);
        }
        count
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) {
        self.pending.borrow_mut().push_back(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{DrawCommand, RecordingSurface};
    use crate::settings::FieldConfig;
    use crate::sim::ParticleField;
    use glam::Vec2;

    #[test]
    fn test_loop_reschedules_every_frame() {
        let scheduler = Rc::new(ManualScheduler::new());
        let frames = Rc::new(Cell::new(0));
        let seen = frames.clone();
        let _token = run_loop(scheduler.clone(), move |_| seen.set(seen.get() + 1));

        for i in 0..10 {
            assert_eq!(scheduler.pending(), 1);
            scheduler.run_frame(i as f64 * 16.0);
        }
        assert_eq!(frames.get(), 10);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_stop_token_ends_loop() {
        let scheduler = Rc::new(ManualScheduler::new());
        let frames = Rc::new(Cell::new(0));
        let seen = frames.clone();
        let token = run_loop(scheduler.clone(), move |_| seen.set(seen.get() + 1));

        scheduler.run_frame(0.0);
        token.stop();
        scheduler.run_frame(16.0);
        scheduler.run_frame(32.0);

        assert_eq!(frames.get(), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_independent_loops() {
        let scheduler = Rc::new(ManualScheduler::new());
        let a = Rc::new(Cell::new(0));
        let b = Rc::new(Cell::new(0));
        let (sa, sb) = (a.clone(), b.clone());
        let token_a = run_loop(scheduler.clone(), move |_| sa.set(sa.get() + 1));
        let _token_b = run_loop(scheduler.clone(), move |_| sb.set(sb.get() + 1));

        scheduler.run_frame(0.0);
        token_a.stop();
        scheduler.run_frame(16.0);

        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 2);
    }

    #[test]
    fn test_stage_clears_before_drawing() {
        let bounds = Vec2::new(320.0, 200.0);
        let mut config = FieldConfig::default();
        config.count = 3;
        let field = ParticleField::new(config, bounds, 1);
        let mut stage = Stage::new(RecordingSurface::new(), field);
        stage.frame(0.0);

        let commands = &stage.surface().commands;
        assert_eq!(
            commands[0],
            DrawCommand::Clear {
                width: 320.0,
                height: 200.0
            }
        );
        assert_eq!(commands.len(), 1 + 3 * 2);
    }

    #[test]
    fn test_stage_resize_updates_bounds_and_scale() {
        let field = ParticleField::new(FieldConfig::default(), Vec2::new(10.0, 10.0), 1);
        let mut stage = Stage::new(RecordingSurface::new(), field);
        let vp = Viewport::new(500.0, 250.0, 2.0);
        stage.resize(&vp);
        stage.resize(&vp);

        assert_eq!(stage.simulation().bounds(), Vec2::new(500.0, 250.0));
        assert_eq!(stage.surface().backing_size, (1000, 500));
        assert_eq!(stage.surface().transform_scale, 2.0);
    }

    #[test]
    fn test_start_drives_stage() {
        let scheduler = Rc::new(ManualScheduler::new());
        let mut config = FieldConfig::default();
        config.count = 2;
        let field = ParticleField::new(config, Vec2::new(100.0, 100.0), 4);
        let stage = Rc::new(RefCell::new(Stage::new(RecordingSurface::new(), field)));
        let token = start(scheduler.clone(), stage.clone());

        scheduler.run_frame(0.0);
        scheduler.run_frame(16.0);
        token.stop();
        scheduler.run_frame(32.0);

        let clears = stage
            .borrow()
            .surface()
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear { .. }))
            .count();
        assert_eq!(clears, 2);
    }
    #[test]
    fn test_frames_release_their_callbacks() {
        let scheduler = Rc::new(ManualScheduler::new());
        let held = Rc::new(Cell::new(0));
        let captured = held.clone();
        let token = run_loop(scheduler.clone(), move |_| captured.set(captured.get() + 1));

        for i in 0..100 {
            scheduler.run_frame(i as f64 * 16.0);
        }
        // One live frame callback, not one per frame already run
        assert_eq!(Rc::strong_count(&held), 2);

        token.stop();
        scheduler.run_frame(1600.0);
        assert_eq!(Rc::strong_count(&held), 1);
        assert_eq!(held.get(), 100);
    }
}
