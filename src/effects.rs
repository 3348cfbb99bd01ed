//! Ambient particle overlay.
//!
//! A full-viewport, pointer-transparent canvas runs an uncapped
//! requestAnimationFrame loop for the page's lifetime: each frame may spawn
//! one particle at the bottom edge, advances and fades every live particle,
//! culls the dead, and draws the survivors as soft white circles. The
//! simulation itself is pure (seedable RNG, no DOM) so it is testable on the
//! host.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, window};

use crate::dom;

/// Probability of spawning one new particle on a given frame.
pub const SPAWN_CHANCE: f64 = 0.3;

/// Particles above this y coordinate are off-screen and removed.
const TOP_CULL_Y: f64 = -10.0;

// --- Seedable RNG -------------------------------------------------------------

/// Tiny linear congruential generator (not crypto secure). Seeded from
/// `performance.now()` in the browser and from fixed values in tests so the
/// particle simulation is deterministic under test.
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Browser-side constructor; falls back to a fixed seed without a clock.
    pub fn from_clock() -> Self {
        let now = window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0);
        Self::new(now as u32)
    }

    /// Uniform in [0, 1].
    pub fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(1_664_525)
            .wrapping_add(1_013_904_223);
        f64::from(self.state) / f64::from(u32::MAX)
    }
}

// --- Simulation ---------------------------------------------------------------

/// Ephemeral point in the overlay. Spawn -> rise-and-fade -> despawn; nothing
/// outside [`ParticleField`] ever holds a reference to one.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub opacity: f64,
    pub decay: f64,
}

impl Particle {
    fn spawn(rng: &mut Lcg, width: f64, height: f64) -> Self {
        Self {
            x: rng.next_f64() * width,
            y: height + 10.0,
            vx: (rng.next_f64() - 0.5) * 2.0,
            vy: -(rng.next_f64() * 3.0 + 1.0),
            size: rng.next_f64() * 3.0 + 1.0,
            opacity: rng.next_f64() * 0.5 + 0.2,
            decay: rng.next_f64() * 0.02 + 0.005,
        }
    }
}

#[derive(Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame: maybe spawn, integrate positions, fade, and cull
    /// anything fully faded or risen past the top edge.
    pub fn step(&mut self, rng: &mut Lcg, width: f64, height: f64) {
        if rng.next_f64() < SPAWN_CHANCE {
            self.particles.push(Particle::spawn(rng, width, height));
        }
        self.particles.retain_mut(|p| {
            p.x += p.vx;
            p.y += p.vy;
            p.opacity -= p.decay;
            p.opacity > 0.0 && p.y >= TOP_CULL_Y
        });
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

// --- Browser overlay ----------------------------------------------------------

struct EffectsState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    field: ParticleField,
    rng: Lcg,
}

thread_local! {
    static EFFECTS: RefCell<Option<EffectsState>> = RefCell::new(None);
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Create (or reuse) the overlay canvas, size it to the viewport, track
/// viewport resizes, and start the animation loop. Runs until page unload;
/// there is deliberately no stop control.
pub fn start_overlay(doc: &Document) -> Result<(), JsValue> {
    let win = dom::window()?;

    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("fx-overlay") {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id("fx-overlay");
        // Non-interactive full-viewport layer above the page content.
        c.set_attribute(
            "style",
            "position:fixed; top:0; left:0; width:100%; height:100%; pointer-events:none; z-index:1; opacity:0.3;",
        )
        .ok();
        doc.body()
            .ok_or_else(|| JsValue::from_str("no document body"))?
            .append_child(&c)?;
        c
    };
    resize_canvas(&canvas)?;

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    {
        let canvas_resize = canvas.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            resize_canvas(&canvas_resize).ok();
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    EFFECTS.with(|cell| {
        cell.replace(Some(EffectsState {
            canvas,
            ctx,
            field: ParticleField::new(),
            rng: Lcg::from_clock(),
        }))
    });

    start_overlay_loop();
    Ok(())
}

/// Canvas backing store tracks the viewport exactly.
fn resize_canvas(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let win = dom::window()?;
    let w = win.inner_width()?.as_f64().unwrap_or(0.0);
    let h = win.inner_height()?.as_f64().unwrap_or(0.0);
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);
    Ok(())
}

fn start_overlay_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        EFFECTS.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                overlay_tick(state);
            }
        });
        if let Some(w) = window() {
            let _ =
                w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

fn overlay_tick(state: &mut EffectsState) {
    let w = state.canvas.width() as f64;
    let h = state.canvas.height() as f64;
    state.ctx.clear_rect(0.0, 0.0, w, h);
    state.field.step(&mut state.rng, w, h);
    for p in state.field.iter() {
        state.ctx.begin_path();
        state
            .ctx
            .arc(p.x, p.y, p.size, 0.0, std::f64::consts::TAU)
            .ok();
        state
            .ctx
            .set_fill_style_str(&format!("rgba(255,255,255,{:.3})", p.opacity));
        state.ctx.fill();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcg_stays_in_unit_interval_and_is_deterministic() {
        let mut a = Lcg::new(42);
        let mut b = Lcg::new(42);
        for _ in 0..1000 {
            let v = a.next_f64();
            assert!((0.0..=1.0).contains(&v), "value {} out of range", v);
            assert_eq!(v.to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn spawned_particles_start_at_the_bottom_edge() {
        let mut rng = Lcg::new(7);
        for _ in 0..50 {
            let p = Particle::spawn(&mut rng, 800.0, 600.0);
            assert!((0.0..=800.0).contains(&p.x));
            assert_eq!(p.y, 610.0);
            assert!(p.vy < 0.0, "particles must rise");
            assert!(p.opacity > 0.0 && p.decay > 0.0);
        }
    }

    #[test]
    fn faded_particles_are_removed() {
        let mut field = ParticleField::new();
        field.particles.push(Particle {
            x: 10.0,
            y: 300.0,
            vx: 0.0,
            vy: -1.0,
            size: 2.0,
            opacity: 0.01,
            decay: 0.5,
        });
        let mut rng = Lcg::new(0);
        field.step(&mut rng, 800.0, 600.0);
        // The step may also spawn a fresh particle, but that one starts at
        // the bottom edge; the faded particle must not survive anywhere.
        assert!(
            field.iter().all(|p| p.y >= 600.0),
            "faded particle survived"
        );
    }

    #[test]
    fn offscreen_particles_are_removed() {
        let mut field = ParticleField::new();
        field.particles.push(Particle {
            x: 10.0,
            y: -9.0,
            vx: 0.0,
            vy: -5.0,
            size: 2.0,
            opacity: 0.9,
            decay: 0.0001,
        });
        let mut rng = Lcg::new(0);
        field.step(&mut rng, 800.0, 600.0);
        // Any incidental spawn sits at the bottom edge; the particle that
        // crossed the top cull line must be gone.
        assert!(
            field.iter().all(|p| p.y >= 600.0),
            "off-screen particle survived"
        );
    }

    #[test]
    fn population_stays_bounded_over_a_long_run() {
        // Worst-case lifetime is opacity/decay = 0.7 / 0.005 = 140 frames, so
        // the live set can never exceed 140 plus a small slack; with spawn
        // probability 0.3 the steady state is far lower.
        let mut field = ParticleField::new();
        let mut rng = Lcg::new(0xC0FFEE);
        let mut peak = 0;
        for _ in 0..10_000 {
            field.step(&mut rng, 800.0, 600.0);
            peak = peak.max(field.len());
        }
        assert!(peak <= 141, "population peaked at {}", peak);
        assert!(peak > 0, "simulation never spawned anything");
    }
}
