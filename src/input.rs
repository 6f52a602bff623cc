//! Tilt input port
//!
//! The simulation never talks to a sensor. The scheduler asks a `TiltSource`
//! for a reading each time the sampling timer fires and forwards it to
//! `GameState::set_horizontal_input`.

use std::cell::Cell;
use std::rc::Rc;

/// Something that can be sampled for a horizontal tilt reading
pub trait TiltSource {
    /// Latest reading, or `None` if no reading is available yet
    fn sample(&mut self) -> Option<f32>;
}

impl<F> TiltSource for F
where
    F: FnMut() -> Option<f32>,
{
    fn sample(&mut self) -> Option<f32> {
        self()
    }
}

/// A device lying flat
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTilt;

impl TiltSource for NoTilt {
    fn sample(&mut self) -> Option<f32> {
        None
    }
}

/// Latest-value slot shared between a sensor callback and the sampler.
///
/// The callback overwrites the value on every reading; sampling reads it
/// without consuming, so a steady tilt keeps moving the player.
#[derive(Debug, Clone, Default)]
pub struct SharedTilt {
    latest: Rc<Cell<Option<f32>>>,
}

impl SharedTilt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new reading (called from the sensor side)
    pub fn set(&self, value: f32) {
        self.latest.set(Some(value));
    }

    /// Forget the last reading, e.g. when the sensor goes away
    pub fn clear(&self) {
        self.latest.set(None);
    }
}

impl TiltSource for SharedTilt {
    fn sample(&mut self) -> Option<f32> {
        self.latest.get()
    }
}

/// Deterministic sine sweep, for demos and headless runs
#[derive(Debug, Clone)]
pub struct ScriptedTilt {
    amplitude: f32,
    /// Phase advance per sample (radians)
    step: f32,
    phase: f32,
}

impl ScriptedTilt {
    pub fn new(amplitude: f32, step: f32) -> Self {
        Self {
            amplitude,
            step,
            phase: 0.0,
        }
    }
}

impl TiltSource for ScriptedTilt {
    fn sample(&mut self) -> Option<f32> {
        let value = self.amplitude * self.phase.sin();
        self.phase = (self.phase + self.step) % std::f32::consts::TAU;
        Some(value)
    }
}
