use crate::core::constants::{MAX_FRAME_DELTA_MS, PAN_REST_DELTA, PAN_REST_VELOCITY};
use serde::{Deserialize, Serialize};

/// Integration sub-step in milliseconds
const STEP_MS: f64 = 1.0;

/// Physical parameters of a damped spring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Settled once |value - target| drops below this
    pub rest_delta: f64,
    /// ...and |velocity| (units per second) drops below this
    pub rest_velocity: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 170.0,
            damping: 26.0,
            mass: 1.0,
            rest_delta: PAN_REST_DELTA,
            rest_velocity: PAN_REST_VELOCITY,
        }
    }
}

impl SpringConfig {
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            ..Self::default()
        }
    }

    /// Same physics with different settle tolerances
    pub fn with_rest(mut self, rest_delta: f64, rest_velocity: f64) -> Self {
        self.rest_delta = rest_delta;
        self.rest_velocity = rest_velocity;
        self
    }

    /// All parameters must be finite and strictly positive, and the spring
    /// must be stable under the fixed integration sub-step.
    pub fn is_valid(&self) -> bool {
        let positive = [
            self.stiffness,
            self.damping,
            self.mass,
            self.rest_delta,
            self.rest_velocity,
        ]
        .iter()
        .all(|v| v.is_finite() && *v > 0.0);

        positive && self.is_stable()
    }

    /// Semi-implicit Euler stays bounded while `h²·k/m + 2·h·c/m < 4`
    fn is_stable(&self) -> bool {
        let h = STEP_MS / 1000.0;
        h * h * self.stiffness / self.mass + 2.0 * h * self.damping / self.mass < 4.0
    }
}

/// A single damped harmonic oscillator chasing `target`.
///
/// Integrated with semi-implicit Euler in fixed 1 ms sub-steps so the result
/// does not depend on the host's frame rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    value: f64,
    velocity: f64,
    target: f64,
    config: SpringConfig,
}

impl Spring {
    /// A spring at rest at `value`
    pub fn new(value: f64, config: SpringConfig) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            config,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Moves the target; current value and velocity are kept
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Translates value and target together; velocity is kept
    pub fn shift(&mut self, offset: f64) {
        self.value += offset;
        self.target += offset;
    }

    /// Jumps to `value` and stops
    pub fn snap(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < self.config.rest_delta
            && self.velocity.abs() < self.config.rest_velocity
    }

    /// Advances by `dt_ms` milliseconds and reports whether the spring is at rest.
    /// A settled spring lands exactly on its target.
    pub fn step(&mut self, dt_ms: f64) -> bool {
        let mut remaining = dt_ms.clamp(0.0, MAX_FRAME_DELTA_MS);

        while remaining > 0.0 && !self.is_settled() {
            let h = remaining.min(STEP_MS);
            let dt = h / 1000.0;

            let spring_force = -self.config.stiffness * (self.value - self.target);
            let damping_force = -self.config.damping * self.velocity;
            self.velocity += (spring_force + damping_force) / self.config.mass * dt;
            self.value += self.velocity * dt;

            remaining -= h;
        }

        if !(self.value.is_finite() && self.velocity.is_finite()) {
            log::warn!("spring diverged with {:?}, snapping to target", self.config);
            self.snap(self.target);
            return true;
        }

        if self.is_settled() {
            self.snap(self.target);
            true
        } else {
            false
        }
    }
}
