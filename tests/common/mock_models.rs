//! Simple models with known solutions, used to check the integrator

use kdv_rs::physics::{Field, PhysicalModel};

/// dy/dt = -k·y on every sample, exact solution y₀·exp(-k·t)
pub struct ExponentialDecay {
    points: usize,
    decay_rate: f64,
}

impl ExponentialDecay {
    pub fn new(points: usize, decay_rate: f64) -> Self {
        Self { points, decay_rate }
    }
}

impl PhysicalModel for ExponentialDecay {
    fn points(&self) -> usize {
        self.points
    }

    fn compute_physics(&self, field: &Field) -> Field {
        field * -self.decay_rate
    }

    fn name(&self) -> &str {
        "Exponential Decay"
    }
}

/// u_t = -c·u_x with a centred periodic difference
///
/// Conserves the sum of the samples exactly, like every operator of the
/// KdV family.
pub struct LinearAdvection {
    points: usize,
    h: f64,
    speed: f64,
}

impl LinearAdvection {
    pub fn new(points: usize, h: f64, speed: f64) -> Self {
        Self { points, h, speed }
    }
}

impl PhysicalModel for LinearAdvection {
    fn points(&self) -> usize {
        self.points
    }

    fn compute_physics(&self, field: &Field) -> Field {
        let n = field.len();
        Field::from_fn(n, |i, _| {
            let right = field[(i + 1) % n];
            let left = field[(i + n - 1) % n];
            -self.speed * (right - left) / (2.0 * self.h)
        })
    }

    fn name(&self) -> &str {
        "Linear Advection"
    }
}
