use crate::physics::NBodySystem;
use crate::physics::math::Scalar;
use crate::prelude::*;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

#[derive(Deref, DerefMut, Debug, Clone, PartialEq)]
pub struct SharedRng(pub ChaCha8Rng);

impl SharedRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::default(),
        }
    }
}

impl Default for SharedRng {
    fn default() -> Self {
        Self(ChaCha8Rng::from_rng(&mut rand::rng()))
    }
}

/// The live simulation, stepped once per `steps_per_frame` each frame
#[derive(Resource, Deref, DerefMut, Debug, Clone)]
pub struct Simulation(pub NBodySystem);

/// Frame-level stepping control
#[derive(Resource, Debug, Clone)]
pub struct PhysicsTime {
    pub paused: bool,
    pub steps_per_frame: usize,
    /// Reset the system once simulated time passes this value
    pub restart_after: Option<Scalar>,
}

impl Default for PhysicsTime {
    fn default() -> Self {
        Self {
            paused: false,
            steps_per_frame: 1,
            restart_after: None,
        }
    }
}

impl PhysicsTime {
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn unpause(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

/// Tracks total energy against the value at the last (re)start
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EnergyMonitor {
    pub initial_energy: Scalar,
    pub latest_energy: Scalar,
    pub max_relative_drift: Scalar,
    /// Log every this many steps, 0 disables
    pub report_interval: u64,
    pub last_report_step: u64,
}

impl EnergyMonitor {
    pub fn new(initial_energy: Scalar, report_interval: u64) -> Self {
        Self {
            initial_energy,
            latest_energy: initial_energy,
            max_relative_drift: 0.0,
            report_interval,
            last_report_step: 0,
        }
    }

    /// `|E - E0| / |E0|`, or the absolute drift when `E0` is ~0
    pub fn relative_drift(&self, energy: Scalar) -> Scalar {
        let drift = (energy - self.initial_energy).abs();
        if self.initial_energy.abs() <= Scalar::EPSILON {
            drift
        } else {
            drift / self.initial_energy.abs()
        }
    }

    pub fn record(&mut self, energy: Scalar) {
        self.latest_energy = energy;
        self.max_relative_drift = self.max_relative_drift.max(self.relative_drift(energy));
    }

    /// Measure drift against `energy` from now on, keeping the report cadence
    pub fn rebaseline(&mut self, energy: Scalar) {
        self.initial_energy = energy;
        self.latest_energy = energy;
        self.max_relative_drift = 0.0;
    }

    /// Start over after the simulation was reset to step zero
    pub fn restart(&mut self, initial_energy: Scalar) {
        self.rebaseline(initial_energy);
        self.last_report_step = 0;
    }

    /// Whether a report is due at `step`, marking it as reported if so
    pub fn take_report(&mut self, step: u64) -> bool {
        if self.report_interval == 0 || step < self.last_report_step + self.report_interval {
            return false;
        }
        self.last_report_step = step;
        true
    }
}

/// Ends the run after a fixed number of frames
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLimit {
    pub max_frames: u64,
    pub frames: u64,
}

impl FrameLimit {
    pub fn new(max_frames: u64) -> Self {
        Self {
            max_frames,
            frames: 0,
        }
    }
}
