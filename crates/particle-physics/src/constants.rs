//! Model constants
//!
//! Values are in "per reference frame" units: one tick of the integrator is one
//! 60 Hz display frame, and distances are logical canvas pixels unless noted.

/// Minimum squared length treated as a usable direction
pub const MIN_DISTANCE_SQ: f32 = 1.0e-12;

/// Particle-count changes smaller than this do not rebuild the entity store
pub const COUNT_HYSTERESIS: usize = 10;

// Flocking

/// Half-length of the heading-aligned segment drawn for each boid
pub const BOID_SEGMENT_HALF_LENGTH: f32 = 4.0;

// Pairing (Cooper pairs)

/// Above this temperature bonds break and no new bonds form
pub const CRITICAL_TEMPERATURE: f32 = 0.6;

/// Below this temperature the collective drift field is active
pub const COHERENCE_TEMPERATURE: f32 = 0.3;

/// Thermal jitter amplitude per unit temperature
pub const THERMAL_NOISE_SCALE: f32 = 0.2;

/// Drift field strength per unit of (1 - temperature)
pub const COHERENCE_STRENGTH: f32 = 0.02;

/// Spatial frequency of the sinusoidal cross-term in the drift field
pub const COHERENCE_WAVENUMBER: f32 = 0.01;

/// Amplitude of the sinusoidal cross-term in the drift field
pub const COHERENCE_CROSS_AMPLITUDE: f32 = 0.5;

/// Bond rest length as a fraction of the coupling range
pub const PAIR_REST_FRACTION: f32 = 0.5;

/// Bonds break beyond this multiple of the coupling range
pub const PAIR_BREAK_FACTOR: f32 = 3.0;

/// Share of the partner's velocity blended into a bonded particle each tick
pub const PAIR_VELOCITY_BLEND: f32 = 0.05;

/// Friction multiplier applied below the critical temperature
pub const CONDENSED_FRICTION_FACTOR: f32 = 1.5;

/// Grid cell side as a multiple of the coupling range
pub const PAIR_GRID_FACTOR: f32 = 1.5;

/// Initial velocity components are drawn from [-1, 1] times this
pub const PAIR_INITIAL_SPEED: f32 = 1.0;

// Gravity

/// Mass assigned to orbiting bodies when none is configured
pub const BODY_MASS: f32 = 1.0;

// Orbitals

/// Camera distance used for the orbital perspective projection
pub const ORBITAL_CAMERA_DISTANCE: f32 = 1200.0;

/// Focal length used for the orbital perspective projection
pub const ORBITAL_FOCAL_LENGTH: f32 = 800.0;

/// Points closer than this depth to the eye are clipped
pub const ORBITAL_NEAR_CLIP: f32 = 10.0;

/// Auto-rotation about the vertical axis per tick (radians)
pub const ORBITAL_AUTO_ROTATE: f32 = 0.002;

/// Damping applied when easing the view toward its target rotation
pub const ORBITAL_ROTATION_DAMPING: f32 = 0.05;

/// Pointer offset to rotation conversion
pub const ORBITAL_POINTER_GAIN: f32 = 0.0002;

/// Amplitude of the idle breathing motion of cloud samples
pub const ORBITAL_VIBRATION: f32 = 1.5;

/// Radius of the observed electron's orbit
pub const ELECTRON_ORBIT_RADIUS: f32 = 200.0;

/// Positional uncertainty applied to the observed electron (full width)
pub const ELECTRON_UNCERTAINTY: f32 = 20.0;

/// Number of projected positions kept for the observed electron
pub const ELECTRON_TRAIL_LENGTH: usize = 30;
