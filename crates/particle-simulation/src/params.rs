//! Tunable parameters for runtime editing
//!
//! Each record is read at the start of a tick and never written by the models.
//! Ranges are enforced by the host's sliders; the models only guard against
//! division by zero.

use particle_physics::{OrbitalType, SteeringWeights, COHERENCE_TEMPERATURE, CRITICAL_TEMPERATURE};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockingParams {
    pub separation: f32,
    pub alignment: f32,
    pub cohesion: f32,
    /// Target speed; also the speed cap
    pub speed: f32,
    pub perception_radius: f32,
    /// Cap on the combined steering per tick; keeps strong weights from overshooting
    pub max_force: f32,
    pub particle_count: usize,
    /// Alpha of the overpaint rectangle; lower means longer trails
    pub trail_length: f32,
}

impl Default for FlockingParams {
    fn default() -> Self {
        Self {
            separation: 1.8,
            alignment: 1.2,
            cohesion: 1.0,
            speed: 3.5,
            perception_radius: 60.0,
            max_force: 0.35,
            particle_count: 600,
            trail_length: 0.15,
        }
    }
}

impl FlockingParams {
    pub fn weights(&self) -> SteeringWeights {
        SteeringWeights {
            separation: self.separation,
            alignment: self.alignment,
            cohesion: self.cohesion,
            speed: self.speed,
            max_force: self.max_force,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairingParams {
    pub particle_count: usize,
    /// Reduced temperature T/Tc in [0, 1]
    pub temperature: f32,
    pub coupling_range: f32,
    pub coupling_strength: f32,
    pub friction: f32,
}

impl Default for PairingParams {
    fn default() -> Self {
        Self {
            particle_count: 800,
            temperature: 0.8,
            coupling_range: 60.0,
            coupling_strength: 0.05,
            friction: 0.02,
        }
    }
}

impl PairingParams {
    pub fn regime(&self) -> PairingRegime {
        PairingRegime::from_temperature(self.temperature)
    }
}

/// Phase of the electron gas for a given temperature
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairingRegime {
    /// Macroscopic quantum state with coherent drift
    Condensate,
    /// Pairs form and break
    Fluctuating,
    /// Thermal motion dominates
    Normal,
}

impl PairingRegime {
    pub fn from_temperature(temperature: f32) -> Self {
        if temperature < COHERENCE_TEMPERATURE {
            PairingRegime::Condensate
        } else if temperature < CRITICAL_TEMPERATURE {
            PairingRegime::Fluctuating
        } else {
            PairingRegime::Normal
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PairingRegime::Condensate => "Macroscopic quantum state (condensate)",
            PairingRegime::Fluctuating => "Transition region (pairing fluctuations)",
            PairingRegime::Normal => "Normal state (thermal motion)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityParams {
    pub gravitational_constant: f32,
    pub central_mass: f32,
    pub body_count: usize,
    pub capture_radius: f32,
    pub spawn_radius: f32,
    pub max_radius: f32,
    /// Respawn speed band, tangential
    pub orbit_speed_min: f32,
    pub orbit_speed_max: f32,
    /// Energy kept when bouncing off the outer boundary
    pub bounce_damping: f32,
    pub inward_nudge: f32,
    /// Velocity retained per tick
    pub drag: f32,
    pub softening: f32,
    pub trail_capacity: usize,
}

impl Default for GravityParams {
    fn default() -> Self {
        Self {
            gravitational_constant: 0.08,
            central_mass: 5.0,
            body_count: 12,
            capture_radius: 1.0,
            spawn_radius: 22.0,
            max_radius: 24.0,
            orbit_speed_min: 0.2,
            orbit_speed_max: 0.3,
            bounce_damping: 0.6,
            inward_nudge: 0.05,
            drag: 0.9995,
            softening: 0.1,
            trail_capacity: 90,
        }
    }
}

impl GravityParams {
    /// G·M of the central body
    pub fn gm(&self) -> f32 {
        self.gravitational_constant * self.central_mass
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitalParams {
    #[serde(with = "orbital_label")]
    pub orbital: OrbitalType,
    pub sample_count: usize,
    /// Rejection-sampling attempts per point before the last candidate is kept
    pub max_attempts: u32,
}

impl Default for OrbitalParams {
    fn default() -> Self {
        Self {
            orbital: OrbitalType::GroundState,
            sample_count: 5500,
            max_attempts: 10_000,
        }
    }
}

/// Serialize orbitals by their spectroscopic label ("1s", "2p", ...)
mod orbital_label {
    use particle_physics::OrbitalType;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(orbital: &OrbitalType, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(orbital.label())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OrbitalType, D::Error> {
        let label = String::deserialize(deserializer)?;
        OrbitalType::from_label(&label)
            .ok_or_else(|| D::Error::custom(format!("unknown orbital '{label}', expected 1s, 2s, 2p or 3d")))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkParams {
    pub max_nodes: usize,
    /// Canvas area per node, in square logical pixels
    pub area_per_node: f32,
    pub link_distance: f32,
    /// Velocity components are drawn from [-drift_speed / 2, drift_speed / 2]
    pub drift_speed: f32,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            max_nodes: 80,
            area_per_node: 15_000.0,
            link_distance: 180.0,
            drift_speed: 0.15,
        }
    }
}

impl NetworkParams {
    /// Node count for a canvas of the given size
    pub fn node_count(&self, width: f32, height: f32) -> usize {
        if self.area_per_node <= 0.0 {
            return self.max_nodes;
        }
        let by_area = (width.max(0.0) * height.max(0.0) / self.area_per_node) as usize;
        by_area.min(self.max_nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regimes_follow_thresholds() {
        assert_eq!(PairingRegime::from_temperature(0.1), PairingRegime::Condensate);
        assert_eq!(PairingRegime::from_temperature(0.45), PairingRegime::Fluctuating);
        assert_eq!(PairingRegime::from_temperature(0.6), PairingRegime::Normal);
        assert_eq!(PairingParams::default().regime(), PairingRegime::Normal);
    }

    #[test]
    fn test_network_count_capped() {
        let params = NetworkParams::default();
        assert_eq!(params.node_count(300.0, 100.0), 2);
        assert_eq!(params.node_count(4000.0, 4000.0), 80);
        assert_eq!(params.node_count(0.0, 100.0), 0);
    }

    #[test]
    fn test_gm() {
        let params = GravityParams {
            gravitational_constant: 0.5,
            central_mass: 4.0,
            ..Default::default()
        };
        assert_eq!(params.gm(), 2.0);
    }
}
