//! Hydrogen orbital probability densities
//!
//! Simplified, non-normalized |ψ|² shapes in atomic units. Each density is paired
//! with its analytic peak so a rejection sampler can accept with probability
//! `density / peak`, and with a bounding half-extent that holds nearly all of
//! its probability mass.

use glam::Vec3;

/// Orbital selected for the probability cloud
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OrbitalType {
    /// 1s
    #[default]
    GroundState,
    /// 2s, radial node at r = 2
    FirstExcitedS,
    /// 2p_z, dumbbell along z
    FirstExcitedP,
    /// 3d_z², lobes along z with an equatorial ring
    DOrbital,
}

impl OrbitalType {
    pub const ALL: [OrbitalType; 4] = [
        OrbitalType::GroundState,
        OrbitalType::FirstExcitedS,
        OrbitalType::FirstExcitedP,
        OrbitalType::DOrbital,
    ];

    /// Spectroscopic label
    pub fn label(self) -> &'static str {
        match self {
            OrbitalType::GroundState => "1s",
            OrbitalType::FirstExcitedS => "2s",
            OrbitalType::FirstExcitedP => "2p",
            OrbitalType::DOrbital => "3d",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.label() == label)
    }

    /// Unnormalized |ψ|² at `p`; never negative
    pub fn density(self, p: Vec3) -> f32 {
        let r = p.length();
        match self {
            OrbitalType::GroundState => (-2.0 * r).exp(),
            OrbitalType::FirstExcitedS => {
                let psi = (2.0 - r) * (-r / 2.0).exp();
                psi * psi
            }
            OrbitalType::FirstExcitedP => {
                let psi = p.z * (-r / 2.0).exp();
                psi * psi
            }
            OrbitalType::DOrbital => {
                let psi = (3.0 * p.z * p.z - r * r) * (-r / 3.0).exp();
                psi * psi
            }
        }
    }

    /// Maximum of [`density`](Self::density) over all space
    pub fn peak_density(self) -> f32 {
        match self {
            // r = 0
            OrbitalType::GroundState => 1.0,
            // r = 0
            OrbitalType::FirstExcitedS => 4.0,
            // on the z axis at r = 2
            OrbitalType::FirstExcitedP => 4.0 * (-2.0f32).exp(),
            // on the z axis at r = 6
            OrbitalType::DOrbital => 5184.0 * (-4.0f32).exp(),
        }
    }

    /// Half-side of the sampling cube in atomic units
    pub fn extent(self) -> f32 {
        match self {
            OrbitalType::GroundState => 4.5,
            OrbitalType::FirstExcitedS => 14.0,
            OrbitalType::FirstExcitedP => 13.0,
            OrbitalType::DOrbital => 24.0,
        }
    }

    /// Half-size of the cloud on screen, in logical pixels
    pub fn view_radius(self) -> f32 {
        match self {
            OrbitalType::DOrbital => 450.0,
            _ => 350.0,
        }
    }

    /// Atomic units to view units
    pub fn view_scale(self) -> f32 {
        self.view_radius() / self.extent()
    }

    /// Acceptance probability for a candidate at `p`, in [0, 1]
    pub fn acceptance(self, p: Vec3) -> f32 {
        (self.density(p) / self.peak_density()).clamp(0.0, 1.0)
    }

    pub fn is_ground_state(self) -> bool {
        self == OrbitalType::GroundState
    }
}

impl std::fmt::Display for OrbitalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_on_grid(orbital: OrbitalType) -> f32 {
        let e = orbital.extent();
        let steps = 60;
        let mut best = 0.0f32;
        for i in 0..=steps {
            for j in 0..=steps {
                for k in 0..=steps {
                    let f = |n: i32| -e + 2.0 * e * n as f32 / steps as f32;
                    let p = Vec3::new(f(i), f(j), f(k));
                    best = best.max(orbital.density(p));
                }
            }
        }
        best
    }

    #[test]
    fn test_peak_bounds_density() {
        for orbital in OrbitalType::ALL {
            let sampled = max_on_grid(orbital);
            let peak = orbital.peak_density();
            assert!(
                sampled <= peak * 1.0001,
                "{orbital}: grid max {sampled} above peak {peak}"
            );
        }
    }

    #[test]
    fn test_peak_is_attained() {
        assert!((OrbitalType::GroundState.density(Vec3::ZERO) - 1.0).abs() < 1e-6);
        assert!((OrbitalType::FirstExcitedS.density(Vec3::ZERO) - 4.0).abs() < 1e-6);
        let p = OrbitalType::FirstExcitedP;
        assert!((p.density(Vec3::new(0.0, 0.0, 2.0)) - p.peak_density()).abs() < 1e-6);
        let d = OrbitalType::DOrbital;
        let rel = (d.density(Vec3::new(0.0, 0.0, 6.0)) - d.peak_density()).abs() / d.peak_density();
        assert!(rel < 1e-4);
    }

    #[test]
    fn test_radial_node_of_2s() {
        let at_node = OrbitalType::FirstExcitedS.density(Vec3::new(2.0, 0.0, 0.0));
        assert!(at_node.abs() < 1e-9);
    }

    #[test]
    fn test_2p_vanishes_on_nodal_plane() {
        let p = OrbitalType::FirstExcitedP.density(Vec3::new(1.5, -0.7, 0.0));
        assert_eq!(p, 0.0);
    }

    #[test]
    fn test_labels_round_trip() {
        for orbital in OrbitalType::ALL {
            assert_eq!(OrbitalType::from_label(orbital.label()), Some(orbital));
        }
        assert_eq!(OrbitalType::from_label("4f"), None);
    }
}
