// app/primary.rs
// Seeded generator of beam primaries: uniform on the upper hemisphere of
// the world sphere, aimed at the chamber center.

use ultraviolet::DVec3;

use crate::config;

/// One primary track at its production vertex (global frame, cm).
#[derive(Clone, Debug)]
pub struct Primary {
    pub species: String,
    pub ekin_mev: f64,
    pub pos_cm: DVec3,
    pub dir: DVec3,
}

pub struct PrimaryGenerator {
    species: String,
    ekin_mev: f64,
    radius_cm: f64,
    seed: u64,
}

impl PrimaryGenerator {
    pub fn new(species: &str, ekin_mev: f64, seed: u64) -> Self {
        Self {
            species: species.to_string(),
            ekin_mev,
            radius_cm: config::WORLD_RADIUS_CM,
            seed,
        }
    }

    /// Deterministic per event: the same (seed, event) pair always yields
    /// the same primary, independent of worker scheduling.
    pub fn generate(&self, event_id: u64) -> Primary {
        let mut rng =
            fastrand::Rng::with_seed(self.seed ^ event_id.wrapping_mul(0x9e37_79b9_7f4a_7c15));

        // Polar angle from the stack normal (+y), restricted to the upper
        // hemisphere so primaries always reach the gap from above.
        let theta = rng.f64() * 0.5 * std::f64::consts::PI;
        let phi = rng.f64() * std::f64::consts::TAU;
        let (sin_t, cos_t) = theta.sin_cos();
        let pos = DVec3::new(
            self.radius_cm * sin_t * phi.cos(),
            self.radius_cm * cos_t,
            self.radius_cm * sin_t * phi.sin(),
        );
        Primary {
            species: self.species.clone(),
            ekin_mev: self.ekin_mev,
            pos_cm: pos,
            dir: (-pos).normalized(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries_sit_on_the_upper_hemisphere_and_aim_inward() {
        let gen = PrimaryGenerator::new("mu-", 5e3, 1);
        for event in 0..100 {
            let p = gen.generate(event);
            assert!((p.pos_cm.mag() - config::WORLD_RADIUS_CM).abs() < 1e-9);
            assert!(p.pos_cm.y >= 0.0);
            assert!((p.dir.mag() - 1.0).abs() < 1e-12);
            // Pointing back at the origin.
            assert!((p.dir + p.pos_cm.normalized()).mag() < 1e-12);
        }
    }

    #[test]
    fn generation_is_deterministic_per_event() {
        let gen = PrimaryGenerator::new("mu-", 5e3, 7);
        let a = gen.generate(13);
        let b = gen.generate(13);
        let c = gen.generate(14);
        assert_eq!(a.pos_cm, b.pos_cm);
        assert!((a.pos_cm - c.pos_cm).mag() > 1e-6);
    }
}
