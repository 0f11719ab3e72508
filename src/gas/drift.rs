// gas/drift.rs
// Electron drift toward the anode plane and avalanche multiplication.
// The drift stage walks an electron down the field in fixed distance steps
// until it attaches, leaves the active volume, starts multiplying, or lands
// on the anode; the avalanche stage develops the multiplication from the
// drift endpoint to the anode.

use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Distribution, Exp, StandardNormal};
use ultraviolet::DVec3;

use super::table::GasTable;
use crate::config;
use crate::geometry::GasGap;

/// Terminal point of a drifted electron.
#[derive(Clone, Copy, Debug)]
pub struct DriftPoint {
    pub pos_cm: DVec3,
    pub time_ns: f64,
}

/// Electron and ion yield of one avalanche.
#[derive(Clone, Copy, Debug)]
pub struct AvalancheSize {
    pub electrons: u64,
    pub ions: u64,
}

/// Drift an electron from `pos_cm` toward the anode. Returns `None` when the
/// electron attaches or wanders out of the active volume before producing a
/// usable endpoint.
pub fn drift_electron(
    table: &GasTable,
    gap: &GasGap,
    rng: &mut StdRng,
    pos_cm: DVec3,
    time_ns: f64,
) -> Option<DriftPoint> {
    if !gap.contains(pos_cm) {
        return None;
    }
    let step = config::DRIFT_STEP_CM;
    let p_attach = table.attachment_per_cm * step;
    let p_multiply = table.effective_townsend_per_cm() * step;
    let sigma = table.diffusion_sqrt_cm * step.sqrt();

    let mut pos = pos_cm;
    let mut t = time_ns;
    loop {
        if rng.random::<f64>() < p_attach {
            return None;
        }
        if rng.random::<f64>() < p_multiply {
            return Some(DriftPoint { pos_cm: pos, time_ns: t });
        }
        let gx: f64 = StandardNormal.sample(rng);
        let gz: f64 = StandardNormal.sample(rng);
        pos.x += sigma * gx;
        pos.z += sigma * gz;
        pos.y -= step;
        t += step / table.drift_velocity_cm_ns;

        if pos.x.abs() > gap.half_x_cm || pos.z.abs() > gap.half_z_cm {
            return None;
        }
        if pos.y <= gap.anode_y_cm() {
            pos.y = gap.anode_y_cm();
            return Some(DriftPoint { pos_cm: pos, time_ns: t });
        }
    }
}

/// Develop an avalanche from `seed` to the anode plane. The mean yield is
/// exp(alpha_eff * d) over the remaining drift distance d, with the size
/// fluctuating exponentially around it (Furry law). A seed energetic enough
/// to ionize directly adds its conversion electrons to the start.
pub fn avalanche_electron(
    table: &GasTable,
    gap: &GasGap,
    rng: &mut StdRng,
    seed: DriftPoint,
    seed_energy_ev: f64,
    _dir: DVec3,
) -> AvalancheSize {
    let d_cm = (seed.pos_cm.y - gap.anode_y_cm()).max(0.0);
    let starters = 1 + (seed_energy_ev / table.w_ev) as u64;

    let exponent = (table.effective_townsend_per_cm() * d_cm)
        .min(config::AVALANCHE_SIZE_CAP.ln());
    let mean = exponent.exp();
    let electrons = if mean <= 1.0 {
        starters
    } else {
        let exp = Exp::new(1.0 / mean).unwrap();
        let mut total = 0.0;
        for _ in 0..starters {
            total += exp.sample(rng).ceil().max(1.0);
        }
        total.min(config::AVALANCHE_SIZE_CAP) as u64
    };
    AvalancheSize {
        electrons,
        ions: electrons.saturating_sub(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gas::table::SAMPLE_TABLE;
    use rand::SeedableRng;

    fn table() -> GasTable {
        GasTable::parse(SAMPLE_TABLE).unwrap()
    }

    fn gap() -> GasGap {
        GasGap::from_chamber()
    }

    #[test]
    fn electron_outside_the_gap_never_drifts() {
        let table = table();
        let gap = gap();
        let mut rng = StdRng::seed_from_u64(1);
        let above = DVec3::new(0.0, gap.half_y_cm + 0.01, 0.0);
        assert!(drift_electron(&table, &gap, &mut rng, above, 0.0).is_none());
    }

    #[test]
    fn drift_moves_down_field_and_forward_in_time() {
        let mut table = table();
        // Quiet gas: no attachment, no multiplication, no diffusion.
        table.attachment_per_cm = 0.0;
        table.townsend_per_cm = 0.0;
        table.diffusion_sqrt_cm = 0.0;
        let gap = gap();
        let mut rng = StdRng::seed_from_u64(2);

        let start = DVec3::new(1.0, 0.05, -1.0);
        let end = drift_electron(&table, &gap, &mut rng, start, 5.0).unwrap();
        assert!((end.pos_cm.y - gap.anode_y_cm()).abs() < 1e-9);
        assert!((end.pos_cm.x - 1.0).abs() < 1e-9);
        assert!(end.time_ns > 5.0);
        // 0.15 cm at 6.5e-3 cm/ns is ~23 ns.
        let expected = 5.0 + 0.15 / table.drift_velocity_cm_ns;
        assert!((end.time_ns - expected).abs() < 1.0);
    }

    #[test]
    fn saturated_attachment_loses_every_electron() {
        let mut table = table();
        table.attachment_per_cm = 1.0 / config::DRIFT_STEP_CM;
        let gap = gap();
        let mut rng = StdRng::seed_from_u64(3);
        let start = DVec3::new(0.0, 0.05, 0.0);
        assert!(drift_electron(&table, &gap, &mut rng, start, 0.0).is_none());
    }

    #[test]
    fn avalanche_at_the_anode_is_a_single_electron() {
        let table = table();
        let gap = gap();
        let mut rng = StdRng::seed_from_u64(4);
        let seed = DriftPoint {
            pos_cm: DVec3::new(0.0, gap.anode_y_cm(), 0.0),
            time_ns: 0.0,
        };
        let size = avalanche_electron(&table, &gap, &mut rng, seed, 0.1, DVec3::zero());
        assert_eq!(size.electrons, 1);
        assert_eq!(size.ions, 0);
    }

    #[test]
    fn avalanche_grows_with_distance_from_the_anode() {
        let table = table();
        let gap = gap();
        let mut rng = StdRng::seed_from_u64(5);
        let seed = DriftPoint {
            pos_cm: DVec3::new(0.0, gap.anode_y_cm() + 0.05, 0.0),
            time_ns: 0.0,
        };
        let trials = 200;
        let mut total = 0u64;
        for _ in 0..trials {
            total += avalanche_electron(&table, &gap, &mut rng, seed, 0.1, DVec3::zero()).electrons;
        }
        let mean = total as f64 / trials as f64;
        // exp(106 * 0.05) ~ 200; exponential fluctuations are wide.
        assert!(mean > 20.0, "mean avalanche {}", mean);
    }
}
