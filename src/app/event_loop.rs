// app/event_loop.rs
// One event: project the primary onto the gas gap, charge the absorber
// budget, run the bridge when the track qualifies, and tally the outcome.

use ultraviolet::DVec3;

use super::primary::Primary;
use crate::analysis::EventRecord;
use crate::bridge::FastSimBridge;
use crate::detector::DetectorStack;
use crate::gas::Microphysics;
use crate::geometry::GasGap;
use crate::particle::TrackEntry;
use crate::profile_scope;
use crate::units;

/// Process one primary. Returns the event record and the accepted-electron
/// positions for the track-position map.
pub fn process_event<M: Microphysics>(
    bridge: &mut FastSimBridge<M>,
    stack: &DetectorStack,
    solid: &GasGap,
    primary: &Primary,
    event_id: usize,
) -> (EventRecord, Vec<DVec3>) {
    profile_scope!("event");
    let mut record = EventRecord {
        event_id,
        ..Default::default()
    };
    let dir = primary.dir;
    if dir.y.abs() < 1e-12 {
        // Grazing track never reaches the gap plane.
        return (record, Vec::new());
    }

    // Entry face depends on the approach side.
    let entry_plane_y = if dir.y < 0.0 {
        solid.half_y_cm
    } else {
        -solid.half_y_cm
    };
    let t_cm = (entry_plane_y - primary.pos_cm.y) / dir.y;
    if t_cm <= 0.0 {
        return (record, Vec::new());
    }
    let entry = primary.pos_cm + dir * t_cm;
    if entry.x.abs() > solid.half_x_cm || entry.z.abs() > solid.half_z_cm {
        // Misses the chamber altogether.
        return (record, Vec::new());
    }

    let cos_theta = dir.y.abs();
    let (eabs_mev, labs_mm) = stack.absorber_budget(cos_theta, primary.ekin_mev);
    record.energy_abs_mev = eabs_mev;
    record.track_l_abs_mm = labs_mm;

    let remaining_mev = primary.ekin_mev - eabs_mev;
    if remaining_mev <= 0.0 {
        // Ranged out in the absorbers.
        return (record, Vec::new());
    }

    let track = TrackEntry {
        species: primary.species.clone(),
        ekin_mev: remaining_mev,
        time_ns: t_cm / units::C_CM_NS,
        pos_cm: entry,
        dir,
        polarization: DVec3::zero(),
    };
    if !bridge.is_applicable(&track.species) || !bridge.model_trigger(&track.species, track.ekin_mev)
    {
        return (record, Vec::new());
    }

    let proposal = bridge.do_it(&track, solid);
    record.energy_gas_mev = proposal.energy_deposit_mev;
    record.avalanche_size = proposal.avalanche_size;
    record.gain = proposal.gain;
    (record, proposal.electron_positions_mm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gas::testutil::{cluster_with, ScriptedGateway};
    use crate::registry::{IonizationModel, ParticleRegistry, Program};
    use std::sync::Arc;

    fn registry() -> Arc<ParticleRegistry> {
        let mut reg = ParticleRegistry::new();
        reg.register("mu-", 10.0, 1e8, Program::FastSim);
        Arc::new(reg)
    }

    fn straight_down_primary(ekin_mev: f64) -> Primary {
        Primary {
            species: "mu-".into(),
            ekin_mev,
            pos_cm: DVec3::new(0.0, 150.0, 0.0),
            dir: DVec3::new(0.0, -1.0, 0.0),
        }
    }

    fn bridge(gas: ScriptedGateway) -> FastSimBridge<ScriptedGateway> {
        FastSimBridge::with_gateway(
            registry(),
            IonizationModel::Heed,
            gas,
            GasGap::from_chamber(),
            false,
        )
    }

    #[test]
    fn qualifying_event_fills_absorber_and_gas_columns() {
        let mut gas = ScriptedGateway::default();
        let inside = DVec3::new(0.0, 0.0, 0.0);
        gas.clusters = vec![cluster_with(inside, 2e3, &[inside])];
        gas.avalanche_electrons = 75;
        let mut b = bridge(gas);

        let stack = DetectorStack::rpc();
        let solid = stack.gas_gap();
        let (record, positions) =
            process_event(&mut b, &stack, &solid, &straight_down_primary(5e3), 3);

        assert_eq!(record.event_id, 3);
        assert!(record.energy_abs_mev > 0.0);
        assert!(record.track_l_abs_mm > 0.0);
        assert!((record.energy_gas_mev - 2e-3).abs() < 1e-12);
        assert_eq!(record.avalanche_size, 75.0);
        assert_eq!(record.gain, 75.0);
        assert_eq!(positions.len(), 1);
    }

    #[test]
    fn track_below_the_trigger_window_skips_the_gas_model() {
        // 30 MeV muon loses the whole absorber budget before the gap.
        let mut b = bridge(ScriptedGateway::default());
        let stack = DetectorStack::rpc();
        let solid = stack.gas_gap();

        let (record, _) = process_event(&mut b, &stack, &solid, &straight_down_primary(30.0), 0);
        assert_eq!(record.energy_gas_mev, 0.0);
        assert_eq!(b.gas().track_calls, 0);
        // The absorber still saw the track.
        assert!(record.energy_abs_mev > 0.0);
    }

    #[test]
    fn track_missing_the_active_area_is_not_reduced() {
        let mut b = bridge(ScriptedGateway::default());
        let stack = DetectorStack::rpc();
        let solid = stack.gas_gap();
        let primary = Primary {
            species: "mu-".into(),
            ekin_mev: 5e3,
            pos_cm: DVec3::new(500.0, 150.0, 0.0),
            dir: DVec3::new(0.0, -1.0, 0.0),
        };

        let (record, _) = process_event(&mut b, &stack, &solid, &primary, 0);
        assert_eq!(record.energy_gas_mev, 0.0);
        assert_eq!(record.energy_abs_mev, 0.0);
        assert_eq!(b.gas().track_calls, 0);
    }
}
