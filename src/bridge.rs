// bridge.rs
// Orchestrates one fast-simulation invocation: applicability check, model
// trigger, track reduction, and the final-state proposal handed back to the
// transport side.

use std::sync::Arc;

use ultraviolet::DVec3;

use crate::gas::{GasGateway, GasTable, Microphysics};
use crate::geometry::GasGap;
use crate::particle::{canonical_gas_name, SecondaryKind, SecondaryRecord, TrackEntry};
use crate::profile_scope;
use crate::reduction::{AggregateResult, TrackReduction};
use crate::registry::{IonizationModel, ParticleRegistry, Program};
use crate::units;

/// Track-state proposal returned to the transport side after a fast-sim
/// step. Host units throughout: mm and MeV. The primary is advanced to the
/// volume boundary with its energy reduced, not killed.
#[derive(Clone, Debug)]
pub struct TrackProposal {
    pub energy_deposit_mev: f64,
    pub path_length_mm: f64,
    pub final_pos_mm: DVec3,
    pub final_dir: DVec3,
    pub final_ekin_mev: f64,
    pub final_polarization: DVec3,
    pub avalanche_size: f64,
    pub gain: f64,
    /// Accepted ionization electron positions [mm], for the position map.
    pub electron_positions_mm: Vec<DVec3>,
    pub secondaries: Vec<SecondaryRecord>,
}

/// One fast-simulation model instance. Workers each own one; only the
/// applicability registry (and the gas table inside the gateway) is shared.
pub struct FastSimBridge<M: Microphysics> {
    registry: Arc<ParticleRegistry>,
    model: IonizationModel,
    gas: M,
    reduction: TrackReduction,
}

impl FastSimBridge<GasGateway> {
    pub fn new(
        registry: Arc<ParticleRegistry>,
        model: IonizationModel,
        table: Arc<GasTable>,
        gap: GasGap,
        seed: u64,
        create_secondaries: bool,
    ) -> Self {
        let gas = GasGateway::new(table, gap, seed);
        Self::with_gateway(registry, model, gas, gap, create_secondaries)
    }
}

impl<M: Microphysics> FastSimBridge<M> {
    pub fn with_gateway(
        registry: Arc<ParticleRegistry>,
        model: IonizationModel,
        gas: M,
        gap: GasGap,
        create_secondaries: bool,
    ) -> Self {
        Self {
            registry,
            model,
            gas,
            reduction: TrackReduction::new(gap, create_secondaries),
        }
    }

    /// Species-level gate: is this particle ever handled by the gas model?
    pub fn is_applicable(&self, species: &str) -> bool {
        self.registry.is_known(species, Program::FastSim)
    }

    /// Track-level gate: does this particular kinetic energy fall inside the
    /// species' fast-sim window?
    pub fn model_trigger(&self, species: &str, ekin_mev: f64) -> bool {
        self.registry.is_in_range(species, ekin_mev, Program::FastSim)
    }

    pub fn reseed(&mut self, seed: u64) {
        self.gas.reseed(seed);
    }

    pub fn gas(&self) -> &M {
        &self.gas
    }

    /// Run the gas model over one qualifying track and propose the reduced
    /// track state. Synchronous; runs to completion.
    pub fn do_it(&mut self, track: &TrackEntry, solid: &GasGap) -> TrackProposal {
        profile_scope!("bridge_do_it");
        let gas_name = canonical_gas_name(&track.species).to_string();

        let photon = gas_name == "gamma";
        let agg: AggregateResult = if !self.model.uses_track_clusters() || photon {
            self.reduction.reduce_point(&mut self.gas, track, photon)
        } else {
            self.reduction.reduce_track(&mut self.gas, &gas_name, track)
        };

        let exit_cm = solid.distance_to_exit(track.pos_cm, track.dir);
        let deposit_mev = agg.energy_deposit_mev();
        let final_pos_cm = track.pos_cm + track.dir * exit_cm;

        let secondaries = agg
            .secondaries
            .iter()
            .filter_map(|p| {
                SecondaryKind::from_name(&p.name).map(|kind| SecondaryRecord {
                    kind,
                    ekin_mev: p.ekin_mev,
                    time_ns: p.time_ns,
                    pos_mm: p.pos_mm,
                    dir: p.dir,
                })
            })
            .collect();

        TrackProposal {
            energy_deposit_mev: deposit_mev,
            path_length_mm: exit_cm * units::MM_PER_CM,
            final_pos_mm: final_pos_cm * units::MM_PER_CM,
            final_dir: track.dir,
            final_ekin_mev: (track.ekin_mev - deposit_mev).max(0.0),
            final_polarization: track.polarization,
            avalanche_size: agg.avalanche_size,
            gain: agg.gain(),
            electron_positions_mm: agg.electron_positions_mm,
            secondaries,
        }
    }
}
