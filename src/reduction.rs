// reduction.rs
// Filters ionization products to the active volume and aggregates the
// outcome of one fast-simulation invocation. Every call returns a fresh
// AggregateResult; nothing is carried over between invocations.

use ultraviolet::DVec3;

use crate::config;
use crate::gas::Microphysics;
use crate::geometry::GasGap;
use crate::particle::{GasParticle, TrackEntry};
use crate::units;

/// Aggregated outcome of one invocation.
#[derive(Clone, Debug, Default)]
pub struct AggregateResult {
    /// Energy transferred to the gas [eV].
    pub energy_deposit_ev: f64,
    /// Avalanche electrons summed over all accepted ionization electrons.
    pub avalanche_size: f64,
    /// Accepted ionization electron count.
    pub nsum: usize,
    /// Positions of accepted electrons [mm], for the track-position map.
    pub electron_positions_mm: Vec<DVec3>,
    /// Secondary candidates in gas naming; only recorded when
    /// secondary-injection is enabled.
    pub secondaries: Vec<GasParticle>,
}

impl AggregateResult {
    pub fn energy_deposit_mev(&self) -> f64 {
        self.energy_deposit_ev * units::MEV_PER_EV
    }

    /// Mean multiplication per ionization electron; zero when nothing was
    /// ionized.
    pub fn gain(&self) -> f64 {
        if self.nsum > 0 {
            self.avalanche_size / self.nsum as f64
        } else {
            0.0
        }
    }
}

/// Acceptance and aggregation policy for one gas gap.
pub struct TrackReduction {
    pub bounds: GasGap,
    pub create_secondaries: bool,
}

impl TrackReduction {
    pub fn new(bounds: GasGap, create_secondaries: bool) -> Self {
        Self {
            bounds,
            create_secondaries,
        }
    }

    /// Full-track mode: the gas model clusters the whole crossing. Clusters
    /// are bounds-tested as a unit for the energy deposit, their electrons
    /// individually for everything else, since a cluster can straddle the
    /// volume boundary.
    pub fn reduce_track<M: Microphysics>(
        &self,
        gas: &mut M,
        gas_name: &str,
        track: &TrackEntry,
    ) -> AggregateResult {
        let clusters = gas.new_track(gas_name, track.pos_cm, track.time_ns, track.ekin_ev(), track.dir);
        let mut agg = AggregateResult::default();
        for cluster in &clusters {
            if !self.bounds.contains(cluster.pos_cm) {
                continue;
            }
            agg.energy_deposit_ev += cluster.energy_ev;
            for electron in &cluster.electrons {
                if !self.bounds.contains(electron.pos_cm) {
                    continue;
                }
                self.process_electron(gas, track.time_ns, electron, &mut agg, false);
            }
        }
        agg
    }

    /// Photon / delta-electron mode: the transport result is one implicit
    /// cluster. Photons deposit W per accepted electron; a delta electron
    /// deposits its full kinetic energy.
    pub fn reduce_point<M: Microphysics>(
        &self,
        gas: &mut M,
        track: &TrackEntry,
        photon: bool,
    ) -> AggregateResult {
        let cluster = if photon {
            gas.transport_photon(track.pos_cm, track.time_ns, track.ekin_ev(), track.dir)
        } else {
            gas.transport_delta_electron(track.pos_cm, track.time_ns, track.ekin_ev(), track.dir)
        };
        let mut agg = AggregateResult::default();
        if !photon {
            agg.energy_deposit_ev = track.ekin_ev();
        }
        for electron in &cluster.electrons {
            if !self.bounds.contains(electron.pos_cm) {
                continue;
            }
            self.process_electron(gas, track.time_ns, electron, &mut agg, photon);
        }
        agg
    }

    fn process_electron<M: Microphysics>(
        &self,
        gas: &mut M,
        entry_time_ns: f64,
        electron: &crate::gas::IonizationElectron,
        agg: &mut AggregateResult,
        deposit_w: bool,
    ) {
        agg.nsum += 1;
        if deposit_w {
            agg.energy_deposit_ev += gas.w_ev();
        }
        agg.electron_positions_mm
            .push(electron.pos_cm * units::MM_PER_CM);

        if self.create_secondaries {
            let mut t = electron.time_ns;
            if t < entry_time_ns {
                t += entry_time_ns;
            }
            agg.secondaries.push(GasParticle::new(
                "e-",
                electron.energy_ev,
                t,
                electron.pos_cm,
                electron.dir,
            ));
        }

        if let Some(end) = gas.drift_electron(electron.pos_cm, electron.time_ns) {
            let size = gas.avalanche_electron(end, config::AVALANCHE_SEED_EV, DVec3::zero());
            agg.avalanche_size += size.electrons as f64;
        }
    }
}
