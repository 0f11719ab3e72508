// gas/testutil.rs
// Scripted gateway for reduction and bridge tests: fixed cluster payloads,
// per-call drift outcomes, constant avalanche yield.

use smallvec::SmallVec;
use ultraviolet::DVec3;

use super::cluster::{IonizationCluster, IonizationElectron};
use super::drift::{AvalancheSize, DriftPoint};
use super::gateway::Microphysics;

pub fn electron_at(pos_cm: DVec3) -> IonizationElectron {
    IonizationElectron {
        pos_cm,
        time_ns: 1.0,
        energy_ev: 5.0,
        dir: DVec3::new(0.0, -1.0, 0.0),
    }
}

pub fn cluster_with(pos_cm: DVec3, energy_ev: f64, electrons: &[DVec3]) -> IonizationCluster {
    IonizationCluster {
        pos_cm,
        energy_ev,
        electrons: electrons.iter().map(|&p| electron_at(p)).collect(),
    }
}

pub struct ScriptedGateway {
    pub w_ev: f64,
    /// Returned by `new_track`.
    pub clusters: Vec<IonizationCluster>,
    /// Returned by the photon and delta transports.
    pub point_cluster: IonizationCluster,
    /// Per-call drift outcome; calls beyond the script succeed.
    pub drift_script: Vec<bool>,
    /// Constant electron yield per avalanche.
    pub avalanche_electrons: u64,
    pub track_calls: usize,
    pub photon_calls: usize,
    pub delta_calls: usize,
    pub drift_calls: usize,
    pub avalanche_calls: usize,
    /// Species name seen by the last `new_track` call.
    pub last_track_species: Option<String>,
}

impl Default for ScriptedGateway {
    fn default() -> Self {
        Self {
            w_ev: 30.0,
            clusters: Vec::new(),
            point_cluster: IonizationCluster {
                pos_cm: DVec3::zero(),
                energy_ev: 0.0,
                electrons: SmallVec::new(),
            },
            drift_script: Vec::new(),
            avalanche_electrons: 100,
            track_calls: 0,
            photon_calls: 0,
            delta_calls: 0,
            drift_calls: 0,
            avalanche_calls: 0,
            last_track_species: None,
        }
    }
}

impl Microphysics for ScriptedGateway {
    fn w_ev(&self) -> f64 {
        self.w_ev
    }

    fn transport_photon(
        &mut self,
        _pos_cm: DVec3,
        _time_ns: f64,
        _energy_ev: f64,
        _dir: DVec3,
    ) -> IonizationCluster {
        self.photon_calls += 1;
        self.point_cluster.clone()
    }

    fn transport_delta_electron(
        &mut self,
        _pos_cm: DVec3,
        _time_ns: f64,
        _energy_ev: f64,
        _dir: DVec3,
    ) -> IonizationCluster {
        self.delta_calls += 1;
        self.point_cluster.clone()
    }

    fn new_track(
        &mut self,
        species: &str,
        _pos_cm: DVec3,
        _time_ns: f64,
        _ekin_ev: f64,
        _dir: DVec3,
    ) -> Vec<IonizationCluster> {
        self.track_calls += 1;
        self.last_track_species = Some(species.to_string());
        self.clusters.clone()
    }

    fn drift_electron(&mut self, pos_cm: DVec3, time_ns: f64) -> Option<DriftPoint> {
        let reaches = self.drift_script.get(self.drift_calls).copied().unwrap_or(true);
        self.drift_calls += 1;
        reaches.then_some(DriftPoint {
            pos_cm,
            time_ns: time_ns + 20.0,
        })
    }

    fn avalanche_electron(
        &mut self,
        _seed: DriftPoint,
        _seed_energy_ev: f64,
        _dir: DVec3,
    ) -> AvalancheSize {
        self.avalanche_calls += 1;
        AvalancheSize {
            electrons: self.avalanche_electrons,
            ions: self.avalanche_electrons.saturating_sub(1),
        }
    }
}
