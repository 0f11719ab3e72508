// gas/ionization.rs
// Stochastic cluster generation: exponential cluster spacing along a charged
// track, single-point conversion for photons and delta electrons. Stands in
// for the external ionization engine behind the Microphysics seam.

use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Distribution, Exp, Poisson};
use ultraviolet::DVec3;

use super::cluster::{IonizationCluster, IonizationElectron};
use super::table::GasTable;
use crate::units;

/// Mean kinetic energy of subexcitation electrons [eV].
const SUBEXCITATION_MEAN_EV: f64 = 2.0;

/// Upper bound on electrons produced by a single photon/delta conversion.
/// Keeps a stray high-energy transport from allocating without bound; the
/// truncation is logged when it happens.
const MAX_ELECTRONS_PER_TRANSPORT: usize = 100_000;

fn isotropic_dir(rng: &mut StdRng) -> DVec3 {
    let cos_theta: f64 = rng.random::<f64>() * 2.0 - 1.0;
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
    let phi = rng.random::<f64>() * std::f64::consts::TAU;
    DVec3::new(sin_theta * phi.cos(), cos_theta, sin_theta * phi.sin())
}

fn subexcitation_energy_ev(rng: &mut StdRng) -> f64 {
    let exp = Exp::new(1.0 / SUBEXCITATION_MEAN_EV).unwrap();
    exp.sample(rng)
}

fn electron_at(rng: &mut StdRng, pos_cm: DVec3, time_ns: f64, energy_ev: f64) -> IonizationElectron {
    let dir = isotropic_dir(rng);
    IonizationElectron {
        pos_cm,
        time_ns,
        energy_ev,
        dir,
    }
}

/// Electrons per cluster: one plus a Poisson tail around the tabulated mean.
fn cluster_electron_count(table: &GasTable, rng: &mut StdRng) -> usize {
    let tail = (table.electrons_per_cluster - 1.0).max(0.0);
    if tail == 0.0 {
        return 1;
    }
    let poisson = Poisson::new(tail).unwrap();
    1 + poisson.sample(rng) as usize
}

/// Generate the cluster sequence of a relativistic charged track over
/// `path_cm` of gas, starting at `pos_cm` and moving along `dir`.
pub fn track_clusters(
    table: &GasTable,
    rng: &mut StdRng,
    pos_cm: DVec3,
    time_ns: f64,
    ekin_ev: f64,
    dir: DVec3,
    path_cm: f64,
) -> Vec<IonizationCluster> {
    let spacing = Exp::new(table.clusters_per_cm).unwrap();
    let mut clusters = Vec::new();
    let mut s_cm = spacing.sample(rng);
    let mut spent_ev = 0.0;

    while s_cm <= path_cm {
        let n = cluster_electron_count(table, rng);
        let energy_ev = n as f64 * table.w_ev;
        if spent_ev + energy_ev > ekin_ev {
            break;
        }
        spent_ev += energy_ev;

        let pos = pos_cm + dir * s_cm;
        let t = time_ns + s_cm / units::C_CM_NS;
        let mut cluster = IonizationCluster::new(pos, energy_ev);
        for _ in 0..n {
            let e_ev = subexcitation_energy_ev(rng);
            cluster.electrons.push(electron_at(rng, pos, t, e_ev));
        }
        clusters.push(cluster);
        s_cm += spacing.sample(rng);
    }
    clusters
}

/// Photoabsorption at an exponentially distributed depth along the photon
/// direction. The photoelectron carries the balance of the photon energy;
/// the rest of the shell relaxation comes out as subexcitation electrons.
pub fn photon_cluster(
    table: &GasTable,
    rng: &mut StdRng,
    pos_cm: DVec3,
    time_ns: f64,
    energy_ev: f64,
    dir: DVec3,
) -> IonizationCluster {
    let depth = Exp::new(table.photon_absorption_per_cm).unwrap();
    let depth_cm = depth.sample(rng);
    let point = pos_cm + dir * depth_cm;
    let t = time_ns + depth_cm / units::C_CM_NS;

    let n = conversion_electron_count(table, energy_ev);
    let mut cluster = IonizationCluster::new(point, energy_ev);
    if n == 0 {
        return cluster;
    }
    let photoelectron_ev = (energy_ev - (n as f64 - 1.0) * table.w_ev).max(0.0);
    cluster
        .electrons
        .push(electron_at(rng, point, t, photoelectron_ev));
    for _ in 1..n {
        let e_ev = subexcitation_energy_ev(rng);
        cluster.electrons.push(electron_at(rng, point, t, e_ev));
    }
    cluster
}

/// Local conversion of a delta electron: all ionization charge is released
/// at the hand-over point, the practical range at these energies being far
/// below the gap thickness.
pub fn delta_cluster(
    table: &GasTable,
    rng: &mut StdRng,
    pos_cm: DVec3,
    time_ns: f64,
    energy_ev: f64,
    _dir: DVec3,
) -> IonizationCluster {
    let n = conversion_electron_count(table, energy_ev);
    let mut cluster = IonizationCluster::new(pos_cm, energy_ev);
    for _ in 0..n {
        let e_ev = subexcitation_energy_ev(rng);
        cluster.electrons.push(electron_at(rng, pos_cm, time_ns, e_ev));
    }
    cluster
}

fn conversion_electron_count(table: &GasTable, energy_ev: f64) -> usize {
    if energy_ev < table.w_ev {
        return if energy_ev > 0.0 { 1 } else { 0 };
    }
    let n = (energy_ev / table.w_ev) as usize;
    if n > MAX_ELECTRONS_PER_TRANSPORT {
        eprintln!(
            "conversion of {:.3e} eV truncated to {} electrons",
            energy_ev, MAX_ELECTRONS_PER_TRANSPORT
        );
        return MAX_ELECTRONS_PER_TRANSPORT;
    }
    n
}
