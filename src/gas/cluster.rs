// gas/cluster.rs
// Transient ionization products handed from the gas engine to the
// reduction policy. None of these outlive a single invocation.

use smallvec::SmallVec;
use ultraviolet::DVec3;

/// One conduction electron released in the gas.
#[derive(Clone, Copy, Debug)]
pub struct IonizationElectron {
    pub pos_cm: DVec3,
    pub time_ns: f64,
    pub energy_ev: f64,
    pub dir: DVec3,
}

/// A group of ionization electrons sharing a production point, with the
/// energy transferred to the gas at that point.
#[derive(Clone, Debug)]
pub struct IonizationCluster {
    pub pos_cm: DVec3,
    pub energy_ev: f64,
    pub electrons: SmallVec<[IonizationElectron; 4]>,
}

impl IonizationCluster {
    pub fn new(pos_cm: DVec3, energy_ev: f64) -> Self {
        Self {
            pos_cm,
            energy_ev,
            electrons: SmallVec::new(),
        }
    }
}
