// particle.rs
// Particle records exchanged between the transport side and the gas model.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use ultraviolet::DVec3;

use crate::units;

/// Immutable description of a track at the moment it enters the gas gap.
/// Positions are gap-local centimetres, the direction is a unit vector.
#[derive(Clone, Debug)]
pub struct TrackEntry {
    pub species: String,
    pub ekin_mev: f64,
    pub time_ns: f64,
    pub pos_cm: DVec3,
    pub dir: DVec3,
    pub polarization: DVec3,
}

impl TrackEntry {
    pub fn ekin_ev(&self) -> f64 {
        self.ekin_mev * units::EV_PER_MEV
    }
}

/// A particle produced on the gas side, still in gas naming and with host
/// units baked in at construction (eV -> MeV, cm -> mm).
#[derive(Clone, Debug)]
pub struct GasParticle {
    pub name: String,
    pub ekin_mev: f64,
    pub time_ns: f64,
    pub pos_mm: DVec3,
    pub dir: DVec3,
}

impl GasParticle {
    pub fn new(name: &str, ekin_ev: f64, time_ns: f64, pos_cm: DVec3, dir: DVec3) -> Self {
        Self {
            name: name.to_string(),
            ekin_mev: ekin_ev * units::MEV_PER_EV,
            time_ns,
            pos_mm: pos_cm * units::MM_PER_CM,
            dir,
        }
    }
}

/// Species the host engine accepts back as secondary tracks. Anything else
/// coming out of the gas model is dropped without comment.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SecondaryKind {
    Electron,
    Gamma,
}

impl SecondaryKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "e-" => Some(Self::Electron),
            "gamma" => Some(Self::Gamma),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Electron => "e-",
            Self::Gamma => "gamma",
        }
    }
}

/// Secondary-track creation request handed to the host engine (mm, MeV).
#[derive(Clone, Debug)]
pub struct SecondaryRecord {
    pub kind: SecondaryKind,
    pub ekin_mev: f64,
    pub time_ns: f64,
    pub pos_mm: DVec3,
    pub dir: DVec3,
}

static GAS_NAME_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("kaon+", "K+");
    m.insert("kaon-", "K-");
    m.insert("anti_proton", "anti-proton");
    m
});

/// Map a transport-side species name onto the gas model's naming scheme.
/// Names without an alias pass through unchanged.
pub fn canonical_gas_name(name: &str) -> &str {
    GAS_NAME_ALIASES.get(name).copied().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kaon_and_antiproton_aliases_map() {
        assert_eq!(canonical_gas_name("kaon+"), "K+");
        assert_eq!(canonical_gas_name("kaon-"), "K-");
        assert_eq!(canonical_gas_name("anti_proton"), "anti-proton");
    }

    #[test]
    fn unaliased_names_pass_through() {
        for name in ["mu-", "mu+", "e-", "gamma", "proton", "alpha"] {
            assert_eq!(canonical_gas_name(name), name);
        }
    }

    #[test]
    fn gas_particle_converts_units_on_construction() {
        let p = GasParticle::new(
            "e-",
            2.5e6,
            4.0,
            DVec3::new(1.0, -0.1, 3.0),
            DVec3::new(0.0, -1.0, 0.0),
        );
        assert!((p.ekin_mev - 2.5).abs() < 1e-12);
        assert!((p.pos_mm.x - 10.0).abs() < 1e-12);
        assert!((p.pos_mm.y + 1.0).abs() < 1e-12);
        assert!((p.pos_mm.z - 30.0).abs() < 1e-12);
    }

    #[test]
    fn secondary_kind_rejects_unknown_species() {
        assert_eq!(SecondaryKind::from_name("e-"), Some(SecondaryKind::Electron));
        assert_eq!(SecondaryKind::from_name("gamma"), Some(SecondaryKind::Gamma));
        assert_eq!(SecondaryKind::from_name("nu_e"), None);
        assert_eq!(SecondaryKind::from_name("e+"), None);
    }
}
