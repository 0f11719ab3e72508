// registry.rs
// Decides which species/energy combinations are routed to the fast-sim gas
// model and which stay with the host engine's default physics.

use std::collections::HashMap;

/// Handling program for a particle species.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Program {
    FastSim,
    HostEngine,
}

/// Closed kinetic-energy interval [min, max] in MeV.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct EnergyRange {
    pub min_mev: f64,
    pub max_mev: f64,
}

/// Species -> energy-range tables, one per program. Populated once at
/// startup and shared read-only between workers afterwards.
#[derive(Default, Debug)]
pub struct ParticleRegistry {
    fast_sim: HashMap<String, EnergyRange>,
    host_engine: HashMap<String, EnergyRange>,
}

impl ParticleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, program: Program) -> &HashMap<String, EnergyRange> {
        match program {
            Program::FastSim => &self.fast_sim,
            Program::HostEngine => &self.host_engine,
        }
    }

    /// Register a species for a program. Inverted ranges are rejected and
    /// logged; a duplicate key replaces the earlier entry.
    pub fn register(&mut self, species: &str, min_mev: f64, max_mev: f64, program: Program) {
        if min_mev >= max_mev {
            eprintln!(
                "rejecting energy range for {}: min {} MeV is not below max {} MeV",
                species, min_mev, max_mev
            );
            return;
        }
        let table = match program {
            Program::FastSim => &mut self.fast_sim,
            Program::HostEngine => &mut self.host_engine,
        };
        table.insert(species.to_string(), EnergyRange { min_mev, max_mev });
    }

    pub fn is_known(&self, species: &str, program: Program) -> bool {
        self.table(program).contains_key(species)
    }

    /// Boundary-inclusive range test at both ends.
    pub fn is_in_range(&self, species: &str, ekin_mev: f64, program: Program) -> bool {
        match self.table(program).get(species) {
            Some(range) => range.min_mev <= ekin_mev && ekin_mev <= range.max_mev,
            None => false,
        }
    }

    /// Lower bound in MeV, or -1.0 when the species is absent.
    pub fn min_energy(&self, species: &str, program: Program) -> f64 {
        self.table(program)
            .get(species)
            .map_or(-1.0, |r| r.min_mev)
    }

    /// Upper bound in MeV, or -1.0 when the species is absent.
    pub fn max_energy(&self, species: &str, program: Program) -> f64 {
        self.table(program)
            .get(species)
            .map_or(-1.0, |r| r.max_mev)
    }

    pub fn len(&self, program: Program) -> usize {
        self.table(program).len()
    }

    pub fn is_empty(&self, program: Program) -> bool {
        self.table(program).is_empty()
    }
}

/// Ionization model the gas side runs with. Selects both the cluster source
/// (full Heed track vs single photon/delta transport) and the default
/// applicability tables.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IonizationModel {
    Heed,
    Pai,
    PaiPhot,
}

impl IonizationModel {
    /// Parse a model name, falling back to Heed on anything unknown.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Heed" => Self::Heed,
            "PAI" => Self::Pai,
            "PAIPhot" => Self::PaiPhot,
            other => {
                eprintln!("unknown ionization model {}, using Heed", other);
                Self::Heed
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Heed => "Heed",
            Self::Pai => "PAI",
            Self::PaiPhot => "PAIPhot",
        }
    }

    /// True when charged tracks produce a full cluster sequence. The PAI
    /// variants hand charged particles to the host engine and only treat
    /// low-energy deltas and photons in the gas model.
    pub fn uses_track_clusters(&self) -> bool {
        matches!(self, Self::Heed)
    }

    /// Install the model's default applicability tables.
    pub fn install_defaults(&self, registry: &mut ParticleRegistry) {
        use Program::*;
        match self {
            Self::Pai | Self::PaiPhot => {
                registry.register("e-", 1e-6, 1e-3, FastSim);
                registry.register("gamma", 1e-6, 1e8, FastSim);

                registry.register("e-", 0.0, 1e8, HostEngine);
                registry.register("e+", 0.0, 1e8, HostEngine);
                registry.register("mu-", 0.0, 1e8, HostEngine);
                registry.register("mu+", 0.0, 1e8, HostEngine);
                registry.register("proton", 0.0, 1e8, HostEngine);
                registry.register("pi+", 0.0, 1e8, HostEngine);
                registry.register("pi-", 0.0, 1e8, HostEngine);
                registry.register("alpha", 0.0, 1e8, HostEngine);
                registry.register("He3", 0.0, 1e8, HostEngine);
                registry.register("GenericIon", 0.0, 1e8, HostEngine);
            }
            Self::Heed => {
                registry.register("gamma", 1e-6, 1e8, FastSim);
                registry.register("e-", 6e-2, 1e7, FastSim);
                registry.register("e+", 6e-2, 1e7, FastSim);
                registry.register("mu-", 1e1, 1e8, FastSim);
                registry.register("mu+", 1e1, 1e8, FastSim);
                registry.register("pi-", 2e1, 1e8, FastSim);
                registry.register("pi+", 2e1, 1e8, FastSim);
                registry.register("kaon-", 1e1, 1e8, FastSim);
                registry.register("kaon+", 1e1, 1e8, FastSim);
                registry.register("proton", 9e1, 1e8, FastSim);
                registry.register("anti_proton", 9e1, 1e8, FastSim);
                registry.register("deuteron", 2e2, 1e8, FastSim);
                registry.register("alpha", 4e2, 1e8, FastSim);
            }
        }
        println!(
            "ionization model {}: {} fast-sim species, {} host-engine species",
            self.name(),
            registry.len(Program::FastSim),
            registry.len(Program::HostEngine)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_test_is_boundary_inclusive() {
        let mut reg = ParticleRegistry::new();
        reg.register("mu-", 10.0, 1e8, Program::FastSim);

        assert!(reg.is_in_range("mu-", 10.0, Program::FastSim));
        assert!(reg.is_in_range("mu-", 1e8, Program::FastSim));
        assert!(reg.is_in_range("mu-", 5e3, Program::FastSim));
        assert!(!reg.is_in_range("mu-", 10.0 - 1e-9, Program::FastSim));
        assert!(!reg.is_in_range("mu-", 1e8 + 1.0, Program::FastSim));
    }

    #[test]
    fn inverted_range_does_not_mutate_table() {
        let mut reg = ParticleRegistry::new();
        reg.register("proton", 100.0, 100.0, Program::FastSim);
        reg.register("proton", 100.0, 10.0, Program::FastSim);

        assert_eq!(reg.len(Program::FastSim), 0);
        assert!(!reg.is_known("proton", Program::FastSim));
    }

    #[test]
    fn tables_are_independent_per_program() {
        let mut reg = ParticleRegistry::new();
        reg.register("e-", 1e-6, 1e-3, Program::FastSim);
        reg.register("e-", 0.0, 1e8, Program::HostEngine);

        assert!(reg.is_in_range("e-", 1.0, Program::HostEngine));
        assert!(!reg.is_in_range("e-", 1.0, Program::FastSim));
    }

    #[test]
    fn duplicate_registration_last_wins() {
        let mut reg = ParticleRegistry::new();
        reg.register("pi+", 10.0, 100.0, Program::FastSim);
        reg.register("pi+", 20.0, 200.0, Program::FastSim);

        assert_eq!(reg.len(Program::FastSim), 1);
        assert_eq!(reg.min_energy("pi+", Program::FastSim), 20.0);
        assert_eq!(reg.max_energy("pi+", Program::FastSim), 200.0);
    }

    #[test]
    fn absent_species_yields_sentinel_bounds() {
        let reg = ParticleRegistry::new();
        assert_eq!(reg.min_energy("mu-", Program::FastSim), -1.0);
        assert_eq!(reg.max_energy("mu-", Program::HostEngine), -1.0);
    }

    #[test]
    fn heed_defaults_cover_the_usual_beam_species() {
        let mut reg = ParticleRegistry::new();
        IonizationModel::Heed.install_defaults(&mut reg);

        assert!(reg.is_known("mu-", Program::FastSim));
        assert!(reg.is_in_range("mu-", 5e3, Program::FastSim));
        assert!(!reg.is_in_range("mu-", 5.0, Program::FastSim));
        assert_eq!(reg.min_energy("proton", Program::FastSim), 9e1);
        assert!(reg.is_empty(Program::HostEngine));
    }

    #[test]
    fn unknown_model_name_falls_back_to_heed() {
        assert_eq!(IonizationModel::from_name("Bichsel"), IonizationModel::Heed);
        assert_eq!(IonizationModel::from_name("PAIPhot"), IonizationModel::PaiPhot);
        assert!(!IonizationModel::Pai.uses_track_clusters());
        assert!(IonizationModel::Heed.uses_track_clusters());
    }
}
