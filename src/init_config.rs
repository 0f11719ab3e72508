// init_config.rs
// Handles loading and parsing the run configuration from run_config.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RunConfig {
    pub run: Option<RunSection>,
    pub beam: Option<BeamSection>,
    pub gas: Option<GasSection>,
    pub model: Option<ModelSection>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RunSection {
    /// Number of primary events to process.
    pub events: Option<usize>,
    /// Worker thread count. Falls back to the pool default when omitted.
    pub threads: Option<usize>,
    /// Base RNG seed for the run.
    pub seed: Option<u64>,
    /// Print a per-event summary every this many events (0 disables).
    pub print_modulo: Option<usize>,
    /// Per-event CSV output path.
    pub output_csv: Option<String>,
    /// End-of-run JSON summary path.
    pub summary: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BeamSection {
    pub particle: Option<String>,
    pub energy_mev: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GasSection {
    pub file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ModelSection {
    /// Ionization model name: "Heed", "PAI" or "PAIPhot".
    pub ionization: Option<String>,
    /// Hand accepted ionization electrons back as secondary tracks.
    pub create_secondaries: Option<bool>,
}

impl RunConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: RunConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load_from_file("run_config.toml")
    }

    pub fn events(&self) -> usize {
        self.run
            .as_ref()
            .and_then(|r| r.events)
            .unwrap_or(config::DEFAULT_EVENTS)
    }

    pub fn threads(&self) -> Option<usize> {
        self.run.as_ref().and_then(|r| r.threads)
    }

    pub fn seed(&self) -> u64 {
        self.run
            .as_ref()
            .and_then(|r| r.seed)
            .unwrap_or(config::DEFAULT_SEED)
    }

    pub fn print_modulo(&self) -> usize {
        self.run
            .as_ref()
            .and_then(|r| r.print_modulo)
            .unwrap_or(config::DEFAULT_PRINT_MODULO)
    }

    pub fn output_csv(&self) -> String {
        self.run
            .as_ref()
            .and_then(|r| r.output_csv.clone())
            .unwrap_or_else(|| "out/events.csv".to_string())
    }

    pub fn summary_path(&self) -> String {
        self.run
            .as_ref()
            .and_then(|r| r.summary.clone())
            .unwrap_or_else(|| "out/run_summary.json".to_string())
    }

    pub fn beam_particle(&self) -> String {
        self.beam
            .as_ref()
            .and_then(|b| b.particle.clone())
            .unwrap_or_else(|| config::DEFAULT_BEAM_PARTICLE.to_string())
    }

    pub fn beam_energy_mev(&self) -> f64 {
        self.beam
            .as_ref()
            .and_then(|b| b.energy_mev)
            .unwrap_or(config::DEFAULT_BEAM_ENERGY_MEV)
    }

    pub fn gas_file(&self) -> String {
        self.gas
            .as_ref()
            .and_then(|g| g.file.clone())
            .unwrap_or_else(|| config::DEFAULT_GAS_FILE.to_string())
    }

    pub fn ionization(&self) -> String {
        self.model
            .as_ref()
            .and_then(|m| m.ionization.clone())
            .unwrap_or_else(|| "Heed".to_string())
    }

    pub fn create_secondaries(&self) -> bool {
        self.model
            .as_ref()
            .and_then(|m| m.create_secondaries)
            .unwrap_or(false)
    }
}
