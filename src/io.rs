// io.rs
// End-of-run summary persistence.

use serde::{Deserialize, Serialize};
use std::io::{self, BufWriter};
use std::path::Path;

use crate::analysis::RunAnalysis;

/// Scalar digest of a completed run, written next to the per-event CSV.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub events: usize,
    pub ionization_model: String,
    pub gas_file: String,
    pub beam_particle: String,
    pub beam_energy_mev: f64,
    pub energy_abs_mean_mev: f64,
    pub energy_abs_rms_mev: f64,
    pub track_l_mean_mm: f64,
    pub track_l_rms_mm: f64,
    pub energy_gas_mean_mev: f64,
    pub energy_gas_rms_mev: f64,
    pub avalanche_mean: f64,
    pub avalanche_rms: f64,
    pub gain_mean: f64,
    pub gain_rms: f64,
}

impl RunSummary {
    pub fn from_analysis(
        analysis: &RunAnalysis,
        ionization_model: &str,
        gas_file: &str,
        beam_particle: &str,
        beam_energy_mev: f64,
    ) -> Self {
        Self {
            events: analysis.events(),
            ionization_model: ionization_model.to_string(),
            gas_file: gas_file.to_string(),
            beam_particle: beam_particle.to_string(),
            beam_energy_mev,
            energy_abs_mean_mev: analysis.h_energy_abs.mean(),
            energy_abs_rms_mev: analysis.h_energy_abs.rms(),
            track_l_mean_mm: analysis.h_track_l.mean(),
            track_l_rms_mm: analysis.h_track_l.rms(),
            energy_gas_mean_mev: analysis.h_energy_gas.mean(),
            energy_gas_rms_mev: analysis.h_energy_gas.rms(),
            avalanche_mean: analysis.h_avalanche.mean(),
            avalanche_rms: analysis.h_avalanche.rms(),
            gain_mean: analysis.h_gain.mean(),
            gain_rms: analysis.h_gain.rms(),
        }
    }
}

pub fn save_summary<P: AsRef<Path>>(path: P, summary: &RunSummary) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, summary)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

pub fn load_summary<P: AsRef<Path>>(path: P) -> io::Result<RunSummary> {
    let file = std::fs::File::open(path)?;
    serde_json::from_reader(file).map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::EventRecord;

    #[test]
    fn summary_round_trips_through_json() {
        let mut analysis = RunAnalysis::new();
        analysis.record_event(EventRecord {
            event_id: 0,
            energy_abs_mev: 42.0,
            track_l_abs_mm: 52.0,
            energy_gas_mev: 1.0e-3,
            avalanche_size: 500.0,
            gain: 12.5,
        });
        let summary = RunSummary::from_analysis(&analysis, "Heed", "data/test.gas", "mu-", 5e3);

        let dir = std::env::temp_dir().join("rpc_sim_summary_test");
        let path = dir.join("summary.json");
        save_summary(&path, &summary).unwrap();
        let loaded = load_summary(&path).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(loaded.events, 1);
        assert_eq!(loaded.ionization_model, "Heed");
        assert!((loaded.gain_mean - 12.5).abs() < 1e-12);
        assert!((loaded.energy_abs_mean_mev - 42.0).abs() < 1e-12);
    }
}
