// analysis/mod.rs
// Run-level bookkeeping: histograms, per-event rows, end-of-run statistics
// and the per-event CSV export.

use std::io::{self, BufWriter, Write};
use std::path::Path;

use ultraviolet::DVec3;

use crate::units;

/// Fixed-binning 1-D histogram with running moments.
#[derive(Clone, Debug)]
pub struct Histogram1D {
    pub title: String,
    pub lo: f64,
    pub hi: f64,
    pub counts: Vec<u64>,
    pub underflow: u64,
    pub overflow: u64,
    entries: u64,
    sum: f64,
    sum_sq: f64,
}

impl Histogram1D {
    pub fn new(title: &str, bins: usize, lo: f64, hi: f64) -> Self {
        Self {
            title: title.to_string(),
            lo,
            hi,
            counts: vec![0; bins],
            underflow: 0,
            overflow: 0,
            entries: 0,
            sum: 0.0,
            sum_sq: 0.0,
        }
    }

    pub fn fill(&mut self, value: f64) {
        self.entries += 1;
        self.sum += value;
        self.sum_sq += value * value;
        if value < self.lo {
            self.underflow += 1;
        } else if value >= self.hi {
            self.overflow += 1;
        } else {
            let width = (self.hi - self.lo) / self.counts.len() as f64;
            let bin = ((value - self.lo) / width) as usize;
            let idx = bin.min(self.counts.len() - 1);
            self.counts[idx] += 1;
        }
    }

    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Mean over all fills, including under/overflow.
    pub fn mean(&self) -> f64 {
        if self.entries == 0 {
            return 0.0;
        }
        self.sum / self.entries as f64
    }

    pub fn rms(&self) -> f64 {
        if self.entries == 0 {
            return 0.0;
        }
        let mean = self.mean();
        (self.sum_sq / self.entries as f64 - mean * mean).max(0.0).sqrt()
    }
}

/// Coarse 3-D occupancy map of accepted ionization electrons [mm].
#[derive(Clone, Debug)]
pub struct Histogram3D {
    pub bins: [usize; 3],
    pub lo: [f64; 3],
    pub hi: [f64; 3],
    pub counts: Vec<u32>,
    entries: u64,
}

impl Histogram3D {
    pub fn new(bins: [usize; 3], lo: [f64; 3], hi: [f64; 3]) -> Self {
        Self {
            bins,
            lo,
            hi,
            counts: vec![0; bins[0] * bins[1] * bins[2]],
            entries: 0,
        }
    }

    pub fn fill(&mut self, x: f64, y: f64, z: f64) {
        self.entries += 1;
        let v = [x, y, z];
        let mut idx = 0usize;
        for axis in 0..3 {
            if v[axis] < self.lo[axis] || v[axis] >= self.hi[axis] {
                return;
            }
            let width = (self.hi[axis] - self.lo[axis]) / self.bins[axis] as f64;
            let bin = ((v[axis] - self.lo[axis]) / width) as usize;
            idx = idx * self.bins[axis] + bin.min(self.bins[axis] - 1);
        }
        self.counts[idx] += 1;
    }

    pub fn entries(&self) -> u64 {
        self.entries
    }

    pub fn in_range(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }
}

/// One completed event.
#[derive(Clone, Copy, Debug, Default)]
pub struct EventRecord {
    pub event_id: usize,
    pub energy_abs_mev: f64,
    pub track_l_abs_mm: f64,
    pub energy_gas_mev: f64,
    pub avalanche_size: f64,
    pub gain: f64,
}

/// Aggregates the whole run.
pub struct RunAnalysis {
    pub h_energy_abs: Histogram1D,
    pub h_track_l: Histogram1D,
    pub h_energy_gas: Histogram1D,
    pub h_avalanche: Histogram1D,
    pub h_gain: Histogram1D,
    pub h_positions: Histogram3D,
    rows: Vec<EventRecord>,
}

impl RunAnalysis {
    pub fn new() -> Self {
        Self {
            h_energy_abs: Histogram1D::new("Edep in absorber", 100, 0.0, 800.0),
            h_track_l: Histogram1D::new("Track length in absorber", 100, 0.0, 1000.0),
            h_energy_gas: Histogram1D::new("Edep in gas", 1000, 0.0, 100.0 * units::KEV),
            h_avalanche: Histogram1D::new("Avalanche size in gas", 10000, 0.0, 10000.0),
            h_gain: Histogram1D::new("Gain", 1000, 0.0, 100.0),
            h_positions: Histogram3D::new(
                [200, 29, 29],
                [-100.0, -14.5, -14.5],
                [100.0, 14.5, 14.5],
            ),
            rows: Vec::new(),
        }
    }

    pub fn record_event(&mut self, rec: EventRecord) {
        self.h_energy_abs.fill(rec.energy_abs_mev);
        self.h_track_l.fill(rec.track_l_abs_mm);
        self.h_energy_gas.fill(rec.energy_gas_mev);
        self.h_avalanche.fill(rec.avalanche_size);
        self.h_gain.fill(rec.gain);
        self.rows.push(rec);
    }

    pub fn fill_positions(&mut self, positions_mm: &[DVec3]) {
        for p in positions_mm {
            self.h_positions.fill(p.x, p.y, p.z);
        }
    }

    pub fn events(&self) -> usize {
        self.rows.len()
    }

    /// Write one row per completed event.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "Event,Eabs_MeV,Labs_mm,Egas_MeV,AvalancheSize,Gain")?;
        for r in &self.rows {
            writeln!(
                writer,
                "{},{:.6},{:.3},{:.6e},{:.1},{:.4}",
                r.event_id, r.energy_abs_mev, r.track_l_abs_mm, r.energy_gas_mev, r.avalanche_size, r.gain
            )?;
        }
        writer.flush()
    }

    /// End-of-run statistics print, one line per histogram.
    pub fn print_statistics(&self) {
        println!();
        println!(" ----> print histograms statistic for the run");
        println!(
            " EAbs : mean = {:.4} MeV rms = {:.4} MeV",
            self.h_energy_abs.mean(),
            self.h_energy_abs.rms()
        );
        println!(
            " LAbs : mean = {:.2} mm rms = {:.2} mm",
            self.h_track_l.mean(),
            self.h_track_l.rms()
        );
        println!(
            " EGas : mean = {:.4} keV rms = {:.4} keV",
            self.h_energy_gas.mean() / units::KEV,
            self.h_energy_gas.rms() / units::KEV
        );
        println!(
            " Avalanche size : mean = {:.2} rms = {:.2}",
            self.h_avalanche.mean(),
            self.h_avalanche.rms()
        );
        println!(
            " Gain : mean = {:.3} rms = {:.3}",
            self.h_gain.mean(),
            self.h_gain.rms()
        );
    }
}

impl Default for RunAnalysis {
    fn default() -> Self {
        Self::new()
    }
}
