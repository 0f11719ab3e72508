// gas/table.rs
// Loads the tabulated gas description the microphysics runs on. The table
// carries the mixture quantities a Magboltz/Heed run would provide; without
// it the bridge cannot answer anything, so every load failure is fatal at
// startup.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Tabulated transport properties of the working gas mixture.
#[derive(Clone, Debug, PartialEq)]
pub struct GasTable {
    /// Free-text mixture label, e.g. "ar/co2 70/30".
    pub composition: String,
    pub temperature_k: f64,
    pub pressure_torr: f64,
    /// Ionization work function W [eV].
    pub w_ev: f64,
    /// Mean ionization clusters per cm of minimum-ionizing track.
    pub clusters_per_cm: f64,
    /// Mean electrons per cluster.
    pub electrons_per_cluster: f64,
    /// Photoabsorption coefficient [1/cm].
    pub photon_absorption_per_cm: f64,
    /// Electron drift velocity along the field [cm/ns].
    pub drift_velocity_cm_ns: f64,
    /// Longitudinal diffusion coefficient [sqrt(cm)].
    pub diffusion_sqrt_cm: f64,
    /// First Townsend coefficient [1/cm].
    pub townsend_per_cm: f64,
    /// Attachment coefficient [1/cm].
    pub attachment_per_cm: f64,
}

#[derive(Debug)]
pub enum GasError {
    Io(io::Error),
    Parse { line: usize, text: String },
    MissingKey(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for GasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GasError::Io(e) => write!(f, "cannot read gas file: {}", e),
            GasError::Parse { line, text } => {
                write!(f, "malformed gas file line {}: {:?}", line, text)
            }
            GasError::MissingKey(key) => write!(f, "gas file is missing key {:?}", key),
            GasError::Invalid(key) => write!(f, "gas file key {:?} has an unphysical value", key),
        }
    }
}

impl std::error::Error for GasError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GasError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for GasError {
    fn from(e: io::Error) -> Self {
        GasError::Io(e)
    }
}

impl GasTable {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GasError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse the key/value text format. Lines are `key value`, `#` starts a
    /// comment, the composition value may contain spaces.
    pub fn parse(content: &str) -> Result<Self, GasError> {
        let mut composition = None;
        let mut temperature_k = None;
        let mut pressure_torr = None;
        let mut w_ev = None;
        let mut clusters_per_cm = None;
        let mut electrons_per_cluster = None;
        let mut photon_absorption_per_cm = None;
        let mut drift_velocity_cm_ns = None;
        let mut diffusion_sqrt_cm = None;
        let mut townsend_per_cm = None;
        let mut attachment_per_cm = None;

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let (key, value) = line.split_once(char::is_whitespace).ok_or(GasError::Parse {
                line: idx + 1,
                text: raw.to_string(),
            })?;
            let value = value.trim();
            let number = || -> Result<f64, GasError> {
                value.parse::<f64>().map_err(|_| GasError::Parse {
                    line: idx + 1,
                    text: raw.to_string(),
                })
            };
            match key {
                "composition" => composition = Some(value.to_string()),
                "temperature_k" => temperature_k = Some(number()?),
                "pressure_torr" => pressure_torr = Some(number()?),
                "w_ev" => w_ev = Some(number()?),
                "clusters_per_cm" => clusters_per_cm = Some(number()?),
                "electrons_per_cluster" => electrons_per_cluster = Some(number()?),
                "photon_absorption_per_cm" => photon_absorption_per_cm = Some(number()?),
                "drift_velocity_cm_ns" => drift_velocity_cm_ns = Some(number()?),
                "diffusion_sqrt_cm" => diffusion_sqrt_cm = Some(number()?),
                "townsend_per_cm" => townsend_per_cm = Some(number()?),
                "attachment_per_cm" => attachment_per_cm = Some(number()?),
                _ => {
                    return Err(GasError::Parse {
                        line: idx + 1,
                        text: raw.to_string(),
                    })
                }
            }
        }

        let table = Self {
            composition: composition.ok_or(GasError::MissingKey("composition"))?,
            temperature_k: temperature_k.ok_or(GasError::MissingKey("temperature_k"))?,
            pressure_torr: pressure_torr.ok_or(GasError::MissingKey("pressure_torr"))?,
            w_ev: w_ev.ok_or(GasError::MissingKey("w_ev"))?,
            clusters_per_cm: clusters_per_cm.ok_or(GasError::MissingKey("clusters_per_cm"))?,
            electrons_per_cluster: electrons_per_cluster
                .ok_or(GasError::MissingKey("electrons_per_cluster"))?,
            photon_absorption_per_cm: photon_absorption_per_cm
                .ok_or(GasError::MissingKey("photon_absorption_per_cm"))?,
            drift_velocity_cm_ns: drift_velocity_cm_ns
                .ok_or(GasError::MissingKey("drift_velocity_cm_ns"))?,
            diffusion_sqrt_cm: diffusion_sqrt_cm
                .ok_or(GasError::MissingKey("diffusion_sqrt_cm"))?,
            townsend_per_cm: townsend_per_cm.ok_or(GasError::MissingKey("townsend_per_cm"))?,
            attachment_per_cm: attachment_per_cm
                .ok_or(GasError::MissingKey("attachment_per_cm"))?,
        };
        // The stochastic models divide by these; a zero would only surface
        // deep inside an event.
        let strictly_positive: [(&'static str, f64); 5] = [
            ("w_ev", table.w_ev),
            ("clusters_per_cm", table.clusters_per_cm),
            ("electrons_per_cluster", table.electrons_per_cluster),
            ("photon_absorption_per_cm", table.photon_absorption_per_cm),
            ("drift_velocity_cm_ns", table.drift_velocity_cm_ns),
        ];
        for (key, value) in strictly_positive {
            if value <= 0.0 {
                return Err(GasError::Invalid(key));
            }
        }
        let non_negative: [(&'static str, f64); 3] = [
            ("townsend_per_cm", table.townsend_per_cm),
            ("attachment_per_cm", table.attachment_per_cm),
            ("diffusion_sqrt_cm", table.diffusion_sqrt_cm),
        ];
        for (key, value) in non_negative {
            if value < 0.0 {
                return Err(GasError::Invalid(key));
            }
        }
        Ok(table)
    }

    /// Net multiplication coefficient, floored at zero.
    pub fn effective_townsend_per_cm(&self) -> f64 {
        (self.townsend_per_cm - self.attachment_per_cm).max(0.0)
    }
}

#[cfg(test)]
pub(crate) const SAMPLE_TABLE: &str = "\
# Ar/CO2 70:30 at 1000 mbar
composition ar/co2 70/30
temperature_k 293.15
pressure_torr 760.0
w_ev 28.1
clusters_per_cm 34.0
electrons_per_cluster 2.1
photon_absorption_per_cm 12.0
drift_velocity_cm_ns 6.5e-3
diffusion_sqrt_cm 2.0e-2
townsend_per_cm 110.0
attachment_per_cm 4.0
";
