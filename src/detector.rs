// detector.rs
// The RPC layer stack reduced to a 1-D material budget along the stack
// normal. Only the absorber bookkeeping lives here; the gas gap itself is
// handled by the fast-sim bridge.

use crate::config;
use crate::geometry::GasGap;

/// One material slab of the stack.
#[derive(Clone, Copy, Debug)]
pub struct Layer {
    pub name: &'static str,
    pub thickness_cm: f64,
    /// Minimum-ionizing stopping power [MeV/cm].
    pub stopping_power_mev_cm: f64,
}

/// The chamber stack, listed top to bottom along -y. The gas gap sits
/// between the two glass plates.
#[derive(Clone, Debug)]
pub struct DetectorStack {
    pub layers: Vec<Layer>,
    gas_index: usize,
}

impl DetectorStack {
    /// The as-built stack: aluminium casing, copper pad plane, acrylic,
    /// graphite coating, glass electrodes around the gas gap, mirrored
    /// below.
    pub fn rpc() -> Self {
        let layers = vec![
            Layer { name: "aluminium", thickness_cm: 2.5, stopping_power_mev_cm: 4.36 },
            Layer { name: "pad_copper", thickness_cm: 0.5, stopping_power_mev_cm: 12.57 },
            Layer { name: "acrylic", thickness_cm: 1.0, stopping_power_mev_cm: 2.33 },
            Layer { name: "graphite", thickness_cm: 1.0, stopping_power_mev_cm: 3.80 },
            Layer { name: "glass", thickness_cm: 0.2, stopping_power_mev_cm: 3.91 },
            Layer { name: "gas", thickness_cm: config::GAP_CM, stopping_power_mev_cm: 0.0 },
            Layer { name: "glass", thickness_cm: 0.2, stopping_power_mev_cm: 3.91 },
            Layer { name: "graphite", thickness_cm: 1.0, stopping_power_mev_cm: 3.80 },
            Layer { name: "acrylic", thickness_cm: 1.0, stopping_power_mev_cm: 2.33 },
            Layer { name: "aluminium", thickness_cm: 2.5, stopping_power_mev_cm: 4.36 },
        ];
        let gas_index = layers.iter().position(|l| l.name == "gas").unwrap();
        Self { layers, gas_index }
    }

    pub fn gas_gap(&self) -> GasGap {
        GasGap::from_chamber()
    }

    pub fn total_thickness_cm(&self) -> f64 {
        self.layers.iter().map(|l| l.thickness_cm).sum()
    }

    /// Energy loss [MeV] and charged track length [mm] accumulated in the
    /// absorber layers above the gas gap by a track at `cos_theta` to the
    /// stack normal. `ekin_mev` caps the loss; a track that ranges out stops
    /// contributing length as well.
    pub fn absorber_budget(&self, cos_theta: f64, ekin_mev: f64) -> (f64, f64) {
        let cos_theta = cos_theta.abs().max(1e-6);
        let mut edep_mev = 0.0;
        let mut length_mm = 0.0;
        for layer in &self.layers[..self.gas_index] {
            let path_cm = layer.thickness_cm / cos_theta;
            let loss = layer.stopping_power_mev_cm * path_cm;
            let remaining = ekin_mev - edep_mev;
            if loss >= remaining {
                // Ranges out inside this layer.
                let fraction = if loss > 0.0 { remaining / loss } else { 0.0 };
                edep_mev += remaining;
                length_mm += path_cm * fraction * 10.0;
                return (edep_mev, length_mm);
            }
            edep_mev += loss;
            length_mm += path_cm * 10.0;
        }
        (edep_mev, length_mm)
    }
}
