//! Unit conventions and conversions.
//!
//! Two unit systems meet in this crate. The gas microphysics side works in
//! Garfield conventions (cm, ns, eV); the transport side exchanges MeV and
//! mm. Records converting between the two do so in their constructors, never
//! downstream.

/// Electronvolts per MeV.
pub const EV_PER_MEV: f64 = 1.0e6;
/// MeV per electronvolt.
pub const MEV_PER_EV: f64 = 1.0e-6;
/// Millimetres per centimetre.
pub const MM_PER_CM: f64 = 10.0;
/// One keV expressed in MeV.
pub const KEV: f64 = 1.0e-3;
/// One GeV expressed in MeV.
pub const GEV: f64 = 1.0e3;
/// Speed of light in cm/ns.
pub const C_CM_NS: f64 = 29.979_245_8;
