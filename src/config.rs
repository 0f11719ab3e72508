// Centralized configuration for chamber and model parameters

// ====================
// Chamber geometry
// ====================
/// Gas gap thickness [cm].
pub const GAP_CM: f64 = 0.2;
/// Active-volume half-width along x [cm].
pub const HALF_X_CM: f64 = 128.5 / 2.0;
/// Active-volume half-length along z [cm].
pub const HALF_Z_CM: f64 = 165.0 / 2.0;
/// World sphere radius used by the primary generator [cm].
pub const WORLD_RADIUS_CM: f64 = 150.0;

// ====================
// Field and amplification
// ====================
/// High voltage applied between the plates [V].
pub const HV_VOLTS: f64 = 6000.0;
/// Approximate drift field along y [V/cm]. The anode plane sits at
/// y = -GAP_CM/2, the cathode at +GAP_CM/2; electrons drift toward -y.
pub const FIELD_V_PER_CM: f64 = HV_VOLTS / GAP_CM;
/// Distance step of the drift simulation [cm].
pub const DRIFT_STEP_CM: f64 = 1.0e-4;
/// Seed energy handed to the avalanche stage at the end of a drift path [eV].
pub const AVALANCHE_SEED_EV: f64 = 0.1;
/// Hard cap on a single sampled avalanche, matching the histogram range.
pub const AVALANCHE_SIZE_CAP: f64 = 1.0e7;

// ====================
// Run defaults
// ====================
/// Gas table shipped with the repository.
pub const DEFAULT_GAS_FILE: &str = "data/ar_70_co2_30_1000mbar.gas";
/// Events per run when the config file does not say otherwise.
pub const DEFAULT_EVENTS: usize = 100;
/// Print a per-event summary every this many events (0 disables).
pub const DEFAULT_PRINT_MODULO: usize = 1;
/// Base RNG seed; each event derives its own stream from this.
pub const DEFAULT_SEED: u64 = 0;
/// Default beam particle and kinetic energy.
pub const DEFAULT_BEAM_PARTICLE: &str = "mu-";
pub const DEFAULT_BEAM_ENERGY_MEV: f64 = 5.0e3;

// ====================
// Thread pool sizing
// ====================
pub const MIN_THREADS: usize = 3;
pub const THREADS_LEAVE_FREE: usize = 2;
