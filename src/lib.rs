pub mod analysis;
pub mod bridge;
pub mod config;
pub mod detector;
pub mod gas;
pub mod geometry;
pub mod init_config;
pub mod io;
pub mod particle;
pub mod profiler;
pub mod reduction;
pub mod registry;
pub mod units;

pub mod app;

#[cfg(feature = "profiling")]
use once_cell::sync::Lazy;
#[cfg(feature = "profiling")]
use parking_lot::Mutex;

#[cfg(feature = "profiling")]
pub static PROFILER: Lazy<Mutex<profiler::Profiler>> =
    Lazy::new(|| Mutex::new(profiler::Profiler::new()));
