mod analysis;
mod app;
mod bridge;
mod config;
mod detector;
mod gas;
mod geometry;
mod init_config;
mod io;
mod particle;
mod profiler;
mod reduction;
mod registry;
mod units;

#[cfg(feature = "profiling")]
use once_cell::sync::Lazy;
#[cfg(feature = "profiling")]
use parking_lot::Mutex;

#[cfg(feature = "profiling")]
pub static PROFILER: Lazy<Mutex<profiler::Profiler>> =
    Lazy::new(|| Mutex::new(profiler::Profiler::new()));

fn main() {
    app::run();
}
