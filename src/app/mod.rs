// app/mod.rs
// Batch run driver: master-thread initialization, worker fan-out with one
// bridge per worker, per-event aggregation and end-of-run reporting.

use std::sync::Arc;

use crossbeam::channel;
use rayon::prelude::*;
use ultraviolet::DVec3;

use crate::analysis::{EventRecord, RunAnalysis};
use crate::bridge::FastSimBridge;
use crate::config;
use crate::detector::DetectorStack;
use crate::gas::GasTable;
use crate::init_config::RunConfig;
use crate::io::{save_summary, RunSummary};
use crate::registry::{IonizationModel, ParticleRegistry};
use crate::units;

pub mod event_loop;
pub mod primary;

use primary::PrimaryGenerator;

fn event_seed(base: u64, event_id: usize) -> u64 {
    base ^ (event_id as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15)
}

pub fn run() {
    // Global thread pool with threads = max(MIN_THREADS, cores) - leave-free,
    // unless the config pins a count.
    let cfg = match RunConfig::load_default() {
        Ok(cfg) => {
            println!("Loaded run configuration from run_config.toml");
            cfg
        }
        Err(e) => {
            eprintln!("Failed to load run_config.toml: {}", e);
            eprintln!("Using default configuration");
            RunConfig::default()
        }
    };
    let threads = cfg.threads().unwrap_or_else(|| {
        std::thread::available_parallelism()
            .unwrap()
            .get()
            .max(config::MIN_THREADS)
            - config::THREADS_LEAVE_FREE
    });
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .unwrap();

    // Master-thread initialization: applicability tables and the gas table
    // are built once here and shared read-only with the workers.
    let model = IonizationModel::from_name(&cfg.ionization());
    let mut registry = ParticleRegistry::new();
    model.install_defaults(&mut registry);
    let registry = Arc::new(registry);

    let gas_file = cfg.gas_file();
    let table = match GasTable::load(&gas_file) {
        Ok(table) => {
            println!("Loaded gas table {} ({})", gas_file, table.composition);
            Arc::new(table)
        }
        Err(e) => {
            // The bridge cannot answer anything without a gas model.
            eprintln!("fatal: {}", e);
            std::process::exit(1);
        }
    };

    let stack = DetectorStack::rpc();
    let solid = stack.gas_gap();
    let generator = PrimaryGenerator::new(&cfg.beam_particle(), cfg.beam_energy_mev(), cfg.seed());

    let events = cfg.events();
    let seed = cfg.seed();
    let print_modulo = cfg.print_modulo();
    let create_secondaries = cfg.create_secondaries();
    println!(
        "Processing {} events of {} at {:.1} MeV on {} threads",
        events,
        cfg.beam_particle(),
        cfg.beam_energy_mev(),
        threads
    );

    let (tx, rx) = channel::unbounded::<(EventRecord, Vec<DVec3>)>();
    let writer = std::thread::spawn(move || {
        let mut analysis = RunAnalysis::new();
        for (record, positions_mm) in rx {
            analysis.fill_positions(&positions_mm);
            if print_modulo > 0 && record.event_id % print_modulo == 0 {
                println!("---> End of event: {}", record.event_id);
                println!(
                    "   Absorber: total energy: {:9.3} MeV       total track length: {:8.2} mm",
                    record.energy_abs_mev, record.track_l_abs_mm
                );
                println!(
                    "        Gas: total energy: {:9.3} keV       avalanche size: {:.0}       gain: {:.3}",
                    record.energy_gas_mev / units::KEV,
                    record.avalanche_size,
                    record.gain
                );
            }
            analysis.record_event(record);
        }
        analysis
    });

    // Each worker owns its bridge (gateway RNG, drift/avalanche state); only
    // the registry and the gas table are shared.
    (0..events).into_par_iter().for_each_init(
        || {
            let bridge = FastSimBridge::new(
                registry.clone(),
                model,
                table.clone(),
                solid,
                seed,
                create_secondaries,
            );
            (bridge, tx.clone())
        },
        |(bridge, tx), event_id| {
            bridge.reseed(event_seed(seed, event_id));
            let primary = generator.generate(event_id as u64);
            let outcome = event_loop::process_event(bridge, &stack, &solid, &primary, event_id);
            let _ = tx.send(outcome);
        },
    );
    drop(tx);

    let analysis = writer.join().expect("analysis thread panicked");
    analysis.print_statistics();

    let csv_path = cfg.output_csv();
    match analysis.write_csv(&csv_path) {
        Ok(()) => println!("Wrote per-event rows to {}", csv_path),
        Err(e) => eprintln!("Failed to write {}: {}", csv_path, e),
    }

    let summary = RunSummary::from_analysis(
        &analysis,
        model.name(),
        &gas_file,
        &cfg.beam_particle(),
        cfg.beam_energy_mev(),
    );
    let summary_path = cfg.summary_path();
    match save_summary(&summary_path, &summary) {
        Ok(()) => println!("Wrote run summary to {}", summary_path),
        Err(e) => eprintln!("Failed to write {}: {}", summary_path, e),
    }

    #[cfg(feature = "profiling")]
    crate::PROFILER.lock().print_and_clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_seeds_differ_between_events() {
        let a = event_seed(0, 1);
        let b = event_seed(0, 2);
        assert_ne!(a, b);
        assert_eq!(event_seed(7, 3), event_seed(7, 3));
    }
}
