//! Application coordinator that wires the surfaces together.
//!
//! `Walkr` owns process-level concerns: installing the time source, loading
//! the settings store, registering the surfaces on the bus, and running the
//! scheduler until shutdown. The builder mirrors the two startup contexts:
//!
//! - Normal run: `Walkr::new(debug_enabled).run()`
//! - Simulation: `Walkr::new(debug_enabled).run_simulation(start, end, mult)`

use anyhow::{Context, Result, anyhow};
use std::sync::Arc;
use std::sync::mpsc;

use crate::core::scheduler::{Scheduler, SchedulerInput};
use crate::io::bus::{Bus, Surface};
use crate::io::notify::ConsoleNotifier;
use crate::io::timer::ThreadTimer;
use crate::settings::{FileStore, MemoryStore, SettingsStore};
use crate::surface::presentation::{ConsoleAudio, Presentation};
use crate::time_source::{self, SimulatedTimeSource};

pub struct Walkr {
    debug_enabled: bool,
    show_headers: bool,
}

impl Walkr {
    /// Create a runner with defaults matching a normal run.
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            show_headers: true,
        }
    }

    /// Skip the version header (scripted use).
    pub fn without_headers(mut self) -> Self {
        self.show_headers = false;
        self
    }

    /// Run against the real clock and the on-disk settings store. Blocks
    /// until the process is terminated.
    pub fn run(&self) -> Result<()> {
        if self.show_headers {
            log_version!();
        }
        let store: Arc<dyn SettingsStore> = Arc::new(FileStore::new()?);
        self.run_with_store(store)
    }

    /// Run against simulated time from `start` to `end`, with `multiplier`
    /// simulated seconds per real second (0 = fast-forward). Settings are
    /// copied from disk into memory with reminders forced active, so a
    /// simulation always has something to show.
    pub fn run_simulation(&self, start: &str, end: &str, multiplier: f64) -> Result<()> {
        let start = time_source::parse_datetime(start).map_err(|e| anyhow!(e))?;
        let end = time_source::parse_datetime(end).map_err(|e| anyhow!(e))?;
        if end <= start {
            return Err(anyhow!("Simulation end must be after start"));
        }

        time_source::init_time_source(Arc::new(SimulatedTimeSource::new(start, end, multiplier)));

        if self.show_headers {
            log_version!();
        }
        log_block_start!(
            "Simulating {} – {}",
            start.format("%Y-%m-%d %H:%M"),
            end.format("%Y-%m-%d %H:%M")
        );

        let mut settings = FileStore::new()?.load();
        if !settings.is_active() {
            log_indented!("Reminders are inactive on disk; forcing active for the simulation");
            settings.active = Some(true);
        }
        let store: Arc<dyn SettingsStore> = Arc::new(MemoryStore::new(settings));

        self.run_with_store(store)?;
        log_block_start!("Simulation complete");
        log_end!();
        Ok(())
    }

    /// Wire the surfaces to `store` and run the scheduler loop. Returns
    /// when the scheduler exits, which in real time means never.
    fn run_with_store(&self, store: Arc<dyn SettingsStore>) -> Result<()> {
        store.load().log_settings();

        let bus = Bus::new();
        let presentation = Presentation::spawn(Arc::new(ConsoleAudio), &bus)
            .context("Failed to spawn presentation surface")?;

        let (inbox_tx, inbox_rx) = mpsc::channel();

        // The timer's fired-callback and the bus both feed the scheduler's
        // single inbox, so the surface sees one ordered input stream
        let timer_tx = inbox_tx.clone();
        let timer = Arc::new(ThreadTimer::new(Arc::new(move |name: String| {
            let _ = timer_tx.send(SchedulerInput::TriggerFired(name));
        })));

        let bus_tx = inbox_tx;
        bus.register(
            Surface::Scheduler,
            Box::new(move |envelope| {
                let _ = bus_tx.send(SchedulerInput::Bus(envelope));
            }),
        );

        let scheduler = Scheduler::new(store, timer, Arc::new(ConsoleNotifier), bus.clone())
            .with_debug(self.debug_enabled);

        let handle = std::thread::Builder::new()
            .name("scheduler".to_string())
            .spawn(move || scheduler.run(inbox_rx))
            .context("Failed to spawn scheduler surface")?;

        handle
            .join()
            .map_err(|_| anyhow!("Scheduler surface panicked"))?;
        bus.unregister(Surface::Scheduler);
        presentation
            .join()
            .map_err(|_| anyhow!("Presentation surface panicked"))?;
        Ok(())
    }
}
