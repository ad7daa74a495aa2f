//! Ctrl+C handling.
//!
//! The handler needs the session log, which only exists once the operator
//! has named the output directory. The pipeline attaches it to a shared slot
//! as soon as it is created. While the pipeline is running an interrupt
//! records the final line and exits straight away; once the pipeline is
//! idle the interrupt wakes `Interrupt::wait` instead.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use crossbeam::channel::{bounded, Receiver, Sender};
use log::{debug, warn};

use crate::constants::MSG_INTERRUPTED;
use crate::session_log::SessionLog;

/// What the signal handler should do with a delivered interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptAction {
    /// The pipeline is idle and has been woken
    Wake,
    /// The pipeline is mid-run; the process should exit now
    Exit,
}

/// Sending half, owned by the signal handler.
#[derive(Debug, Clone)]
pub struct InterruptTrigger {
    session: Arc<Mutex<Option<SessionLog>>>,
    idle: Arc<AtomicBool>,
    sender: Sender<()>,
}

impl InterruptTrigger {
    /// Handle one interrupt.
    pub fn handle(&self) -> InterruptAction {
        if self.idle.load(Ordering::SeqCst) {
            // Repeated Ctrl+C while idle only needs one wake-up.
            let _ = self.sender.try_send(());
            return InterruptAction::Wake;
        }

        if let Ok(slot) = self.session.lock() {
            if let Some(log) = slot.as_ref() {
                if let Err(e) = log.info(MSG_INTERRUPTED) {
                    warn!("Failed to record interrupt in {}: {:#}", log.path().display(), e);
                }
            }
        }
        InterruptAction::Exit
    }
}

/// Receiving half, owned by the pipeline.
#[derive(Debug)]
pub struct Interrupt {
    session: Arc<Mutex<Option<SessionLog>>>,
    idle: Arc<AtomicBool>,
    receiver: Receiver<()>,
}

impl Interrupt {
    /// Register the process-wide Ctrl+C handler.
    pub fn install() -> Result<Self> {
        let (interrupt, trigger) = Self::manual();

        ctrlc::set_handler(move || {
            if trigger.handle() == InterruptAction::Exit {
                std::process::exit(0);
            }
        })
        .context("Failed to register Ctrl+C handler")?;

        Ok(interrupt)
    }

    /// Create a pair without registering a handler.
    pub fn manual() -> (Self, InterruptTrigger) {
        let session = Arc::new(Mutex::new(None));
        let idle = Arc::new(AtomicBool::new(false));
        let (sender, receiver) = bounded(1);

        let trigger = InterruptTrigger {
            session: Arc::clone(&session),
            idle: Arc::clone(&idle),
            sender,
        };

        (Self { session, idle, receiver }, trigger)
    }

    /// Make the session log available to the handler.
    pub fn attach(&self, log: &SessionLog) {
        if let Ok(mut slot) = self.session.lock() {
            *slot = Some(log.clone());
        }
    }

    /// Block until an interrupt arrives, then record the final line.
    pub fn wait(&self) -> Result<()> {
        self.idle.store(true, Ordering::SeqCst);
        debug!("Idle, waiting for Ctrl+C");

        self.receiver
            .recv()
            .context("Interrupt channel closed while waiting")?;

        let slot = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("Session log slot poisoned"))?;
        if let Some(log) = slot.as_ref() {
            log.info(MSG_INTERRUPTED)?;
        }
        Ok(())
    }
}
