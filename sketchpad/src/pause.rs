use std::{
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender},
    time::{Duration, Instant},
};

/// Gets told when a pause ends early.
///
/// An interruption is never an error; this is the only place it shows up.
pub trait PauseObserver: Send {
    fn interrupted(&self, requested: Duration, elapsed: Duration);
}

/// Default observer, reports through the `log` facade
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;
impl PauseObserver for LogObserver {
    fn interrupted(&self, requested: Duration, elapsed: Duration) {
        log::warn!(
            "pause of {}ms interrupted after {}ms",
            requested.as_millis(),
            elapsed.as_millis()
        );
    }
}

/// Cloneable trigger that cuts short whatever pause is in progress on its [`Pacer`]
#[derive(Clone, Debug)]
pub struct Interrupter(Sender<()>);
impl Interrupter {
    pub fn interrupt(&self) {
        // The pacer may already be gone, nothing left to wake then
        let _ = self.0.send(());
    }
}

/// Blocks the calling thread between animation frames
pub struct Pacer {
    interrupts: Receiver<()>,
    trigger: Sender<()>,
    observer: Box<dyn PauseObserver>,
}
impl Pacer {
    pub fn new() -> Self {
        Self::with_observer(LogObserver)
    }

    pub fn with_observer(observer: impl PauseObserver + 'static) -> Self {
        let (trigger, interrupts) = mpsc::channel();
        Self {
            interrupts,
            trigger,
            observer: Box::new(observer),
        }
    }

    pub fn set_observer(&mut self, observer: impl PauseObserver + 'static) {
        self.observer = Box::new(observer);
    }

    pub fn interrupter(&self) -> Interrupter {
        Interrupter(self.trigger.clone())
    }

    /// Waits for `millis` milliseconds or until interrupted, whichever comes first.
    ///
    /// Interrupts sent while no pause was running are discarded.
    pub fn pause(&self, millis: u64) {
        while self.interrupts.try_recv().is_ok() {}

        let requested = Duration::from_millis(millis);
        if requested.is_zero() {
            return;
        }

        let start = Instant::now();
        match self.interrupts.recv_timeout(requested) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) => self.observer.interrupted(requested, start.elapsed()),
            // We hold a sender ourselves, so this cannot happen
            Err(RecvTimeoutError::Disconnected) => {
                std::thread::sleep(requested.saturating_sub(start.elapsed()))
            }
        }
    }
}
impl Default for Pacer {
    fn default() -> Self {
        Self::new()
    }
}
