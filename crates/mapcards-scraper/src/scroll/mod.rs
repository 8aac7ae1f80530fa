//! Timer-paced auto-scroll over a results page.
//!
//! A [`ScrollDriver`] runs at most one session at a time as a tokio task.
//! Each cycle counts result items, scrolls the best target in small paced
//! steps, reports a [`ScrollStatus`], and stops on the first satisfied
//! condition: cycle ceiling, stall streak, or end of content.

mod container;
mod page;
mod selectors;
mod session;

#[cfg(test)]
mod fake_page;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mapcards_core::{ScrollControl, ScrollOptions, ScrollStatus, StopReason};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use self::container::{count_items, is_near_end, resolve_target};
use self::session::ScrollSession;

pub use page::{Overflow, ScrollExtent, ScrollPage, ScrollTarget};
pub use selectors::{CONTAINER_SELECTORS, ITEM_COUNT_SELECTORS, RESULT_ITEM_SELECTOR};

struct Running {
    generation: u64,
    stop_tx: oneshot::Sender<()>,
    scroll_count: u32,
    // Dropping the handle detaches the task; kept for `is_active`.
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct Slot {
    generation: u64,
    running: Option<Running>,
}

pub struct ScrollDriver<P: ScrollPage> {
    page: Arc<P>,
    status_tx: Option<mpsc::UnboundedSender<ScrollStatus>>,
    slot: Arc<Mutex<Slot>>,
}

impl<P: ScrollPage> ScrollDriver<P> {
    /// Creates an idle driver. Status events go to `status_tx` when given.
    #[must_use]
    pub fn new(page: Arc<P>, status_tx: Option<mpsc::UnboundedSender<ScrollStatus>>) -> Self {
        Self {
            page,
            status_tx,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        lock(&self.slot)
            .running
            .as_ref()
            .is_some_and(|r| !r.handle.is_finished())
    }

    /// Starts a session. A no-op returning `false` while one is active.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, options: ScrollOptions) -> bool {
        let mut slot = lock(&self.slot);
        if slot
            .running
            .as_ref()
            .is_some_and(|r| !r.handle.is_finished())
        {
            return false;
        }

        slot.generation += 1;
        let generation = slot.generation;

        let initial = count_items(self.page.as_ref());
        let session = ScrollSession::new(&options, initial);
        emit(self.status_tx.as_ref(), session.status(initial));
        tracing::info!(
            interval_ms = u64::try_from(options.interval.as_millis()).unwrap_or(u64::MAX),
            max_cycles = options.max_cycles,
            items = initial,
            "auto-scroll started"
        );

        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = tokio::spawn(run_session(
            Arc::clone(&self.page),
            self.status_tx.clone(),
            Arc::clone(&self.slot),
            generation,
            session,
            options,
            stop_rx,
        ));
        slot.running = Some(Running {
            generation,
            stop_tx,
            scroll_count: 0,
            handle,
        });
        true
    }

    /// Stops the active session. A no-op returning `false` when idle.
    ///
    /// The final `Requested` status is emitted before this returns, so it
    /// always precedes the start event of a later session. The pending
    /// cycle timer is cancelled; scroll sub-steps already in flight finish
    /// on their own.
    pub fn stop(&self) -> bool {
        let mut slot = lock(&self.slot);
        let Some(running) = slot.running.take() else {
            return false;
        };
        if running.handle.is_finished() || running.stop_tx.send(()).is_err() {
            return false;
        }

        let item_count = count_items(self.page.as_ref());
        emit(
            self.status_tx.as_ref(),
            ScrollStatus {
                active: false,
                scroll_count: running.scroll_count,
                item_count,
                stop_reason: Some(StopReason::Requested),
            },
        );
        tracing::info!(
            reason = %StopReason::Requested,
            cycles = running.scroll_count,
            items = item_count,
            "auto-scroll stopped"
        );
        true
    }
}

impl<P: ScrollPage> ScrollControl for ScrollDriver<P> {
    fn start(&self, options: ScrollOptions) -> bool {
        ScrollDriver::start(self, options)
    }

    fn stop(&self) -> bool {
        ScrollDriver::stop(self)
    }
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

fn emit(status_tx: Option<&mpsc::UnboundedSender<ScrollStatus>>, status: ScrollStatus) {
    if let Some(tx) = status_tx {
        if tx.send(status).is_err() {
            tracing::trace!("scroll status receiver dropped");
        }
    }
}

async fn run_session<P: ScrollPage>(
    page: Arc<P>,
    status_tx: Option<mpsc::UnboundedSender<ScrollStatus>>,
    slot: Arc<Mutex<Slot>>,
    generation: u64,
    mut session: ScrollSession,
    options: ScrollOptions,
    mut stop_rx: oneshot::Receiver<()>,
) {
    // Events are emitted under the slot lock and only while this session
    // still owns the slot; `stop` reports the final status itself.
    let reason = loop {
        tokio::select! {
            _ = &mut stop_rx => return,
            () = tokio::time::sleep(options.interval) => {}
        }

        let item_count = count_items(page.as_ref());
        session.record_cycle(item_count);
        let target = resolve_target(page.as_ref());

        {
            let mut slot = lock(&slot);
            let Some(running) = owned(&mut slot, generation) else {
                return;
            };
            running.scroll_count = session.scroll_count();
            spawn_scroll_steps(Arc::clone(&page), target.clone(), &options);
            emit(status_tx.as_ref(), session.status(item_count));
        }
        tracing::debug!(
            cycle = session.scroll_count(),
            items = item_count,
            container = matches!(target, ScrollTarget::Element(_)),
            "scroll cycle"
        );

        if let Some(reason) = session.stop_reason(|| is_near_end(page.as_ref(), &target, &options)) {
            break reason;
        }
    };

    let mut slot = lock(&slot);
    if owned(&mut slot, generation).is_none() {
        return;
    }
    slot.running = None;

    let item_count = count_items(page.as_ref());
    emit(status_tx.as_ref(), session.final_status(item_count, reason));
    tracing::info!(
        %reason,
        cycles = session.scroll_count(),
        items = item_count,
        "auto-scroll stopped"
    );
}

fn owned(slot: &mut Slot, generation: u64) -> Option<&mut Running> {
    slot.running.as_mut().filter(|r| r.generation == generation)
}

/// Splits one cycle's scroll into evenly paced sub-steps.
fn spawn_scroll_steps<P: ScrollPage>(
    page: Arc<P>,
    target: ScrollTarget<P::Element>,
    options: &ScrollOptions,
) {
    let steps = options.steps.max(1);
    let step = page.viewport_height() * options.scroll_fraction / f64::from(steps);
    let step_interval = options.step_interval;
    tokio::spawn(async move {
        for _ in 0..steps {
            tokio::time::sleep(step_interval).await;
            page.scroll_by(&target, step);
        }
    });
}

#[cfg(test)]
#[path = "driver_test.rs"]
mod tests;
