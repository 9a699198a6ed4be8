//! Debounced execution.
//!
//! A [`Debouncer`] coalesces a rapid burst of update requests into at most one
//! execution after a configurable quiet period: out of any number of
//! submissions, only the most recent one runs. The diff recomputation and the
//! search re-scan are both gated through one of these, so a stream of edit or
//! scroll events settles into a single downstream pass.
//!
//! One scheduler thread per instance consumes a mutex-guarded pending slot;
//! `submit` replaces the slot content under the lock, which makes
//! "read current pending request, cancel it, install the new one" a single
//! critical section. Cancellation cannot unwind an action the scheduler has
//! already started running; it only guarantees the cancelled request will not
//! fire in the future.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// One debounced unit of work: run `action(payload)` after the quiet period,
/// then run `on_complete` if present.
pub struct DebounceRequest<T> {
    payload: T,
    action: Box<dyn FnOnce(T) + Send>,
    on_complete: Option<Box<dyn FnOnce() + Send>>,
}

impl<T> DebounceRequest<T> {
    /// Create a request that runs `action(payload)` when it fires.
    pub fn new(payload: T, action: impl FnOnce(T) + Send + 'static) -> Self {
        Self {
            payload,
            action: Box::new(action),
            on_complete: None,
        }
    }

    /// Attach a completion callback, run after the action even when the
    /// action panics.
    pub fn on_complete(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }
}

impl<T> std::fmt::Debug for DebounceRequest<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebounceRequest")
            .field("has_on_complete", &self.on_complete.is_some())
            .finish_non_exhaustive()
    }
}

struct Pending<T> {
    request: DebounceRequest<T>,
    deadline: Instant,
}

struct State<T> {
    pending: Option<Pending<T>>,
    disposed: bool,
}

struct Shared<T> {
    state: Mutex<State<T>>,
    cond: Condvar,
}

impl<T> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Coalesces rapid-fire submissions into a single execution per quiet period.
///
/// At most one execution is ever pending per instance; a new [`submit`]
/// atomically cancels and replaces any not-yet-fired predecessor.
///
/// [`submit`]: Debouncer::submit
pub struct Debouncer<T: Send + 'static> {
    shared: Arc<Shared<T>>,
    quiet_period: Duration,
    worker: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer whose requests fire after `quiet_period` without an
    /// intervening submit or cancel.
    pub fn new(quiet_period: Duration) -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(State {
                pending: None,
                disposed: false,
            }),
            cond: Condvar::new(),
        });

        let worker_shared = Arc::clone(&shared);
        let worker = std::thread::Builder::new()
            .name("debouncer".to_string())
            .spawn(move || scheduler_loop(worker_shared))
            .ok();
        if worker.is_none() {
            log::error!("debouncer scheduler thread could not be spawned; requests will not fire");
        }

        Self {
            shared,
            quiet_period,
            worker,
        }
    }

    /// Schedule `request`, cancelling and replacing any pending predecessor.
    ///
    /// Submissions after [`dispose`](Self::dispose) are dropped.
    pub fn submit(&self, request: DebounceRequest<T>) {
        let mut state = self.shared.lock();
        if state.disposed {
            log::debug!("submit after dispose ignored");
            return;
        }
        state.pending = Some(Pending {
            request,
            deadline: Instant::now() + self.quiet_period,
        });
        drop(state);
        self.shared.cond.notify_one();
    }

    /// Discard any pending execution. The cancelled request's action never
    /// runs; work the scheduler has already started is unaffected.
    pub fn cancel(&self) {
        let mut state = self.shared.lock();
        state.pending = None;
        drop(state);
        self.shared.cond.notify_one();
    }

    /// Returns `true` while an execution is scheduled but has not fired.
    pub fn has_pending(&self) -> bool {
        self.shared.lock().pending.is_some()
    }

    /// Cancel any pending execution and shut the scheduler down. Idempotent;
    /// no request fires after this returns.
    pub fn dispose(&mut self) {
        {
            let mut state = self.shared.lock();
            state.pending = None;
            state.disposed = true;
        }
        self.shared.cond.notify_one();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl<T: Send + 'static> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn scheduler_loop<T>(shared: Arc<Shared<T>>) {
    let mut state = shared.lock();
    loop {
        if state.disposed {
            return;
        }
        let Some(deadline) = state.pending.as_ref().map(|p| p.deadline) else {
            state = shared
                .cond
                .wait(state)
                .unwrap_or_else(|e| e.into_inner());
            continue;
        };

        let now = Instant::now();
        if now < deadline {
            // A submit may replace the slot while we wait; the fresh deadline
            // is re-read on the next pass.
            state = shared
                .cond
                .wait_timeout(state, deadline - now)
                .unwrap_or_else(|e| e.into_inner())
                .0;
            continue;
        }

        // Quiet period elapsed: take the request out (clearing the slot)
        // before running it, so cancel/submit during execution see no pending.
        if let Some(pending) = state.pending.take() {
            drop(state);
            run_request(pending.request);
            state = shared.lock();
        }
    }
}

fn run_request<T>(request: DebounceRequest<T>) {
    let DebounceRequest {
        payload,
        action,
        on_complete,
    } = request;

    let result = catch_unwind(AssertUnwindSafe(move || action(payload)));

    // on_complete runs in a "finally" sense, even when the action panicked.
    if let Some(on_complete) = on_complete
        && let Err(panic) = catch_unwind(AssertUnwindSafe(on_complete))
    {
        log::error!("debounced on_complete panicked: {}", panic_message(&panic));
    }

    if let Err(panic) = result {
        log::error!("debounced action panicked: {}", panic_message(&panic));
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s
    } else {
        "<non-string panic payload>"
    }
}
