//! Autoplay unlock gate
//!
//! Mobile runtimes refuse to start audio that was not directly triggered by
//! a user gesture. The gate tracks whether such a gesture has happened and
//! lets interested parties run a callback the moment audio becomes
//! playable.
//!
//! The gate is an explicitly constructed component, not a module-level
//! global: build exactly one per process at application start and hand it to
//! the playback engine (and any shell code that forwards gestures) by
//! shared reference.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Host runtime class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Desktop browsers and native shells; no gesture gate applies
    Desktop,

    /// Mobile runtimes; audio stays blocked until a qualifying gesture
    Mobile,
}

/// User gestures that qualify for unlocking audio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Pointer/mouse press
    PointerDown,

    /// Touch released
    TouchEnd,

    /// Key pressed
    KeyDown,
}

/// Platform hook that activates the audio subsystem
///
/// Implementations resume the platform audio context and play a zero-volume
/// probe clip, returning whether the runtime accepted it.
pub trait UnlockProbe: Send + Sync {
    /// Attempt activation; must not panic
    fn try_activate(&self) -> bool;
}

/// Probe for runtimes that accept activation unconditionally
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysReadyProbe;

impl UnlockProbe for AlwaysReadyProbe {
    fn try_activate(&self) -> bool {
        true
    }
}

type UnlockCallback = Box<dyn FnOnce() + Send>;

struct SubscriberList {
    next_id: u64,
    entries: Vec<(u64, UnlockCallback)>,
}

/// One-shot gate guarding audio playback on mobile runtimes
///
/// The unlocked flag is monotonic: once a gesture-driven probe succeeds it
/// stays set for the rest of the process. On [`Platform::Desktop`] the gate
/// reports unlocked from the start.
pub struct UnlockGate {
    platform: Platform,
    probe: Box<dyn UnlockProbe>,
    unlocked: AtomicBool,
    has_interacted: AtomicBool,
    armed: Arc<AtomicBool>,
    subscribers: Arc<Mutex<SubscriberList>>,
}

impl UnlockGate {
    /// Create a gate for the given platform and activation probe
    pub fn new(platform: Platform, probe: Box<dyn UnlockProbe>) -> Self {
        Self {
            platform,
            probe,
            unlocked: AtomicBool::new(false),
            has_interacted: AtomicBool::new(false),
            armed: Arc::new(AtomicBool::new(false)),
            subscribers: Arc::new(Mutex::new(SubscriberList {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Convenience constructor for desktop runtimes (no gate needed)
    pub fn desktop() -> Self {
        Self::new(Platform::Desktop, Box::new(AlwaysReadyProbe))
    }

    /// Whether audio may play
    ///
    /// Always true on desktop runtimes.
    pub fn is_unlocked(&self) -> bool {
        self.platform == Platform::Desktop || self.unlocked.load(Ordering::Acquire)
    }

    /// Whether a qualifying gesture has been seen this session
    pub fn has_interacted(&self) -> bool {
        self.has_interacted.load(Ordering::Acquire)
    }

    /// Attempt to unlock the audio subsystem
    ///
    /// Idempotent: once unlocked, further calls return immediately and do
    /// not re-invoke already-fired subscribers. On probe failure the state
    /// is unchanged; callers retry on a later gesture. Never panics and
    /// never surfaces an error.
    pub fn unlock(&self) {
        if self.is_unlocked() {
            debug!("audio already unlocked");
            return;
        }

        if !self.probe.try_activate() {
            warn!("audio unlock probe failed; will retry on next gesture");
            return;
        }

        self.unlocked.store(true, Ordering::Release);
        self.armed.store(false, Ordering::Release);
        debug!("audio unlocked");

        let entries = {
            let mut list = self
                .subscribers
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            std::mem::take(&mut list.entries)
        };
        for (_, callback) in entries {
            callback();
        }
    }

    /// Register a one-shot callback for the moment audio unlocks
    ///
    /// If the gate is already unlocked the callback runs immediately (and
    /// exactly once). Otherwise it fires on the first successful
    /// [`unlock`](Self::unlock). Dropping the returned subscription before
    /// the gate unlocks deregisters the callback; call
    /// [`UnlockSubscription::detach`] to keep it registered without holding
    /// the handle.
    pub fn on_unlock(&self, callback: impl FnOnce() + Send + 'static) -> UnlockSubscription {
        if self.is_unlocked() {
            callback();
            return UnlockSubscription { list: None, id: 0 };
        }

        let mut list = self
            .subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let id = list.next_id;
        list.next_id += 1;
        list.entries.push((id, Box::new(callback)));

        UnlockSubscription {
            list: Some(Arc::clone(&self.subscribers)),
            id,
        }
    }

    /// Arm the gate to attempt an unlock on the next qualifying gesture
    ///
    /// The arm stays active until an unlock attempt succeeds or the returned
    /// guard is dropped (view teardown before any gesture arrives). Arming
    /// an already-armed or already-unlocked gate is harmless.
    pub fn arm(&self) -> GestureArm {
        self.armed.store(true, Ordering::Release);
        GestureArm {
            armed: Arc::clone(&self.armed),
        }
    }

    /// Whether a gesture listener is currently armed
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    /// Report a user gesture from the shell
    ///
    /// Records the interaction and, while armed, funnels the gesture into an
    /// [`unlock`](Self::unlock) attempt.
    pub fn notify_gesture(&self, kind: GestureKind) {
        debug!(?kind, "user gesture");
        self.has_interacted.store(true, Ordering::Release);

        if !self.armed.load(Ordering::Acquire) {
            return;
        }

        if self.is_unlocked() {
            self.armed.store(false, Ordering::Release);
            return;
        }

        self.unlock();
    }
}

impl std::fmt::Debug for UnlockGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnlockGate")
            .field("platform", &self.platform)
            .field("unlocked", &self.is_unlocked())
            .field("has_interacted", &self.has_interacted())
            .field("armed", &self.is_armed())
            .finish()
    }
}

/// Deregistration handle returned by [`UnlockGate::on_unlock`]
///
/// Dropping the handle removes the callback if it has not fired yet.
pub struct UnlockSubscription {
    list: Option<Arc<Mutex<SubscriberList>>>,
    id: u64,
}

impl UnlockSubscription {
    /// Keep the callback registered without holding this handle
    pub fn detach(mut self) {
        self.list = None;
    }
}

impl Drop for UnlockSubscription {
    fn drop(&mut self) {
        if let Some(list) = self.list.take() {
            let mut list = list.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            list.entries.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Teardown guard returned by [`UnlockGate::arm`]
///
/// Dropping the guard disarms the gesture listener if no gesture has
/// unlocked the gate yet.
pub struct GestureArm {
    armed: Arc<AtomicBool>,
}

impl Drop for GestureArm {
    fn drop(&mut self) {
        self.armed.store(false, Ordering::Release);
    }
}
