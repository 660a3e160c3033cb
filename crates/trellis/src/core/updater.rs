//! Timer scheduling for periodic updates.
//!
//! Entries live in two queues sorted by expiry time. Expiry times are
//! wrapping `u32` milliseconds, so an entry whose expiry has wrapped past
//! zero sorts below the current time; such entries wait in the inactive
//! queue until the clock itself wraps, at which point the queues swap.

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    fmt, mem,
    rc::{Rc, Weak},
};

use tracing::{trace, warn};

use crate::{
    core::clock::Clock,
    error::{Error, Result},
};

/// Something that wants to be called periodically.
pub trait Updatable {
    /// Called when the period has elapsed. `dt_ms` is the time since the
    /// entry was started or last fired.
    fn update(&mut self, dt_ms: u32, cx: &mut UpdateCx<'_>);
}

/// Identity of a target: the address of its shared allocation.
type Key = usize;

/// Shared handle to an updatable target.
pub type Target<T> = Rc<RefCell<T>>;

/// Where an entry currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Waiting in the staging list.
    Pending,
    /// Queued in the active queue.
    Active,
    /// Queued in the inactive queue.
    Inactive,
    /// Its update callback is running.
    Firing,
}

/// Bookkeeping for one target.
struct Entry {
    /// The target. Never upgraded except to fire.
    target: Weak<RefCell<dyn Updatable>>,
    /// Start of the current period.
    started_at: u32,
    /// Period length.
    period: u32,
    /// Membership.
    state: State,
}

impl Entry {
    /// Expiry time of the current period.
    fn ends_at(&self) -> u32 {
        self.started_at.wrapping_add(self.period)
    }
}

/// A queued entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Item {
    /// Expiry time.
    ends_at: u32,
    /// Entry key.
    key: Key,
}

/// A queue of items sorted by expiry time. Items with equal expiry keep
/// their insertion order.
#[derive(Debug, Default)]
struct Queue {
    /// Items, soonest first.
    items: VecDeque<Item>,
}

impl Queue {
    /// Insert an item in order.
    fn insert(&mut self, item: Item) {
        match self.items.back() {
            None => self.items.push_back(item),
            Some(last) if last.ends_at <= item.ends_at => self.items.push_back(item),
            Some(_) => {
                let at = self
                    .items
                    .iter()
                    .position(|i| i.ends_at > item.ends_at)
                    .unwrap_or(self.items.len());
                self.items.insert(at, item);
            }
        }
    }

    /// Remove the item for a key, if present.
    fn remove(&mut self, key: Key) {
        if let Some(at) = self.items.iter().position(|i| i.key == key) {
            self.items.remove(at);
        }
    }

    /// The soonest item.
    fn front(&self) -> Option<Item> {
        self.items.front().copied()
    }

    /// Take the soonest item.
    fn pop_front(&mut self) -> Option<Item> {
        self.items.pop_front()
    }

    /// Number of queued items.
    fn len(&self) -> usize {
        self.items.len()
    }
}

/// The timer scheduler. Call [`Updater::update`] once per frame.
pub struct Updater {
    /// Time source.
    clock: Rc<dyn Clock>,
    /// All tracked entries.
    entries: HashMap<Key, Entry>,
    /// Entries waiting to be queued, in order.
    to_add: VecDeque<Key>,
    /// Entries expiring at or after `last_updated`.
    active: Queue,
    /// Entries whose expiry wrapped past zero.
    inactive: Queue,
    /// Time of the last update.
    last_updated: u32,
    /// Smallest non-zero sleep hint.
    min_sleep_ms: u32,
}

impl fmt::Debug for Updater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Updater")
            .field("entries", &self.entries.len())
            .field("pending", &self.to_add.len())
            .field("active", &self.active.len())
            .field("inactive", &self.inactive.len())
            .field("last_updated", &self.last_updated)
            .finish()
    }
}

/// Key for a target.
fn key_of<T: ?Sized>(target: &Rc<RefCell<T>>) -> Key {
    Rc::as_ptr(target).cast::<()>() as usize
}

impl Updater {
    /// An empty scheduler reading time from `clock`.
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self::with_min_sleep(clock, 5)
    }

    /// An empty scheduler with a custom minimum sleep hint.
    pub fn with_min_sleep(clock: Rc<dyn Clock>, min_sleep_ms: u32) -> Self {
        let last_updated = clock.now_ms();
        Self {
            clock,
            entries: HashMap::new(),
            to_add: VecDeque::new(),
            active: Queue::default(),
            inactive: Queue::default(),
            last_updated,
            min_sleep_ms,
        }
    }

    /// Current time of the clock.
    pub fn now(&self) -> u32 {
        self.clock.now_ms()
    }

    /// Is the entry under `key` still tracking the given allocation?
    fn live_entry(&self, key: Key) -> bool {
        self.entries
            .get(&key)
            .is_some_and(|e| e.target.strong_count() > 0)
    }

    /// Is the target currently scheduled?
    pub fn is_updating<T: Updatable + 'static>(&self, target: &Target<T>) -> bool {
        self.live_entry(key_of(target))
    }

    /// Number of scheduled targets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is nothing scheduled?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Start calling `target` every `period_ms`.
    pub fn start<T: Updatable + 'static>(&mut self, target: &Target<T>, period_ms: u32) -> Result<()> {
        let key = key_of(target);
        if self.live_entry(key) {
            return Err(Error::AlreadyUpdating);
        }
        // A dead entry at the same address belonged to a dropped target.
        self.stop_key(key);
        let dyn_target: Rc<RefCell<dyn Updatable>> = target.clone();
        self.entries.insert(
            key,
            Entry {
                target: Rc::downgrade(&dyn_target),
                started_at: self.clock.now_ms(),
                period: period_ms,
                state: State::Pending,
            },
        );
        self.to_add.push_back(key);
        Ok(())
    }

    /// Stop calling `target`. Does nothing if it is not scheduled.
    pub fn stop<T: Updatable + 'static>(&mut self, target: &Target<T>) {
        self.stop_key(key_of(target));
    }

    /// Remove an entry from wherever it is.
    fn stop_key(&mut self, key: Key) {
        let Some(entry) = self.entries.remove(&key) else {
            return;
        };
        match entry.state {
            State::Pending => self.to_add.retain(|k| *k != key),
            State::Active => self.active.remove(key),
            State::Inactive => self.inactive.remove(key),
            State::Firing => {}
        }
    }

    /// Move staged entries into the queues.
    fn add_pending(&mut self) {
        while let Some(key) = self.to_add.pop_front() {
            let Some(entry) = self.entries.get_mut(&key) else {
                continue;
            };
            let item = Item {
                ends_at: entry.ends_at(),
                key,
            };
            if item.ends_at < self.last_updated {
                entry.state = State::Inactive;
                self.inactive.insert(item);
            } else {
                entry.state = State::Active;
                self.active.insert(item);
            }
        }
    }

    /// Fire one dequeued entry and re-stage it if it is still scheduled.
    fn fire(&mut self, key: Key) {
        let Some(entry) = self.entries.get_mut(&key) else {
            return;
        };
        let Some(target) = entry.target.upgrade() else {
            warn!("updatable dropped while scheduled");
            self.entries.remove(&key);
            return;
        };
        entry.state = State::Firing;
        let dt = self.last_updated.wrapping_sub(entry.started_at);
        trace!(key, dt, "update");
        match target.try_borrow_mut() {
            Ok(mut t) => t.update(dt, &mut UpdateCx { updater: self, current: key }),
            Err(_) => warn!(key, "updatable is borrowed, skipping update"),
        }
        if let Some(entry) = self.entries.get_mut(&key)
            && entry.state == State::Firing
        {
            entry.started_at = self.last_updated;
            entry.state = State::Pending;
            self.to_add.push_back(key);
        }
    }

    /// Fire every due entry and return how long the caller may sleep before
    /// the next one is due, or `None` if nothing is scheduled.
    pub fn update(&mut self) -> Option<u32> {
        let now = self.clock.now_ms();
        self.add_pending();

        if now < self.last_updated {
            warn!(
                now,
                last = self.last_updated,
                expired = self.active.len(),
                "clock wrapped"
            );
            self.last_updated = now;
            while let Some(item) = self.active.pop_front() {
                self.fire(item.key);
            }
            mem::swap(&mut self.active, &mut self.inactive);
        } else {
            self.last_updated = now;
        }

        while let Some(item) = self.active.front() {
            if item.ends_at > now {
                break;
            }
            self.active.pop_front();
            self.fire(item.key);
        }

        self.add_pending();

        let closest = self.active.front().or_else(|| self.inactive.front())?.ends_at;
        let uncorrected = closest.wrapping_sub(now);
        let correction = self.clock.now_ms().wrapping_sub(now);
        if correction >= uncorrected {
            return Some(0);
        }
        let dt = uncorrected - correction;
        Some(if dt < self.min_sleep_ms { self.min_sleep_ms } else { dt })
    }
}

/// Scheduler access from inside an update callback.
pub struct UpdateCx<'a> {
    /// The scheduler.
    updater: &'a mut Updater,
    /// Key of the firing target.
    current: Key,
}

impl UpdateCx<'_> {
    /// Time of the update pass.
    pub fn now(&self) -> u32 {
        self.updater.last_updated
    }

    /// Do not reschedule the firing target.
    pub fn stop_self(&mut self) {
        self.updater.stop_key(self.current);
    }

    /// Schedule another target.
    pub fn start<T: Updatable + 'static>(&mut self, target: &Target<T>, period_ms: u32) -> Result<()> {
        self.updater.start(target, period_ms)
    }

    /// Unschedule another target.
    pub fn stop<T: Updatable + 'static>(&mut self, target: &Target<T>) {
        self.updater.stop(target);
    }
}
