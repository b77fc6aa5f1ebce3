//! Inactivity watchdog: automatic sign-out after a quiet period.
//!
//! DESIGN
//! ======
//! The countdown logic lives in [`IdleMonitor`], a plain state machine the
//! tests can drive with fake clocks. The browser glue attaches interaction
//! listeners to the window, polls the monitor from a timer task, and calls
//! the session core's logout when the countdown expires. The monitor is
//! armed only while a user is present and everything detaches on cleanup so
//! no timer outlives the view that installed it.

#[cfg(test)]
#[path = "idle_test.rs"]
mod idle_test;

#[cfg(feature = "hydrate")]
use std::cell::RefCell;
#[cfg(feature = "hydrate")]
use std::rc::Rc;

#[cfg(feature = "hydrate")]
use leptos::prelude::*;

use crate::session::AccountSession;

/// Sign out after ten minutes without interaction.
pub const IDLE_TIMEOUT_MS: u64 = 10 * 60 * 1000;

/// How often the watchdog task checks the countdown.
pub const POLL_INTERVAL_MS: u64 = 1_000;

/// Interaction signals that reset the countdown.
pub const INTERACTION_EVENTS: [&str; 5] = ["mousemove", "mousedown", "keydown", "touchstart", "scroll"];

/// Countdown state machine for the idle watchdog.
///
/// Disarmed (no deadline) whenever no user is present; fires at most once
/// per armed period.
#[derive(Clone, Debug)]
pub struct IdleMonitor {
    threshold_ms: u64,
    deadline: Option<u64>,
    fired: bool,
}

impl IdleMonitor {
    pub fn new(threshold_ms: u64) -> Self {
        Self {
            threshold_ms,
            deadline: None,
            fired: false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Start (or restart) the countdown from `now_ms`.
    pub fn arm(&mut self, now_ms: u64) {
        self.deadline = Some(now_ms + self.threshold_ms);
        self.fired = false;
    }

    /// Stop the countdown; a disarmed monitor never fires.
    pub fn disarm(&mut self) {
        self.deadline = None;
        self.fired = false;
    }

    /// An interaction signal: push the deadline out by the full threshold.
    pub fn interaction(&mut self, now_ms: u64) {
        if self.deadline.is_some() && !self.fired {
            self.deadline = Some(now_ms + self.threshold_ms);
        }
    }

    /// Check the countdown. Returns `true` exactly once when the deadline
    /// passes while armed.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if !self.fired && now_ms >= deadline => {
                self.fired = true;
                true
            }
            _ => false,
        }
    }
}

#[cfg(feature = "hydrate")]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// Install the idle watchdog for the lifetime of the calling component.
///
/// Arms while the cached user is present, disarms otherwise; on expiry the
/// session core's logout runs once and consumers observe the `Absent` slot.
pub fn install_idle_watchdog(session: AccountSession) {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;

        let monitor = Rc::new(RefCell::new(IdleMonitor::new(IDLE_TIMEOUT_MS)));

        // Arm/disarm tracking the cached slot.
        let cache = session.cache().clone();
        let monitor_arm = monitor.clone();
        Effect::new(move || {
            let present = cache.read().is_present();
            let mut monitor = monitor_arm.borrow_mut();
            if present {
                if !monitor.is_armed() {
                    monitor.arm(now_ms());
                }
            } else {
                monitor.disarm();
            }
        });

        // Interaction listeners shared across all five event names.
        let monitor_reset = monitor.clone();
        let reset: Closure<dyn FnMut(web_sys::Event)> = Closure::new(move |_event| {
            monitor_reset.borrow_mut().interaction(now_ms());
        });
        if let Some(window) = web_sys::window() {
            for event in INTERACTION_EVENTS {
                let _ = window.add_event_listener_with_callback(event, reset.as_ref().unchecked_ref());
            }
        }

        let alive = Rc::new(std::cell::Cell::new(true));
        let alive_task = alive.clone();
        let monitor_poll = monitor.clone();
        let session_poll = session.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_millis(POLL_INTERVAL_MS)).await;
                if !alive_task.get() {
                    break;
                }
                if monitor_poll.borrow_mut().poll(now_ms()) {
                    log::info!("idle timeout reached, signing out");
                    if let Err(err) = session_poll.logout().await {
                        log::warn!("idle logout failed: {err}");
                    }
                }
            }
        });

        on_cleanup(move || {
            alive.set(false);
            if let Some(window) = web_sys::window() {
                for event in INTERACTION_EVENTS {
                    let _ = window.remove_event_listener_with_callback(event, reset.as_ref().unchecked_ref());
                }
            }
            monitor.borrow_mut().disarm();
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = session;
    }
}
