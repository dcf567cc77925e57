// SPDX-License-Identifier: MIT

//! Application event fan-out.
//!
//! The core services stay pure functions of their inputs; this callback
//! bus is the seam where the UI layer subscribes for display refreshes,
//! streak animations, and advisory banners.

use std::sync::Mutex;

use chrono::NaiveDate;

use crate::services::reconciler::IntegrityWarning;

/// Events the app shell publishes as tracker state changes.
#[derive(Debug, Clone)]
pub enum TrackerEvent {
    /// The ratchet moved: refresh displays, fire haptics.
    StepsIncreased {
        date: NaiveDate,
        steps: u32,
        distance_meters: f64,
    },
    /// A reading was discarded; surface an advisory banner.
    IntegrityWarning(IntegrityWarning),
    DayClosed {
        date: NaiveDate,
        goal_met: bool,
    },
    ShieldsDeployed {
        count: u32,
        manual: bool,
    },
    StreakBroken {
        previous_streak: u32,
    },
    ShieldsPurchased {
        requested: u32,
        granted: u32,
    },
}

type Subscriber = Box<dyn Fn(&TrackerEvent) + Send + Sync>;

/// Callback-list publish/subscribe bus.
#[derive(Default)]
pub struct EventBus {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, subscriber: F)
    where
        F: Fn(&TrackerEvent) + Send + Sync + 'static,
    {
        let mut subscribers = match self.subscribers.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        subscribers.push(Box::new(subscriber));
    }

    pub fn publish(&self, event: &TrackerEvent) {
        let subscribers = match self.subscribers.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        for subscriber in subscribers.iter() {
            subscriber(event);
        }
    }
}
