//! Read-side view of a principal's board: collections with their tasks,
//! completion progress, and how close each task is to expiring.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::{collection, task};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionWithTasks {
    #[serde(flatten)]
    pub collection: collection::Model,
    pub tasks: Vec<task::Model>,
}

impl CollectionWithTasks {
    pub fn progress(&self) -> Progress {
        Progress {
            done: self.tasks.iter().filter(|t| t.done).count(),
            total: self.tasks.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    /// Share of done tasks in `0.0..=100.0`. An empty collection is at 0.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.done as f64 * 100.0 / self.total as f64
        }
    }
}

/// How soon a task expires, bucketed by whole hours left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Expired,
    /// At most three days left.
    Urgent,
    /// At most a week left.
    Soon,
    Later,
}

const URGENT_HOURS: i64 = 3 * 24;
const SOON_HOURS: i64 = 7 * 24;

impl Urgency {
    pub fn at(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let remaining = expires_at - now;
        // floor, not truncation, so a task a few minutes past due is expired
        let hours = remaining.num_seconds().div_euclid(3600);
        if hours < 0 {
            Urgency::Expired
        } else if hours <= URGENT_HOURS {
            Urgency::Urgent
        } else if hours <= SOON_HOURS {
            Urgency::Soon
        } else {
            Urgency::Later
        }
    }
}

impl task::Model {
    /// `None` for tasks without an expiration date.
    pub fn urgency(&self, now: DateTime<Utc>) -> Option<Urgency> {
        self.expires_at.map(|at| Urgency::at(at, now))
    }
}
