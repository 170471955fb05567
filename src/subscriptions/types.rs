//! Subscriber types.

use std::fmt;
use std::sync::Arc;

/// Category fired when the active profile's roster is swapped in.
pub const PROFILE_CATEGORY: &str = "profile";

/// A zero-argument change callback.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Which notifications a subscriber receives.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum SubscriberFilter {
    /// Every uncategorised change.
    #[default]
    All,
    /// Only changes tagged with this category.
    Category(String),
}

impl SubscriberFilter {
    /// Whether a subscriber with this filter fires for `notification`.
    ///
    /// The two paths are exclusive: unfiltered subscribers never see
    /// categorised notifications, and filtered ones never see plain changes.
    pub fn accepts(&self, notification: &Notification<'_>) -> bool {
        match (self, notification) {
            (SubscriberFilter::All, Notification::Change) => true,
            (SubscriberFilter::Category(watched), Notification::Category(category)) => {
                watched == category
            }
            _ => false,
        }
    }
}

/// A notification dispatched to subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notification<'a> {
    /// A plain data change.
    Change,
    /// A change in a named category.
    Category(&'a str),
}

/// A named listener registration.
#[derive(Clone)]
pub struct Subscriber {
    /// Identity used by `unsubscribe`.
    pub name: String,
    pub listener: Listener,
    pub filter: SubscriberFilter,
}

impl Subscriber {
    /// A subscriber notified on every plain data change.
    pub fn new<F>(name: impl Into<String>, listener: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            listener: Arc::new(listener),
            filter: SubscriberFilter::All,
        }
    }

    /// A subscriber notified only for `category`.
    pub fn watching<F>(name: impl Into<String>, category: impl Into<String>, listener: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            listener: Arc::new(listener),
            filter: SubscriberFilter::Category(category.into()),
        }
    }
}

impl fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("name", &self.name)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}
