//! Change notifications for roster state.
//!
//! Subscribers are named callbacks registered with the player list store.
//! Each one either watches every plain data change, or a single named
//! category of change:
//! - Plain changes (`set`, `set_player_list`, `reset_state`) fire only the
//!   unfiltered subscribers.
//! - Categorised changes (a profile switch fires `"profile"`) fire only the
//!   subscribers filtered to that exact category.
//!
//! # Example
//!
//! ```ignore
//! let registry = SubscriberRegistry::new();
//!
//! registry.subscribe(Subscriber::new("copy", || println!("roster changed")));
//! registry.subscribe(Subscriber::watching("redraw", PROFILE_CATEGORY, || {
//!     println!("profile switched")
//! }));
//!
//! registry.notify(&Notification::Change); // prints "roster changed"
//! registry.notify(&Notification::Category(PROFILE_CATEGORY)); // prints "profile switched"
//! ```

mod manager;
mod types;

pub use manager::SubscriberRegistry;
pub use types::{Listener, Notification, Subscriber, SubscriberFilter, PROFILE_CATEGORY};
