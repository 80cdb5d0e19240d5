mod pick_subscription;

pub use pick_subscription::*;
