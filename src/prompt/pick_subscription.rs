use crate::profile::Subscription;
use inquire::{InquireError, Select};
use std::fmt;

struct SubscriptionChoice(Subscription);

impl fmt::Display for SubscriptionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0.name, self.0.id)
    }
}

pub fn pick_subscription(
    subscriptions: Vec<Subscription>,
) -> Result<Subscription, InquireError> {
    let choices: Vec<SubscriptionChoice> =
        subscriptions.into_iter().map(SubscriptionChoice).collect();

    Select::new("Subscription", choices)
        .prompt()
        .map(|choice| choice.0)
}
