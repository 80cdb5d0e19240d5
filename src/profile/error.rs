use thiserror::Error;

pub type SelectResult<T> = Result<T, SelectError>;

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("No subscription id, subscription name, or tenant id was provided")]
    InvalidSelection,
    #[error("Subscription '{0}' was not found for the signed-in account")]
    SubscriptionNotFound(String),
    #[error("Tenant '{0}' is not among the account's known tenants")]
    TenantNotFound(String),
    #[error("Subscription '{subscription}' belongs to tenant '{actual}', not '{requested}'")]
    TenantMismatch {
        subscription: String,
        requested: String,
        actual: String,
    },
    #[error("No account is signed in; sign in before selecting a context")]
    NoActiveAccount,
    #[error("Account metadata lookup failed: {0}")]
    Metadata(#[from] Box<dyn std::error::Error + Send + Sync>),
}
