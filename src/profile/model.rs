use super::error::{SelectError, SelectResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identity the user signed in with, plus the subscriptions and tenants
/// known to belong to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub subscriptions: BTreeSet<String>,
    #[serde(default)]
    pub tenants: BTreeSet<String>,
}

impl Account {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            subscriptions: BTreeSet::new(),
            tenants: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub name: String,
    /// "Enabled", "Disabled", "Warned", and so on. Informational only.
    pub state: String,
    pub tenant_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
}

impl Tenant {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Named set of service endpoints a context targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub name: String,
    pub management_endpoint: String,
    pub authentication_endpoint: String,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            name: "AzureCloud".into(),
            management_endpoint: "https://management.azure.com/".into(),
            authentication_endpoint: "https://login.microsoftonline.com/".into(),
        }
    }
}

/// The active combination used for all subsequent operations. Replaced
/// wholesale on every selection, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub account: Account,
    pub subscription: Option<Subscription>,
    pub environment: Environment,
    pub tenant: Option<Tenant>,
}

impl Context {
    /// A context with nothing selected yet, as produced right after sign-in.
    pub fn bare(account: Account) -> Self {
        Self {
            account,
            subscription: None,
            environment: Environment::default(),
            tenant: None,
        }
    }
}

/// One of the mutually exclusive selection modes, validated before it
/// reaches the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Caller-supplied tuple, activated verbatim without lookup.
    Context(Context),
    Subscription {
        id: Option<String>,
        name: Option<String>,
        tenant_id: Option<String>,
    },
    Tenant {
        tenant_id: String,
    },
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

impl Selector {
    /// Builds a selector from raw flag values. Blank and whitespace-only
    /// strings count as absent; all three absent is an invalid selection.
    pub fn from_parts(
        subscription_id: Option<&str>,
        subscription_name: Option<&str>,
        tenant_id: Option<&str>,
    ) -> SelectResult<Self> {
        let id = non_blank(subscription_id);
        let name = non_blank(subscription_name);
        let tenant = non_blank(tenant_id);

        match (id, name, tenant) {
            (None, None, None) => Err(SelectError::InvalidSelection),
            (None, None, Some(tenant_id)) => Ok(Selector::Tenant { tenant_id }),
            (id, name, tenant_id) => Ok(Selector::Subscription { id, name, tenant_id }),
        }
    }

    /// Normalized cache key. The explicit-context path has none.
    pub fn key(&self) -> Option<SelectorKey> {
        match self {
            Selector::Context(_) => None,
            Selector::Subscription { id, name, tenant_id } => Some(SelectorKey {
                subscription_id: id.clone(),
                subscription_name: name.as_deref().map(str::to_lowercase),
                tenant_id: tenant_id.as_deref().map(str::to_lowercase),
            }),
            Selector::Tenant { tenant_id } => Some(SelectorKey {
                subscription_id: None,
                subscription_name: None,
                tenant_id: Some(tenant_id.to_lowercase()),
            }),
        }
    }
}

/// Cache key for a resolved selection. Name and tenant components are
/// lowercased so that two selectors matching the same way share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectorKey {
    pub(super) subscription_id: Option<String>,
    pub(super) subscription_name: Option<String>,
    pub(super) tenant_id: Option<String>,
}
