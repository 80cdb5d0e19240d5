use super::error::ResultAzCli;
use super::run::az;
use crate::profile::{Account, AccountService, MetadataError, Subscription, Tenant};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AzSubscription {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub state: String,
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AzUser {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AzTenant {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AzCurrentAccount {
    #[serde(rename = "tenantId")]
    tenant_id: String,
    user: AzUser,
}

impl From<AzSubscription> for Subscription {
    fn from(sub: AzSubscription) -> Self {
        Subscription {
            id: sub.id,
            name: sub.name,
            state: sub.state,
            tenant_id: sub.tenant_id,
        }
    }
}

pub fn list_subscriptions() -> ResultAzCli<Vec<AzSubscription>> {
    az(&["account", "list", "-o", "json"])
}

pub fn list_tenants() -> ResultAzCli<Vec<AzTenant>> {
    az(&["account", "tenant", "list", "-o", "json"])
}

/// Builds an [`Account`] from the CLI's signed-in session, collecting the
/// subscription and tenant ids it can see.
pub fn signed_in_account() -> ResultAzCli<Account> {
    let current: AzCurrentAccount = az(&["account", "show", "-o", "json"])?;

    let mut account = Account::new(current.user.name);
    account.tenants.insert(current.tenant_id);

    for sub in list_subscriptions()? {
        account.subscriptions.insert(sub.id);
        account.tenants.insert(sub.tenant_id);
    }

    Ok(account)
}

/// Account metadata lookups backed by the Azure CLI.
pub struct AzCli;

impl AccountService for AzCli {
    fn list_subscriptions(&self, _account: &Account) -> Result<Vec<Subscription>, MetadataError> {
        let subscriptions = list_subscriptions().map_err(MetadataError::from)?;
        Ok(subscriptions.into_iter().map(Into::into).collect())
    }

    fn list_tenants(&self, _account: &Account) -> Result<Vec<Tenant>, MetadataError> {
        let tenants = list_tenants().map_err(MetadataError::from)?;
        Ok(tenants
            .into_iter()
            .map(|tenant| Tenant::new(tenant.tenant_id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_az_account_list_output() {
        let payload = r#"[
            {
                "id": "abc-123",
                "name": "Prod",
                "state": "Enabled",
                "tenantId": "t1",
                "user": { "name": "user@example.com", "type": "user" },
                "isDefault": true
            }
        ]"#;

        let subs: Vec<AzSubscription> = serde_json::from_str(payload).unwrap();
        let sub: Subscription = subs.into_iter().next().unwrap().into();

        assert_eq!(sub.id, "abc-123");
        assert_eq!(sub.name, "Prod");
        assert_eq!(sub.state, "Enabled");
        assert_eq!(sub.tenant_id, "t1");
    }

    #[test]
    fn decodes_az_tenant_list_output() {
        let payload = r#"[{ "tenantId": "t1", "displayName": "Contoso" }]"#;

        let tenants: Vec<AzTenant> = serde_json::from_str(payload).unwrap();
        assert_eq!(tenants[0].tenant_id, "t1");
    }

    #[test]
    fn missing_state_defaults_to_empty() {
        let payload = r#"[{ "id": "abc-123", "name": "Prod", "tenantId": "t1" }]"#;

        let subs: Vec<AzSubscription> = serde_json::from_str(payload).unwrap();
        assert!(subs[0].state.is_empty());
    }
}
