use crate::azcli;
use crate::settings::SettingsStore;
use crate::ui;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct SubscriptionRow {
    #[tabled(rename = "")]
    current: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "STATE")]
    state: String,
    #[tabled(rename = "TENANT")]
    tenant: String,
}

#[derive(Tabled)]
struct TenantRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
}

pub fn handle_subscriptions() {
    let bar = ui::spinner("Listing subscriptions...");
    let listed = azcli::list_subscriptions();
    bar.finish_and_clear();

    let subscriptions = match listed {
        Ok(subs) => subs,
        Err(err) => {
            eprintln!("Failed to list subscriptions: {err}");
            return;
        }
    };

    if subscriptions.is_empty() {
        println!("No subscriptions visible to this account.");
        return;
    }

    let active_id = SettingsStore::new()
        .ok()
        .and_then(|store| store.load().ok())
        .and_then(|profile| {
            profile
                .active()
                .and_then(|ctx| ctx.subscription.as_ref())
                .map(|sub| sub.id.clone())
        });

    let rows: Vec<SubscriptionRow> = subscriptions
        .into_iter()
        .map(|sub| SubscriptionRow {
            current: if active_id.as_deref() == Some(sub.id.as_str()) {
                "*".into()
            } else {
                String::new()
            },
            name: sub.name,
            id: sub.id,
            state: sub.state,
            tenant: sub.tenant_id,
        })
        .collect();

    println!("{}", Table::new(rows));
}

pub fn handle_tenants() {
    let bar = ui::spinner("Listing tenants...");
    let listed = azcli::list_tenants();
    bar.finish_and_clear();

    let tenants = match listed {
        Ok(tenants) => tenants,
        Err(err) => {
            eprintln!("Failed to list tenants: {err}");
            return;
        }
    };

    if tenants.is_empty() {
        println!("No tenants visible to this account.");
        return;
    }

    let rows: Vec<TenantRow> = tenants
        .into_iter()
        .map(|tenant| TenantRow {
            id: tenant.tenant_id,
            name: tenant.display_name.unwrap_or_default(),
        })
        .collect();

    println!("{}", Table::new(rows));
}
