use crate::azcli::{self, AzCli};
use crate::profile::{self, Context, Profile, Selector, Subscription};
use crate::settings::SettingsStore;
use crate::{prompt, ui};
use log::warn;
use owo_colors::OwoColorize;
use std::fs;
use std::path::{Path, PathBuf};

pub fn handle_use(
    subscription_id: Option<String>,
    subscription_name: Option<String>,
    tenant_id: Option<String>,
    file: Option<PathBuf>,
    interactive: bool,
) {
    let store = match SettingsStore::new() {
        Ok(store) => store,
        Err(err) => {
            eprintln!("Failed to open settings: {err}");
            return;
        }
    };

    let mut profile = match store.load() {
        Ok(profile) => profile,
        Err(err) => {
            eprintln!("Failed to load profile: {err}");
            return;
        }
    };

    let selector = if let Some(path) = file {
        // Explicit path: the exported tuple is trusted verbatim.
        match read_context(&path) {
            Ok(ctx) => Selector::Context(ctx),
            Err(err) => {
                eprintln!("Failed to read context file: {err}");
                return;
            }
        }
    } else {
        if !ensure_account(&mut profile) {
            return;
        }

        if interactive {
            match interactive_selector() {
                Some(selector) => selector,
                None => return,
            }
        } else {
            match Selector::from_parts(
                subscription_id.as_deref(),
                subscription_name.as_deref(),
                tenant_id.as_deref(),
            ) {
                Ok(selector) => selector,
                Err(err) => {
                    eprintln!("{err}");
                    return;
                }
            }
        }
    };

    let remote = !matches!(selector, Selector::Context(_));
    let bar = remote.then(|| ui::spinner("Resolving context..."));
    let result = profile::select_context(&mut profile, &AzCli, selector);
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    match result {
        Ok(ctx) => {
            if let Some(warning) = profile::state_warning(&ctx) {
                warn!("{warning}");
                eprintln!("{}", warning.yellow());
            }
            print_context(&ctx);

            if let Err(err) = store.save(&profile) {
                eprintln!("Context selected but not persisted: {err}");
            }
        }
        Err(err) => eprintln!("Failed to select context: {err}"),
    }
}

pub fn handle_current() {
    if let Some(profile) = load_profile() {
        match profile.active() {
            Some(ctx) => print_context(ctx),
            None => println!("No context selected."),
        }
    }
}

pub fn handle_clear() {
    let store = match SettingsStore::new() {
        Ok(store) => store,
        Err(err) => {
            eprintln!("Failed to open settings: {err}");
            return;
        }
    };

    let mut profile = match store.load() {
        Ok(profile) => profile,
        Err(err) => {
            eprintln!("Failed to load profile: {err}");
            return;
        }
    };

    match profile.clear_active() {
        Some(_) => match store.save(&profile) {
            Ok(_) => println!("Context cleared."),
            Err(err) => eprintln!("Failed to persist cleared profile: {err}"),
        },
        None => println!("No context selected."),
    }
}

pub fn handle_export(path: &Path) {
    let Some(profile) = load_profile() else {
        return;
    };

    let Some(ctx) = profile.active() else {
        eprintln!("No context selected; nothing to export.");
        return;
    };

    let payload = match serde_json::to_string_pretty(ctx) {
        Ok(payload) => payload,
        Err(err) => {
            eprintln!("Failed to serialize context: {err}");
            return;
        }
    };

    match fs::write(path, payload) {
        Ok(_) => println!("Context exported to '{}'.", path.display()),
        Err(err) => eprintln!("Failed to write '{}': {err}", path.display()),
    }
}

fn load_profile() -> Option<Profile> {
    let store = match SettingsStore::new() {
        Ok(store) => store,
        Err(err) => {
            eprintln!("Failed to open settings: {err}");
            return None;
        }
    };

    match store.load() {
        Ok(profile) => Some(profile),
        Err(err) => {
            eprintln!("Failed to load profile: {err}");
            None
        }
    }
}

fn read_context(path: &Path) -> Result<Context, Box<dyn std::error::Error>> {
    let payload = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&payload)?)
}

/// Populates an empty profile with the account the Azure CLI is signed in
/// as, so selector-based resolution has an account to query against.
fn ensure_account(profile: &mut Profile) -> bool {
    if profile.active().is_some() {
        return true;
    }

    let bar = ui::spinner("Discovering signed-in account...");
    let discovered = azcli::signed_in_account();
    bar.finish_and_clear();

    match discovered {
        Ok(account) => {
            profile.set_active(Context::bare(account));
            true
        }
        Err(err) => {
            eprintln!("Failed to discover the signed-in account: {err}");
            false
        }
    }
}

fn interactive_selector() -> Option<Selector> {
    let bar = ui::spinner("Listing subscriptions...");
    let listed = azcli::list_subscriptions();
    bar.finish_and_clear();

    let subscriptions: Vec<Subscription> = match listed {
        Ok(subs) => subs.into_iter().map(Into::into).collect(),
        Err(err) => {
            eprintln!("Failed to list subscriptions: {err}");
            return None;
        }
    };

    if subscriptions.is_empty() {
        eprintln!("No subscriptions visible to this account.");
        return None;
    }

    match prompt::pick_subscription(subscriptions) {
        Ok(sub) => Selector::from_parts(Some(sub.id.as_str()), None, None).ok(),
        Err(err) => {
            eprintln!("Selection cancelled: {err}");
            None
        }
    }
}

fn print_context(ctx: &Context) {
    println!("Account:      {}", ctx.account.id);
    match &ctx.subscription {
        Some(sub) => println!("Subscription: {} ({}) [{}]", sub.name, sub.id, sub.state),
        None => println!("Subscription: <none>"),
    }
    match &ctx.tenant {
        Some(tenant) => println!("Tenant:       {}", tenant.id),
        None => println!("Tenant:       <none>"),
    }
    println!("Environment:  {}", ctx.environment.name);
}
