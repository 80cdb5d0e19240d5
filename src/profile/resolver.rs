use super::error::{SelectError, SelectResult};
use super::model::{Account, Context, Selector, Subscription, Tenant};
use super::store::Profile;
use log::debug;

pub type MetadataError = Box<dyn std::error::Error + Send + Sync>;

/// Remote account metadata lookups. Implemented by the `az` subprocess
/// client in production and by an in-memory fake in tests.
pub trait AccountService {
    fn list_subscriptions(&self, account: &Account) -> Result<Vec<Subscription>, MetadataError>;
    fn list_tenants(&self, account: &Account) -> Result<Vec<Tenant>, MetadataError>;
}

/// Resolves the selector to one context and makes it active.
///
/// Selector-based paths consult the cache first and fall back to the
/// account service. The explicit-context path trusts the caller-supplied
/// tuple and activates it without any validation; it exists to restore a
/// previously exported context.
pub fn select_context(
    profile: &mut Profile,
    service: &dyn AccountService,
    selector: Selector,
) -> SelectResult<Context> {
    let key = selector.key();

    if let Some(key) = &key
        && let Some(ctx) = profile.cache_lookup(key)
    {
        debug!("selector served from cache");
        profile.set_active(ctx.clone());
        return Ok(ctx);
    }

    let resolved = match selector {
        Selector::Context(ctx) => ctx,
        Selector::Subscription { id, name, tenant_id } => {
            resolve_subscription(profile, service, id, name, tenant_id)?
        }
        Selector::Tenant { tenant_id } => resolve_tenant(profile, service, tenant_id)?,
    };

    profile.set_active(resolved.clone());
    if let Some(key) = key {
        profile.cache_store(key, resolved.clone());
    }

    Ok(resolved)
}

/// Advisory check after activation: a subscription in any state other than
/// "Enabled" yields a warning naming the actual state. Never an error.
pub fn state_warning(ctx: &Context) -> Option<String> {
    let sub = ctx.subscription.as_ref()?;
    if sub.state.is_empty() || sub.state.eq_ignore_ascii_case("Enabled") {
        return None;
    }
    Some(format!(
        "Subscription '{}' is in state '{}' and may reject management operations",
        sub.name, sub.state
    ))
}

fn resolve_subscription(
    profile: &Profile,
    service: &dyn AccountService,
    id: Option<String>,
    name: Option<String>,
    tenant_id: Option<String>,
) -> SelectResult<Context> {
    let current = profile.active().ok_or(SelectError::NoActiveAccount)?;
    let mut account = current.account.clone();
    let environment = current.environment.clone();

    let subscriptions = service.list_subscriptions(&account)?;
    debug!(
        "resolving subscription among {} listed for '{}'",
        subscriptions.len(),
        account.id
    );

    // Exact id match wins over a case-insensitive name match.
    let found = id
        .as_deref()
        .and_then(|id| subscriptions.iter().find(|s| s.id == id))
        .or_else(|| {
            name.as_deref()
                .and_then(|name| subscriptions.iter().find(|s| s.name.eq_ignore_ascii_case(name)))
        });

    let Some(sub) = found.cloned() else {
        let wanted = id.or(name).unwrap_or_default();
        return Err(SelectError::SubscriptionNotFound(wanted));
    };

    if let Some(requested) = tenant_id
        && !sub.tenant_id.eq_ignore_ascii_case(&requested)
    {
        return Err(SelectError::TenantMismatch {
            subscription: sub.id,
            requested,
            actual: sub.tenant_id,
        });
    }

    account.subscriptions.insert(sub.id.clone());
    account.tenants.insert(sub.tenant_id.clone());
    let tenant = Tenant::new(sub.tenant_id.clone());

    Ok(Context {
        account,
        subscription: Some(sub),
        environment,
        tenant: Some(tenant),
    })
}

fn resolve_tenant(
    profile: &Profile,
    service: &dyn AccountService,
    tenant_id: String,
) -> SelectResult<Context> {
    let current = profile.active().ok_or(SelectError::NoActiveAccount)?;
    let mut ctx = current.clone();

    let known = ctx
        .account
        .tenants
        .iter()
        .any(|t| t.eq_ignore_ascii_case(&tenant_id));

    let resolved_id = if known {
        tenant_id
    } else {
        let tenants = service.list_tenants(&ctx.account)?;
        debug!("tenant not known locally, listed {} remote tenants", tenants.len());
        match tenants.into_iter().find(|t| t.id.eq_ignore_ascii_case(&tenant_id)) {
            Some(tenant) => tenant.id,
            None => return Err(SelectError::TenantNotFound(tenant_id)),
        }
    };

    // Subscription selection stays attached to the new tenant's context.
    ctx.account.tenants.insert(resolved_id.clone());
    ctx.tenant = Some(Tenant::new(resolved_id));
    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeAccountService {
        subscriptions: Vec<Subscription>,
        tenants: Vec<Tenant>,
        subscription_calls: Cell<usize>,
        tenant_calls: Cell<usize>,
    }

    impl FakeAccountService {
        fn new(subscriptions: Vec<Subscription>, tenants: Vec<Tenant>) -> Self {
            Self {
                subscriptions,
                tenants,
                subscription_calls: Cell::new(0),
                tenant_calls: Cell::new(0),
            }
        }
    }

    impl AccountService for FakeAccountService {
        fn list_subscriptions(&self, _: &Account) -> Result<Vec<Subscription>, MetadataError> {
            self.subscription_calls.set(self.subscription_calls.get() + 1);
            Ok(self.subscriptions.clone())
        }

        fn list_tenants(&self, _: &Account) -> Result<Vec<Tenant>, MetadataError> {
            self.tenant_calls.set(self.tenant_calls.get() + 1);
            Ok(self.tenants.clone())
        }
    }

    fn sub(id: &str, name: &str, state: &str, tenant: &str) -> Subscription {
        Subscription {
            id: id.into(),
            name: name.into(),
            state: state.into(),
            tenant_id: tenant.into(),
        }
    }

    fn signed_in_profile() -> Profile {
        Profile::with_active(Context::bare(Account::new("user@example.com")))
    }

    fn by_name(name: &str) -> Selector {
        Selector::from_parts(None, Some(name), None).unwrap()
    }

    #[test]
    fn resolves_by_exact_id_before_name() {
        let service = FakeAccountService::new(
            vec![
                sub("abc-123", "Prod", "Enabled", "t1"),
                sub("def-456", "abc-123", "Enabled", "t1"),
            ],
            vec![],
        );
        let mut profile = signed_in_profile();

        let selector = Selector::from_parts(Some("abc-123"), None, None).unwrap();
        let ctx = select_context(&mut profile, &service, selector).unwrap();

        assert_eq!(ctx.subscription.as_ref().unwrap().name, "Prod");
    }

    #[test]
    fn resolves_by_name_case_insensitively() {
        let service =
            FakeAccountService::new(vec![sub("abc-123", "Prod", "Enabled", "t1")], vec![]);
        let mut profile = signed_in_profile();

        let ctx = select_context(&mut profile, &service, by_name("pRoD")).unwrap();

        assert_eq!(ctx.subscription.as_ref().unwrap().id, "abc-123");
        assert_eq!(ctx.tenant.as_ref().unwrap().id, "t1");
        assert!(profile.active().unwrap().account.subscriptions.contains("abc-123"));
    }

    #[test]
    fn unknown_subscription_fails_with_not_found() {
        let service =
            FakeAccountService::new(vec![sub("abc-123", "Prod", "Enabled", "t1")], vec![]);
        let mut profile = signed_in_profile();

        let err = select_context(&mut profile, &service, by_name("Staging")).unwrap_err();

        assert!(matches!(err, SelectError::SubscriptionNotFound(name) if name == "Staging"));
    }

    #[test]
    fn second_identical_selection_is_served_from_cache() {
        let service =
            FakeAccountService::new(vec![sub("abc-123", "Prod", "Enabled", "t1")], vec![]);
        let mut profile = signed_in_profile();

        let first = select_context(&mut profile, &service, by_name("Prod")).unwrap();
        let second = select_context(&mut profile, &service, by_name("Prod")).unwrap();

        assert_eq!(first, second);
        assert_eq!(service.subscription_calls.get(), 1);
    }

    #[test]
    fn disabled_subscription_activates_with_a_warning() {
        let service =
            FakeAccountService::new(vec![sub("abc-123", "Prod", "Disabled", "t1")], vec![]);
        let mut profile = signed_in_profile();

        let ctx = select_context(&mut profile, &service, by_name("Prod")).unwrap();

        assert!(profile.active().is_some());
        let warning = state_warning(&ctx).unwrap();
        assert!(warning.contains("Disabled"));
    }

    #[test]
    fn enabled_subscription_produces_no_warning() {
        let ctx = Context {
            account: Account::new("user@example.com"),
            subscription: Some(sub("abc-123", "Prod", "enabled", "t1")),
            environment: Default::default(),
            tenant: Some(Tenant::new("t1")),
        };
        assert!(state_warning(&ctx).is_none());
    }

    #[test]
    fn wrong_tenant_for_a_matching_subscription_is_a_mismatch() {
        let service =
            FakeAccountService::new(vec![sub("abc-123", "Prod", "Enabled", "t1")], vec![]);
        let mut profile = signed_in_profile();

        let selector = Selector::from_parts(Some("abc-123"), None, Some("wrong-tenant")).unwrap();
        let err = select_context(&mut profile, &service, selector).unwrap_err();

        assert!(matches!(
            err,
            SelectError::TenantMismatch { ref requested, ref actual, .. }
                if requested == "wrong-tenant" && actual == "t1"
        ));
    }

    #[test]
    fn explicit_context_is_activated_without_validation() {
        // The service knows nothing about this subscription.
        let service = FakeAccountService::new(vec![], vec![]);
        let mut profile = Profile::new();

        let mut account = Account::new("user@example.com");
        account.subscriptions.insert("gone-999".into());
        let ctx = Context {
            account,
            subscription: Some(sub("gone-999", "Retired", "Deleted", "t9")),
            environment: Default::default(),
            tenant: Some(Tenant::new("t9")),
        };

        let activated =
            select_context(&mut profile, &service, Selector::Context(ctx.clone())).unwrap();

        assert_eq!(activated, ctx);
        assert_eq!(profile.active().unwrap(), &ctx);
        assert_eq!(service.subscription_calls.get(), 0);
        assert_eq!(service.tenant_calls.get(), 0);
    }

    #[test]
    fn tenant_switch_keeps_the_subscription_selection() {
        let service = FakeAccountService::new(vec![], vec![Tenant::new("t2")]);
        let mut profile = signed_in_profile();

        let mut ctx = profile.active().unwrap().clone();
        ctx.subscription = Some(sub("abc-123", "Prod", "Enabled", "t1"));
        ctx.tenant = Some(Tenant::new("t1"));
        profile.set_active(ctx);

        let selector = Selector::from_parts(None, None, Some("t2")).unwrap();
        let switched = select_context(&mut profile, &service, selector).unwrap();

        assert_eq!(switched.tenant.as_ref().unwrap().id, "t2");
        assert_eq!(switched.subscription.as_ref().unwrap().id, "abc-123");
    }

    #[test]
    fn locally_known_tenant_skips_the_remote_listing() {
        let service = FakeAccountService::new(vec![], vec![]);
        let mut profile = signed_in_profile();

        let mut ctx = profile.active().unwrap().clone();
        ctx.account.tenants.insert("t2".into());
        profile.set_active(ctx);

        let selector = Selector::from_parts(None, None, Some("t2")).unwrap();
        select_context(&mut profile, &service, selector).unwrap();

        assert_eq!(service.tenant_calls.get(), 0);
    }

    #[test]
    fn unknown_tenant_fails_with_not_found() {
        let service = FakeAccountService::new(vec![], vec![Tenant::new("t2")]);
        let mut profile = signed_in_profile();

        let selector = Selector::from_parts(None, None, Some("t1")).unwrap();
        let err = select_context(&mut profile, &service, selector).unwrap_err();

        assert!(matches!(err, SelectError::TenantNotFound(id) if id == "t1"));
    }

    #[test]
    fn selection_without_a_signed_in_account_fails() {
        let service = FakeAccountService::new(vec![], vec![]);
        let mut profile = Profile::new();

        let err = select_context(&mut profile, &service, by_name("Prod")).unwrap_err();

        assert!(matches!(err, SelectError::NoActiveAccount));
    }
}
