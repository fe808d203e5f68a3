//! Tenant isolation against a populated store, driven through a
//! bootstrapped coordinator.

mod helpers;

use helpers::*;
use opsdeck_core::models::UserRole;
use opsdeck_services::{scope, scope_companies};
use opsdeck_storage::Snapshot;

#[tokio::test]
async fn admin_sees_exactly_their_companys_clients_in_order() {
    let comp_1 = company("Comp One", None);
    let comp_2 = company("Comp Two", None);
    let actor = admin_of(&comp_1);
    let snapshot = Snapshot {
        companies: vec![comp_1.clone(), comp_2.clone()],
        users: vec![actor.clone()],
        clients: vec![
            client_of(comp_1.id, "c1-first"),
            client_of(comp_2.id, "foreign-a"),
            client_of(comp_1.id, "c1-second"),
            client_of(comp_2.id, "foreign-b"),
            client_of(comp_2.id, "foreign-c"),
        ],
        ..Snapshot::default()
    };
    let (_storage, coordinator) = coordinator_with(snapshot).await;
    let ctx = ctx(&actor);

    let store = coordinator.store();
    let guard = store.read().await;
    let visible = scope(&guard.clients, &ctx);
    assert_eq!(visible.len(), 2);
    assert_eq!(visible[0].name, "c1-first");
    assert_eq!(visible[1].name, "c1-second");
}

#[tokio::test]
async fn isolation_holds_no_matter_how_many_tenants_exist() {
    let home = company("Home", None);
    let actor = user(UserRole::Member, Some(home.id), "member@example.com");
    let mut snapshot = Snapshot {
        companies: vec![home.clone()],
        users: vec![actor.clone()],
        ..Snapshot::default()
    };
    snapshot.leads.push(lead_of(home.id, "ours"));
    for i in 0..25 {
        let other = company(&format!("Other {i}"), None);
        snapshot.leads.push(lead_of(other.id, "theirs"));
        snapshot.companies.push(other);
    }
    let (_storage, coordinator) = coordinator_with(snapshot).await;
    let ctx = ctx(&actor);

    let store = coordinator.store();
    let guard = store.read().await;
    let visible = scope(&guard.leads, &ctx);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "ours");
}

#[tokio::test]
async fn superadmin_impersonating_sees_only_that_company_record() {
    let comp_1 = company("Comp One", None);
    let comp_2 = company("Comp Two", None);
    let snapshot = Snapshot {
        companies: vec![comp_1.clone(), comp_2.clone()],
        ..Snapshot::default()
    };
    let (_storage, coordinator) = coordinator_with(snapshot).await;
    let mut ctx = ctx(&super_admin());

    let store = coordinator.store();
    {
        let guard = store.read().await;
        assert_eq!(scope_companies(&guard.companies, &ctx).len(), 2);
    }

    ctx.impersonate(comp_2.id);
    let guard = store.read().await;
    let visible = scope_companies(&guard.companies, &ctx);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, comp_2.id);
}

#[tokio::test]
async fn stopping_impersonation_restores_the_actors_own_scope() {
    let own = company("Own", None);
    let other = company("Other", None);
    let actor = user(UserRole::SuperAdmin, Some(own.id), "root@example.com");
    let snapshot = Snapshot {
        companies: vec![own.clone(), other.clone()],
        clients: vec![client_of(own.id, "mine"), client_of(other.id, "theirs")],
        users: vec![actor.clone()],
        ..Snapshot::default()
    };
    let (_storage, coordinator) = coordinator_with(snapshot).await;
    let mut ctx = ctx(&actor);

    ctx.impersonate(other.id);
    let store = coordinator.store();
    {
        let guard = store.read().await;
        let visible = scope(&guard.clients, &ctx);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "theirs");
    }

    ctx.stop_impersonating();
    let guard = store.read().await;
    // Back to global visibility: a superadmin not impersonating sees all.
    assert_eq!(scope(&guard.clients, &ctx).len(), 2);
    assert_eq!(ctx.resolve().active_company_id, Some(own.id));
}
