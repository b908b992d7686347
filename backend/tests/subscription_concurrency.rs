//! Concurrent purchases must never leave a user with two active
//! subscriptions.

use std::sync::Arc;

use chrono::{Duration, Utc};
use futures::future::join_all;
use place_directory::domain::ports::{RequestContext, UserRepository};
use place_directory::domain::{ErrorKind, Role};
use place_directory::outbound::MemoryStore;
use place_directory::startup::build_directory;
use place_directory::test_support::clock::MutableClock;
use place_directory::test_support::fixtures::{package, user_with_role};
use rstest::rstest;

#[rstest]
#[case(2)]
#[case(8)]
#[case(32)]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn exactly_one_concurrent_purchase_succeeds(#[case] attempts: usize) {
    let monthly = package("Monthly", 30);
    let package_id = monthly.id();
    let store = Arc::new(MemoryStore::with_packages(vec![monthly]));
    let clock = Arc::new(MutableClock::new(Utc::now()));
    let api = build_directory(Arc::clone(&store), clock, Duration::days(30));
    let alice = user_with_role("alice", Role::User);
    store.upsert(&alice).await.expect("store user");
    let context = RequestContext::for_user(alice.id().clone());

    let purchases = (0..attempts).map(|_| {
        let api = api.clone();
        let context = context.clone();
        tokio::spawn(async move { api.subscribe(&context, package_id, None).await })
    });
    let outcomes: Vec<_> = join_all(purchases)
        .await
        .into_iter()
        .map(|joined| joined.expect("purchase task joins"))
        .collect();

    let successes = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    assert_eq!(successes, 1);
    assert!(
        outcomes
            .iter()
            .filter(|outcome| !outcome.is_ok())
            .all(|outcome| outcome.error_kind() == Some(ErrorKind::Conflict))
    );

    let history = api
        .my_subscriptions(&context)
        .await
        .into_result()
        .expect("history");
    assert_eq!(history.len(), 1);
}
