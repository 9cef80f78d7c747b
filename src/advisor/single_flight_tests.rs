//! Tests for the in-flight registry

use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn counted_work(counter: Arc<AtomicUsize>, value: u32) -> impl FnOnce() -> BoxFuture<'static, u32> {
    move || {
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            value
        }
        .boxed()
    }
}

fn failing_work() -> u32 {
    panic!("work failed")
}

#[tokio::test(start_paused = true)]
async fn test_same_key_shares_one_future() {
    let registry = Arc::new(SingleFlight::new());
    let counter = Arc::new(AtomicUsize::new(0));

    let (first, first_role) = registry.join_or_start("k".to_string(), counted_work(Arc::clone(&counter), 7));
    let (second, second_role) = registry.join_or_start("k".to_string(), counted_work(Arc::clone(&counter), 9));

    assert_eq!(first_role, Role::Leader);
    assert_eq!(second_role, Role::Follower);
    assert_eq!(registry.in_flight(), 1);

    let (a, b) = tokio::join!(first, second);
    assert_eq!((a, b), (Ok(7), Ok(7)));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_distinct_keys_run_independently() {
    let registry = Arc::new(SingleFlight::new());
    let counter = Arc::new(AtomicUsize::new(0));

    let (first, _) = registry.join_or_start("a".to_string(), counted_work(Arc::clone(&counter), 1));
    let (second, _) = registry.join_or_start("b".to_string(), counted_work(Arc::clone(&counter), 2));
    assert_eq!(registry.in_flight(), 2);

    let (a, b) = tokio::join!(first, second);
    assert_eq!((a, b), (Ok(1), Ok(2)));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_entry_removed_after_completion() {
    let registry = Arc::new(SingleFlight::new());
    let counter = Arc::new(AtomicUsize::new(0));

    let (flight, _) = registry.join_or_start("k".to_string(), counted_work(Arc::clone(&counter), 1));
    assert_eq!(flight.await, Ok(1));
    assert_eq!(registry.in_flight(), 0);

    let (flight, role) = registry.join_or_start("k".to_string(), counted_work(Arc::clone(&counter), 2));
    assert_eq!(role, Role::Leader);
    assert_eq!(flight.await, Ok(2));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_follower_finishes_after_leader_dropped() {
    let registry = Arc::new(SingleFlight::new());
    let counter = Arc::new(AtomicUsize::new(0));

    let (leader, _) = registry.join_or_start("k".to_string(), counted_work(Arc::clone(&counter), 5));
    let (follower, _) = registry.join_or_start("k".to_string(), counted_work(Arc::clone(&counter), 6));
    drop(leader);

    assert_eq!(follower.await, Ok(5));
    assert_eq!(registry.in_flight(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_flight_still_completes_and_deregisters() {
    let registry = Arc::new(SingleFlight::new());
    let counter = Arc::new(AtomicUsize::new(0));

    let (leader, _) = registry.join_or_start("k".to_string(), counted_work(Arc::clone(&counter), 3));
    let (follower, _) = registry.join_or_start("k".to_string(), counted_work(Arc::clone(&counter), 4));
    drop(leader);
    drop(follower);
    assert_eq!(registry.in_flight(), 1);

    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(registry.in_flight(), 0);
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    let (_, role) = registry.join_or_start("k".to_string(), counted_work(Arc::clone(&counter), 8));
    assert_eq!(role, Role::Leader);
}

#[tokio::test]
async fn test_panicking_work_aborts_waiters_and_deregisters() {
    let registry: Arc<SingleFlight<u32>> = Arc::new(SingleFlight::new());

    let (leader, _) = registry.join_or_start("k".to_string(), || async { failing_work() });
    let (follower, _) = registry.join_or_start("k".to_string(), || async { 1 });

    let (a, b) = tokio::join!(leader, follower);
    assert!(a.is_err());
    assert_eq!(a, b);
    assert_eq!(registry.in_flight(), 0);
}

#[tokio::test]
async fn test_start_not_called_for_follower() {
    let registry: Arc<SingleFlight<u32>> = Arc::new(SingleFlight::new());
    let (_flight, _) = registry.join_or_start("k".to_string(), || async { 1 });
    let (_flight, role) = registry.join_or_start("k".to_string(), || -> BoxFuture<'static, u32> {
        panic!("follower must not start work")
    });
    assert_eq!(role, Role::Follower);
}
