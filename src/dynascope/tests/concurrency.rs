use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use dynascope::prelude::*;

const THREADS: usize = 16;

#[derive(Debug)]
struct Slot(usize);

#[test]
fn concurrent_define_has_exactly_one_winner() {
    let scope = Scope::new();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|id| {
            let scope = scope.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let registration: Arc<dyn Registration> = Arc::new(singleton(Arc::new(Slot(id))));
                barrier.wait();
                scope
                    .define(Arc::clone(&registration))
                    .then_some(registration)
            })
        })
        .collect();

    let winners: Vec<_> = handles
        .into_iter()
        .filter_map(|h| h.join().expect("Each thread should not `panic!()`"))
        .collect();
    assert_eq!(winners.len(), 1);

    let resolved = scope.resolve(TypeKey::of::<Slot>()).unwrap();
    assert!(Arc::ptr_eq(&resolved, &winners[0]));
}

#[test]
fn concurrent_selection_has_exactly_one_winner_per_key() {
    let options = Arc::new(SelectionRegistry::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|id| {
            let options = Arc::clone(&options);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let shared = options.set("shared", singleton(Arc::new(Slot(id))));
                let own = options.set(id.to_string(), singleton(Arc::new(Slot(id))));
                (shared, own)
            })
        })
        .collect();

    let results: Vec<(bool, bool)> = handles
        .into_iter()
        .map(|h| h.join().expect("Each thread should not `panic!()`"))
        .collect();
    assert_eq!(results.iter().filter(|(shared, _)| *shared).count(), 1);
    assert!(results.iter().all(|(_, own)| *own));
    assert_eq!(options.keys::<Slot>().len(), THREADS + 1);
}

#[test]
fn computed_provider_may_resolve_from_the_same_scope() {
    let root = Scope::new();
    let calls = Arc::new(AtomicUsize::new(0));
    root.set(singleton(Arc::new(Slot(7))));
    root.set(factory({
        let calls = Arc::clone(&calls);
        move |current: &Scope| {
            calls.fetch_add(1, Ordering::SeqCst);
            let slot = current.get::<Slot>().map_or(0, |slot| slot.0);
            Arc::new(slot * 6)
        }
    }));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let scope = root.child();
            thread::spawn(move || scope.get::<usize>().map(|value| *value))
        })
        .collect();

    handles
        .into_iter()
        .for_each(|h| assert_eq!(h.join().unwrap(), Some(42)));
    assert_eq!(calls.load(Ordering::SeqCst), THREADS);
}

#[test]
fn readers_observe_a_define_from_another_thread() {
    let root = Scope::new();
    let child = root.child();

    thread::spawn({
        let root = root.clone();
        move || root.set(singleton(Arc::new(Slot(1))))
    })
    .join()
    .unwrap();

    assert_eq!(child.get::<Slot>().map(|slot| slot.0), Some(1));
}
