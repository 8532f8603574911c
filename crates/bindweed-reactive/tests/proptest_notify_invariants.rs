//! Property-based invariant tests for `Property` change notification.
//!
//! These must hold for **any** sequence of writes:
//!
//! 1. One notification per adjacent-distinct transition, carrying the new
//!    value, in write order.
//! 2. The final notified value equals the final stored value.
//! 3. `version()` equals the number of value-changing writes.
//! 4. Multiple subscribers all observe the same sequence, in subscription
//!    order.
//! 5. Subscriptions added reentrantly during a pass first fire in the next
//!    pass.
//! 6. Reentrant removal of a not-yet-visited subscriber silences it in the
//!    same pass; visited subscribers keep their delivery.

use std::cell::RefCell;
use std::rc::Rc;

use bindweed_reactive::{Notifier, Property, SubscriptionId};
use proptest::prelude::*;

fn write_sequence() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(0i32..8, 0..64)
}

proptest! {
    #[test]
    fn notifications_match_adjacent_distinct_transitions(values in write_sequence()) {
        let property = Property::new(0i32);
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let _sub = property.subscribe(move |v| sink.borrow_mut().push(*v));

        let mut current = 0i32;
        let mut expected = Vec::new();
        for value in values {
            property.set(value).unwrap();
            if value != current {
                expected.push(value);
                current = value;
            }
        }

        prop_assert_eq!(&*log.borrow(), &expected);
        prop_assert_eq!(property.version(), expected.len() as u64);
        prop_assert_eq!(property.get(), current);
    }

    #[test]
    fn subscribers_fire_in_subscription_order(values in write_sequence(), count in 1usize..6) {
        let property = Property::new(0i32);
        let order = Rc::new(RefCell::new(Vec::new()));

        let mut subs = Vec::new();
        for i in 0..count {
            let sink = Rc::clone(&order);
            subs.push(property.subscribe(move |_| sink.borrow_mut().push(i)));
        }

        let mut changes = 0usize;
        let mut current = 0i32;
        for value in values {
            property.set(value).unwrap();
            if value != current {
                changes += 1;
                current = value;
            }
        }

        // Per pass: 0, 1, .., count-1 exactly once each.
        let expected: Vec<usize> = (0..changes).flat_map(|_| 0..count).collect();
        prop_assert_eq!(&*order.borrow(), &expected);
    }

    #[test]
    fn unsubscribed_observer_sees_nothing_further(
        before in write_sequence(),
        after in write_sequence(),
    ) {
        let property = Property::new(0i32);
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let sub = property.subscribe(move |v| sink.borrow_mut().push(*v));

        for value in before {
            property.set(value).unwrap();
        }
        let seen = log.borrow().len();

        drop(sub);
        for value in after {
            property.set(value).unwrap();
        }
        prop_assert_eq!(log.borrow().len(), seen);
    }

    #[test]
    fn reentrant_additions_first_fire_in_the_next_pass(
        adders in 1usize..4,
        passes in 1usize..5,
    ) {
        let notifier: Notifier<usize> = Notifier::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let late_guards = Rc::new(RefCell::new(Vec::new()));

        let mut adder_guards = Vec::new();
        for _ in 0..adders {
            let n = notifier.clone();
            let sink = Rc::clone(&log);
            let bag = Rc::clone(&late_guards);
            adder_guards.push(notifier.subscribe(move |pass: &usize| {
                sink.borrow_mut().push(("adder", *pass));
                let inner = Rc::clone(&sink);
                let late = n.subscribe(move |pass| inner.borrow_mut().push(("late", *pass)));
                bag.borrow_mut().push(late);
            }));
        }

        for pass in 0..passes {
            notifier.notify(&pass).unwrap();
        }

        // Each adder spawns one subscriber per pass, so pass p sees the
        // adders plus every subscriber spawned in passes 0..p — none of the
        // ones spawned during pass p itself.
        for pass in 0..passes {
            let adder_count = log.borrow().iter().filter(|&&e| e == ("adder", pass)).count();
            let late_count = log.borrow().iter().filter(|&&e| e == ("late", pass)).count();
            prop_assert_eq!(adder_count, adders);
            prop_assert_eq!(late_count, adders * pass);
        }
    }

    #[test]
    fn reentrant_removal_silences_unvisited_subscribers(
        removal_pass in prop::collection::vec(prop::option::of(0usize..4), 1..6),
        passes in 1usize..5,
    ) {
        let notifier: Notifier<usize> = Notifier::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let victims: Rc<RefCell<Vec<(SubscriptionId, Option<usize>)>>> =
            Rc::new(RefCell::new(Vec::new()));

        // Registered first, so it removes scheduled victims before they are
        // visited in the same pass.
        let n = notifier.clone();
        let list = Rc::clone(&victims);
        let _reaper = notifier.subscribe(move |pass: &usize| {
            for (id, removal) in list.borrow().iter() {
                if *removal == Some(*pass) {
                    n.unsubscribe(*id);
                }
            }
        });

        let mut guards = Vec::new();
        for (index, removal) in removal_pass.iter().enumerate() {
            let sink = Rc::clone(&log);
            let guard = notifier.subscribe(move |pass: &usize| {
                sink.borrow_mut().push((index, *pass));
            });
            victims.borrow_mut().push((guard.id(), *removal));
            guards.push(guard);
        }

        for pass in 0..passes {
            notifier.notify(&pass).unwrap();
        }

        // A victim scheduled for removal in pass r fires strictly before r.
        let mut expected = Vec::new();
        for pass in 0..passes {
            for (index, removal) in removal_pass.iter().enumerate() {
                if removal.is_none_or(|r| pass < r) {
                    expected.push((index, pass));
                }
            }
        }
        prop_assert_eq!(&*log.borrow(), &expected);
    }
}
