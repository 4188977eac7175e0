// tests/scheduling.rs
use pretty_assertions::assert_eq;
use std::time::Duration;
use turtle_board::{Generation, Scheduler, Token};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_callbacks_fire_in_due_order() {
    let token = Token::new(Generation(1));
    let mut scheduler = Scheduler::new();
    assert!(scheduler.is_empty());

    scheduler.schedule(ms(300), token, "late");
    scheduler.schedule(ms(100), token, "early");
    scheduler.schedule(ms(100), token, "early too");
    assert_eq!(scheduler.len(), 3);
    assert_eq!(scheduler.next_due(), Some(ms(100)));

    assert_eq!(scheduler.pop_due(ms(50)), None, "Nothing is due yet");

    // Same due time fires in scheduling order.
    assert_eq!(scheduler.pop_due(ms(100)), Some((token, "early")));
    assert_eq!(scheduler.pop_due(ms(100)), Some((token, "early too")));
    assert_eq!(scheduler.pop_due(ms(200)), None);

    assert_eq!(scheduler.pop_due(ms(1000)), Some((token, "late")));
    assert!(scheduler.is_empty());
    assert_eq!(scheduler.next_due(), None);
}

#[test]
fn test_cancel_by_generation() {
    let old = Token::new(Generation(1));
    let new = Token::new(Generation(1).next());
    assert_eq!(new.generation(), Generation(2));
    assert!(!old.is_current(new.generation()));

    let mut scheduler = Scheduler::new();
    scheduler.schedule(ms(20), old, 2);
    scheduler.schedule(ms(10), old, 1);
    scheduler.schedule(ms(5), new, 3);

    let cancelled = scheduler.cancel(|token| token.generation() < Generation(2));
    assert_eq!(cancelled, vec![1, 2], "Cancelled tasks come back in firing order");
    assert_eq!(scheduler.len(), 1);

    let (token, task) = scheduler.pop_due(ms(100)).unwrap();
    assert!(token.is_current(Generation(2)));
    assert_eq!(task, 3);
    assert!(scheduler.is_empty());
}
