use super::*;

#[test]
fn virtual_clock_releases_tickets_when_due() {
    let mut clock = VirtualClock::new();
    clock.schedule_after(Duration::from_millis(2000), RunTicket(0));
    assert_eq!(clock.pending(), 1);

    assert!(clock.advance(Duration::from_millis(1999)).is_empty());
    assert_eq!(clock.advance(Duration::from_millis(1)), vec![RunTicket(0)]);
    assert_eq!(clock.pending(), 0);
    assert_eq!(clock.now(), Duration::from_millis(2000));
}

#[test]
fn virtual_clock_orders_by_due_time_then_submission() {
    let mut clock = VirtualClock::new();
    clock.schedule_after(Duration::from_millis(30), RunTicket(7));
    clock.schedule_after(Duration::from_millis(10), RunTicket(9));
    clock.schedule_after(Duration::from_millis(30), RunTicket(3));

    assert_eq!(
        clock.advance(Duration::from_secs(1)),
        vec![RunTicket(9), RunTicket(7), RunTicket(3)]
    );
}

#[test]
fn virtual_clock_wait_next_jumps_time() {
    let mut clock = VirtualClock::new();
    clock.advance(Duration::from_millis(5));
    clock.schedule_after(Duration::from_millis(100), RunTicket(1));
    assert_eq!(clock.wait_next(), Some(RunTicket(1)));
    assert_eq!(clock.now(), Duration::from_millis(105));
    assert_eq!(clock.wait_next(), None);
}

#[test]
fn wall_clock_waits_for_due_time() {
    let mut clock = WallClock::new();
    let start = Instant::now();
    clock.schedule_after(Duration::from_millis(20), RunTicket(0));
    clock.schedule_after(Duration::ZERO, RunTicket(1));

    assert_eq!(clock.wait_next(), Some(RunTicket(1)));
    assert_eq!(clock.wait_next(), Some(RunTicket(0)));
    assert!(start.elapsed() >= Duration::from_millis(20));
    assert_eq!(clock.pending(), 0);
}
