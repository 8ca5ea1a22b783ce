// Unit tests for the notice center.

use crate::surface::notice::{NoticeCenter, NoticeLevel};

/// Notices drain oldest first and draining empties the queue.
#[test]
fn given_pushed_notices_when_drained_then_fifo_order_and_empty_after() {
    // GIVEN: Three notices of different levels
    let notices = NoticeCenter::new();
    notices.info("first");
    notices.success("second");
    notices.error("third");

    // WHEN: Draining
    let drained = notices.drain();

    // THEN: FIFO order with levels intact
    let summary: Vec<(NoticeLevel, &str)> = drained
        .iter()
        .map(|n| (n.level, n.message.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (NoticeLevel::Info, "first"),
            (NoticeLevel::Success, "second"),
            (NoticeLevel::Error, "third"),
        ]
    );

    // AND: The queue is empty afterwards
    assert!(notices.is_empty());
}

/// **VALUE**: Verifies overflow drops the oldest notice, never blocks.
///
/// **BUG THIS CATCHES**: Would catch an unbounded queue growing for the
/// whole session when nothing renders (and expires) notices.
#[test]
fn given_full_queue_when_pushed_then_oldest_dropped() {
    // GIVEN: A notice center bounded to 2
    let notices = NoticeCenter::with_limit(2);
    notices.info("one");
    notices.info("two");

    // WHEN: A third notice arrives
    notices.info("three");

    // THEN: The oldest was dropped
    let messages: Vec<String> = notices.drain().into_iter().map(|n| n.message).collect();
    assert_eq!(messages, vec!["two", "three"]);
}

/// A zero limit is clamped to one rather than silently discarding all
/// notices.
#[test]
fn given_zero_limit_when_constructed_then_clamped_to_one() {
    let notices = NoticeCenter::with_limit(0);
    notices.error("kept");
    assert_eq!(notices.len(), 1);
}
