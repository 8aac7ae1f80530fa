use std::sync::Arc;
use std::time::Duration;

use mapcards_core::{ScrollControl, ScrollOptions, ScrollStatus, StopReason};
use tokio::sync::mpsc;

use super::fake_page::{FakeElement, FakePage, FakeState};
use super::selectors::CONTAINER_SELECTORS;
use super::{ScrollDriver, ScrollTarget};

fn options(max_cycles: u32, stall_threshold: u32) -> ScrollOptions {
    ScrollOptions {
        max_cycles,
        stall_threshold,
        ..ScrollOptions::default()
    }
}

fn driver(
    state: FakeState,
) -> (
    Arc<FakePage>,
    ScrollDriver<FakePage>,
    mpsc::UnboundedReceiver<ScrollStatus>,
) {
    let page = Arc::new(FakePage::new(state));
    let (tx, rx) = mpsc::unbounded_channel();
    let driver = ScrollDriver::new(Arc::clone(&page), Some(tx));
    (page, driver, rx)
}

/// Collects events through the first inactive one.
async fn until_stopped(rx: &mut mpsc::UnboundedReceiver<ScrollStatus>) -> Vec<ScrollStatus> {
    let mut events = Vec::new();
    while let Some(status) = rx.recv().await {
        let done = !status.active;
        events.push(status);
        if done {
            break;
        }
    }
    events
}

#[tokio::test(start_paused = true)]
async fn stops_at_cycle_ceiling_while_items_keep_growing() {
    let (_page, driver, mut rx) = driver(FakeState {
        items: 5,
        items_per_step: 1,
        ..FakeState::default()
    });
    assert!(driver.start(options(3, 8)));

    let events = until_stopped(&mut rx).await;
    let last = events.last().unwrap();
    assert_eq!(last.stop_reason, Some(StopReason::CycleLimit));
    assert_eq!(last.scroll_count, 3);

    // start, three cycles, stop
    assert_eq!(events.len(), 5);
    assert!(events[0].active);
    assert_eq!(events[0].scroll_count, 0);
    assert_eq!(events[0].item_count, 5);
    assert!(events[..4].iter().all(|s| s.stop_reason.is_none()));
    assert!(!driver.is_active());
}

#[tokio::test(start_paused = true)]
async fn stops_after_stall_streak() {
    let (_page, driver, mut rx) = driver(FakeState {
        items: 5,
        ..FakeState::default()
    });
    assert!(driver.start(options(50, 2)));

    let last = *until_stopped(&mut rx).await.last().unwrap();
    assert_eq!(last.stop_reason, Some(StopReason::Stalled));
    assert_eq!(last.scroll_count, 2);
}

#[tokio::test(start_paused = true)]
async fn cycle_ceiling_wins_over_simultaneous_stall() {
    let (page, driver, mut rx) = driver(FakeState {
        items: 5,
        ..FakeState::default()
    });
    assert!(driver.start(options(5, 5)));

    let events = until_stopped(&mut rx).await;
    let stops: Vec<_> = events.iter().filter_map(|s| s.stop_reason).collect();
    assert_eq!(stops, vec![StopReason::CycleLimit]);
    assert_eq!(events.last().unwrap().scroll_count, 5);

    // In-flight sub-steps finish; no further cycle fires.
    tokio::time::sleep(Duration::from_secs(1)).await;
    let scrolls_at_stop = page.state().scrolls.len();
    assert_eq!(scrolls_at_stop, 5 * 4);
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(page.state().scrolls.len(), scrolls_at_stop);
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn stops_when_document_end_is_reached() {
    let mut state = FakeState {
        items: 5,
        items_per_step: 1,
        ..FakeState::default()
    };
    state.document.scroll_height = state.document.client_height + 50.0;
    let (_page, driver, mut rx) = driver(state);
    assert!(driver.start(options(50, 8)));

    let last = *until_stopped(&mut rx).await.last().unwrap();
    assert_eq!(last.stop_reason, Some(StopReason::ReachedEnd));
    assert_eq!(last.scroll_count, 1);
}

#[tokio::test(start_paused = true)]
async fn scrolls_container_in_paced_sub_steps() {
    let (page, driver, mut rx) = driver(FakeState {
        items: 5,
        items_per_step: 1,
        elements: vec![FakeElement::scrollable(7, Some(CONTAINER_SELECTORS[1]))],
        ..FakeState::default()
    });
    assert!(driver.start(options(1, 8)));
    until_stopped(&mut rx).await;

    // Let the last cycle's sub-steps drain.
    tokio::time::sleep(Duration::from_secs(1)).await;

    let scrolls = page.state().scrolls.clone();
    assert_eq!(scrolls.len(), 4);
    for (target, dy) in scrolls {
        assert_eq!(target, ScrollTarget::Element(7));
        assert!((dy - 150.0).abs() < 1e-9);
    }
}

#[tokio::test(start_paused = true)]
async fn start_and_stop_are_idempotent() {
    let (_page, driver, mut rx) = driver(FakeState::default());

    assert!(!driver.stop());
    assert!(driver.start(ScrollOptions::default()));
    assert!(!driver.start(ScrollOptions::default()));
    assert!(driver.is_active());

    assert!(driver.stop());
    assert!(!driver.stop());

    let events = until_stopped(&mut rx).await;
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].stop_reason, Some(StopReason::Requested));
    assert_eq!(events[1].scroll_count, 0);
}

#[tokio::test(start_paused = true)]
async fn restart_after_stop_reports_the_old_session_as_finished_first() {
    let (_page, driver, mut rx) = driver(FakeState {
        items: 3,
        ..FakeState::default()
    });

    assert!(driver.start(ScrollOptions::default()));
    assert!(rx.recv().await.unwrap().active);

    assert!(driver.stop());
    assert!(driver.start(ScrollOptions::default()));
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;

    let mut events = Vec::new();
    while let Ok(status) = rx.try_recv() {
        events.push(status);
    }
    assert_eq!(events.len(), 2, "{events:?}");
    assert!(!events[0].active);
    assert_eq!(events[0].stop_reason, Some(StopReason::Requested));
    assert_eq!(events[0].item_count, 3);
    assert!(events[1].active);
    assert_eq!(events[1].scroll_count, 0);
    assert!(driver.is_active());

    // The cancelled session stays silent from here on.
    tokio::time::sleep(ScrollOptions::default().interval).await;
    tokio::task::yield_now().await;
    while let Ok(status) = rx.try_recv() {
        assert_ne!(status.stop_reason, Some(StopReason::Requested));
    }
}

#[tokio::test(start_paused = true)]
async fn can_restart_after_natural_stop() {
    let (_page, driver, mut rx) = driver(FakeState::default());
    let control: &dyn ScrollControl = &driver;

    assert!(control.start(options(1, 8)));
    until_stopped(&mut rx).await;
    tokio::task::yield_now().await;

    assert!(control.start(options(1, 8)));
    let events = until_stopped(&mut rx).await;
    assert_eq!(events.first().unwrap().scroll_count, 0);
    assert_eq!(
        events.last().unwrap().stop_reason,
        Some(StopReason::CycleLimit)
    );
}
