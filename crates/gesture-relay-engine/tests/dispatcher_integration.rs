//! Integration tests driving the command dispatcher against the mock backend.

use std::sync::Arc;
use std::time::Duration;

use gesture_relay_engine::config::GestureDefaults;
use gesture_relay_engine::{
    CommandDispatcher, EngineContext, EngineError, SettingsOpener, Submission,
};
use gesture_relay_input::mock::{MockBackend, MockBackendHandle, MockCompletion};
use gesture_relay_types::{
    Bounds, Command, GestureError, GestureOutcome, MouseButton, Point, Response, TouchPoint,
};
use tracing_subscriber::EnvFilter;

const WAIT: Duration = Duration::from_secs(5);

struct NoopOpener;

impl SettingsOpener for NoopOpener {
    fn open_settings(&self) {}
}

struct Harness {
    dispatcher: Arc<CommandDispatcher>,
    mock: MockBackendHandle,
}

fn setup(completion: MockCompletion, bounds: Bounds) -> Harness {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();

    let backend = MockBackend::with_completion(completion);
    let mock = backend.handle();
    let context = Arc::new(EngineContext::new());
    context.attach(bounds);
    let dispatcher = CommandDispatcher::new(
        context,
        Arc::new(backend),
        GestureDefaults::default(),
        Arc::new(NoopOpener),
    );
    Harness {
        dispatcher: Arc::new(dispatcher),
        mock,
    }
}

async fn run(dispatcher: &CommandDispatcher, command: Command) -> Response {
    tokio::time::timeout(WAIT, dispatcher.execute(command))
        .await
        .expect("command did not finish in time")
        .expect("command failed")
}

/// Wait until the mock holds `count` gestures.
async fn wait_pending(mock: &MockBackendHandle, count: usize) {
    tokio::time::timeout(WAIT, async {
        while mock.pending_count() < count {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("gestures never reached the backend");
}

#[tokio::test]
async fn test_relative_moves_accumulate_and_saturate() {
    let h = setup(MockCompletion::Complete, Bounds::new(1000.0, 1000.0));
    for _ in 0..3 {
        let response = run(&h.dispatcher, Command::RelativeMove { dx: 300.0, dy: 300.0 }).await;
        assert_eq!(response, Response::Done(true));
    }
    assert_eq!(
        run(&h.dispatcher, Command::GetPosition).await,
        Response::Position(Point::new(900.0, 900.0))
    );

    run(&h.dispatcher, Command::RelativeMove { dx: 300.0, dy: 300.0 }).await;
    assert_eq!(
        run(&h.dispatcher, Command::GetPosition).await,
        Response::Position(Point::new(1000.0, 1000.0))
    );
}

#[tokio::test]
async fn test_clamping_holds_through_the_dispatcher() {
    let bounds = Bounds::new(720.0, 1280.0);
    let h = setup(MockCompletion::Complete, bounds);
    let deltas = [
        (-1e6, 4.0),
        (250.5, -0.5),
        (f32::INFINITY, f32::NEG_INFINITY),
        (1e-4, 1e6),
        (-719.0, -1279.0),
    ];
    for (dx, dy) in deltas.iter().cycle().take(40) {
        run(&h.dispatcher, Command::RelativeMove { dx: *dx, dy: *dy }).await;
        let Response::Position(p) = run(&h.dispatcher, Command::GetPosition).await else {
            panic!("get_position must return a position");
        };
        assert!(bounds.contains(p), "cursor escaped bounds: {p:?}");
    }
}

#[tokio::test]
async fn test_position_read_is_idempotent() {
    let h = setup(MockCompletion::Complete, Bounds::new(500.0, 500.0));
    run(&h.dispatcher, Command::RelativeMove { dx: 12.0, dy: 34.0 }).await;
    let first = run(&h.dispatcher, Command::GetPosition).await;
    let second = run(&h.dispatcher, Command::GetPosition).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unavailable_short_circuits() {
    let h = setup(MockCompletion::Complete, Bounds::new(1000.0, 1000.0));
    run(&h.dispatcher, Command::RelativeMove { dx: 50.0, dy: 60.0 }).await;
    h.dispatcher.context().detach();

    let commands = [
        Command::tap(10.0, 10.0),
        Command::swipe(Point::new(0.0, 0.0), Point::new(100.0, 100.0)),
        Command::long_press(5.0, 5.0),
        Command::click(MouseButton::Left),
        Command::click(MouseButton::Right),
        Command::Scroll { dx: 0, dy: 1 },
        Command::RelativeMove { dx: 10.0, dy: 10.0 },
        Command::SetPosition { x: 1.0, y: 1.0 },
        Command::MultiTouch {
            points: vec![TouchPoint::new(1.0, 1.0, 0, 10)],
        },
    ];
    for command in commands {
        assert_eq!(run(&h.dispatcher, command).await, Response::Done(false));
    }

    assert_eq!(h.mock.dispatch_count(), 0);
    assert!(h.mock.injected().is_empty());
    assert_eq!(
        run(&h.dispatcher, Command::GetPosition).await,
        Response::Position(Point::new(50.0, 60.0))
    );
}

#[tokio::test]
async fn test_invalid_argument_wins_over_unavailable() {
    let h = setup(MockCompletion::Complete, Bounds::new(100.0, 100.0));
    h.dispatcher.context().detach();
    let err = h
        .dispatcher
        .execute(Command::MultiTouch { points: Vec::new() })
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument(GestureError::Empty)));
}

#[tokio::test]
async fn test_multi_touch_preserves_timing() {
    let h = setup(MockCompletion::Complete, Bounds::new(1000.0, 1000.0));
    let points = vec![
        TouchPoint::new(100.0, 100.0, 0, 200),
        TouchPoint::new(200.0, 200.0, 50, 300),
        TouchPoint::new(300.0, 300.0, 120, 80),
    ];
    let response = run(&h.dispatcher, Command::MultiTouch { points: points.clone() }).await;
    assert_eq!(response, Response::Done(true));

    let sent = h.mock.dispatched();
    assert_eq!(sent.len(), 1);
    let strokes = sent[0].gesture.strokes();
    assert_eq!(strokes.len(), 3);
    for (stroke, point) in strokes.iter().zip(&points) {
        assert_eq!(stroke.start_offset_ms(), point.start_offset_ms);
        assert_eq!(stroke.duration_ms(), point.duration_ms);
        assert_eq!(stroke.path().start(), point.position());
    }
}

#[tokio::test]
async fn test_default_durations() {
    let h = setup(MockCompletion::Complete, Bounds::new(1000.0, 1000.0));
    run(&h.dispatcher, Command::tap(1.0, 1.0)).await;
    run(
        &h.dispatcher,
        Command::swipe(Point::new(1.0, 1.0), Point::new(2.0, 2.0)),
    )
    .await;
    run(&h.dispatcher, Command::long_press(1.0, 1.0)).await;

    let durations: Vec<u64> = h
        .mock
        .dispatched()
        .iter()
        .map(|d| d.gesture.strokes()[0].duration_ms())
        .collect();
    assert_eq!(durations, vec![100, 300, 1000]);
}

#[tokio::test]
async fn test_every_gesture_resolves_once() {
    for completion in [
        MockCompletion::Complete,
        MockCompletion::Cancel,
        MockCompletion::Timed,
        MockCompletion::Reject,
    ] {
        let h = setup(completion, Bounds::new(1000.0, 1000.0));
        let response = run(&h.dispatcher, Command::tap(10.0, 10.0)).await;
        let expected = completion == MockCompletion::Complete || completion == MockCompletion::Timed;
        assert_eq!(response, Response::Done(expected), "{completion:?}");
    }
}

#[tokio::test]
async fn test_concurrent_gestures_complete_out_of_order() {
    let h = setup(MockCompletion::Hold, Bounds::new(1000.0, 1000.0));

    let first = tokio::spawn({
        let dispatcher = Arc::clone(&h.dispatcher);
        async move { dispatcher.execute(Command::tap(10.0, 10.0)).await }
    });
    wait_pending(&h.mock, 1).await;
    let second = tokio::spawn({
        let dispatcher = Arc::clone(&h.dispatcher);
        async move { dispatcher.execute(Command::long_press(20.0, 20.0)).await }
    });
    wait_pending(&h.mock, 2).await;

    let ids = h.mock.pending_ids();
    assert!(h.mock.resolve(ids[1], GestureOutcome::Completed));
    let second = tokio::time::timeout(WAIT, second).await.unwrap().unwrap().unwrap();
    assert_eq!(second, Response::Done(true));
    assert!(!first.is_finished());

    assert!(h.mock.resolve(ids[0], GestureOutcome::Cancelled));
    let first = tokio::time::timeout(WAIT, first).await.unwrap().unwrap().unwrap();
    assert_eq!(first, Response::Done(false));
}

#[tokio::test]
async fn test_cursor_survives_concurrent_gestures() {
    let h = setup(MockCompletion::Hold, Bounds::new(1000.0, 1000.0));

    let tap = tokio::spawn({
        let dispatcher = Arc::clone(&h.dispatcher);
        async move { dispatcher.execute(Command::tap(500.0, 500.0)).await }
    });
    wait_pending(&h.mock, 1).await;

    for _ in 0..10 {
        run(&h.dispatcher, Command::RelativeMove { dx: 7.0, dy: 3.0 }).await;
    }
    assert_eq!(
        run(&h.dispatcher, Command::GetPosition).await,
        Response::Position(Point::new(70.0, 30.0))
    );

    h.mock.resolve_all(GestureOutcome::Completed);
    let tap = tokio::time::timeout(WAIT, tap).await.unwrap().unwrap().unwrap();
    assert_eq!(tap, Response::Done(true));
}

#[tokio::test]
async fn test_detach_cancels_in_flight_gestures() {
    let h = setup(MockCompletion::Hold, Bounds::new(1000.0, 1000.0));

    let swipe = tokio::spawn({
        let dispatcher = Arc::clone(&h.dispatcher);
        async move {
            dispatcher
                .execute(Command::swipe(Point::new(0.0, 0.0), Point::new(900.0, 900.0)))
                .await
        }
    });
    wait_pending(&h.mock, 1).await;

    h.dispatcher.context().detach();
    let swipe = tokio::time::timeout(WAIT, swipe).await.unwrap().unwrap().unwrap();
    assert_eq!(swipe, Response::Done(false));

    // A fresh attachment starts from the origin and accepts gestures again.
    h.dispatcher.context().attach(Bounds::new(800.0, 600.0));
    assert_eq!(
        run(&h.dispatcher, Command::GetPosition).await,
        Response::Position(Point::ORIGIN)
    );
    h.mock.set_completion(MockCompletion::Complete);
    assert_eq!(
        run(&h.dispatcher, Command::tap(10.0, 10.0)).await,
        Response::Done(true)
    );
}

#[tokio::test]
async fn test_shutdown_cancels_held_gestures() {
    let h = setup(MockCompletion::Hold, Bounds::new(1000.0, 1000.0));
    let tap = tokio::spawn({
        let dispatcher = Arc::clone(&h.dispatcher);
        async move { dispatcher.execute(Command::tap(1.0, 1.0)).await }
    });
    wait_pending(&h.mock, 1).await;

    h.dispatcher.shutdown().await.unwrap();
    let tap = tokio::time::timeout(WAIT, tap).await.unwrap().unwrap().unwrap();
    assert_eq!(tap, Response::Done(false));
    assert!(h.mock.is_shutdown());
}

#[tokio::test]
async fn test_submission_order_is_application_order() {
    let h = setup(MockCompletion::Hold, Bounds::new(1000.0, 1000.0));

    // Gestures stay in flight while later cursor commands apply in order.
    let mut pending = Vec::new();
    for x in 1..=20u16 {
        let x = f32::from(x);
        let tap = h.dispatcher.submit(Command::tap(x, x)).await.unwrap();
        let Submission::Pending(tap) = tap else {
            panic!("held tap must be pending");
        };
        pending.push(tap);
        h.dispatcher
            .submit(Command::SetPosition { x, y: 0.0 })
            .await
            .unwrap();
        h.dispatcher
            .submit(Command::click(MouseButton::Left))
            .await
            .unwrap();
    }

    let sent = h.mock.dispatched();
    assert_eq!(sent.len(), 40);
    for (pair, x) in sent.chunks(2).zip(1..=20u16) {
        let x = f32::from(x);
        assert_eq!(pair[0].gesture.strokes()[0].path().start(), Point::new(x, x));
        assert_eq!(pair[1].gesture.strokes()[0].path().start(), Point::new(x, 0.0));
    }

    h.mock.resolve_all(GestureOutcome::Completed);
    for tap in pending {
        let response = tokio::time::timeout(WAIT, tap.finish()).await.unwrap();
        assert_eq!(response, Response::Done(true));
    }
}
