//! Integration tests for the playback subsystem.
//!
//! Drives full editor sessions end to end: asset ingestion through the
//! background loader, the transport clock, and the per-tick compositor.

use std::sync::Arc;
use std::time::Duration;

use cutline_assets::{Asset, MediaKind, StubFetcher};
use cutline_core::Time;
use cutline_playback::{EditorSession, MediaDirective, TransportError};
use cutline_timeline::ClipEdit;

const LOAD_TIMEOUT: Duration = Duration::from_secs(5);

// ── Helpers ────────────────────────────────────────────────────

fn image(name: &str) -> Asset {
    Asset::new(name, format!("https://cdn.example.com/{name}"), MediaKind::Image)
}

fn video(name: &str) -> Asset {
    Asset::new(name, format!("https://cdn.example.com/{name}"), MediaKind::Video)
}

fn session_with(fetcher: StubFetcher) -> (EditorSession, Arc<StubFetcher>) {
    let fetcher = Arc::new(fetcher);
    let session = EditorSession::new(fetcher.clone() as Arc<dyn cutline_assets::MediaFetcher>)
        .expect("loader runtime");
    (session, fetcher)
}

// ── Load gating ────────────────────────────────────────────────

#[test]
fn play_is_refused_until_loads_settle() {
    crate::init_tracing();
    let (mut session, fetcher) = session_with(StubFetcher::new());

    let asset = video("take.mp4");
    fetcher.set_duration(asset.id, Time::from_secs(8));
    let clip = session.add_asset(&asset);

    // The fetch may still be in flight here; if so, play is refused outright.
    if session.registry().any_loading() {
        assert_eq!(session.play(), Err(TransportError::MediaLoading));
    }

    assert!(session.await_loads(LOAD_TIMEOUT));
    assert_eq!(
        session.registry().get(clip).unwrap().duration,
        Time::from_secs(8)
    );
    assert!(session.play().is_ok());
}

#[test]
fn failed_load_does_not_block_playback() {
    let (mut session, fetcher) = session_with(StubFetcher::new());

    let asset = video("broken.mp4");
    fetcher.set_failure(asset.id, "404 from origin");
    let clip = session.add_asset(&asset);

    assert!(session.await_loads(LOAD_TIMEOUT));
    assert!(!session.registry().get(clip).unwrap().playable());
    assert!(session.play().is_ok());

    // The failed clip is shown, just never playing.
    let frame = session.current_frame();
    assert_eq!(
        frame.slot(clip).unwrap().directive,
        MediaDirective::Video {
            head: Time::ZERO,
            play: false,
        }
    );
}

#[test]
fn load_finishing_after_delete_is_discarded() {
    let (mut session, fetcher) =
        session_with(StubFetcher::new().with_delay(Duration::from_millis(50)));

    let asset = video("doomed.mp4");
    fetcher.set_duration(asset.id, Time::from_secs(8));
    let clip = session.add_asset(&asset);

    // Delete while the fetch is still sleeping in the stub.
    assert!(session.edit(ClipEdit::Delete { id: clip }).is_committed());
    assert!(session.registry().is_empty());

    // Wait for the in-flight completion to arrive, then drain it.
    let deadline = std::time::Instant::now() + LOAD_TIMEOUT;
    while session.pump_events() == 0 {
        assert!(std::time::Instant::now() < deadline, "completion never arrived");
        std::thread::sleep(Duration::from_millis(10));
    }
    assert!(session.registry().is_empty());
    assert!(session.registry().get(clip).is_none());
}

// ── Visibility over ticks ──────────────────────────────────────

#[test]
fn playhead_crossing_boundary_flips_visibility() {
    let (mut session, fetcher) = session_with(StubFetcher::new());

    let img = session.add_asset(&image("a.png")); // [0, 5)
    let vid_asset = video("v.mp4");
    fetcher.set_duration(vid_asset.id, Time::from_secs(8));
    let vid = session.add_asset(&vid_asset); // [5, 13) once resolved

    assert!(session.await_loads(LOAD_TIMEOUT));
    assert!(session.play().is_ok());

    // 40 ticks of 0.1 s land the playhead at exactly 4.0 s.
    let mut frame = session.current_frame();
    for _ in 0..40 {
        frame = session.tick();
    }
    assert_eq!(frame.time, Time::new(4, 1));
    assert_eq!(frame.slot(img).unwrap().directive, MediaDirective::Image);
    assert_eq!(frame.slot(vid).unwrap().directive, MediaDirective::Hidden);

    // Ten more reach 5.0 s: the image's half-open span has just closed and
    // the video starts from its own zero.
    for _ in 0..10 {
        frame = session.tick();
    }
    assert_eq!(frame.time, Time::new(5, 1));
    assert_eq!(frame.slot(img).unwrap().directive, MediaDirective::Hidden);
    assert_eq!(
        frame.slot(vid).unwrap().directive,
        MediaDirective::Video {
            head: Time::ZERO,
            play: true,
        }
    );
}

#[test]
fn reaching_the_extent_pins_and_stops() {
    let (mut session, _fetcher) = session_with(StubFetcher::new());
    session.add_asset(&image("a.png")); // extent stays at the 60 s floor

    // Seek to 59.8 s via a ruler click at the default 100 px/s.
    session.click_ruler(5980.0);
    assert!(session.play().is_ok());

    let frame = session.tick();
    assert!(frame.playing);
    assert_eq!(frame.time, Time::new(599, 10));

    let frame = session.tick();
    assert!(!frame.playing);
    assert_eq!(frame.time, Time::from_secs(60));

    // Stopped transport holds position on further ticks.
    let frame = session.tick();
    assert_eq!(frame.time, Time::from_secs(60));
}

// ── Gesture plumbing through the session ───────────────────────

#[test]
fn drag_resize_and_stack_through_session() {
    let (mut session, _fetcher) = session_with(StubFetcher::new());

    let a = session.add_asset(&image("a.png")); // [0, 5)
    let b = session.add_asset(&image("b.png")); // [5, 10)
    let layer2 = session.add_layer();

    // Cross-layer drop: layer 2 is empty, so any position is fine.
    assert!(session.drop_clip(b, 120.0, layer2).is_committed());
    let b_clip = session.registry().get(b).unwrap();
    assert_eq!(b_clip.layer, layer2);
    assert!((b_clip.start.to_seconds_f64() - 1.2).abs() < 1e-6);

    // Widen the image on layer 1; nothing blocks it now.
    assert!(session
        .resize_clip(a, cutline_timeline::ResizeEdge::Right, 800.0)
        .is_committed());
    assert_eq!(session.registry().get(a).unwrap().duration, Time::from_secs(8));

    // Stacking order in the composed frame follows the layer stack.
    let frame = session.current_frame();
    assert_eq!(frame.slot(a).unwrap().z, 0);
    assert_eq!(frame.slot(b).unwrap().z, 1);
}
