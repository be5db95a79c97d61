//! Integration tests for the arrangement layer.
//!
//! Exercises cross-crate interactions between cutline-core,
//! cutline-timeline, and cutline-assets.

use cutline_assets::{Asset, MediaKind, MediaProbe};
use cutline_core::Time;
use cutline_timeline::{
    ClipEdit, ClipRegistry, EditOutcome, LayerId, RejectReason, ResizeEdge, SnapEngine, Viewport,
};

// ── Helpers ────────────────────────────────────────────────────

fn image(name: &str) -> Asset {
    Asset::new(name, format!("https://cdn.example.com/{name}"), MediaKind::Image)
}

fn video(name: &str) -> Asset {
    Asset::new(name, format!("https://cdn.example.com/{name}"), MediaKind::Video)
}

fn probe(secs: i64) -> MediaProbe {
    MediaProbe {
        duration: Time::from_secs(secs),
        local_url: "blob:test".into(),
    }
}

// ── Arrangement lifecycle ──────────────────────────────────────

#[test]
fn placeholder_video_duration_is_replaced_by_probe() {
    crate::init_tracing();
    let mut reg = ClipRegistry::new();
    let a = reg.add_clip(&image("a.png"));
    let b = reg.add_clip(&video("b.mp4"));

    // Image takes [0, 5); the video lands after it with the 10 s placeholder.
    assert_eq!(reg.get(a).unwrap().end(), Time::from_secs(5));
    assert_eq!(reg.get(b).unwrap().end(), Time::from_secs(15));

    reg.resolve_load(b, Ok(probe(8)));
    assert_eq!(reg.get(b).unwrap().end(), Time::from_secs(13));

    // Moving the image into the resolved video's span is refused, and the
    // registry is left exactly as it was.
    let outcome = reg.apply(ClipEdit::Move {
        id: a,
        layer: LayerId::FIRST,
        start: Time::from_secs(3),
    });
    assert_eq!(outcome, EditOutcome::Rejected(RejectReason::Overlap));
    assert_eq!(reg.get(a).unwrap().start, Time::ZERO);

    // Right after the video is fine.
    let outcome = reg.apply(ClipEdit::Move {
        id: a,
        layer: LayerId::FIRST,
        start: Time::from_secs(13),
    });
    assert!(outcome.is_committed());
}

#[test]
fn third_clip_appends_after_latest_end_not_last_insert() {
    let mut reg = ClipRegistry::new();
    let a = reg.add_clip(&image("a.png")); // [0, 5)
    reg.add_clip(&video("b.mp4")); // [5, 15) placeholder

    // Move the image past the video so the latest end is the image's.
    assert!(reg
        .apply(ClipEdit::Move {
            id: a,
            layer: LayerId::FIRST,
            start: Time::from_secs(20),
        })
        .is_committed());

    let c = reg.add_clip(&image("c.png"));
    assert_eq!(reg.get(c).unwrap().start, Time::from_secs(25));
}

#[test]
fn layers_are_independent_lanes() {
    let mut reg = ClipRegistry::new();
    let a = reg.add_clip(&image("a.png"));
    let layer2 = reg.add_layer();

    assert!(reg
        .apply(ClipEdit::Move {
            id: a,
            layer: layer2,
            start: Time::ZERO,
        })
        .is_committed());

    // Layer 1 is empty again, so a fresh clip starts at zero there.
    let b = reg.add_clip(&image("b.png"));
    assert_eq!(reg.get(b).unwrap().start, Time::ZERO);
    assert_eq!(reg.layers().z_index(layer2), Some(1));
}

// ── Drag pipeline: snap in pixel space, commit in time ─────────

#[test]
fn snapped_drag_commits_adjacent_without_overlap() {
    let mut reg = ClipRegistry::new();
    reg.add_clip(&image("a.png")); // [0, 5), end edge at px 500
    let dragged = reg.add_clip(&image("b.png")); // [5, 10)

    let vp = Viewport::new();
    let engine = SnapEngine::new();

    // A drop 13 px short of the neighbor edge snaps onto it, which the
    // half-open overlap check then accepts as adjacency.
    let snapped = engine.snap_drag(487.0, dragged, LayerId::FIRST, &reg, &vp);
    assert_eq!(snapped, 500.0);
    let outcome = reg.apply(ClipEdit::Move {
        id: dragged,
        layer: LayerId::FIRST,
        start: vp.px_to_time(snapped),
    });
    assert!(outcome.is_committed());
    assert_eq!(reg.get(dragged).unwrap().start, Time::from_secs(5));
}

#[test]
fn unsnapped_drop_inside_neighbor_is_rejected() {
    let mut reg = ClipRegistry::new();
    reg.add_clip(&image("a.png")); // [0, 5)
    let dragged = reg.add_clip(&image("b.png"));

    let vp = Viewport::new();
    let engine = SnapEngine::new();

    // 300 px is 200 px from the only edge: no snap, and [3, 8) overlaps.
    let snapped = engine.snap_drag(300.0, dragged, LayerId::FIRST, &reg, &vp);
    assert_eq!(snapped, 300.0);
    let outcome = reg.apply(ClipEdit::Move {
        id: dragged,
        layer: LayerId::FIRST,
        start: vp.px_to_time(snapped),
    });
    assert_eq!(outcome, EditOutcome::Rejected(RejectReason::Overlap));
}

#[test]
fn snap_distance_scales_with_zoom() {
    let mut reg = ClipRegistry::new();
    reg.add_clip(&image("a.png")); // [0, 5)
    let dragged = reg.add_clip(&image("b.png"));

    let mut vp = Viewport::new();
    vp.set_zoom(50.0); // neighbor edge is now at px 250
    let engine = SnapEngine::new();

    let snapped = engine.snap_drag(260.0, dragged, LayerId::FIRST, &reg, &vp);
    assert_eq!(snapped, 250.0);
    assert_eq!(vp.px_to_time(snapped), Time::from_secs(5));
}

// ── Resize pipeline ────────────────────────────────────────────

#[test]
fn pixel_resize_respects_zoom_and_minimum() {
    let mut reg = ClipRegistry::new();
    let a = reg.add_clip(&image("a.png"));

    let mut vp = Viewport::new();
    vp.set_zoom(200.0);

    // 400 px at 200 px/s is 2 s.
    assert!(reg
        .apply(ClipEdit::Resize {
            id: a,
            edge: ResizeEdge::Right,
            duration: vp.px_to_time(400.0),
        })
        .is_committed());
    assert_eq!(reg.get(a).unwrap().duration, Time::from_secs(2));

    // 40 px at 200 px/s is 0.2 s, which clamps to the 1 s floor.
    assert!(reg
        .apply(ClipEdit::Resize {
            id: a,
            edge: ResizeEdge::Right,
            duration: vp.px_to_time(40.0),
        })
        .is_committed());
    assert_eq!(reg.get(a).unwrap().duration, Time::from_secs(1));
}

// ── Ruler over registry extent ─────────────────────────────────

#[test]
fn ruler_covers_extent_from_clips() {
    let mut reg = ClipRegistry::new();
    let v = reg.add_clip(&video("v.mp4"));
    reg.resolve_load(v, Ok(probe(70)));

    let vp = Viewport::new();
    let extent = reg.max_extent();
    assert_eq!(extent, Time::from_secs(70));
    assert_eq!(vp.content_width(extent), 7000.0);

    let marks = vp.ruler_marks(extent);
    assert_eq!(marks.len(), 71);
    assert!(marks[70].major);
    assert!(!marks[69].major);
}

// ── Randomized edit sequences ──────────────────────────────────

fn assert_no_overlaps(reg: &ClipRegistry, step: usize) {
    let clips = reg.clips();
    for (i, a) in clips.iter().enumerate() {
        for b in &clips[i + 1..] {
            assert!(
                a.layer != b.layer || !a.span().overlaps(b.span()),
                "step {step}: clips {} and {} overlap in {}",
                a.id,
                b.id,
                a.layer
            );
        }
    }
}

#[test]
fn no_overlap_survives_random_edit_sequences() {
    crate::init_tracing();
    let mut seed = 12345u64;
    let mut next = move |modulus: u64| {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        (seed >> 33) % modulus
    };

    let mut reg = ClipRegistry::new();
    let mut layers = vec![LayerId::FIRST];
    let mut ids = Vec::new();

    for step in 0..500 {
        match next(10) {
            0 => {
                ids.push(reg.add_clip(&image("img.png")));
            }
            1 => {
                let id = reg.add_clip(&video("vid.mp4"));
                reg.resolve_load(id, Ok(probe(1 + next(20) as i64)));
                ids.push(id);
            }
            2 if layers.len() < 4 => {
                layers.push(reg.add_layer());
            }
            3 => {
                if let Some(&id) = ids.last() {
                    ids.retain(|&i| i != id);
                    reg.apply(ClipEdit::Delete { id });
                }
            }
            4 | 5 | 6 => {
                if !ids.is_empty() {
                    let id = ids[next(ids.len() as u64) as usize];
                    let layer = layers[next(layers.len() as u64) as usize];
                    // Half-second grid, occasionally negative to hit the clamp.
                    let start = Time::new(next(200) as i64 - 10, 2);
                    reg.apply(ClipEdit::Move { id, layer, start });
                }
            }
            _ => {
                if !ids.is_empty() {
                    let id = ids[next(ids.len() as u64) as usize];
                    let edge = if next(2) == 0 {
                        ResizeEdge::Left
                    } else {
                        ResizeEdge::Right
                    };
                    let duration = Time::new(next(40) as i64, 2);
                    reg.apply(ClipEdit::Resize { id, edge, duration });
                }
            }
        }
        assert_no_overlaps(&reg, step);
    }
    assert!(!reg.is_empty(), "sequence never kept a clip");
}

// ── Persistence round-trip ─────────────────────────────────────

#[test]
fn registry_survives_json_round_trip() {
    let mut reg = ClipRegistry::new();
    let a = reg.add_clip(&image("a.png"));
    let v = reg.add_clip(&video("v.mp4"));
    reg.resolve_load(v, Ok(probe(8)));
    reg.apply(ClipEdit::Rotate { id: a });
    reg.add_layer();

    let json = serde_json::to_string(&reg).unwrap();
    let restored: ClipRegistry = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.len(), 2);
    assert_eq!(restored.layers().len(), 2);
    assert_eq!(restored.get(a).unwrap().rotation_degrees, 90.0);
    assert_eq!(restored.get(v).unwrap().duration, Time::from_secs(8));
    assert!(restored.get(v).unwrap().playable());
    assert_eq!(restored.max_extent(), reg.max_extent());
}
