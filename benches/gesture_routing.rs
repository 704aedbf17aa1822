// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the input path of the map viewer.
//!
//! Measures:
//! - Pointer drag routing (press, moves, release)
//! - Wheel zoom around the pointer
//! - Marker hit testing against a dense scene

use criterion::{criterion_group, criterion_main, Criterion};
use iced::{Point, Size};
use soundmap::config::ViewerConfig;
use soundmap::scene::{hit_test, MarkerSource, MarkerId, PlacedMarker};
use soundmap::ui::state::ViewportState;
use soundmap::ui::viewer::{gesture, Message};
use std::hint::black_box;
use std::path::Path;

const WINDOW: Size = Size::new(1280.0, 800.0);
const MAP: Size = Size::new(4000.0, 3000.0);

fn viewport() -> (ViewportState, gesture::State) {
    let settings = ViewerConfig::default().settings();
    let mut viewport = ViewportState::new(&settings, MAP);
    let mut router = gesture::State::new(&settings);
    let _ = router.handle(&mut viewport, Message::Resized(WINDOW));
    (viewport, router)
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_routing");

    group.bench_function("drag_100_moves", |b| {
        b.iter(|| {
            let (mut viewport, mut router) = viewport();
            let _ = router.handle(&mut viewport, Message::ZoomIn);
            let _ = router.handle(&mut viewport, Message::PointerPressed(Point::new(600.0, 400.0)));
            for step in 0..100u16 {
                let position = Point::new(600.0 - f32::from(step), 400.0 + f32::from(step) * 0.5);
                black_box(router.handle(&mut viewport, Message::PointerMoved(position)));
            }
            black_box(router.handle(&mut viewport, Message::PointerReleased))
        });
    });

    group.bench_function("wheel_zoom_in_out", |b| {
        b.iter(|| {
            let (mut viewport, mut router) = viewport();
            for delta_y in [1.0, 1.0, 1.0, -1.0, -1.0, -1.0] {
                black_box(router.handle(
                    &mut viewport,
                    Message::WheelScrolled {
                        position: Point::new(900.0, 300.0),
                        delta_y,
                    },
                ));
            }
            viewport.scale()
        });
    });

    group.finish();
}

/// Benchmark hit testing against a 20x20 grid of interactive markers.
fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_routing");
    let (viewport, _) = viewport();

    let markers: Vec<PlacedMarker> = (0..400)
        .map(|index| {
            let source = MarkerSource {
                x: (index % 20) as f32 / 20.0 + 0.025,
                y: (index / 20) as f32 / 20.0 + 0.025,
                audio: Some(format!("track{index}.ogg")),
                ..MarkerSource::default()
            };
            PlacedMarker {
                id: MarkerId(index),
                anchor: Point::new(source.x, source.y),
                title: None,
                icon: None,
                icon_size: soundmap::scene::marker::fallback_icon_size(),
                descriptor: source.resolve(MarkerId(index), Path::new("/scene")),
            }
        })
        .collect();

    group.bench_function("hit_test_400_markers", |b| {
        b.iter(|| {
            let hit = hit_test(&markers, &viewport, black_box(Point::new(640.0, 400.0)));
            black_box(hit.map(|marker| marker.id))
        });
    });

    group.bench_function("hit_test_miss", |b| {
        b.iter(|| black_box(hit_test(&markers, &viewport, black_box(Point::new(1.0, 1.0)))).is_some());
    });

    group.finish();
}

criterion_group!(benches, bench_drag, bench_hit_test);
criterion_main!(benches);
