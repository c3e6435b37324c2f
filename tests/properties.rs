//! Property-based tests for the segmenter.
//!
//! Random two-colour grids exercise idempotence, determinism, border
//! reachability and the blob size rules.

use std::collections::VecDeque;

use matte::{
    segment, Colour, Coord, Metric, PixelGrid, ReferenceColor, SeedStrategy, SegmentConfig,
};
use proptest::prelude::*;

/// Strategy for small grids of white background and dark foreground.
fn two_tone_grid() -> impl Strategy<Value = PixelGrid> {
    (1u32..=16, 1u32..=16).prop_flat_map(|(w, h)| {
        proptest::collection::vec(prop::bool::weighted(0.35), (w * h) as usize).prop_map(
            move |dark| {
                let pixels = dark
                    .into_iter()
                    .map(|d| if d { Colour::rgb(20, 20, 30) } else { Colour::WHITE })
                    .collect();
                PixelGrid::from_pixels(w, h, pixels).unwrap()
            },
        )
    })
}

fn config_strategy() -> impl Strategy<Value = SegmentConfig> {
    (
        prop_oneof![Just(Metric::Euclidean), Just(Metric::PerChannel)],
        prop_oneof![Just(SeedStrategy::Corners), Just(SeedStrategy::Border)],
        0.0f64..=0.2,
        any::<bool>(),
    )
        .prop_map(|(metric, seeds, area_ratio, interior)| {
            SegmentConfig::default()
                .with_reference(ReferenceColor::White)
                .with_metric(metric)
                .with_tolerance(40)
                .with_area_ratio(area_ratio)
                .with_seeds(seeds)
                .with_interior_pass(interior)
        })
}

/// Pixels 4-connected to a corner through white pixels.
fn reachable_from_corners(grid: &PixelGrid) -> Vec<Coord> {
    let mut seen = vec![false; grid.area()];
    let mut queue: VecDeque<Coord> = VecDeque::new();
    let mut out = Vec::new();
    for c in grid.corners() {
        if grid.get(c) == Some(Colour::WHITE) {
            if let Some(i) = grid.index(c) {
                if !seen[i] {
                    seen[i] = true;
                    queue.push_back(c);
                }
            }
        }
    }
    while let Some(c) = queue.pop_front() {
        out.push(c);
        for n in c.neighbours() {
            if let Some(i) = grid.index(n) {
                if !seen[i] && grid.get(n) == Some(Colour::WHITE) {
                    seen[i] = true;
                    queue.push_back(n);
                }
            }
        }
    }
    out
}

proptest! {
    #[test]
    fn segmenting_twice_changes_nothing(grid in two_tone_grid(), config in config_strategy()) {
        let mut once = grid;
        segment(&mut once, &config).unwrap();
        let mut twice = once.clone();
        let report = segment(&mut twice, &config).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(report.removed_pixels(), 0);
    }

    #[test]
    fn segmentation_is_deterministic(grid in two_tone_grid(), config in config_strategy()) {
        let mut a = grid.clone();
        let mut b = grid;
        let report_a = segment(&mut a, &config).unwrap();
        let report_b = segment(&mut b, &config).unwrap();
        prop_assert_eq!(a, b);
        prop_assert_eq!(report_a, report_b);
    }

    #[test]
    fn corner_reachable_background_is_cleared(grid in two_tone_grid(), config in config_strategy()) {
        let reachable = reachable_from_corners(&grid);
        let mut out = grid;
        segment(&mut out, &config).unwrap();
        for c in reachable {
            prop_assert_eq!(out.get(c).map(|p| p.a), Some(0));
        }
    }

    #[test]
    fn foreground_is_never_removed(grid in two_tone_grid(), config in config_strategy()) {
        let mut out = grid.clone();
        segment(&mut out, &config).unwrap();
        for (before, after) in grid.pixels().iter().zip(out.pixels()) {
            if *before != Colour::WHITE {
                prop_assert_eq!(before, after);
            }
            prop_assert_eq!(before.channels(), after.channels());
        }
    }

    #[test]
    fn kept_blobs_are_small_and_enclosed(grid in two_tone_grid(), config in config_strategy()) {
        let area = grid.area() as f64;
        let mut out = grid;
        let report = segment(&mut out, &config).unwrap();
        for blob in report.blobs.iter().filter(|b| !b.removed()) {
            prop_assert!(!blob.touches_edge);
            prop_assert!(blob.size as f64 <= config.area_ratio * area);
        }
    }
}
