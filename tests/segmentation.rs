//! End-to-end segmentation scenarios on small synthetic grids.

use matte::{
    segment, Colour, Coord, Metric, Preset, ReferenceColor, SegmentConfig, SheetCompositor,
    SheetConfig, CellSize, PixelGrid, Verdict,
};
use pretty_assertions::assert_eq;

fn alpha(grid: &PixelGrid, x: u32, y: u32) -> u8 {
    grid.get(Coord::new(x, y)).map(|p| p.a).unwrap_or_default()
}

fn per_channel(area_ratio: f64) -> SegmentConfig {
    SegmentConfig::default()
        .with_reference(ReferenceColor::White)
        .with_metric(Metric::PerChannel)
        .with_tolerance(65)
        .with_area_ratio(area_ratio)
}

/// Draw a filled rectangle, inclusive of both corners.
fn fill_rect(grid: &mut PixelGrid, x0: u32, y0: u32, x1: u32, y1: u32, colour: Colour) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            grid.set(Coord::new(x, y), colour);
        }
    }
}

#[test]
fn black_square_on_white() {
    let mut grid = PixelGrid::filled(10, 10, Colour::WHITE);
    fill_rect(&mut grid, 4, 4, 5, 5, Colour::BLACK);

    segment(&mut grid, &per_channel(0.5)).unwrap();

    assert_eq!(grid.transparent_count(), 96);
    for (x, y) in [(4, 4), (5, 4), (4, 5), (5, 5)] {
        assert_eq!(alpha(&grid, x, y), 255);
    }
}

#[test]
fn lone_enclosed_white_pixel_is_kept() {
    let mut grid = PixelGrid::filled(10, 10, Colour::WHITE);
    for n in Coord::new(5, 5).neighbours() {
        grid.set(n, Colour::BLACK);
    }

    let report = segment(&mut grid, &per_channel(0.05)).unwrap();

    assert_eq!(alpha(&grid, 5, 5), 255);
    assert_eq!(report.blobs.len(), 1);
    assert_eq!(report.blobs[0].size, 1);
    assert_eq!(report.blobs[0].verdict, Verdict::Kept);
    // Everything else that is white is gone.
    assert_eq!(grid.transparent_count(), 100 - 4 - 1);
}

#[test]
fn bowstring_loop_hole_removed_when_large() {
    // 20x20 white with a black 10x10 outline; the 8x8 hole inside is 64 px.
    let mut grid = PixelGrid::filled(20, 20, Colour::WHITE);
    fill_rect(&mut grid, 5, 5, 14, 14, Colour::BLACK);
    fill_rect(&mut grid, 6, 6, 13, 13, Colour::WHITE);

    // Limit 0.1 * 400 = 40 < 64.
    let report = segment(&mut grid, &per_channel(0.1)).unwrap();
    assert_eq!(alpha(&grid, 9, 9), 0);
    assert_eq!(report.removed_count(), 1);

    // Limit 0.2 * 400 = 80 > 64.
    let mut grid = PixelGrid::filled(20, 20, Colour::WHITE);
    fill_rect(&mut grid, 5, 5, 14, 14, Colour::BLACK);
    fill_rect(&mut grid, 6, 6, 13, 13, Colour::WHITE);
    segment(&mut grid, &per_channel(0.2)).unwrap();
    assert_eq!(alpha(&grid, 9, 9), 255);
}

#[test]
fn exact_size_override_removes_known_artifact() {
    let mut grid = PixelGrid::filled(12, 12, Colour::WHITE);
    fill_rect(&mut grid, 3, 3, 8, 8, Colour::BLACK);
    // 3x3 hole: 9 pixels, well under the 0.5 ratio limit.
    fill_rect(&mut grid, 4, 4, 6, 6, Colour::WHITE);

    let mut kept = grid.clone();
    segment(&mut kept, &per_channel(0.5)).unwrap();
    assert_eq!(alpha(&kept, 5, 5), 255);

    segment(&mut grid, &per_channel(0.5).with_size_overrides([9])).unwrap();
    assert_eq!(alpha(&grid, 5, 5), 0);
}

#[test]
fn pixels_within_tolerance_join_the_background() {
    let mut grid = PixelGrid::filled(6, 6, Colour::WHITE);
    // Off-white noise next to the border is still background.
    grid.set(Coord::new(1, 1), Colour::rgb(230, 240, 250));
    // Light grey outside per-channel 65 survives.
    grid.set(Coord::new(3, 3), Colour::rgb(180, 180, 180));

    segment(&mut grid, &per_channel(0.5)).unwrap();
    assert_eq!(alpha(&grid, 1, 1), 0);
    assert_eq!(alpha(&grid, 3, 3), 255);
}

#[test]
fn magenta_key_sampled_from_corner() {
    let key = Colour::rgb(250, 10, 245);
    let mut grid = PixelGrid::filled(8, 8, key);
    fill_rect(&mut grid, 2, 2, 5, 5, Colour::rgb(40, 60, 200));
    // Compression-polluted magenta in the background.
    grid.set(Coord::new(7, 0), Colour::rgb(220, 40, 230));

    segment(&mut grid, &SegmentConfig::preset(Preset::Sprite)).unwrap();
    assert_eq!(grid.transparent_count(), 64 - 16);
}

#[test]
fn global_preset_removes_every_match() {
    let mut grid = PixelGrid::filled(9, 9, Colour::MAGENTA);
    fill_rect(&mut grid, 2, 2, 6, 6, Colour::BLACK);
    grid.set(Coord::new(4, 4), Colour::MAGENTA);

    let report = segment(&mut grid, &SegmentConfig::preset(Preset::Global)).unwrap();
    assert_eq!(alpha(&grid, 4, 4), 0);
    assert_eq!(report.kept_count(), 0);
}

#[test]
fn portrait_preset_keeps_eye_highlights() {
    let mut grid = PixelGrid::filled(40, 40, Colour::rgb(250, 250, 250));
    fill_rect(&mut grid, 10, 10, 29, 29, Colour::rgb(200, 150, 120));
    // Two 2x2 highlights inside the face.
    fill_rect(&mut grid, 14, 14, 15, 15, Colour::WHITE);
    fill_rect(&mut grid, 24, 14, 25, 15, Colour::WHITE);

    let report = segment(&mut grid, &SegmentConfig::preset(Preset::Portrait)).unwrap();
    assert_eq!(alpha(&grid, 14, 14), 255);
    assert_eq!(alpha(&grid, 25, 15), 255);
    assert_eq!(alpha(&grid, 0, 0), 0);
    assert_eq!(report.kept_count(), 2);
}

#[test]
fn stitched_sheet_is_clean_and_aligned() {
    let mut frames = Vec::new();
    for shade in [0u8, 80] {
        let mut frame = PixelGrid::filled(8, 8, Colour::WHITE);
        fill_rect(&mut frame, 2, 2, 5, 5, Colour::rgb(shade, shade, shade));
        segment(&mut frame, &per_channel(0.5)).unwrap();
        frames.push(frame);
    }

    let compositor = SheetCompositor::new(SheetConfig {
        cell: CellSize::new(16, 16),
        gap: 4,
        cleanup: Some(SegmentConfig::preset(Preset::Sheet)),
    })
    .unwrap();
    let sheet = compositor.compose(&frames).unwrap();

    assert_eq!(sheet.grid.size(), (36, 16));
    // Frame 1 body scaled to 8x8 starting at x = 20 + 4.
    assert_eq!(alpha(&sheet.grid, 24, 4), 255);
    assert_eq!(alpha(&sheet.grid, 20, 0), 0);
    assert_eq!(sheet.grid.transparent_count(), 36 * 16 - 2 * 64);
    // Frames were already clean, so the sheet pass found nothing.
    assert_eq!(sheet.cleanup.map(|r| r.removed_pixels()), Some(0));
}

#[test]
fn sheet_cleanup_reaches_every_frame() {
    let frames: Vec<PixelGrid> = (0..3)
        .map(|_| {
            let mut frame = PixelGrid::filled(8, 8, Colour::WHITE);
            frame.set(Coord::new(4, 4), Colour::BLACK);
            frame
        })
        .collect();

    let compositor = SheetCompositor::new(SheetConfig {
        cell: CellSize::new(8, 8),
        gap: 4,
        cleanup: Some(SegmentConfig::preset(Preset::Sheet)),
    })
    .unwrap();
    let sheet = compositor.compose(&frames).unwrap();

    assert_eq!(sheet.grid.size(), (32, 8));
    for x in [0, 12, 24] {
        assert_eq!(alpha(&sheet.grid, x, 0), 0);
        assert_eq!(alpha(&sheet.grid, x + 4, 4), 255);
    }
    // Only the three dots stay opaque.
    assert_eq!(sheet.grid.transparent_count(), 32 * 8 - 3);
}
