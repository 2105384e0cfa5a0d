use rand::Rng;
use screenloc::{match_all, match_best, GrayImage};

fn make_source(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

fn extract_patch(
    image: &[u8],
    img_width: usize,
    x0: usize,
    y0: usize,
    width: usize,
    height: usize,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        let row = (y0 + y) * img_width;
        for x in 0..width {
            out.push(image[row + x0 + x]);
        }
    }
    out
}

#[test]
fn pipeline_finds_translation_match_small_image() {
    let img_width = 160;
    let img_height = 120;
    let x0 = 33;
    let y0 = 41;
    let tpl_width = 20;
    let tpl_height = 16;

    let source = make_source(img_width, img_height);
    let tpl_data = extract_patch(&source, img_width, x0, y0, tpl_width, tpl_height);

    let source_img = GrayImage::from_raw(source, img_width, img_height).unwrap();
    let template_img = GrayImage::from_raw(tpl_data, tpl_width, tpl_height).unwrap();

    let best = match_best(source_img.view(), template_img.view(), 0.9)
        .unwrap()
        .expect("expected a match");
    assert_eq!(best.x, x0 as i32);
    assert_eq!(best.y, y0 as i32);
    assert!(best.confidence > 0.99);
}

#[test]
fn pipeline_pyramid_path_locates_large_template_in_large_source() {
    // Both source and template exceed the pyramid trigger thresholds
    // (template >= 64px, source >= 256px on their shorter side).
    let img_width = 400;
    let img_height = 320;
    let tpl_width = 96;
    let tpl_height = 72;
    // Multiples of 4 keep the template's own 2-level downsample in phase with
    // the source's, so the coarsest pyramid level sees an exact sub-block.
    let x0 = 152;
    let y0 = 112;

    let source = make_source(img_width, img_height);
    let tpl_data = extract_patch(&source, img_width, x0, y0, tpl_width, tpl_height);

    let source_img = GrayImage::from_raw(source, img_width, img_height).unwrap();
    let template_img = GrayImage::from_raw(tpl_data, tpl_width, tpl_height).unwrap();

    let best = match_best(source_img.view(), template_img.view(), 0.9)
        .unwrap()
        .expect("expected a match");
    // Coarse-to-fine refinement should land exactly on the planted placement.
    assert_eq!(best.x, x0 as i32);
    assert_eq!(best.y, y0 as i32);
    assert!(best.confidence > 0.99);
}

#[test]
fn pipeline_multi_target_returns_all_tiles_in_descending_confidence() {
    let tile_width = 24;
    let tile_height = 24;
    let tile = make_source(tile_width, tile_height);

    let img_width = tile_width * 3;
    let img_height = tile_height * 2;
    let mut source = vec![0u8; img_width * img_height];
    let positions = [(0usize, 0usize), (tile_width, tile_height), (2 * tile_width, 0)];
    for &(px, py) in &positions {
        for y in 0..tile_height {
            for x in 0..tile_width {
                source[(py + y) * img_width + (px + x)] = tile[y * tile_width + x];
            }
        }
    }

    let source_img = GrayImage::from_raw(source, img_width, img_height).unwrap();
    let template_img = GrayImage::from_raw(tile, tile_width, tile_height).unwrap();

    let mut results = match_all(source_img.view(), template_img.view(), 0.95, 10).unwrap();
    assert_eq!(results.len(), positions.len());
    results.sort_by_key(|r| (r.y, r.x));
    let mut expected = positions;
    expected.sort();
    for (result, &(ex, ey)) in results.iter().zip(expected.iter()) {
        assert_eq!((result.x as usize, result.y as usize), (ex, ey));
        assert!(result.confidence > 0.99);
    }
}

#[test]
fn pipeline_threshold_filters_out_low_confidence_matches() {
    let img_width = 96;
    let img_height = 80;
    let tpl_width = 16;
    let tpl_height = 12;
    let x0 = 20;
    let y0 = 15;

    let source = make_source(img_width, img_height);
    let tpl_data = extract_patch(&source, img_width, x0, y0, tpl_width, tpl_height);
    let source_img = GrayImage::from_raw(source, img_width, img_height).unwrap();
    let template_img = GrayImage::from_raw(tpl_data, tpl_width, tpl_height).unwrap();

    // An unreasonably high threshold should still admit the exact placement...
    let found = match_best(source_img.view(), template_img.view(), 0.999_99).unwrap();
    assert!(found.is_some());

    // ...but a uniformly random, uncorrelated source should yield nothing.
    let mut rng = rand::rng();
    let random_source: Vec<u8> = (0..(img_width * img_height))
        .map(|_| rng.random())
        .collect();
    let random_img = GrayImage::from_raw(random_source, img_width, img_height).unwrap();
    let found = match_best(random_img.view(), template_img.view(), 0.9).unwrap();
    assert!(found.is_none());
}

#[test]
fn pipeline_is_invariant_to_uniform_brightness_shift() {
    let img_width = 64;
    let img_height = 64;
    let tpl_width = 12;
    let tpl_height = 10;
    let x0 = 9;
    let y0 = 4;

    let source = make_source(img_width, img_height);
    let tpl_data = extract_patch(&source, img_width, x0, y0, tpl_width, tpl_height);
    let template_img = GrayImage::from_raw(tpl_data, tpl_width, tpl_height).unwrap();

    let source_img = GrayImage::from_raw(source.clone(), img_width, img_height).unwrap();
    let baseline = match_best(source_img.view(), template_img.view(), 0.0)
        .unwrap()
        .unwrap();

    let shifted: Vec<u8> = source
        .iter()
        .map(|&v| (v as i32 + 50).clamp(0, 255) as u8)
        .collect();
    let shifted_img = GrayImage::from_raw(shifted, img_width, img_height).unwrap();
    let shifted_result = match_best(shifted_img.view(), template_img.view(), 0.0)
        .unwrap()
        .unwrap();

    assert_eq!(baseline.x, shifted_result.x);
    assert_eq!(baseline.y, shifted_result.y);
    assert!((baseline.confidence - shifted_result.confidence).abs() < 1e-3);
}

#[test]
fn pipeline_is_invariant_to_positive_contrast_scaling() {
    let img_width = 64;
    let img_height = 64;
    let tpl_width = 12;
    let tpl_height = 10;
    let x0 = 9;
    let y0 = 4;

    // Keep values in a mid-range band so a 1.2x scale stays clear of
    // saturation at both ends.
    let mut source = Vec::with_capacity(img_width * img_height);
    for y in 0..img_height {
        for x in 0..img_width {
            let value = 80 + (((x * 13) ^ (y * 7) ^ (x * y)) % 80);
            source.push(value as u8);
        }
    }
    let tpl_data = extract_patch(&source, img_width, x0, y0, tpl_width, tpl_height);
    let template_img = GrayImage::from_raw(tpl_data, tpl_width, tpl_height).unwrap();

    let source_img = GrayImage::from_raw(source.clone(), img_width, img_height).unwrap();
    let baseline = match_best(source_img.view(), template_img.view(), 0.0)
        .unwrap()
        .unwrap();

    let scaled: Vec<u8> = source
        .iter()
        .map(|&v| (v as f64 * 1.2).round().clamp(0.0, 255.0) as u8)
        .collect();
    let scaled_img = GrayImage::from_raw(scaled, img_width, img_height).unwrap();
    let scaled_result = match_best(scaled_img.view(), template_img.view(), 0.0)
        .unwrap()
        .unwrap();

    assert_eq!(baseline.x, scaled_result.x);
    assert_eq!(baseline.y, scaled_result.y);
    assert!((baseline.confidence - scaled_result.confidence).abs() < 1e-3);
}

#[test]
fn match_best_agrees_with_first_of_match_all() {
    let img_width = 96;
    let img_height = 80;
    let tpl_width = 16;
    let tpl_height = 12;
    let x0 = 20;
    let y0 = 15;

    let source = make_source(img_width, img_height);
    let tpl_data = extract_patch(&source, img_width, x0, y0, tpl_width, tpl_height);
    let source_img = GrayImage::from_raw(source, img_width, img_height).unwrap();
    let template_img = GrayImage::from_raw(tpl_data, tpl_width, tpl_height).unwrap();

    let best = match_best(source_img.view(), template_img.view(), 0.5)
        .unwrap()
        .expect("expected a match");
    let all = match_all(source_img.view(), template_img.view(), 0.5, 1).unwrap();

    assert_eq!(all.len(), 1);
    assert_eq!(best, all[0]);
}
