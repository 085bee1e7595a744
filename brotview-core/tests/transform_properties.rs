use brotview_core::{iterate, pixel_to_complex, Mandelbrot, Membership, ViewState};

const WIDTH: u32 = 480;
const HEIGHT: u32 = 272;

/// Classify every pixel of a view and collect results into a flat Vec.
fn classify_grid(
    mandelbrot: &Mandelbrot,
    view: &ViewState,
    width: u32,
    height: u32,
) -> Vec<Membership> {
    let mut results = Vec::with_capacity((width * height) as usize);
    for row in 0..height {
        for col in 0..width {
            results.push(mandelbrot.classify(view.pixel_to_complex(col, row, width, height)));
        }
    }
    results
}

#[test]
fn screen_center_is_origin_and_interior() {
    let view = ViewState::default();
    let c = pixel_to_complex(240, 136, WIDTH, HEIGHT, &view);
    assert_eq!(c.re, 0.0);
    assert_eq!(c.im, 0.0);
    assert_eq!(iterate(c, 200), 200);
    assert_eq!(Mandelbrot::default().classify(c), Membership::Interior);
}

#[test]
fn top_left_pixel_escapes_quickly() {
    let view = ViewState::default();
    let c = pixel_to_complex(0, 0, WIDTH, HEIGHT, &view);
    assert!((c.re - (-2.0)).abs() < 1e-12);
    assert!((c.im - (-136.0 * 4.0 / 480.0)).abs() < 1e-12);
    assert!((c.im - (-1.1333)).abs() < 1e-4);

    let count = iterate(c, 200);
    assert!(count < 5, "(-2, -1.13) should escape within a few steps, took {count}");
    assert_eq!(Mandelbrot::default().classify(c), Membership::Escaped);
}

#[test]
fn transform_is_linear_in_column_and_row() {
    let view = ViewState::new(-0.3, 0.7, 0.25).unwrap();
    let origin = view.pixel_to_complex(0, 0, WIDTH, HEIGHT);
    let step_re = view.pixel_to_complex(1, 0, WIDTH, HEIGHT).re - origin.re;
    let step_im = view.pixel_to_complex(0, 1, WIDTH, HEIGHT).im - origin.im;

    // Square pixels: both steps use the width as divisor.
    assert!((step_re - step_im).abs() < 1e-15);

    for (col, row) in [(17, 3), (240, 136), (479, 271), (100, 250)] {
        let c = view.pixel_to_complex(col, row, WIDTH, HEIGHT);
        assert!((c.re - (origin.re + col as f64 * step_re)).abs() < 1e-12);
        assert!((c.im - (origin.im + row as f64 * step_im)).abs() < 1e-12);
    }
}

#[test]
fn transform_is_deterministic() {
    let view = ViewState::new(0.1, -0.2, 3.0).unwrap();
    for (col, row) in [(0, 0), (5, 9), (479, 271)] {
        assert_eq!(
            view.pixel_to_complex(col, row, WIDTH, HEIGHT),
            view.pixel_to_complex(col, row, WIDTH, HEIGHT)
        );
    }
}

#[test]
fn default_frame_has_both_classes() {
    let results = classify_grid(&Mandelbrot::default(), &ViewState::default(), 96, 54);
    let interior = results.iter().filter(|m| **m == Membership::Interior).count();
    let escaped = results.len() - interior;
    assert!(interior > 0, "should have some interior points");
    assert!(escaped > 0, "should have some escaped points");
}
