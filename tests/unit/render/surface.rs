use super::*;

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

fn split_image(w: u32, h: u32) -> PreparedImage {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for _y in 0..h {
        for x in 0..w {
            data.extend_from_slice(if x < w / 2 { &RED } else { &BLUE });
        }
    }
    PreparedImage::from_premul(w, h, data).unwrap()
}

fn canvas(width: u32, height: u32) -> Canvas {
    Canvas { width, height }
}

#[test]
fn new_surface_is_cleared() {
    let s = Surface::new(canvas(3, 2), BLACK);
    assert_eq!(s.data().len(), 3 * 2 * 4);
    assert!(s.data().chunks_exact(4).all(|p| p == BLACK));
    assert_eq!(s.pixel(3, 0), None);
}

#[test]
fn cover_draw_crops_center_of_wide_image() {
    // 4x2 image onto a 2x2 surface: scale 1, one column cropped on each side.
    let mut s = Surface::new(canvas(2, 2), BLACK);
    let fit = s.draw_cover(&split_image(4, 2)).unwrap();
    assert_eq!(fit.scale, 1.0);
    assert_eq!(fit.dest.x0, -1.0);
    assert_eq!(s.pixel(0, 0), Some(RED));
    assert_eq!(s.pixel(1, 0), Some(BLUE));
    assert_eq!(s.pixel(0, 1), Some(RED));
    assert_eq!(s.pixel(1, 1), Some(BLUE));
}

#[test]
fn upscaled_solid_image_fills_surface() {
    let solid = PreparedImage::from_premul(1, 1, vec![10, 20, 30, 255]).unwrap();
    let mut s = Surface::new(canvas(5, 3), BLACK);
    s.draw_cover(&solid).unwrap();
    assert!(s.data().chunks_exact(4).all(|p| p == [10, 20, 30, 255]));
}

#[test]
fn translucent_image_composites_over_clear_color() {
    // 50% white (premultiplied) over opaque black.
    let half = PreparedImage::from_premul(1, 1, vec![128, 128, 128, 128]).unwrap();
    let mut s = Surface::new(canvas(1, 1), BLACK);
    s.draw_cover(&half).unwrap();
    assert_eq!(s.pixel(0, 0), Some([128, 128, 128, 255]));
}

#[test]
fn resize_clears_only_on_change() {
    let solid = PreparedImage::from_premul(1, 1, vec![1, 2, 3, 255]).unwrap();
    let mut s = Surface::new(canvas(2, 2), BLACK);
    s.draw_cover(&solid).unwrap();

    assert!(!s.resize(canvas(2, 2)));
    assert_eq!(s.pixel(0, 0), Some([1, 2, 3, 255]));

    assert!(s.resize(canvas(4, 1)));
    assert_eq!(s.canvas(), canvas(4, 1));
    assert_eq!(s.data().len(), 16);
    assert_eq!(s.pixel(3, 0), Some(BLACK));
}

#[test]
fn save_png_round_trips_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("frame.png");
    let mut s = Surface::new(canvas(6, 4), BLACK);
    s.draw_cover(&split_image(2, 2)).unwrap();
    s.save_png(&out).unwrap();

    let img = image::open(&out).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (6, 4));
    assert_eq!(img.get_pixel(0, 0).0, RED);
    assert_eq!(img.get_pixel(5, 3).0, BLUE);
}
