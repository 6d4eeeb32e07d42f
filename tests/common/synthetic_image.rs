use stroke_trajectory::image::BinaryMask;

pub const PAPER: u8 = 245;
pub const INK: u8 = 20;

/// Light canvas with dark ink wherever `ink(x, y)` holds.
pub fn canvas_u8(width: usize, height: usize, ink: impl Fn(usize, usize) -> bool) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut img = vec![PAPER; width * height];
    for y in 0..height {
        for x in 0..width {
            if ink(x, y) {
                img[y * width + x] = INK;
            }
        }
    }
    img
}

/// Axis-aligned rectangle `[x0, x1) × [y0, y1)`.
pub fn in_rect(x: usize, y: usize, x0: usize, y0: usize, x1: usize, y1: usize) -> bool {
    (x0..x1).contains(&x) && (y0..y1).contains(&y)
}

/// Annulus centered at `(cx, cy)` with radii `r_in..=r_out`.
pub fn in_ring(x: usize, y: usize, cx: f64, cy: f64, r_in: f64, r_out: f64) -> bool {
    let dx = x as f64 - cx;
    let dy = y as f64 - cy;
    let r2 = dx * dx + dy * dy;
    r2 >= r_in * r_in && r2 <= r_out * r_out
}

/// Horizontal wedge from `x0` to `x1` whose height grows linearly from
/// `h0` to `h1` around row `cy`.
pub fn in_wedge(x: usize, y: usize, x0: usize, x1: usize, cy: f64, h0: f64, h1: f64) -> bool {
    if !(x0..x1).contains(&x) {
        return false;
    }
    let t = (x - x0) as f64 / (x1 - x0) as f64;
    let half = 0.5 * (h0 + t * (h1 - h0));
    (y as f64 - cy).abs() <= half
}

/// Two dark bars side by side, well separated.
pub fn two_bars_u8(width: usize, height: usize) -> Vec<u8> {
    canvas_u8(width, height, |x, y| {
        in_rect(x, y, 10, 10, 60, 16) || in_rect(x, y, 10, 40, 70, 48)
    })
}

/// Plus sign drawn with one-pixel lines: a skeleton with a single branch.
pub fn plus_mask(size: usize) -> BinaryMask {
    let c = size / 2;
    BinaryMask::from_fn(size, size, |x, y| {
        (x == c && (2..size - 2).contains(&y)) || (y == c && (2..size - 2).contains(&x))
    })
}
