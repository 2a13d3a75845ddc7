//! Overlay drawing straight into the colour buffer, without depth testing.

use super::framebuffer::FrameBuffer;
use crate::math::vec3::Vec3;

/// Draws a line between two points using Bresenham's line algorithm.
///
/// Bresenham's algorithm uses only integer arithmetic. It tracks an error
/// term: the distance between the ideal line and the current pixel. For each
/// step along the major axis it decides from the accumulated error whether to
/// also step along the minor axis.
///
/// Both endpoints are drawn. Pixels outside the buffer are skipped but still
/// walked, so use [`draw_segment`] for unbounded coordinates.
pub fn draw_line(buffer: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    // i64 so endpoints far apart cannot overflow the error term.
    let dx = (i64::from(x1) - i64::from(x0)).abs();
    let dy = (i64::from(y1) - i64::from(y0)).abs();

    // +1 or -1 so lines in every octant work.
    let x_incr_direction = if x0 < x1 { 1 } else { -1 };
    let y_incr_direction = if y0 < y1 { 1 } else { -1 };

    // Positive error favours x movement, negative favours y.
    let mut err = dx - dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        buffer.set_pixel(x, y, color);
        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += x_incr_direction;
        }
        // Both branches may fire, giving a diagonal step.
        if e2 < dx {
            err += dx;
            y += y_incr_direction;
        }
    }
}

/// Outline the inclusive pixel rectangle spanned by `min` and `max`.
pub fn draw_bounding_box(buffer: &mut FrameBuffer, min: (i32, i32), max: (i32, i32), color: u32) {
    let (x0, y0) = min;
    let (x1, y1) = max;
    draw_line(buffer, x0, y0, x1, y0, color);
    draw_line(buffer, x1, y0, x1, y1, color);
    draw_line(buffer, x1, y1, x0, y1, color);
    draw_line(buffer, x0, y1, x0, y0, color);
}

/// Liang-Barsky clip of the segment `from -> to` against the rectangle
/// `[min, max]`. `None` if nothing is left or an endpoint is not finite.
pub fn clip_segment(
    from: (f32, f32),
    to: (f32, f32),
    min: (f32, f32),
    max: (f32, f32),
) -> Option<((f32, f32), (f32, f32))> {
    if ![from.0, from.1, to.0, to.1].iter().all(|c| c.is_finite()) {
        return None;
    }

    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let (mut t0, mut t1) = (0.0f32, 1.0f32);

    for (p, q) in [
        (-dx, from.0 - min.0),
        (dx, max.0 - from.0),
        (-dy, from.1 - min.1),
        (dy, max.1 - from.1),
    ] {
        if p == 0.0 {
            // Parallel to this edge and outside it.
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        (from.0 + t0 * dx, from.1 + t0 * dy),
        (from.0 + t1 * dx, from.1 + t1 * dy),
    ))
}

/// Draw the part of a floating-point segment that lies inside the buffer.
pub fn draw_segment(buffer: &mut FrameBuffer, from: (f32, f32), to: (f32, f32), color: u32) {
    if buffer.width() == 0 || buffer.height() == 0 {
        return;
    }
    let max = (buffer.width() as f32 - 1.0, buffer.height() as f32 - 1.0);
    if let Some((a, b)) = clip_segment(from, to, (0.0, 0.0), max) {
        draw_line(buffer, a.0 as i32, a.1 as i32, b.0 as i32, b.1 as i32, color);
    }
}

/// Connect three screen-space points with lines. Only x and y are used.
pub fn draw_triangle_wireframe(buffer: &mut FrameBuffer, points: &[Vec3; 3], color: u32) {
    for i in 0..3 {
        let (a, b) = (points[i], points[(i + 1) % 3]);
        draw_segment(buffer, (a.x, a.y), (b.x, b.y), color);
    }
}
