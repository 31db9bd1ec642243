use image::{Rgba, RgbaImage};

use crate::types::Frame;

// Logical coordinate space: the full signed 16-bit range per axis.
const LOGICAL_EXTENT: f64 = 65536.0;
const LOGICAL_CENTER: f64 = 32768.0;

/// Background of rasterized frames: opaque black, the unlit room the
/// laser draws in.
pub const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Maps a logical coordinate pair onto pixel space for the given
/// canvas size. The origin moves to the canvas center and the y axis
/// flips, since logical y grows upward while screen y grows downward.
///
/// The far logical corners land exactly on the canvas edge
/// (column `width`, row `height`); the plot routine clips those.
pub fn project(x: i16, y: i16, width: u32, height: u32) -> (f64, f64) {
    let px = (x as f64 + LOGICAL_CENTER) * (width as f64 / LOGICAL_EXTENT);
    let py = (LOGICAL_CENTER - y as f64) * (height as f64 / LOGICAL_EXTENT);
    (px, py)
}

impl Frame {
    /// Rasterizes the frame onto a `width` x `height` canvas.
    ///
    /// Records are walked in path order, each paired with its
    /// predecessor: a record with the last flag stops the walk, a
    /// blanked record advances the beam without drawing, any other
    /// record draws a segment from the previous record's position in
    /// the record's own color. The first record only ever seeds the
    /// beam position. Z is carried in the data model but unused here.
    ///
    /// Segments are one pixel wide with no anti-aliasing; endpoints
    /// round to the nearest pixel.
    pub fn to_rgba8(&self, width: u32, height: u32) -> RgbaImage {
        let mut image = RgbaImage::from_pixel(width, height, BACKGROUND);

        for (prev, rec) in self.records.iter().zip(self.records.iter().skip(1)) {
            if rec.last() {
                break;
            }
            if rec.blank() {
                continue;
            }
            draw_segment(
                &mut image,
                project(prev.x, prev.y, width, height),
                project(rec.x, rec.y, width, height),
                Rgba([rec.r, rec.g, rec.b, 255]),
            );
        }

        image
    }
}

/// Plots a straight segment with integer Bresenham stepping. Pixels
/// falling outside the canvas are dropped.
fn draw_segment(image: &mut RgbaImage, from: (f64, f64), to: (f64, f64), color: Rgba<u8>) {
    let (mut x, mut y) = (from.0.round() as i64, from.1.round() as i64);
    let (x1, y1) = (to.0.round() as i64, to.1.round() as i64);

    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let step_x = if x < x1 { 1 } else { -1 };
    let step_y = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
            image.put_pixel(x as u32, y as u32, color);
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += step_x;
        }
        if e2 <= dx {
            err += dx;
            y += step_y;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::{Format, Record, STATUS_BLANK, STATUS_LAST};

    fn point(x: i16, y: i16, color: [u8; 3], status: u8) -> Record {
        Record {
            x,
            y,
            z: 0,
            r: color[0],
            g: color[1],
            b: color[2],
            status,
        }
    }

    fn frame(records: Vec<Record>) -> Frame {
        Frame {
            format: Format::Indexed3d,
            frame_name: String::new(),
            company_name: String::new(),
            records,
        }
    }

    fn count_non_background(image: &RgbaImage) -> usize {
        image.pixels().filter(|&&p| p != BACKGROUND).count()
    }

    const RED: [u8; 3] = [255, 0, 0];
    const GREEN: [u8; 3] = [0, 255, 0];
    const BLUE: [u8; 3] = [0, 0, 255];

    #[test]
    fn projection_centers_and_flips_y() {
        // bottom-left logical corner lands on the left edge, off the
        // bottom of the canvas by exactly the edge row
        assert_eq!(project(-32768, -32768, 512, 512), (0.0, 512.0));

        let (px, py) = project(32767, 32767, 512, 512);
        assert!(px > 511.0 && px < 512.0);
        assert!(py > 0.0 && py < 1.0);

        // the logical origin is the canvas center
        assert_eq!(project(0, 0, 512, 512), (256.0, 256.0));
    }

    #[test]
    fn empty_frame_is_all_background() {
        let image = frame(vec![]).to_rgba8(16, 16);
        assert_eq!(image.dimensions(), (16, 16));
        assert_eq!(count_non_background(&image), 0);
    }

    #[test]
    fn single_record_draws_nothing() {
        let image = frame(vec![point(0, 0, RED, 0)]).to_rgba8(64, 64);
        assert_eq!(count_non_background(&image), 0);
    }

    #[test]
    fn draws_segments_in_destination_color() {
        // (-30000, 30000) -> (3, 3) on a 64x64 canvas, and so on
        let image = frame(vec![
            point(-30000, 30000, BLUE, 0),
            point(30000, 30000, RED, 0),
            point(30000, -30000, GREEN, 0),
        ])
        .to_rgba8(64, 64);

        // horizontal run at row 3 takes the destination's red, not the
        // start point's blue; the shared corner is repainted green
        assert_eq!(*image.get_pixel(3, 3), Rgba([255, 0, 0, 255]));
        assert_eq!(*image.get_pixel(32, 3), Rgba([255, 0, 0, 255]));
        assert_eq!(*image.get_pixel(61, 3), Rgba([0, 255, 0, 255]));
        assert_eq!(*image.get_pixel(61, 32), Rgba([0, 255, 0, 255]));
        assert_eq!(*image.get_pixel(61, 61), Rgba([0, 255, 0, 255]));

        // two axis-aligned runs of 59 pixels sharing one corner
        assert_eq!(count_non_background(&image), 59 + 59 - 1);
    }

    #[test]
    fn blank_record_moves_the_beam_without_drawing() {
        // draw nothing into the blanked point, then draw from the
        // blanked point's position, not from the first record
        let image = frame(vec![
            point(-30000, 30000, RED, 0),
            point(-30000, -30000, RED, STATUS_BLANK),
            point(30000, -30000, RED, 0),
        ])
        .to_rgba8(64, 64);

        // only the bottom run exists
        assert_eq!(*image.get_pixel(3, 61), Rgba([255, 0, 0, 255]));
        assert_eq!(*image.get_pixel(61, 61), Rgba([255, 0, 0, 255]));
        // the blanked segment down the left edge was skipped
        assert_eq!(*image.get_pixel(3, 3), BACKGROUND);
        assert_eq!(*image.get_pixel(3, 32), BACKGROUND);
        // and no diagonal from the first record either
        assert_eq!(*image.get_pixel(32, 32), BACKGROUND);

        assert_eq!(count_non_background(&image), 59);
    }

    #[test]
    fn last_record_stops_the_walk() {
        let image = frame(vec![
            point(-30000, 30000, RED, 0),
            point(30000, 30000, RED, 0),
            point(30000, -30000, BLUE, STATUS_LAST),
            point(-30000, -30000, BLUE, 0),
        ])
        .to_rgba8(64, 64);

        // one segment before the sentinel, nothing at or after it
        assert_eq!(count_non_background(&image), 59);
        assert!(image.pixels().all(|&p| p != Rgba([0, 0, 255, 255])));
    }

    #[test]
    fn sentinel_right_after_start_draws_nothing() {
        let image = frame(vec![
            point(-30000, 30000, RED, 0),
            point(30000, 30000, RED, STATUS_LAST),
        ])
        .to_rgba8(64, 64);
        assert_eq!(count_non_background(&image), 0);
    }

    #[test]
    fn edge_corner_pixels_are_clipped() {
        // both endpoints project onto the far canvas edge; nothing to
        // paint, nothing to panic about
        let image = frame(vec![
            point(-32768, -32768, RED, 0),
            point(32767, -32768, RED, 0),
        ])
        .to_rgba8(64, 64);
        assert_eq!(count_non_background(&image), 0);
    }
}
