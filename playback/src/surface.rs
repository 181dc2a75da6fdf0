pub type Rgba = [u8; 4];

/// 2-D drawing primitives the renderer needs from its host, in pixel units.
pub trait Surface {
    fn begin_path(&mut self);
    fn move_to(&mut self, x: u32, y: u32);
    fn line_to(&mut self, x: u32, y: u32);
    /// Draws every segment of the current path, one pixel wide.
    fn stroke(&mut self, color: Rgba);
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Segment {
    from: (u32, u32),
    to: (u32, u32),
}

/// [`Surface`] over a row-major RGBA8 frame, such as the one `pixels` exposes.
/// Drawing outside the frame is clipped.
pub struct RgbaSurface<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
    path: Vec<Segment>,
    cursor: (u32, u32),
}

impl<'a> RgbaSurface<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        debug_assert_eq!(frame.len(), 4 * width as usize * height as usize);
        Self {
            frame,
            width,
            height,
            path: vec![],
            cursor: (0, 0),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.pixel_offset(x, y).map(|offset| {
            let mut rgba = [0; 4];
            rgba.copy_from_slice(&self.frame[offset..offset + 4]);
            rgba
        })
    }

    fn pixel_offset(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(4 * (y as usize * self.width as usize + x as usize))
        } else {
            None
        }
    }

    fn set_pixel(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(offset) = self.pixel_offset(x as u32, y as u32) {
            self.frame[offset..offset + 4].copy_from_slice(&color);
        }
    }

    // Bresenham, endpoints inclusive.
    fn draw_segment(&mut self, segment: Segment, color: Rgba) {
        let (mut x, mut y) = (segment.from.0 as i64, segment.from.1 as i64);
        let (x1, y1) = (segment.to.0 as i64, segment.to.1 as i64);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

impl Surface for RgbaSurface<'_> {
    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: u32, y: u32) {
        self.cursor = (x, y);
    }

    fn line_to(&mut self, x: u32, y: u32) {
        self.path.push(Segment {
            from: self.cursor,
            to: (x, y),
        });
        self.cursor = (x, y);
    }

    fn stroke(&mut self, color: Rgba) {
        let path = std::mem::take(&mut self.path);
        for segment in &path {
            self.draw_segment(*segment, color);
        }
        self.path = path;
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for row in y..y_end {
            for col in x..x_end {
                if let Some(offset) = self.pixel_offset(col, row) {
                    self.frame[offset..offset + 4].copy_from_slice(&color);
                }
            }
        }
    }
}
