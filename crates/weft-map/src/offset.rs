/// Uniform translation between template pixels and world columns.
///
/// Pixel x maps to world x and pixel y maps to world z; the template is a
/// top-down view, so no axis is flipped or scaled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapOffset {
    pub dx: i32,
    pub dz: i32,
}

impl MapOffset {
    #[inline]
    pub const fn new(dx: i32, dz: i32) -> Self {
        Self { dx, dz }
    }

    /// World column templated by pixel (px, py).
    ///
    /// Wraps at the i32 boundary so the mapping stays a bijection over the
    /// whole coordinate space.
    #[inline]
    pub fn pixel_to_world(self, px: i32, py: i32) -> (i32, i32) {
        (px.wrapping_add(self.dx), py.wrapping_add(self.dz))
    }

    /// Inverse of [`pixel_to_world`]; backs the reverse lookup used to ask
    /// which pixel templates a given world column.
    #[inline]
    pub fn world_to_pixel(self, wx: i32, wz: i32) -> (i32, i32) {
        (wx.wrapping_sub(self.dx), wz.wrapping_sub(self.dz))
    }
}
