//! The ablation region raster: one lit bit per surface pixel.

/// Square binary raster over the whole surface.
///
/// Always derived from a shape set; never edited by hand outside the
/// compositor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    size: u32,
    lit: Vec<bool>,
}

impl Region {
    /// An all-unlit region.
    #[must_use]
    pub fn empty(size: u32) -> Self {
        let len = (size as usize) * (size as usize);
        Self {
            size,
            lit: vec![false; len],
        }
    }

    /// Build a region by evaluating `f(x, y)` for every pixel, row-major.
    #[must_use]
    pub fn from_fn(size: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut lit = Vec::with_capacity((size as usize) * (size as usize));
        for y in 0..size {
            for x in 0..size {
                lit.push(f(x, y));
            }
        }
        Self { size, lit }
    }

    /// Side length in pixels.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Whether pixel `(x, y)` is lit. Out-of-range pixels are unlit.
    #[must_use]
    pub fn is_lit(&self, x: u32, y: u32) -> bool {
        x < self.size && y < self.size && self.lit[self.index(x, y)]
    }

    /// Set pixel `(x, y)`. Out-of-range writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, lit: bool) {
        if x < self.size && y < self.size {
            let i = self.index(x, y);
            self.lit[i] = lit;
        }
    }

    /// Number of lit pixels.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.lit.iter().filter(|&&b| b).count()
    }

    /// Number of pixels whose value differs from `other`.
    ///
    /// Regions of different sizes differ everywhere.
    #[must_use]
    pub fn diff_count(&self, other: &Region) -> usize {
        if self.size != other.size {
            return self.lit.len().max(other.lit.len());
        }
        self.lit
            .iter()
            .zip(&other.lit)
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Raw row-major bits.
    #[must_use]
    pub fn bits(&self) -> &[bool] {
        &self.lit
    }

    /// Expand into an RGBA byte buffer, `lit` color for lit pixels and
    /// `unlit` for the rest.
    #[must_use]
    pub fn to_rgba(&self, lit: [u8; 4], unlit: [u8; 4]) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.lit.len() * 4);
        for &b in &self.lit {
            out.extend_from_slice(if b { &lit } else { &unlit });
        }
        out
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.size as usize) + (x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_row_major() {
        let region = Region::from_fn(4, |x, y| x == 1 && y == 2);
        assert!(region.is_lit(1, 2));
        assert!(!region.is_lit(2, 1));
        assert_eq!(region.lit_count(), 1);
        assert!(region.bits()[2 * 4 + 1]);
    }

    #[test]
    fn test_out_of_range_is_unlit() {
        let mut region = Region::empty(3);
        region.set(5, 5, true);
        assert_eq!(region.lit_count(), 0);
        assert!(!region.is_lit(3, 0));
    }

    #[test]
    fn test_rgba_expansion() {
        let region = Region::from_fn(2, |x, _| x == 0);
        let rgba = region.to_rgba([255, 255, 255, 255], [0, 0, 0, 0]);
        assert_eq!(rgba.len(), 16);
        assert_eq!(&rgba[0..4], &[255, 255, 255, 255]);
        assert_eq!(&rgba[4..8], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_diff_count() {
        let a = Region::from_fn(3, |x, _| x == 0);
        let b = Region::from_fn(3, |_, y| y == 0);
        // Column 0 and row 0 share one pixel.
        assert_eq!(a.diff_count(&b), 4);
        assert_eq!(a.diff_count(&a), 0);
    }
}
