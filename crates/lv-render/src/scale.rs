/// Linear scale mapping a numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    /// Project a domain value into the pixel range. A degenerate domain
    /// maps everything to the range start.
    pub fn scale(&self, value: f64) -> f32 {
        let (d0, d1) = self.domain;
        if d1 == d0 {
            return self.range.0;
        }
        let t = (value - d0) / (d1 - d0);
        self.range.0 + t as f32 * (self.range.1 - self.range.0)
    }

    /// Map a pixel position back into the domain.
    pub fn invert(&self, pixel: f32) -> f64 {
        let (r0, r1) = self.range;
        if r1 == r0 {
            return self.domain.0;
        }
        let t = ((pixel - r0) / (r1 - r0)) as f64;
        self.domain.0 + t * (self.domain.1 - self.domain.0)
    }
}
