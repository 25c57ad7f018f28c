use super::ParamGen;

/// A parameter generator that always generates the same value.
pub struct ConstParamGen {
    value: f32,
    remaining: usize,
}

impl ConstParamGen {
    /// Creates a new `ConstParamGen` parameter generator.
    ///
    /// # Arguments
    /// * `value` - The value to always generate.
    /// * `limit` - The maximum amount of times to generate that value.
    pub fn new(value: f32, limit: usize) -> Self {
        Self {
            value,
            remaining: limit,
        }
    }
}

impl ParamGen for ConstParamGen {
    fn fill(&mut self, out: &mut [f32]) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }

        let n = out.len().min(self.remaining);
        self.remaining -= n;
        out[..n].fill(self.value);
        Some(n)
    }
}
