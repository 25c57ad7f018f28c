/// A `ParamGen` generates values for the initial state of the model's parameters.
pub trait ParamGen {
    /// Should write at most `out.len()` parameters, starting from the front of `out`.
    ///
    /// # Arguments
    /// * `out` - The slots to write the generated parameters to.
    ///
    /// # Returns
    /// The amount of written slots, or `None` if the generator is exhausted.
    fn fill(&mut self, out: &mut [f32]) -> Option<usize>;
}
