//! Single-slot memo shared by evaluators, plotters and content generators

/// Lazily filled cache holding one value.
///
/// A failed computation leaves the memo empty so the next call retries.
/// `computations` counts successful fills only.
#[derive(Clone, Debug)]
pub struct Memo<T> {
    value: Option<T>,
    computations: usize,
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self {
            value: None,
            computations: 0,
        }
    }
}

impl<T> Memo<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_filled(&self) -> bool {
        self.value.is_some()
    }

    /// Number of times the slot was filled
    pub fn computations(&self) -> usize {
        self.computations
    }

    /// Cached value, or the result of `compute` stored on success.
    pub fn get_or_try_compute<E>(
        &mut self,
        compute: impl FnOnce() -> Result<T, E>,
    ) -> Result<&T, E> {
        match self.value {
            Some(ref value) => Ok(value),
            None => {
                let value = compute()?;
                self.computations += 1;
                Ok(self.value.insert(value))
            }
        }
    }
}
