/// A conjunction of filter functions over `T`.
///
/// Queries collect their `.filter(..)` style refinements here; a value is
/// accepted when every stored test passes. An empty predicate accepts
/// everything.
pub struct Predicate<T: ?Sized> {
    tests: Vec<Box<dyn Fn(&T) -> bool + Send + Sync>>,
}

impl<T: ?Sized> Predicate<T> {
    /// Creates a predicate that accepts everything.
    pub const fn new() -> Self {
        Self { tests: Vec::new() }
    }

    /// Adds a test; the predicate now also requires it to pass.
    pub fn and(&mut self, test: impl Fn(&T) -> bool + Send + Sync + 'static) {
        self.tests.push(Box::new(test));
    }

    /// Returns `true` if every test accepts `value`.
    pub fn test(&self, value: &T) -> bool {
        self.tests.iter().all(|test| test(value))
    }

    /// Returns the number of stored tests.
    #[inline]
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// Returns `true` if no tests are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

impl<T: ?Sized> Default for Predicate<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Predicate;

    #[test]
    fn empty_predicate_accepts_everything() {
        let predicate = Predicate::<i32>::new();
        assert!(predicate.test(&0));
    }

    #[test]
    fn tests_are_conjunctive() {
        let mut predicate = Predicate::new();
        predicate.and(|value: &i32| *value > 0);
        predicate.and(|value: &i32| value % 2 == 0);

        assert!(predicate.test(&4));
        assert!(!predicate.test(&3));
        assert!(!predicate.test(&-2));
    }
}
