//! Fixed, ordered item list navigated by a [`Carousel`](crate::carousel::Carousel).

/// An immutable, 0-indexed sequence of opaque items.
///
/// Items are supplied once at construction; there is no insertion or removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigableCollection<T> {
    items: Vec<T>,
}

impl<T> NavigableCollection<T> {
    #[must_use]
    pub fn from_vec(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Number of items contained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Index after `index`, wrapping past the end. `None` when empty.
    #[must_use]
    pub fn following(&self, index: usize) -> Option<usize> {
        let len = self.len();
        (len > 0).then(|| (index + 1) % len)
    }

    /// Index before `index`, wrapping past the start. `None` when empty.
    #[must_use]
    pub fn preceding(&self, index: usize) -> Option<usize> {
        let len = self.len();
        (len > 0).then(|| (index % len + len - 1) % len)
    }
}

impl<T> From<Vec<T>> for NavigableCollection<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}
