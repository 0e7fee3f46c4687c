/// Row of per-item position markers (dots under a carousel, for example).
///
/// Exactly one marker is active whenever the row is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicators {
    marks: Vec<bool>,
}

impl Indicators {
    /// One marker per item, the first one active.
    pub fn new(len: usize) -> Self {
        let mut marks = vec![false; len];
        if let Some(first) = marks.first_mut() {
            *first = true;
        }
        Self { marks }
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Rewrites every marker so only `index` is active.
    pub(crate) fn activate(&mut self, index: usize) {
        debug_assert!(index < self.marks.len());
        for (idx, mark) in self.marks.iter_mut().enumerate() {
            *mark = idx == index;
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.marks.iter().position(|mark| *mark)
    }

    pub fn active_count(&self) -> usize {
        self.marks.iter().filter(|mark| **mark).count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.marks
    }
}
