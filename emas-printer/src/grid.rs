//! Label grid - items laid out `columns` per row

/// Row-major view over a label list
///
/// Stateless; rebuild it from the item list on every render.
#[derive(Debug, Clone, Copy)]
pub struct LabelGrid<'a, T> {
    items: &'a [T],
    columns: usize,
}

impl<'a, T> LabelGrid<'a, T> {
    /// `columns` of 0 is treated as 1
    pub fn new(items: &'a [T], columns: usize) -> Self {
        Self {
            items,
            columns: columns.max(1),
        }
    }

    pub fn rows(&self) -> usize {
        self.items.len().div_ceil(self.columns)
    }

    /// Rows in order; the last row of an uneven list is shorter
    pub fn iter_rows(&self) -> std::slice::Chunks<'a, T> {
        self.items.chunks(self.columns)
    }

    pub fn row(&self, index: usize) -> Option<&'a [T]> {
        self.iter_rows().nth(index)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
