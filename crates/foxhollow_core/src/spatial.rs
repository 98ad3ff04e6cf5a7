use foxhollow_data::CellPos;

/// Static bucket grid over terrain cells.
///
/// Uses the offset-array layout of a compressed sparse row matrix:
/// `bucket_offsets[i]..bucket_offsets[i + 1]` indexes the cells of bucket `i`
/// inside `cells`. Built once from an immutable cell list and only read after.
///
/// # Examples
/// ```
/// use foxhollow_core::spatial::CellIndex;
/// use foxhollow_data::CellPos;
///
/// let shore = vec![CellPos::new(3, 4), CellPos::new(90, 90)];
/// let index = CellIndex::build(&shore, 100, 100, 16);
///
/// let mut near = Vec::new();
/// index.query_callback(0.0, 0.0, 10.0, |cell| near.push(cell));
/// assert_eq!(near, vec![CellPos::new(3, 4)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CellIndex {
    pub bucket_size: u32,
    pub cols: usize,
    pub rows: usize,
    bucket_offsets: Vec<usize>,
    cells: Vec<CellPos>,
}

impl CellIndex {
    pub fn build(cells: &[CellPos], width: u32, height: u32, bucket_size: u32) -> Self {
        let bucket_size = bucket_size.max(1);
        let cols = width.div_ceil(bucket_size).max(1) as usize;
        let rows = height.div_ceil(bucket_size).max(1) as usize;
        let bucket_count = cols * rows;

        let bucket_of = |c: &CellPos| -> Option<usize> {
            let bx = (c.x / bucket_size) as usize;
            let by = (c.y / bucket_size) as usize;
            (bx < cols && by < rows).then_some(by * cols + bx)
        };

        let mut counts = vec![0usize; bucket_count];
        for cell in cells {
            if let Some(b) = bucket_of(cell) {
                counts[b] += 1;
            }
        }

        let mut bucket_offsets = vec![0usize; bucket_count + 1];
        let mut total = 0;
        for (i, &count) in counts.iter().enumerate() {
            bucket_offsets[i] = total;
            total += count;
        }
        bucket_offsets[bucket_count] = total;

        let mut sorted = vec![CellPos::new(0, 0); total];
        let mut cursor = bucket_offsets[..bucket_count].to_vec();
        for cell in cells {
            if let Some(b) = bucket_of(cell) {
                sorted[cursor[b]] = *cell;
                cursor[b] += 1;
            }
        }

        Self {
            bucket_size,
            cols,
            rows,
            bucket_offsets,
            cells: sorted,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Visits every cell in a bucket overlapping the square around `(x, y)`.
    /// Callers filter by exact distance.
    pub fn query_callback<F>(&self, x: f64, y: f64, radius: f64, mut callback: F)
    where
        F: FnMut(CellPos),
    {
        if self.cells.is_empty() || !x.is_finite() || !y.is_finite() {
            return;
        }
        let size = f64::from(self.bucket_size);
        let min_bx = ((x - radius) / size).floor().max(0.0) as usize;
        let min_by = ((y - radius) / size).floor().max(0.0) as usize;
        let max_bx = ((x + radius) / size).floor();
        let max_by = ((y + radius) / size).floor();
        if max_bx < 0.0 || max_by < 0.0 {
            return;
        }
        let max_bx = (max_bx as usize).min(self.cols - 1);
        let max_by = (max_by as usize).min(self.rows - 1);

        for by in min_by..=max_by {
            for bx in min_bx..=max_bx {
                let b = by * self.cols + bx;
                for &cell in &self.cells[self.bucket_offsets[b]..self.bucket_offsets[b + 1]] {
                    callback(cell);
                }
            }
        }
    }
}
