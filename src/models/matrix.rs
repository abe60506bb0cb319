/// Packed grid of modules (true = dark)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create an all-light matrix
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width * height).div_ceil(8)],
        }
    }

    /// Create a square matrix whose cells are given by `f(col, row)`
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut matrix = Self::new(size, size);
        for row in 0..size {
            for col in 0..size {
                matrix.set(col, row, f(col, row));
            }
        }
        matrix
    }

    /// Matrix width in modules
    pub fn width(&self) -> usize {
        self.width
    }

    /// Matrix height in modules
    pub fn height(&self) -> usize {
        self.height
    }

    /// Module at (col, row); out of range reads as light
    pub fn get(&self, col: usize, row: usize) -> bool {
        match self.index(col, row) {
            Some(i) => (self.data[i / 8] >> (i % 8)) & 1 == 1,
            None => false,
        }
    }

    /// Set module at (col, row); out of range writes are ignored
    pub fn set(&mut self, col: usize, row: usize, dark: bool) {
        if let Some(i) = self.index(col, row) {
            if dark {
                self.data[i / 8] |= 1 << (i % 8);
            } else {
                self.data[i / 8] &= !(1 << (i % 8));
            }
        }
    }

    /// Number of dark modules
    pub fn count_dark(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// One text line per row, `dark`/`light` characters per module
    pub fn to_text(&self, dark: char, light: char) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in 0..self.height {
            for col in 0..self.width {
                out.push(if self.get(col, row) { dark } else { light });
            }
            out.push('\n');
        }
        out
    }

    fn index(&self, col: usize, row: usize) -> Option<usize> {
        (col < self.width && row < self.height).then(|| row * self.width + col)
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get() {
        let mut matrix = BitMatrix::new(9, 9);
        matrix.set(8, 0, true);
        assert!(matrix.get(8, 0));
        assert!(!matrix.get(0, 8));
        matrix.set(8, 0, false);
        assert_eq!(matrix.count_dark(), 0);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut matrix = BitMatrix::new(8, 8);
        matrix.set(10, 10, true);
        assert!(!matrix.get(10, 10));
        assert_eq!(matrix.count_dark(), 0);
    }

    #[test]
    fn test_from_fn_and_text() {
        let m = BitMatrix::from_fn(2, |col, row| col == row);
        assert_eq!(m.count_dark(), 2);
        assert_eq!(m.to_text('#', '.'), "#.\n.#\n");
    }
}
