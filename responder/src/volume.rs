use crate::params::Dimension;
use std::convert::TryFrom;
use std::io::{self, Write};

/// The all-zero line, grid or cube printed once the queries are over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroVolume {
    pub dimension: Dimension,
    pub extent: usize,
}

impl ZeroVolume {
    /// Negative sizes collapse to an empty extent.
    pub fn new(dimension: Dimension, size: i32) -> ZeroVolume {
        ZeroVolume {
            dimension,
            extent: usize::try_from(size).unwrap_or(0),
        }
    }

    /// `extent` raised to one less than the arity, so a line is always one
    /// row, even an empty one.
    pub fn row_count(&self) -> usize {
        let exp = self.dimension.arity() as u32 - 1;
        self.extent.saturating_pow(exp)
    }

    fn write_row(&self, out: &mut impl Write) -> io::Result<()> {
        for col in 0..self.extent {
            if col > 0 {
                out.write_all(b" ")?;
            }
            out.write_all(b"0")?;
        }
        out.write_all(b"\n")?;
        out.flush()
    }

    /// Rows are streamed a zero at a time, nothing proportional to the
    /// extent is held in memory.
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<usize> {
        let rows = self.row_count();
        for _ in 0..rows {
            self.write_row(out)?;
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::ZeroVolume;
    use crate::params::Dimension::{self, *};
    use std::io::{self, Write};

    fn render(dimension: Dimension, size: i32) -> (usize, String) {
        let mut out = Vec::new();
        let rows = ZeroVolume::new(dimension, size).write_to(&mut out).unwrap();
        (rows, String::from_utf8(out).unwrap())
    }

    #[test]
    fn line_is_one_row() {
        assert_eq!(render(Line, 4), (1, "0 0 0 0\n".to_string()));
    }

    #[test]
    fn empty_line_still_prints_newline() {
        assert_eq!(render(Line, 0), (1, "\n".to_string()));
        assert_eq!(render(Line, -3), (1, "\n".to_string()));
    }

    #[test]
    fn grid_is_n_rows_of_n() {
        let (rows, text) = render(Grid, 3);
        assert_eq!(rows, 3);
        assert_eq!(text, "0 0 0\n0 0 0\n0 0 0\n");
    }

    #[test]
    fn cube_is_n_squared_rows_of_n() {
        let (rows, text) = render(Cube, 3);
        assert_eq!(rows, 9);
        assert_eq!(text.lines().count(), 9);
        assert!(text.lines().all(|line| line == "0 0 0"));
    }

    #[test]
    fn empty_grid_and_cube_print_nothing() {
        assert_eq!(render(Grid, 0), (0, String::new()));
        assert_eq!(render(Cube, -1), (0, String::new()));
    }

    #[test]
    fn row_count_follows_arity() {
        assert_eq!(ZeroVolume::new(Line, 7).row_count(), 1);
        assert_eq!(ZeroVolume::new(Grid, 7).row_count(), 7);
        assert_eq!(ZeroVolume::new(Cube, 7).row_count(), 49);
    }

    /// Counts what goes through without keeping any of it.
    #[derive(Default)]
    struct ByteCounter {
        bytes: usize,
        newlines: usize,
        largest_write: usize,
    }

    impl Write for ByteCounter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.bytes += buf.len();
            self.newlines += buf.iter().filter(|&&b| b == b'\n').count();
            self.largest_write = self.largest_write.max(buf.len());
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn huge_line_is_streamed() {
        let extent = 10_000_000;
        let mut counter = ByteCounter::default();

        let rows = ZeroVolume::new(Line, extent).write_to(&mut counter).unwrap();

        assert_eq!(rows, 1);
        assert_eq!(counter.newlines, 1);
        // n zeros, n - 1 spaces, one newline
        assert_eq!(counter.bytes, 2 * extent as usize);
        assert_eq!(counter.largest_write, 1);
    }
}
