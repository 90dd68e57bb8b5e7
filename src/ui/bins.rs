// ---------------------------------------------------------------------------
// Histogram binning shared by every series of one chart
// ---------------------------------------------------------------------------

/// Equal-width bins covering `[start, start + width * count)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bins {
    pub start: f64,
    pub width: f64,
    pub count: usize,
}

const MAX_BINS: usize = 60;

impl Bins {
    /// Bins spanning all values of all series, so overlayed series line up.
    /// Returns `None` when there is nothing to bin.
    pub fn covering<'a>(series: impl IntoIterator<Item = &'a [f64]>) -> Option<Bins> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut n = 0usize;
        for values in series {
            for &v in values.iter().filter(|v| v.is_finite()) {
                min = min.min(v);
                max = max.max(v);
                n += 1;
            }
        }
        if n == 0 {
            return None;
        }

        let count = ((n as f64).sqrt().ceil() as usize).clamp(1, MAX_BINS);
        let span = max - min;
        if span <= f64::EPSILON {
            return Some(Bins {
                start: min - 0.5,
                width: 1.0,
                count: 1,
            });
        }
        Some(Bins {
            start: min,
            width: span / count as f64,
            count,
        })
    }

    /// Centre of bin `i`.
    pub fn center(&self, i: usize) -> f64 {
        self.start + self.width * (i as f64 + 0.5)
    }

    /// Number of values per bin; the maximum lands in the last bin.
    pub fn counts(&self, values: &[f64]) -> Vec<u64> {
        let mut counts = vec![0u64; self.count];
        for &v in values.iter().filter(|v| v.is_finite()) {
            let idx = ((v - self.start) / self.width).floor();
            if idx < 0.0 {
                continue;
            }
            let idx = (idx as usize).min(self.count - 1);
            counts[idx] += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_value_is_counted_once() {
        let values = [17.0, 25.0, 39.0, 39.0, 52.0, 90.0];
        let bins = Bins::covering([&values[..]]).unwrap();
        assert_eq!(bins.count, 3);
        assert_eq!(bins.counts(&values).iter().sum::<u64>(), 6);
        assert_eq!(*bins.counts(&values).last().unwrap(), 1);
    }

    #[test]
    fn overlayed_series_share_bins() {
        let a = [40.0, 45.0];
        let b = [35.0];
        let bins = Bins::covering([&a[..], &b[..]]).unwrap();
        assert_eq!(bins.start, 35.0);
        assert_eq!(bins.counts(&b)[0], 1);
    }

    #[test]
    fn constant_and_empty_input() {
        let bins = Bins::covering([&[40.0, 40.0][..]]).unwrap();
        assert_eq!(bins.count, 1);
        assert_eq!(bins.counts(&[40.0, 40.0]), vec![2]);
        assert!(Bins::covering(std::iter::empty::<&[f64]>()).is_none());
    }
}
