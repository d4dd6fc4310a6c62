//! DPSS taper sets for multitaper estimation
//!
//! Tapers are precomputed elsewhere and handed over as two text files:
//!
//! * a vector file with one line per sample and one column per taper
//!   (taper index varies fastest)
//! * a value file with one weight (eigenvalue) per taper, same order
//!
//! Both are parsed once and checked for shape before an engine is built.

use crate::error::{Result, SpectrogramError};
use ndarray::{s, Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// K taper vectors of length N plus one weight per taper
#[derive(Debug, Clone, PartialEq)]
pub struct TaperSet {
    /// Shape (K, N): row i is taper i
    tapers: Array2<f64>,
    weights: Vec<f64>,
}

impl TaperSet {
    /// Build a taper set from in-memory data
    ///
    /// # Arguments
    /// * `tapers` - Matrix of shape (K, N), one taper per row
    /// * `weights` - K weights, weight i pairs with row i
    pub fn new(tapers: Array2<f64>, weights: Vec<f64>) -> Result<Self> {
        if tapers.nrows() == 0 {
            return Err(SpectrogramError::InvalidTaperCount(0));
        }
        if weights.len() != tapers.nrows() {
            return Err(SpectrogramError::TaperShape {
                what: "weights",
                expected: tapers.nrows(),
                found: weights.len(),
            });
        }

        Ok(Self { tapers, weights })
    }

    /// Parse the vector and value file contents
    ///
    /// # Arguments
    /// * `vectors` - Sample-per-line matrix text
    /// * `values` - Whitespace separated weights
    /// * `num_tapers` - Number of tapers K to take (surplus columns are ignored)
    /// * `window_size` - Required taper length N
    pub fn parse(vectors: &str, values: &str, num_tapers: usize, window_size: usize) -> Result<Self> {
        if num_tapers == 0 {
            return Err(SpectrogramError::InvalidTaperCount(0));
        }

        let tapers = parse_vectors(vectors, num_tapers, window_size)?;
        let weights = parse_values(values, num_tapers)?;

        Self::new(tapers, weights)
    }

    pub fn num_tapers(&self) -> usize {
        self.tapers.nrows()
    }

    /// Length N of each taper
    pub fn window_size(&self) -> usize {
        self.tapers.ncols()
    }

    pub fn taper(&self, index: usize) -> ArrayView1<'_, f64> {
        self.tapers.row(index)
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Iterate (taper, weight) pairs in file order
    pub fn iter(&self) -> impl Iterator<Item = (ArrayView1<'_, f64>, f64)> + '_ {
        self.tapers.outer_iter().zip(self.weights.iter().copied())
    }

    /// Keep the first `num_tapers` tapers, checking the length against N
    fn select(&self, num_tapers: usize, window_size: usize) -> Result<Self> {
        if num_tapers == 0 {
            return Err(SpectrogramError::InvalidTaperCount(0));
        }
        if self.num_tapers() < num_tapers {
            return Err(SpectrogramError::TaperShape {
                what: "tapers",
                expected: num_tapers,
                found: self.num_tapers(),
            });
        }
        if self.window_size() != window_size {
            return Err(SpectrogramError::TaperShape {
                what: "samples per taper",
                expected: window_size,
                found: self.window_size(),
            });
        }

        Ok(Self {
            tapers: self.tapers.slice(s![..num_tapers, ..]).to_owned(),
            weights: self.weights[..num_tapers].to_vec(),
        })
    }
}

/// Anything able to produce a validated taper set for an engine
pub trait TaperSource {
    /// Load `num_tapers` tapers of length `window_size`
    fn load(&self, num_tapers: usize, window_size: usize) -> Result<TaperSet>;
}

impl TaperSource for TaperSet {
    fn load(&self, num_tapers: usize, window_size: usize) -> Result<TaperSet> {
        self.select(num_tapers, window_size)
    }
}

/// Locations of the DPSS vector and value files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DpssFiles {
    pub vectors: PathBuf,
    pub values: PathBuf,
}

impl Default for DpssFiles {
    fn default() -> Self {
        Self {
            vectors: PathBuf::from("dpss_E_102_5"),
            values: PathBuf::from("dpss_V_102_5"),
        }
    }
}

impl DpssFiles {
    pub fn new(vectors: impl Into<PathBuf>, values: impl Into<PathBuf>) -> Self {
        Self {
            vectors: vectors.into(),
            values: values.into(),
        }
    }
}

impl TaperSource for DpssFiles {
    fn load(&self, num_tapers: usize, window_size: usize) -> Result<TaperSet> {
        let vectors = read_file(&self.vectors)?;
        let values = read_file(&self.values)?;

        let set = TaperSet::parse(&vectors, &values, num_tapers, window_size)?;
        tracing::debug!(
            "Loaded {} DPSS tapers of length {} from {:?}",
            set.num_tapers(),
            set.window_size(),
            self.vectors
        );
        Ok(set)
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| SpectrogramError::TaperIo {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_number(token: &str, line: usize) -> Result<f64> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(SpectrogramError::TaperParse {
            line,
            token: token.to_string(),
        }),
    }
}

/// Returns a (K, N) matrix from N lines of at least K values
fn parse_vectors(text: &str, num_tapers: usize, window_size: usize) -> Result<Array2<f64>> {
    let mut data = Vec::with_capacity(num_tapers * window_size);
    let mut rows = 0;
    let mut warned_surplus = false;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let row = line
            .split_whitespace()
            .map(|token| parse_number(token, line_no))
            .collect::<Result<Vec<f64>>>()?;

        if row.is_empty() {
            continue;
        }
        if row.len() < num_tapers {
            return Err(SpectrogramError::TaperShape {
                what: "columns",
                expected: num_tapers,
                found: row.len(),
            });
        }
        if row.len() > num_tapers && !warned_surplus {
            tracing::warn!(
                "Taper file has {} columns, using the first {}",
                row.len(),
                num_tapers
            );
            warned_surplus = true;
        }

        rows += 1;
        if rows <= window_size {
            data.extend_from_slice(&row[..num_tapers]);
        }
    }

    if rows != window_size {
        return Err(SpectrogramError::TaperShape {
            what: "rows",
            expected: window_size,
            found: rows,
        });
    }

    // File layout is (N, K); store one taper per row
    let by_sample = Array2::from_shape_vec((window_size, num_tapers), data)
        .map_err(|e| SpectrogramError::Config(e.to_string()))?;
    let by_taper = by_sample.reversed_axes().as_standard_layout().into_owned();
    Ok(by_taper)
}

fn parse_values(text: &str, num_tapers: usize) -> Result<Vec<f64>> {
    let mut weights = Vec::with_capacity(num_tapers);

    for (index, line) in text.lines().enumerate() {
        for token in line.split_whitespace() {
            if weights.len() == num_tapers {
                return Ok(weights);
            }
            weights.push(parse_number(token, index + 1)?);
        }
    }

    if weights.len() < num_tapers {
        return Err(SpectrogramError::TaperShape {
            what: "weights",
            expected: num_tapers,
            found: weights.len(),
        });
    }

    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    const VECTORS: &str = "0.1 0.5\n0.2 0.6\n\n0.3 0.7\n0.4 0.8\n";
    const VALUES: &str = "0.99\n0.75\n";

    #[test]
    fn test_parse_column_major_file() {
        let set = TaperSet::parse(VECTORS, VALUES, 2, 4).unwrap();

        assert_eq!(set.num_tapers(), 2);
        assert_eq!(set.window_size(), 4);
        assert_eq!(set.taper(0).to_vec(), vec![0.1, 0.2, 0.3, 0.4]);
        assert_eq!(set.taper(1).to_vec(), vec![0.5, 0.6, 0.7, 0.8]);
        assert_eq!(set.weights(), &[0.99, 0.75]);
    }

    #[test]
    fn test_fewer_tapers_than_columns() {
        let set = TaperSet::parse(VECTORS, VALUES, 1, 4).unwrap();

        assert_eq!(set.num_tapers(), 1);
        assert_eq!(set.taper(0).to_vec(), vec![0.1, 0.2, 0.3, 0.4]);
        assert_eq!(set.weights(), &[0.99]);
    }

    #[test]
    fn test_short_row_is_rejected() {
        let vectors = "0.1 0.5\n0.2\n0.3 0.7\n0.4 0.8\n";
        let err = TaperSet::parse(vectors, VALUES, 2, 4).unwrap_err();

        assert!(matches!(
            err,
            SpectrogramError::TaperShape { what: "columns", expected: 2, found: 1 }
        ));
    }

    #[test]
    fn test_row_count_must_match_window() {
        let err = TaperSet::parse(VECTORS, VALUES, 2, 5).unwrap_err();
        assert!(matches!(
            err,
            SpectrogramError::TaperShape { what: "rows", expected: 5, found: 4 }
        ));

        let err = TaperSet::parse(VECTORS, VALUES, 2, 3).unwrap_err();
        assert!(matches!(
            err,
            SpectrogramError::TaperShape { what: "rows", expected: 3, found: 4 }
        ));
    }

    #[test]
    fn test_bad_token_reports_line() {
        let vectors = "0.1 0.5\n0.2 0.6\n0.3 abc\n0.4 0.8\n";
        let err = TaperSet::parse(vectors, VALUES, 2, 4).unwrap_err();

        match err {
            SpectrogramError::TaperParse { line, token } => {
                assert_eq!(line, 3);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_weights() {
        let err = TaperSet::parse(VECTORS, "0.99", 2, 4).unwrap_err();
        assert!(matches!(
            err,
            SpectrogramError::TaperShape { what: "weights", expected: 2, found: 1 }
        ));
    }

    #[test]
    fn test_in_memory_source_selects_prefix() {
        let set = TaperSet::new(
            array![[1.0, 1.0, 1.0], [0.5, 0.5, 0.5], [0.2, 0.2, 0.2]],
            vec![1.0, 2.0, 3.0],
        )
        .unwrap();

        let selected = set.load(2, 3).unwrap();
        assert_eq!(selected.num_tapers(), 2);
        assert_eq!(selected.weights(), &[1.0, 2.0]);

        assert!(set.load(4, 3).is_err());
        assert!(set.load(2, 4).is_err());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let files = DpssFiles::new("/nonexistent/dpss_E", "/nonexistent/dpss_V");
        let err = files.load(5, 102).unwrap_err();
        assert!(matches!(err, SpectrogramError::TaperIo { .. }));
    }
}
