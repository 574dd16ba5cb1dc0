//! Distance transform operations for surface distance computation.
//!
//! The Euclidean transform is exact (separable lower envelope of parabolas)
//! and honours anisotropic pixel spacing. The chessboard and taxicab
//! transforms are exact two-pass chamfer scans on the unit grid and ignore
//! spacing.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SurfaceOpsError;
use crate::mask::BinaryMask;

/// Metric used to measure the distance between boundary pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Straight-line distance, scaled by the pixel spacing.
    #[default]
    Euclidean,
    /// Chebyshev (L-infinity) distance in pixels.
    Chessboard,
    /// Manhattan (L1) distance in pixels.
    Taxicab,
}

impl DistanceMetric {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Chessboard => "chessboard",
            Self::Taxicab => "taxicab",
        }
    }
}

impl FromStr for DistanceMetric {
    type Err = SurfaceOpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "euclidean" => Ok(Self::Euclidean),
            "chessboard" => Ok(Self::Chessboard),
            "taxicab" => Ok(Self::Taxicab),
            other => Err(SurfaceOpsError::UnknownDistanceMetric {
                name: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distance from every pixel to the nearest foreground pixel of `target`.
///
/// Returns a row-major `[height * width]` buffer. Every entry is `+inf` when
/// `target` has no foreground. `spacing` is `[row, column]` and is only used by
/// [`DistanceMetric::Euclidean`].
pub fn distance_transform(
    target: &BinaryMask,
    metric: DistanceMetric,
    spacing: &[f64],
) -> Vec<f64> {
    let [height, width] = target.dims();
    if !target.any() {
        return vec![f64::INFINITY; height * width];
    }

    match metric {
        DistanceMetric::Euclidean => {
            let row_step = spacing.first().copied().unwrap_or(1.0);
            let col_step = spacing.get(1).copied().unwrap_or(row_step);
            euclidean_distance_transform(target, row_step, col_step)
        }
        DistanceMetric::Chessboard => chamfer_distance_transform(target, true),
        DistanceMetric::Taxicab => chamfer_distance_transform(target, false),
    }
}

/// Nearest-neighbour distances from each foreground pixel of `edges_source`
/// to the foreground of `edges_target`, in row-major order of the source.
///
/// Empty when the source has no foreground; all `+inf` when the target has none.
///
/// # Panics
/// If the masks differ in shape.
pub fn surface_distance(
    edges_source: &BinaryMask,
    edges_target: &BinaryMask,
    metric: DistanceMetric,
    spacing: &[f64],
) -> Vec<f64> {
    assert_eq!(
        edges_source.dims(),
        edges_target.dims(),
        "surface_distance requires masks of identical shape"
    );

    if !edges_source.any() {
        return Vec::new();
    }

    let width = edges_source.width();
    let dist = distance_transform(edges_target, metric, spacing);
    edges_source
        .coords()
        .map(|(y, x)| dist[y * width + x])
        .collect()
}

/// Exact squared-distance pass along one line, with sample positions `q * step`.
///
/// Entries of `f` that are `+inf` contribute no parabola.
fn squared_distance_1d(f: &[f64], step: f64, out: &mut [f64]) {
    let mut vertices: Vec<usize> = Vec::with_capacity(f.len());
    let mut bounds: Vec<f64> = Vec::with_capacity(f.len());

    for (q, &fq) in f.iter().enumerate() {
        if !fq.is_finite() {
            continue;
        }
        let xq = q as f64 * step;
        while let Some(&p) = vertices.last() {
            let xp = p as f64 * step;
            let s = ((fq + xq * xq) - (f[p] + xp * xp)) / (2.0 * (xq - xp));
            if bounds.last().is_some_and(|&z| s <= z) {
                vertices.pop();
                bounds.pop();
            } else {
                vertices.push(q);
                bounds.push(s);
                break;
            }
        }
        if vertices.is_empty() {
            vertices.push(q);
            bounds.push(f64::NEG_INFINITY);
        }
    }

    if vertices.is_empty() {
        out.fill(f64::INFINITY);
        return;
    }

    let mut k = 0;
    for (p, slot) in out.iter_mut().enumerate() {
        let xp = p as f64 * step;
        while k + 1 < vertices.len() && bounds[k + 1] < xp {
            k += 1;
        }
        let dx = xp - vertices[k] as f64 * step;
        *slot = dx * dx + f[vertices[k]];
    }
}

fn euclidean_distance_transform(target: &BinaryMask, row_step: f64, col_step: f64) -> Vec<f64> {
    let [height, width] = target.dims();
    let seed: Vec<f64> = target
        .as_slice()
        .iter()
        .map(|&on| if on { 0.0 } else { f64::INFINITY })
        .collect();

    // Along rows (axis 1).
    let mut rows = vec![0.0; height * width];
    for (src, dst) in seed.chunks(width).zip(rows.chunks_mut(width)) {
        squared_distance_1d(src, col_step, dst);
    }

    // Along columns (axis 0).
    let mut column = vec![0.0; height];
    let mut column_out = vec![0.0; height];
    let mut squared = vec![0.0; height * width];
    for x in 0..width {
        for y in 0..height {
            column[y] = rows[y * width + x];
        }
        squared_distance_1d(&column, row_step, &mut column_out);
        for y in 0..height {
            squared[y * width + x] = column_out[y];
        }
    }

    squared.into_iter().map(f64::sqrt).collect()
}

fn chamfer_distance_transform(target: &BinaryMask, diagonal: bool) -> Vec<f64> {
    let [height, width] = target.dims();
    let mut dist: Vec<f64> = target
        .as_slice()
        .iter()
        .map(|&on| if on { 0.0 } else { f64::INFINITY })
        .collect();
    let at = |y: usize, x: usize| y * width + x;

    // Forward pass: top-left to bottom-right
    for y in 0..height {
        for x in 0..width {
            let mut best = dist[at(y, x)];
            if y > 0 {
                best = best.min(dist[at(y - 1, x)] + 1.0);
                if diagonal && x > 0 {
                    best = best.min(dist[at(y - 1, x - 1)] + 1.0);
                }
                if diagonal && x + 1 < width {
                    best = best.min(dist[at(y - 1, x + 1)] + 1.0);
                }
            }
            if x > 0 {
                best = best.min(dist[at(y, x - 1)] + 1.0);
            }
            dist[at(y, x)] = best;
        }
    }

    // Backward pass: bottom-right to top-left
    for y in (0..height).rev() {
        for x in (0..width).rev() {
            let mut best = dist[at(y, x)];
            if y + 1 < height {
                best = best.min(dist[at(y + 1, x)] + 1.0);
                if diagonal && x + 1 < width {
                    best = best.min(dist[at(y + 1, x + 1)] + 1.0);
                }
                if diagonal && x > 0 {
                    best = best.min(dist[at(y + 1, x - 1)] + 1.0);
                }
            }
            if x + 1 < width {
                best = best.min(dist[at(y, x + 1)] + 1.0);
            }
            dist[at(y, x)] = best;
        }
    }

    dist
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_point(size: usize, y: usize, x: usize) -> BinaryMask {
        BinaryMask::from_fn(size, size, |py, px| py == y && px == x)
    }

    fn brute_force(target: &BinaryMask, row_step: f64, col_step: f64) -> Vec<f64> {
        let [height, width] = target.dims();
        let points: Vec<_> = target.coords().collect();
        (0..height * width)
            .map(|i| {
                let (y, x) = (i / width, i % width);
                points
                    .iter()
                    .map(|&(ty, tx)| {
                        let dy = (y as f64 - ty as f64) * row_step;
                        let dx = (x as f64 - tx as f64) * col_step;
                        dy.hypot(dx)
                    })
                    .fold(f64::INFINITY, f64::min)
            })
            .collect()
    }

    #[test]
    fn taxicab_distance_transform_single_point() {
        let dist = distance_transform(
            &single_point(5, 2, 2),
            DistanceMetric::Taxicab,
            &[1.0, 1.0],
        );

        assert_eq!(dist[2 * 5 + 2], 0.0);
        assert_eq!(dist[5 + 2], 1.0);
        assert_eq!(dist[0], 4.0);
    }

    #[test]
    fn chessboard_distance_transform_single_point() {
        let dist = distance_transform(
            &single_point(5, 2, 2),
            DistanceMetric::Chessboard,
            &[1.0, 1.0],
        );

        assert_eq!(dist[0], 2.0);
        assert_eq!(dist[5 + 1], 1.0);
        assert_eq!(dist[4 * 5 + 2], 2.0);
    }

    #[test]
    fn euclidean_distance_transform_diagonal_distance() {
        let dist = distance_transform(
            &single_point(3, 1, 1),
            DistanceMetric::Euclidean,
            &[1.0, 1.0],
        );

        assert!((dist[4] - 0.0).abs() < 1e-12);
        assert!((dist[0] - 2.0_f64.sqrt()).abs() < 1e-12);
        assert!((dist[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn euclidean_matches_brute_force_with_anisotropic_spacing() {
        let target = BinaryMask::from_fn(7, 9, |y, x| (y * 3 + x * 5) % 11 == 0);
        let dist = distance_transform(&target, DistanceMetric::Euclidean, &[0.7, 1.9]);
        let expected = brute_force(&target, 0.7, 1.9);

        for (got, want) in dist.iter().zip(&expected) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
    }

    #[test]
    fn chamfer_ignores_spacing() {
        let target = single_point(4, 0, 0);
        let a = distance_transform(&target, DistanceMetric::Taxicab, &[1.0, 1.0]);
        let b = distance_transform(&target, DistanceMetric::Taxicab, &[3.0, 0.5]);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_target_is_infinite() {
        let dist = distance_transform(
            &BinaryMask::empty(3, 3),
            DistanceMetric::Euclidean,
            &[1.0, 1.0],
        );
        assert!(dist.iter().all(|d| d.is_infinite()));
    }

    #[test]
    fn surface_distance_follows_source_order() {
        let source = BinaryMask::from_fn(1, 5, |_, x| x == 0 || x == 4);
        let target = BinaryMask::from_fn(1, 5, |_, x| x == 1);

        let dist = surface_distance(
            &source,
            &target,
            DistanceMetric::Euclidean,
            &[1.0, 1.0],
        );
        assert_eq!(dist, vec![1.0, 3.0]);
    }

    #[test]
    fn surface_distance_empty_source_is_empty() {
        let dist = surface_distance(
            &BinaryMask::empty(3, 3),
            &single_point(3, 1, 1),
            DistanceMetric::Euclidean,
            &[1.0, 1.0],
        );
        assert!(dist.is_empty());
    }

    #[test]
    fn surface_distance_empty_target_is_infinite() {
        let dist = surface_distance(
            &single_point(3, 1, 1),
            &BinaryMask::empty(3, 3),
            DistanceMetric::Chessboard,
            &[1.0, 1.0],
        );
        assert_eq!(dist.len(), 1);
        assert!(dist[0].is_infinite());
    }

    #[test]
    fn distance_metric_names_round_trip() {
        for metric in [
            DistanceMetric::Euclidean,
            DistanceMetric::Chessboard,
            DistanceMetric::Taxicab,
        ] {
            assert_eq!(metric.as_str().parse::<DistanceMetric>(), Ok(metric));
        }
        assert!(matches!(
            "hamming".parse::<DistanceMetric>(),
            Err(SurfaceOpsError::UnknownDistanceMetric { name }) if name == "hamming"
        ));
    }
}
