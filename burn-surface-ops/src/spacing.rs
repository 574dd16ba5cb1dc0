//! # Pixel Spacing
//!
//! Resolves a user-facing spacing specification into one spacing vector per
//! batch item.

use crate::error::{SurfaceOpsError, SurfaceOpsResult};

/// How pixel spacing is given for a batch.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SpacingSpec {
    /// Unit spacing along every axis for every item.
    #[default]
    Unit,
    /// The same spacing along every axis for every item.
    Isotropic(f64),
    /// One spacing per spatial axis, shared by every item.
    PerAxis(Vec<f64>),
    /// One spacing sequence per batch item. Each is either a single isotropic
    /// value or one value per spatial axis, and all items use the same form.
    PerItem(Vec<Vec<f64>>),
}

impl From<f64> for SpacingSpec {
    fn from(value: f64) -> Self {
        Self::Isotropic(value)
    }
}

impl From<Vec<f64>> for SpacingSpec {
    fn from(value: Vec<f64>) -> Self {
        Self::PerAxis(value)
    }
}

impl From<Vec<Vec<f64>>> for SpacingSpec {
    fn from(value: Vec<Vec<f64>>) -> Self {
        Self::PerItem(value)
    }
}

impl<T: Into<SpacingSpec>> From<Option<T>> for SpacingSpec {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unit, Into::into)
    }
}

fn invalid(reason: impl Into<String>) -> SurfaceOpsError {
    SurfaceOpsError::InvalidSpacingSpec {
        reason: reason.into(),
    }
}

fn check_values(values: &[f64]) -> SurfaceOpsResult<()> {
    match values.iter().find(|v| !v.is_finite() || **v <= 0.0) {
        Some(v) => Err(invalid(format!(
            "spacing values must be finite and positive, got {v}"
        ))),
        None => Ok(()),
    }
}

/// Resolves `spec` into `batch_size` spacing vectors of length `spatial_dims`.
///
/// # Errors
/// `InvalidSpacingSpec` when a sequence has the wrong length, per-item
/// sequences mix the isotropic and per-axis forms, or a value is not a finite
/// positive number.
pub fn resolve_spacing(
    spec: &SpacingSpec,
    batch_size: usize,
    spatial_dims: usize,
) -> SurfaceOpsResult<Vec<Vec<f64>>> {
    match spec {
        SpacingSpec::Unit => Ok(vec![vec![1.0; spatial_dims]; batch_size]),
        SpacingSpec::Isotropic(value) => {
            check_values(&[*value])?;
            Ok(vec![vec![*value; spatial_dims]; batch_size])
        }
        SpacingSpec::PerAxis(values) => {
            if values.len() != spatial_dims {
                return Err(invalid(format!(
                    "expected {spatial_dims} per-axis spacing values, got {}",
                    values.len()
                )));
            }
            check_values(values)?;
            Ok(vec![values.clone(); batch_size])
        }
        SpacingSpec::PerItem(items) => {
            if items.len() != batch_size {
                return Err(invalid(format!(
                    "expected one spacing sequence per batch item ({batch_size}), got {}",
                    items.len()
                )));
            }
            if let Some(bad) = items
                .iter()
                .find(|item| item.len() != 1 && item.len() != spatial_dims)
            {
                return Err(invalid(format!(
                    "per-item spacing must have length 1 or {spatial_dims}, got {}",
                    bad.len()
                )));
            }
            if spatial_dims != 1 && items.windows(2).any(|w| w[0].len() != w[1].len()) {
                return Err(invalid("per-item spacing mixes isotropic and per-axis sequences"));
            }
            items
                .iter()
                .map(|item| {
                    check_values(item)?;
                    Ok(if item.len() == 1 {
                        vec![item[0]; spatial_dims]
                    } else {
                        item.clone()
                    })
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_spacing_by_default() {
        let resolved = resolve_spacing(&SpacingSpec::default(), 3, 2).unwrap();
        assert_eq!(resolved, vec![vec![1.0, 1.0]; 3]);
    }

    #[test]
    fn scalar_broadcasts_to_items_and_axes() {
        let resolved = resolve_spacing(&SpacingSpec::Isotropic(0.5), 2, 2).unwrap();
        assert_eq!(resolved, vec![vec![0.5, 0.5]; 2]);
    }

    #[test]
    fn per_axis_broadcasts_to_items() {
        let spec = SpacingSpec::PerAxis(vec![1.0, 2.0]);
        let resolved = resolve_spacing(&spec, 2, 2).unwrap();
        assert_eq!(resolved, vec![vec![1.0, 2.0]; 2]);
    }

    #[test]
    fn per_axis_wrong_length_fails() {
        let spec = SpacingSpec::PerAxis(vec![1.0, 2.0, 3.0]);
        let result = resolve_spacing(&spec, 2, 2);
        assert!(matches!(result, Err(SurfaceOpsError::InvalidSpacingSpec { .. })));
    }

    #[test]
    fn per_item_isotropic_and_per_axis() {
        let spec = SpacingSpec::PerItem(vec![vec![2.0], vec![3.0]]);
        let iso = resolve_spacing(&spec, 2, 2).unwrap();
        assert_eq!(iso, vec![vec![2.0, 2.0], vec![3.0, 3.0]]);

        let spec = SpacingSpec::PerItem(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let axes = resolve_spacing(&spec, 2, 2).unwrap();
        assert_eq!(axes, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn per_item_wrong_batch_size_fails() {
        let result = resolve_spacing(&SpacingSpec::PerItem(vec![vec![1.0]]), 2, 2);
        assert!(result.is_err());
    }

    #[test]
    fn per_item_mixed_forms_fail() {
        let spec = SpacingSpec::PerItem(vec![vec![1.0], vec![1.0, 2.0]]);
        let result = resolve_spacing(&spec, 2, 2);
        match result {
            Err(SurfaceOpsError::InvalidSpacingSpec { reason }) => {
                assert!(reason.contains("mixes"));
            }
            other => panic!("Expected InvalidSpacingSpec, got {other:?}"),
        }
    }

    #[test]
    fn non_positive_values_fail() {
        assert!(resolve_spacing(&SpacingSpec::Isotropic(0.0), 1, 2).is_err());
        assert!(resolve_spacing(&SpacingSpec::PerAxis(vec![1.0, -1.0]), 1, 2).is_err());
        assert!(resolve_spacing(&SpacingSpec::Isotropic(f64::NAN), 1, 2).is_err());
    }

    #[test]
    fn option_none_is_unit() {
        let spec: SpacingSpec = Option::<f64>::None.into();
        assert_eq!(spec, SpacingSpec::Unit);
    }
}
