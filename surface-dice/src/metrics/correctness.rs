//! Boundary correctness ratio for one (sample, class) pair.

/// Fraction of boundary distances, taken in both directions, that lie within `tolerance`.
///
/// `pred_to_gt` holds one distance per predicted boundary pixel, `gt_to_pred`
/// one per reference boundary pixel. Infinite distances (the opposite
/// boundary is empty) never count as correct. Returns NaN when both arrays
/// are empty, i.e. the class is absent from prediction and reference.
pub fn boundary_correctness(pred_to_gt: &[f64], gt_to_pred: &[f64], tolerance: f64) -> f64 {
    let complete = pred_to_gt.len() + gt_to_pred.len();
    if complete == 0 {
        return f64::NAN;
    }

    let correct = pred_to_gt
        .iter()
        .chain(gt_to_pred)
        .filter(|&&d| d <= tolerance)
        .count();

    correct as f64 / complete as f64
}
