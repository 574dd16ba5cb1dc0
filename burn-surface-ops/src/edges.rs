//! # Edge Extraction
//!
//! Boundary pixels of binary masks: a foreground pixel lies on the boundary
//! when one of its four axis-aligned neighbours is background or falls
//! outside the image. This is the mask XOR its binary erosion with a cross
//! structuring element and a zero border.

use crate::mask::BinaryMask;

/// Extracts the boundary pixels of a single mask.
pub fn boundary(mask: &BinaryMask) -> BinaryMask {
    let [height, width] = mask.dims();
    BinaryMask::from_fn(height, width, |y, x| {
        mask.get(y, x)
            && (y == 0
                || x == 0
                || y + 1 == height
                || x + 1 == width
                || !mask.get(y - 1, x)
                || !mask.get(y + 1, x)
                || !mask.get(y, x - 1)
                || !mask.get(y, x + 1))
    })
}

/// Extracts the boundaries of two masks of identical shape.
///
/// With `crop = false` both edge masks cover the full image. With
/// `crop = true` they are cut to the bounding box of the union of both masks,
/// widened by one pixel where the image allows; distances between the two
/// edge sets are unaffected by the crop. Two all-background masks yield two
/// empty edge masks in either mode.
///
/// # Panics
/// If the masks differ in shape.
pub fn mask_edges(
    mask_a: &BinaryMask,
    mask_b: &BinaryMask,
    crop: bool,
) -> (BinaryMask, BinaryMask) {
    assert_eq!(
        mask_a.dims(),
        mask_b.dims(),
        "mask_edges requires masks of identical shape"
    );

    if !crop {
        return (boundary(mask_a), boundary(mask_b));
    }

    let [height, width] = mask_a.dims();
    let union = BinaryMask::from_fn(height, width, |y, x| mask_a.get(y, x) || mask_b.get(y, x));
    match union.bounding_box() {
        None => (
            BinaryMask::empty(height, width),
            BinaryMask::empty(height, width),
        ),
        Some((y0, y1, x0, x1)) => {
            let (y0, x0) = (y0.saturating_sub(1), x0.saturating_sub(1));
            let (y1, x1) = ((y1 + 1).min(height), (x1 + 1).min(width));
            (
                boundary(&mask_a.crop(y0, y1, x0, x1)),
                boundary(&mask_b.crop(y0, y1, x0, x1)),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: usize, y0: usize, x0: usize, side: usize) -> BinaryMask {
        BinaryMask::from_fn(size, size, |y, x| {
            (y0..y0 + side).contains(&y) && (x0..x0 + side).contains(&x)
        })
    }

    #[test]
    fn filled_square_has_ring_boundary() {
        let mask = square(5, 1, 1, 3);
        let edges = boundary(&mask);

        assert_eq!(edges.count(), 8);
        assert!(!edges.get(2, 2));
        assert!(edges.get(1, 1));
        assert!(edges.get(3, 2));
    }

    #[test]
    fn single_pixel_is_its_own_boundary() {
        let mask = square(3, 1, 1, 1);
        assert_eq!(boundary(&mask), mask);
    }

    #[test]
    fn image_border_counts_as_background() {
        let mask = BinaryMask::from_fn(4, 4, |_, _| true);
        let edges = boundary(&mask);

        assert_eq!(edges.count(), 12);
        assert!(!edges.get(1, 1));
        assert!(!edges.get(2, 2));
    }

    #[test]
    fn empty_mask_has_no_boundary() {
        assert!(!boundary(&BinaryMask::empty(4, 4)).any());
    }

    #[test]
    fn uncropped_edges_keep_full_shape() {
        let (a, b) = mask_edges(&square(6, 0, 0, 2), &square(6, 3, 3, 2), false);
        assert_eq!(a.dims(), [6, 6]);
        assert_eq!(b.dims(), [6, 6]);
        assert_eq!(a.count(), 4);
        assert_eq!(b.count(), 4);
    }

    #[test]
    fn cropped_edges_cover_union_with_margin() {
        let (a, b) = mask_edges(&square(8, 2, 2, 2), &square(8, 3, 3, 2), true);

        // Union spans rows/cols 2..5, widened by one pixel to 1..6.
        assert_eq!(a.dims(), [5, 5]);
        assert_eq!(b.dims(), [5, 5]);
        assert_eq!(a.count(), 4);
        assert!(a.get(1, 1));
        assert!(b.get(2, 2));
    }

    #[test]
    fn cropped_empty_masks_yield_empty_edges() {
        let (a, b) = mask_edges(&BinaryMask::empty(3, 3), &BinaryMask::empty(3, 3), true);
        assert!(!a.any());
        assert!(!b.any());
    }
}
