use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector, DIM};

/// The number of magnitude bits of each quantized coordinate.
const QUANTIZATION_RANGE: Real = 32767.0;

/// A box compressed to 16 bits per axis.
///
/// The decoded center is `center * center_coeff` and the decoded half-extents are
/// `extents * extents_coeff`, with coefficients shared by the whole tree, see
/// [`Dequantization`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "bytemuck-serialize",
    derive(bytemuck::Pod, bytemuck::Zeroable)
)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct QuantizedBox {
    /// The quantized center.
    pub center: [i16; 3],
    /// The quantized half-extents.
    pub extents: [u16; 3],
}

static_assertions::assert_eq_size!(QuantizedBox, [u16; 6]);

/// The scale factors turning a [`QuantizedBox`] back into an [`Aabb`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Dequantization {
    /// The size of one center quantization step, per axis.
    pub center_coeff: Vector<Real>,
    /// The size of one extents quantization step, per axis.
    pub extents_coeff: Vector<Real>,
}

impl Dequantization {
    /// Computes coefficients able to encode all the given boxes.
    pub fn new<'a>(aabbs: impl IntoIterator<Item = &'a Aabb>) -> Self {
        let mut max_center = Vector::<Real>::zeros();
        let mut max_extents = Vector::<Real>::zeros();

        for aabb in aabbs {
            max_center = max_center.sup(&aabb.center().coords.abs());
            max_extents = max_extents.sup(&aabb.half_extents());
        }

        let center_coeff = max_center / QUANTIZATION_RANGE;
        // The extents must also absorb the center quantization error.
        let extents_coeff = (max_extents + center_coeff) / QUANTIZATION_RANGE;

        log::debug!(
            "quantization coefficients: center {:?}, extents {:?}",
            center_coeff.as_slice(),
            extents_coeff.as_slice()
        );

        Self {
            center_coeff,
            extents_coeff,
        }
    }

    /// The decoded `[min, max]` interval of `qbox` along `axis`.
    #[inline]
    fn decode_axis(&self, qbox: &QuantizedBox, axis: usize) -> (Real, Real) {
        let center = qbox.center[axis] as Real * self.center_coeff[axis];
        let extents = qbox.extents[axis] as Real * self.extents_coeff[axis];
        (center - extents, center + extents)
    }

    /// Decodes a quantized box.
    #[inline]
    pub fn decode(&self, qbox: &QuantizedBox) -> Aabb {
        let mut mins = Point::origin();
        let mut maxs = Point::origin();

        for i in 0..DIM {
            (mins[i], maxs[i]) = self.decode_axis(qbox, i);
        }

        Aabb::new(mins, maxs)
    }

    /// Encodes `aabb` such that its decoded box contains it.
    pub fn encode(&self, aabb: &Aabb) -> QuantizedBox {
        let center = aabb.center();
        let half_extents = aabb.half_extents();
        let mut result = QuantizedBox::default();

        for i in 0..DIM {
            result.center[i] = quantize(center[i], self.center_coeff[i]) as i16;
            result.extents[i] = quantize(half_extents[i], self.extents_coeff[i]) as u16;

            // Grow the extents until the center rounding error is covered.
            loop {
                let (min, max) = self.decode_axis(&result, i);
                if min <= aabb.mins[i] && max >= aabb.maxs[i] {
                    break;
                }

                result.extents[i] = result.extents[i].wrapping_add(1);
                if result.extents[i] == 0 {
                    result.extents[i] = u16::MAX;
                    break;
                }
            }
        }

        result
    }
}

#[inline]
fn quantize(value: Real, coeff: Real) -> Real {
    if coeff == 0.0 {
        0.0
    } else {
        value / coeff
    }
}
