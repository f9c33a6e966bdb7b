// ============================================================
// Layer 5 — Device Transfer
// ============================================================
// Relocates tensors onto the configured compute device.
//
// The target device is always passed in explicitly; nothing
// here reads a process-wide default. Callers pick it once
// (see `DeviceKind` in the CLI) and thread it through.

use burn::{prelude::*, tensor::BasicOps};

/// Map an ordered sequence of tensors onto `device`.
///
/// The returned iterator is lazy and yields the tensors in input
/// order; values are unchanged.
///
/// ```ignore
/// let [features, labels] = ...;
/// let mut moved = to_device([features, labels], &device);
/// ```
pub fn to_device<'a, B, const D: usize, K, I>(
    tensors: I,
    device:  &'a B::Device,
) -> impl Iterator<Item = Tensor<B, D, K>> + 'a
where
    B: Backend,
    K: BasicOps<B>,
    I: IntoIterator<Item = Tensor<B, D, K>>,
    I::IntoIter: 'a,
{
    tensors.into_iter().map(move |t| t.to_device(device))
}

/// Eager form of [`to_device`].
pub fn to_device_vec<B, const D: usize, K>(
    tensors: Vec<Tensor<B, D, K>>,
    device:  &B::Device,
) -> Vec<Tensor<B, D, K>>
where
    B: Backend,
    K: BasicOps<B>,
{
    to_device(tensors, device).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_two_tensors_keep_order_and_values() {
        let device = Default::default();
        let a = Tensor::<TestBackend, 1>::from_floats([1.0, 2.0], &device);
        let b = Tensor::<TestBackend, 1>::from_floats([3.0, 4.0, 5.0], &device);

        let moved = to_device_vec(vec![a, b], &device);
        assert_eq!(moved.len(), 2);
        assert_eq!(moved[0].device(), device);
        assert_eq!(moved[1].device(), device);
        assert_eq!(moved[0].clone().into_data().to_vec::<f32>().unwrap(), vec![1.0, 2.0]);
        assert_eq!(moved[1].clone().into_data().to_vec::<f32>().unwrap(), vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_int_tensors_move_too() {
        let device = Default::default();
        let labels = Tensor::<TestBackend, 1, Int>::from_ints([2, 0, 1], &device);
        let moved: Vec<_> = to_device([labels], &device).collect();
        let values: Vec<i64> = moved[0].clone().into_data().iter::<i64>().collect();
        assert_eq!(values, vec![2, 0, 1]);
    }
}
