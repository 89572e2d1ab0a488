use apot_math::Tensor;
use proptest::prelude::*;

// Property 1: reshape keeps the data and the element count
proptest! {
    #[test]
    fn prop_reshape_preserves_data(
        rows in 1usize..20,
        cols in 1usize..20,
        seed in -1.0f32..1.0f32
    ) {
        let data: Vec<f32> = (0..rows * cols).map(|i| seed + i as f32 * 0.01).collect();
        let t = Tensor::new(data.clone(), vec![rows, cols]).unwrap();
        let flat = t.reshape(&[rows * cols]).unwrap();

        prop_assert_eq!(flat.as_slice(), &data[..]);
        prop_assert_eq!(flat.len(), t.len());
    }
}

// Property 2: map never changes the shape
proptest! {
    #[test]
    fn prop_map_preserves_shape(
        shape in prop::collection::vec(1usize..6, 0..4)
    ) {
        let t = Tensor::zeros(&shape);
        let mapped = t.map(|x| x + 1.0);

        prop_assert_eq!(mapped.shape(), t.shape());
        prop_assert!(mapped.as_slice().iter().all(|&x| x == 1.0));
    }
}

// Property 3: row-major indexing agrees with the flat buffer
proptest! {
    #[test]
    fn prop_get_matches_flat_offset(
        rows in 1usize..20,
        cols in 1usize..20
    ) {
        let data: Vec<f32> = (0..rows * cols).map(|i| i as f32).collect();
        let t = Tensor::new(data, vec![rows, cols]).unwrap();

        for r in 0..rows {
            for c in 0..cols {
                prop_assert_eq!(t.get(&[r, c]), Some((r * cols + c) as f32));
            }
        }
    }
}
