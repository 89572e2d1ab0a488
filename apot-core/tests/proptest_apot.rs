use apot_core::{
    ApotQuantizer, LevelTable, Quantizer, QuantizerConfig, Representation, UniformQuantizer,
};
use apot_math::Tensor;
use proptest::prelude::*;

fn brute_force_nearest(levels: &[f64], x: f64) -> usize {
    let mut best = 0;
    let mut best_delta = f64::INFINITY;
    for (i, &l) in levels.iter().enumerate() {
        let delta = (l - x).abs();
        // strict: ties keep the lower index
        if delta < best_delta {
            best_delta = delta;
            best = i;
        }
    }
    best
}

// Property 1: nearest-level search agrees with an exhaustive scan
proptest! {
    #[test]
    fn prop_nearest_matches_linear_scan(
        b in 1u32..9,
        k_seed in 0u32..4,
        signed in any::<bool>(),
        values in prop::collection::vec(-1.5f32..1.5f32, 1..50)
    ) {
        let k = 1 + k_seed % b.min(4);
        let config = QuantizerConfig::new(b, k, signed).unwrap();
        let table = LevelTable::build(&config).unwrap();

        for &v in &values {
            let x = v as f64;
            prop_assert_eq!(
                table.nearest(x),
                brute_force_nearest(table.levels(), x),
                "b={} k={} signed={} x={}", b, k, signed, x
            );
        }
    }
}

// Property 2: level tables are strictly increasing, normalized, and one code per level
proptest! {
    #[test]
    fn prop_level_table_well_formed(
        b in 1u32..11,
        k_seed in 0u32..4,
        signed in any::<bool>()
    ) {
        let k = 1 + k_seed % b.min(4);
        let config = QuantizerConfig::new(b, k, signed).unwrap();
        let table = LevelTable::build(&config).unwrap();

        prop_assert_eq!(table.levels().len(), table.codes().len());
        prop_assert!(table.levels().windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(table.max_level(), 1.0);
        if signed {
            prop_assert_eq!(table.min_level(), -1.0);
        } else {
            prop_assert_eq!(table.min_level(), 0.0);
            prop_assert_eq!(table.len(), 1usize << b);
            prop_assert!(table.codes().iter().all(|&c| c < (1u32 << b)));
        }

        let mut codes = table.codes().to_vec();
        codes.sort_unstable();
        codes.dedup();
        prop_assert_eq!(codes.len(), table.len());
    }
}

// Property 3: with k = 1 the APoT codes equal 4-bit uniform quantization codes
proptest! {
    #[test]
    fn prop_k1_matches_uniform(
        values in prop::collection::vec(0.0f32..1.0f32, 1..=20)
    ) {
        let apot = ApotQuantizer::create(4, 1, false).unwrap();
        let uniform = UniformQuantizer::unit_range(4).unwrap();
        let input = Tensor::from_f32(&values);

        let apot_codes = apot.quantize(&input);
        let uniform_codes = uniform.quantize(&input);

        for ((&x, &a), &u) in values
            .iter()
            .zip(apot_codes.codes().unwrap())
            .zip(uniform_codes.codes().unwrap())
        {
            // 0.5 is the single exact tie on this grid: lower index vs half-to-even
            let expected = if x == 0.5 { 7 } else { u };
            prop_assert_eq!(a, expected, "x={}", x);
        }
    }
}

// Property 4: output shape equals input shape, and quantization is deterministic
proptest! {
    #[test]
    fn prop_shape_and_determinism(
        shape in prop::collection::vec(1usize..6, 1..4),
        seed in 0.0f32..1.0f32,
        use_int in any::<bool>()
    ) {
        let n: usize = shape.iter().product();
        let data: Vec<f32> = (0..n).map(|i| ((i as f32) * 0.137 + seed).fract()).collect();
        let input = Tensor::new(data, shape.clone()).unwrap();
        let q = ApotQuantizer::create(6, 2, false).unwrap();

        let first = q.quantize_with(&input, use_int);
        let second = q.quantize_with(&input, use_int);

        prop_assert_eq!(first.shape(), &shape[..]);
        prop_assert_eq!(first.len(), n);
        prop_assert_eq!(first, second);
    }
}

// Property 5: signed tables quantize symmetrically away from exact ties
proptest! {
    #[test]
    fn prop_signed_symmetry(x in 0.0f32..1.0f32) {
        let q = ApotQuantizer::create(6, 2, true).unwrap();
        let table = q.level_table();
        let pos = table.nearest(x as f64);
        let neighbours_tied = [pos.checked_sub(1), Some(pos + 1)]
            .iter()
            .flatten()
            .filter(|&&i| i < table.len())
            .any(|&i| (table.levels()[i] - x as f64).abs() == (table.levels()[pos] - x as f64).abs());
        prop_assume!(!neighbours_tied);

        prop_assert_eq!(q.float_to_level(-x), -q.float_to_level(x));
    }
}

// Property 6: unsupported operations fail for every input
proptest! {
    #[test]
    fn prop_unsupported_always(
        values in prop::collection::vec(0.0f32..1.0f32, 0..20),
        use_int in any::<bool>()
    ) {
        let q = ApotQuantizer::create(4, 2, false).unwrap();
        let quantized = q.quantize_apot(
            &Tensor::from_f32(&values),
            if use_int { Representation::Int } else { Representation::ReducedPrecision },
        );
        prop_assert!(matches!(
            q.dequantize(&quantized),
            Err(apot_core::QuantError::Unsupported(_))
        ));
        prop_assert!(matches!(q.alpha(), Err(apot_core::QuantError::Unsupported(_))));
    }
}

#[test]
fn test_config_json_roundtrip() {
    let config = QuantizerConfig::new(4, 2, false).unwrap();
    let json = serde_json::to_string(&config).unwrap();
    let back: QuantizerConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, back);

    // `signed` defaults to false
    let parsed: QuantizerConfig =
        serde_json::from_str(r#"{"bit_width": 4, "level_bits": 1}"#).unwrap();
    assert_eq!(parsed, QuantizerConfig::new(4, 1, false).unwrap());
}

#[test]
fn test_deserialized_config_is_revalidated() {
    let bad: QuantizerConfig =
        serde_json::from_str(r#"{"bit_width": 2, "level_bits": 3}"#).unwrap();
    assert!(ApotQuantizer::new(bad).is_err());
}
