//! Property-based tests for the series algebra.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{ArenaEngine, MultiIndex, Series};

    const ORDER: usize = 3;

    // Coefficient tables for a two-variable series of order 3
    fn table() -> impl Strategy<Value = Vec<i64>> {
        prop::collection::vec(-20i64..20i64, ORDER * ORDER)
    }

    fn non_zero() -> impl Strategy<Value = i64> {
        prop_oneof![(-20i64..=-1i64), (1i64..=20i64)]
    }

    fn base(engine: &ArenaEngine) -> Series {
        Series::builder(engine, "x*y").order(ORDER).build().unwrap()
    }

    fn series(frame: &Series, values: &[i64]) -> Series {
        let coeffs = MultiIndex::cube(2, ORDER)
            .zip(values)
            .map(|(k, &v)| (k, v));
        frame.with_coefficients(coeffs).unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn lower_set_size(a in 0u32..4, b in 0u32..4, c in 0u32..4) {
            let k = MultiIndex::from([a, b, c]);
            let below: Vec<MultiIndex> = k.lower_set().collect();
            prop_assert_eq!(below.len(), ((a + 1) * (b + 1) * (c + 1)) as usize);
            for i in &below {
                prop_assert!(k.checked_sub(i).is_some());
                prop_assert!(i <= &k);
            }
        }

        #[test]
        fn addition_commutes(a in table(), b in table()) {
            let engine = ArenaEngine::new();
            let frame = base(&engine);
            let (a, b) = (series(&frame, &a), series(&frame, &b));
            prop_assert_eq!((&a + &b).unwrap(), (&b + &a).unwrap());
        }

        #[test]
        fn subtraction_inverts_addition(a in table(), b in table()) {
            let engine = ArenaEngine::new();
            let frame = base(&engine);
            let (a, b) = (series(&frame, &a), series(&frame, &b));
            let sum = (&a + &b).unwrap();
            prop_assert_eq!((&sum - &b).unwrap(), a);
        }

        #[test]
        fn multiplication_commutes(a in table(), b in table()) {
            let engine = ArenaEngine::new();
            let frame = base(&engine);
            let (a, b) = (series(&frame, &a), series(&frame, &b));
            prop_assert_eq!((&a * &b).unwrap(), (&b * &a).unwrap());
        }

        #[test]
        fn multiplication_distributes(a in table(), b in table(), c in table()) {
            let engine = ArenaEngine::new();
            let frame = base(&engine);
            let a = series(&frame, &a);
            let b = series(&frame, &b);
            let c = series(&frame, &c);
            let left = (&a * &(&b + &c).unwrap()).unwrap();
            let right = (&(&a * &b).unwrap() + &(&a * &c).unwrap()).unwrap();
            prop_assert_eq!(left, right);
        }

        #[test]
        fn scalars_are_homogeneous(a in table(), b in table(), s in non_zero()) {
            let engine = ArenaEngine::new();
            let frame = base(&engine);
            let (a, b) = (series(&frame, &a), series(&frame, &b));
            let scaled_first = (&a.scale(s).unwrap() * &b).unwrap();
            let scaled_after = (&a * &b).unwrap().scale(s).unwrap();
            prop_assert_eq!(&scaled_first, &scaled_after);
            prop_assert_eq!(scaled_after.div_scalar(s).unwrap(), (&a * &b).unwrap());
        }

        #[test]
        fn division_inverts_multiplication(a in table(), b in table(), lead in non_zero()) {
            let engine = ArenaEngine::new();
            let frame = base(&engine);
            let mut b = b;
            b[0] = lead;
            let (a, b) = (series(&frame, &a), series(&frame, &b));
            let product = (&a * &b).unwrap();
            prop_assert_eq!((&product / &b).unwrap(), a);
        }

        #[test]
        fn unit_is_neutral(a in table()) {
            let engine = ArenaEngine::new();
            let frame = base(&engine);
            let a = series(&frame, &a);
            let one = frame
                .with_coefficients([(MultiIndex::zero(2), 1)])
                .unwrap();
            prop_assert_eq!((&a * &one).unwrap(), a.clone());
            prop_assert_eq!((&a / &one).unwrap(), a);
        }
    }
}
