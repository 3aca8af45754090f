//! Property-based tests for exact arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::{Integer, Rational};

    // Strategy for generating small integers
    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    // Strategy for generating non-zero integers
    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    proptest! {
        #[test]
        fn integer_distributive(a in small_int(), b in small_int(), c in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let c = Integer::new(c);
            prop_assert_eq!(
                a.clone() * (b.clone() + c.clone()),
                a.clone() * b.clone() + a.clone() * c.clone()
            );
        }

        #[test]
        fn factorial_recurrence(n in 1u32..40u32) {
            prop_assert_eq!(
                Integer::factorial(n),
                Integer::factorial(n - 1) * Integer::from(u64::from(n))
            );
        }

        #[test]
        fn rational_distributive(
            num_a in small_int(),
            den_a in non_zero_int(),
            num_b in small_int(),
            den_b in non_zero_int(),
            num_c in small_int(),
            den_c in non_zero_int()
        ) {
            let a = Rational::from_i64(num_a, den_a);
            let b = Rational::from_i64(num_b, den_b);
            let c = Rational::from_i64(num_c, den_c);
            prop_assert_eq!(
                a.clone() * (b.clone() + c.clone()),
                a.clone() * b.clone() + a.clone() * c.clone()
            );
        }

        #[test]
        fn rational_multiplicative_inverse(num in non_zero_int(), den in non_zero_int()) {
            let a = Rational::from_i64(num, den);
            let product = a.clone() * a.recip();
            prop_assert!(product.is_one());
        }

        #[test]
        fn rational_display_parses_back(num in small_int(), den in non_zero_int()) {
            let a = Rational::from_i64(num, den);
            let parsed: Rational = a.to_string().parse().unwrap();
            prop_assert_eq!(parsed, a);
        }

        #[test]
        fn rational_from_f64_round_trips(value in -1.0e6f64..1.0e6f64) {
            let exact = Rational::from_f64(value).unwrap();
            prop_assert_eq!(exact.to_f64(), value);
        }

        #[test]
        fn checked_powi_negative_is_reciprocal(num in non_zero_int(), den in non_zero_int(), e in 0i64..6i64) {
            let a = Rational::from_i64(num, den);
            let up = a.checked_powi(e).unwrap();
            let down = a.checked_powi(-e).unwrap();
            prop_assert!((up * down).is_one());
        }

        #[test]
        fn signum_matches_sign_of_numerator(num in small_int(), den in non_zero_int()) {
            let a = Rational::from_i64(num, den);
            let expected = (num.signum() * den.signum()) as i8;
            prop_assert_eq!(a.signum(), expected);
            prop_assert_eq!(a.is_zero(), num == 0);
        }
    }
}
