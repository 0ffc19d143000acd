//! Property-based tests for exact matrix algebra

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use proptest::prelude::*;
use zariski_math::error::MathError;
use zariski_math::field::{Field, RationalField};
use zariski_math::matrix::Matrix;
use zariski_math::number_field::NumberField;

fn rat(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

fn matrix_strategy(n: usize) -> impl Strategy<Value = Matrix<RationalField>> {
    prop::collection::vec(prop::collection::vec(-4i64..=4, n), n).prop_map(move |rows| {
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(rat).collect())
            .collect();
        Matrix::from_rows(RationalField, rows).expect("square by construction")
    })
}

/// Q(sqrt 2)
fn sqrt2_field() -> NumberField {
    NumberField::new(vec![rat(-2), rat(0), rat(1)]).expect("x^2 - 2 is monic")
}

proptest! {
    /// A * inv(A) = I and det(A) * det(inv(A)) = 1, or A is singular
    #[test]
    fn inverse_law(a in (1usize..=4).prop_flat_map(matrix_strategy)) {
        let det = a.determinant();
        match a.inverse() {
            Ok(inv) => {
                prop_assert!(!det.is_zero());
                prop_assert!(a.mul(&inv).unwrap().is_identity());
                prop_assert!(inv.mul(&a).unwrap().is_identity());
                prop_assert!((det * inv.determinant()).is_one());
            }
            Err(e) => {
                prop_assert_eq!(e, MathError::SingularMatrix);
                prop_assert!(det.is_zero());
            }
        }
    }

    /// Cofactor and elimination determinants agree for n <= 3
    #[test]
    fn determinant_paths_agree(a in matrix_strategy(3)) {
        prop_assert_eq!(a.determinant_cofactor(), Some(a.determinant_elimination()));
    }

    /// det(AB) = det(A) det(B)
    #[test]
    fn determinant_multiplicative(a in matrix_strategy(4), b in matrix_strategy(4)) {
        let ab = a.mul(&b).unwrap();
        prop_assert_eq!(ab.determinant(), a.determinant() * b.determinant());
    }

    /// det(A^T) = det(A)
    #[test]
    fn determinant_transpose(a in matrix_strategy(4)) {
        prop_assert_eq!(a.transpose().determinant(), a.determinant());
    }

    /// Every nonzero element of Q(sqrt 2) is invertible
    #[test]
    fn number_field_inverse(p in -6i64..=6, q in -6i64..=6) {
        let k = sqrt2_field();
        let a = k.element(vec![rat(p), rat(q)]);
        if k.is_zero(&a) {
            prop_assert_eq!(k.inv(&a), Err(MathError::NotInvertible));
        } else {
            let inv = k.inv(&a).unwrap();
            prop_assert!(k.is_one(&k.mul(&a, &inv)));
            // N(a) = p^2 - 2 q^2
            prop_assert_eq!(k.norm(&a), rat(p * p - 2 * q * q));
        }
    }

    /// The inverse law also holds over Q(sqrt 2)
    #[test]
    fn number_field_matrix_inverse(entries in prop::collection::vec((-3i64..=3, -3i64..=3), 4)) {
        let k = sqrt2_field();
        let elems: Vec<_> = entries
            .iter()
            .map(|&(p, q)| k.element(vec![rat(p), rat(q)]))
            .collect();
        let a = Matrix::from_rows(
            k.clone(),
            vec![elems[..2].to_vec(), elems[2..].to_vec()],
        )
        .unwrap();
        let det = a.determinant();
        prop_assert!(k.eq_el(&det, &a.determinant_elimination()));
        match a.inverse() {
            Ok(inv) => {
                prop_assert!(a.mul(&inv).unwrap().is_identity());
                prop_assert!(k.is_one(&k.mul(&det, &inv.determinant())));
            }
            Err(e) => {
                prop_assert_eq!(e, MathError::SingularMatrix);
                prop_assert!(k.is_zero(&det));
            }
        }
    }
}
