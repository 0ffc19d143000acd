//! Property-based tests for monomials and polynomials
//!
//! This module tests:
//! - Monomial ordering laws (totality, antisymmetry, transitivity)
//! - Compatibility of orders with multiplication and degree
//! - Ring laws and evaluation
//! - The multivariate division identity

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;
use proptest::prelude::*;
use std::cmp::Ordering;
use zariski_math::monomial::{Monomial, MonomialOrder};
use zariski_math::polynomial::{Polynomial, Term};

/// Helper to create rational
fn rat(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

fn order_strategy() -> impl Strategy<Value = MonomialOrder> {
    prop_oneof![
        Just(MonomialOrder::Lex),
        Just(MonomialOrder::GrLex),
        Just(MonomialOrder::GRevLex),
    ]
}

fn monomial_strategy(num_vars: usize) -> impl Strategy<Value = Monomial> {
    prop::collection::vec(0u32..4, num_vars).prop_map(Monomial::new)
}

/// Small sparse polynomials in three variables
fn poly_strategy() -> impl Strategy<Value = Polynomial> {
    prop::collection::vec((-5i64..=5, prop::collection::vec(0u32..3, 3)), 0..5).prop_map(
        |terms| {
            Polynomial::from_terms(
                3,
                terms
                    .into_iter()
                    .map(|(c, e)| Term::new(rat(c), Monomial::new(e))),
            )
        },
    )
}

fn point_strategy() -> impl Strategy<Value = Vec<BigRational>> {
    prop::collection::vec(-4i64..=4, 3).prop_map(|v| v.into_iter().map(rat).collect())
}

#[cfg(test)]
mod order_properties {
    use super::*;

    proptest! {
        /// Every order is total and antisymmetric
        #[test]
        fn order_antisymmetric(
            order in order_strategy(),
            a in monomial_strategy(3),
            b in monomial_strategy(3)
        ) {
            let ab = order.compare(&a, &b);
            prop_assert_eq!(ab, order.compare(&b, &a).reverse());
            prop_assert_eq!(ab == Ordering::Equal, a == b);
        }

        /// Every order is transitive
        #[test]
        fn order_transitive(
            order in order_strategy(),
            a in monomial_strategy(3),
            b in monomial_strategy(3),
            c in monomial_strategy(3)
        ) {
            if order.compare(&a, &b) != Ordering::Greater
                && order.compare(&b, &c) != Ordering::Greater
            {
                prop_assert_ne!(order.compare(&a, &c), Ordering::Greater);
            }
        }

        /// Multiplying both sides by a monomial preserves the comparison
        #[test]
        fn order_multiplicative(
            order in order_strategy(),
            a in monomial_strategy(3),
            b in monomial_strategy(3),
            c in monomial_strategy(3)
        ) {
            prop_assert_eq!(order.compare(&a, &b), order.compare(&a.mul(&c), &b.mul(&c)));
        }

        /// The unit monomial is the smallest element
        #[test]
        fn order_well_founded_start(order in order_strategy(), a in monomial_strategy(3)) {
            prop_assert_ne!(order.compare(&Monomial::one(3), &a), Ordering::Greater);
        }

        /// Graded orders compare total degree first
        #[test]
        fn graded_orders_respect_degree(a in monomial_strategy(3), b in monomial_strategy(3)) {
            prop_assume!(a.total_degree() != b.total_degree());
            let by_degree = a.total_degree().cmp(&b.total_degree());
            prop_assert_eq!(MonomialOrder::GrLex.compare(&a, &b), by_degree);
            prop_assert_eq!(MonomialOrder::GRevLex.compare(&a, &b), by_degree);
        }

        /// lcm and gcd bracket both monomials
        #[test]
        fn lcm_gcd_divisibility(a in monomial_strategy(3), b in monomial_strategy(3)) {
            let l = a.lcm(&b);
            let g = a.gcd(&b);
            prop_assert!(a.divides(&l) && b.divides(&l));
            prop_assert!(g.divides(&a) && g.divides(&b));
            prop_assert_eq!(l.mul(&g), a.mul(&b));
        }
    }
}

#[cfg(test)]
mod arithmetic_properties {
    use super::*;

    proptest! {
        /// Multiplication distributes over addition
        #[test]
        fn poly_distributive(p in poly_strategy(), q in poly_strategy(), r in poly_strategy()) {
            let lhs = &p * &(&q + &r);
            let rhs = &(&p * &q) + &(&p * &r);
            prop_assert_eq!(lhs, rhs);
        }

        /// p - p is zero and never stores zero coefficients
        #[test]
        fn poly_sub_self_is_zero(p in poly_strategy()) {
            let z = &p - &p;
            prop_assert!(z.is_zero());
            prop_assert_eq!(z.num_terms(), 0);
        }

        /// Evaluation is a ring homomorphism
        #[test]
        fn eval_homomorphism(p in poly_strategy(), q in poly_strategy(), pt in point_strategy()) {
            let pv = p.eval(&pt).unwrap();
            let qv = q.eval(&pt).unwrap();
            prop_assert_eq!((&p + &q).eval(&pt).unwrap(), &pv + &qv);
            prop_assert_eq!((&p * &q).eval(&pt).unwrap(), pv * qv);
        }

        /// make_monic yields leading coefficient one and is idempotent
        #[test]
        fn monic_idempotent(order in order_strategy(), p in poly_strategy()) {
            let m = p.make_monic(order);
            if p.is_zero() {
                prop_assert!(m.is_zero());
            } else {
                prop_assert!(m.leading_coeff(order).is_some_and(|c| c.is_one()));
            }
            prop_assert_eq!(m.make_monic(order), m);
        }

        /// Terms come out strictly decreasing
        #[test]
        fn sorted_terms_decreasing(order in order_strategy(), p in poly_strategy()) {
            let terms = p.sorted_terms(order);
            for w in terms.windows(2) {
                prop_assert_eq!(order.compare(&w[0].monomial, &w[1].monomial), Ordering::Greater);
            }
            if let Some(first) = terms.first() {
                prop_assert_eq!(Some(&first.monomial), p.leading_monomial(order));
            }
        }
    }
}

#[cfg(test)]
mod division_properties {
    use super::*;

    proptest! {
        /// f = sum(q_i * g_i) + r and no term of r is divisible by any lm(g_i)
        #[test]
        fn division_identity(
            order in order_strategy(),
            f in poly_strategy(),
            divisors in prop::collection::vec(poly_strategy(), 1..4)
        ) {
            let div = f.divide(&divisors, order);
            prop_assert_eq!(div.quotients.len(), divisors.len());

            let mut recombined = div.remainder.clone();
            for (q, g) in div.quotients.iter().zip(&divisors) {
                recombined = &recombined + &(q * g);
            }
            prop_assert_eq!(recombined, f);

            let leads: Vec<&Monomial> =
                divisors.iter().filter_map(|g| g.leading_monomial(order)).collect();
            for (m, _) in div.remainder.terms() {
                prop_assert!(leads.iter().all(|lm| !lm.divides(m)));
            }
        }

        /// Dividing by the empty list returns f as the remainder
        #[test]
        fn division_by_nothing(order in order_strategy(), f in poly_strategy()) {
            let div = f.divide(&[], order);
            prop_assert!(div.quotients.is_empty());
            prop_assert_eq!(div.remainder, f);
        }

        /// A multiple of a single divisor leaves no remainder
        #[test]
        fn division_exact_multiple(
            order in order_strategy(),
            g in poly_strategy(),
            h in poly_strategy()
        ) {
            prop_assume!(!g.is_zero());
            let f = &g * &h;
            let div = f.divide(std::slice::from_ref(&g), order);
            prop_assert!(div.remainder.is_zero());
            prop_assert_eq!(&div.quotients[0], &h);
        }
    }

    #[test]
    fn zero_dividend() {
        let g = Polynomial::variable(3, 0);
        let div = Polynomial::zero(3).divide(&[g], MonomialOrder::Lex);
        assert!(div.remainder.is_zero());
        assert!(div.quotients[0].is_zero());
    }
}
