//! Property-based tests for S-polynomials and Buchberger completion

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;
use proptest::prelude::*;
use std::cmp::Ordering;
use zariski_math::grobner::*;
use zariski_math::monomial::{Monomial, MonomialOrder};
use zariski_math::polynomial::{Polynomial, Term};

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

/// Sparse polynomials in two variables of degree at most two per variable
fn poly_strategy() -> impl Strategy<Value = Polynomial> {
    prop::collection::vec((-3i64..=3, prop::collection::vec(0u32..3, 2)), 1..4).prop_map(
        |terms| {
            Polynomial::from_terms(
                2,
                terms
                    .into_iter()
                    .map(|(c, e)| Term::new(rat(c), Monomial::new(e))),
            )
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The leading terms cancel in an S-polynomial
    #[test]
    fn s_polynomial_cancels_leads(
        order in order_strategy(),
        f in poly_strategy(),
        g in poly_strategy()
    ) {
        prop_assume!(!f.is_zero() && !g.is_zero());
        let s = s_polynomial(&f, &g, order);
        let lcm = f
            .leading_monomial(order)
            .zip(g.leading_monomial(order))
            .map(|(a, b)| a.lcm(b));
        if let (Some(lm), Some(lcm)) = (s.leading_monomial(order), lcm) {
            prop_assert_eq!(order.compare(lm, &lcm), Ordering::Less);
        }
    }

    /// S(f, g) = -S(g, f)
    #[test]
    fn s_polynomial_antisymmetric(
        order in order_strategy(),
        f in poly_strategy(),
        g in poly_strategy()
    ) {
        prop_assert_eq!(s_polynomial(&f, &g, order), -s_polynomial(&g, &f, order));
    }

    /// Generators belong to the ideal of the completed basis, which is
    /// monic, minimal and a Gröbner basis
    #[test]
    fn buchberger_basis_properties(
        order in order_strategy(),
        gens in prop::collection::vec(poly_strategy(), 1..4)
    ) {
        let config = BuchbergerConfig::default().with_order(order);
        let basis = grobner_basis(&gens, &config).unwrap();
        prop_assume!(!basis.truncated);

        for g in &gens {
            prop_assert!(ideal_membership(g, &basis.polynomials, order));
        }
        prop_assert!(is_groebner_basis(&basis.polynomials, order));

        let leads: Vec<&Monomial> = basis
            .polynomials
            .iter()
            .map(|p| p.leading_monomial(order))
            .collect::<Option<_>>()
            .expect("basis has no zero polynomials");
        for (i, p) in basis.polynomials.iter().enumerate() {
            prop_assert!(p.leading_coeff(order).is_some_and(|c| c.is_one()));
            for (j, lm) in leads.iter().enumerate() {
                if i != j {
                    prop_assert!(!lm.divides(leads[i]));
                }
            }
        }
    }

    /// Completing a reduced basis again changes nothing
    #[test]
    fn buchberger_idempotent(
        order in order_strategy(),
        gens in prop::collection::vec(poly_strategy(), 1..3)
    ) {
        let config = BuchbergerConfig::default().with_order(order);
        let first = grobner_basis(&gens, &config).unwrap();
        prop_assume!(!first.truncated);
        let second = grobner_basis(&first.polynomials, &config).unwrap();
        prop_assert_eq!(second.polynomials, first.polynomials);
    }

    /// Anything in the ideal reduces to zero modulo the basis
    #[test]
    fn ideal_combinations_are_members(
        order in order_strategy(),
        f in poly_strategy(),
        g in poly_strategy(),
        a in poly_strategy(),
        b in poly_strategy()
    ) {
        let config = BuchbergerConfig::default().with_order(order);
        let basis = grobner_basis(&[f.clone(), g.clone()], &config).unwrap();
        prop_assume!(!basis.truncated);
        let combo = &(&a * &f) + &(&b * &g);
        prop_assert!(basis.contains(&combo));
    }
}
