//! JSON problem files accepted by the subcommands.

use anyhow::{Context, Result, bail};
use num_bigint::BigInt;
use num_rational::BigRational;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use zariski_math::field::{Field, RationalField};
use zariski_math::matrix::Matrix;
use zariski_math::number_field::NumberField;
use zariski_math::parse::{parse_polynomial, parse_rational};
use zariski_math::polynomial::Polynomial;

/// Read and deserialize a problem file.
pub(crate) fn load<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid problem file {}", path.display()))
}

/// A rational written either as a JSON integer or as text (`"3/4"`, `"0.5"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Scalar {
    Int(i64),
    Text(String),
}

impl Scalar {
    pub(crate) fn to_rational(&self) -> Result<BigRational> {
        match self {
            Scalar::Int(n) => Ok(BigRational::from_integer(BigInt::from(*n))),
            Scalar::Text(s) => parse_rational(s).with_context(|| format!("invalid rational '{s}'")),
        }
    }
}

/// A matrix entry: a rational, or low-to-high coefficients over Q(α).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Entry {
    Scalar(Scalar),
    Coeffs(Vec<Scalar>),
}

/// `groebner FILE`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct GroebnerProblem {
    pub variables: Vec<String>,
    pub polynomials: Vec<String>,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub max_iterations: Option<usize>,
}

impl GroebnerProblem {
    pub(crate) fn generators(&self) -> Result<Vec<Polynomial>> {
        check_variables(&self.variables)?;
        self.polynomials
            .iter()
            .enumerate()
            .map(|(i, text)| {
                parse_polynomial(text, &self.variables)
                    .with_context(|| format!("polynomial #{} '{text}'", i + 1))
            })
            .collect()
    }
}

/// `det FILE` and `inverse FILE`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct MatrixProblem {
    pub matrix: Vec<Vec<Entry>>,
    /// Minimal polynomial of α, coefficients low to high.
    #[serde(default)]
    pub minimal_polynomial: Option<Vec<Scalar>>,
    /// Name used when printing α.
    #[serde(default)]
    pub generator: Option<String>,
}

/// The matrix of a [`MatrixProblem`] over the field it names.
pub(crate) enum FieldMatrix {
    Rational(Matrix<RationalField>),
    NumberField(Matrix<NumberField>),
}

impl MatrixProblem {
    pub(crate) fn build(&self) -> Result<FieldMatrix> {
        let Some(minimal) = &self.minimal_polynomial else {
            let m = build_matrix(RationalField, &self.matrix, |entry| match entry {
                Entry::Scalar(s) => s.to_rational(),
                Entry::Coeffs(_) => {
                    bail!("coefficient arrays need a minimal_polynomial")
                }
            })?;
            return Ok(FieldMatrix::Rational(m));
        };

        let coeffs = minimal
            .iter()
            .map(Scalar::to_rational)
            .collect::<Result<Vec<_>>>()?;
        let mut field = NumberField::new(coeffs).context("invalid minimal_polynomial")?;
        if let Some(name) = &self.generator {
            field = field.with_generator_name(name.clone());
        }
        let k = field.clone();
        let m = build_matrix(field, &self.matrix, |entry| match entry {
            Entry::Scalar(s) => Ok(k.from_rational(&s.to_rational()?)),
            Entry::Coeffs(cs) => Ok(k.element(
                cs.iter()
                    .map(Scalar::to_rational)
                    .collect::<Result<Vec<_>>>()?,
            )),
        })?;
        Ok(FieldMatrix::NumberField(m))
    }
}

fn build_matrix<K: Field>(
    field: K,
    rows: &[Vec<Entry>],
    convert: impl Fn(&Entry) -> Result<K::Element>,
) -> Result<Matrix<K>> {
    let rows = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row.iter()
                .enumerate()
                .map(|(j, e)| {
                    convert(e).with_context(|| format!("matrix entry ({}, {})", i + 1, j + 1))
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Matrix::from_rows(field, rows)?)
}

/// `closure FILE`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ClosureProblem {
    #[serde(default)]
    pub variables: Option<Vec<String>>,
    #[serde(default)]
    pub points: Option<Vec<Vec<Scalar>>>,
    /// Orbit samples; each contributes its entries row-major as a point.
    #[serde(default)]
    pub matrices: Option<Vec<Vec<Vec<Scalar>>>>,
    pub degree: u32,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub max_iterations: Option<usize>,
}

impl ClosureProblem {
    /// All sample points: explicit points first, then flattened matrices.
    pub(crate) fn sample_points(&self) -> Result<Vec<Vec<BigRational>>> {
        let mut points = Vec::new();
        for p in self.points.iter().flatten() {
            points.push(p.iter().map(Scalar::to_rational).collect::<Result<Vec<_>>>()?);
        }

        let mut matrices = Vec::new();
        for (idx, rows) in self.matrices.iter().flatten().enumerate() {
            let rows = rows
                .iter()
                .map(|r| r.iter().map(Scalar::to_rational).collect::<Result<Vec<_>>>())
                .collect::<Result<Vec<_>>>()?;
            let m = Matrix::from_rows(RationalField, rows)
                .with_context(|| format!("matrix #{}", idx + 1))?;
            matrices.push(m);
        }
        points.extend(zariski_math::closure::flatten_matrices(&matrices));

        if points.is_empty() {
            bail!("closure problem needs at least one point or matrix");
        }
        Ok(points)
    }

    /// Declared variable names, or `x1..xk`.
    pub(crate) fn variable_names(&self, num_vars: usize) -> Result<Vec<String>> {
        match &self.variables {
            Some(vars) => {
                if vars.len() != num_vars {
                    bail!(
                        "{} variables declared but points have {} coordinates",
                        vars.len(),
                        num_vars
                    );
                }
                check_variables(vars)?;
                Ok(vars.clone())
            }
            None => Ok((1..=num_vars).map(|i| format!("x{i}")).collect()),
        }
    }
}

fn check_variables(vars: &[String]) -> Result<()> {
    for (i, v) in vars.iter().enumerate() {
        let valid = v
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && v.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            bail!("invalid variable name '{v}'");
        }
        if vars[..i].contains(v) {
            bail!("duplicate variable '{v}'");
        }
    }
    Ok(())
}
