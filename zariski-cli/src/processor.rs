//! Runs the engine on a loaded problem and builds a printable report.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::info;
use zariski_math::closure::vanishing_ideal;
use zariski_math::field::Field;
use zariski_math::grobner::{
    BuchbergerConfig, BuchbergerStats, DEFAULT_MAX_ITERATIONS, GroebnerBasis, grobner_basis,
};
use zariski_math::matrix::Matrix;
use zariski_math::monomial::MonomialOrder;
use zariski_math::parse::parse_order;

use crate::input::{self, ClosureProblem, FieldMatrix, GroebnerProblem, MatrixProblem};

/// Engine settings from one source (command line or config file).
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct EngineSettings {
    pub order: Option<MonomialOrder>,
    pub max_iterations: Option<usize>,
}

/// Resolve the completion config: command line, then problem file, then
/// config file, then built-in defaults.
pub(crate) fn resolve_config(
    cli: &EngineSettings,
    file: &EngineSettings,
    problem_order: Option<&str>,
    problem_max_iterations: Option<usize>,
) -> Result<BuchbergerConfig> {
    let problem_order = problem_order
        .map(parse_order)
        .transpose()
        .context("invalid order in problem file")?;
    let order = cli.order.or(problem_order).or(file.order).unwrap_or_default();
    let max_iterations = cli
        .max_iterations
        .or(problem_max_iterations)
        .or(file.max_iterations)
        .unwrap_or(DEFAULT_MAX_ITERATIONS);
    Ok(BuchbergerConfig::new()
        .with_order(order)
        .with_max_iterations(max_iterations))
}

/// Result of `groebner` and `closure`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct BasisReport {
    pub variables: Vec<String>,
    pub order: MonomialOrder,
    pub basis: Vec<String>,
    pub truncated: bool,
    pub stats: BuchbergerStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<u32>,
}

impl BasisReport {
    fn new(variables: Vec<String>, basis: &GroebnerBasis) -> Self {
        Self {
            basis: basis
                .polynomials
                .iter()
                .map(|p| p.display_with(&variables, basis.order))
                .collect(),
            variables,
            order: basis.order,
            truncated: basis.truncated,
            stats: basis.stats,
            points: None,
            degree: None,
        }
    }
}

/// Result of `det`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct DeterminantReport {
    pub field: String,
    pub size: usize,
    pub determinant: String,
}

/// Result of `inverse`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct InverseReport {
    pub field: String,
    pub size: usize,
    pub inverse: Vec<Vec<String>>,
}

pub(crate) fn run_groebner(
    path: &Path,
    cli: &EngineSettings,
    file: &EngineSettings,
) -> Result<BasisReport> {
    let problem: GroebnerProblem = input::load(path)?;
    let generators = problem.generators()?;
    let config = resolve_config(
        cli,
        file,
        problem.order.as_deref(),
        problem.max_iterations,
    )?;
    info!(
        generators = generators.len(),
        order = %config.order,
        max_iterations = config.max_iterations,
        "computing Gröbner basis"
    );
    let basis = grobner_basis(&generators, &config)?;
    Ok(BasisReport::new(problem.variables, &basis))
}

pub(crate) fn run_closure(
    path: &Path,
    cli: &EngineSettings,
    file: &EngineSettings,
) -> Result<BasisReport> {
    let problem: ClosureProblem = input::load(path)?;
    let points = problem.sample_points()?;
    let num_vars = points.first().map_or(0, Vec::len);
    let variables = problem.variable_names(num_vars)?;
    let config = resolve_config(
        cli,
        file,
        problem.order.as_deref(),
        problem.max_iterations,
    )?;
    info!(
        points = points.len(),
        degree = problem.degree,
        "approximating vanishing ideal"
    );
    let basis = vanishing_ideal(&points, problem.degree, &config)?;
    let mut report = BasisReport::new(variables, &basis);
    report.points = Some(points.len());
    report.degree = Some(problem.degree);
    Ok(report)
}

fn field_name(m: &FieldMatrix) -> String {
    match m {
        FieldMatrix::Rational(_) => "Q".to_string(),
        FieldMatrix::NumberField(m) => {
            let k = m.field();
            format!("Q({}), degree {}", k.generator_name(), k.degree())
        }
    }
}

fn render_entries<K: Field>(m: &Matrix<K>) -> Vec<Vec<String>> {
    m.rows()
        .iter()
        .map(|row| row.iter().map(|a| m.field().format_el(a)).collect())
        .collect()
}

pub(crate) fn run_determinant(path: &Path) -> Result<DeterminantReport> {
    let problem: MatrixProblem = input::load(path)?;
    let matrix = problem.build()?;
    let (size, determinant) = match &matrix {
        FieldMatrix::Rational(m) => (m.size(), m.field().format_el(&m.determinant())),
        FieldMatrix::NumberField(m) => (m.size(), m.field().format_el(&m.determinant())),
    };
    Ok(DeterminantReport {
        field: field_name(&matrix),
        size,
        determinant,
    })
}

pub(crate) fn run_inverse(path: &Path) -> Result<InverseReport> {
    let problem: MatrixProblem = input::load(path)?;
    let matrix = problem.build()?;
    let (size, inverse) = match &matrix {
        FieldMatrix::Rational(m) => (m.size(), render_entries(&m.inverse()?)),
        FieldMatrix::NumberField(m) => (m.size(), render_entries(&m.inverse()?)),
    };
    Ok(InverseReport {
        field: field_name(&matrix),
        size,
        inverse,
    })
}
