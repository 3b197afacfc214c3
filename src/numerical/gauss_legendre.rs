// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Fixed-order Gauss-Legendre quadrature on a finite interval.
//!
//! Nodes and weights for orders 1..=5 are tabulated on the reference interval
//! [-1, 1] and mapped to [a, b] with the linear change of variables
//! `x = 0.5(b-a)p + 0.5(b+a)`, `w' = 0.5(b-a)w`. An n-point rule is exact for
//! polynomials of degree <= 2n-1. Reversed bounds (a > b) give the negated integral.
use crate::numerical::integration_error::{IntegrationError, IntegrationResult};
use nalgebra::DVector;

/// order used when the caller has no preference
pub const DEFAULT_GAUSS_POINTS: usize = 3;
/// largest tabulated order
pub const MAX_GAUSS_POINTS: usize = 5;

/// (node, weight) pairs on [-1, 1], nodes ascending, row k is the (k+1)-point rule
const GAUSS_LEGENDRE_TABLE: [&[(f64, f64)]; MAX_GAUSS_POINTS] = [
    &[(0.0, 2.0)],
    &[
        (-0.577_350_269_189_625_8, 1.0),
        (0.577_350_269_189_625_8, 1.0),
    ],
    &[
        (-0.774_596_669_241_483_4, 0.555_555_555_555_555_6),
        (0.0, 0.888_888_888_888_888_9),
        (0.774_596_669_241_483_4, 0.555_555_555_555_555_6),
    ],
    &[
        (-0.861_136_311_594_052_6, 0.347_854_845_137_453_9),
        (-0.339_981_043_584_856_3, 0.652_145_154_862_546_1),
        (0.339_981_043_584_856_3, 0.652_145_154_862_546_1),
        (0.861_136_311_594_052_6, 0.347_854_845_137_453_9),
    ],
    &[
        (-0.906_179_845_938_664, 0.236_926_885_056_189_1),
        (-0.538_469_310_105_683_1, 0.478_628_670_499_366_5),
        (0.0, 0.568_888_888_888_888_9),
        (0.538_469_310_105_683_1, 0.478_628_670_499_366_5),
        (0.906_179_845_938_664, 0.236_926_885_056_189_1),
    ],
];

/// Trait for a real function of one real argument to be integrated.
/// Any `Fn(f64) -> f64` closure is an integrand; functions that are cheaper to
/// evaluate on the whole set of nodes at once can be wrapped in [`VectorizedIntegrand`]
pub trait Integrand {
    /// Evaluate the function at point x
    fn evaluate(&self, x: f64) -> f64;

    /// Evaluate the function at all nodes in one call
    fn evaluate_nodes(&self, nodes: &DVector<f64>) -> DVector<f64> {
        nodes.map(|x| self.evaluate(x))
    }

    /// Get function name for debugging/logging
    fn name(&self) -> &str {
        "unnamed_integrand"
    }
}

impl<F> Integrand for F
where
    F: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> f64 {
        self(x)
    }
}

/// wrapper for functions written for a whole vector of arguments
pub struct VectorizedIntegrand<F>
where
    F: Fn(&DVector<f64>) -> DVector<f64>,
{
    func: F,
    name: String,
}

impl<F> VectorizedIntegrand<F>
where
    F: Fn(&DVector<f64>) -> DVector<f64>,
{
    pub fn new(func: F, name: String) -> Self {
        Self { func, name }
    }
}

impl<F> Integrand for VectorizedIntegrand<F>
where
    F: Fn(&DVector<f64>) -> DVector<f64>,
{
    fn evaluate(&self, x: f64) -> f64 {
        (self.func)(&DVector::from_element(1, x))[0]
    }

    fn evaluate_nodes(&self, nodes: &DVector<f64>) -> DVector<f64> {
        (self.func)(nodes)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Integration limits. `a > b` is allowed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub a: f64,
    pub b: f64,
}

impl From<(f64, f64)> for Bounds {
    fn from((a, b): (f64, f64)) -> Self {
        Bounds { a, b }
    }
}

impl TryFrom<&[f64]> for Bounds {
    type Error = IntegrationError;
    /// limits read from a list (config file, command line) must have exactly 2 elements
    fn try_from(lims: &[f64]) -> Result<Self, Self::Error> {
        match lims {
            [a, b] => Ok(Bounds { a: *a, b: *b }),
            _ => Err(IntegrationError::InvalidBounds(lims.len())),
        }
    }
}

/// Gauss-Legendre rule of a given order on the reference interval [-1, 1]
#[derive(Debug, Clone)]
pub struct GaussLegendreRule {
    order: usize,
    nodes: DVector<f64>,
    weights: DVector<f64>,
}

impl GaussLegendreRule {
    pub fn new(order: usize) -> IntegrationResult<Self> {
        if !(1..=MAX_GAUSS_POINTS).contains(&order) {
            return Err(IntegrationError::InvalidOrder(order));
        }
        let table = GAUSS_LEGENDRE_TABLE[order - 1];
        let nodes = DVector::from_iterator(order, table.iter().map(|&(p, _)| p));
        let weights = DVector::from_iterator(order, table.iter().map(|&(_, w)| w));
        Ok(Self {
            order,
            nodes,
            weights,
        })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn nodes(&self) -> &DVector<f64> {
        &self.nodes
    }

    pub fn weights(&self) -> &DVector<f64> {
        &self.weights
    }

    /// nodes and weights transformed to the interval [a, b]
    pub fn mapped(&self, bounds: impl Into<Bounds>) -> (DVector<f64>, DVector<f64>) {
        let Bounds { a, b } = bounds.into();
        let half_length = 0.5 * (b - a);
        let midpoint = 0.5 * (b + a);
        let nodes = self.nodes.map(|p| half_length * p + midpoint);
        let weights = &self.weights * half_length;
        (nodes, weights)
    }

    pub fn integrate<I>(&self, f: &I, bounds: impl Into<Bounds>) -> f64
    where
        I: Integrand + ?Sized,
    {
        let (nodes, weights) = self.mapped(bounds);
        let values = f.evaluate_nodes(&nodes);
        weights.dot(&values)
    }
}

/// Integrate `f` over `bounds` with an `npts`-point Gauss-Legendre rule, `npts` in 1..=5
/// # Example
/// ```
/// use RustedQuad::numerical::gauss_legendre::integrate_gauss;
/// // ∫₀² x³ dx = 4, exact for 2 points
/// let res = integrate_gauss(&|x: f64| x.powi(3), (0.0, 2.0), 2).unwrap();
/// assert!((res - 4.0).abs() < 1e-12);
/// ```
pub fn integrate_gauss<I>(f: &I, bounds: impl Into<Bounds>, npts: usize) -> IntegrationResult<f64>
where
    I: Integrand + ?Sized,
{
    let rule = GaussLegendreRule::new(npts)?;
    Ok(rule.integrate(f, bounds))
}
