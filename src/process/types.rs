//! Trait definitions for the black-box process.
//!
//! These traits are the contract between the generic algorithms and the
//! problem-specific collaborators (representation, operators, objective).

use rand::Rng;

/// Creates and copies points of the search space.
///
/// Algorithms allocate every point once through [`create`](SearchSpace::create)
/// and afterwards only overwrite existing storage.
pub trait SearchSpace {
    /// The point representation.
    type Point;

    /// Creates a point with unspecified content.
    fn create(&self) -> Self::Point;

    /// Copies the state of `src` into `dst`.
    fn copy(&self, src: &Self::Point, dst: &mut Self::Point);
}

/// Samples a random point.
pub trait NullaryOperator<X> {
    /// Overwrites `dest` with a random point.
    fn apply<R: Rng>(&self, dest: &mut X, rng: &mut R);
}

/// Produces a neighbor of one point.
///
/// # Enumeration
///
/// Operators with a finite neighborhood may also enumerate it completely.
/// Enumeration stops as soon as the visitor returns `true`; in that case
/// `dest` must still hold the candidate the visitor was shown last, so
/// the caller can adopt it (usually with [`std::mem::swap`]).
pub trait UnaryOperator<X> {
    /// Writes a random neighbor of `src` into `dest`.
    fn apply<R: Rng>(&self, src: &X, dest: &mut X, rng: &mut R);

    /// Whether [`enumerate`](UnaryOperator::enumerate) is supported.
    fn can_enumerate(&self) -> bool {
        false
    }

    /// Visits every neighbor of `src`, building each one in `dest`.
    ///
    /// Returns `true` if the visitor requested a stop, `false` if the whole
    /// neighborhood has been visited.
    ///
    /// The default implementation visits nothing. Algorithms that rely on
    /// enumeration check [`can_enumerate`](UnaryOperator::can_enumerate)
    /// at construction.
    fn enumerate<R, V>(&self, _rng: &mut R, _src: &X, _dest: &mut X, _visitor: V) -> bool
    where
        R: Rng,
        V: FnMut(&X) -> bool,
    {
        false
    }
}

/// Recombines two points.
pub trait BinaryOperator<X> {
    /// Writes a combination of `parent_a` and `parent_b` into `dest`.
    fn apply<R: Rng>(&self, parent_a: &X, parent_b: &X, dest: &mut X, rng: &mut R);
}

/// Maps a point to its quality. Lower is better.
///
/// Implemented for every `Fn(&X) -> f64`.
pub trait ObjectiveFunction<X> {
    /// Computes the quality of `point`. Must never return NaN.
    fn evaluate(&self, point: &X) -> f64;

    /// A lower bound for the quality, used as the default goal.
    fn lower_bound(&self) -> f64 {
        f64::NEG_INFINITY
    }
}

impl<X, F> ObjectiveFunction<X> for F
where
    F: Fn(&X) -> f64,
{
    fn evaluate(&self, point: &X) -> f64 {
        self(point)
    }
}

/// Budget-counted evaluation and the termination predicate.
pub trait Evaluator<X> {
    /// Evaluates `point`. Each call counts toward the budget.
    fn evaluate(&mut self, point: &X) -> f64;

    /// Whether the algorithm has to stop now.
    ///
    /// Once this returns `true` it keeps returning `true`.
    fn should_terminate(&self) -> bool;
}

/// The oracle an algorithm is run against.
///
/// The process also remembers the best point ever evaluated: algorithms do
/// not return results, they only drive evaluations.
pub trait BlackBoxProcess {
    /// The point representation.
    type Point;
    /// The random source.
    type Rng: Rng;
    /// The search space.
    type Space: SearchSpace<Point = Self::Point>;
    /// The nullary operator.
    type Nullary: NullaryOperator<Self::Point>;
    /// The unary operator.
    type Unary: UnaryOperator<Self::Point>;
    /// The binary operator.
    type Binary: BinaryOperator<Self::Point>;
    /// The budget-counting evaluator.
    type Evaluator: Evaluator<Self::Point>;

    /// Lends all collaborators at once, with disjoint borrows.
    fn parts(&mut self) -> ProcessParts<'_, Self>;
}

/// Borrowed view of every collaborator of a [`BlackBoxProcess`].
pub struct ProcessParts<'a, P: BlackBoxProcess + ?Sized> {
    pub rng: &'a mut P::Rng,
    pub space: &'a P::Space,
    pub nullary: &'a P::Nullary,
    pub unary: &'a P::Unary,
    pub binary: &'a P::Binary,
    pub evaluator: &'a mut P::Evaluator,
}

impl<P: BlackBoxProcess + ?Sized> ProcessParts<'_, P> {
    /// Evaluates `point` against the budget.
    pub fn evaluate(&mut self, point: &P::Point) -> f64 {
        self.evaluator.evaluate(point)
    }

    /// Whether the algorithm has to stop now.
    pub fn should_terminate(&self) -> bool {
        self.evaluator.should_terminate()
    }

    /// Allocates a new point and fills it with the nullary operator.
    pub fn random_point(&mut self) -> P::Point {
        let mut point = self.space.create();
        self.nullary.apply(&mut point, self.rng);
        point
    }
}
