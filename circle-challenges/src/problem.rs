use crate::Result;
use rand::Rng;

/// The contract an external solver harness drives.
///
/// A harness scores candidates it produces with [`Problem::evaluate`] and seeds or
/// restarts its search with [`Problem::random_solution`]. Lower scores are better.
pub trait Problem {
    type Solution;

    fn evaluate(&self, solution: &Self::Solution) -> Result<f64>;

    /// Draws a candidate from the problem's sampling domain using the caller's rng.
    fn random_solution<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Solution;
}
