//! Mean and standard deviation of accuracies.

use num_traits::{Float, FromPrimitive};

/// mean of values, None if values is empty
pub fn mean<F>(values: &[F]) -> Option<F>
where
    F: Float + FromPrimitive,
{
    if values.is_empty() {
        return None;
    }
    let n = F::from_usize(values.len())?;
    Some(values.iter().fold(F::zero(), |acc, v| acc + *v) / n)
}

/// mean and population standard deviation (divide by n)
pub fn mean_std<F>(values: &[F]) -> Option<(F, F)>
where
    F: Float + FromPrimitive,
{
    let mu = mean(values)?;
    let n = F::from_usize(values.len())?;
    let sigma2 = values.iter().fold(F::zero(), |var, x| var + (*x - mu) * (*x - mu)) / n;
    Some((mu, sigma2.sqrt()))
} // end of mean_std

// end of mod tests
