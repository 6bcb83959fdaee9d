use num::Num;

use crate::error::{Result, SimilarityError};

pub trait Compare<N>
where
    N: Num + Copy,
{
    /// dot product
    /// d(a, b) = Σ(a_i * b_i)
    fn dot(vec: &[N], other: &[N]) -> Result<f64>;
    /// euclidean norm
    /// ||a|| = sqrt(Σ(a_i^2))
    fn norm(vec: &[N]) -> f64;
    /// cosine similarity
    /// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
    /// An all-zero side yields `0.0`, never NaN.
    fn cosine_similarity(vec: &[N], other: &[N]) -> Result<f64>;
}

#[derive(Debug)]
pub struct DefaultCompare;

#[inline(always)]
fn check_dim(left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(SimilarityError::DimensionMismatch { left, right });
    }
    Ok(())
}

/// impl Compare for every numeric type that widens into f64 (u8, u16, u32, f32, f64, ...)
impl<N> Compare<N> for DefaultCompare
where
    N: Num + Copy + Into<f64>,
{
    #[inline(always)]
    fn dot(vec: &[N], other: &[N]) -> Result<f64> {
        check_dim(vec.len(), other.len())?;
        Ok(vec
            .iter()
            .zip(other)
            .map(|(&a, &b)| a.into() * b.into())
            .sum())
    }

    #[inline(always)]
    fn norm(vec: &[N]) -> f64 {
        vec.iter()
            .map(|&a| {
                let a: f64 = a.into();
                a * a
            })
            .sum::<f64>()
            .sqrt()
    }

    #[inline(always)]
    fn cosine_similarity(vec: &[N], other: &[N]) -> Result<f64> {
        check_dim(vec.len(), other.len())?;
        let mut dot = 0_f64;
        let mut norm_a = 0_f64;
        let mut norm_b = 0_f64;
        for (&a, &b) in vec.iter().zip(other) {
            let (a, b): (f64, f64) = (a.into(), b.into());
            dot += a * b;
            norm_a += a * a;
            norm_b += b * b;
        }
        if norm_a == 0.0 || norm_b == 0.0 {
            return Ok(0.0);
        }
        Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
    }
}
