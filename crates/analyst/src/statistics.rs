//! Pure statistics over decimal sequences.
//!
//! Raw reductions (`mean`, `population_std_dev`) keep full decimal precision;
//! callers publish them through [`round_half_up`] (or [`floor_to_cents`] where a
//! figure is truncated instead). Thresholds are built from published figures
//! only, so re-running a query over the same data is reproducible to the cent.

use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use thiserror::Error;

/// Decimal places of every published statistic.
pub const PUBLISHED_SCALE: u32 = 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatisticsError {
    #[error("cannot compute {0} of an empty sequence")]
    EmptySequence(&'static str),

    #[error("decimal overflow while computing {0}")]
    Overflow(&'static str),
}

pub type StatisticsResult<T> = Result<T, StatisticsError>;

/// Exact sum, failing instead of wrapping or panicking on overflow.
pub fn sum(xs: &[Decimal]) -> StatisticsResult<Decimal> {
    xs.iter().try_fold(Decimal::ZERO, |acc, x| {
        acc.checked_add(*x).ok_or(StatisticsError::Overflow("sum"))
    })
}

/// `total / count`; a zero count is an empty sequence, never 0 or NaN.
pub fn ratio(total: Decimal, count: usize) -> StatisticsResult<Decimal> {
    if count == 0 {
        return Err(StatisticsError::EmptySequence("ratio"));
    }
    total
        .checked_div(Decimal::from(count))
        .ok_or(StatisticsError::Overflow("ratio"))
}

pub fn mean(xs: &[Decimal]) -> StatisticsResult<Decimal> {
    if xs.is_empty() {
        return Err(StatisticsError::EmptySequence("mean"));
    }
    ratio(sum(xs)?, xs.len())
}

/// Variance with divisor N.
pub fn population_variance(xs: &[Decimal]) -> StatisticsResult<Decimal> {
    if xs.is_empty() {
        return Err(StatisticsError::EmptySequence("variance"));
    }
    let mean = mean(xs)?;
    let squared: Vec<Decimal> = xs
        .iter()
        .map(|x| {
            let d = *x - mean;
            d.checked_mul(d).ok_or(StatisticsError::Overflow("variance"))
        })
        .collect::<StatisticsResult<_>>()?;
    ratio(sum(&squared)?, xs.len())
}

/// Standard deviation with divisor N (not N-1).
pub fn population_std_dev(xs: &[Decimal]) -> StatisticsResult<Decimal> {
    if xs.is_empty() {
        return Err(StatisticsError::EmptySequence("standard deviation"));
    }
    population_variance(xs)?
        .sqrt()
        .ok_or(StatisticsError::Overflow("standard deviation"))
}

/// Round to [`PUBLISHED_SCALE`] places, halves away from zero (half-up for the
/// non-negative figures published here). The result always carries exactly that
/// scale, so zero publishes as `0.00`.
pub fn round_half_up(value: Decimal) -> Decimal {
    publish(value, RoundingStrategy::MidpointAwayFromZero)
}

/// Truncate towards negative infinity at [`PUBLISHED_SCALE`] places.
pub fn floor_to_cents(value: Decimal) -> Decimal {
    publish(value, RoundingStrategy::ToNegativeInfinity)
}

fn publish(value: Decimal, strategy: RoundingStrategy) -> Decimal {
    let mut published = value.round_dp_with_strategy(PUBLISHED_SCALE, strategy);
    published.rescale(PUBLISHED_SCALE);
    published
}

/// Counts as decimals, for feeding per-entity tallies into the reductions.
pub fn counts<I>(counts: I) -> Vec<Decimal>
where
    I: IntoIterator<Item = usize>,
{
    counts.into_iter().map(Decimal::from).collect()
}
