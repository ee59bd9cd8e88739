/// Arithmetic mean over the non-NaN values. Returns NaN when nothing is defined.
pub fn nan_mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values {
        if v.is_nan() {
            continue;
        }
        sum += v;
        n += 1;
    }
    if n == 0 { f64::NAN } else { sum / n as f64 }
}

/// Largest non-NaN value, if any.
pub fn nan_max<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            Some(m) if m >= v => Some(m),
            _ => Some(v),
        })
}
