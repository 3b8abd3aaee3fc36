pub fn mean(samples: &[u64]) -> Option<f64> {
    match samples.len() {
        0 => None,
        count => Some(samples.iter().map(|&v| v as f64).sum::<f64>() / count as f64),
    }
}

/// Population standard deviation
pub fn std_dev(samples: &[u64]) -> Option<f64> {
    let data_mean = mean(samples)?;
    let variance = samples
        .iter()
        .map(|&value| {
            let diff = data_mean - value as f64;

            diff * diff
        })
        .sum::<f64>()
        / samples.len() as f64;

    Some(variance.sqrt())
}
