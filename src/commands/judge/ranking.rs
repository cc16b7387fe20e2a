use super::*;

/// Rank agreement between `predicted` and `reference`, normalized to [0, 1].
///
/// Only the papers present in both orderings are compared. One shared paper
/// earns 0.5; none, or an empty input, earns 0.0.
pub fn score_ranking(predicted: &[String], reference: &[String]) -> f64 {
    if predicted.is_empty() || reference.is_empty() {
        return 0.0;
    }

    let predicted_positions = last_positions(predicted);
    let reference_positions = last_positions(reference);

    let common: Vec<&str> = reference
        .iter()
        .map(String::as_str)
        .filter(|filename| predicted_positions.contains_key(filename))
        .collect();

    match common.len() {
        0 => return 0.0,
        1 => return 0.5,
        _ => {}
    }

    let reference_ranks: Vec<usize> = common
        .iter()
        .map(|filename| reference_positions[filename])
        .collect();
    let predicted_ranks: Vec<usize> = common
        .iter()
        .map(|filename| predicted_positions[filename])
        .collect();

    let tau = kendall_tau_b(&reference_ranks, &predicted_ranks).unwrap_or(0.0);
    (tau + 1.0) / 2.0
}

fn last_positions(order: &[String]) -> HashMap<&str, usize> {
    order
        .iter()
        .enumerate()
        .map(|(index, filename)| (filename.as_str(), index))
        .collect()
}

/// Kendall's tau-b. `None` when either side is entirely tied.
pub fn kendall_tau_b(x: &[usize], y: &[usize]) -> Option<f64> {
    let n = x.len().min(y.len());
    if n < 2 {
        return None;
    }

    let mut concordant = 0_i64;
    let mut discordant = 0_i64;
    let mut x_ties = 0_i64;
    let mut y_ties = 0_i64;

    for i in 0..n {
        for j in (i + 1)..n {
            let dx = x[i].cmp(&x[j]);
            let dy = y[i].cmp(&y[j]);
            if dx.is_eq() {
                x_ties += 1;
            }
            if dy.is_eq() {
                y_ties += 1;
            }
            if dx.is_eq() || dy.is_eq() {
                continue;
            }
            if dx == dy {
                concordant += 1;
            } else {
                discordant += 1;
            }
        }
    }

    let total = (n * (n - 1) / 2) as i64;
    let denominator = (((total - x_ties) * (total - y_ties)) as f64).sqrt();
    if denominator == 0.0 {
        return None;
    }

    let tau = (concordant - discordant) as f64 / denominator;
    Some(tau.clamp(-1.0, 1.0))
}
