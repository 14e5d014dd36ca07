use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `items` and split off a held-out share of `floor(ratio * len)` items.
///
/// Returns `(remainder, held_out)`. The same seed always yields the same split.
pub fn split<T>(mut items: Vec<T>, ratio: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let total = items.len();
    let held_out_len = ((total as f64) * ratio).floor() as usize;
    let held_out_len = held_out_len.min(total);

    items.shuffle(&mut StdRng::seed_from_u64(seed));

    // After this: items = held out, remainder = everything past it
    let remainder = items.split_off(held_out_len);
    let held_out = items;

    log::debug!(
        "Split {} items into {} / {} (ratio {})",
        total,
        remainder.len(),
        held_out.len(),
        ratio
    );

    (remainder, held_out)
}
