use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

/// Alphanumeric filler whose length is picked uniformly from `min..=max`.
pub fn generate_random_string(min: usize, max: usize) -> String {
    let mut rng = thread_rng();
    let length = rng.gen_range(min..=max);
    rng.sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
