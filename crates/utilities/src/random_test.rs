use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Runs the given test function the given number of times with a seeded
/// random number generator. The seed is logged, so that a failing run can be
/// reproduced with [`random_test_with_seed`].
pub fn random_test<F>(iterations: usize, test_function: F)
where
    F: FnMut(&mut StdRng),
{
    random_test_with_seed(rand::random(), iterations, test_function)
}

/// Same as [`random_test`], but with a fixed seed.
pub fn random_test_with_seed<F>(seed: u64, iterations: usize, mut test_function: F)
where
    F: FnMut(&mut StdRng),
{
    info!("random_test seed: {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..iterations {
        test_function(&mut rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::Rng;
    use test_log::test;

    #[test]
    fn test_random_test_reproducible() {
        let mut first = Vec::new();
        random_test_with_seed(42, 10, |rng| first.push(rng.random_range(0..1000)));

        let mut second = Vec::new();
        random_test_with_seed(42, 10, |rng| second.push(rng.random_range(0..1000)));

        assert_eq!(first, second);
    }
}
