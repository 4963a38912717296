// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serp_crawlrs::infrastructure::search::headers::{MANDATORY_HEADERS, OPTIONAL_HEADERS};
use serp_crawlrs::infrastructure::search::HeaderGenerator;

#[test]
fn test_generated_names_come_from_known_tables() {
    let generator = HeaderGenerator::new();
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..500 {
        let headers = generator.generate(&mut rng);
        assert!(headers.len() >= MANDATORY_HEADERS.len());
        assert!(headers.len() <= MANDATORY_HEADERS.len() + OPTIONAL_HEADERS.len());

        for (name, value) in &headers {
            let candidates = MANDATORY_HEADERS
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, c)| *c)
                .or_else(|| {
                    OPTIONAL_HEADERS
                        .iter()
                        .find(|(n, _, _)| n == name)
                        .map(|(_, _, c)| *c)
                })
                .unwrap_or_else(|| panic!("unexpected header {}", name));
            assert!(candidates.contains(value));
        }
    }
}

#[test]
fn test_different_seeds_eventually_differ() {
    let generator = HeaderGenerator::new();
    let a: Vec<_> = {
        let mut rng = StdRng::seed_from_u64(1);
        (0..10).map(|_| generator.generate(&mut rng)).collect()
    };
    let b: Vec<_> = {
        let mut rng = StdRng::seed_from_u64(2);
        (0..10).map(|_| generator.generate(&mut rng)).collect()
    };

    assert_ne!(a, b);
}
