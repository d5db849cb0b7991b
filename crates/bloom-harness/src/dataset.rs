//! Random UUID datasets
//!
//! The training and test sets are generated concurrently on blocking tasks
//! and made disjoint before they are returned.

use std::collections::HashSet;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use uuid::{Builder, Uuid};

/// A training set to insert and a disjoint test set to query
#[derive(Debug, Clone)]
pub struct Datasets {
    pub train: Vec<String>,
    pub test: Vec<String>,
}

/// Generate `size` hyphenated v4 UUID strings
///
/// With a seed the output is reproducible; without one it uses OS entropy.
pub fn generate_dataset(size: usize, seed: Option<u64>) -> Vec<String> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    (0..size).map(|_| random_uuid(&mut rng).to_string()).collect()
}

fn random_uuid<R: Rng>(rng: &mut R) -> Uuid {
    Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// Generate training and test sets of `size` values each
///
/// Any test value that also appears in the training set is dropped, so the
/// test set may come back slightly short.
pub async fn generate_datasets(size: usize, seed: Option<u64>) -> Result<Datasets> {
    let train_seed = seed;
    let test_seed = seed.map(|s| s.wrapping_add(1));

    let train_task = tokio::task::spawn_blocking(move || generate_dataset(size, train_seed));
    let test_task = tokio::task::spawn_blocking(move || generate_dataset(size, test_seed));

    let train = train_task.await.context("training dataset task failed")?;
    let test = test_task.await.context("test dataset task failed")?;

    let datasets = make_disjoint(train, test);
    info!(
        train = datasets.train.len(),
        test = datasets.test.len(),
        "Datasets generated"
    );
    Ok(datasets)
}

fn make_disjoint(train: Vec<String>, test: Vec<String>) -> Datasets {
    let seen: HashSet<&str> = train.iter().map(String::as_str).collect();
    let before = test.len();
    let test: Vec<String> = test
        .into_iter()
        .filter(|value| !seen.contains(value.as_str()))
        .collect();
    drop(seen);

    if test.len() != before {
        debug!(dropped = before - test.len(), "Removed overlapping test values");
    }

    Datasets { train, test }
}
