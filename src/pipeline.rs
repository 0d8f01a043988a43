//! Multi-resource driver.
//!
//! ```text
//! folder ─▶ [MessageResource] ── tokenize_resource ──▶ name ─▶ folder ─▶ TokenizedVariant
//!                                                          │
//!                              merge_resource per name ◀───┘   (rayon with `parallel`)
//!                                         │
//!                                         v
//!                              Vec<MergedResource>, sorted by name
//! ```
//!
//! Resources share no state, so merging them in parallel cannot change the
//! output; results are keyed by name and collected in name order either way.

#[path = "pipeline/metrics.rs"]
mod metrics;

pub use metrics::RunMetrics;

use crate::api::tokenize_resource;
use crate::merge::merge_resource;
use crate::model::{MergedResource, MessageResource, PublicResource, ResourceFolder, ResourceName, TokenizedVariant};
use crate::Options;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::time::Instant;

type Grouped = BTreeMap<ResourceName, BTreeMap<ResourceFolder, TokenizedVariant>>;

/// Output of [`process_verbose`](crate::process_verbose).
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub resources: Vec<MergedResource>,
    pub metrics: RunMetrics,
}

pub(crate) fn run(
    inputs: &BTreeMap<ResourceFolder, Vec<MessageResource>>,
    public: &[PublicResource],
    options: &Options,
) -> ProcessOutput {
    let started = Instant::now();
    let mut metrics = RunMetrics::default();

    let mut grouped = Grouped::new();
    for (folder, resources) in inputs {
        for resource in resources {
            let variants = grouped.entry(resource.name.clone()).or_default();
            if variants.contains_key(folder) {
                warn!("{folder}: duplicate resource {}, keeping the first", resource.name);
                metrics.duplicates += 1;
                continue;
            }
            let variant = tokenize_resource(resource);
            metrics.variants += 1;
            if variant.error.is_some() {
                metrics.parse_errors += 1;
            }
            variants.insert(folder.clone(), variant);
        }
    }
    metrics.tokenize = started.elapsed();

    let merge_started = Instant::now();
    let resources = merge_all(&grouped, public, options);
    metrics.merge = merge_started.elapsed();

    metrics.resources = resources.len();
    metrics.skipped = grouped.len() - resources.len();
    metrics.failures = resources.iter().map(|r| r.failures.len()).sum();
    metrics.total = started.elapsed();
    debug!(
        "processed {} resource(s) from {} variant(s) in {:?}",
        metrics.resources, metrics.variants, metrics.total
    );

    ProcessOutput { resources, metrics }
}

#[cfg(not(feature = "parallel"))]
fn merge_all(grouped: &Grouped, public: &[PublicResource], options: &Options) -> Vec<MergedResource> {
    grouped.iter().filter_map(|(name, variants)| merge_resource(name, variants, public, options)).collect()
}

#[cfg(feature = "parallel")]
fn merge_all(grouped: &Grouped, public: &[PublicResource], options: &Options) -> Vec<MergedResource> {
    use rayon::prelude::*;

    grouped.par_iter().filter_map(|(name, variants)| merge_resource(name, variants, public, options)).collect()
}
