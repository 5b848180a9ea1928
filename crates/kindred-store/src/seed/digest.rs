//! Seed digest canonicalization
//!
//! Computes stable SHA256 digests of seeds: two seeds that differ only in
//! row order hash the same. The digest identifies seed content, not the
//! resulting database; the importer assigns ids in file order, so such
//! seeds can still produce different ids and list orders.

use crate::errors::Result;
use crate::seed::format_v0::{SeedComment, SeedPost, SeedUser, SeedV0};
use kindred_core::errors::{ExError, ExErrorKind};
use kindred_core::model::NewResource;
use serde::Serialize;
use sha2::{Digest, Sha256};

#[derive(Serialize)]
struct CanonicalSeed<'a> {
    schema_version: u32,
    users: Vec<&'a SeedUser>,
    posts: Vec<&'a SeedPost>,
    comments: Vec<&'a SeedComment>,
    resources: Vec<&'a NewResource>,
}

/// Compute a stable digest for a seed
///
/// Returns a SHA256 hex digest of the canonical JSON representation.
/// Rows are sorted by key before hashing, so file order does not contribute.
pub fn compute_seed_digest(seed: &SeedV0) -> Result<String> {
    let canonical = canonicalize_seed(seed);

    let json = serde_json::to_vec(&canonical).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("seed_digest")
            .with_message(e.to_string())
    })?;

    Ok(hex::encode(Sha256::digest(&json)))
}

fn canonicalize_seed(seed: &SeedV0) -> CanonicalSeed<'_> {
    let mut users: Vec<&SeedUser> = seed.users.iter().collect();
    users.sort_by(|a, b| a.key.cmp(&b.key));

    let mut posts: Vec<&SeedPost> = seed.posts.iter().collect();
    posts.sort_by(|a, b| a.key.cmp(&b.key));

    let mut comments: Vec<&SeedComment> = seed.comments.iter().collect();
    comments.sort_by(|a, b| {
        (&a.post, &a.author, &a.content).cmp(&(&b.post, &b.author, &b.content))
    });

    let mut resources: Vec<&NewResource> = seed.resources.iter().collect();
    resources.sort_by(|a, b| {
        (&a.name, &a.resource_type).cmp(&(&b.name, &b.resource_type))
    });

    CanonicalSeed {
        schema_version: seed.schema_version,
        users,
        posts,
        comments,
        resources,
    }
}
