//! Seed parser with validation
//!
//! Parses YAML and validates schema version, key uniqueness, referential
//! integrity and the same field rules the repository callers apply.

use crate::errors::{io_error, seed_validation, Result};
use crate::seed::format_v0::SeedV0;
use kindred_core::rules::validation::{
    validate_new_comment, validate_new_post, validate_new_resource, validate_new_user,
};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parse a seed file from a path
pub fn parse_seed_file(path: &Path) -> Result<SeedV0> {
    let content = fs::read_to_string(path).map_err(|e| io_error("seed_read", e))?;

    parse_seed_str(&content)
}

/// Parse a seed from a string
pub fn parse_seed_str(content: &str) -> Result<SeedV0> {
    let seed: SeedV0 = serde_yaml::from_str(content)
        .map_err(|e| seed_validation(&format!("YAML parse error: {}", e)))?;

    validate_seed(&seed)?;

    Ok(seed)
}

fn validate_seed(seed: &SeedV0) -> Result<()> {
    if seed.schema_version != 0 {
        return Err(seed_validation(&format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    let mut user_keys = HashSet::new();
    for user in &seed.users {
        if !user_keys.insert(user.key.as_str()) {
            return Err(seed_validation(&format!("Duplicate user key: {}", user.key)));
        }
        validate_new_user(&user.to_new_user())
            .map_err(|e| seed_validation(&format!("user {}: {}", user.key, e)))?;
    }

    let mut post_keys = HashSet::new();
    for post in &seed.posts {
        if !post_keys.insert(post.key.as_str()) {
            return Err(seed_validation(&format!("Duplicate post key: {}", post.key)));
        }
        if !user_keys.contains(post.author.as_str()) {
            return Err(seed_validation(&format!(
                "Post {} references unknown author: {}",
                post.key, post.author
            )));
        }
        validate_new_post(&post.to_new_post(0))
            .map_err(|e| seed_validation(&format!("post {}: {}", post.key, e)))?;
    }

    for (idx, comment) in seed.comments.iter().enumerate() {
        if !post_keys.contains(comment.post.as_str()) {
            return Err(seed_validation(&format!(
                "Comment #{} references unknown post: {}",
                idx, comment.post
            )));
        }
        if !user_keys.contains(comment.author.as_str()) {
            return Err(seed_validation(&format!(
                "Comment #{} references unknown author: {}",
                idx, comment.author
            )));
        }
        validate_new_comment(&comment.to_new_comment(0, 0))
            .map_err(|e| seed_validation(&format!("comment #{}: {}", idx, e)))?;
    }

    for resource in &seed.resources {
        validate_new_resource(resource)
            .map_err(|e| seed_validation(&format!("resource {}: {}", resource.name, e)))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kindred_core::errors::ExErrorKind;

    #[test]
    fn test_parse_valid_seed() {
        let yaml = r#"
schema_version: 0
users:
  - key: u1
    username: river
    email: river@example.org
    password_hash: "!locked"
posts:
  - key: p1
    author: u1
    title: "Hello"
    content: "First post"
comments:
  - post: p1
    author: u1
    content: "Replying to myself"
"#;

        let seed = parse_seed_str(yaml).unwrap();
        assert_eq!(seed.posts.len(), 1);
        assert_eq!(seed.comments.len(), 1);
    }

    #[test]
    fn test_reject_invalid_schema_version() {
        let yaml = "schema_version: 99\n";

        let err = parse_seed_str(yaml).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert!(err.to_string().contains("schema_version"));
    }

    #[test]
    fn test_reject_duplicate_user_key() {
        let yaml = r#"
schema_version: 0
users:
  - key: u1
    username: a
    email: a@example.org
    password_hash: h
  - key: u1
    username: b
    email: b@example.org
    password_hash: h
"#;

        let err = parse_seed_str(yaml).unwrap_err();
        assert!(err.to_string().contains("Duplicate user key"));
    }

    #[test]
    fn test_reject_dangling_comment_post() {
        let yaml = r#"
schema_version: 0
users:
  - key: u1
    username: a
    email: a@example.org
    password_hash: h
comments:
  - post: missing
    author: u1
    content: "orphan"
"#;

        let err = parse_seed_str(yaml).unwrap_err();
        assert!(err.to_string().contains("unknown post"));
    }

    #[test]
    fn test_reject_field_rule_violation() {
        let yaml = r#"
schema_version: 0
users:
  - key: u1
    username: a
    email: not-an-address
    password_hash: h
"#;

        let err = parse_seed_str(yaml).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert!(err.to_string().contains("user u1"));
    }

    #[test]
    fn test_unreadable_file_is_io_error() {
        let err = parse_seed_file(Path::new("/nonexistent/seed.yaml")).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Io);
        assert_eq!(err.op(), Some("seed_read"));
    }
}
