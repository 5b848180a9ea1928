use crate::errors::{KindredError, Result};
use crate::model::{
    NewComment, NewPost, NewResource, NewUser, MOOD_SCORE_MAX, MOOD_SCORE_MIN,
};

/// Column length limits, mirrored by CHECK constraints in the schema
pub const USERNAME_MAX_LEN: usize = 50;
pub const EMAIL_MAX_LEN: usize = 100;
pub const TITLE_MAX_LEN: usize = 255;
pub const TOPIC_MAX_LEN: usize = 100;
pub const RESOURCE_NAME_MAX_LEN: usize = 255;
pub const RESOURCE_TYPE_MAX_LEN: usize = 50;

/// Check that a mood score lies in the closed range 1..=10
///
/// # Errors
/// Returns `MoodScoreOutOfRange` for any other value.
pub fn validate_mood_score(score: i64) -> Result<()> {
    if (MOOD_SCORE_MIN..=MOOD_SCORE_MAX).contains(&score) {
        Ok(())
    } else {
        Err(KindredError::MoodScoreOutOfRange { score })
    }
}

/// # Errors
/// Returns `InvalidInput` for blank or over-long username/email, an email
/// without `@`, or an empty password hash.
pub fn validate_new_user(user: &NewUser) -> Result<()> {
    require_text("username", &user.username, USERNAME_MAX_LEN)?;
    require_text("email", &user.email, EMAIL_MAX_LEN)?;
    if !user.email.contains('@') {
        return Err(invalid(format!("email '{}' is not an address", user.email)));
    }
    if user.password_hash.expose().is_empty() {
        return Err(invalid("password_hash must not be empty"));
    }
    Ok(())
}

/// # Errors
/// Returns `InvalidInput` for a blank or over-long title or blank content.
pub fn validate_new_post(post: &NewPost) -> Result<()> {
    require_text("title", &post.title, TITLE_MAX_LEN)?;
    require_text("content", &post.content, usize::MAX)
}

/// # Errors
/// Returns `InvalidInput` for blank content.
pub fn validate_new_comment(comment: &NewComment) -> Result<()> {
    require_text("content", &comment.content, usize::MAX)
}

/// # Errors
/// Returns `InvalidInput` for a blank or over-long name or type tag.
pub fn validate_new_resource(resource: &NewResource) -> Result<()> {
    require_text("name", &resource.name, RESOURCE_NAME_MAX_LEN)?;
    require_text("resource_type", &resource.resource_type, RESOURCE_TYPE_MAX_LEN)
}

fn require_text(field: &str, value: &str, max_len: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{} must not be empty", field)));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(invalid(format!(
            "{} is {} characters, limit is {}",
            field, len, max_len
        )));
    }
    Ok(())
}

fn invalid(reason: impl Into<String>) -> KindredError {
    KindredError::InvalidInput {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_score_bounds() {
        assert!(validate_mood_score(1).is_ok());
        assert!(validate_mood_score(10).is_ok());
        assert_eq!(
            validate_mood_score(0),
            Err(KindredError::MoodScoreOutOfRange { score: 0 })
        );
        assert!(validate_mood_score(11).is_err());
    }

    #[test]
    fn test_user_rules() {
        assert!(validate_new_user(&NewUser::new("u1", "u1@x.com", "h")).is_ok());
        assert!(validate_new_user(&NewUser::new("  ", "u1@x.com", "h")).is_err());
        assert!(validate_new_user(&NewUser::new("u1", "not-an-email", "h")).is_err());
        assert!(validate_new_user(&NewUser::new("u1", "u1@x.com", "")).is_err());
        assert!(validate_new_user(&NewUser::new("a".repeat(51), "u1@x.com", "h")).is_err());
    }

    #[test]
    fn test_username_limit_counts_characters_not_bytes() {
        let name = "é".repeat(USERNAME_MAX_LEN);
        assert!(validate_new_user(&NewUser::new(name, "u1@x.com", "h")).is_ok());
    }

    #[test]
    fn test_post_and_resource_rules() {
        assert!(validate_new_post(&NewPost::new(1, "Hello", "body")).is_ok());
        assert!(validate_new_post(&NewPost::new(1, "", "body")).is_err());
        assert!(validate_new_post(&NewPost::new(1, "Hello", "")).is_err());
        assert!(validate_new_comment(&NewComment::new(1, 1, "")).is_err());
        assert!(validate_new_resource(&NewResource::new("Helpline", "Hotline")).is_ok());
        assert!(validate_new_resource(&NewResource::new("Helpline", "")).is_err());
    }
}
