//! Social surface types: posts, messages, profiles.
//!
//! A post or message holds exactly one [`ShareableContent`] value. Both
//! render through the same summary dispatch, so a PR badge or a decode
//! placeholder looks the same in the feed, in chat, and in a compose
//! preview.

use crate::content::ShareableContent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A friend/user profile, as supplied by the friend storage collaborator
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A direct-message conversation header
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    pub id: Uuid,
    pub participant_ids: Vec<Uuid>,
    #[serde(default)]
    pub last_message_at: Option<DateTime<Utc>>,
}

/// A chat message carrying one piece of shared content
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub sent_at: DateTime<Utc>,
    pub content: ShareableContent,
}

impl Message {
    pub fn new(conversation_id: Uuid, sender_id: Uuid, content: ShareableContent) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation_id,
            sender_id,
            sent_at: Utc::now(),
            content,
        }
    }
}

/// A feed post carrying one piece of shared content
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub caption: Option<String>,
    pub content: ShareableContent,
}

impl Post {
    pub fn new(author_id: Uuid, caption: Option<String>, content: ShareableContent) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            created_at: Utc::now(),
            caption,
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::share_set;
    use crate::format::describe_content;
    use crate::testutil;

    #[test]
    fn test_pr_badge_identical_across_surfaces() {
        let set = testutil::strength_set(1, 225.0, 1, true);
        let content = share_set("Deadlift", &set, true, "mi").unwrap();

        let author = Uuid::new_v4();
        let post = Post::new(author, Some("finally".into()), content.clone());
        let message = Message::new(Uuid::new_v4(), author, content.clone());

        let in_feed = describe_content(&post.content);
        let in_chat = describe_content(&message.content);
        let in_compose = describe_content(&content);

        assert_eq!(in_feed, in_chat);
        assert_eq!(in_feed, in_compose);
        assert_eq!(in_feed.label, "NEW PR");
    }

    #[test]
    fn test_message_roundtrips_with_content() {
        let session = testutil::strength_session();
        let content = crate::content::share_session(&session, "mi").unwrap();
        let message = Message::new(Uuid::new_v4(), Uuid::new_v4(), content);

        let json = serde_json::to_string(&message).unwrap();
        let restored: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, message);
    }
}
