use serde::{Deserialize, Serialize};

use crate::models::quote::Quote;

/// wire shape of a record on the remote side. extra fields are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RemotePost {
    pub title: String,
    pub body: String,
}

impl From<RemotePost> for Quote {
    fn from(post: RemotePost) -> Self {
        Quote {
            text: post.title,
            category: post.body,
        }
    }
}

impl From<&Quote> for RemotePost {
    fn from(quote: &Quote) -> Self {
        RemotePost {
            title: quote.text.clone(),
            body: quote.category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RemotePost;
    use crate::models::quote::Quote;

    #[test]
    fn maps_title_and_body_onto_text_and_category() {
        let post = RemotePost {
            title: "Stay curious".to_string(),
            body: "Life".to_string(),
        };

        assert_eq!(Quote::from(post), Quote::new("Stay curious", "Life"));

        let back = RemotePost::from(&Quote::new("Stay curious", "Life"));
        assert_eq!(back.title, "Stay curious");
        assert_eq!(back.body, "Life");
    }

    #[test]
    fn ignores_extra_remote_fields() {
        let raw = r#"{"userId":1,"id":7,"title":"Stay curious","body":"Life"}"#;

        let post: RemotePost = serde_json::from_str(raw).unwrap();
        assert_eq!(Quote::from(post), Quote::new("Stay curious", "Life"));
    }
}
