//! graphmap benchmarking suite
//!
//! Models and payload generators shared by the criterion benches.

use graphmap::{DynamicValue, graph_object};

#[derive(Debug, Default, Clone)]
pub struct Author {
    pub id: Option<String>,
    pub name: Option<String>,
}

graph_object!(Author { id, name });

#[derive(Debug, Default, Clone)]
pub struct FeedItem {
    pub author: Author,
    pub message: Option<String>,
    /// Kept as text so the benches measure mapping, not date parsing
    pub created_time: Option<String>,
    pub likes: Vec<Author>,
    pub like_count: Option<i64>,
    pub is_hidden: bool,
    pub attachment: Option<DynamicValue>,
}

graph_object!(FeedItem : Author => author {
    message,
    created_time,
    likes as Author,
    like_count => "likes_count",
    is_hidden,
    attachment,
});

pub const SMALL_JSON: &str = r#"{"id": "1", "name": "test", "message": "hello"}"#;

/// Feed page with `count` items, in the wrapped `{"data": [...]}` form
///
/// Every third item uses the API's quirks: `false` for missing values,
/// numbers as text and `{}` for an empty list.
pub fn feed_json(count: usize) -> String {
    let items: Vec<String> = (0..count).map(feed_item).collect();
    format!(
        r#"{{"data": [{}], "paging": {{"next": "https://graph.example.com/feed?after=abc"}}}}"#,
        items.join(",")
    )
}

fn feed_item(index: usize) -> String {
    if index % 3 == 0 {
        format!(
            r#"{{"id": "{index}", "name": "User {index}", "message": false,
                "created_time": "2011-03-25T17:38:40+0000",
                "likes": {{}}, "likes_count": "{index}", "is_hidden": false,
                "attachment": false}}"#
        )
    } else {
        format!(
            r#"{{"id": "{index}", "name": "User {index}", "message": "Post number {index}",
                "created_time": "2011-03-25T17:38:40+0000",
                "likes": {{"data": [{{"id": "a{index}", "name": "Fan"}}, {{"id": "b{index}"}}]}},
                "likes_count": {index}, "is_hidden": true,
                "attachment": {{"media": {{"src": "https://cdn.example.com/{index}.png"}}, "type": "photo"}}}}"#
        )
    }
}

/// Error bodies in each of the three shapes, plus a regular payload
pub fn error_bodies() -> [(&'static str, String); 4] {
    [
        (
            "legacy",
            r#"{"error_code": 190, "error_msg": "Session has expired"}"#.to_string(),
        ),
        (
            "batch",
            r#"{"error": 1, "error_description": "An unknown error occurred"}"#.to_string(),
        ),
        (
            "graph",
            r#"{"error": {"message": "Invalid OAuth access token.", "type": "OAuthException", "code": 190, "fbtrace_id": "A1b2"}}"#
                .to_string(),
        ),
        ("data", feed_json(50)),
    ]
}
