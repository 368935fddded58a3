//! Shared models and helpers for integration tests
//!
//! The models mirror the shapes the API actually returns: an entity chain
//! (`Entity` -> `NamedEntity` -> `Page`) with a hook at every level, posts
//! with shared keys and wrapped lists, and self-nesting comments.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use graphmap::{DynamicValue, JsonMapper, MappingError, MappingResult, graph_enum, graph_object};
use std::collections::HashMap;
use std::sync::Once;
use std::sync::atomic::{AtomicUsize, Ordering};

static TRACING: Once = Once::new();
static HOOK_SEQUENCE: AtomicUsize = AtomicUsize::new(1);

/// Route engine logs to the test writer; `RUST_LOG` selects the level
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn next_sequence() -> usize {
    HOOK_SEQUENCE.fetch_add(1, Ordering::SeqCst)
}

// ============================================================================
// Entity chain
// ============================================================================

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Entity {
    pub id: Option<String>,
    pub entity_hook_runs: u32,
    pub entity_hook_order: usize,
}

impl Entity {
    fn entity_mapped(&mut self) {
        self.entity_hook_runs += 1;
        self.entity_hook_order = next_sequence();
    }
}

graph_object!(Entity { id } hooks { entity_mapped });

#[derive(Debug, Default, Clone, PartialEq)]
pub struct NamedEntity {
    pub entity: Entity,
    pub name: Option<String>,
    pub named_hook_runs: u32,
    pub named_hook_order: usize,
}

impl NamedEntity {
    fn named_mapped(&mut self, _mapper: &JsonMapper) {
        self.named_hook_runs += 1;
        self.named_hook_order = next_sequence();
    }
}

graph_object!(NamedEntity : Entity => entity { name } hooks { named_mapped });

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Location {
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

graph_object!(Location { city, country, latitude, longitude });

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Page {
    pub named: NamedEntity,
    pub likes: Option<i64>,
    pub category: Option<String>,
    pub emails: Vec<String>,
    pub location: Option<Location>,
    pub founded: Option<NaiveDate>,
    pub updated_time: Option<DateTime<Utc>>,
    pub is_published: Option<bool>,
    pub hours: HashMap<String, String>,
    pub metadata: Option<DynamicValue>,
    pub r#type: Option<String>,
    pub page_hook_runs: u32,
    pub page_hook_order: usize,
}

impl Page {
    fn page_mapped(&mut self, _mapper: &JsonMapper) -> MappingResult<()> {
        self.page_hook_runs += 1;
        self.page_hook_order = next_sequence();
        match self.likes {
            Some(likes) if likes < 0 => Err(MappingError::hook(
                "Page",
                "page_mapped",
                format!("negative fan count {likes}"),
            )),
            _ => Ok(()),
        }
    }
}

graph_object!(Page : NamedEntity => named {
    likes => "fan_count",
    category,
    emails as String,
    location,
    founded,
    updated_time,
    is_published,
    hours as String,
    metadata,
    r#type,
} hooks { page_mapped });

// ============================================================================
// Posts and comments
// ============================================================================

graph_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Privacy {
        Everyone => "EVERYONE",
        FriendsOnly => "ALL_FRIENDS",
        SelfOnly => "SELF",
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Comment {
    pub id: Option<String>,
    pub message: Option<String>,
    pub like_count: Option<i64>,
    pub replies: Vec<Comment>,
}

graph_object!(Comment { id, message, like_count, replies => "comments" });

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Post {
    pub id: Option<String>,
    pub message: Option<String>,
    pub from: Option<NamedEntity>,
    pub created_time: Option<DateTime<Utc>>,
    pub likes: Vec<NamedEntity>,
    pub comments: Vec<Comment>,
    pub place: Option<Location>,
    pub place_id: Option<i64>,
    pub privacy: Option<Privacy>,
    pub is_hidden: bool,
    pub shares: Option<i64>,
}

graph_object!(Post {
    id,
    message,
    from,
    created_time,
    likes as NamedEntity,
    comments,
    place,
    place_id => "place",
    privacy,
    is_hidden,
    shares => "share_count",
});

// ============================================================================
// Strict and broken declarations
// ============================================================================

/// Non-optional scalars: `null` for these is an error
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Counter {
    pub name: String,
    pub count: i32,
}

graph_object!(Counter { name, count });

/// Declared element type disagrees with the list
#[derive(Debug, Default)]
pub struct MismatchedElement {
    pub tags: Vec<String>,
}

graph_object!(MismatchedElement { tags as i64 });

/// Element type declared on a scalar field
#[derive(Debug, Default)]
pub struct ElementOnScalar {
    pub title: Option<String>,
}

graph_object!(ElementOnScalar { title as String });

// ============================================================================
// Fixtures
// ============================================================================

pub const PAGE_JSON: &str = r#"{
    "id": "19292868552",
    "name": "Graph API",
    "fan_count": "1234567",
    "category": "Software",
    "emails": ["dev@example.com", "ops@example.com"],
    "location": {"city": "Menlo Park", "country": "United States", "latitude": 37.4847, "longitude": -122.1477},
    "founded": "2004-02",
    "updated_time": "2011-03-25T17:38:40+0000",
    "is_published": true,
    "hours": {"mon_1_open": "09:00", "mon_1_close": "17:00"},
    "metadata": {"fields": [{"name": "id"}], "connections": false},
    "type": "page"
}"#;

pub const POST_JSON: &str = r#"{
    "id": "1_2",
    "message": "Hello",
    "from": {"id": "1", "name": "Mark"},
    "created_time": 1300000000,
    "likes": {"data": [{"id": "3", "name": "Chris"}, {"id": "4"}], "count": 2},
    "comments": {"data": [
        {"id": "c1", "message": "First", "like_count": 2, "comments": {"data": [{"id": "c1r", "message": "Reply"}]}},
        {"id": "c2", "message": "Second", "comments": {}}
    ]},
    "place": {"city": "Palo Alto"},
    "privacy": "all_friends",
    "is_hidden": false,
    "share_count": false
}"#;

/// Mapper with default configuration
pub fn mapper() -> JsonMapper {
    init_tracing();
    JsonMapper::new()
}
