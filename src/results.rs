use serde::{Deserialize, Serialize};

/// Contact details pulled from a page.
///
/// The scalar fields mirror the first entry of the corresponding list so
/// downstream consumers can grab "the" phone number without digging.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub phone: String,

    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub email: String,

    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub address: String,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub all_phones: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub all_emails: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub all_addresses: Vec<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.all_phones.is_empty() && self.all_emails.is_empty() && self.all_addresses.is_empty()
    }
}

/// A heading in document order, with its tag name (h1..h4).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Heading {
    pub text: String,
    pub tag: String,
}

/// A short text fragment matched by one of the topical element extractors
/// (pricing, amenities, course facts, hours).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snippet {
    pub text: String,
}

impl Snippet {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A `<ul>`/`<ol>` block with surrounding context (nearest heading).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListBlock {
    pub list_type: String,

    pub items: Vec<String>,

    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub context: String,
}

/// Category signals computed for an internal link at extraction time.
///
/// These are coarse substring checks over the href and anchor text; the
/// link classifier treats each flag as one of its three match signals.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoryFlags {
    #[serde(default)]
    pub is_scorecard: bool,
    #[serde(default)]
    pub is_rates: bool,
    #[serde(default)]
    pub is_about: bool,
    #[serde(default)]
    pub is_membership: bool,
    #[serde(default)]
    pub is_tee_time: bool,
    #[serde(default)]
    pub is_reservation: bool,
}

/// A same-site hyperlink discovered on a page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InternalLink {
    pub text: String,
    pub href: String,
    #[serde(default)]
    pub flags: CategoryFlags,
}

/// An outbound link to a recognized social platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SocialLink {
    pub platform: String,
    pub href: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub text: String,
}

/// One fetched page's extracted content.
///
/// Created once per fetch and never mutated in place; the payload optimizer
/// produces reduced copies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageRecord {
    /// Canonical URL after redirects.
    pub url: String,

    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub title: String,

    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub course_name: String,

    #[serde(skip_serializing_if = "ContactInfo::is_empty", default)]
    pub contact: ContactInfo,

    /// Cleaned main content, capped at the configured character limit.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub text: String,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub headings: Vec<Heading>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub price_elements: Vec<Snippet>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub amenity_elements: Vec<Snippet>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub course_elements: Vec<Snippet>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub hours_elements: Vec<Snippet>,

    /// Tables as rows of cell strings.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tables: Vec<Vec<Vec<String>>>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub lists: Vec<ListBlock>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub internal_links: Vec<InternalLink>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub social_links: Vec<SocialLink>,
}
