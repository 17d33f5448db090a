use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ArtifyError, Result};

/// Artwork category.
///
/// The gallery offers a fixed set of categories in its pickers, but records
/// created by older clients may carry free-form values, which are kept as
/// `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Painting,
    DigitalArt,
    Photography,
    Sculpture,
    Illustration,
    MixedMedia,
    Drawing,
    Printmaking,
    Other(String),
}

impl Category {
    /// Categories offered by the catalog filter, in display order.
    pub const KNOWN: &'static [Category] = &[
        Category::Painting,
        Category::DigitalArt,
        Category::Photography,
        Category::Sculpture,
        Category::Illustration,
        Category::MixedMedia,
        Category::Drawing,
        Category::Printmaking,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Painting => "Painting",
            Category::DigitalArt => "Digital Art",
            Category::Photography => "Photography",
            Category::Sculpture => "Sculpture",
            Category::Illustration => "Illustration",
            Category::MixedMedia => "Mixed Media",
            Category::Drawing => "Drawing",
            Category::Printmaking => "Printmaking",
            Category::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Other(_))
    }

    /// Resolve a known category name, ignoring case.
    fn lookup(s: &str) -> Option<Category> {
        let needle = unicase::UniCase::new(s.trim());
        Category::KNOWN
            .iter()
            .find(|c| unicase::UniCase::new(c.as_str()) == needle)
            .cloned()
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::lookup(&s).unwrap_or(Category::Other(s))
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parses only the known categories; free-form values are rejected so that
/// user input cannot silently create a filter that matches nothing.
impl FromStr for Category {
    type Err = ArtifyError;

    fn from_str(s: &str) -> Result<Self> {
        Category::lookup(s).ok_or_else(|| {
            let valid: Vec<&str> = Category::KNOWN.iter().map(|c| c.as_str()).collect();
            ArtifyError::Validation(format!(
                "unknown category '{}', expected one of: {}",
                s,
                valid.join(", ")
            ))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

impl FromStr for Visibility {
    type Err = ArtifyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            _ => Err(ArtifyError::Validation(format!(
                "invalid visibility '{}', expected 'public' or 'private'",
                s
            ))),
        }
    }
}

/// An artwork record as served by the gallery API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    /// Server-assigned identifier, never changed after creation
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default, alias = "userName")]
    pub artist_name: String,
    #[serde(default, alias = "userEmail")]
    pub artist_email: String,
    pub category: Category,
    #[serde(default)]
    pub medium: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_price",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub image_url: String,
    #[serde(default, deserialize_with = "deserialize_likes")]
    pub likes: u64,
    /// ISO 8601 creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Viewer hint: whether the current viewer liked this artwork
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,
    /// Viewer hint: whether the current viewer favorited this artwork
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorited: Option<bool>,
}

impl Artwork {
    /// Parsed creation timestamp, if present and well-formed.
    pub fn created_timestamp(&self) -> Option<jiff::Timestamp> {
        self.created_at.as_deref().and_then(|s| s.parse().ok())
    }
}

/// Accepts a number, a numeric string, an empty string, or null.
///
/// Older clients posted the price field straight from a text input, so the
/// catalog contains all of these shapes.
fn deserialize_price<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    let price = match Option::<RawPrice>::deserialize(deserializer)? {
        None => None,
        Some(RawPrice::Number(n)) => Some(n),
        Some(RawPrice::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.parse::<f64>().map_err(D::Error::custom)?)
            }
        }
    };

    match price {
        Some(p) if !p.is_finite() || p < 0.0 => {
            tracing::warn!("ignoring invalid artwork price {p}");
            Ok(None)
        }
        other => Ok(other),
    }
}

fn deserialize_likes<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?.unwrap_or(0);
    if raw < 0 {
        tracing::warn!("server reported negative like count {raw}, clamping to 0");
        return Ok(0);
    }
    Ok(raw as u64)
}

/// Payload for creating or updating an artwork.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkDraft {
    pub title: String,
    pub image_url: String,
    pub category: String,
    pub medium: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub visibility: Visibility,
    #[serde(rename = "userName", skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>,
    #[serde(rename = "userEmail", skip_serializing_if = "Option::is_none")]
    pub artist_email: Option<String>,
}

impl ArtworkDraft {
    /// Pre-fill a draft from an existing record, for editing.
    pub fn from_artwork(artwork: &Artwork) -> Self {
        Self {
            title: artwork.title.clone(),
            image_url: artwork.image_url.clone(),
            category: artwork.category.to_string(),
            medium: artwork.medium.clone(),
            description: artwork.description.clone(),
            dimensions: artwork.dimensions.clone(),
            price: artwork.price,
            visibility: artwork.visibility,
            artist_name: None,
            artist_email: None,
        }
    }

    /// Check the draft before it is sent anywhere.
    pub fn validate(&self) -> Result<()> {
        require_field("title", &self.title)?;
        require_field("image URL", &self.image_url)?;
        require_field("category", &self.category)?;
        require_field("medium", &self.medium)?;

        let parsed = url::Url::parse(self.image_url.trim()).map_err(|e| {
            ArtifyError::Validation(format!("invalid image URL '{}': {}", self.image_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ArtifyError::Validation(format!(
                "image URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        if let Some(price) = self.price
            && (!price.is_finite() || price < 0.0)
        {
            return Err(ArtifyError::Validation(format!(
                "price must be a non-negative number, got {price}"
            )));
        }

        Ok(())
    }
}

fn require_field(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ArtifyError::Validation(format!("{name} is required")));
    }
    Ok(())
}

/// Server answer to a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeOutcome {
    pub liked: bool,
    /// New like count, when the server reports one
    pub likes: Option<u64>,
}

/// Server answer to a favorite toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoriteOutcome {
    pub favorited: bool,
}

/// Entry of the "top artists" leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopArtist {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "artistName")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub followers: u64,
}

/// Profile of the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, alias = "name")]
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(
        default,
        rename = "photoURL",
        alias = "photoUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_draft() -> ArtworkDraft {
        ArtworkDraft {
            title: "Sunset Dreams".to_string(),
            image_url: "https://example.com/sunset.jpg".to_string(),
            category: "Painting".to_string(),
            medium: "Oil on canvas".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_category_from_str_is_case_insensitive() {
        assert_eq!(
            "digital art".parse::<Category>().unwrap(),
            Category::DigitalArt
        );
        assert_eq!("PAINTING".parse::<Category>().unwrap(), Category::Painting);
        assert!("Landscape".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_keeps_unknown_wire_values() {
        let c: Category = serde_json::from_value(json!("Landscape")).unwrap();
        assert_eq!(c, Category::Other("Landscape".to_string()));
        assert!(!c.is_known());
        assert_eq!(serde_json::to_value(&c).unwrap(), json!("Landscape"));

        let c: Category = serde_json::from_value(json!("Mixed Media")).unwrap();
        assert_eq!(c, Category::MixedMedia);
    }

    #[test]
    fn test_artwork_deserializes_server_shape() {
        let artwork: Artwork = serde_json::from_value(json!({
            "_id": "a1",
            "title": "Urban Chaos",
            "userName": "John Smith",
            "userEmail": "john@example.com",
            "category": "Digital Art",
            "medium": "Procreate",
            "description": "City at night",
            "price": "120",
            "visibility": "private",
            "imageUrl": "https://example.com/a1.jpg",
            "likes": 5,
            "createdAt": "2025-01-02T03:04:05Z"
        }))
        .unwrap();

        assert_eq!(artwork.id, "a1");
        assert_eq!(artwork.artist_name, "John Smith");
        assert_eq!(artwork.artist_email, "john@example.com");
        assert_eq!(artwork.category, Category::DigitalArt);
        assert_eq!(artwork.price, Some(120.0));
        assert_eq!(artwork.visibility, Visibility::Private);
        assert_eq!(artwork.likes, 5);
        assert!(artwork.created_timestamp().is_some());
        assert_eq!(artwork.liked, None);
    }

    #[test]
    fn test_artwork_tolerates_sparse_records() {
        let artwork: Artwork = serde_json::from_value(json!({
            "id": "a2",
            "title": "Untitled",
            "category": "Drawing",
            "price": "",
            "likes": -3
        }))
        .unwrap();

        assert_eq!(artwork.id, "a2");
        assert_eq!(artwork.price, None);
        assert_eq!(artwork.likes, 0);
        assert_eq!(artwork.visibility, Visibility::Public);
        assert!(artwork.created_timestamp().is_none());
    }

    #[test]
    fn test_draft_validation_accepts_complete_draft() {
        assert!(valid_draft().validate().is_ok());
    }

    #[test]
    fn test_draft_validation_rejects_missing_fields() {
        let mut draft = valid_draft();
        draft.title = "   ".to_string();
        let err = draft.validate().unwrap_err();
        assert!(matches!(err, ArtifyError::Validation(ref m) if m.contains("title")));

        let mut draft = valid_draft();
        draft.medium.clear();
        assert!(matches!(
            draft.validate(),
            Err(ArtifyError::Validation(_))
        ));
    }

    #[test]
    fn test_draft_validation_rejects_bad_url_and_price() {
        let mut draft = valid_draft();
        draft.image_url = "not a url".to_string();
        assert!(draft.validate().is_err());

        let mut draft = valid_draft();
        draft.image_url = "ftp://example.com/a.jpg".to_string();
        assert!(draft.validate().is_err());

        let mut draft = valid_draft();
        draft.price = Some(-1.0);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_draft_serializes_wire_names() {
        let mut draft = valid_draft();
        draft.artist_name = Some("Sarah".to_string());
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["imageUrl"], "https://example.com/sunset.jpg");
        assert_eq!(value["userName"], "Sarah");
        assert_eq!(value["visibility"], "public");
        assert!(value.get("price").is_none());
        assert!(value.get("userEmail").is_none());
    }

    #[test]
    fn test_visibility_parse() {
        assert_eq!("Public".parse::<Visibility>().unwrap(), Visibility::Public);
        assert_eq!("private".parse::<Visibility>().unwrap(), Visibility::Private);
        assert!("hidden".parse::<Visibility>().is_err());
    }
}
