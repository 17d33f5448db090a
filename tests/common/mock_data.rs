//! Builders for test artworks.

use artify::types::{Artwork, Category, Visibility};

/// Builder for creating test artworks
pub struct ArtworkBuilder {
    artwork: Artwork,
}

impl ArtworkBuilder {
    /// Create a new artwork builder with the given ID
    pub fn new(id: &str) -> Self {
        Self {
            artwork: Artwork {
                id: id.to_string(),
                title: format!("Artwork {id}"),
                artist_name: "Jane Doe".to_string(),
                artist_email: "jane@example.com".to_string(),
                category: Category::Painting,
                medium: "Oil on canvas".to_string(),
                description: String::new(),
                dimensions: None,
                price: None,
                visibility: Visibility::Public,
                image_url: format!("https://img.example.com/{id}.jpg"),
                likes: 0,
                created_at: Some("2024-01-01T00:00:00Z".to_string()),
                liked: None,
                favorited: None,
            },
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.artwork.title = title.to_string();
        self
    }

    pub fn artist(mut self, name: &str) -> Self {
        self.artwork.artist_name = name.to_string();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.artwork.category = category;
        self
    }

    pub fn likes(mut self, likes: u64) -> Self {
        self.artwork.likes = likes;
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.artwork.price = Some(price);
        self
    }

    pub fn liked(mut self, liked: bool) -> Self {
        self.artwork.liked = Some(liked);
        self
    }

    pub fn build(self) -> Artwork {
        self.artwork
    }
}

/// A small catalog covering several categories and artists
pub fn sample_catalog() -> Vec<Artwork> {
    vec![
        ArtworkBuilder::new("a1")
            .title("Sunset Dreams")
            .artist("Jane Doe")
            .category(Category::Painting)
            .likes(5)
            .build(),
        ArtworkBuilder::new("a2")
            .title("Neon Skyline")
            .artist("Ravi Kumar")
            .category(Category::DigitalArt)
            .likes(12)
            .build(),
        ArtworkBuilder::new("a3")
            .title("Morning Fog")
            .artist("Ana Sousa")
            .category(Category::Photography)
            .likes(0)
            .build(),
        ArtworkBuilder::new("a4")
            .title("Sunflower Study")
            .artist("Jane Doe")
            .category(Category::Drawing)
            .likes(3)
            .build(),
    ]
}
