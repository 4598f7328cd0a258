use serde::{Deserialize, Serialize};

pub const UNKNOWN_TITLE: &str = "Unknown title";
pub const UNKNOWN_AUTHOR: &str = "Unknown author";
pub const UNKNOWN: &str = "Unknown";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const NO_ID: &str = "no-id";

/// Response envelope of `GET volumes?q=...`. `items` is absent when nothing
/// matched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeList {
    #[serde(default)]
    pub total_items: u32,
    #[serde(default)]
    pub items: Vec<Volume>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub published_date: Option<String>,
    pub categories: Option<Vec<String>>,
    pub description: Option<String>,
    pub image_links: Option<ImageLinks>,
    pub average_rating: Option<f32>,
    pub ratings_count: Option<u32>,
    pub industry_identifiers: Option<Vec<IndustryIdentifier>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub small_thumbnail: Option<String>,
    pub thumbnail: Option<String>,
    pub medium: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}

/// The reduced record used for list rendering (suggestions, shelves,
/// result lists).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSummary {
    pub id: String,
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub thumbnail: Option<String>,
}

impl BookSummary {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNKNOWN_TITLE)
    }

    pub fn display_authors(&self) -> String {
        join_or(&self.authors, UNKNOWN_AUTHOR)
    }
}

/// Everything the detail screen shows for one volume.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDetail {
    pub id: String,
    pub title: String,
    pub authors: String,
    pub year: String,
    pub categories: String,
    pub description: String,
    pub cover: Option<String>,
    pub average_rating: f32,
    pub ratings_count: u32,
}

impl Volume {
    /// Record id, falling back to the first industry identifier.
    pub fn book_id(&self) -> String {
        self.id
            .clone()
            .filter(|id| !id.is_empty())
            .or_else(|| {
                self.volume_info
                    .industry_identifiers
                    .as_ref()
                    .and_then(|ids| ids.first())
                    .map(|i| i.identifier.clone())
            })
            .unwrap_or_else(|| NO_ID.to_string())
    }

    pub fn summarize(&self) -> BookSummary {
        let info = &self.volume_info;
        let thumbnail = info
            .image_links
            .as_ref()
            .and_then(|l| l.small_thumbnail.clone().or_else(|| l.thumbnail.clone()));
        BookSummary {
            id: self.book_id(),
            title: info.title.clone().filter(|t| !t.is_empty()),
            authors: info.authors.clone().unwrap_or_default(),
            thumbnail,
        }
    }
}

impl From<&Volume> for BookDetail {
    fn from(v: &Volume) -> Self {
        let info = &v.volume_info;
        let year = info
            .published_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(|d| d.chars().take(4).collect::<String>())
            .unwrap_or_else(|| UNKNOWN.to_string());
        let cover = info
            .image_links
            .as_ref()
            .and_then(|l| l.medium.clone().or_else(|| l.thumbnail.clone()));
        Self {
            id: v.book_id(),
            title: info
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            authors: join_or(info.authors.as_deref().unwrap_or_default(), UNKNOWN_AUTHOR),
            year,
            categories: join_or(info.categories.as_deref().unwrap_or_default(), UNKNOWN),
            description: info
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            cover,
            average_rating: info.average_rating.unwrap_or(0.0),
            ratings_count: info.ratings_count.unwrap_or(0),
        }
    }
}

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> Volume {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn summary_prefers_small_thumbnail() {
        let v = parse(serde_json::json!({
            "id": "abc",
            "volumeInfo": {
                "title": "Dune",
                "authors": ["Frank Herbert"],
                "imageLinks": {"smallThumbnail": "http://s", "thumbnail": "http://t"}
            }
        }));
        let s = v.summarize();
        assert_eq!(s.id, "abc");
        assert_eq!(s.display_title(), "Dune");
        assert_eq!(s.display_authors(), "Frank Herbert");
        assert_eq!(s.thumbnail.as_deref(), Some("http://s"));
    }

    #[test]
    fn summary_falls_back_for_missing_fields() {
        let v = parse(serde_json::json!({
            "volumeInfo": {
                "industryIdentifiers": [{"type": "ISBN_13", "identifier": "9780441013593"}]
            }
        }));
        let s = v.summarize();
        assert_eq!(s.id, "9780441013593");
        assert_eq!(s.display_title(), UNKNOWN_TITLE);
        assert_eq!(s.display_authors(), UNKNOWN_AUTHOR);
        assert!(s.thumbnail.is_none());

        let bare = parse(serde_json::json!({}));
        assert_eq!(bare.book_id(), NO_ID);
    }

    #[test]
    fn detail_takes_year_and_medium_cover() {
        let v = parse(serde_json::json!({
            "id": "xyz",
            "volumeInfo": {
                "title": "Emma",
                "authors": ["Jane Austen", "Someone Else"],
                "publishedDate": "1815-12-23",
                "categories": ["Fiction"],
                "imageLinks": {"thumbnail": "http://t", "medium": "http://m"},
                "averageRating": 4.5,
                "ratingsCount": 12
            }
        }));
        let d = BookDetail::from(&v);
        assert_eq!(d.year, "1815");
        assert_eq!(d.authors, "Jane Austen, Someone Else");
        assert_eq!(d.categories, "Fiction");
        assert_eq!(d.cover.as_deref(), Some("http://m"));
        assert_eq!(d.description, NO_DESCRIPTION);
        assert_eq!(d.ratings_count, 12);
    }
}
