//! Image Gallery Manager
//!
//! Ordered list of product images with a single "main" (cover) flag.
//!
//! Invariants kept by every operation:
//! - `display_order` equals the position (0..n-1)
//! - a non-empty gallery has exactly one main image
//!
//! The main flag travels with its image when images are moved.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{AppError, ErrorCode};
use crate::models::{ProductImage, ProductImageCreate};

/// Gallery operation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GalleryError {
    #[error("Image URL is invalid: {0:?}")]
    InvalidUrl(String),

    #[error("Image already in gallery: {0}")]
    DuplicateUrl(String),

    #[error("Image index {index} out of range (gallery has {len} images)")]
    IndexOutOfRange { index: usize, len: usize },
}

impl From<GalleryError> for AppError {
    fn from(err: GalleryError) -> Self {
        let code = match &err {
            GalleryError::InvalidUrl(_) => ErrorCode::ImageUrlInvalid,
            GalleryError::DuplicateUrl(_) => ErrorCode::ImageUrlDuplicate,
            GalleryError::IndexOutOfRange { .. } => ErrorCode::ImageIndexOutOfRange,
        };
        AppError::with_message(code, err.to_string())
    }
}

/// One gallery entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    /// Persisted id, `None` for images added in this session
    pub id: Option<i64>,
    pub image_url: String,
    pub display_order: i32,
    pub is_main: bool,
    pub alt_text: Option<String>,
}

/// Ordered image gallery of one product
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageGallery {
    images: Vec<GalleryImage>,
}

impl ImageGallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a gallery from stored rows.
    ///
    /// Rows are sorted by `display_order` and renumbered; if no row (or more
    /// than one) is flagged main, the first flagged row or else the first row
    /// becomes main.
    pub fn from_persisted(mut rows: Vec<ProductImage>) -> Self {
        rows.sort_by_key(|r| (r.display_order, r.id));
        let main_pos = rows.iter().position(|r| r.is_main).unwrap_or(0);
        let images = rows
            .into_iter()
            .enumerate()
            .map(|(pos, r)| GalleryImage {
                id: Some(r.id),
                image_url: r.image_url,
                display_order: pos as i32,
                is_main: pos == main_pos,
                alt_text: r.alt_text,
            })
            .collect();
        Self { images }
    }

    pub fn images(&self) -> &[GalleryImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn main_index(&self) -> Option<usize> {
        self.images.iter().position(|img| img.is_main)
    }

    pub fn main(&self) -> Option<&GalleryImage> {
        self.main_index().map(|i| &self.images[i])
    }

    pub fn contains_url(&self, url: &str) -> bool {
        self.images.iter().any(|img| img.image_url == url)
    }

    /// Append an image. The first image of an empty gallery becomes main.
    pub fn add(&mut self, url: &str) -> Result<(), GalleryError> {
        let url = url.trim();
        if !is_acceptable_url(url) {
            return Err(GalleryError::InvalidUrl(url.to_string()));
        }
        if self.contains_url(url) {
            return Err(GalleryError::DuplicateUrl(url.to_string()));
        }
        let is_main = self.images.is_empty();
        self.images.push(GalleryImage {
            id: None,
            image_url: url.to_string(),
            display_order: self.images.len() as i32,
            is_main,
            alt_text: None,
        });
        Ok(())
    }

    /// Remove the image at `index`. Removing the main image promotes the new
    /// first image.
    pub fn remove(&mut self, index: usize) -> Result<GalleryImage, GalleryError> {
        self.check_index(index)?;
        let removed = self.images.remove(index);
        if removed.is_main {
            if let Some(first) = self.images.first_mut() {
                first.is_main = true;
            }
        }
        self.renumber();
        Ok(removed)
    }

    /// Flag the image at `index` as main, clearing every other flag.
    pub fn set_main(&mut self, index: usize) -> Result<(), GalleryError> {
        self.check_index(index)?;
        for (pos, img) in self.images.iter_mut().enumerate() {
            img.is_main = pos == index;
        }
        Ok(())
    }

    /// Move the image at `from` to position `to`.
    pub fn move_image(&mut self, from: usize, to: usize) -> Result<(), GalleryError> {
        self.check_index(from)?;
        self.check_index(to)?;
        let img = self.images.remove(from);
        self.images.insert(to, img);
        self.renumber();
        Ok(())
    }

    /// Create payloads in display order, used when re-creating the gallery on
    /// save.
    pub fn to_create_payloads(&self) -> Vec<ProductImageCreate> {
        self.images
            .iter()
            .map(|img| ProductImageCreate {
                image_url: img.image_url.clone(),
                display_order: Some(img.display_order),
                is_main: Some(img.is_main),
                alt_text: img.alt_text.clone(),
            })
            .collect()
    }

    fn check_index(&self, index: usize) -> Result<(), GalleryError> {
        if index >= self.images.len() {
            return Err(GalleryError::IndexOutOfRange {
                index,
                len: self.images.len(),
            });
        }
        Ok(())
    }

    fn renumber(&mut self) {
        for (pos, img) in self.images.iter_mut().enumerate() {
            img.display_order = pos as i32;
        }
    }
}

/// `http(s)://` with a host, or a root-relative path such as
/// `/uploads/a.jpg`.
pub fn is_acceptable_url(url: &str) -> bool {
    if url.is_empty() || url.chars().any(char::is_whitespace) {
        return false;
    }
    if url.starts_with('/') && !url.starts_with("//") {
        return url::Url::parse(&format!("http://localhost{}", url)).is_ok();
    }
    match url::Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery(urls: &[&str]) -> ImageGallery {
        let mut g = ImageGallery::new();
        for url in urls {
            g.add(url).unwrap();
        }
        g
    }

    fn orders(g: &ImageGallery) -> Vec<i32> {
        g.images().iter().map(|i| i.display_order).collect()
    }

    fn urls(g: &ImageGallery) -> Vec<&str> {
        g.images().iter().map(|i| i.image_url.as_str()).collect()
    }

    fn main_count(g: &ImageGallery) -> usize {
        g.images().iter().filter(|i| i.is_main).count()
    }

    #[test]
    fn test_first_image_becomes_main() {
        let g = gallery(&["https://cdn.example.com/a.jpg", "https://cdn.example.com/b.jpg"]);
        assert_eq!(g.main_index(), Some(0));
        assert_eq!(main_count(&g), 1);
        assert_eq!(orders(&g), vec![0, 1]);
    }

    #[test]
    fn test_duplicate_url_rejected() {
        let mut g = gallery(&["https://cdn.example.com/a.jpg"]);
        let err = g.add("https://cdn.example.com/a.jpg").unwrap_err();
        assert!(matches!(err, GalleryError::DuplicateUrl(_)));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn test_invalid_urls_rejected() {
        let mut g = ImageGallery::new();
        for bad in ["", "   ", "not a url", "ftp://host/a.jpg", "https://", "//cdn/a.jpg"] {
            assert!(
                matches!(g.add(bad), Err(GalleryError::InvalidUrl(_))),
                "accepted {bad:?}"
            );
        }
        assert!(g.is_empty());
        g.add("/uploads/a.jpg").unwrap();
        g.add("http://localhost:3000/b.png").unwrap();
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn test_remove_main_promotes_new_first() {
        let mut g = gallery(&["/a.jpg", "/b.jpg", "/c.jpg"]);
        let removed = g.remove(0).unwrap();
        assert!(removed.is_main);
        assert_eq!(urls(&g), vec!["/b.jpg", "/c.jpg"]);
        assert!(g.images()[0].is_main);
        assert_eq!(main_count(&g), 1);
        assert_eq!(orders(&g), vec![0, 1]);
    }

    #[test]
    fn test_remove_non_main_keeps_main() {
        let mut g = gallery(&["/a.jpg", "/b.jpg", "/c.jpg"]);
        g.set_main(2).unwrap();
        g.remove(0).unwrap();
        assert_eq!(g.main().unwrap().image_url, "/c.jpg");
        assert_eq!(orders(&g), vec![0, 1]);
    }

    #[test]
    fn test_remove_last_image_leaves_empty_gallery() {
        let mut g = gallery(&["/a.jpg"]);
        g.remove(0).unwrap();
        assert!(g.is_empty());
        assert_eq!(g.main_index(), None);
    }

    #[test]
    fn test_set_main_is_exclusive() {
        let mut g = gallery(&["/a.jpg", "/b.jpg", "/c.jpg"]);
        g.set_main(1).unwrap();
        assert_eq!(g.main_index(), Some(1));
        assert_eq!(main_count(&g), 1);
    }

    #[test]
    fn test_move_preserves_main_identity() {
        let mut g = gallery(&["/a.jpg", "/b.jpg", "/c.jpg"]);
        g.move_image(0, 2).unwrap();
        assert_eq!(urls(&g), vec!["/b.jpg", "/c.jpg", "/a.jpg"]);
        assert_eq!(orders(&g), vec![0, 1, 2]);
        assert_eq!(g.main().unwrap().image_url, "/a.jpg");
        assert_eq!(main_count(&g), 1);
    }

    #[test]
    fn test_out_of_range_index() {
        let mut g = gallery(&["/a.jpg"]);
        assert_eq!(
            g.remove(3).unwrap_err(),
            GalleryError::IndexOutOfRange { index: 3, len: 1 }
        );
        assert!(g.set_main(1).is_err());
        assert!(g.move_image(0, 1).is_err());
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn test_order_invariant_after_mixed_operations() {
        let mut g = gallery(&["/a.jpg", "/b.jpg", "/c.jpg", "/d.jpg"]);
        g.remove(1).unwrap();
        g.add("/e.jpg").unwrap();
        g.move_image(3, 0).unwrap();
        g.remove(2).unwrap();
        assert_eq!(orders(&g), (0..g.len() as i32).collect::<Vec<_>>());
        assert_eq!(main_count(&g), 1);
    }

    #[test]
    fn test_from_persisted_sorts_and_repairs_main() {
        let row = |id: i64, order: i32, is_main: bool| ProductImage {
            id,
            product_id: 1,
            image_url: format!("/img/{id}.jpg"),
            display_order: order,
            is_main,
            alt_text: None,
            created_at: 0,
        };
        let g = ImageGallery::from_persisted(vec![row(3, 5, false), row(1, 2, false)]);
        assert_eq!(urls(&g), vec!["/img/1.jpg", "/img/3.jpg"]);
        assert_eq!(orders(&g), vec![0, 1]);
        assert_eq!(g.main_index(), Some(0));

        let g = ImageGallery::from_persisted(vec![
            row(1, 0, false),
            row(2, 1, true),
            row(3, 2, true),
        ]);
        assert_eq!(g.main_index(), Some(1));
        assert_eq!(main_count(&g), 1);
    }

    #[test]
    fn test_gallery_error_maps_to_app_error() {
        let err: AppError = GalleryError::DuplicateUrl("/a.jpg".into()).into();
        assert_eq!(err.code, ErrorCode::ImageUrlDuplicate);
        let err: AppError = GalleryError::IndexOutOfRange { index: 1, len: 0 }.into();
        assert_eq!(err.code, ErrorCode::ImageIndexOutOfRange);
    }

    #[test]
    fn test_create_payloads_follow_display_order() {
        let mut g = gallery(&["/a.jpg", "/b.jpg"]);
        g.set_main(1).unwrap();
        let payloads = g.to_create_payloads();
        assert_eq!(payloads[0].display_order, Some(0));
        assert_eq!(payloads[1].is_main, Some(true));
        assert_eq!(payloads[0].is_main, Some(false));
    }
}
