//! Product form draft: fields, gallery and specifications

use shared::gallery::ImageGallery;
use shared::models::{ProductAttributeCreate, ProductCreate, ProductDetail, ProductUpdate};

use super::{Draft, DraftError, parse_amount, require_amount, require_text};

/// One specification row of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecDraft {
    pub name: String,
    pub value: String,
    /// Signed amount as typed; blank means no price change
    pub price_modifier: String,
    pub is_active: bool,
}

impl Default for SpecDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            value: String::new(),
            price_modifier: String::new(),
            is_active: true,
        }
    }
}

impl SpecDraft {
    /// Rows without both a name and a value are not submitted
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty() || self.value.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    /// Persisted id; `Some` when editing
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    /// Base price as typed
    pub price: String,
    pub original_price: String,
    pub category_id: Option<i64>,
    pub is_available: bool,
    pub is_featured: bool,
    pub is_promotion: bool,
    pub gallery: ImageGallery,
    pub specs: Vec<SpecDraft>,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            price: String::new(),
            original_price: String::new(),
            category_id: None,
            is_available: true,
            is_featured: false,
            is_promotion: false,
            gallery: ImageGallery::new(),
            specs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductAction {
    SetName(String),
    SetDescription(String),
    SetPrice(String),
    SetOriginalPrice(String),
    SetCategory(Option<i64>),
    SetAvailable(bool),
    SetFeatured(bool),
    SetPromotion(bool),
    AddImage(String),
    RemoveImage(usize),
    SetMainImage(usize),
    MoveImage { from: usize, to: usize },
    AddSpec,
    UpdateSpec { index: usize, spec: SpecDraft },
    RemoveSpec(usize),
}

impl ProductDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft for editing a stored product. The editable price is the base
    /// price; the displayed price is derived from it.
    pub fn from_detail(detail: &ProductDetail) -> Self {
        let product = &detail.product;
        Self {
            id: Some(product.id),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.base_price.to_string(),
            original_price: product
                .original_price
                .map(|p| p.to_string())
                .unwrap_or_default(),
            category_id: Some(product.category_id),
            is_available: product.is_available,
            is_featured: product.is_featured,
            is_promotion: product.is_promotion,
            gallery: ImageGallery::from_persisted(detail.images.clone()),
            specs: detail
                .attributes
                .iter()
                .map(|a| SpecDraft {
                    name: a.attribute_name.clone(),
                    value: a.attribute_value.clone(),
                    price_modifier: a.price_modifier.to_string(),
                    is_active: a.is_active,
                })
                .collect(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn to_create(&self) -> Result<ProductCreate, DraftError> {
        self.validate()?;
        Ok(ProductCreate {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: require_amount("price", &self.price)?,
            original_price: parse_amount("originalPrice", &self.original_price, false)?,
            category_id: self.category_id.ok_or(DraftError::MissingField("categoryId"))?,
            image_url: self.gallery.main().map(|img| img.image_url.clone()),
            is_available: Some(self.is_available),
            is_featured: Some(self.is_featured),
            is_promotion: Some(self.is_promotion),
        })
    }

    pub fn to_update(&self) -> Result<ProductUpdate, DraftError> {
        let create = self.to_create()?;
        Ok(ProductUpdate {
            name: Some(create.name),
            description: Some(create.description),
            price: Some(create.price),
            original_price: Some(create.original_price),
            category_id: Some(create.category_id),
            image_url: create.image_url,
            is_available: create.is_available,
            is_featured: create.is_featured,
            is_promotion: create.is_promotion,
        })
    }

    /// Attribute payloads for every filled-in specification row
    pub fn attribute_payloads(
        &self,
        product_id: i64,
    ) -> Result<Vec<ProductAttributeCreate>, DraftError> {
        self.specs
            .iter()
            .filter(|s| !s.is_blank())
            .map(|s| {
                Ok(ProductAttributeCreate {
                    product_id,
                    attribute_name: s.name.trim().to_string(),
                    attribute_value: s.value.trim().to_string(),
                    price_modifier: parse_amount("priceModifier", &s.price_modifier, true)?,
                    is_active: Some(s.is_active),
                })
            })
            .collect()
    }

    fn check_spec(&self, index: usize) -> Result<(), DraftError> {
        if index >= self.specs.len() {
            return Err(DraftError::IndexOutOfRange {
                field: "specs",
                index,
                len: self.specs.len(),
            });
        }
        Ok(())
    }
}

impl Draft for ProductDraft {
    type Action = ProductAction;

    fn reduce(&self, action: ProductAction) -> Result<Self, DraftError> {
        let mut next = self.clone();
        match action {
            ProductAction::SetName(name) => next.name = name,
            ProductAction::SetDescription(description) => next.description = description,
            ProductAction::SetPrice(price) => next.price = price,
            ProductAction::SetOriginalPrice(price) => next.original_price = price,
            ProductAction::SetCategory(category_id) => next.category_id = category_id,
            ProductAction::SetAvailable(v) => next.is_available = v,
            ProductAction::SetFeatured(v) => next.is_featured = v,
            ProductAction::SetPromotion(v) => next.is_promotion = v,
            ProductAction::AddImage(url) => next.gallery.add(&url)?,
            ProductAction::RemoveImage(index) => {
                next.gallery.remove(index)?;
            }
            ProductAction::SetMainImage(index) => next.gallery.set_main(index)?,
            ProductAction::MoveImage { from, to } => next.gallery.move_image(from, to)?,
            ProductAction::AddSpec => next.specs.push(SpecDraft::default()),
            ProductAction::UpdateSpec { index, spec } => {
                next.check_spec(index)?;
                next.specs[index] = spec;
            }
            ProductAction::RemoveSpec(index) => {
                next.check_spec(index)?;
                next.specs.remove(index);
            }
        }
        Ok(next)
    }

    fn validate(&self) -> Result<(), DraftError> {
        require_text("name", &self.name)?;
        require_text("description", &self.description)?;
        require_amount("price", &self.price)?;
        if self.category_id.is_none() {
            return Err(DraftError::MissingField("categoryId"));
        }
        parse_amount("originalPrice", &self.original_price, false)?;
        for spec in self.specs.iter().filter(|s| !s.is_blank()) {
            parse_amount("priceModifier", &spec.price_modifier, true)?;
        }
        Ok(())
    }
}
