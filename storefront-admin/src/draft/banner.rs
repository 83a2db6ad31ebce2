//! Banner form draft

use shared::gallery::is_acceptable_url;
use shared::models::{Banner, BannerCreate, BannerUpdate, DEFAULT_GRADIENT};

use super::{Draft, DraftError, non_blank, parse_amount, require_text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerDraft {
    pub id: Option<i64>,
    pub name: String,
    pub title: String,
    pub description: String,
    /// Optional highlighted price as typed
    pub price: String,
    pub image_url: String,
    pub gradient: [String; 4],
    pub use_background_image: bool,
    pub is_customizable: bool,
    pub html_content: String,
    pub is_active: bool,
}

impl Default for BannerDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            title: String::new(),
            description: String::new(),
            price: String::new(),
            image_url: String::new(),
            gradient: DEFAULT_GRADIENT.map(String::from),
            use_background_image: false,
            is_customizable: false,
            html_content: String::new(),
            is_active: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BannerAction {
    SetName(String),
    SetTitle(String),
    SetDescription(String),
    SetPrice(String),
    SetImageUrl(String),
    SetGradientColor { index: usize, color: String },
    SetUseBackgroundImage(bool),
    SetCustomizable(bool),
    SetHtmlContent(String),
    SetActive(bool),
}

impl BannerDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_banner(banner: &Banner) -> Self {
        Self {
            id: Some(banner.id),
            name: banner.name.clone(),
            title: banner.title.clone(),
            description: banner.description.clone().unwrap_or_default(),
            price: banner.price.map(|p| p.to_string()).unwrap_or_default(),
            image_url: banner.image_url.clone().unwrap_or_default(),
            gradient: [
                banner.gradient_color1.clone(),
                banner.gradient_color2.clone(),
                banner.gradient_color3.clone(),
                banner.gradient_color4.clone(),
            ],
            use_background_image: banner.use_background_image,
            is_customizable: banner.is_customizable,
            html_content: banner.html_content.clone().unwrap_or_default(),
            is_active: banner.is_active,
        }
    }

    pub fn to_create(&self) -> Result<BannerCreate, DraftError> {
        self.validate()?;
        let [c1, c2, c3, c4] = self.gradient.clone().map(|c| non_blank(&c));
        Ok(BannerCreate {
            name: self.name.trim().to_string(),
            title: self.title.trim().to_string(),
            description: non_blank(&self.description),
            price: parse_amount("price", &self.price, false)?,
            image_url: non_blank(&self.image_url),
            gradient_color1: c1,
            gradient_color2: c2,
            gradient_color3: c3,
            gradient_color4: c4,
            use_background_image: Some(self.use_background_image),
            is_customizable: Some(self.is_customizable),
            html_content: non_blank(&self.html_content),
            is_active: Some(self.is_active),
        })
    }

    /// Update payload; activation goes through its own endpoint
    pub fn to_update(&self) -> Result<BannerUpdate, DraftError> {
        let create = self.to_create()?;
        Ok(BannerUpdate {
            name: Some(create.name),
            title: Some(create.title),
            description: create.description,
            price: create.price,
            image_url: create.image_url,
            gradient_color1: create.gradient_color1,
            gradient_color2: create.gradient_color2,
            gradient_color3: create.gradient_color3,
            gradient_color4: create.gradient_color4,
            use_background_image: create.use_background_image,
            is_customizable: create.is_customizable,
            html_content: create.html_content,
        })
    }
}

impl Draft for BannerDraft {
    type Action = BannerAction;

    fn reduce(&self, action: BannerAction) -> Result<Self, DraftError> {
        let mut next = self.clone();
        match action {
            BannerAction::SetName(v) => next.name = v,
            BannerAction::SetTitle(v) => next.title = v,
            BannerAction::SetDescription(v) => next.description = v,
            BannerAction::SetPrice(v) => next.price = v,
            BannerAction::SetImageUrl(v) => next.image_url = v,
            BannerAction::SetGradientColor { index, color } => {
                let len = next.gradient.len();
                let slot = next
                    .gradient
                    .get_mut(index)
                    .ok_or(DraftError::IndexOutOfRange {
                        field: "gradient",
                        index,
                        len,
                    })?;
                *slot = color;
            }
            BannerAction::SetUseBackgroundImage(v) => next.use_background_image = v,
            BannerAction::SetCustomizable(v) => next.is_customizable = v,
            BannerAction::SetHtmlContent(v) => next.html_content = v,
            BannerAction::SetActive(v) => next.is_active = v,
        }
        Ok(next)
    }

    fn validate(&self) -> Result<(), DraftError> {
        require_text("name", &self.name)?;
        require_text("title", &self.title)?;
        parse_amount("price", &self.price, false)?;
        match non_blank(&self.image_url) {
            Some(url) if !is_acceptable_url(&url) => {
                return Err(DraftError::InvalidUrl { field: "imageUrl" });
            }
            None if self.use_background_image => {
                return Err(DraftError::MissingField("imageUrl"));
            }
            _ => {}
        }
        if self.is_customizable && self.html_content.trim().is_empty() {
            return Err(DraftError::MissingField("htmlContent"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn filled() -> BannerDraft {
        BannerDraft::new()
            .reduce(BannerAction::SetName("Black Friday".into()))
            .unwrap()
            .reduce(BannerAction::SetTitle("Até 50% off".into()))
            .unwrap()
    }

    #[test]
    fn test_name_and_title_required() {
        assert_eq!(BannerDraft::new().validate(), Err(DraftError::MissingField("name")));
        let no_title = filled().reduce(BannerAction::SetTitle("".into())).unwrap();
        assert_eq!(no_title.validate(), Err(DraftError::MissingField("title")));
    }

    #[test]
    fn test_background_image_needs_url() {
        let draft = filled().reduce(BannerAction::SetUseBackgroundImage(true)).unwrap();
        assert_eq!(draft.validate(), Err(DraftError::MissingField("imageUrl")));
        let draft = draft
            .reduce(BannerAction::SetImageUrl("ftp://x/y.png".into()))
            .unwrap();
        assert_eq!(draft.validate(), Err(DraftError::InvalidUrl { field: "imageUrl" }));
        let draft = draft
            .reduce(BannerAction::SetImageUrl("https://cdn.example.com/bf.png".into()))
            .unwrap();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_gradient_bounds() {
        let draft = filled()
            .reduce(BannerAction::SetGradientColor {
                index: 3,
                color: "#000000".into(),
            })
            .unwrap();
        assert_eq!(draft.gradient[3], "#000000");
        assert!(matches!(
            draft.reduce(BannerAction::SetGradientColor {
                index: 4,
                color: "#fff".into()
            }),
            Err(DraftError::IndexOutOfRange { field: "gradient", .. })
        ));
    }

    #[test]
    fn test_to_create_blank_optionals_are_none() {
        let create = filled()
            .reduce(BannerAction::SetPrice("199,90".into()))
            .unwrap()
            .to_create()
            .unwrap();
        assert_eq!(create.price, Some(Decimal::new(19990, 2)));
        assert_eq!(create.description, None);
        assert_eq!(create.gradient_color1.as_deref(), Some(DEFAULT_GRADIENT[0]));
        assert_eq!(create.is_active, Some(false));
    }
}
