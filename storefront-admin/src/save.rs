//! Multi-step product save
//!
//! Saving a product is a sequence of independent requests:
//!
//! 1. create or update the product
//! 2. clear its attributes (edit only)
//! 3. create each filled-in specification
//! 4. clear its images (edit only, one deletion per image)
//! 5. create each image in gallery order
//! 6. promote the main image
//!
//! There is no transaction across the steps. The product record stays saved
//! when a later step fails; the [`SaveReport`] tells the caller exactly what
//! happened. Image failures are logged and the pipeline moves on.

use serde::Serialize;

use crate::api::CatalogApi;
use crate::draft::banner::BannerDraft;
use crate::draft::delivery_zone::DeliveryZoneDraft;
use crate::draft::product::ProductDraft;
use crate::draft::{Draft, DraftError};

/// One request of a save
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "camelCase")]
pub enum SaveStep {
    Product,
    ClearAttributes,
    CreateAttribute { name: String },
    ClearImages,
    DeleteImage { image_id: i64 },
    CreateImage { image_url: String },
    PromoteMainImage,
    Banner,
    DeliveryZone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "camelCase")]
pub enum StepOutcome {
    Succeeded,
    Failed(String),
    Skipped(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SaveStatus {
    /// Every step succeeded
    Complete,
    /// The record was saved but some later step failed or was skipped
    Partial,
    /// The record itself was not saved
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReport {
    /// Id of the saved record, `None` when the first step failed
    pub record_id: Option<i64>,
    pub steps: Vec<(SaveStep, StepOutcome)>,
}

impl SaveReport {
    pub fn status(&self) -> SaveStatus {
        if self.record_id.is_none() {
            return SaveStatus::Failed;
        }
        if self
            .steps
            .iter()
            .all(|(_, outcome)| *outcome == StepOutcome::Succeeded)
        {
            SaveStatus::Complete
        } else {
            SaveStatus::Partial
        }
    }

    /// Steps that did not succeed
    pub fn problems(&self) -> impl Iterator<Item = &(SaveStep, StepOutcome)> {
        self.steps
            .iter()
            .filter(|(_, outcome)| *outcome != StepOutcome::Succeeded)
    }

    fn succeeded(&mut self, step: SaveStep) {
        self.steps.push((step, StepOutcome::Succeeded));
    }

    fn failed(&mut self, step: SaveStep, error: impl std::fmt::Display) {
        self.steps.push((step, StepOutcome::Failed(error.to_string())));
    }

    fn skipped(&mut self, step: SaveStep, reason: &str) {
        self.steps.push((step, StepOutcome::Skipped(reason.to_string())));
    }
}

/// Save a product draft. Returns `Err` only when the draft is invalid, in
/// which case no request was made.
pub async fn save_product<A>(api: &A, draft: &ProductDraft) -> Result<SaveReport, DraftError>
where
    A: CatalogApi + ?Sized,
{
    draft.validate()?;
    let attributes_base = draft.attribute_payloads(0)?;
    let images = draft.gallery.to_create_payloads();
    let mut report = SaveReport::default();

    // 1. Product record
    let saved = match draft.id {
        Some(id) => api.update_product(id, &draft.to_update()?).await,
        None => api.create_product(&draft.to_create()?).await,
    };
    let product_id = match saved {
        Ok(product) => {
            report.succeeded(SaveStep::Product);
            product.id
        }
        Err(e) => {
            tracing::error!(error = %e, "Product save failed");
            report.failed(SaveStep::Product, e);
            return Ok(report);
        }
    };
    report.record_id = Some(product_id);

    // 2-3. Specifications
    let mut attributes_cleared = true;
    if draft.is_edit() {
        match api.clear_attributes(product_id).await {
            Ok(()) => report.succeeded(SaveStep::ClearAttributes),
            Err(e) => {
                tracing::warn!(product_id, error = %e, "Clearing attributes failed");
                report.failed(SaveStep::ClearAttributes, e);
                attributes_cleared = false;
            }
        }
    }
    for mut attribute in attributes_base {
        let step = SaveStep::CreateAttribute {
            name: attribute.attribute_name.clone(),
        };
        if !attributes_cleared {
            report.skipped(step, "previous attributes could not be cleared");
            continue;
        }
        attribute.product_id = product_id;
        match api.create_attribute(&attribute).await {
            Ok(_) => report.succeeded(step),
            Err(e) => {
                tracing::warn!(product_id, attribute = %attribute.attribute_name, error = %e, "Attribute creation failed");
                report.failed(step, e);
            }
        }
    }

    // 4. Stored images
    if draft.is_edit() {
        match api.list_images(product_id).await {
            Ok(stored) => {
                report.succeeded(SaveStep::ClearImages);
                for image in stored {
                    let step = SaveStep::DeleteImage { image_id: image.id };
                    match api.delete_image(product_id, image.id).await {
                        Ok(()) => report.succeeded(step),
                        Err(e) => {
                            tracing::warn!(product_id, image_id = image.id, error = %e, "Image deletion failed");
                            report.failed(step, e);
                        }
                    }
                }
            }
            Err(e) => {
                tracing::warn!(product_id, error = %e, "Listing images failed");
                report.failed(SaveStep::ClearImages, e);
            }
        }
    }

    // 5. Gallery, in order
    let mut main_image_id = None;
    let mut main_missing = false;
    for image in &images {
        let step = SaveStep::CreateImage {
            image_url: image.image_url.clone(),
        };
        let is_main = image.is_main == Some(true);
        match api.create_image(product_id, image).await {
            Ok(created) => {
                if is_main {
                    main_image_id = Some(created.id);
                }
                report.succeeded(step);
            }
            Err(e) => {
                tracing::warn!(product_id, url = %image.image_url, error = %e, "Image creation failed");
                main_missing |= is_main;
                report.failed(step, e);
            }
        }
    }

    // 6. Main image
    if let Some(image_id) = main_image_id {
        match api.set_main_image(product_id, image_id).await {
            Ok(()) => report.succeeded(SaveStep::PromoteMainImage),
            Err(e) => {
                tracing::warn!(product_id, image_id, error = %e, "Main image promotion failed");
                report.failed(SaveStep::PromoteMainImage, e);
            }
        }
    } else if main_missing {
        report.skipped(SaveStep::PromoteMainImage, "main image was not created");
    }

    tracing::info!(product_id, status = ?report.status(), "Product saved");
    Ok(report)
}

/// Save a banner draft in a single request
pub async fn save_banner<A>(api: &A, draft: &BannerDraft) -> Result<SaveReport, DraftError>
where
    A: CatalogApi + ?Sized,
{
    draft.validate()?;
    let result = match draft.id {
        Some(id) => api.update_banner(id, &draft.to_update()?).await,
        None => api.create_banner(&draft.to_create()?).await,
    };
    Ok(single_step(SaveStep::Banner, result.map(|b| b.id)))
}

/// Save a delivery zone draft in a single request
pub async fn save_delivery_zone<A>(
    api: &A,
    draft: &DeliveryZoneDraft,
) -> Result<SaveReport, DraftError>
where
    A: CatalogApi + ?Sized,
{
    draft.validate()?;
    let result = match draft.id {
        Some(id) => api.update_delivery_zone(id, &draft.to_update()?).await,
        None => api.create_delivery_zone(&draft.to_create()?).await,
    };
    Ok(single_step(SaveStep::DeliveryZone, result.map(|z| z.id)))
}

fn single_step(step: SaveStep, result: crate::ClientResult<i64>) -> SaveReport {
    let mut report = SaveReport::default();
    match result {
        Ok(id) => {
            report.record_id = Some(id);
            report.succeeded(step);
        }
        Err(e) => {
            tracing::error!(?step, error = %e, "Save failed");
            report.failed(step, e);
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status() {
        let mut report = SaveReport::default();
        report.failed(SaveStep::Product, "boom");
        assert_eq!(report.status(), SaveStatus::Failed);

        let mut report = SaveReport {
            record_id: Some(1),
            ..Default::default()
        };
        report.succeeded(SaveStep::Product);
        assert_eq!(report.status(), SaveStatus::Complete);

        report.skipped(SaveStep::PromoteMainImage, "main image was not created");
        assert_eq!(report.status(), SaveStatus::Partial);
        assert_eq!(report.problems().count(), 1);
    }
}
