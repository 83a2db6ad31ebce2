//! Save pipeline against an in-memory CatalogApi that records every call

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Banner, BannerCreate, BannerUpdate, BulkRecalculateResult, Category, DeliveryZone,
    DeliveryZoneCreate, DeliveryZoneUpdate, Product, ProductAttribute, ProductAttributeCreate,
    ProductCreate, ProductDetail, ProductImage, ProductImageCreate, ProductUpdate,
    RecalculatedPrice,
};
use storefront_admin::draft::{
    DeliveryZoneAction, DeliveryZoneDraft, ProductAction, ProductDraft, SpecDraft,
};
use storefront_admin::save::{save_delivery_zone, save_product};
use storefront_admin::{
    CatalogApi, ClientError, ClientResult, Draft, DraftError, Notice, SaveStatus, SaveStep,
    StepOutcome,
};

#[derive(Default)]
struct RecordingApi {
    calls: Mutex<Vec<String>>,
    /// Calls (as recorded) that answer with an error
    failing: HashSet<String>,
    /// Images already stored for the edited product
    stored_images: Vec<ProductImage>,
    next_id: AtomicI64,
}

impl RecordingApi {
    fn failing(calls: &[&str]) -> Self {
        Self {
            failing: calls.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> ClientResult<()> {
        self.calls.lock().unwrap().push(call.clone());
        if self.failing.contains(&call) {
            return Err(AppError::internal(format!("{call} failed")).into());
        }
        Ok(())
    }

    fn id(&self) -> i64 {
        100 + self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

fn product(id: i64, name: &str, price: Decimal) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: String::new(),
        price,
        base_price: price,
        original_price: None,
        category_id: 1,
        image_url: None,
        is_available: true,
        is_featured: false,
        is_promotion: false,
        created_at: 0,
        updated_at: 0,
    }
}

#[async_trait]
impl CatalogApi for RecordingApi {
    async fn get_product(&self, id: i64) -> ClientResult<ProductDetail> {
        self.record(format!("get_product:{id}"))?;
        Err(AppError::new(ErrorCode::ProductNotFound).into())
    }

    async fn create_product(&self, data: &ProductCreate) -> ClientResult<Product> {
        self.record("create_product".into())?;
        Ok(product(self.id(), &data.name, data.price))
    }

    async fn update_product(&self, id: i64, data: &ProductUpdate) -> ClientResult<Product> {
        self.record(format!("update_product:{id}"))?;
        Ok(product(
            id,
            data.name.as_deref().unwrap_or_default(),
            data.price.unwrap_or_default(),
        ))
    }

    async fn delete_product(&self, id: i64) -> ClientResult<()> {
        self.record(format!("delete_product:{id}"))
    }

    async fn clear_attributes(&self, product_id: i64) -> ClientResult<()> {
        self.record(format!("clear_attributes:{product_id}"))
    }

    async fn create_attribute(
        &self,
        data: &ProductAttributeCreate,
    ) -> ClientResult<ProductAttribute> {
        self.record(format!("create_attribute:{}", data.attribute_name))?;
        Ok(ProductAttribute {
            id: self.id(),
            product_id: data.product_id,
            attribute_name: data.attribute_name.clone(),
            attribute_value: data.attribute_value.clone(),
            price_modifier: data.price_modifier.unwrap_or_default(),
            is_active: data.is_active.unwrap_or(true),
            created_at: 0,
        })
    }

    async fn list_images(&self, product_id: i64) -> ClientResult<Vec<ProductImage>> {
        self.record(format!("list_images:{product_id}"))?;
        Ok(self.stored_images.clone())
    }

    async fn delete_image(&self, product_id: i64, image_id: i64) -> ClientResult<()> {
        self.record(format!("delete_image:{product_id}:{image_id}"))
    }

    async fn create_image(
        &self,
        product_id: i64,
        data: &ProductImageCreate,
    ) -> ClientResult<ProductImage> {
        self.record(format!("create_image:{}", data.image_url))?;
        Ok(ProductImage {
            id: self.id(),
            product_id,
            image_url: data.image_url.clone(),
            display_order: data.display_order.unwrap_or_default(),
            is_main: data.is_main.unwrap_or(false),
            alt_text: data.alt_text.clone(),
            created_at: 0,
        })
    }

    async fn set_main_image(&self, product_id: i64, image_id: i64) -> ClientResult<()> {
        self.record(format!("set_main_image:{product_id}:{image_id}"))
    }

    async fn recalculate_price(&self, product_id: i64) -> ClientResult<RecalculatedPrice> {
        self.record(format!("recalculate_price:{product_id}"))?;
        Ok(RecalculatedPrice {
            product_id,
            total_price: Decimal::ZERO,
            formatted_price: "R$ 0,00".into(),
        })
    }

    async fn recalculate_all_prices(&self) -> ClientResult<BulkRecalculateResult> {
        self.record("recalculate_all_prices".into())?;
        Ok(BulkRecalculateResult::default())
    }

    async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.record("list_categories".into())?;
        Ok(vec![])
    }

    async fn delete_category(&self, id: i64) -> ClientResult<()> {
        self.record(format!("delete_category:{id}"))?;
        Err(AppError::new(ErrorCode::CategoryHasProducts).into())
    }

    async fn create_banner(&self, _data: &BannerCreate) -> ClientResult<Banner> {
        self.record("create_banner".into())?;
        Err(AppError::internal("not used").into())
    }

    async fn update_banner(&self, id: i64, _data: &BannerUpdate) -> ClientResult<Banner> {
        self.record(format!("update_banner:{id}"))?;
        Err(AppError::internal("not used").into())
    }

    async fn create_delivery_zone(&self, data: &DeliveryZoneCreate) -> ClientResult<DeliveryZone> {
        self.record("create_delivery_zone".into())?;
        Ok(DeliveryZone {
            id: self.id(),
            neighborhood_name: data.neighborhood_name.clone(),
            delivery_fee: data.delivery_fee,
            is_active: data.is_active.unwrap_or(true),
            created_at: 0,
            updated_at: 0,
        })
    }

    async fn update_delivery_zone(
        &self,
        id: i64,
        _data: &DeliveryZoneUpdate,
    ) -> ClientResult<DeliveryZone> {
        self.record(format!("update_delivery_zone:{id}"))?;
        Err(AppError::internal("not used").into())
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn new_product_draft() -> ProductDraft {
    let actions = vec![
        ProductAction::SetName("Notebook".into()),
        ProductAction::SetDescription("16GB".into()),
        ProductAction::SetPrice("100,00".into()),
        ProductAction::SetCategory(Some(1)),
        ProductAction::AddSpec,
        ProductAction::UpdateSpec {
            index: 0,
            spec: SpecDraft {
                name: "Memória".into(),
                value: "16GB".into(),
                price_modifier: "10".into(),
                is_active: true,
            },
        },
        ProductAction::AddImage("/img/a.jpg".into()),
        ProductAction::AddImage("/img/b.jpg".into()),
        ProductAction::SetMainImage(1),
    ];
    actions
        .into_iter()
        .try_fold(ProductDraft::new(), |d, a| d.reduce(a))
        .unwrap()
}

fn edit_draft() -> ProductDraft {
    ProductDraft {
        id: Some(7),
        ..new_product_draft()
    }
}

fn stored_image(id: i64, url: &str) -> ProductImage {
    ProductImage {
        id,
        product_id: 7,
        image_url: url.into(),
        display_order: 0,
        is_main: false,
        alt_text: None,
        created_at: 0,
    }
}

#[tokio::test]
async fn empty_name_makes_no_calls() {
    let api = RecordingApi::default();
    let draft = new_product_draft()
        .reduce(ProductAction::SetName("  ".into()))
        .unwrap();

    let err = save_product(&api, &draft).await.unwrap_err();
    assert_eq!(err, DraftError::MissingField("name"));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn create_runs_steps_in_order() {
    let api = RecordingApi::default();
    let report = save_product(&api, &new_product_draft()).await.unwrap();

    assert_eq!(report.status(), SaveStatus::Complete);
    assert_eq!(report.record_id, Some(100));
    assert_eq!(
        api.calls(),
        vec![
            "create_product",
            "create_attribute:Memória",
            "create_image:/img/a.jpg",
            "create_image:/img/b.jpg",
            // b.jpg was created third (id 103)
            "set_main_image:100:103",
        ]
    );
}

#[tokio::test]
async fn edit_clears_before_recreating() {
    let api = RecordingApi {
        stored_images: vec![stored_image(1, "/img/a.jpg"), stored_image(2, "/img/old.jpg")],
        ..Default::default()
    };
    let report = save_product(&api, &edit_draft()).await.unwrap();

    assert_eq!(report.status(), SaveStatus::Complete);
    assert_eq!(
        api.calls(),
        vec![
            "update_product:7",
            "clear_attributes:7",
            "create_attribute:Memória",
            "list_images:7",
            "delete_image:7:1",
            "delete_image:7:2",
            "create_image:/img/a.jpg",
            "create_image:/img/b.jpg",
            "set_main_image:7:102",
        ]
    );
}

#[tokio::test]
async fn image_failure_is_swallowed() {
    init_tracing();
    let api = RecordingApi::failing(&["create_image:/img/a.jpg"]);
    let report = save_product(&api, &new_product_draft()).await.unwrap();

    assert_eq!(report.status(), SaveStatus::Partial);
    let calls = api.calls();
    assert!(calls.contains(&"create_image:/img/b.jpg".to_string()));
    assert!(calls.iter().any(|c| c.starts_with("set_main_image:")));
    let problems: Vec<_> = report.problems().collect();
    assert_eq!(problems.len(), 1);
    assert!(matches!(problems[0].1, StepOutcome::Failed(_)));
}

#[tokio::test]
async fn failed_main_image_skips_promotion() {
    let api = RecordingApi::failing(&["create_image:/img/b.jpg"]);
    let report = save_product(&api, &new_product_draft()).await.unwrap();

    assert_eq!(report.status(), SaveStatus::Partial);
    assert!(!api.calls().iter().any(|c| c.starts_with("set_main_image:")));
    assert!(report.steps.iter().any(|(step, outcome)| {
        *step == SaveStep::PromoteMainImage && matches!(outcome, StepOutcome::Skipped(_))
    }));
}

#[tokio::test]
async fn product_failure_stops_the_pipeline() {
    let api = RecordingApi::failing(&["create_product"]);
    let report = save_product(&api, &new_product_draft()).await.unwrap();

    assert_eq!(report.status(), SaveStatus::Failed);
    assert_eq!(report.record_id, None);
    assert_eq!(api.calls(), vec!["create_product"]);
}

#[tokio::test]
async fn attribute_clear_failure_skips_attribute_creation() {
    init_tracing();
    let api = RecordingApi::failing(&["clear_attributes:7"]);
    let report = save_product(&api, &edit_draft()).await.unwrap();

    assert_eq!(report.status(), SaveStatus::Partial);
    let calls = api.calls();
    assert!(!calls.iter().any(|c| c.starts_with("create_attribute:")));
    // Images are still processed
    assert!(calls.contains(&"create_image:/img/a.jpg".to_string()));
    assert!(report.steps.iter().any(|(step, outcome)| {
        matches!(step, SaveStep::CreateAttribute { .. }) && matches!(outcome, StepOutcome::Skipped(_))
    }));
}

#[tokio::test]
async fn delivery_zone_saves_in_one_step() {
    let api = RecordingApi::default();
    let draft = DeliveryZoneDraft::new()
        .reduce(DeliveryZoneAction::SetNeighborhood("Centro".into()))
        .unwrap()
        .reduce(DeliveryZoneAction::SetDeliveryFee("7,00".into()))
        .unwrap();

    let report = save_delivery_zone(&api, &draft).await.unwrap();
    assert_eq!(report.status(), SaveStatus::Complete);
    assert_eq!(api.calls(), vec!["create_delivery_zone"]);

    let blank = DeliveryZoneDraft::new();
    assert!(save_delivery_zone(&api, &blank).await.is_err());
    assert_eq!(api.calls().len(), 1);
}

#[tokio::test]
async fn category_with_products_notice() {
    let api = RecordingApi::default();
    let err: ClientError = api.delete_category(3).await.unwrap_err();
    let notice = Notice::from_error("Delete category", &err);
    assert_eq!(
        notice.description,
        "Cannot delete a category that still has products."
    );
}
