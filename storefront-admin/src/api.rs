//! Back-office API surface
//!
//! [`CatalogApi`] lists every call the admin client makes. The save pipeline
//! only depends on this trait, so it runs unchanged against the network
//! client or an in-memory double.

use async_trait::async_trait;
use shared::models::{
    Banner, BannerCreate, BannerUpdate, BulkRecalculateResult, Category, DeliveryZone,
    DeliveryZoneCreate, DeliveryZoneUpdate, Product, ProductAttribute, ProductAttributeCreate,
    ProductCreate, ProductDetail, ProductImage, ProductImageCreate, ProductUpdate,
    RecalculatedPrice,
};

use crate::error::ClientResult;
use crate::http::HttpClient;

#[async_trait]
pub trait CatalogApi: Send + Sync {
    // Products
    async fn get_product(&self, id: i64) -> ClientResult<ProductDetail>;
    async fn create_product(&self, data: &ProductCreate) -> ClientResult<Product>;
    async fn update_product(&self, id: i64, data: &ProductUpdate) -> ClientResult<Product>;
    async fn delete_product(&self, id: i64) -> ClientResult<()>;

    // Attributes
    async fn clear_attributes(&self, product_id: i64) -> ClientResult<()>;
    async fn create_attribute(&self, data: &ProductAttributeCreate)
    -> ClientResult<ProductAttribute>;

    // Gallery
    async fn list_images(&self, product_id: i64) -> ClientResult<Vec<ProductImage>>;
    async fn delete_image(&self, product_id: i64, image_id: i64) -> ClientResult<()>;
    async fn create_image(
        &self,
        product_id: i64,
        data: &ProductImageCreate,
    ) -> ClientResult<ProductImage>;
    async fn set_main_image(&self, product_id: i64, image_id: i64) -> ClientResult<()>;

    // Pricing
    async fn recalculate_price(&self, product_id: i64) -> ClientResult<RecalculatedPrice>;
    async fn recalculate_all_prices(&self) -> ClientResult<BulkRecalculateResult>;

    // Categories
    async fn list_categories(&self) -> ClientResult<Vec<Category>>;
    async fn delete_category(&self, id: i64) -> ClientResult<()>;

    // Banners
    async fn create_banner(&self, data: &BannerCreate) -> ClientResult<Banner>;
    async fn update_banner(&self, id: i64, data: &BannerUpdate) -> ClientResult<Banner>;

    // Delivery zones
    async fn create_delivery_zone(&self, data: &DeliveryZoneCreate) -> ClientResult<DeliveryZone>;
    async fn update_delivery_zone(
        &self,
        id: i64,
        data: &DeliveryZoneUpdate,
    ) -> ClientResult<DeliveryZone>;
}

#[async_trait]
impl CatalogApi for HttpClient {
    async fn get_product(&self, id: i64) -> ClientResult<ProductDetail> {
        self.get(&format!("/api/products/{id}")).await
    }

    async fn create_product(&self, data: &ProductCreate) -> ClientResult<Product> {
        self.post("/api/products", data).await
    }

    async fn update_product(&self, id: i64, data: &ProductUpdate) -> ClientResult<Product> {
        self.put(&format!("/api/products/{id}"), data).await
    }

    async fn delete_product(&self, id: i64) -> ClientResult<()> {
        let _: bool = self.delete(&format!("/api/products/{id}")).await?;
        Ok(())
    }

    async fn clear_attributes(&self, product_id: i64) -> ClientResult<()> {
        let _: u64 = self
            .delete(&format!("/api/products/{product_id}/attributes"))
            .await?;
        Ok(())
    }

    async fn create_attribute(
        &self,
        data: &ProductAttributeCreate,
    ) -> ClientResult<ProductAttribute> {
        self.post("/api/product-attributes", data).await
    }

    async fn list_images(&self, product_id: i64) -> ClientResult<Vec<ProductImage>> {
        self.get(&format!("/api/products/{product_id}/images")).await
    }

    async fn delete_image(&self, product_id: i64, image_id: i64) -> ClientResult<()> {
        let _: bool = self
            .delete(&format!("/api/products/{product_id}/images/{image_id}"))
            .await?;
        Ok(())
    }

    async fn create_image(
        &self,
        product_id: i64,
        data: &ProductImageCreate,
    ) -> ClientResult<ProductImage> {
        self.post(&format!("/api/products/{product_id}/images"), data)
            .await
    }

    async fn set_main_image(&self, product_id: i64, image_id: i64) -> ClientResult<()> {
        let _: Vec<ProductImage> = self
            .put_empty(&format!("/api/products/{product_id}/main-image/{image_id}"))
            .await?;
        Ok(())
    }

    async fn recalculate_price(&self, product_id: i64) -> ClientResult<RecalculatedPrice> {
        self.post_empty(&format!("/api/products/{product_id}/recalculate-price"))
            .await
    }

    async fn recalculate_all_prices(&self) -> ClientResult<BulkRecalculateResult> {
        self.post_empty("/api/products/recalculate-all-prices").await
    }

    async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.get("/api/categories").await
    }

    async fn delete_category(&self, id: i64) -> ClientResult<()> {
        let _: bool = self.delete(&format!("/api/categories/{id}")).await?;
        Ok(())
    }

    async fn create_banner(&self, data: &BannerCreate) -> ClientResult<Banner> {
        self.post("/api/banners", data).await
    }

    async fn update_banner(&self, id: i64, data: &BannerUpdate) -> ClientResult<Banner> {
        self.put(&format!("/api/banners/{id}"), data).await
    }

    async fn create_delivery_zone(&self, data: &DeliveryZoneCreate) -> ClientResult<DeliveryZone> {
        self.post("/api/delivery-zones", data).await
    }

    async fn update_delivery_zone(
        &self,
        id: i64,
        data: &DeliveryZoneUpdate,
    ) -> ClientResult<DeliveryZone> {
        self.put(&format!("/api/delivery-zones/{id}"), data).await
    }
}
