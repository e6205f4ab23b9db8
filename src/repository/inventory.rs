use async_trait::async_trait;

use crate::api::dto::{CategoryDto, ProductDto};
use crate::api::ApiClient;
use crate::outcome::Outcome;
use crate::repository::outcome;

const PRODUCTS: &str = "api/v1/productos";
const CATEGORIES: &str = "api/v1/categorias";

#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn fetch_all(&self) -> Outcome<Vec<ProductDto>>;
    async fn fetch_by_id(&self, id: i64) -> Outcome<ProductDto>;
    async fn create(&self, product: &ProductDto) -> Outcome<ProductDto>;
    async fn update(&self, id: i64, product: &ProductDto) -> Outcome<ProductDto>;
    async fn delete(&self, id: i64) -> Outcome<()>;
    async fn search(&self, term: &str) -> Outcome<Vec<ProductDto>>;
    async fn low_stock(&self) -> Outcome<Vec<ProductDto>>;
    async fn out_of_stock(&self) -> Outcome<Vec<ProductDto>>;
    async fn by_category(&self, category_id: i64) -> Outcome<Vec<ProductDto>>;
    async fn update_stock(&self, id: i64, stock: u32) -> Outcome<ProductDto>;
    async fn deactivate(&self, id: i64) -> Outcome<ProductDto>;
    async fn reactivate(&self, id: i64) -> Outcome<ProductDto>;
    async fn categories(&self) -> Outcome<Vec<CategoryDto>>;
    async fn create_category(&self, category: &CategoryDto) -> Outcome<CategoryDto>;
}

pub struct HttpInventoryRepository {
    api: ApiClient,
}

impl HttpInventoryRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl InventoryRepository for HttpInventoryRepository {
    async fn fetch_all(&self) -> Outcome<Vec<ProductDto>> {
        tracing::debug!("Fetching products");
        outcome("products.fetch_all", self.api.get(PRODUCTS).await)
    }

    async fn fetch_by_id(&self, id: i64) -> Outcome<ProductDto> {
        outcome(
            "products.fetch_by_id",
            self.api.get(&format!("{}/{}", PRODUCTS, id)).await,
        )
    }

    async fn create(&self, product: &ProductDto) -> Outcome<ProductDto> {
        tracing::debug!(codigo = %product.codigo, "Creating product");
        outcome("products.create", self.api.post(PRODUCTS, product).await)
    }

    async fn update(&self, id: i64, product: &ProductDto) -> Outcome<ProductDto> {
        tracing::debug!(id, codigo = %product.codigo, "Updating product");
        outcome(
            "products.update",
            self.api.put(&format!("{}/{}", PRODUCTS, id), product).await,
        )
    }

    async fn delete(&self, id: i64) -> Outcome<()> {
        tracing::debug!(id, "Deleting product");
        outcome(
            "products.delete",
            self.api.delete(&format!("{}/{}", PRODUCTS, id)).await,
        )
    }

    async fn search(&self, term: &str) -> Outcome<Vec<ProductDto>> {
        outcome(
            "products.search",
            self.api
                .get_query(
                    &format!("{}/buscar", PRODUCTS),
                    &[("termino", term.to_string())],
                )
                .await,
        )
    }

    async fn low_stock(&self) -> Outcome<Vec<ProductDto>> {
        outcome(
            "products.low_stock",
            self.api.get(&format!("{}/stock-bajo", PRODUCTS)).await,
        )
    }

    async fn out_of_stock(&self) -> Outcome<Vec<ProductDto>> {
        outcome(
            "products.out_of_stock",
            self.api.get(&format!("{}/agotados", PRODUCTS)).await,
        )
    }

    async fn by_category(&self, category_id: i64) -> Outcome<Vec<ProductDto>> {
        outcome(
            "products.by_category",
            self.api
                .get(&format!("{}/categoria/{}", PRODUCTS, category_id))
                .await,
        )
    }

    async fn update_stock(&self, id: i64, stock: u32) -> Outcome<ProductDto> {
        outcome(
            "products.update_stock",
            self.api
                .patch_query(
                    &format!("{}/{}/stock", PRODUCTS, id),
                    &[("nuevoStock", stock.to_string())],
                )
                .await,
        )
    }

    async fn deactivate(&self, id: i64) -> Outcome<ProductDto> {
        outcome(
            "products.deactivate",
            self.api
                .patch_query(&format!("{}/{}/desactivar", PRODUCTS, id), &[])
                .await,
        )
    }

    async fn reactivate(&self, id: i64) -> Outcome<ProductDto> {
        outcome(
            "products.reactivate",
            self.api
                .patch_query(&format!("{}/{}/reactivar", PRODUCTS, id), &[])
                .await,
        )
    }

    async fn categories(&self) -> Outcome<Vec<CategoryDto>> {
        outcome("categories.fetch_all", self.api.get(CATEGORIES).await)
    }

    async fn create_category(&self, category: &CategoryDto) -> Outcome<CategoryDto> {
        outcome(
            "categories.create",
            self.api.post(CATEGORIES, category).await,
        )
    }
}
