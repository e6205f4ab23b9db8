use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::dto::{CreateMovementRequest, MovementDto};
use crate::api::ApiClient;
use crate::model::MovementType;
use crate::outcome::Outcome;
use crate::repository::outcome;

const MOVEMENTS: &str = "api/v1/movimientos";

/// Server-side filter for `api/v1/movimientos/filtros`. Unset fields are
/// not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovementQuery {
    pub product_id: Option<i64>,
    pub user_id: Option<i64>,
    pub kind: Option<MovementType>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl MovementQuery {
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.product_id {
            pairs.push(("productoId", id.to_string()));
        }
        if let Some(id) = self.user_id {
            pairs.push(("usuarioId", id.to_string()));
        }
        if let Some(kind) = self.kind {
            pairs.push(("tipo", kind.as_wire().to_string()));
        }
        if let Some(from) = self.from {
            pairs.push(("fechaInicio", start_of_day(from)));
        }
        if let Some(to) = self.to {
            pairs.push(("fechaFin", end_of_day(to)));
        }
        pairs
    }
}

#[async_trait]
pub trait MovementRepository: Send + Sync {
    async fn fetch_all(&self) -> Outcome<Vec<MovementDto>>;
    async fn fetch_by_id(&self, id: i64) -> Outcome<MovementDto>;
    async fn create(&self, request: &CreateMovementRequest) -> Outcome<MovementDto>;
    async fn by_type(&self, kind: MovementType) -> Outcome<Vec<MovementDto>>;
    async fn by_date_range(&self, from: NaiveDate, to: NaiveDate) -> Outcome<Vec<MovementDto>>;
    async fn by_product(&self, product_id: i64) -> Outcome<Vec<MovementDto>>;
    async fn search_by_code(&self, code: &str) -> Outcome<Vec<MovementDto>>;
    async fn search_by_name(&self, name: &str) -> Outcome<Vec<MovementDto>>;
    async fn filtered(&self, query: &MovementQuery) -> Outcome<Vec<MovementDto>>;
}

pub struct HttpMovementRepository {
    api: ApiClient,
}

impl HttpMovementRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl MovementRepository for HttpMovementRepository {
    async fn fetch_all(&self) -> Outcome<Vec<MovementDto>> {
        tracing::debug!("Fetching movements");
        outcome("movements.fetch_all", self.api.get(MOVEMENTS).await)
    }

    async fn fetch_by_id(&self, id: i64) -> Outcome<MovementDto> {
        outcome(
            "movements.fetch_by_id",
            self.api.get(&format!("{}/{}", MOVEMENTS, id)).await,
        )
    }

    async fn create(&self, request: &CreateMovementRequest) -> Outcome<MovementDto> {
        tracing::debug!(
            producto_id = request.producto_id,
            tipo = %request.tipo,
            cantidad = request.cantidad,
            "Creating movement"
        );
        outcome("movements.create", self.api.post(MOVEMENTS, request).await)
    }

    async fn by_type(&self, kind: MovementType) -> Outcome<Vec<MovementDto>> {
        outcome(
            "movements.by_type",
            self.api
                .get(&format!("{}/tipo/{}", MOVEMENTS, kind.as_wire()))
                .await,
        )
    }

    async fn by_date_range(&self, from: NaiveDate, to: NaiveDate) -> Outcome<Vec<MovementDto>> {
        outcome(
            "movements.by_date_range",
            self.api
                .get_query(
                    &format!("{}/fechas", MOVEMENTS),
                    &[
                        ("fechaInicio", start_of_day(from)),
                        ("fechaFin", end_of_day(to)),
                    ],
                )
                .await,
        )
    }

    async fn by_product(&self, product_id: i64) -> Outcome<Vec<MovementDto>> {
        outcome(
            "movements.by_product",
            self.api
                .get(&format!("{}/producto/{}", MOVEMENTS, product_id))
                .await,
        )
    }

    async fn search_by_code(&self, code: &str) -> Outcome<Vec<MovementDto>> {
        outcome(
            "movements.search_by_code",
            self.api
                .get_query(
                    &format!("{}/buscar/codigo", MOVEMENTS),
                    &[("productoCodigo", code.to_string())],
                )
                .await,
        )
    }

    async fn search_by_name(&self, name: &str) -> Outcome<Vec<MovementDto>> {
        outcome(
            "movements.search_by_name",
            self.api
                .get_query(
                    &format!("{}/buscar/nombre", MOVEMENTS),
                    &[("productoNombre", name.to_string())],
                )
                .await,
        )
    }

    async fn filtered(&self, query: &MovementQuery) -> Outcome<Vec<MovementDto>> {
        let pairs = query.to_pairs();
        outcome(
            "movements.filtered",
            self.api
                .get_query(&format!("{}/filtros", MOVEMENTS), &pairs)
                .await,
        )
    }
}

fn start_of_day(date: NaiveDate) -> String {
    format!("{}T00:00:00", date.format("%Y-%m-%d"))
}

fn end_of_day(date: NaiveDate) -> String {
    format!("{}T23:59:59", date.format("%Y-%m-%d"))
}
