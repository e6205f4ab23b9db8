//! Shared test utilities: in-memory repositories and fixtures.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use maestranza::api::dto::{
    CategoryDto, CreateMovementRequest, CreateUserRequest, MovementDto, ProductDto, RoleDto,
    SignupRequest, UpdateUserRequest, UserDto,
};
use maestranza::api::{ApiClient, ApiError};
use maestranza::config::{ApiConfig, ScreenConfig, SecureString};
use maestranza::model::{Session, SessionUser};
use maestranza::outcome::Outcome;
use maestranza::repository::{
    AuthRepository, InventoryRepository, MovementRepository, RoleRepository, UserRepository,
};
use maestranza::session::{MemorySessionStore, SessionStore};
use parking_lot::Mutex;

// -- Call bookkeeping ---------------------------------------------------------

/// Per-operation call counters, injected failures and an optional delay.
#[derive(Default)]
pub struct Script {
    calls: Mutex<HashMap<&'static str, usize>>,
    failures: Mutex<VecDeque<ApiError>>,
    delay: Mutex<Option<Duration>>,
}

impl Script {
    pub fn calls(&self, op: &str) -> usize {
        self.calls.lock().get(op).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }

    /// The next call, whichever it is, fails with `err`.
    pub fn fail_next(&self, err: ApiError) {
        self.failures.lock().push_back(err);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    async fn enter(&self, op: &'static str) -> Option<ApiError> {
        *self.calls.lock().entry(op).or_insert(0) += 1;
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.failures.lock().pop_front()
    }
}

macro_rules! gate {
    ($script:expr, $op:literal) => {
        if let Some(err) = $script.enter($op).await {
            return Outcome::Error(err);
        }
    };
}

// -- Fixtures -----------------------------------------------------------------

pub fn screen_config() -> ScreenConfig {
    ScreenConfig::default()
}

pub fn category(id: i64, name: &str) -> CategoryDto {
    CategoryDto {
        id,
        nombre: name.to_string(),
        descripcion: None,
    }
}

pub fn product_dto(id: i64, code: &str, name: &str, category_name: &str, stock: i64) -> ProductDto {
    ProductDto {
        id,
        codigo: code.to_string(),
        nombre: name.to_string(),
        descripcion: None,
        stock,
        image_url: None,
        fecha_ingreso: None,
        ubicacion: Some("Bodega A".to_string()),
        activo: true,
        umbral_stock: Some(5),
        categoria_id: Some(1),
        categoria: Some(category(1, category_name)),
        precio: None,
        precio_actual: Some(1990.0),
    }
}

pub fn movement_dto(id: i64, fecha: &str, tipo: &str, producto_id: i64, cantidad: i64) -> MovementDto {
    MovementDto {
        id,
        fecha: fecha.to_string(),
        usuario_id: Some(1),
        usuario: Some(user_dto(1, "admin", true, &["ROLE_ADMINISTRADOR"])),
        producto_id,
        producto: None,
        cantidad,
        tipo: tipo.to_string(),
        descripcion: None,
        producto_codigo: Some(format!("HCOR-{:03}", producto_id)),
        producto_nombre: Some(format!("Producto {}", producto_id)),
        image_path: None,
    }
}

pub fn user_dto(id: i64, username: &str, active: bool, roles: &[&str]) -> UserDto {
    UserDto {
        id,
        username: username.to_string(),
        email: format!("{}@maestranza.cl", username),
        nombre: "Nombre".to_string(),
        apellido: format!("Apellido {}", id),
        activo: active,
        roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}

pub fn session_user() -> SessionUser {
    SessionUser {
        id: 1,
        username: "admin".to_string(),
        email: "admin@maestranza.cl".to_string(),
        nombre: "Ana".to_string(),
        apellido: "Rojas".to_string(),
        roles: vec!["ROLE_ADMINISTRADOR".to_string()],
    }
}

/// Client against `base_url` with a token channel that never changes.
pub fn api_client(base_url: &str, timeout_seconds: u32) -> ApiClient {
    let (_tx, rx) = tokio::sync::watch::channel(Some(SecureString::new("test-token")));
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds,
        connect_timeout_seconds: 2,
    };
    ApiClient::new(&config, rx).unwrap()
}

// -- Inventory ----------------------------------------------------------------

pub struct FakeInventory {
    pub script: Script,
    products: Mutex<Vec<ProductDto>>,
    categories: Mutex<Vec<CategoryDto>>,
    next_id: AtomicI64,
    /// Payloads received by create/update, in order.
    pub sent: Mutex<Vec<ProductDto>>,
}

impl FakeInventory {
    pub fn new(products: Vec<ProductDto>) -> Arc<Self> {
        let next = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Arc::new(Self {
            script: Script::default(),
            products: Mutex::new(products),
            categories: Mutex::new(vec![category(1, "Herramientas"), category(2, "Materiales")]),
            next_id: AtomicI64::new(next),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn products(&self) -> Vec<ProductDto> {
        self.products.lock().clone()
    }

    fn find(&self, id: i64) -> Outcome<ProductDto> {
        match self.products.lock().iter().find(|p| p.id == id) {
            Some(p) => Outcome::Success(p.clone()),
            None => Outcome::Error(not_found()),
        }
    }

    fn modify(&self, id: i64, f: impl FnOnce(&mut ProductDto)) -> Outcome<ProductDto> {
        let mut products = self.products.lock();
        match products.iter_mut().find(|p| p.id == id) {
            Some(p) => {
                f(p);
                Outcome::Success(p.clone())
            }
            None => Outcome::Error(not_found()),
        }
    }
}

#[async_trait]
impl InventoryRepository for FakeInventory {
    async fn fetch_all(&self) -> Outcome<Vec<ProductDto>> {
        gate!(self.script, "fetch_all");
        Outcome::Success(self.products())
    }

    async fn fetch_by_id(&self, id: i64) -> Outcome<ProductDto> {
        gate!(self.script, "fetch_by_id");
        self.find(id)
    }

    async fn create(&self, product: &ProductDto) -> Outcome<ProductDto> {
        gate!(self.script, "create");
        self.sent.lock().push(product.clone());
        let mut created = product.clone();
        created.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.products.lock().push(created.clone());
        Outcome::Success(created)
    }

    async fn update(&self, id: i64, product: &ProductDto) -> Outcome<ProductDto> {
        gate!(self.script, "update");
        self.sent.lock().push(product.clone());
        self.modify(id, |p| {
            *p = ProductDto {
                id,
                ..product.clone()
            }
        })
    }

    async fn delete(&self, id: i64) -> Outcome<()> {
        gate!(self.script, "delete");
        let mut products = self.products.lock();
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            Outcome::Error(not_found())
        } else {
            Outcome::Success(())
        }
    }

    async fn search(&self, term: &str) -> Outcome<Vec<ProductDto>> {
        gate!(self.script, "search");
        let term = term.to_lowercase();
        Outcome::Success(
            self.products()
                .into_iter()
                .filter(|p| p.nombre.to_lowercase().contains(&term) || p.codigo.to_lowercase().contains(&term))
                .collect(),
        )
    }

    async fn low_stock(&self) -> Outcome<Vec<ProductDto>> {
        gate!(self.script, "low_stock");
        Outcome::Success(
            self.products()
                .into_iter()
                .filter(|p| p.stock > 0 && p.stock <= p.umbral_stock.unwrap_or(10))
                .collect(),
        )
    }

    async fn out_of_stock(&self) -> Outcome<Vec<ProductDto>> {
        gate!(self.script, "out_of_stock");
        Outcome::Success(self.products().into_iter().filter(|p| p.stock == 0).collect())
    }

    async fn by_category(&self, category_id: i64) -> Outcome<Vec<ProductDto>> {
        gate!(self.script, "by_category");
        Outcome::Success(
            self.products()
                .into_iter()
                .filter(|p| p.categoria_id == Some(category_id))
                .collect(),
        )
    }

    async fn update_stock(&self, id: i64, stock: u32) -> Outcome<ProductDto> {
        gate!(self.script, "update_stock");
        self.modify(id, |p| p.stock = i64::from(stock))
    }

    async fn deactivate(&self, id: i64) -> Outcome<ProductDto> {
        gate!(self.script, "deactivate");
        self.modify(id, |p| p.activo = false)
    }

    async fn reactivate(&self, id: i64) -> Outcome<ProductDto> {
        gate!(self.script, "reactivate");
        self.modify(id, |p| p.activo = true)
    }

    async fn categories(&self) -> Outcome<Vec<CategoryDto>> {
        gate!(self.script, "categories");
        Outcome::Success(self.categories.lock().clone())
    }

    async fn create_category(&self, category: &CategoryDto) -> Outcome<CategoryDto> {
        gate!(self.script, "create_category");
        let mut categories = self.categories.lock();
        let created = CategoryDto {
            id: categories.len() as i64 + 1,
            ..category.clone()
        };
        categories.push(created.clone());
        Outcome::Success(created)
    }
}

// -- Movements ----------------------------------------------------------------

pub struct FakeMovements {
    pub script: Script,
    movements: Mutex<Vec<MovementDto>>,
    next_id: AtomicI64,
    pub sent: Mutex<Vec<CreateMovementRequest>>,
}

impl FakeMovements {
    pub fn new(movements: Vec<MovementDto>) -> Arc<Self> {
        let next = movements.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        Arc::new(Self {
            script: Script::default(),
            movements: Mutex::new(movements),
            next_id: AtomicI64::new(next),
            sent: Mutex::new(Vec::new()),
        })
    }

    fn matching(&self, keep: impl Fn(&MovementDto) -> bool) -> Vec<MovementDto> {
        self.movements.lock().iter().filter(|m| keep(m)).cloned().collect()
    }
}

#[async_trait]
impl MovementRepository for FakeMovements {
    async fn fetch_all(&self) -> Outcome<Vec<MovementDto>> {
        gate!(self.script, "fetch_all");
        Outcome::Success(self.matching(|_| true))
    }

    async fn fetch_by_id(&self, id: i64) -> Outcome<MovementDto> {
        gate!(self.script, "fetch_by_id");
        match self.matching(|m| m.id == id).pop() {
            Some(m) => Outcome::Success(m),
            None => Outcome::Error(not_found()),
        }
    }

    async fn create(&self, request: &CreateMovementRequest) -> Outcome<MovementDto> {
        gate!(self.script, "create");
        self.sent.lock().push(request.clone());
        let mut created = movement_dto(
            self.next_id.fetch_add(1, Ordering::SeqCst),
            "2024-06-10T08:15:00",
            &request.tipo,
            request.producto_id,
            request.cantidad,
        );
        created.descripcion = request.descripcion.clone();
        self.movements.lock().push(created.clone());
        Outcome::Success(created)
    }

    async fn by_type(&self, kind: maestranza::model::MovementType) -> Outcome<Vec<MovementDto>> {
        gate!(self.script, "by_type");
        Outcome::Success(self.matching(|m| m.tipo.eq_ignore_ascii_case(kind.as_wire())))
    }

    async fn by_date_range(&self, from: chrono::NaiveDate, to: chrono::NaiveDate) -> Outcome<Vec<MovementDto>> {
        gate!(self.script, "by_date_range");
        let (from, to) = (from.to_string(), to.to_string());
        Outcome::Success(self.matching(|m| m.fecha[..10] >= *from && m.fecha[..10] <= *to))
    }

    async fn by_product(&self, product_id: i64) -> Outcome<Vec<MovementDto>> {
        gate!(self.script, "by_product");
        Outcome::Success(self.matching(|m| m.producto_id == product_id))
    }

    async fn search_by_code(&self, code: &str) -> Outcome<Vec<MovementDto>> {
        gate!(self.script, "search_by_code");
        Outcome::Success(self.matching(|m| m.producto_codigo.as_deref() == Some(code)))
    }

    async fn search_by_name(&self, name: &str) -> Outcome<Vec<MovementDto>> {
        gate!(self.script, "search_by_name");
        Outcome::Success(self.matching(|m| {
            m.producto_nombre
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&name.to_lowercase()))
        }))
    }

    async fn filtered(&self, query: &maestranza::repository::MovementQuery) -> Outcome<Vec<MovementDto>> {
        gate!(self.script, "filtered");
        Outcome::Success(self.matching(|m| {
            query.product_id.map_or(true, |id| m.producto_id == id)
                && query
                    .kind
                    .map_or(true, |k| m.tipo.eq_ignore_ascii_case(k.as_wire()))
        }))
    }
}

// -- Users and roles ----------------------------------------------------------

pub struct FakeUsers {
    pub script: Script,
    users: Mutex<Vec<UserDto>>,
    next_id: AtomicI64,
    pub updates: Mutex<Vec<(i64, UpdateUserRequest)>>,
}

impl FakeUsers {
    pub fn new(users: Vec<UserDto>) -> Arc<Self> {
        let next = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Arc::new(Self {
            script: Script::default(),
            users: Mutex::new(users),
            next_id: AtomicI64::new(next),
            updates: Mutex::new(Vec::new()),
        })
    }

    pub fn users(&self) -> Vec<UserDto> {
        self.users.lock().clone()
    }

    fn set_active(&self, id: i64, active: bool) -> Outcome<()> {
        match self.users.lock().iter_mut().find(|u| u.id == id) {
            Some(u) => {
                u.activo = active;
                Outcome::Success(())
            }
            None => Outcome::Error(not_found()),
        }
    }
}

#[async_trait]
impl UserRepository for FakeUsers {
    async fn fetch_all(&self) -> Outcome<Vec<UserDto>> {
        gate!(self.script, "fetch_all");
        Outcome::Success(self.users())
    }

    async fn fetch_by_id(&self, id: i64) -> Outcome<UserDto> {
        gate!(self.script, "fetch_by_id");
        match self.users().into_iter().find(|u| u.id == id) {
            Some(u) => Outcome::Success(u),
            None => Outcome::Error(not_found()),
        }
    }

    async fn fetch_by_username(&self, username: &str) -> Outcome<UserDto> {
        gate!(self.script, "fetch_by_username");
        match self.users().into_iter().find(|u| u.username == username) {
            Some(u) => Outcome::Success(u),
            None => Outcome::Error(not_found()),
        }
    }

    async fn create(&self, request: &CreateUserRequest) -> Outcome<()> {
        gate!(self.script, "create");
        self.users.lock().push(UserDto {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            username: request.username.clone(),
            email: request.email.clone(),
            nombre: request.nombre.clone(),
            apellido: request.apellido.clone(),
            activo: true,
            roles: request.roles.clone(),
        });
        Outcome::Success(())
    }

    async fn update(&self, id: i64, request: &UpdateUserRequest) -> Outcome<()> {
        gate!(self.script, "update");
        self.updates.lock().push((id, request.clone()));
        Outcome::Success(())
    }

    async fn delete(&self, id: i64) -> Outcome<()> {
        gate!(self.script, "delete");
        self.users.lock().retain(|u| u.id != id);
        Outcome::Success(())
    }

    async fn activate(&self, id: i64) -> Outcome<()> {
        gate!(self.script, "activate");
        self.set_active(id, true)
    }

    async fn deactivate(&self, id: i64) -> Outcome<()> {
        gate!(self.script, "deactivate");
        self.set_active(id, false)
    }
}

pub struct FakeRoles {
    pub script: Script,
    roles: Vec<RoleDto>,
}

impl FakeRoles {
    pub fn new(names: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            script: Script::default(),
            roles: names
                .iter()
                .enumerate()
                .map(|(i, n)| RoleDto {
                    id: i as i64 + 1,
                    nombre: n.to_string(),
                })
                .collect(),
        })
    }
}

#[async_trait]
impl RoleRepository for FakeRoles {
    async fn fetch_all(&self) -> Outcome<Vec<RoleDto>> {
        gate!(self.script, "fetch_all");
        Outcome::Success(self.roles.clone())
    }

    async fn fetch_by_id(&self, id: i64) -> Outcome<RoleDto> {
        gate!(self.script, "fetch_by_id");
        match self.roles.iter().find(|r| r.id == id) {
            Some(r) => Outcome::Success(r.clone()),
            None => Outcome::Error(not_found()),
        }
    }

    async fn fetch_by_name(&self, name: &str) -> Outcome<RoleDto> {
        gate!(self.script, "fetch_by_name");
        match self.roles.iter().find(|r| r.nombre == name) {
            Some(r) => Outcome::Success(r.clone()),
            None => Outcome::Error(not_found()),
        }
    }
}

// -- Auth ---------------------------------------------------------------------

/// Accepts exactly one username/password pair; stores sessions in memory.
pub struct FakeAuth {
    pub script: Script,
    pub store: Arc<MemorySessionStore>,
    username: String,
    password: String,
}

impl FakeAuth {
    pub fn new(username: &str, password: &str) -> Arc<Self> {
        Arc::new(Self {
            script: Script::default(),
            store: Arc::new(MemorySessionStore::new()),
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

#[async_trait]
impl AuthRepository for FakeAuth {
    async fn login(&self, username: &str, password: &SecureString) -> Outcome<Session> {
        gate!(self.script, "login");
        if username != self.username || password.expose() != self.password {
            return Outcome::Error(ApiError::Status {
                status: 401,
                body: "Bad credentials".to_string(),
            });
        }
        let session = Session {
            token: SecureString::new("jwt-token"),
            user: SessionUser {
                username: username.to_string(),
                ..session_user()
            },
        };
        if self.store.save(&session).await.is_err() {
            return Outcome::Error(ApiError::Request("store".to_string()));
        }
        Outcome::Success(session)
    }

    async fn logout(&self) -> Outcome<()> {
        let _ = self.store.clear().await;
        gate!(self.script, "logout");
        Outcome::Success(())
    }

    async fn signup(&self, request: &SignupRequest) -> Outcome<String> {
        gate!(self.script, "signup");
        Outcome::Success(format!("Usuario {} registrado", request.username))
    }

    async fn verify(&self) -> Outcome<()> {
        gate!(self.script, "verify");
        Outcome::Success(())
    }

    async fn validate_token(&self) -> Outcome<()> {
        gate!(self.script, "validate_token");
        Outcome::Success(())
    }

    async fn session(&self) -> Option<Session> {
        self.store.load().await.ok().flatten()
    }
}

pub fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        body: "Not found".to_string(),
    }
}
