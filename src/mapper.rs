//! DTO <-> domain conversions.
//!
//! Every default for a missing wire field lives here:
//! - product category: [`DEFAULT_CATEGORY`]
//! - product description: empty string
//! - product price: `precioActual`, then legacy `precio`, then `0`
//! - product stock: negative values clamp to `0`
//! - movement actor: [`DEFAULT_ACTOR`]
//! - movement product code and name: flat fields, then the nested product,
//!   then [`DEFAULT_PRODUCT_CODE`] / [`DEFAULT_PRODUCT_NAME`]
//! - user and role names: canonical `ROLE_*` tags
//!
//! Movement type and timestamp have no default: an unknown value rejects
//! the row with a [`MappingError`].

use chrono::{DateTime, NaiveDateTime};
use thiserror::Error;

use crate::api::dto::{
    CategoryDto, JwtResponse, MovementDto, ProductDto, RoleDto, UserDto,
};
use crate::config::SecureString;
use crate::model::{
    canonical_role, Category, Movement, MovementType, Product, ProductRef, Role, Session,
    SessionUser, User, DEFAULT_ACTOR, DEFAULT_CATEGORY, DEFAULT_PRODUCT_CODE,
    DEFAULT_PRODUCT_NAME,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("movement {id}: unknown type '{value}'")]
    UnknownMovementType { id: i64, value: String },

    #[error("movement {id}: unparseable date '{value}'")]
    InvalidTimestamp { id: i64, value: String },

    #[error("movement {id}: quantity must be positive, got {value}")]
    InvalidQuantity { id: i64, value: i64 },
}

pub fn product_from_dto(dto: &ProductDto) -> Product {
    Product {
        id: dto.id,
        code: dto.codigo.clone(),
        name: dto.nombre.clone(),
        category: dto
            .categoria
            .as_ref()
            .map(|c| c.nombre.clone())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        category_id: dto.categoria_id.or_else(|| dto.categoria.as_ref().map(|c| c.id)),
        description: dto.descripcion.clone().unwrap_or_default(),
        price: dto.precio_actual.or(dto.precio).unwrap_or(0.0),
        stock: clamp_stock(dto.stock),
        active: dto.activo,
    }
}

/// Builds a create/update payload.
///
/// The backend reads the price from `precioActual`; `precio` is always sent
/// empty. Fields the domain entity does not carry (image, location, entry
/// date, stock threshold) are taken from `base` when present.
pub fn product_to_dto(product: &Product, base: Option<&ProductDto>) -> ProductDto {
    let categoria = match (product.category_id, base.and_then(|b| b.categoria.as_ref())) {
        (Some(id), Some(existing)) if existing.id == id => Some(existing.clone()),
        (Some(id), _) => Some(CategoryDto {
            id,
            nombre: product.category.clone(),
            descripcion: None,
        }),
        (None, _) => None,
    };

    ProductDto {
        id: product.id,
        codigo: product.code.clone(),
        nombre: product.name.clone(),
        descripcion: Some(product.description.clone()),
        stock: i64::from(product.stock),
        image_url: base.and_then(|b| b.image_url.clone()),
        fecha_ingreso: base.and_then(|b| b.fecha_ingreso.clone()),
        ubicacion: base.and_then(|b| b.ubicacion.clone()),
        activo: product.active,
        umbral_stock: base.and_then(|b| b.umbral_stock),
        categoria_id: product.category_id,
        categoria,
        precio: None,
        precio_actual: Some(product.price),
    }
}

pub fn category_from_dto(dto: &CategoryDto) -> Category {
    Category {
        id: dto.id,
        name: dto.nombre.clone(),
        description: dto.descripcion.clone().unwrap_or_default(),
    }
}

pub fn movement_from_dto(dto: &MovementDto) -> Result<Movement, MappingError> {
    let kind = MovementType::from_wire(&dto.tipo).ok_or_else(|| {
        MappingError::UnknownMovementType {
            id: dto.id,
            value: dto.tipo.clone(),
        }
    })?;

    let timestamp = parse_timestamp(&dto.fecha).ok_or_else(|| MappingError::InvalidTimestamp {
        id: dto.id,
        value: dto.fecha.clone(),
    })?;

    let quantity = u32::try_from(dto.cantidad)
        .ok()
        .filter(|q| *q > 0)
        .ok_or(MappingError::InvalidQuantity {
            id: dto.id,
            value: dto.cantidad,
        })?;

    let nested = dto.producto.as_ref();
    let product = ProductRef {
        id: dto.producto_id,
        code: dto
            .producto_codigo
            .clone()
            .or_else(|| nested.map(|p| p.codigo.clone()))
            .unwrap_or_else(|| DEFAULT_PRODUCT_CODE.to_string()),
        name: dto
            .producto_nombre
            .clone()
            .or_else(|| nested.map(|p| p.nombre.clone()))
            .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string()),
    };

    Ok(Movement {
        id: dto.id,
        timestamp,
        actor: dto
            .usuario
            .as_ref()
            .map(|u| u.username.clone())
            .unwrap_or_else(|| DEFAULT_ACTOR.to_string()),
        product,
        quantity,
        kind,
        description: dto.descripcion.clone().filter(|d| !d.trim().is_empty()),
        receipt_path: dto.image_path.clone(),
    })
}

/// Maps a batch, keeping good rows in order and returning the rejects.
pub fn movements_from_dtos(dtos: &[MovementDto]) -> (Vec<Movement>, Vec<MappingError>) {
    let mut movements = Vec::with_capacity(dtos.len());
    let mut rejected = Vec::new();
    for dto in dtos {
        match movement_from_dto(dto) {
            Ok(movement) => movements.push(movement),
            Err(err) => {
                tracing::warn!(error = %err, "Dropping movement row");
                rejected.push(err);
            }
        }
    }
    (movements, rejected)
}

pub fn user_from_dto(dto: &UserDto) -> User {
    User {
        id: dto.id,
        username: dto.username.clone(),
        nombre: dto.nombre.clone(),
        apellido: dto.apellido.clone(),
        email: dto.email.clone(),
        active: dto.activo,
        roles: dto.roles.iter().map(|r| canonical_role(r)).collect(),
    }
}

pub fn role_from_dto(dto: &RoleDto) -> Role {
    Role {
        id: dto.id,
        name: canonical_role(&dto.nombre),
    }
}

pub fn session_from_jwt(jwt: &JwtResponse) -> Session {
    Session {
        token: SecureString::new(jwt.token.clone()),
        user: SessionUser {
            id: jwt.id,
            username: jwt.username.clone(),
            email: jwt.email.clone(),
            nombre: jwt.nombre.clone(),
            apellido: jwt.apellido.clone(),
            roles: jwt.roles.iter().map(|r| canonical_role(r)).collect(),
        },
    }
}

fn clamp_stock(stock: i64) -> u32 {
    u32::try_from(stock.max(0)).unwrap_or(u32::MAX)
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    value.parse::<NaiveDateTime>().ok().or_else(|| {
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| dt.naive_local())
    })
}
