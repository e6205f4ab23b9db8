//! Wire shapes used by the backend.
//!
//! Field names follow the backend's camelCase JSON. Optional fields map to
//! `Option` here; defaults are applied by the mappers, not by serde.

use serde::{Deserialize, Serialize};

// -- Auth ---------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JwtResponse {
    pub token: String,
    #[serde(rename = "type", default)]
    pub token_type: Option<String>,
    pub id: i64,
    pub username: String,
    pub email: String,
    pub nombre: String,
    pub apellido: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default = "default_true")]
    pub activo: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub nombre: String,
    pub apellido: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// -- Products -----------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub codigo: String,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub stock: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub fecha_ingreso: Option<String>,
    #[serde(default)]
    pub ubicacion: Option<String>,
    #[serde(default = "default_true")]
    pub activo: bool,
    #[serde(default)]
    pub umbral_stock: Option<i64>,
    #[serde(default)]
    pub categoria_id: Option<i64>,
    #[serde(default)]
    pub categoria: Option<CategoryDto>,
    /// Legacy price column; the backend reads `precioActual`.
    #[serde(default)]
    pub precio: Option<f64>,
    #[serde(default)]
    pub precio_actual: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
}

// -- Movements ----------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementDto {
    pub id: i64,
    pub fecha: String,
    #[serde(default)]
    pub usuario_id: Option<i64>,
    #[serde(default)]
    pub usuario: Option<UserDto>,
    pub producto_id: i64,
    #[serde(default)]
    pub producto: Option<ProductDto>,
    pub cantidad: i64,
    pub tipo: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub producto_codigo: Option<String>,
    #[serde(default)]
    pub producto_nombre: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovementRequest {
    pub producto_id: i64,
    pub cantidad: i64,
    pub tipo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
}

// -- Users --------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    #[serde(default = "default_true")]
    pub activo: bool,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub nombre: String,
    pub apellido: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apellido: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

// -- Roles --------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleDto {
    pub id: i64,
    pub nombre: String,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_dto_accepts_minimal_payload() {
        let json = r#"{"id": 3, "codigo": "HCOR-001", "nombre": "Broca", "stock": 5}"#;
        let dto: ProductDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.codigo, "HCOR-001");
        assert!(dto.activo);
        assert!(dto.categoria.is_none());
        assert!(dto.precio_actual.is_none());
    }

    #[test]
    fn product_dto_serializes_camel_case() {
        let dto = ProductDto {
            id: 1,
            codigo: "HCOR-001".into(),
            nombre: "Broca".into(),
            descripcion: None,
            stock: 2,
            image_url: None,
            fecha_ingreso: None,
            ubicacion: None,
            activo: true,
            umbral_stock: Some(2),
            categoria_id: Some(4),
            categoria: None,
            precio: None,
            precio_actual: Some(1500.0),
        };
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["precioActual"], 1500.0);
        assert_eq!(value["categoriaId"], 4);
        assert_eq!(value["umbralStock"], 2);
    }

    #[test]
    fn update_user_request_omits_unset_fields() {
        let req = UpdateUserRequest {
            email: Some("a@b.cl".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 1);
    }
}
