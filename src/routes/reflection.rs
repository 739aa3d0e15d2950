use axum::Json;
use serde::Serialize;

use super::auth_v1::{CREATE_PATH, GET_PATH, SERVICE};

#[derive(Debug, Serialize)]
pub struct ServiceDescriptor {
    pub name: &'static str,
    pub methods: Vec<MethodDescriptor>,
}

#[derive(Debug, Serialize)]
pub struct MethodDescriptor {
    pub name: &'static str,
    pub path: &'static str,
    pub request: Vec<FieldDescriptor>,
    pub response: Vec<FieldDescriptor>,
}

#[derive(Debug, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub ty: &'static str,
}

const fn field(name: &'static str, ty: &'static str) -> FieldDescriptor {
    FieldDescriptor { name, ty }
}

/// Describes every exposed service so tooling can discover methods and
/// message shapes without a schema file.
pub fn descriptors() -> Vec<ServiceDescriptor> {
    vec![ServiceDescriptor {
        name: SERVICE,
        methods: vec![
            MethodDescriptor {
                name: "Get",
                path: GET_PATH,
                request: vec![field("id", "int64")],
                response: vec![
                    field("id", "int64"),
                    field("name", "string"),
                    field("email", "string"),
                    field("role", "int32"),
                    field("created_at", "timestamp"),
                ],
            },
            MethodDescriptor {
                name: "Create",
                path: CREATE_PATH,
                request: vec![
                    field("email", "string"),
                    field("name", "string"),
                    field("password", "string"),
                    field("password_confirm", "string"),
                    field("role", "int32"),
                ],
                response: vec![field("id", "int64")],
            },
        ],
    }]
}

pub async fn list_services() -> Json<Vec<ServiceDescriptor>> {
    Json(descriptors())
}
