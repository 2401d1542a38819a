pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookstore_kernel::{InitCtx, Module};
use serde_json::json;

use crate::utils::openapi::{error_response, json_response};
use routes::UsersState;
use store::UserStore;

/// Public user registration
pub struct UsersModule {
    store: Arc<UserStore>,
    legacy_status_codes: bool,
}

impl UsersModule {
    pub fn new(store: Arc<UserStore>, legacy_status_codes: bool) -> Self {
        Self {
            store,
            legacy_status_codes,
        }
    }
}

#[async_trait]
impl Module for UsersModule {
    fn name(&self) -> &'static str {
        "users"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            legacy_status_codes = self.legacy_status_codes,
            "users module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(UsersState {
            store: Arc::clone(&self.store),
            legacy_status_codes: self.legacy_status_codes,
        })
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let registered = json_response("User registered", "MessageResponse");
        let responses = if self.legacy_status_codes {
            json!({
                "200": registered,
                "404": error_response("Missing username or password, or user already exists")
            })
        } else {
            json!({
                "200": registered,
                "400": error_response("Missing username or password"),
                "409": error_response("User already exists")
            })
        };

        Some(json!({
            "paths": {
                "/register": {
                    "post": {
                        "summary": "Register a user",
                        "tags": ["Users"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/RegisterRequest"
                                    }
                                }
                            }
                        },
                        "responses": responses
                    }
                }
            },
            "components": {
                "schemas": {
                    "RegisterRequest": {
                        "type": "object",
                        "properties": {
                            "username": {
                                "type": "string",
                                "description": "Unique user name"
                            },
                            "password": {
                                "type": "string",
                                "description": "Password, stored as given"
                            }
                        },
                        "required": ["username", "password"]
                    },
                    "MessageResponse": {
                        "type": "object",
                        "properties": {
                            "message": {
                                "type": "string"
                            }
                        },
                        "required": ["message"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "users module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            users = self.store.len(),
            "users module stopped"
        );
        Ok(())
    }
}

/// Create a new instance of the users module
pub fn create_module(store: Arc<UserStore>, legacy_status_codes: bool) -> Arc<dyn Module> {
    Arc::new(UsersModule::new(store, legacy_status_codes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_documents_configured_status_codes() {
        let store = Arc::new(UserStore::new());

        let legacy = UsersModule::new(Arc::clone(&store), true).openapi().unwrap();
        let responses = &legacy["paths"]["/register"]["post"]["responses"];
        assert!(responses["404"].is_object());
        assert!(responses["400"].is_null());

        let strict = UsersModule::new(store, false).openapi().unwrap();
        let responses = &strict["paths"]["/register"]["post"]["responses"];
        assert!(responses["400"].is_object());
        assert!(responses["409"].is_object());
        assert!(responses["404"].is_null());
    }
}
