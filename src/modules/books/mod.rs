pub mod catalog;
pub mod models;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookstore_kernel::{InitCtx, Module};
use serde_json::json;

use crate::utils::openapi::{error_response, json_response, path_parameter};
use catalog::Catalog;

/// Public, read-only view of the book catalog
pub struct BooksModule {
    catalog: Arc<Catalog>,
}

impl BooksModule {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books = self.catalog.len(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(Arc::clone(&self.catalog))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List every book keyed by ISBN",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "Books keyed by ISBN in catalog order",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "additionalProperties": {
                                                "$ref": "#/components/schemas/Book"
                                            }
                                        }
                                    }
                                }
                            },
                            "500": error_response("Internal server error")
                        }
                    }
                },
                "/isbn/{isbn}": {
                    "get": {
                        "summary": "Get a book by ISBN",
                        "tags": ["Books"],
                        "parameters": [path_parameter("isbn")],
                        "responses": {
                            "200": json_response("The book", "Book"),
                            "404": error_response("ISBN not found")
                        }
                    }
                },
                "/author/{author}": {
                    "get": {
                        "summary": "Get every book by an author (case-insensitive)",
                        "tags": ["Books"],
                        "parameters": [path_parameter("author")],
                        "responses": {
                            "200": {
                                "description": "Books by the author",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": {
                                                "$ref": "#/components/schemas/Book"
                                            }
                                        }
                                    }
                                }
                            },
                            "404": error_response("No books by that author")
                        }
                    }
                },
                "/title/{title}": {
                    "get": {
                        "summary": "Get the first book with a title (case-insensitive)",
                        "tags": ["Books"],
                        "parameters": [path_parameter("title")],
                        "responses": {
                            "200": json_response("The first matching book", "Book"),
                            "404": error_response("Title not found")
                        }
                    }
                },
                "/review/{isbn}": {
                    "get": {
                        "summary": "Get the reviews of a book",
                        "tags": ["Books"],
                        "parameters": [path_parameter("isbn")],
                        "responses": {
                            "200": json_response("Review text keyed by reviewer", "Reviews"),
                            "404": error_response("ISBN not found")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "author": {
                                "type": "string",
                                "description": "Author of the book"
                            },
                            "title": {
                                "type": "string",
                                "description": "Title of the book"
                            },
                            "reviews": {
                                "$ref": "#/components/schemas/Reviews"
                            }
                        },
                        "required": ["author", "title", "reviews"]
                    },
                    "Reviews": {
                        "type": "object",
                        "additionalProperties": {
                            "type": "string"
                        }
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(catalog: Arc<Catalog>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(catalog))
}
