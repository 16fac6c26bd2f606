//! # Schema Catalog
//!
//! Schemas compiled into the `vshape` binary. Schemas are Rust values built
//! with the `vshape-schema` DSL; the CLI never parses schemas from files.

use vshape_schema::prelude::*;

/// A named schema in the catalog.
pub struct CatalogEntry {
    pub name: &'static str,
    pub description: &'static str,
    build: fn() -> Schema,
}

impl CatalogEntry {
    pub fn schema(&self) -> Schema {
        (self.build)()
    }
}

/// All bundled schemas, in listing order.
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        name: "user",
        description: "User profile with an optional postal address",
        build: user,
    },
    CatalogEntry {
        name: "inventory",
        description: "Map of SKU to stock record",
        build: inventory,
    },
    CatalogEntry {
        name: "order",
        description: "Order with at least one shaped line item",
        build: order,
    },
];

/// Look up a catalog entry by name.
pub fn lookup(name: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.name == name)
}

pub fn names() -> Vec<&'static str> {
    CATALOG.iter().map(|entry| entry.name).collect()
}

fn user() -> Schema {
    Schema::branch()
        .field("name", is_string().and([required(), not_empty()]))
        .field("age", is_integer().and(range(Some(0.0), Some(150.0))))
        .field("role", is_string().and(in_list(["admin", "editor", "viewer"])))
        .field(
            "tags",
            is_array().and([at_most(10.0), of_type(is_string().and(not_empty()))]),
        )
        .field(
            "address",
            Schema::branch()
                .field("street", is_string().and(required()))
                .field("city", is_string().and(required()))
                .field("zip", is_any_of([is_string(), is_integer()])),
        )
        .into()
}

fn inventory() -> Schema {
    Schema::wildcard(
        Schema::branch()
            .field("quantity", is_integer().and([required(), at_least(0.0)]))
            .field("price", is_number().and(at_least(0.0))),
    )
}

fn order() -> Schema {
    let item = Schema::branch()
        .field("sku", is_string().and([required(), not_empty()]))
        .field("quantity", is_integer().and([required(), at_least(1.0)]));
    Schema::branch()
        .field("id", is_string().and(required()))
        .field("items", is_array().and([required(), at_least(1.0), of_type(item)]))
        .field("notes", is_string())
        .into()
}
