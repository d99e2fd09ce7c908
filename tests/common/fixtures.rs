//! Reusable schemas shared across the integration tests.

use docschema::schema::{Field, Schema, SchemaBuilder};
use std::sync::Arc;

/// `Person{name: text, required; age: integer [0, 150); tags: list of text}`
pub fn person() -> Arc<Schema> {
    SchemaBuilder::new("Person")
        .field("name", Field::text().required())
        .field("age", Field::integer().min(0).max(150))
        .field("tags", Field::list_of(Field::text()))
        .build()
        .expect("Failed to build Person schema")
}

pub fn address() -> Arc<Schema> {
    SchemaBuilder::new("Address")
        .field("street", Field::text())
        .field("city", Field::text().required())
        .field("postcode", Field::text().regex(r"[0-9]{4}"))
        .field("country", Field::text().default_value("NO"))
        .build()
        .expect("Failed to build Address schema")
}

/// A person with a nested address and some defaulted settings
pub fn customer() -> Arc<Schema> {
    let address = address();
    SchemaBuilder::new("Customer")
        .extends(&person())
        .field("address", Field::nested(&address).default_from_model())
        .field(
            "tier",
            Field::text()
                .choice_mapping([("b", "Bronze"), ("s", "Silver"), ("g", "Gold")])
                .default_value("b"),
        )
        .field("settings", Field::map())
        .field("active", Field::boolean().default_value(true))
        .field("balance", Field::float().min(0))
        .field("joined", Field::timestamp())
        .build()
        .expect("Failed to build Customer schema")
}
