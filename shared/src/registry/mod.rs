pub mod component_hash_table;
pub mod error;
pub mod extender_registry;
