//! Shape validation for incoming payloads
//!
//! Raw JSON from the memory index is narrowed to typed records here.
//! Records that fail the shape check are dropped, never propagated.

mod records;

pub use records::{
    parse_payload, parse_payload_str, validate_entity, validate_named_entity, validate_relationship,
};
