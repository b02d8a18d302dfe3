//! Shared parsing utilities for transcript grammars.

pub mod whatsapp;

pub use whatsapp::{
    MessageHeader, RawDate, RawTime, build_timestamp, infer_date_order, parse_attachment,
    parse_header, split_author,
};
