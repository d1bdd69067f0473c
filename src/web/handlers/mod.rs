//! HTTP request handlers for the tourforge web API.

pub mod tours;
