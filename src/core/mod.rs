pub mod config;
pub mod quantizer;
pub mod reconcile;
pub mod submit;
