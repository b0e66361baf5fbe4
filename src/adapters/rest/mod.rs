//! REST adapter - `ListResource` over the Servfarma HTTP API.

mod codec;
mod features;
mod rest_resource;

pub use codec::FieldCodec;
pub use features::RestFeature;
pub use rest_resource::{RestClient, RestConfig, RestResource};
