//! Mock adapters for tests and local wiring.

mod mock_resource;

pub use mock_resource::MockListResource;
