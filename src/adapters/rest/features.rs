//! REST endpoints and field tables of the catalog features.

use super::codec::FieldCodec;
use crate::domain::catalog::{PharmaceuticalForms, Permissions, ProductGroups, Users};
use crate::domain::listing::ListFeature;

/// A feature reachable over the Servfarma REST API.
pub trait RestFeature: ListFeature {
    /// Collection path relative to the API base URL, without slashes.
    const PATH: &'static str;

    /// Field-name mapping between records and wire bodies.
    const CODEC: FieldCodec;
}

impl RestFeature for ProductGroups {
    const PATH: &'static str = "product-groups";
    const CODEC: FieldCodec = FieldCodec::PLAIN;
}

impl RestFeature for PharmaceuticalForms {
    const PATH: &'static str = "pharmaceutical-forms";
    const CODEC: FieldCodec = FieldCodec::new(&[("abbreviation", "short_name")]);
}

impl RestFeature for Users {
    const PATH: &'static str = "users";
    const CODEC: FieldCodec = FieldCodec::new(&[("roleId", "role")]);
}

impl RestFeature for Permissions {
    const PATH: &'static str = "permissions";
    const CODEC: FieldCodec = FieldCodec::new(&[("code", "codename")]);
}
