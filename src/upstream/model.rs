//! Wire models for the upstream animal-listings API.
//!
//! Only the fields the router cares about are typed; everything else the upstream sends rides
//! along in `extra` so responses pass through untouched.

// std
use std::collections::BTreeMap;
// crates.io
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
// self
use crate::_prelude::*;

/// Pet record as returned by the upstream.
///
/// The upstream labels the species as `type` and may repeat it under `species`; both collapse
/// into [`Pet::species`] so the rendered object carries a single key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "RawPet")]
pub struct Pet {
	/// Upstream identifier.
	pub id: u64,
	/// Display name.
	pub name: String,
	/// Species (`Dog`, `Cat`, ...).
	pub species: String,
	/// Breed details, when known.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub breeds: Option<Breeds>,
	/// Age in years or an upstream life-stage label.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub age: Option<PetAge>,
	/// Gender label.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub gender: Option<String>,
	/// Size label.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub size: Option<String>,
	/// Listing status (`adoptable`, `adopted`, ...).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub status: Option<String>,
	/// Remaining upstream fields, passed through verbatim.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}

#[derive(Deserialize)]
struct RawPet {
	id: u64,
	name: String,
	#[serde(default, rename = "type")]
	kind: Option<String>,
	#[serde(default)]
	species: Option<String>,
	#[serde(default)]
	breeds: Option<Breeds>,
	#[serde(default)]
	age: Option<PetAge>,
	#[serde(default)]
	gender: Option<String>,
	#[serde(default)]
	size: Option<String>,
	#[serde(default)]
	status: Option<String>,
	#[serde(flatten)]
	extra: BTreeMap<String, Value>,
}
impl TryFrom<RawPet> for Pet {
	type Error = &'static str;

	fn try_from(raw: RawPet) -> Result<Self, Self::Error> {
		let species = raw.kind.or(raw.species).ok_or("missing field `type` or `species`")?;

		Ok(Self {
			id: raw.id,
			name: raw.name,
			species,
			breeds: raw.breeds,
			age: raw.age,
			gender: raw.gender,
			size: raw.size,
			status: raw.status,
			extra: raw.extra,
		})
	}
}

/// Breed sub-object attached to a [`Pet`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Breeds {
	/// Primary breed.
	#[serde(default)]
	pub primary: Option<String>,
	/// Secondary breed for mixes.
	#[serde(default)]
	pub secondary: Option<String>,
	/// Whether the pet is a mix.
	#[serde(default)]
	pub mixed: bool,
	/// Whether the breed is unknown.
	#[serde(default)]
	pub unknown: bool,
}

/// Age reported either as whole years or as a life-stage label such as `Young`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PetAge {
	/// Age in whole years.
	Years(u32),
	/// Upstream life-stage label.
	Stage(String),
}

/// Animal type (`Dog`, `Cat`, ...) with its upstream attributes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnimalType {
	/// Type name.
	pub name: String,
	/// Coats, colors, genders, links, and any other upstream fields.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}

/// Page metadata reported alongside animal listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
	/// Requested page size.
	#[serde(default)]
	pub count_per_page: u32,
	/// Total number of matching animals.
	#[serde(default)]
	pub total_count: u64,
	/// 1-based page index.
	#[serde(default)]
	pub current_page: u32,
	/// Total number of pages.
	#[serde(default)]
	pub total_pages: u32,
}

/// One page of animal listings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimalPage {
	/// Animals on this page.
	#[serde(default)]
	pub animals: Vec<Pet>,
	/// Page metadata, when the upstream reports it.
	#[serde(default)]
	pub pagination: Option<Pagination>,
}

/// Optional listing filters forwarded verbatim as upstream query parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnimalFilters {
	/// Species filter. `species` is accepted as an alternative name; sending both is
	/// rejected with `400`.
	#[serde(rename = "type", alias = "species", skip_serializing_if = "Option::is_none")]
	pub species: Option<String>,
	/// Breed filter.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub breed: Option<String>,
	/// Size filter.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub size: Option<String>,
	/// Gender filter.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub gender: Option<String>,
	/// Age or life-stage filter.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub age: Option<String>,
	/// Listing status filter.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub status: Option<String>,
	/// Name filter.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// 1-based page index.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub page: Option<u32>,
	/// Page size.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub limit: Option<u32>,
}

#[derive(Deserialize)]
pub(crate) struct AnimalEnvelope {
	pub(crate) animal: Pet,
}

#[derive(Deserialize)]
pub(crate) struct TypesEnvelope {
	pub(crate) types: Vec<AnimalType>,
}

/// RFC 7807 problem body the upstream uses for errors.
#[derive(Deserialize)]
pub(crate) struct Problem {
	#[serde(default)]
	pub(crate) title: Option<String>,
	#[serde(default)]
	pub(crate) detail: Option<String>,
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn upstream_animal_keeps_unknown_fields() {
		let pet: Pet = serde_json::from_value(json!({
			"id": 7,
			"name": "Rex",
			"type": "Dog",
			"breeds": { "primary": "Beagle", "secondary": null, "mixed": false, "unknown": false },
			"age": "Young",
			"gender": "Male",
			"size": "Medium",
			"status": "adoptable",
			"colors": { "primary": "Tricolor" }
		}))
		.expect("Upstream animal should decode.");

		assert_eq!(pet.species, "Dog");
		assert_eq!(pet.age, Some(PetAge::Stage("Young".into())));
		assert_eq!(pet.breeds.as_ref().and_then(|b| b.primary.as_deref()), Some("Beagle"));
		assert_eq!(pet.extra["colors"]["primary"], "Tricolor");

		let rendered = serde_json::to_value(&pet).expect("Pet should encode.");

		assert_eq!(rendered["species"], "Dog");
		assert_eq!(rendered["colors"]["primary"], "Tricolor");
		assert!(rendered.get("type").is_none());
	}

	#[test]
	fn species_reported_under_both_keys_decodes_once() {
		let pet: Pet = serde_json::from_value(json!({
			"id": 120,
			"type": "Dog",
			"species": "Dog",
			"name": "Spot"
		}))
		.expect("Animal carrying both species keys should decode.");

		assert_eq!(pet.species, "Dog");
		assert!(pet.extra.is_empty());

		let rendered = serde_json::to_value(&pet).expect("Pet should encode.");

		assert_eq!(rendered, json!({ "id": 120, "name": "Spot", "species": "Dog" }));
	}

	#[test]
	fn type_wins_over_species_when_they_disagree() {
		let pet: Pet = serde_json::from_value(json!({
			"id": 1,
			"type": "Rabbit",
			"species": "European Rabbit",
			"name": "Bun"
		}))
		.expect("Animal should decode.");

		assert_eq!(pet.species, "Rabbit");
	}

	#[test]
	fn missing_species_is_rejected() {
		let err = serde_json::from_value::<Pet>(json!({ "id": 1, "name": "Nobody" }))
			.expect_err("Animal without a species should be rejected.");

		assert!(err.to_string().contains("missing field `type` or `species`"));
	}

	#[test]
	fn numeric_age_decodes_as_years() {
		let pet: Pet = serde_json::from_value(json!({ "id": 1, "name": "Tom", "species": "cat", "age": 3 }))
			.expect("Minimal pet should decode.");

		assert_eq!(pet.age, Some(PetAge::Years(3)));
		assert!(pet.breeds.is_none());
	}

	#[test]
	fn filters_skip_absent_values() {
		let filters = AnimalFilters {
			species: Some("Dog".into()),
			page: Some(2),
			..Default::default()
		};
		let encoded = serde_json::to_value(&filters).expect("Filters should encode.");

		assert_eq!(encoded, json!({ "type": "Dog", "page": 2 }));
	}
}
