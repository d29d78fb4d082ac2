//! Static per-category configuration: applicable sources, their request
//! parameters, and the transform each category runs.
//!
//! The table is bound to the closed [`Category`] enum at compile time, so
//! lookup-by-string stops at the query-parameter boundary. A `None` request
//! spec means the source does not apply to that category; `event` is
//! catalog-only, everything else fans out to all three providers.

use sortie_core::Category;

use crate::transform::TransformKind;

/// Request configuration and transform binding for one category.
#[derive(Debug, Clone, Copy)]
pub struct CategorySpec {
    /// Overpass node selector, e.g. `"amenity"="restaurant"`.
    pub overpass_selector: Option<&'static str>,
    /// OpenData catalog dataset slug.
    pub opendata_dataset: Option<&'static str>,
    /// Geoapify category code.
    pub geoapify_categories: Option<&'static str>,
    pub transform: TransformKind,
}

/// Resolves the static spec for a category. Total over the closed enum;
/// unknown category names never get this far.
#[must_use]
pub const fn spec(category: Category) -> &'static CategorySpec {
    match category {
        Category::Restaurant => &RESTAURANT,
        Category::Bar => &BAR,
        Category::Event => &EVENT,
        Category::Activity => &ACTIVITY,
    }
}

const RESTAURANT: CategorySpec = CategorySpec {
    overpass_selector: Some("\"amenity\"=\"restaurant\""),
    opendata_dataset: Some("restaurants-casvp"),
    geoapify_categories: Some("catering.restaurant"),
    transform: TransformKind::Generic,
};

const BAR: CategorySpec = CategorySpec {
    overpass_selector: Some("\"amenity\"=\"bar\""),
    opendata_dataset: Some("bars-de-paris"),
    geoapify_categories: Some("catering.bar"),
    transform: TransformKind::Generic,
};

const EVENT: CategorySpec = CategorySpec {
    overpass_selector: None,
    opendata_dataset: Some("que-faire-a-paris-"),
    geoapify_categories: None,
    transform: TransformKind::Event,
};

const ACTIVITY: CategorySpec = CategorySpec {
    overpass_selector: Some("\"leisure\"=\"sports_centre\""),
    opendata_dataset: Some("activites-paris"),
    geoapify_categories: Some("sports.leisure"),
    transform: TransformKind::Generic,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_is_catalog_only() {
        let spec = spec(Category::Event);
        assert!(spec.overpass_selector.is_none());
        assert!(spec.geoapify_categories.is_none());
        assert_eq!(spec.opendata_dataset, Some("que-faire-a-paris-"));
        assert_eq!(spec.transform, TransformKind::Event);
    }

    #[test]
    fn non_event_categories_use_all_three_sources() {
        for category in [Category::Restaurant, Category::Bar, Category::Activity] {
            let spec = spec(category);
            assert!(spec.overpass_selector.is_some(), "{category}");
            assert!(spec.opendata_dataset.is_some(), "{category}");
            assert!(spec.geoapify_categories.is_some(), "{category}");
            assert_eq!(spec.transform, TransformKind::Generic, "{category}");
        }
    }

    #[test]
    fn every_category_has_at_least_one_source() {
        for category in Category::ALL {
            let spec = spec(category);
            assert!(
                spec.overpass_selector.is_some()
                    || spec.opendata_dataset.is_some()
                    || spec.geoapify_categories.is_some(),
                "{category}"
            );
        }
    }
}
