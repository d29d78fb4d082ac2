//! Category transforms: enrich an [`ExtractedTuple`] into a full
//! [`Place`], applied uniformly to every tuple regardless of source.
//!
//! Budget, rating and review count are synthesized placeholders (no review
//! subsystem exists). They draw from the caller-provided [`Rng`] so tests
//! can seed a deterministic generator; only the ranges are contractual.

use chrono::{Days, Utc};
use rand::Rng;

use sortie_core::Place;
use sortie_sources::{ExtractedTuple, RawItem};

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=400&width=600";

const EVENT_DESCRIPTION: &str =
    "Vivez une expérience inoubliable avec cet événement. Découvrez animations et surprises sur place.";
const EVENT_HIGHLIGHTS: [&str; 4] = [
    "Animation garantie",
    "Lieu atypique",
    "Ambiance festive",
    "Organisation soignée",
];

const PLACE_DESCRIPTION: &str = "Lieu convivial pour partager un moment entre amis ou en famille.";
const PLACE_HIGHLIGHTS: [&str; 4] = [
    "Ambiance chaleureuse",
    "Personnel accueillant",
    "Produits frais",
    "Facile d'accès",
];

/// The two transform implementations, selected per category by the
/// registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    /// Catalog events: descriptive fields from the event dataset, wide
    /// evening window, large groups.
    Event,
    /// Restaurants, bars and activities: per-source enrichment, daytime
    /// window, small groups.
    Generic,
}

impl TransformKind {
    /// Produces a fully populated [`Place`]. Never fails: a tuple without
    /// a location is still transformed and carries `location: None`.
    pub fn apply<R: Rng + ?Sized>(self, tuple: ExtractedTuple, rng: &mut R) -> Place {
        match self {
            TransformKind::Event => transform_event(tuple, rng),
            TransformKind::Generic => transform_place(tuple, rng),
        }
    }
}

fn transform_event<R: Rng + ?Sized>(tuple: ExtractedTuple, rng: &mut R) -> Place {
    let mut description = EVENT_DESCRIPTION.to_string();
    let mut title = tuple.title;

    if let RawItem::Opendata(record) = &tuple.raw {
        let fields = &record.record.fields;
        if let Some(descriptif) = &fields.descriptif {
            description.clone_from(descriptif);
        }
        if let Some(titre) = &fields.titre {
            title = Some(titre.clone());
        }
    }

    Place {
        id: tuple.id,
        title: title.unwrap_or_else(|| "Événement inconnu".to_string()),
        description,
        category: "Événement".to_string(),
        image: PLACEHOLDER_IMAGE.to_string(),
        address: tuple.address,
        location: tuple.location,
        time_range: "10h00 - 23h00".to_string(),
        start_time: today_at(10),
        end_time: days_ahead_at(30, 23),
        budget: synth_budget(rng),
        min_participants: 2,
        max_participants: 100,
        rating: synth_rating(rng),
        review_count: synth_review_count(rng),
        highlights: owned(&EVENT_HIGHLIGHTS),
        source: tuple.source,
    }
}

fn transform_place<R: Rng + ?Sized>(tuple: ExtractedTuple, rng: &mut R) -> Place {
    let mut description = PLACE_DESCRIPTION.to_string();
    let mut category = "Restaurant".to_string();
    let mut time_range = "09h00 - 19h00".to_string();

    match &tuple.raw {
        RawItem::Overpass(node) => {
            if let Some(cuisine) = node.tags.get("cuisine") {
                description = format!("Cuisine: {cuisine}");
            }
            if let Some(opening_hours) = node.tags.get("opening_hours") {
                time_range.clone_from(opening_hours);
            }
        }
        // Dataset-specific catalog fields are not wired up for
        // restaurants/bars/activities; those records keep the defaults.
        RawItem::Opendata(_) => {}
        RawItem::Geoapify(feature) => {
            let properties = &feature.properties;
            if let Some(text) = &properties.description {
                description.clone_from(text);
            }
            if let Some(opening_hours) = &properties.opening_hours {
                time_range.clone_from(opening_hours);
            }
            if let Some(inferred) = infer_category(&properties.categories) {
                category = inferred.to_string();
            }
        }
    }

    Place {
        id: tuple.id,
        title: tuple.title.unwrap_or_else(|| "Lieu inconnu".to_string()),
        description,
        category,
        image: PLACEHOLDER_IMAGE.to_string(),
        address: tuple.address,
        location: tuple.location,
        time_range,
        start_time: today_at(9),
        end_time: days_ahead_at(30, 19),
        budget: synth_budget(rng),
        min_participants: 2,
        max_participants: 10,
        rating: synth_rating(rng),
        review_count: synth_review_count(rng),
        highlights: owned(&PLACE_HIGHLIGHTS),
        source: tuple.source,
    }
}

/// Infers a display category from a provider category list by
/// case-insensitive substring match. First match wins, in the order
/// bar → restaurant → sport.
fn infer_category(categories: &[String]) -> Option<&'static str> {
    let lowered: Vec<String> = categories.iter().map(|c| c.to_lowercase()).collect();
    if lowered.iter().any(|c| c.contains("bar")) {
        Some("Bar")
    } else if lowered.iter().any(|c| c.contains("restaurant")) {
        Some("Restaurant")
    } else if lowered.iter().any(|c| c.contains("sport")) {
        Some("Activité")
    } else {
        None
    }
}

/// RFC 3339 timestamp for today at `hour`:00:00 UTC.
fn today_at(hour: u32) -> String {
    days_ahead_at(0, hour)
}

/// RFC 3339 timestamp for `days` days from now at `hour`:00:00 UTC.
fn days_ahead_at(days: u64, hour: u32) -> String {
    let date = Utc::now().date_naive() + Days::new(days);
    date.and_hms_opt(hour, 0, 0)
        .map_or_else(String::new, |naive| naive.and_utc().to_rfc3339())
}

/// Synthesized outing budget in euros, uniform in `[10, 59]`.
fn synth_budget<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.random_range(10..60)
}

/// Synthesized rating, uniform in `[3.0, 5.0)`, one decimal.
fn synth_rating<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    (rng.random_range(3.0_f64..5.0) * 10.0).round() / 10.0
}

/// Synthesized review count, uniform in `[0, 300)`.
fn synth_review_count<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.random_range(0..300)
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}
