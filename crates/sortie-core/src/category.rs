//! The closed set of place categories the service aggregates.

/// A supported aggregation category.
///
/// Parsed case-insensitively from the `category` query parameter; anything
/// outside this set is a caller error, signaled by the pipeline rather than
/// here (`from_name` returns `None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Restaurant,
    Bar,
    Event,
    Activity,
}

impl Category {
    /// All supported categories, in a stable order.
    pub const ALL: [Category; 4] = [
        Category::Restaurant,
        Category::Bar,
        Category::Event,
        Category::Activity,
    ];

    /// Parses a category name, ignoring ASCII case. Returns `None` for
    /// unsupported names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "restaurant" => Some(Category::Restaurant),
            "bar" => Some(Category::Bar),
            "event" => Some(Category::Event),
            "activity" => Some(Category::Activity),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Restaurant => "restaurant",
            Category::Bar => "bar",
            Category::Event => "event",
            Category::Activity => "activity",
        }
    }
}

impl Default for Category {
    /// The category assumed when the caller supplies none.
    fn default() -> Self {
        Category::Restaurant
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
