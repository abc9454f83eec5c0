//! Optional text filters narrowing a vehicle listing.
//!
//! Every field is independent. Absent or blank values (empty or
//! whitespace-only) never narrow the result set, so callers can forward raw
//! request values without pre-processing.

/// Non-blank filter value matched as a case-insensitive substring.
///
/// ## Invariants
/// - `raw` contains at least one non-whitespace character.
/// - `needle` is `raw` lowercased; surrounding whitespace is kept.
///
/// # Examples
/// ```
/// use vehicle_catalogue::domain::FilterText;
///
/// assert!(FilterText::new("   ").is_none());
/// let text = FilterText::new("toy").expect("non-blank");
/// assert!(text.matches("Toyota"));
/// assert!(!text.matches("Honda"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterText {
    raw: String,
    needle: String,
}

impl FilterText {
    /// Returns `None` when `raw` is blank.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return None;
        }
        let needle = raw.to_lowercase();
        Some(Self { raw, needle })
    }

    /// Value as supplied by the caller.
    pub fn as_str(&self) -> &str {
        self.raw.as_str()
    }

    /// Lowercased value used for comparisons.
    pub fn needle(&self) -> &str {
        self.needle.as_str()
    }

    /// Case-insensitive containment test.
    pub fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(self.needle.as_str())
    }
}

/// Filter values for a vehicle listing.
///
/// # Examples
/// ```
/// use vehicle_catalogue::domain::VehicleFilter;
///
/// let filter = VehicleFilter::default().with_make("toy").with_owner_name("  ");
/// assert!(filter.make().is_some());
/// assert!(filter.owner_name().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleFilter {
    make: Option<FilterText>,
    model: Option<FilterText>,
    owner_name: Option<FilterText>,
    maintainer_name: Option<FilterText>,
}

impl VehicleFilter {
    /// Build a filter from optional raw values.
    pub fn from_parts(
        make: Option<String>,
        model: Option<String>,
        owner_name: Option<String>,
        maintainer_name: Option<String>,
    ) -> Self {
        Self {
            make: make.and_then(FilterText::new),
            model: model.and_then(FilterText::new),
            owner_name: owner_name.and_then(FilterText::new),
            maintainer_name: maintainer_name.and_then(FilterText::new),
        }
    }

    pub fn with_make(mut self, value: impl Into<String>) -> Self {
        self.make = FilterText::new(value);
        self
    }

    pub fn with_model(mut self, value: impl Into<String>) -> Self {
        self.model = FilterText::new(value);
        self
    }

    pub fn with_owner_name(mut self, value: impl Into<String>) -> Self {
        self.owner_name = FilterText::new(value);
        self
    }

    pub fn with_maintainer_name(mut self, value: impl Into<String>) -> Self {
        self.maintainer_name = FilterText::new(value);
        self
    }

    pub fn make(&self) -> Option<&FilterText> {
        self.make.as_ref()
    }

    pub fn model(&self) -> Option<&FilterText> {
        self.model.as_ref()
    }

    pub fn owner_name(&self) -> Option<&FilterText> {
        self.owner_name.as_ref()
    }

    pub fn maintainer_name(&self) -> Option<&FilterText> {
        self.maintainer_name.as_ref()
    }

    /// Whether no field narrows the result set.
    #[cfg(test)]
    pub(crate) fn is_unconstrained(&self) -> bool {
        self.make.is_none()
            && self.model.is_none()
            && self.owner_name.is_none()
            && self.maintainer_name.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case(" ")]
    #[case("\t\n ")]
    fn blank_values_are_absent(#[case] raw: &str) {
        assert!(FilterText::new(raw).is_none());
    }

    #[rstest]
    #[case("toy", "Toyota", true)]
    #[case("TOY", "toyota", true)]
    #[case("oro", "Corolla", true)]
    #[case("civic", "Camry", false)]
    fn matching_ignores_case(#[case] needle: &str, #[case] haystack: &str, #[case] hit: bool) {
        let text = FilterText::new(needle).expect("non-blank");
        assert_eq!(text.matches(haystack), hit);
    }

    #[rstest]
    fn surrounding_whitespace_is_kept() {
        let text = FilterText::new(" Smith").expect("non-blank");
        assert_eq!(text.needle(), " smith");
        assert!(text.matches("Jane Smith"));
        assert!(!text.matches("Smithers"));
    }

    #[rstest]
    fn blank_parts_leave_the_filter_unconstrained() {
        let filter = VehicleFilter::from_parts(
            Some(String::new()),
            None,
            Some("   ".to_owned()),
            None,
        );
        assert!(filter.is_unconstrained());
    }
}
