//! Best-effort forward geocoding.
//!
//! The actual provider is pluggable configuration; this module only fixes
//! the failure contract: a slow or broken geocoder degrades a location
//! answer to a null coordinate pair, it never stalls or fails the save.

/// One geocoding result.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub place: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Candidate {
    pub fn new(place: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            place: place.into(),
            latitude,
            longitude,
        }
    }
}

/// A forward-geocoding capability.
///
/// Implementations are expected to bound their own network timeouts;
/// whatever they report as an error is absorbed by `GeoLookup`.
pub trait Geocoder {
    /// Geocode free text into zero or more candidates, best first.
    fn geocode(&self, location: &str) -> anyhow::Result<Vec<Candidate>>;
}

/// Failure-absorbing wrapper around a geocoding provider.
#[derive(Default)]
pub struct GeoLookup {
    geocoder: Option<Box<dyn Geocoder + Send + Sync>>,
}

impl GeoLookup {
    pub fn new(geocoder: Box<dyn Geocoder + Send + Sync>) -> Self {
        Self {
            geocoder: Some(geocoder),
        }
    }

    /// A lookup with no provider configured; every resolve is a miss.
    pub fn disabled() -> Self {
        Self { geocoder: None }
    }

    /// Resolve free text to `(latitude, longitude)`, best effort.
    ///
    /// The first candidate wins. Any failure - no provider, provider error,
    /// no results - yields `(None, None)` and a log line; nothing escapes
    /// this boundary.
    pub fn resolve(&self, location: &str) -> (Option<f64>, Option<f64>) {
        let Some(geocoder) = &self.geocoder else {
            log::debug!("no geocoder configured, skipping lookup for {location:?}");
            return (None, None);
        };
        match geocoder.geocode(location) {
            Ok(candidates) => match candidates.first() {
                Some(c) => (Some(c.latitude), Some(c.longitude)),
                None => {
                    log::debug!("no geocoding results for {location:?}");
                    (None, None)
                }
            },
            Err(error) => {
                log::warn!("error in geocoding {location:?}: {error:#}");
                (None, None)
            }
        }
    }
}

impl std::fmt::Debug for GeoLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoLookup")
            .field("configured", &self.geocoder.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<Candidate>);

    impl Geocoder for Fixed {
        fn geocode(&self, _location: &str) -> anyhow::Result<Vec<Candidate>> {
            Ok(self.0.clone())
        }
    }

    struct AlwaysFails;

    impl Geocoder for AlwaysFails {
        fn geocode(&self, _location: &str) -> anyhow::Result<Vec<Candidate>> {
            anyhow::bail!("provider unavailable")
        }
    }

    #[test]
    fn first_candidate_wins() {
        let lookup = GeoLookup::new(Box::new(Fixed(vec![
            Candidate::new("Springfield, IL", 39.8, -89.6),
            Candidate::new("Springfield, MA", 42.1, -72.6),
        ])));
        assert_eq!(lookup.resolve("Springfield"), (Some(39.8), Some(-89.6)));
    }

    #[test]
    fn failure_degrades_to_null_pair() {
        let lookup = GeoLookup::new(Box::new(AlwaysFails));
        assert_eq!(lookup.resolve("anywhere"), (None, None));
    }

    #[test]
    fn no_results_degrades_to_null_pair() {
        let lookup = GeoLookup::new(Box::new(Fixed(vec![])));
        assert_eq!(lookup.resolve("nowhere"), (None, None));
    }

    #[test]
    fn disabled_lookup_always_misses() {
        assert_eq!(GeoLookup::disabled().resolve("anywhere"), (None, None));
    }
}
