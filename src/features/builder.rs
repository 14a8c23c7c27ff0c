//! Assembles match fixtures into feature vectors.
//!
//! Layout: venue one-hot, then time-slot one-hot, then
//! `[home advantage, away advantage, home - away]`.

use tracing::trace;

use crate::error::{NumericError, Result};
use crate::features::{AdvantageLookup, BucketEncoder, CategoricalEncoder, FeatureVector};

/// One scheduled match.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    pub home: String,
    pub away: String,
    pub venue: String,
    /// Local start time in hours, e.g. `19.5` for 7:30 pm.
    pub start_hour: f64,
}

impl Fixture {
    pub fn new(home: impl Into<String>, away: impl Into<String>, venue: impl Into<String>, start_hour: f64) -> Self {
        Self { home: home.into(), away: away.into(), venue: venue.into(), start_hour }
    }
}

/// Feature builder holding the encoders and a borrowed advantage lookup.
pub struct FixtureFeatures<'a, A: AdvantageLookup + ?Sized> {
    venues: CategoricalEncoder<String>,
    slots: BucketEncoder,
    lookup: &'a A,
}

impl<'a, A: AdvantageLookup + ?Sized> FixtureFeatures<'a, A> {
    pub fn new(venues: CategoricalEncoder<String>, slots: BucketEncoder, lookup: &'a A) -> Self {
        Self { venues, slots, lookup }
    }

    /// Length of every vector produced by [`FixtureFeatures::build`].
    pub fn len(&self) -> usize {
        self.venues.len() + self.slots.len() + 3
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    fn advantage(&self, team: &str, venue: &str) -> Result<f64> {
        self.lookup
            .advantage(team, venue)
            .ok_or_else(|| NumericError::MissingEntry(format!("{team},{venue}")))
    }

    /// Fails with [`NumericError::MissingEntry`] when either team has no
    /// advantage recorded at the venue.
    pub fn build(&self, fixture: &Fixture) -> Result<FeatureVector> {
        let home = self.advantage(&fixture.home, &fixture.venue)?;
        let away = self.advantage(&fixture.away, &fixture.venue)?;
        trace!(venue = %fixture.venue, home_adv = home, away_adv = away, "fixture features");
        let venue = self.venues.encode(fixture.venue.as_str());
        let slot = self.slots.encode(fixture.start_hour);
        let stats = FeatureVector::dense(vec![home, away, home - away]);
        Ok(FeatureVector::concat(&[&venue, &slot, &stats]))
    }

    /// Build every fixture, stopping at the first failure.
    pub fn build_all<'f>(&self, fixtures: impl IntoIterator<Item = &'f Fixture>) -> Result<Vec<FeatureVector>> {
        fixtures.into_iter().map(|f| self.build(f)).collect()
    }
}
