//! Feature vectors and the encoders that produce them.

mod builder;
mod encoding;
mod feature_vector;
mod home_advantage;

pub use builder::{Fixture, FixtureFeatures};
pub use encoding::{BucketEncoder, CategoricalEncoder};
pub use feature_vector::FeatureVector;
pub use home_advantage::{AdvantageLookup, HomeAdvantageTable};
