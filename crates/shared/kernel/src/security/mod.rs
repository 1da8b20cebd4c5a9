mod tags;

pub use tags::TagSet;
