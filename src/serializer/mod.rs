mod serializer;

pub use serializer::serialize;
