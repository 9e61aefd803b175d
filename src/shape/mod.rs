//! Shapes used as primitives and as query volumes.

pub use self::ball::Ball;
pub use self::capsule::Capsule;
pub use self::plane::Plane;
pub use self::segment::Segment;
pub use self::triangle::Triangle;

mod ball;
mod capsule;
mod plane;
mod segment;
mod triangle;
