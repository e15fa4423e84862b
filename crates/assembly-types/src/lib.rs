pub mod archetype;
pub mod geom;
pub mod part;
pub mod status;

pub use archetype::*;
pub use geom::*;
pub use part::*;
pub use status::*;
