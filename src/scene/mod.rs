pub(crate) mod animation;
pub(crate) mod brush;
pub(crate) mod enums;
pub(crate) mod geometry;
pub(crate) mod graph;
pub(crate) mod object;
pub(crate) mod visual;
