pub mod archetype;
pub mod body;
pub mod trail;
