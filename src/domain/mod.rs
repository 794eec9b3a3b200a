/// Domain model: groups, repositories, the inventory and operation outcomes.
pub mod entities;
pub mod value_objects;
