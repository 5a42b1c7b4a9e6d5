pub mod collect;
pub mod lookup;
