pub mod constant_folding;
pub mod constant_propagation;
pub mod predicate;

pub use constant_folding::fold_constants;
pub use constant_propagation::ConstantPropagator;
